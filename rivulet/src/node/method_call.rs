// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{iter::once, sync::Arc};

use serde_json::Value as JsonValue;

use crate::{
    hash::FnvHashSet,
    serialize::{json_object, SerializeJson},
    types::Type,
};

use super::{
    collect_free_parameters, format_node_list, substitute_nodes, GraphNode, Node, ParameterTerm,
    Rewritable, Term,
};

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct MethodCallTerm {
    receiver: Node,
    method: Arc<str>,
    type_arguments: Vec<Type>,
    args: Vec<Node>,
    result_type: Type,
}
impl MethodCallTerm {
    pub fn new(
        receiver: Node,
        method: impl Into<Arc<str>>,
        type_arguments: Vec<Type>,
        args: Vec<Node>,
        result_type: Type,
    ) -> Self {
        Self {
            receiver,
            method: method.into(),
            type_arguments,
            args,
            result_type,
        }
    }
    pub fn receiver(&self) -> &Node {
        &self.receiver
    }
    pub fn method(&self) -> &str {
        &self.method
    }
    pub fn type_arguments(&self) -> &[Type] {
        &self.type_arguments
    }
    pub fn args(&self) -> &[Node] {
        &self.args
    }
    pub fn result_type(&self) -> &Type {
        &self.result_type
    }
}
impl GraphNode for MethodCallTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        collect_free_parameters(once(&self.receiver).chain(self.args.iter()))
    }
    fn children(&self) -> Vec<&Node> {
        once(&self.receiver).chain(self.args.iter()).collect()
    }
    fn has_captures(&self) -> bool {
        self.receiver.has_captures() || self.args.iter().any(|arg| arg.has_captures())
    }
    fn node_type(&self) -> Type {
        self.result_type.clone()
    }
}
impl Rewritable for MethodCallTerm {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        let receiver = self.receiver.substitute(transform);
        let args = substitute_nodes(&self.args, transform);
        if receiver.is_none() && args.is_none() {
            return None;
        }
        Some(Node::new(Term::MethodCall(Self {
            receiver: receiver.unwrap_or_else(|| self.receiver.clone()),
            method: Arc::clone(&self.method),
            type_arguments: self.type_arguments.clone(),
            args: args.unwrap_or_else(|| self.args.clone()),
            result_type: self.result_type.clone(),
        })))
    }
}
impl std::fmt::Display for MethodCallTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(.{}<{}> {}",
            self.method,
            self.type_arguments
                .iter()
                .map(|value| format!("{}", value))
                .collect::<Vec<_>>()
                .join(", "),
            self.receiver,
        )?;
        if self.args.is_empty() {
            write!(f, ")")
        } else {
            write!(f, " {})", format_node_list(&self.args))
        }
    }
}
impl SerializeJson for MethodCallTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("method_call")),
            ("receiver", self.receiver.to_json()?),
            ("method", JsonValue::from(self.method.as_ref())),
            ("type_arguments", self.type_arguments.to_json()?),
            ("args", self.args.to_json()?),
            ("type", self.result_type.to_json()?),
        ]))
    }
}
