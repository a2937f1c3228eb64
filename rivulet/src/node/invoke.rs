// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::iter::once;

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
pub struct InvokeTerm {
    target: Node,
    args: Vec<Node>,
}
impl InvokeTerm {
    pub fn new(target: Node, args: Vec<Node>) -> Self {
        Self { target, args }
    }
    pub fn target(&self) -> &Node {
        &self.target
    }
    pub fn args(&self) -> &[Node] {
        &self.args
    }
}
impl GraphNode for InvokeTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        collect_free_parameters(once(&self.target).chain(self.args.iter()))
    }
    fn children(&self) -> Vec<&Node> {
        once(&self.target).chain(self.args.iter()).collect()
    }
    fn has_captures(&self) -> bool {
        self.target.has_captures() || self.args.iter().any(|arg| arg.has_captures())
    }
    fn node_type(&self) -> Type {
        self.target
            .node_type()
            .application_result()
            .unwrap_or(Type::Opaque)
    }
}
impl Rewritable for InvokeTerm {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        let target = self.target.substitute(transform);
        let args = substitute_nodes(&self.args, transform);
        if target.is_none() && args.is_none() {
            return None;
        }
        Some(Node::new(Term::Invoke(Self::new(
            target.unwrap_or_else(|| self.target.clone()),
            args.unwrap_or_else(|| self.args.clone()),
        ))))
    }
}
impl std::fmt::Display for InvokeTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.args.is_empty() {
            write!(f, "({})", self.target)
        } else {
            write!(f, "({} {})", self.target, format_node_list(&self.args))
        }
    }
}
impl SerializeJson for InvokeTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("invoke")),
            ("target", self.target.to_json()?),
            ("args", self.args.to_json()?),
        ]))
    }
}
