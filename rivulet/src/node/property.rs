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

use super::{GraphNode, Node, ParameterTerm, Rewritable, Term};

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct PropertyTerm {
    receiver: Node,
    member: Arc<str>,
    member_type: Type,
}
impl PropertyTerm {
    pub fn new(receiver: Node, member: impl Into<Arc<str>>, member_type: Type) -> Self {
        Self {
            receiver,
            member: member.into(),
            member_type,
        }
    }
    pub fn receiver(&self) -> &Node {
        &self.receiver
    }
    pub fn member(&self) -> &str {
        &self.member
    }
}
impl GraphNode for PropertyTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        self.receiver.free_parameters()
    }
    fn children(&self) -> Vec<&Node> {
        once(&self.receiver).collect()
    }
    fn has_captures(&self) -> bool {
        self.receiver.has_captures()
    }
    fn node_type(&self) -> Type {
        self.member_type.clone()
    }
}
impl Rewritable for PropertyTerm {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        self.receiver.substitute(transform).map(|receiver| {
            Node::new(Term::Property(Self {
                receiver,
                member: Arc::clone(&self.member),
                member_type: self.member_type.clone(),
            }))
        })
    }
}
impl std::fmt::Display for PropertyTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.receiver, self.member)
    }
}
impl SerializeJson for PropertyTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("property")),
            ("receiver", self.receiver.to_json()?),
            ("member", JsonValue::from(self.member.as_ref())),
            ("type", self.member_type.to_json()?),
        ]))
    }
}
