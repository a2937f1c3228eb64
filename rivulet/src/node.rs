// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{hash::Hash, sync::Arc};

use serde_json::Value as JsonValue;
use tracing::trace;

mod binary;
pub use binary::*;
mod captured;
pub use captured::*;
mod constant;
pub use constant::*;
mod invoke;
pub use invoke::*;
mod lambda;
pub use lambda::*;
mod method_call;
pub use method_call::*;
mod parameter;
pub use parameter::*;
mod property;
pub use property::*;

use crate::{
    hash::{hash_object, FnvHashSet, HashId},
    serialize::SerializeJson,
    types::Type,
    value::Value,
};

pub trait GraphNode {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm>;
    fn children(&self) -> Vec<&Node>;
    fn has_captures(&self) -> bool;
    fn node_type(&self) -> Type;
}

pub trait Rewritable {
    /// Pre-order replacement: a node replaced by `transform` is not visited further.
    /// Returns `None` when nothing in the subtree changed.
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node>;
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum Term {
    Constant(ConstantTerm),
    Parameter(ParameterTerm),
    Lambda(LambdaTerm),
    Invoke(InvokeTerm),
    MethodCall(MethodCallTerm),
    Property(PropertyTerm),
    Binary(BinaryTerm),
    Captured(CapturedTerm),
}
impl GraphNode for Term {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        match self {
            Self::Constant(term) => term.free_parameters(),
            Self::Parameter(term) => term.free_parameters(),
            Self::Lambda(term) => term.free_parameters(),
            Self::Invoke(term) => term.free_parameters(),
            Self::MethodCall(term) => term.free_parameters(),
            Self::Property(term) => term.free_parameters(),
            Self::Binary(term) => term.free_parameters(),
            Self::Captured(term) => term.free_parameters(),
        }
    }
    fn children(&self) -> Vec<&Node> {
        match self {
            Self::Constant(term) => term.children(),
            Self::Parameter(term) => term.children(),
            Self::Lambda(term) => term.children(),
            Self::Invoke(term) => term.children(),
            Self::MethodCall(term) => term.children(),
            Self::Property(term) => term.children(),
            Self::Binary(term) => term.children(),
            Self::Captured(term) => term.children(),
        }
    }
    fn has_captures(&self) -> bool {
        match self {
            Self::Constant(term) => term.has_captures(),
            Self::Parameter(term) => term.has_captures(),
            Self::Lambda(term) => term.has_captures(),
            Self::Invoke(term) => term.has_captures(),
            Self::MethodCall(term) => term.has_captures(),
            Self::Property(term) => term.has_captures(),
            Self::Binary(term) => term.has_captures(),
            Self::Captured(term) => term.has_captures(),
        }
    }
    fn node_type(&self) -> Type {
        match self {
            Self::Constant(term) => term.node_type(),
            Self::Parameter(term) => term.node_type(),
            Self::Lambda(term) => term.node_type(),
            Self::Invoke(term) => term.node_type(),
            Self::MethodCall(term) => term.node_type(),
            Self::Property(term) => term.node_type(),
            Self::Binary(term) => term.node_type(),
            Self::Captured(term) => term.node_type(),
        }
    }
}
impl Rewritable for Term {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        match self {
            Self::Constant(_) | Self::Parameter(_) | Self::Captured(_) => None,
            Self::Lambda(term) => term.substitute(transform),
            Self::Invoke(term) => term.substitute(transform),
            Self::MethodCall(term) => term.substitute(transform),
            Self::Property(term) => term.substitute(transform),
            Self::Binary(term) => term.substitute(transform),
        }
    }
}
impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constant(term) => std::fmt::Display::fmt(term, f),
            Self::Parameter(term) => std::fmt::Display::fmt(term, f),
            Self::Lambda(term) => std::fmt::Display::fmt(term, f),
            Self::Invoke(term) => std::fmt::Display::fmt(term, f),
            Self::MethodCall(term) => std::fmt::Display::fmt(term, f),
            Self::Property(term) => std::fmt::Display::fmt(term, f),
            Self::Binary(term) => std::fmt::Display::fmt(term, f),
            Self::Captured(term) => std::fmt::Display::fmt(term, f),
        }
    }
}
impl SerializeJson for Term {
    fn to_json(&self) -> Result<JsonValue, String> {
        match self {
            Self::Constant(term) => term.to_json(),
            Self::Parameter(term) => term.to_json(),
            Self::Lambda(term) => term.to_json(),
            Self::Invoke(term) => term.to_json(),
            Self::MethodCall(term) => term.to_json(),
            Self::Property(term) => term.to_json(),
            Self::Binary(term) => term.to_json(),
            Self::Captured(term) => term.to_json(),
        }
    }
}

#[derive(Clone)]
pub struct Node {
    hash: HashId,
    has_captures: bool,
    term: Arc<Term>,
}
impl Node {
    pub fn new(term: Term) -> Self {
        Self {
            hash: hash_object(&term),
            has_captures: term.has_captures(),
            term: Arc::new(term),
        }
    }
    pub fn constant(value: Value, value_type: Type) -> Self {
        trace!(node_create = "constant");
        Self::new(Term::Constant(ConstantTerm::new(value, value_type)))
    }
    pub fn parameter(parameter_type: Type, name: impl Into<Arc<str>>) -> Self {
        trace!(node_create = "parameter");
        Self::new(Term::Parameter(ParameterTerm::new(parameter_type, name)))
    }
    pub fn lambda(parameters: Vec<ParameterTerm>, body: Node) -> Self {
        trace!(node_create = "lambda", num_args = parameters.len());
        Self::new(Term::Lambda(LambdaTerm::new(parameters, body)))
    }
    pub fn invoke(target: Node, args: Vec<Node>) -> Self {
        trace!(node_create = "invoke", num_args = args.len());
        Self::new(Term::Invoke(InvokeTerm::new(target, args)))
    }
    pub fn method_call(
        receiver: Node,
        method: impl Into<Arc<str>>,
        type_arguments: Vec<Type>,
        args: Vec<Node>,
        result_type: Type,
    ) -> Self {
        trace!(node_create = "method_call");
        Self::new(Term::MethodCall(MethodCallTerm::new(
            receiver,
            method,
            type_arguments,
            args,
            result_type,
        )))
    }
    pub fn property(receiver: Node, member: impl Into<Arc<str>>, member_type: Type) -> Self {
        trace!(node_create = "property");
        Self::new(Term::Property(PropertyTerm::new(receiver, member, member_type)))
    }
    pub fn binary(operator: BinaryOperator, left: Node, right: Node) -> Self {
        trace!(node_create = "binary", operator = %operator);
        Self::new(Term::Binary(BinaryTerm::new(operator, left, right)))
    }
    pub fn captured(term: CapturedTerm) -> Self {
        trace!(node_create = "captured", capture_id = term.id());
        Self::new(Term::Captured(term))
    }
    pub fn id(&self) -> HashId {
        self.hash
    }
    pub fn term(&self) -> &Term {
        &self.term
    }
    pub fn match_constant(&self) -> Option<&ConstantTerm> {
        match self.term() {
            Term::Constant(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_parameter(&self) -> Option<&ParameterTerm> {
        match self.term() {
            Term::Parameter(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_lambda(&self) -> Option<&LambdaTerm> {
        match self.term() {
            Term::Lambda(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_invoke(&self) -> Option<&InvokeTerm> {
        match self.term() {
            Term::Invoke(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_method_call(&self) -> Option<&MethodCallTerm> {
        match self.term() {
            Term::MethodCall(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_property(&self) -> Option<&PropertyTerm> {
        match self.term() {
            Term::Property(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_binary(&self) -> Option<&BinaryTerm> {
        match self.term() {
            Term::Binary(term) => Some(term),
            _ => None,
        }
    }
    pub fn match_captured(&self) -> Option<&CapturedTerm> {
        match self.term() {
            Term::Captured(term) => Some(term),
            _ => None,
        }
    }
}
impl GraphNode for Node {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        self.term.free_parameters()
    }
    fn children(&self) -> Vec<&Node> {
        self.term.children()
    }
    fn has_captures(&self) -> bool {
        self.has_captures
    }
    fn node_type(&self) -> Type {
        self.term.node_type()
    }
}
impl Rewritable for Node {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        match transform(self) {
            Some(replacement) => Some(replacement),
            None => self.term.substitute(transform),
        }
    }
}
impl Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && (Arc::ptr_eq(&self.term, &other.term) || self.term == other.term)
    }
}
impl Eq for Node {}
impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.term, f)
    }
}
impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.term, f)
    }
}
impl SerializeJson for Node {
    fn to_json(&self) -> Result<JsonValue, String> {
        self.term.to_json()
    }
}

pub(crate) fn collect_free_parameters<'a>(
    nodes: impl IntoIterator<Item = &'a Node>,
) -> FnvHashSet<ParameterTerm> {
    nodes
        .into_iter()
        .fold(FnvHashSet::default(), |mut combined, node| {
            combined.extend(node.free_parameters());
            combined
        })
}

pub(crate) fn substitute_nodes(
    nodes: &[Node],
    transform: &mut impl FnMut(&Node) -> Option<Node>,
) -> Option<Vec<Node>> {
    let substituted = nodes
        .iter()
        .map(|node| node.substitute(transform))
        .collect::<Vec<_>>();
    if substituted.iter().all(Option::is_none) {
        None
    } else {
        Some(
            substituted
                .into_iter()
                .zip(nodes.iter())
                .map(|(substituted, node)| substituted.unwrap_or_else(|| node.clone()))
                .collect(),
        )
    }
}

pub(crate) fn format_node_list(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(|node| format!("{}", node))
        .collect::<Vec<_>>()
        .join(" ")
}
