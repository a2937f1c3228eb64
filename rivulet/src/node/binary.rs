// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use serde_json::Value as JsonValue;

use crate::{
    hash::FnvHashSet,
    serialize::{json_object, SerializeJson},
    types::Type,
};

use super::{collect_free_parameters, GraphNode, Node, ParameterTerm, Rewritable, Term};

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    And,
    Or,
}
impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Remainder => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
    pub fn is_predicate(&self) -> bool {
        match self {
            Self::Add | Self::Subtract | Self::Multiply | Self::Divide | Self::Remainder => false,
            _ => true,
        }
    }
}
impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct BinaryTerm {
    operator: BinaryOperator,
    left: Node,
    right: Node,
}
impl BinaryTerm {
    pub fn new(operator: BinaryOperator, left: Node, right: Node) -> Self {
        Self {
            operator,
            left,
            right,
        }
    }
    pub fn operator(&self) -> BinaryOperator {
        self.operator
    }
    pub fn left(&self) -> &Node {
        &self.left
    }
    pub fn right(&self) -> &Node {
        &self.right
    }
}
impl GraphNode for BinaryTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        collect_free_parameters([&self.left, &self.right])
    }
    fn children(&self) -> Vec<&Node> {
        vec![&self.left, &self.right]
    }
    fn has_captures(&self) -> bool {
        self.left.has_captures() || self.right.has_captures()
    }
    fn node_type(&self) -> Type {
        if self.operator.is_predicate() {
            Type::Boolean
        } else {
            self.left.node_type()
        }
    }
}
impl Rewritable for BinaryTerm {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        let left = self.left.substitute(transform);
        let right = self.right.substitute(transform);
        if left.is_none() && right.is_none() {
            return None;
        }
        Some(Node::new(Term::Binary(Self::new(
            self.operator,
            left.unwrap_or_else(|| self.left.clone()),
            right.unwrap_or_else(|| self.right.clone()),
        ))))
    }
}
impl std::fmt::Display for BinaryTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.operator, self.left, self.right)
    }
}
impl SerializeJson for BinaryTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("binary")),
            ("operator", JsonValue::from(self.operator.symbol())),
            ("left", self.left.to_json()?),
            ("right", self.right.to_json()?),
        ]))
    }
}
