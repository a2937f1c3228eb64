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

use super::{GraphNode, Node, ParameterTerm, Rewritable, Term};

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct LambdaTerm {
    parameters: Vec<ParameterTerm>,
    body: Node,
}
impl LambdaTerm {
    pub fn new(parameters: Vec<ParameterTerm>, body: Node) -> Self {
        Self { parameters, body }
    }
    pub fn parameters(&self) -> &[ParameterTerm] {
        &self.parameters
    }
    pub fn body(&self) -> &Node {
        &self.body
    }
    pub fn num_args(&self) -> usize {
        self.parameters.len()
    }
}
impl GraphNode for LambdaTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        let mut free_parameters = self.body.free_parameters();
        for parameter in self.parameters.iter() {
            free_parameters.remove(parameter);
        }
        free_parameters
    }
    fn children(&self) -> Vec<&Node> {
        once(&self.body).collect()
    }
    fn has_captures(&self) -> bool {
        self.body.has_captures()
    }
    fn node_type(&self) -> Type {
        Type::function(
            self.parameters
                .iter()
                .map(|parameter| parameter.parameter_type().clone()),
            self.body.node_type(),
        )
    }
}
impl Rewritable for LambdaTerm {
    fn substitute(&self, transform: &mut impl FnMut(&Node) -> Option<Node>) -> Option<Node> {
        self.body.substitute(transform).map(|body| {
            Node::new(Term::Lambda(Self::new(self.parameters.clone(), body)))
        })
    }
}
impl std::fmt::Display for LambdaTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(fn ({}) {})",
            self.parameters
                .iter()
                .map(|parameter| format!("{}", parameter))
                .collect::<Vec<_>>()
                .join(" "),
            self.body
        )
    }
}
impl SerializeJson for LambdaTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("lambda")),
            (
                "parameters",
                self.parameters
                    .iter()
                    .map(|parameter| parameter.to_json())
                    .collect::<Result<Vec<_>, _>>()
                    .map(JsonValue::Array)?,
            ),
            ("body", self.body.to_json()?),
        ]))
    }
}
