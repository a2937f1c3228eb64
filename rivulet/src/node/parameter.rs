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

use super::{GraphNode, Node};

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct ParameterTerm {
    parameter_type: Type,
    name: Arc<str>,
}
impl ParameterTerm {
    pub fn new(parameter_type: Type, name: impl Into<Arc<str>>) -> Self {
        Self {
            parameter_type,
            name: name.into(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn parameter_type(&self) -> &Type {
        &self.parameter_type
    }
}
impl GraphNode for ParameterTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        once(self.clone()).collect()
    }
    fn children(&self) -> Vec<&Node> {
        Vec::new()
    }
    fn has_captures(&self) -> bool {
        false
    }
    fn node_type(&self) -> Type {
        self.parameter_type.clone()
    }
}
impl std::fmt::Display for ParameterTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
impl SerializeJson for ParameterTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("parameter")),
            ("type", self.parameter_type.to_json()?),
            ("name", JsonValue::from(self.name.as_ref())),
        ]))
    }
}
