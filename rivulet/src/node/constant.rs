// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use serde_json::Value as JsonValue;

use crate::{
    hash::FnvHashSet,
    serialize::{json_object, SerializeJson},
    types::Type,
    value::Value,
};

use super::{GraphNode, Node, ParameterTerm};

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct ConstantTerm {
    value: Value,
    value_type: Type,
}
impl ConstantTerm {
    pub fn new(value: Value, value_type: Type) -> Self {
        Self { value, value_type }
    }
    pub fn value(&self) -> &Value {
        &self.value
    }
    pub fn value_type(&self) -> &Type {
        &self.value_type
    }
}
impl GraphNode for ConstantTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        FnvHashSet::default()
    }
    fn children(&self) -> Vec<&Node> {
        Vec::new()
    }
    fn has_captures(&self) -> bool {
        false
    }
    fn node_type(&self) -> Type {
        self.value_type.clone()
    }
}
impl std::fmt::Display for ConstantTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.value, f)
    }
}
impl SerializeJson for ConstantTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(json_object([
            ("node", JsonValue::from("constant")),
            ("type", self.value_type.to_json()?),
            ("value", self.value.to_json()?),
        ]))
    }
}
