// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineLookupPolicy {
    /// Leave inline lookups as context method calls for the executor to resolve
    Defer,
    /// Rewrite inline lookups with a constant identifier into bound resource parameters
    Bind,
}
impl Default for InlineLookupPolicy {
    fn default() -> Self {
        Self::Defer
    }
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub inline_lookups: InlineLookupPolicy,
    pub validate_free_parameters: bool,
}
impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            inline_lookups: InlineLookupPolicy::default(),
            validate_free_parameters: true,
        }
    }
}
impl ClientConfig {
    pub fn from_json(value: JsonValue) -> Result<Self, String> {
        serde_json::from_value(value)
            .map_err(|err| format!("Invalid client configuration: {}", err))
    }
    pub fn with_inline_lookups(self, inline_lookups: InlineLookupPolicy) -> Self {
        Self {
            inline_lookups,
            ..self
        }
    }
    pub fn with_validation(self, validate_free_parameters: bool) -> Self {
        Self {
            validate_free_parameters,
            ..self
        }
    }
}
