// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{hash::Hash, sync::Arc};

use serde_json::Value as JsonValue;

use crate::{serialize::SerializeJson, types::Type, uri::Uri};

pub type IntValue = i64;
pub type FloatValue = f64;

#[derive(Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Int(IntValue),
    Float(FloatValue),
    String(Arc<str>),
    Uri(Uri),
}
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Boolean(left), Self::Boolean(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left.to_bits() == right.to_bits(),
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Uri(left), Self::Uri(right)) => left == right,
            _ => false,
        }
    }
}
impl Eq for Value {}
impl Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Null => state.write_u8(0),
            Self::Boolean(value) => {
                state.write_u8(1);
                value.hash(state);
            }
            Self::Int(value) => {
                state.write_u8(2);
                value.hash(state);
            }
            Self::Float(value) => {
                state.write_u8(3);
                state.write(&value.to_be_bytes())
            }
            Self::String(value) => {
                state.write_u8(4);
                value.hash(state);
            }
            Self::Uri(value) => {
                state.write_u8(5);
                value.hash(state);
            }
        }
    }
}
impl Value {
    pub fn string(value: impl Into<Arc<str>>) -> Self {
        Self::String(value.into())
    }
    pub fn default_type(&self) -> Type {
        match self {
            Self::Null => Type::Unit,
            Self::Boolean(_) => Type::Boolean,
            Self::Int(_) => Type::Int,
            Self::Float(_) => Type::Float,
            Self::String(_) => Type::String,
            Self::Uri(_) => Type::Uri,
        }
    }
    pub fn match_boolean(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }
    pub fn match_int(&self) -> Option<IntValue> {
        match self {
            Self::Int(value) => Some(*value),
            _ => None,
        }
    }
    pub fn match_float(&self) -> Option<FloatValue> {
        match self {
            Self::Float(value) => Some(*value),
            _ => None,
        }
    }
    pub fn match_string(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }
    pub fn match_uri(&self) -> Option<&Uri> {
        match self {
            Self::Uri(value) => Some(value),
            _ => None,
        }
    }
}
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Boolean(value) => write!(f, "{}", value),
            Self::Int(value) => write!(f, "{:?}", value),
            Self::Float(value) => match as_integer(*value) {
                Some(value) => write!(f, "{}.0", value),
                None => write!(f, "{:?}", value),
            },
            Self::String(value) => write!(f, "{:?}", value),
            Self::Uri(value) => write!(f, "{:?}", value),
        }
    }
}
impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}
impl SerializeJson for Value {
    fn to_json(&self) -> Result<JsonValue, String> {
        match self {
            Self::Null => Ok(JsonValue::Null),
            Self::Boolean(value) => Ok(JsonValue::Bool(*value)),
            Self::Int(value) => Ok(JsonValue::Number((*value).into())),
            Self::Float(value) => match serde_json::Number::from_f64(*value) {
                Some(number) => Ok(JsonValue::Number(number)),
                None => Err(format!(
                    "Unable to serialize float as it is NaN or infinite: {}",
                    self
                )),
            },
            Self::String(value) => Ok(JsonValue::String(String::from(value.as_ref()))),
            Self::Uri(value) => Ok(JsonValue::String(String::from(value.as_str()))),
        }
    }
}

fn as_integer(value: FloatValue) -> Option<IntValue> {
    let int_value = value as IntValue;
    if value == int_value as FloatValue {
        Some(int_value)
    } else {
        None
    }
}
