// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::fmt;

use serde_json::Value as JsonValue;

use crate::serialize::SerializeJson;

#[derive(Hash, Eq, PartialEq, Clone)]
pub enum Type {
    Unit,
    Boolean,
    Int,
    Float,
    String,
    Uri,
    Context,
    Subscription,
    /// Statically unknown type, e.g. the result of invoking a non-applicable target
    Opaque,
    Observable(Box<Type>),
    Observer(Box<Type>),
    Stream(Box<Type>, Box<Type>),
    Function(Vec<Type>, Box<Type>),
    StreamFactory(Vec<Type>, Box<Type>, Box<Type>),
    SubscriptionFactory(Vec<Type>),
}
impl Type {
    pub fn observable(element: Type) -> Self {
        Self::Observable(Box::new(element))
    }
    pub fn observer(element: Type) -> Self {
        Self::Observer(Box::new(element))
    }
    pub fn stream(input: Type, output: Type) -> Self {
        Self::Stream(Box::new(input), Box::new(output))
    }
    pub fn function(parameters: impl IntoIterator<Item = Type>, result: Type) -> Self {
        Self::Function(parameters.into_iter().collect(), Box::new(result))
    }
    pub fn stream_factory(
        parameters: impl IntoIterator<Item = Type>,
        input: Type,
        output: Type,
    ) -> Self {
        Self::StreamFactory(
            parameters.into_iter().collect(),
            Box::new(input),
            Box::new(output),
        )
    }
    pub fn subscription_factory(parameters: impl IntoIterator<Item = Type>) -> Self {
        Self::SubscriptionFactory(parameters.into_iter().collect())
    }
    pub fn is_applicable(&self) -> bool {
        self.parameters().is_some()
    }
    pub fn parameters(&self) -> Option<&[Type]> {
        match self {
            Self::Function(parameters, _) => Some(parameters),
            Self::StreamFactory(parameters, _, _) => Some(parameters),
            Self::SubscriptionFactory(parameters) => Some(parameters),
            _ => None,
        }
    }
    pub fn application_result(&self) -> Option<Type> {
        match self {
            Self::Function(_, result) => Some(result.as_ref().clone()),
            Self::StreamFactory(_, input, output) => {
                Some(Self::Stream(input.clone(), output.clone()))
            }
            Self::SubscriptionFactory(_) => Some(Self::Subscription),
            _ => None,
        }
    }
    pub fn match_observable(&self) -> Option<&Type> {
        match self {
            Self::Observable(element) => Some(element),
            Self::Stream(_, output) => Some(output),
            _ => None,
        }
    }
    pub fn match_observer(&self) -> Option<&Type> {
        match self {
            Self::Observer(element) => Some(element),
            Self::Stream(input, _) => Some(input),
            _ => None,
        }
    }
}
impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Boolean => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Uri => write!(f, "uri"),
            Self::Context => write!(f, "context"),
            Self::Subscription => write!(f, "subscription"),
            Self::Opaque => write!(f, "opaque"),
            Self::Observable(element) => write!(f, "observable<{}>", element),
            Self::Observer(element) => write!(f, "observer<{}>", element),
            Self::Stream(input, output) => write!(f, "stream<{}, {}>", input, output),
            Self::Function(parameters, result) => {
                write!(f, "fn({}) -> {}", format_type_list(parameters), result)
            }
            Self::StreamFactory(parameters, input, output) => write!(
                f,
                "stream_factory({}) -> stream<{}, {}>",
                format_type_list(parameters),
                input,
                output
            ),
            Self::SubscriptionFactory(parameters) => {
                write!(f, "subscription_factory({})", format_type_list(parameters))
            }
        }
    }
}
impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
impl SerializeJson for Type {
    fn to_json(&self) -> Result<JsonValue, String> {
        Ok(JsonValue::String(format!("{}", self)))
    }
}

fn format_type_list(types: &[Type]) -> String {
    types
        .iter()
        .map(|value| format!("{}", value))
        .collect::<Vec<_>>()
        .join(", ")
}
