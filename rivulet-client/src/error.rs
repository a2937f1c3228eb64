// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{Type, UriError};

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum ReactiveError {
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
    MalformedExpression {
        parameter: String,
        parameter_type: Type,
    },
    ArityMismatch {
        expected: usize,
        received: usize,
    },
}
impl ReactiveError {
    pub fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }
    pub fn missing_argument(argument: &'static str) -> Self {
        Self::invalid_argument(argument, "Missing required argument")
    }
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
impl std::error::Error for ReactiveError {}
impl std::fmt::Display for ReactiveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { argument, reason } => {
                write!(f, "Invalid argument '{}': {}", argument, reason)
            }
            Self::MalformedExpression {
                parameter,
                parameter_type,
            } => write!(
                f,
                "Malformed expression: unbound parameter {} of type {}",
                parameter, parameter_type
            ),
            Self::ArityMismatch { expected, received } => write!(
                f,
                "Expected {} arguments, received {}",
                expected, received
            ),
        }
    }
}
impl From<UriError> for ReactiveError {
    fn from(err: UriError) -> Self {
        Self::invalid_argument("uri", format!("{}", err))
    }
}
