// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uri(Arc<str>);
impl Uri {
    pub fn parse(value: &str) -> Result<Self, UriError> {
        if value.is_empty() {
            return Err(UriError::Empty);
        }
        match value
            .chars()
            .find(|char| char.is_whitespace() || char.is_control())
        {
            Some(char) => Err(UriError::InvalidCharacter(String::from(value), char)),
            None => Ok(Self(Arc::from(value))),
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}
impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
impl TryFrom<String> for Uri {
    type Error = UriError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}
impl From<Uri> for String {
    fn from(value: Uri) -> Self {
        String::from(value.as_str())
    }
}
impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl fmt::Debug for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub enum UriError {
    Empty,
    InvalidCharacter(String, char),
}
impl std::error::Error for UriError {}
impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Resource identifier must not be empty"),
            Self::InvalidCharacter(value, char) => write!(
                f,
                "Invalid character {:?} in resource identifier {:?}",
                char, value
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_and_absolute_identifiers() {
        assert_eq!(Uri::parse("xs").map(|uri| uri.to_string()), Ok(String::from("xs")));
        assert_eq!(
            Uri::parse("rx://observable/foo").map(|uri| uri.to_string()),
            Ok(String::from("rx://observable/foo"))
        );
    }

    #[test]
    fn rejects_empty_identifiers() {
        assert_eq!(Uri::parse(""), Err(UriError::Empty));
    }

    #[test]
    fn rejects_whitespace() {
        assert_eq!(
            Uri::parse("foo bar"),
            Err(UriError::InvalidCharacter(String::from("foo bar"), ' '))
        );
    }

    #[test]
    fn serializes_as_plain_string() {
        let uri = Uri::parse("rx://foo").unwrap();
        let json = serde_json::to_value(&uri).unwrap();
        assert_eq!(json, serde_json::Value::String(String::from("rx://foo")));
        assert_eq!(serde_json::from_value::<Uri>(json).unwrap(), uri);
        assert!(serde_json::from_value::<Uri>(serde_json::Value::String(String::new())).is_err());
    }
}
