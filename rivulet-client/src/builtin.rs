// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{Node, Type, Uri};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

pub const RESERVED_NAMESPACE: &str = "rx://builtin/";
pub const CONTEXT_PARAMETER: &str = "rx://builtin/context";

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, EnumIter)]
pub enum BuiltinOperator {
    Filter,
    Project,
    FlatMap,
    Subscribe,
}
impl BuiltinOperator {
    pub fn entries() -> impl Iterator<Item = Self> {
        Self::iter()
    }
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Filter => "rx://builtin/filter",
            Self::Project => "rx://builtin/project",
            Self::FlatMap => "rx://builtin/flat-map",
            Self::Subscribe => "rx://builtin/subscribe",
        }
    }
    pub fn parse(identifier: &str) -> Option<Self> {
        Self::entries().find(|operator| operator.identifier() == identifier)
    }
    pub fn parameter(&self, operator_type: Type) -> Node {
        Node::parameter(operator_type, self.identifier())
    }
}
impl std::fmt::Display for BuiltinOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

pub fn is_reserved(uri: &Uri) -> bool {
    uri.starts_with(RESERVED_NAMESPACE)
}

/// Identifiers that the executor always resolves on its own
pub fn is_builtin_identifier(identifier: &str) -> bool {
    identifier == CONTEXT_PARAMETER || BuiltinOperator::parse(identifier).is_some()
}

pub fn context_parameter() -> Node {
    Node::parameter(Type::Context, CONTEXT_PARAMETER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_live_in_the_reserved_namespace() {
        for operator in BuiltinOperator::entries() {
            let uri = Uri::parse(operator.identifier()).unwrap();
            assert!(is_reserved(&uri));
            assert_eq!(BuiltinOperator::parse(operator.identifier()), Some(operator));
            assert!(is_builtin_identifier(operator.identifier()));
        }
        assert_eq!(BuiltinOperator::entries().count(), 4);
    }

    #[test]
    fn user_identifiers_are_not_reserved() {
        assert!(!is_reserved(&Uri::parse("rx://observable/xs").unwrap()));
        assert!(!is_builtin_identifier("rx://builtin/unknown"));
        assert!(is_reserved(&Uri::parse("rx://builtin/unknown").unwrap()));
        assert!(is_builtin_identifier(CONTEXT_PARAMETER));
    }
}
