// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{hash::Hash, sync::Arc};

use serde_json::Value as JsonValue;

use crate::{hash::FnvHashSet, serialize::SerializeJson, types::Type, value::Value};

use super::{GraphNode, Node, ParameterTerm};

pub type CaptureId = u64;

/// Live storage for a variable referenced from within a composed expression.
pub trait CaptureSource: Send + Sync {
    fn snapshot(&self) -> Value;
}

#[derive(Clone)]
pub struct CapturedTerm {
    id: CaptureId,
    value_type: Type,
    source: Arc<dyn CaptureSource>,
}
impl CapturedTerm {
    pub fn new(id: CaptureId, value_type: Type, source: Arc<dyn CaptureSource>) -> Self {
        Self {
            id,
            value_type,
            source,
        }
    }
    pub fn id(&self) -> CaptureId {
        self.id
    }
    pub fn value_type(&self) -> &Type {
        &self.value_type
    }
    pub fn snapshot(&self) -> Value {
        self.source.snapshot()
    }
}
impl Hash for CapturedTerm {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        state.write_u64(self.id);
        self.value_type.hash(state);
    }
}
impl PartialEq for CapturedTerm {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.value_type == other.value_type
    }
}
impl Eq for CapturedTerm {}
impl GraphNode for CapturedTerm {
    fn free_parameters(&self) -> FnvHashSet<ParameterTerm> {
        FnvHashSet::default()
    }
    fn children(&self) -> Vec<&Node> {
        Vec::new()
    }
    fn has_captures(&self) -> bool {
        true
    }
    fn node_type(&self) -> Type {
        self.value_type.clone()
    }
}
impl std::fmt::Display for CapturedTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<capture:{}>", self.id)
    }
}
impl std::fmt::Debug for CapturedTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<capture:{}:{}>", self.id, self.value_type)
    }
}
impl SerializeJson for CapturedTerm {
    fn to_json(&self) -> Result<JsonValue, String> {
        Err(format!(
            "Unable to serialize unmaterialized captured variable: {}",
            self
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Value);
    impl CaptureSource for Fixed {
        fn snapshot(&self) -> Value {
            self.0.clone()
        }
    }

    #[test]
    fn captured_terms_compare_by_identity_and_type() {
        let source: Arc<dyn CaptureSource> = Arc::new(Fixed(Value::Int(3)));
        let first = Node::captured(CapturedTerm::new(1, Type::Int, Arc::clone(&source)));
        let second = Node::captured(CapturedTerm::new(1, Type::Int, Arc::new(Fixed(Value::Int(4)))));
        let other = Node::captured(CapturedTerm::new(2, Type::Int, source));
        assert_eq!(first, second);
        assert_ne!(first, other);
        assert!(first.has_captures());
        assert!(first.to_json().is_err());
    }

    #[test]
    fn capture_flags_propagate() {
        let source: Arc<dyn CaptureSource> = Arc::new(Fixed(Value::Int(3)));
        let node = Node::binary(
            crate::node::BinaryOperator::Add,
            Node::constant(Value::Int(1), Type::Int),
            Node::captured(CapturedTerm::new(1, Type::Int, source)),
        );
        assert!(node.has_captures());
        assert!(!Node::constant(Value::Int(1), Type::Int).has_captures());
    }
}
