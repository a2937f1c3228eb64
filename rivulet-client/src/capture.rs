// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

use nohash_hasher::IntMap;
use rivulet::{
    node::{CaptureId, CaptureSource, CapturedTerm},
    GraphNode, Node, Rewritable, Value,
};
use tracing::trace;

use crate::{Expr, IntoExpr, Primitive};

static NEXT_CAPTURE_ID: AtomicU64 = AtomicU64::new(1);

pub trait Capturable: Primitive + Clone + Send + Sync + 'static {}
impl<T: Primitive + Clone + Send + Sync + 'static> Capturable for T {}

struct VariableCell<T> {
    id: CaptureId,
    value: RwLock<T>,
}
impl<T: Capturable> CaptureSource for VariableCell<T> {
    fn snapshot(&self) -> Value {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .into_value()
    }
}

/// Mutable local whose value is read when a composed expression is dispatched,
/// rather than when the expression is composed
pub struct Variable<T> {
    cell: Arc<VariableCell<T>>,
}
impl<T: Capturable> Variable<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(VariableCell {
                id: NEXT_CAPTURE_ID.fetch_add(1, Ordering::Relaxed),
                value: RwLock::new(value),
            }),
        }
    }
    pub fn id(&self) -> CaptureId {
        self.cell.id
    }
    pub fn get(&self) -> T {
        self.cell
            .value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    pub fn set(&self, value: T) {
        *self
            .cell
            .value
            .write()
            .unwrap_or_else(PoisonError::into_inner) = value;
    }
    pub fn expr(&self) -> Expr<T> {
        let source: Arc<dyn CaptureSource> = self.cell.clone();
        Expr::from_node(Node::captured(CapturedTerm::new(
            self.cell.id,
            T::reactive_type(),
            source,
        )))
    }
}
impl<T> Clone for Variable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}
impl<T: Capturable + std::fmt::Debug> std::fmt::Debug for Variable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Variable<{}>({:?})", self.cell.id, self.get())
    }
}
impl<'a, T: Capturable> IntoExpr<T> for &'a Variable<T> {
    fn into_expr(self) -> Expr<T> {
        self.expr()
    }
}

/// Replaces every captured variable with a constant holding its current value.
///
/// Each distinct variable is read exactly once per call; nothing is retained between calls.
pub fn materialize(node: &Node) -> Node {
    if !node.has_captures() {
        return node.clone();
    }
    let mut snapshots = IntMap::<CaptureId, Value>::default();
    let result = node.substitute(&mut |node: &Node| {
        let term = node.match_captured()?;
        let value = snapshots
            .entry(term.id())
            .or_insert_with(|| {
                trace!(capture_snapshot = term.id());
                term.snapshot()
            })
            .clone();
        Some(Node::constant(value, term.value_type().clone()))
    });
    result.unwrap_or_else(|| node.clone())
}
