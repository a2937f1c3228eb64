// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::{cell::Cell, marker::PhantomData};

use rivulet::{
    node::{BinaryOperator, ParameterTerm},
    Node, Term, Type, Uri, Value,
};
use tracing::trace;

use crate::Parameters;

/// Rust types with a counterpart in the reactive type system
pub trait Reactive {
    fn reactive_type() -> Type;
}

/// Reactive types whose values can be embedded as constants
pub trait Primitive: Reactive {
    fn into_value(self) -> Value;
}

pub trait Numeric: Primitive {}

macro_rules! impl_primitive {
    ($target:ty, $type:expr, |$value:ident| $into_value:expr) => {
        impl Reactive for $target {
            fn reactive_type() -> Type {
                $type
            }
        }
        impl Primitive for $target {
            fn into_value(self) -> Value {
                let $value = self;
                $into_value
            }
        }
    };
}

impl_primitive!((), Type::Unit, |_value| Value::Null);
impl_primitive!(bool, Type::Boolean, |value| Value::Boolean(value));
impl_primitive!(i32, Type::Int, |value| Value::Int(i64::from(value)));
impl_primitive!(i64, Type::Int, |value| Value::Int(value));
impl_primitive!(f64, Type::Float, |value| Value::Float(value));
impl_primitive!(String, Type::String, |value| Value::string(value));
impl_primitive!(Uri, Type::Uri, |value| Value::Uri(value));

impl Numeric for i32 {}
impl Numeric for i64 {}
impl Numeric for f64 {}

/// Anything that quotes down to an expression tree node
pub trait IntoNode {
    fn into_node(self) -> Node;
}

/// Typed quoted expression
pub struct Expr<T> {
    node: Node,
    _type: PhantomData<fn() -> T>,
}
impl<T> Expr<T> {
    pub fn from_node(node: Node) -> Self {
        Self {
            node,
            _type: PhantomData,
        }
    }
    pub fn node(&self) -> &Node {
        &self.node
    }
}
impl<T: Primitive> Expr<T> {
    pub fn constant(value: T) -> Self {
        Self::from_node(Node::constant(value.into_value(), T::reactive_type()))
    }
}
impl<T: Reactive> Expr<T> {
    pub fn property<R: Reactive>(&self, member: &str) -> Expr<R> {
        Expr::from_node(Node::property(
            self.node.clone(),
            member,
            R::reactive_type(),
        ))
    }
    pub fn equals(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::Equal, other)
    }
    pub fn not_equals(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::NotEqual, other)
    }
    pub fn lt(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::LessThan, other)
    }
    pub fn le(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::LessThanOrEqual, other)
    }
    pub fn gt(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::GreaterThan, other)
    }
    pub fn ge(&self, other: impl IntoExpr<T>) -> Expr<bool> {
        self.compare(BinaryOperator::GreaterThanOrEqual, other)
    }
    fn compare(&self, operator: BinaryOperator, other: impl IntoExpr<T>) -> Expr<bool> {
        Expr::from_node(Node::binary(
            operator,
            self.node.clone(),
            other.into_expr().into_node(),
        ))
    }
}
impl Expr<bool> {
    pub fn and(&self, other: impl IntoExpr<bool>) -> Expr<bool> {
        self.compare(BinaryOperator::And, other)
    }
    pub fn or(&self, other: impl IntoExpr<bool>) -> Expr<bool> {
        self.compare(BinaryOperator::Or, other)
    }
}
impl Expr<String> {
    pub fn len(&self) -> Expr<i64> {
        self.property("length")
    }
}
impl<T> IntoNode for Expr<T> {
    fn into_node(self) -> Node {
        self.node
    }
}
impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self::from_node(self.node.clone())
    }
}
impl<T> PartialEq for Expr<T> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}
impl<T> Eq for Expr<T> {}
impl<T> std::fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.node, f)
    }
}
impl<T> std::fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.node, f)
    }
}

macro_rules! impl_arithmetic {
    ($trait:ident, $method:ident, $operator:expr) => {
        impl<T: Numeric, R: IntoExpr<T>> std::ops::$trait<R> for Expr<T> {
            type Output = Expr<T>;
            fn $method(self, rhs: R) -> Self::Output {
                Expr::from_node(Node::binary($operator, self.node, rhs.into_expr().into_node()))
            }
        }
    };
}

impl_arithmetic!(Add, add, BinaryOperator::Add);
impl_arithmetic!(Sub, sub, BinaryOperator::Subtract);
impl_arithmetic!(Mul, mul, BinaryOperator::Multiply);
impl_arithmetic!(Div, div, BinaryOperator::Divide);
impl_arithmetic!(Rem, rem, BinaryOperator::Remainder);

pub trait IntoExpr<T> {
    fn into_expr(self) -> Expr<T>;
}
impl<T: Primitive> IntoExpr<T> for T {
    fn into_expr(self) -> Expr<T> {
        Expr::constant(self)
    }
}
impl<T> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self
    }
}
impl<'a, T> IntoExpr<T> for &'a Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self.clone()
    }
}
impl<'a> IntoExpr<String> for &'a str {
    fn into_expr(self) -> Expr<String> {
        Expr::from_node(Node::constant(Value::string(self), Type::String))
    }
}

thread_local! {
    static LAMBDA_DEPTH: Cell<usize> = Cell::new(0);
}

struct LambdaScope {
    depth: usize,
}
impl LambdaScope {
    fn enter() -> Self {
        let depth = LAMBDA_DEPTH.with(|current| {
            let depth = current.get();
            current.set(depth + 1);
            depth
        });
        Self { depth }
    }
}
impl Drop for LambdaScope {
    fn drop(&mut self) {
        LAMBDA_DEPTH.with(|current| current.set(self.depth));
    }
}

pub(crate) fn lambda_parameter(parameter_type: Type, depth: usize, index: usize) -> ParameterTerm {
    ParameterTerm::new(parameter_type, format!("arg{}_{}", depth, index))
}

pub(crate) fn parameter_expr<T>(parameter: &ParameterTerm) -> Expr<T> {
    Expr::from_node(Node::new(Term::Parameter(parameter.clone())))
}

/// Quotes a Rust closure into a lambda node by invoking it once with parameter expressions.
pub fn lambda<P: Parameters, B: IntoNode>(body: impl FnOnce(P::Exprs) -> B) -> Node {
    let scope = LambdaScope::enter();
    trace!(lambda_depth = scope.depth, num_args = P::ARITY);
    let (parameters, args) = P::bind(scope.depth);
    let body = body(args).into_node();
    drop(scope);
    Node::lambda(parameters, body)
}
