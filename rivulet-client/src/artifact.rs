// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::marker::PhantomData;

use rivulet::{Node, Type};

use crate::{
    lambda, IntoNode, ObservableHandle, ObserverHandle, Parameters, Reactive,
    StreamFactoryHandle, SubscriptionFactoryHandle,
};

macro_rules! impl_artifact_traits {
    ($target:ident $(<$($T:ident),*>)?) => {
        impl$(<$($T),*>)? $target$(<$($T),*>)? {
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
        impl$(<$($T),*>)? IntoNode for $target$(<$($T),*>)? {
            fn into_node(self) -> Node {
                self.node
            }
        }
        impl$(<$($T),*>)? Clone for $target$(<$($T),*>)? {
            fn clone(&self) -> Self {
                Self::from_node(self.node.clone())
            }
        }
        impl$(<$($T),*>)? PartialEq for $target$(<$($T),*>)? {
            fn eq(&self, other: &Self) -> bool {
                self.node == other.node
            }
        }
        impl$(<$($T),*>)? Eq for $target$(<$($T),*>)? {}
        impl$(<$($T),*>)? std::fmt::Display for $target$(<$($T),*>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.node, f)
            }
        }
        impl$(<$($T),*>)? std::fmt::Debug for $target$(<$($T),*>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($target), self.node)
            }
        }
    };
}

/// Quoted sequence of values of type `T`
pub struct Observable<T> {
    node: Node,
    _type: PhantomData<fn() -> T>,
}
impl_artifact_traits!(Observable<T>);
impl<T: Reactive> Reactive for Observable<T> {
    fn reactive_type() -> Type {
        Type::observable(T::reactive_type())
    }
}

/// Quoted consumer of values of type `T`
pub struct Observer<T> {
    node: Node,
    _type: PhantomData<fn() -> T>,
}
impl_artifact_traits!(Observer<T>);
impl<T: Reactive> Reactive for Observer<T> {
    fn reactive_type() -> Type {
        Type::observer(T::reactive_type())
    }
}

pub struct Stream<TIn, TOut> {
    node: Node,
    _type: PhantomData<fn() -> (TIn, TOut)>,
}
impl_artifact_traits!(Stream<TIn, TOut>);
impl<TIn: Reactive, TOut: Reactive> Reactive for Stream<TIn, TOut> {
    fn reactive_type() -> Type {
        Type::stream(TIn::reactive_type(), TOut::reactive_type())
    }
}
impl<TIn, TOut> Stream<TIn, TOut> {
    pub fn as_observable(&self) -> Observable<TOut> {
        Observable::from_node(self.node.clone())
    }
    pub fn as_observer(&self) -> Observer<TIn> {
        Observer::from_node(self.node.clone())
    }
}

pub struct Subscription {
    node: Node,
    _type: PhantomData<()>,
}
impl_artifact_traits!(Subscription);
impl Reactive for Subscription {
    fn reactive_type() -> Type {
        Type::Subscription
    }
}

/// Parameterized artifact definition, quoted as a lambda over its parameter list
pub struct Definition<P, A> {
    node: Node,
    _type: PhantomData<fn() -> (P, A)>,
}
impl<P: Parameters, A: IntoNode> Definition<P, A> {
    pub fn new(body: impl FnOnce(P::Exprs) -> A) -> Self {
        Self::from_node(lambda::<P, A>(body))
    }
}
impl_artifact_traits!(Definition<P, A>);

pub trait ObservableDefinition {
    fn definition_node(&self) -> &Node;
}
pub trait ObserverDefinition {
    fn definition_node(&self) -> &Node;
}
pub trait StreamFactoryDefinition {
    fn definition_node(&self) -> &Node;
}
pub trait SubscriptionFactoryDefinition {
    fn definition_node(&self) -> &Node;
}

macro_rules! impl_definition {
    ($definition:ident for $target:ident<$($T:ident),*>) => {
        impl<$($T),*> $definition for $target<$($T),*> {
            fn definition_node(&self) -> &Node {
                self.node()
            }
        }
    };
}

impl_definition!(ObservableDefinition for Observable<T>);
impl<P, R> ObservableDefinition for Definition<P, Observable<R>> {
    fn definition_node(&self) -> &Node {
        self.node()
    }
}
impl_definition!(ObservableDefinition for ObservableHandle<P, R>);
impl_definition!(ObserverDefinition for Observer<T>);
impl<P, T> ObserverDefinition for Definition<P, Observer<T>> {
    fn definition_node(&self) -> &Node {
        self.node()
    }
}
impl_definition!(ObserverDefinition for ObserverHandle<P, T>);
impl<P, TIn, TOut> StreamFactoryDefinition for Definition<P, Stream<TIn, TOut>> {
    fn definition_node(&self) -> &Node {
        self.node()
    }
}
impl_definition!(StreamFactoryDefinition for StreamFactoryHandle<P, TIn, TOut>);
impl<P> SubscriptionFactoryDefinition for Definition<P, Subscription> {
    fn definition_node(&self) -> &Node {
        self.node()
    }
}
impl_definition!(SubscriptionFactoryDefinition for SubscriptionFactoryHandle<P>);

#[cfg(test)]
mod tests {
    use rivulet::GraphNode;

    use super::*;
    use crate::Expr;

    #[test]
    fn artifact_types() {
        assert_eq!(Observable::<i32>::reactive_type(), Type::observable(Type::Int));
        assert_eq!(
            Stream::<String, bool>::reactive_type(),
            Type::stream(Type::String, Type::Boolean)
        );
        assert_eq!(Subscription::reactive_type(), Type::Subscription);
    }

    #[test]
    fn streams_expose_both_directions() {
        let stream = Stream::<String, i32>::from_node(Node::parameter(
            Type::stream(Type::String, Type::Int),
            "rx://stream/s",
        ));
        assert_eq!(stream.as_observable().node(), stream.node());
        assert_eq!(stream.as_observer().node(), stream.node());
    }

    #[test]
    fn definitions_quote_lambdas() {
        let definition = Definition::<(i32, i32), Expr<i32>>::new(|(x, y)| x * y);
        let lambda = definition.node().match_lambda().unwrap();
        assert_eq!(lambda.num_args(), 2);
        assert!(definition.node().free_parameters().is_empty());
        assert_eq!(
            definition.node().node_type(),
            Type::function([Type::Int, Type::Int], Type::Int)
        );
    }
}
