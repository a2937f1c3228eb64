// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::marker::PhantomData;

use rivulet::{GraphNode, Node, Type, Uri};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::{
    builtin::{context_parameter, is_reserved},
    IntoArguments, Observable, Observer, Parameters, Reactive,
    ReactiveError, Stream, Subscription, MAX_ARITY,
};

pub const GET_OBSERVABLE: &str = "get_observable";
pub const GET_OBSERVER: &str = "get_observer";
pub const GET_STREAM_FACTORY: &str = "get_stream_factory";
pub const GET_SUBSCRIPTION_FACTORY: &str = "get_subscription_factory";

#[derive(Hash, Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Debug, Serialize, Deserialize, EnumIter)]
pub enum ResourceKind {
    Observable,
    Observer,
    StreamFactory,
    SubscriptionFactory,
    Stream,
    Subscription,
}
impl ResourceKind {
    pub fn entries() -> impl Iterator<Item = Self> {
        Self::iter()
    }
    /// Name of the context method used to look up resources of this kind inline
    pub fn lookup_method(&self) -> Option<&'static str> {
        match self {
            Self::Observable => Some(GET_OBSERVABLE),
            Self::Observer => Some(GET_OBSERVER),
            Self::StreamFactory => Some(GET_STREAM_FACTORY),
            Self::SubscriptionFactory => Some(GET_SUBSCRIPTION_FACTORY),
            Self::Stream | Self::Subscription => None,
        }
    }
    pub fn from_lookup_method(method: &str) -> Option<Self> {
        Self::entries().find(|kind| kind.lookup_method() == Some(method))
    }
    pub fn is_factory(&self) -> bool {
        matches!(self, Self::StreamFactory | Self::SubscriptionFactory)
    }
    fn num_element_types(&self) -> usize {
        match self {
            Self::Observable | Self::Observer => 1,
            Self::StreamFactory | Self::Stream => 2,
            Self::SubscriptionFactory | Self::Subscription => 0,
        }
    }
}
impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct Signature {
    kind: ResourceKind,
    parameters: Vec<Type>,
    element_types: Vec<Type>,
}
impl Signature {
    pub fn new(
        kind: ResourceKind,
        parameters: Vec<Type>,
        element_types: Vec<Type>,
    ) -> Result<Self, ReactiveError> {
        if kind.lookup_method().is_none() {
            return Err(ReactiveError::invalid_argument(
                "signature",
                format!("{} resources cannot be looked up", kind),
            ));
        }
        if parameters.len() > MAX_ARITY {
            return Err(ReactiveError::invalid_argument(
                "signature",
                format!(
                    "Expected at most {} parameters, received {}",
                    MAX_ARITY,
                    parameters.len()
                ),
            ));
        }
        if element_types.len() != kind.num_element_types() {
            return Err(ReactiveError::invalid_argument(
                "signature",
                format!(
                    "{} signatures require {} element types, received {}",
                    kind,
                    kind.num_element_types(),
                    element_types.len()
                ),
            ));
        }
        Ok(Self {
            kind,
            parameters,
            element_types,
        })
    }
    pub fn observable(parameters: Vec<Type>, element: Type) -> Self {
        Self {
            kind: ResourceKind::Observable,
            parameters,
            element_types: vec![element],
        }
    }
    pub fn observer(parameters: Vec<Type>, element: Type) -> Self {
        Self {
            kind: ResourceKind::Observer,
            parameters,
            element_types: vec![element],
        }
    }
    pub fn stream_factory(parameters: Vec<Type>, input: Type, output: Type) -> Self {
        Self {
            kind: ResourceKind::StreamFactory,
            parameters,
            element_types: vec![input, output],
        }
    }
    pub fn subscription_factory(parameters: Vec<Type>) -> Self {
        Self {
            kind: ResourceKind::SubscriptionFactory,
            parameters,
            element_types: Vec::new(),
        }
    }
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
    pub fn parameters(&self) -> &[Type] {
        &self.parameters
    }
    /// Type of the artifact produced by applying the resource
    pub fn artifact_type(&self) -> Type {
        match (self.kind, self.element_types.as_slice()) {
            (ResourceKind::Observable, [element]) => Type::observable(element.clone()),
            (ResourceKind::Observer, [element]) => Type::observer(element.clone()),
            (ResourceKind::StreamFactory, [input, output]) => {
                Type::stream(input.clone(), output.clone())
            }
            (ResourceKind::SubscriptionFactory, _) => Type::Subscription,
            _ => Type::Opaque,
        }
    }
    /// Type of the resource parameter itself
    pub fn resource_type(&self) -> Type {
        match (self.kind, self.element_types.as_slice()) {
            (ResourceKind::StreamFactory, [input, output]) => Type::stream_factory(
                self.parameters.iter().cloned(),
                input.clone(),
                output.clone(),
            ),
            (ResourceKind::SubscriptionFactory, _) => {
                Type::subscription_factory(self.parameters.iter().cloned())
            }
            _ if self.parameters.is_empty() => self.artifact_type(),
            _ => Type::function(self.parameters.iter().cloned(), self.artifact_type()),
        }
    }
    pub fn type_arguments(&self) -> Vec<Type> {
        self.parameters
            .iter()
            .chain(self.element_types.iter())
            .cloned()
            .collect()
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum ResourceReference {
    /// Resource parameter named by its identifier
    Bound(Node),
    /// Lookup method call against the current reactive context
    Inline(Node),
}
impl ResourceReference {
    pub fn node(&self) -> &Node {
        match self {
            Self::Bound(node) => node,
            Self::Inline(node) => node,
        }
    }
    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct UntypedHandle {
    uri: Option<Uri>,
    signature: Signature,
    reference: ResourceReference,
}
impl UntypedHandle {
    pub(crate) fn bound(uri: Uri, signature: Signature) -> Self {
        let node = Node::parameter(signature.resource_type(), uri.as_str());
        Self {
            uri: Some(uri),
            signature,
            reference: ResourceReference::Bound(node),
        }
    }
    pub(crate) fn inline(uri: Node, signature: Signature) -> Result<Self, ReactiveError> {
        let method = signature.kind().lookup_method().ok_or_else(|| {
            ReactiveError::invalid_argument(
                "signature",
                format!("{} resources cannot be looked up", signature.kind()),
            )
        })?;
        if let Some(uri) = match_uri_constant(&uri).filter(|uri| is_reserved(uri)) {
            return Err(ReactiveError::invalid_argument(
                "uri",
                format!("Identifier {} is within the reserved builtin namespace", uri),
            ));
        }
        Ok(Self::inline_call(uri, signature, method))
    }
    pub(crate) fn inline_call(uri: Node, signature: Signature, method: &'static str) -> Self {
        let known_uri = match_uri_constant(&uri)
            .filter(|uri| !is_reserved(uri))
            .cloned();
        let node = Node::method_call(
            context_parameter(),
            method,
            signature.type_arguments(),
            vec![uri],
            signature.resource_type(),
        );
        Self {
            uri: known_uri,
            signature,
            reference: ResourceReference::Inline(node),
        }
    }
    /// Identifier of the resource, if statically known
    pub fn uri(&self) -> Option<&Uri> {
        self.uri.as_ref()
    }
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
    pub fn reference(&self) -> &ResourceReference {
        &self.reference
    }
    pub fn node(&self) -> &Node {
        self.reference.node()
    }
    pub fn arity(&self) -> usize {
        self.signature.arity()
    }
    pub fn apply(&self, args: Vec<Node>) -> Result<Node, ReactiveError> {
        if args.len() != self.arity() {
            return Err(ReactiveError::ArityMismatch {
                expected: self.arity(),
                received: args.len(),
            });
        }
        for (index, (arg, expected)) in args.iter().zip(self.signature.parameters()).enumerate()
        {
            let actual = arg.node_type();
            if actual != *expected && actual != Type::Opaque {
                return Err(ReactiveError::invalid_argument(
                    "args",
                    format!(
                        "Argument {} has type {}, expected {}",
                        index, actual, expected
                    ),
                ));
            }
        }
        Ok(self.apply_unchecked(args))
    }
    pub(crate) fn apply_unchecked(&self, args: Vec<Node>) -> Node {
        if args.is_empty() && !self.signature.kind().is_factory() {
            self.node().clone()
        } else {
            Node::invoke(self.node().clone(), args)
        }
    }
}

fn match_uri_constant(node: &Node) -> Option<&Uri> {
    node.match_constant()
        .and_then(|term| term.value().match_uri())
}

macro_rules! typed_handle {
    ($(#[$attr:meta])* $name:ident<$($T:ident),+>) => {
        $(#[$attr])*
        pub struct $name<$($T),+> {
            inner: UntypedHandle,
            _type: PhantomData<fn() -> ($($T,)+)>,
        }
        impl<$($T),+> $name<$($T),+> {
            pub(crate) fn from_untyped(inner: UntypedHandle) -> Self {
                Self {
                    inner,
                    _type: PhantomData,
                }
            }
            pub fn untyped(&self) -> &UntypedHandle {
                &self.inner
            }
            pub fn uri(&self) -> Option<&Uri> {
                self.inner.uri()
            }
            pub fn node(&self) -> &Node {
                self.inner.node()
            }
            pub fn is_inline(&self) -> bool {
                self.inner.reference().is_inline()
            }
        }
        impl<$($T),+> Clone for $name<$($T),+> {
            fn clone(&self) -> Self {
                Self::from_untyped(self.inner.clone())
            }
        }
        impl<$($T),+> PartialEq for $name<$($T),+> {
            fn eq(&self, other: &Self) -> bool {
                self.inner == other.inner
            }
        }
        impl<$($T),+> Eq for $name<$($T),+> {}
        impl<$($T),+> std::fmt::Debug for $name<$($T),+> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.inner.node())
            }
        }
    };
}

typed_handle!(ObservableHandle<P, R>);
typed_handle!(ObserverHandle<P, T>);
typed_handle!(StreamFactoryHandle<P, TIn, TOut>);
typed_handle!(SubscriptionFactoryHandle<P>);

impl<P: Parameters, R: Reactive> ObservableHandle<P, R> {
    pub fn signature() -> Signature {
        Signature::observable(P::types(), R::reactive_type())
    }
    pub fn apply(&self, args: impl IntoArguments<P>) -> Observable<R> {
        Observable::from_node(self.inner.apply_unchecked(args.into_nodes()))
    }
}
impl<R: Reactive> ObservableHandle<(), R> {
    pub fn as_observable(&self) -> Observable<R> {
        self.apply(())
    }
}

impl<P: Parameters, T: Reactive> ObserverHandle<P, T> {
    pub fn signature() -> Signature {
        Signature::observer(P::types(), T::reactive_type())
    }
    pub fn apply(&self, args: impl IntoArguments<P>) -> Observer<T> {
        Observer::from_node(self.inner.apply_unchecked(args.into_nodes()))
    }
}
impl<T: Reactive> ObserverHandle<(), T> {
    pub fn as_observer(&self) -> Observer<T> {
        self.apply(())
    }
}

impl<P: Parameters, TIn: Reactive, TOut: Reactive> StreamFactoryHandle<P, TIn, TOut> {
    pub fn signature() -> Signature {
        Signature::stream_factory(P::types(), TIn::reactive_type(), TOut::reactive_type())
    }
    pub(crate) fn invocation(&self, args: impl IntoArguments<P>) -> Node {
        self.inner.apply_unchecked(args.into_nodes())
    }
    /// Quoted stream factory application, before any stream has been created
    pub fn apply(&self, args: impl IntoArguments<P>) -> Stream<TIn, TOut> {
        Stream::from_node(self.invocation(args))
    }
}

impl<P: Parameters> SubscriptionFactoryHandle<P> {
    pub fn signature() -> Signature {
        Signature::subscription_factory(P::types())
    }
    pub(crate) fn invocation(&self, args: impl IntoArguments<P>) -> Node {
        self.inner.apply_unchecked(args.into_nodes())
    }
    pub fn apply(&self, args: impl IntoArguments<P>) -> Subscription {
        Subscription::from_node(self.invocation(args))
    }
}
