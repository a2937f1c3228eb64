// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{Type, Uri};

use crate::{
    builtin::context_parameter, Expr, IntoExpr, IntoNode, ObservableHandle, ObserverHandle,
    Parameters, Reactive, ReactiveError, Signature, StreamFactoryHandle,
    SubscriptionFactoryHandle, UntypedHandle, GET_OBSERVABLE, GET_OBSERVER, GET_STREAM_FACTORY,
    GET_SUBSCRIPTION_FACTORY,
};

/// Marker type for the executor-side reactive context
pub enum ReactiveContext {}
impl Reactive for ReactiveContext {
    fn reactive_type() -> Type {
        Type::Context
    }
}

/// Expression referring to the reactive context the quoted expression will be evaluated in
pub fn current_context() -> Expr<ReactiveContext> {
    Expr::from_node(context_parameter())
}

impl Expr<ReactiveContext> {
    pub fn lookup(
        &self,
        uri: impl IntoExpr<Uri>,
        signature: Signature,
    ) -> Result<UntypedHandle, ReactiveError> {
        UntypedHandle::inline(uri.into_expr().into_node(), signature)
    }
    pub fn get_observable<P: Parameters, R: Reactive>(
        &self,
        uri: impl IntoExpr<Uri>,
    ) -> ObservableHandle<P, R> {
        ObservableHandle::from_untyped(UntypedHandle::inline_call(
            uri.into_expr().into_node(),
            ObservableHandle::<P, R>::signature(),
            GET_OBSERVABLE,
        ))
    }
    pub fn get_observer<P: Parameters, T: Reactive>(
        &self,
        uri: impl IntoExpr<Uri>,
    ) -> ObserverHandle<P, T> {
        ObserverHandle::from_untyped(UntypedHandle::inline_call(
            uri.into_expr().into_node(),
            ObserverHandle::<P, T>::signature(),
            GET_OBSERVER,
        ))
    }
    pub fn get_stream_factory<P: Parameters, TIn: Reactive, TOut: Reactive>(
        &self,
        uri: impl IntoExpr<Uri>,
    ) -> StreamFactoryHandle<P, TIn, TOut> {
        StreamFactoryHandle::from_untyped(UntypedHandle::inline_call(
            uri.into_expr().into_node(),
            StreamFactoryHandle::<P, TIn, TOut>::signature(),
            GET_STREAM_FACTORY,
        ))
    }
    pub fn get_subscription_factory<P: Parameters>(
        &self,
        uri: impl IntoExpr<Uri>,
    ) -> SubscriptionFactoryHandle<P> {
        SubscriptionFactoryHandle::from_untyped(UntypedHandle::inline_call(
            uri.into_expr().into_node(),
            SubscriptionFactoryHandle::<P>::signature(),
            GET_SUBSCRIPTION_FACTORY,
        ))
    }
}

#[cfg(test)]
mod tests {
    use rivulet::{GraphNode, Node, Value};

    use super::*;
    use crate::{lambda, KnownResource};

    #[test]
    fn inline_lookups_with_constant_identifiers() {
        let uri = Uri::parse("rx://observable/xs").unwrap();
        let xs = current_context().get_observable::<(i32,), String>(uri.clone());
        assert!(xs.is_inline());
        assert_eq!(xs.uri(), Some(&uri));
        let applied = xs.apply((3,));
        assert!(applied.is_known());
        let invoke = applied.node().match_invoke().unwrap();
        let call = invoke.target().match_method_call().unwrap();
        assert_eq!(call.method(), "get_observable");
        assert_eq!(call.args(), &[Node::constant(Value::Uri(uri), Type::Uri)]);
        assert_eq!(
            call.result_type(),
            &Type::function([Type::Int], Type::observable(Type::String))
        );
    }

    #[test]
    fn inline_lookups_with_computed_identifiers() {
        let definition = lambda::<(Uri,), _>(|(uri,)| {
            current_context()
                .get_observer::<(), i32>(uri)
                .as_observer()
        });
        let body = definition.match_lambda().unwrap().body();
        let call = body.match_method_call().unwrap();
        assert_eq!(call.method(), "get_observer");
        assert!(call.args()[0].match_parameter().is_some());
        let free = definition.free_parameters();
        assert_eq!(free.len(), 1);
        assert!(free.iter().all(|parameter| parameter.parameter_type() == &Type::Context));
    }

    #[test]
    fn untyped_inline_lookups_reject_reserved_identifiers() {
        let result = current_context().lookup(
            Uri::parse("rx://builtin/filter").unwrap(),
            Signature::observable(vec![], Type::Int),
        );
        assert!(result.unwrap_err().is_invalid_argument());
        let handle = current_context()
            .lookup(
                Uri::parse("rx://observable/xs").unwrap(),
                Signature::observable(vec![], Type::Int),
            )
            .unwrap();
        assert!(handle.reference().is_inline());
    }

    #[test]
    fn reserved_inline_lookups_are_not_known() {
        let xs = current_context()
            .get_observable::<(), i32>(Uri::parse("rx://builtin/subscribe").unwrap());
        assert_eq!(xs.uri(), None);
        assert!(!xs.as_observable().is_known());
    }
}
