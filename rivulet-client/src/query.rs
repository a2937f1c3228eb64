// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::iter::once;

use rivulet::{Node, Type};

use crate::{
    builtin::BuiltinOperator, lambda, Expr, Observable, Observer, Reactive, Subscription,
};

fn apply_operator(
    operator: BuiltinOperator,
    operator_type: Type,
    source: &Node,
    args: impl IntoIterator<Item = Node>,
) -> Node {
    Node::invoke(
        operator.parameter(operator_type),
        once(source.clone()).chain(args).collect(),
    )
}

impl<T: Reactive> Observable<T> {
    pub fn filter(&self, predicate: impl FnOnce(Expr<T>) -> Expr<bool>) -> Observable<T> {
        let predicate = lambda::<(T,), _>(|(value,)| predicate(value));
        Observable::from_node(apply_operator(
            BuiltinOperator::Filter,
            Type::function(
                [
                    Self::reactive_type(),
                    Type::function([T::reactive_type()], Type::Boolean),
                ],
                Self::reactive_type(),
            ),
            self.node(),
            once(predicate),
        ))
    }
    pub fn select<R: Reactive>(&self, selector: impl FnOnce(Expr<T>) -> Expr<R>) -> Observable<R> {
        let selector = lambda::<(T,), _>(|(value,)| selector(value));
        Observable::from_node(apply_operator(
            BuiltinOperator::Project,
            Type::function(
                [
                    Self::reactive_type(),
                    Type::function([T::reactive_type()], R::reactive_type()),
                ],
                Observable::<R>::reactive_type(),
            ),
            self.node(),
            once(selector),
        ))
    }
    pub fn select_many<R: Reactive>(
        &self,
        selector: impl FnOnce(Expr<T>) -> Observable<R>,
    ) -> Observable<R> {
        let selector = lambda::<(T,), _>(|(value,)| selector(value));
        Observable::from_node(apply_operator(
            BuiltinOperator::FlatMap,
            Type::function(
                [
                    Self::reactive_type(),
                    Type::function([T::reactive_type()], Observable::<R>::reactive_type()),
                ],
                Observable::<R>::reactive_type(),
            ),
            self.node(),
            once(selector),
        ))
    }
    pub fn select_many_with<C: Reactive, R: Reactive>(
        &self,
        selector: impl FnOnce(Expr<T>) -> Observable<C>,
        combiner: impl FnOnce(Expr<T>, Expr<C>) -> Expr<R>,
    ) -> Observable<R> {
        let selector = lambda::<(T,), _>(|(value,)| selector(value));
        let combiner = lambda::<(T, C), _>(|(value, item)| combiner(value, item));
        Observable::from_node(apply_operator(
            BuiltinOperator::FlatMap,
            Type::function(
                [
                    Self::reactive_type(),
                    Type::function([T::reactive_type()], Observable::<C>::reactive_type()),
                    Type::function([T::reactive_type(), C::reactive_type()], R::reactive_type()),
                ],
                Observable::<R>::reactive_type(),
            ),
            self.node(),
            [selector, combiner],
        ))
    }
    /// Quoted subscription of `observer` to this observable, before it has been created
    pub fn subscribe_expression(&self, observer: &Observer<T>) -> Subscription {
        Subscription::from_node(apply_operator(
            BuiltinOperator::Subscribe,
            Type::function(
                [Self::reactive_type(), Observer::<T>::reactive_type()],
                Type::Subscription,
            ),
            self.node(),
            once(observer.node().clone()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use rivulet::{GraphNode, Value};

    use super::*;
    use crate::IntoNode;

    fn xs() -> Observable<i32> {
        Observable::from_node(Node::parameter(Type::observable(Type::Int), "xs"))
    }

    #[test]
    fn filter_invokes_the_filter_operator() {
        let query = xs().filter(|x| x.gt(0));
        let invoke = query.node().match_invoke().unwrap();
        let operator = invoke.target().match_parameter().unwrap();
        assert_eq!(operator.name(), "rx://builtin/filter");
        assert_eq!(invoke.args()[0], *xs().node());
        let predicate = invoke.args()[1].match_lambda().unwrap();
        assert_eq!(predicate.num_args(), 1);
        assert_eq!(query.node().node_type(), Type::observable(Type::Int));
        assert_eq!(format!("{}", query), "(rx://builtin/filter xs (fn (arg0_0) (> arg0_0 0)))");
    }

    #[test]
    fn identical_compositions_are_equal() {
        let first = xs().filter(|x| x.gt(0)).select(|x| x * 2);
        let second = xs().filter(|x| x.gt(0)).select(|x| x * 2);
        assert_eq!(first, second);
        assert_ne!(first, xs().filter(|x| x.gt(1)).select(|x| x * 2));
    }

    #[test]
    fn select_changes_the_element_type() {
        let query = xs().select(|x| x.gt(3));
        assert_eq!(query.node().node_type(), Type::observable(Type::Boolean));
    }

    #[test]
    fn select_many_with_combiner() {
        let ys = Observable::<String>::from_node(Node::parameter(
            Type::observable(Type::String),
            "ys",
        ));
        let query = xs().select_many_with(|_| ys.clone(), |x, y| y.len() + x.property::<i64>("value"));
        let invoke = query.node().match_invoke().unwrap();
        assert_eq!(
            invoke.target().match_parameter().unwrap().name(),
            "rx://builtin/flat-map"
        );
        assert_eq!(invoke.args().len(), 3);
        assert_eq!(invoke.args()[2].match_lambda().unwrap().num_args(), 2);
        assert_eq!(query.node().node_type(), Type::observable(Type::Int));
        let free = query.node().free_parameters();
        assert_eq!(free.len(), 3);
    }

    #[test]
    fn subscribe_expression_is_not_canonicalized_away() {
        let observer = Observer::<i32>::from_node(Node::parameter(Type::observer(Type::Int), "ob"));
        let subscription = xs().subscribe_expression(&observer);
        let invoke = subscription.node().match_invoke().unwrap();
        assert_eq!(
            invoke.target().match_parameter().unwrap().name(),
            "rx://builtin/subscribe"
        );
        assert_eq!(invoke.args(), &[xs().into_node(), observer.into_node()]);
        assert_eq!(subscription.node().node_type(), Type::Subscription);
        assert_eq!(
            Observable::<i32>::from_node(Node::constant(Value::Null, Type::Unit)).node().node_type(),
            Type::Unit
        );
    }
}
