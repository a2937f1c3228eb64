// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{node::BinaryOperator, GraphNode, Node, Type, Value};
use rivulet_client::{
    builtin::BuiltinOperator, ClientConfig, CommandKind, KnownResource, Observable,
    ReactiveClient, ReactiveError, RecordingSink, Variable,
};

fn client() -> ReactiveClient<RecordingSink> {
    ReactiveClient::new(ClientConfig::default(), RecordingSink::new())
}

fn string(value: &str) -> Node {
    Node::constant(Value::string(value), Type::String)
}

#[test]
fn subscribe_to_parameterized_resources() {
    let client = client();
    let xs = client
        .get_observable::<(String, String), i32>("xs")
        .unwrap();
    let ob = client.get_observer::<(String, String), i32>("ob").unwrap();
    client
        .subscribe(xs.apply(("p1", "p2")), ob.apply(("q1", "q2")), "sub", None)
        .unwrap();
    let commands = client.sink().commands();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].kind(), CommandKind::CreateSubscription);
    assert_eq!(commands[0].target().as_str(), "sub");
    assert_eq!(commands[0].state(), None);
    let subscribe_type = Type::function(
        [Type::observable(Type::Int), Type::observer(Type::Int)],
        Type::Subscription,
    );
    let xs_type = Type::function([Type::String, Type::String], Type::observable(Type::Int));
    let ob_type = Type::function([Type::String, Type::String], Type::observer(Type::Int));
    assert_eq!(
        commands[0].expression(),
        Some(&Node::invoke(
            Node::parameter(subscribe_type, "rx://builtin/subscribe"),
            vec![
                Node::invoke(
                    Node::parameter(xs_type, "xs"),
                    vec![string("p1"), string("p2")]
                ),
                Node::invoke(
                    Node::parameter(ob_type, "ob"),
                    vec![string("q1"), string("q2")]
                ),
            ]
        ))
    );
}

#[test]
fn captured_variables_are_read_at_each_terminal_action() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let a = Variable::new(0);
    let query = xs.as_observable().filter(|x| x.gt(&a));
    for value in 0..3 {
        a.set(value);
        client
            .subscribe(&query, ob.as_observer(), format!("sub{}", value), None)
            .unwrap();
    }
    let commands = client.sink().commands();
    assert_eq!(commands.len(), 3);
    for (index, command) in commands.iter().enumerate() {
        let expression = command.expression().unwrap();
        assert!(!expression.has_captures());
        let filter = expression.match_invoke().unwrap().args()[0].clone();
        let predicate = filter.match_invoke().unwrap().args()[1].clone();
        let body = predicate.match_lambda().unwrap().body().clone();
        let comparison = body.match_binary().unwrap();
        assert_eq!(comparison.operator(), BinaryOperator::GreaterThan);
        assert_eq!(
            comparison.right(),
            &Node::constant(Value::Int(index as i64), Type::Int)
        );
    }
    assert_ne!(commands[0].expression(), commands[1].expression());
    assert_ne!(commands[1].expression(), commands[2].expression());
}

#[test]
fn plain_values_are_embedded_at_composition_time() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let mut threshold = 1;
    let query = xs.as_observable().filter(|x| x.gt(threshold));
    threshold += 1;
    client
        .subscribe(query, ob.as_observer(), "sub", None)
        .unwrap();
    let expression = client.sink().commands()[0].expression().cloned().unwrap();
    let filter = expression.match_invoke().unwrap().args()[0].clone();
    let predicate = filter.match_invoke().unwrap().args()[1].clone();
    let body = predicate.match_lambda().unwrap().body().clone();
    assert_eq!(
        body.match_binary().unwrap().right(),
        &Node::constant(Value::Int(1), Type::Int)
    );
    assert_eq!(threshold, 2);
}

#[test]
fn chained_operators_nest_in_application_order() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let query = xs
        .as_observable()
        .filter(|x| x.gt(0))
        .select(|x| x * 10);
    let project = query.node().match_invoke().unwrap();
    assert_eq!(
        project.target().match_parameter().unwrap().name(),
        BuiltinOperator::Project.identifier()
    );
    let filter = project.args()[0].match_invoke().unwrap();
    assert_eq!(
        filter.target().match_parameter().unwrap().name(),
        BuiltinOperator::Filter.identifier()
    );
    assert_eq!(&filter.args()[0], xs.node());
    assert!(!query.is_known());
    assert!(xs.as_observable().is_known());
}

#[test]
fn flat_map_with_nested_resources() {
    let client = client();
    let xs = client.get_observable::<(), String>("xs").unwrap();
    let ys = client.get_observable::<(String,), i32>("ys").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let query = xs
        .as_observable()
        .select_many_with(|x| ys.apply((x,)), |_, y| y + 1);
    client
        .subscribe(query, ob.as_observer(), "sub", None)
        .unwrap();
    let expression = client.sink().commands()[0].expression().cloned().unwrap();
    let flat_map = expression.match_invoke().unwrap().args()[0].clone();
    let flat_map = flat_map.match_invoke().unwrap();
    assert_eq!(
        flat_map.target().match_parameter().unwrap().name(),
        "rx://builtin/flat-map"
    );
    let selector = flat_map.args()[1].match_lambda().unwrap();
    let parameter = &selector.parameters()[0];
    assert_eq!(
        selector.body(),
        &Node::invoke(
            ys.node().clone(),
            vec![Node::parameter(Type::String, parameter.name())]
        )
    );
}

#[test]
fn subscriptions_can_be_deleted() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let subscription = client
        .subscribe(xs.as_observable(), ob.as_observer(), "sub", None)
        .unwrap();
    assert_eq!(subscription.known_uri().map(|uri| uri.to_string()), Some(String::from("sub")));
    client.delete_subscription("sub").unwrap();
    let commands = client.sink().commands();
    assert_eq!(commands[1].kind(), CommandKind::DeleteSubscription);
    assert_eq!(commands[1].expression(), None);
    assert_eq!(
        client.delete_subscription(None::<&str>),
        Err(ReactiveError::missing_argument("uri"))
    );
}

#[test]
fn placeholder_artifacts_are_not_known() {
    let placeholder =
        Observable::<i32>::from_node(Node::constant(Value::Null, Type::observable(Type::Int)));
    assert!(!placeholder.is_known());
}
