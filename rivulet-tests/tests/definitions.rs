// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{GraphNode, Node, SerializeJson, Type, Uri};
use rivulet_client::{
    ClientConfig, CommandKind, Definition, Observable, Observer, ReactiveClient, ReactiveError,
    RecordingSink, ResourceKind, Stream, StreamFactoryHandle, Subscription,
    SubscriptionFactoryHandle,
};
use serde_json::json;

fn client() -> ReactiveClient<RecordingSink> {
    ReactiveClient::new(ClientConfig::default(), RecordingSink::new())
}

#[test]
fn define_parameterized_observable() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let definition = Definition::<(i32,), Observable<i32>>::new(|(threshold,)| {
        xs.as_observable().filter(move |x| x.gt(&threshold))
    });
    client
        .define_observable("rx://observable/above", definition, Some(json!({ "v": 1 })))
        .unwrap();
    let command = &client.sink().commands()[0];
    assert_eq!(command.kind(), CommandKind::DefineObservable);
    assert_eq!(command.state(), Some(&json!({ "v": 1 })));
    let expression = command.expression().unwrap();
    assert_eq!(
        expression.node_type(),
        Type::function([Type::Int], Type::observable(Type::Int))
    );
    assert_eq!(
        client.registry().kind(&Uri::parse("rx://observable/above").unwrap()),
        Some(ResourceKind::Observable)
    );
    let above = client.get_observable::<(i32,), i32>("rx://observable/above").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    assert!(client
        .subscribe(above.apply((3,)), ob.as_observer(), "sub", None)
        .is_ok());
}

#[test]
fn define_observer_from_existing_resource() {
    let client = client();
    let log = client.get_observer::<(String,), String>("rx://observer/log").unwrap();
    let definition = Definition::<(), Observer<String>>::new(|()| log.apply(("debug",)));
    client
        .define_observer("rx://observer/debug", definition, None)
        .unwrap();
    client
        .define_observer("rx://observer/alias", log.clone(), None)
        .unwrap();
    let commands = client.sink().commands();
    assert_eq!(commands[0].kind(), CommandKind::DefineObserver);
    assert_eq!(commands[1].expression(), Some(log.node()));
}

#[test]
fn define_factories() {
    let client = client();
    let subject = client
        .get_stream_factory::<(), i32, i32>("rx://factory/subject")
        .unwrap();
    client
        .define_stream_factory("rx://factory/alias", subject.clone(), None)
        .unwrap();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let definition = Definition::<(i32,), Subscription>::new(|(threshold,)| {
        xs.as_observable()
            .filter(move |x| x.gt(&threshold))
            .subscribe_expression(&ob.as_observer())
    });
    client
        .define_subscription_factory("rx://factory/watch", definition, None)
        .unwrap();
    let wrapped = Definition::<(), Stream<i32, i32>>::new(|()| subject.apply(()));
    client
        .define_stream_factory("rx://factory/wrapped", wrapped, None)
        .unwrap();
    let commands = client.sink().commands();
    assert_eq!(commands[0].kind(), CommandKind::DefineStreamFactory);
    assert_eq!(commands[0].expression(), Some(subject.node()));
    assert_eq!(commands[1].kind(), CommandKind::DefineSubscriptionFactory);
    assert_eq!(
        commands[1].expression().unwrap().node_type(),
        Type::function([Type::Int], Type::Subscription)
    );
    let watch = client
        .get_subscription_factory::<(i32,)>("rx://factory/watch")
        .unwrap();
    let subscription = watch.create(&client, "rx://subscription/w", (5,), None).unwrap();
    assert_eq!(
        subscription.node(),
        &Node::parameter(Type::Subscription, "rx://subscription/w")
    );
}

#[test]
fn definitions_require_identifier_and_artifact() {
    let client = client();
    let xs = client.get_observable::<(), i32>("xs").unwrap();
    assert_eq!(
        client.define_observable(None::<&str>, xs.as_observable(), None),
        Err(ReactiveError::missing_argument("uri"))
    );
    assert_eq!(
        client.define_observable::<Observable<i32>>("ys", None, None),
        Err(ReactiveError::missing_argument("definition"))
    );
    assert_eq!(
        client.define_observer::<Observer<i32>>("ob", None, None),
        Err(ReactiveError::missing_argument("definition"))
    );
    assert_eq!(
        client.define_stream_factory::<StreamFactoryHandle<(), i32, i32>>("sf", None, None),
        Err(ReactiveError::missing_argument("definition"))
    );
    assert_eq!(
        client.define_subscription_factory::<SubscriptionFactoryHandle<(i32,)>>("tf", None, None),
        Err(ReactiveError::missing_argument("definition"))
    );
    let subject = client
        .get_stream_factory::<(), i32, i32>("rx://factory/subject")
        .unwrap();
    assert_eq!(
        client.define_stream_factory(None::<&str>, subject.clone(), None),
        Err(ReactiveError::missing_argument("uri"))
    );
    let watch = Definition::<(i32,), Subscription>::new(|(_threshold,)| {
        xs.as_observable()
            .subscribe_expression(&Observer::from_node(Node::parameter(
                Type::observer(Type::Int),
                "ob",
            )))
    });
    assert_eq!(
        client.define_subscription_factory(None::<&str>, watch, None),
        Err(ReactiveError::missing_argument("uri"))
    );
    assert!(client.sink().is_empty());
}

#[test]
fn undefine_every_kind() {
    let client = client();
    client.undefine_observable("a").unwrap();
    client.undefine_observer("b").unwrap();
    client.undefine_stream_factory("c").unwrap();
    client.undefine_subscription_factory("d").unwrap();
    let commands = client.sink().commands();
    assert_eq!(
        commands.iter().map(|command| command.kind()).collect::<Vec<_>>(),
        vec![
            CommandKind::UndefineObservable,
            CommandKind::UndefineObserver,
            CommandKind::UndefineStreamFactory,
            CommandKind::UndefineSubscriptionFactory,
        ]
    );
    assert_eq!(
        commands[0].to_json(),
        Ok(json!({ "command": "UndefineObservable", "target": "a" }))
    );
}
