// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{GraphNode, Node, Type, Uri, Value};
use rivulet_client::{
    builtin::CONTEXT_PARAMETER, current_context, ClientConfig, Definition, InlineLookupPolicy,
    KnownResource, Observable, ReactiveClient, ReactiveError, RecordingSink,
};
use serde_json::json;

fn uri(value: &str) -> Uri {
    Uri::parse(value).unwrap()
}

#[test]
fn bound_and_inline_lookups_differ_only_in_reference_form() {
    let client = ReactiveClient::new(ClientConfig::default(), RecordingSink::new());
    let bound = client.get_observable::<(i32,), String>("xs").unwrap();
    let inline = current_context().get_observable::<(i32,), String>(uri("xs"));
    assert!(!bound.is_inline());
    assert!(inline.is_inline());
    assert!(bound.node().match_parameter().is_some());
    assert!(inline.node().match_method_call().is_some());
    assert_eq!(bound.node().node_type(), inline.node().node_type());
    assert_eq!(bound.apply((1,)).known_uri(), inline.apply((1,)).known_uri());
}

#[test]
fn deferred_inline_lookups_are_dispatched_as_context_calls() {
    let client = ReactiveClient::new(ClientConfig::default(), RecordingSink::new());
    let ob = client.get_observer::<(), String>("ob").unwrap();
    let xs = current_context().get_observable::<(i32,), String>(uri("xs"));
    client
        .subscribe(xs.apply((1,)), ob.as_observer(), "sub", None)
        .unwrap();
    let expression = client.sink().commands()[0].expression().cloned().unwrap();
    let source = expression.match_invoke().unwrap().args()[0].clone();
    let call = source.match_invoke().unwrap().target().clone();
    let call = call.match_method_call().unwrap();
    assert_eq!(call.method(), "get_observable");
    assert_eq!(
        call.receiver().match_parameter().unwrap().name(),
        CONTEXT_PARAMETER
    );
    assert_eq!(call.args(), &[Node::constant(Value::Uri(uri("xs")), Type::Uri)]);
}

#[test]
fn bind_policy_rewrites_constant_inline_lookups() {
    let config = ClientConfig::from_json(json!({ "inline_lookups": "bind" })).unwrap();
    assert_eq!(config.inline_lookups, InlineLookupPolicy::Bind);
    let client = ReactiveClient::new(config, RecordingSink::new());
    let ob = client.get_observer::<(), String>("ob").unwrap();
    let xs = current_context().get_observable::<(i32,), String>(uri("xs"));
    client
        .subscribe(xs.apply((1,)), ob.as_observer(), "sub", None)
        .unwrap();
    let expression = client.sink().commands()[0].expression().cloned().unwrap();
    let source = expression.match_invoke().unwrap().args()[0].clone();
    assert_eq!(
        source,
        Node::invoke(
            Node::parameter(
                Type::function([Type::Int], Type::observable(Type::String)),
                "xs"
            ),
            vec![Node::constant(Value::Int(1), Type::Int)]
        )
    );
}

#[test]
fn inline_lookups_inside_definitions() {
    let client = ReactiveClient::new(ClientConfig::default(), RecordingSink::new());
    let definition = Definition::<(Uri,), Observable<i32>>::new(|(source,)| {
        current_context()
            .get_observable::<(), i32>(source)
            .as_observable()
            .filter(|x| x.gt(0))
    });
    client
        .define_observable("rx://observable/positive", definition, None)
        .unwrap();
    let expression = client.sink().commands()[0].expression().cloned().unwrap();
    let lambda = expression.match_lambda().unwrap();
    assert_eq!(lambda.num_args(), 1);
    assert_eq!(
        lambda.parameters()[0].parameter_type(),
        &Type::Uri
    );
}

#[test]
fn unresolved_parameters_are_reported() {
    let client = ReactiveClient::new(ClientConfig::default(), RecordingSink::new());
    let ob = client.get_observer::<(), i32>("ob").unwrap();
    let stray = Observable::<i32>::from_node(Node::parameter(Type::observable(Type::Int), "ys"));
    let result = client.subscribe(stray.clone(), ob.as_observer(), "sub", None);
    assert!(matches!(
        result,
        Err(ReactiveError::MalformedExpression { ref parameter, .. }) if parameter == "ys"
    ));
    let lenient = ReactiveClient::new(
        ClientConfig::default().with_validation(false),
        RecordingSink::new(),
    );
    let ob = lenient.get_observer::<(), i32>("ob").unwrap();
    assert!(lenient.subscribe(stray, ob.as_observer(), "sub", None).is_ok());
}

#[test]
fn reserved_identifiers_cannot_be_looked_up_inline() {
    for policy in [InlineLookupPolicy::Defer, InlineLookupPolicy::Bind] {
        let client = ReactiveClient::new(
            ClientConfig::default().with_inline_lookups(policy),
            RecordingSink::new(),
        );
        let ob = client.get_observer::<(), i32>("ob").unwrap();
        let xs = current_context().get_observable::<(), i32>(uri("rx://builtin/subscribe"));
        assert!(!xs.as_observable().is_known());
        let result = client.subscribe(xs.as_observable(), ob.as_observer(), "sub", None);
        assert!(result.unwrap_err().is_invalid_argument());
        assert!(client.sink().is_empty());
    }
}
