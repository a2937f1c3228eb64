// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::sync::{PoisonError, RwLock};

use rivulet::{Node, Type, Uri};
use serde_json::Value as JsonValue;
use tracing::{debug, info_span};
use uuid::Uuid;

use crate::{
    builtin::is_reserved, ClientConfig, Command, CommandKind, CommandSink, IntoArguments,
    IntoNode, IntoUri, Observable, ObservableDefinition, ObservableHandle, Observer,
    ObserverDefinition, ObserverHandle, Parameters, PendingCommand, Reactive, ReactiveError,
    Required, ResourceKind, ResourceRegistry, ResourceResolver, Signature, Stream,
    StreamFactoryDefinition, StreamFactoryHandle, Subscription, SubscriptionFactoryDefinition,
    SubscriptionFactoryHandle, UntypedHandle,
};

pub struct ReactiveClient<TSink: CommandSink> {
    session_id: Uuid,
    config: ClientConfig,
    registry: RwLock<ResourceRegistry>,
    sink: TSink,
}
impl<TSink: CommandSink> ReactiveClient<TSink> {
    pub fn new(config: ClientConfig, sink: TSink) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            config,
            registry: RwLock::new(ResourceRegistry::default()),
            sink,
        }
    }
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
    pub fn sink(&self) -> &TSink {
        &self.sink
    }
    /// Snapshot of the resources known to this client
    pub fn registry(&self) -> ResourceRegistry {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn lookup(
        &self,
        uri: impl IntoUri,
        signature: Signature,
    ) -> Result<UntypedHandle, ReactiveError> {
        let uri = self.user_identifier(uri)?;
        debug!(
            session_id = %self.session_id,
            lookup = %uri,
            kind = %signature.kind(),
            arity = signature.arity()
        );
        self.register(uri.clone(), signature.kind());
        Ok(UntypedHandle::bound(uri, signature))
    }
    pub fn get_observable<P: Parameters, R: Reactive>(
        &self,
        uri: impl IntoUri,
    ) -> Result<ObservableHandle<P, R>, ReactiveError> {
        self.lookup(uri, ObservableHandle::<P, R>::signature())
            .map(ObservableHandle::from_untyped)
    }
    pub fn get_observer<P: Parameters, T: Reactive>(
        &self,
        uri: impl IntoUri,
    ) -> Result<ObserverHandle<P, T>, ReactiveError> {
        self.lookup(uri, ObserverHandle::<P, T>::signature())
            .map(ObserverHandle::from_untyped)
    }
    pub fn get_stream_factory<P: Parameters, TIn: Reactive, TOut: Reactive>(
        &self,
        uri: impl IntoUri,
    ) -> Result<StreamFactoryHandle<P, TIn, TOut>, ReactiveError> {
        self.lookup(uri, StreamFactoryHandle::<P, TIn, TOut>::signature())
            .map(StreamFactoryHandle::from_untyped)
    }
    pub fn get_subscription_factory<P: Parameters>(
        &self,
        uri: impl IntoUri,
    ) -> Result<SubscriptionFactoryHandle<P>, ReactiveError> {
        self.lookup(uri, SubscriptionFactoryHandle::<P>::signature())
            .map(SubscriptionFactoryHandle::from_untyped)
    }

    pub fn subscribe<T: Reactive>(
        &self,
        observable: impl Required<Observable<T>>,
        observer: impl Required<Observer<T>>,
        uri: impl IntoUri,
        state: Option<JsonValue>,
    ) -> Result<Subscription, ReactiveError> {
        let span = info_span!("client::subscribe", session_id = %self.session_id);
        let _guard = span.enter();
        let observable = observable.required("observable")?;
        let observer = observer.required("observer")?;
        let uri = self.user_identifier(uri)?;
        let expression = observable.subscribe_expression(&observer).into_node();
        self.submit(CommandKind::CreateSubscription, uri.clone(), expression, state)?;
        Ok(Subscription::from_node(Node::parameter(
            Type::Subscription,
            uri.as_str(),
        )))
    }
    pub fn create_stream<P: Parameters, TIn: Reactive, TOut: Reactive>(
        &self,
        factory: impl Required<StreamFactoryHandle<P, TIn, TOut>>,
        uri: impl IntoUri,
        args: impl IntoArguments<P>,
        state: Option<JsonValue>,
    ) -> Result<Stream<TIn, TOut>, ReactiveError> {
        let span = info_span!("client::create_stream", session_id = %self.session_id);
        let _guard = span.enter();
        let factory = factory.required("factory")?;
        let uri = self.user_identifier(uri)?;
        let expression = factory.invocation(args);
        self.submit(CommandKind::CreateStream, uri.clone(), expression, state)?;
        Ok(Stream::from_node(Node::parameter(
            Stream::<TIn, TOut>::reactive_type(),
            uri.as_str(),
        )))
    }
    pub fn create_subscription<P: Parameters>(
        &self,
        factory: impl Required<SubscriptionFactoryHandle<P>>,
        uri: impl IntoUri,
        args: impl IntoArguments<P>,
        state: Option<JsonValue>,
    ) -> Result<Subscription, ReactiveError> {
        let span = info_span!("client::create_subscription", session_id = %self.session_id);
        let _guard = span.enter();
        let factory = factory.required("factory")?;
        let uri = self.user_identifier(uri)?;
        let expression = factory.invocation(args);
        self.submit(CommandKind::CreateSubscription, uri.clone(), expression, state)?;
        Ok(Subscription::from_node(Node::parameter(
            Type::Subscription,
            uri.as_str(),
        )))
    }

    pub fn define_observable<D: ObservableDefinition>(
        &self,
        uri: impl IntoUri,
        definition: impl Required<D>,
        state: Option<JsonValue>,
    ) -> Result<(), ReactiveError> {
        let span = info_span!("client::define_observable", session_id = %self.session_id);
        let _guard = span.enter();
        let uri = self.user_identifier(uri)?;
        let definition = definition.required("definition")?;
        let expression = definition.definition_node().clone();
        self.submit(CommandKind::DefineObservable, uri, expression, state)
    }
    pub fn define_observer<D: ObserverDefinition>(
        &self,
        uri: impl IntoUri,
        definition: impl Required<D>,
        state: Option<JsonValue>,
    ) -> Result<(), ReactiveError> {
        let span = info_span!("client::define_observer", session_id = %self.session_id);
        let _guard = span.enter();
        let uri = self.user_identifier(uri)?;
        let definition = definition.required("definition")?;
        let expression = definition.definition_node().clone();
        self.submit(CommandKind::DefineObserver, uri, expression, state)
    }
    pub fn define_stream_factory<D: StreamFactoryDefinition>(
        &self,
        uri: impl IntoUri,
        definition: impl Required<D>,
        state: Option<JsonValue>,
    ) -> Result<(), ReactiveError> {
        let span = info_span!("client::define_stream_factory", session_id = %self.session_id);
        let _guard = span.enter();
        let uri = self.user_identifier(uri)?;
        let definition = definition.required("definition")?;
        let expression = definition.definition_node().clone();
        self.submit(CommandKind::DefineStreamFactory, uri, expression, state)
    }
    pub fn define_subscription_factory<D: SubscriptionFactoryDefinition>(
        &self,
        uri: impl IntoUri,
        definition: impl Required<D>,
        state: Option<JsonValue>,
    ) -> Result<(), ReactiveError> {
        let span = info_span!(
            "client::define_subscription_factory",
            session_id = %self.session_id
        );
        let _guard = span.enter();
        let uri = self.user_identifier(uri)?;
        let definition = definition.required("definition")?;
        let expression = definition.definition_node().clone();
        self.submit(CommandKind::DefineSubscriptionFactory, uri, expression, state)
    }

    pub fn delete_subscription(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::DeleteSubscription, uri)
    }
    pub fn delete_stream(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::DeleteStream, uri)
    }
    pub fn undefine_observable(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::UndefineObservable, uri)
    }
    pub fn undefine_observer(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::UndefineObserver, uri)
    }
    pub fn undefine_stream_factory(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::UndefineStreamFactory, uri)
    }
    pub fn undefine_subscription_factory(&self, uri: impl IntoUri) -> Result<(), ReactiveError> {
        self.teardown(CommandKind::UndefineSubscriptionFactory, uri)
    }

    fn user_identifier(&self, uri: impl IntoUri) -> Result<Uri, ReactiveError> {
        let uri = uri.into_uri()?;
        if is_reserved(&uri) {
            Err(ReactiveError::invalid_argument(
                "uri",
                format!("Identifier {} is within the reserved builtin namespace", uri),
            ))
        } else {
            Ok(uri)
        }
    }
    fn submit(
        &self,
        kind: CommandKind,
        target: Uri,
        expression: Node,
        state: Option<JsonValue>,
    ) -> Result<(), ReactiveError> {
        let resolver = ResourceResolver::new(&self.config, self.registry());
        let command = PendingCommand::new(kind, target.clone(), expression, state)?
            .materialize()
            .resolve(&resolver)?
            .build();
        self.dispatch(command);
        self.register(target, kind.resource_kind());
        Ok(())
    }
    fn teardown(&self, kind: CommandKind, uri: impl IntoUri) -> Result<(), ReactiveError> {
        let span = info_span!("client::teardown", session_id = %self.session_id, command = %kind);
        let _guard = span.enter();
        let uri = self.user_identifier(uri)?;
        let command = Command::teardown(kind, uri.clone())?;
        self.dispatch(command);
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        if registry.kind(&uri) == Some(kind.resource_kind()) {
            registry.unregister(&uri);
        }
        Ok(())
    }
    fn dispatch(&self, command: Command) {
        debug!(
            session_id = %self.session_id,
            command = command.name(),
            target = %command.target(),
            command_id = command.id()
        );
        self.sink.submit(command)
    }
    fn register(&self, uri: Uri, kind: ResourceKind) {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .register(uri, kind);
    }
}

impl<P: Parameters, TIn: Reactive, TOut: Reactive> StreamFactoryHandle<P, TIn, TOut> {
    pub fn create<TSink: CommandSink>(
        &self,
        client: &ReactiveClient<TSink>,
        uri: impl IntoUri,
        args: impl IntoArguments<P>,
        state: Option<JsonValue>,
    ) -> Result<Stream<TIn, TOut>, ReactiveError> {
        client.create_stream(self, uri, args, state)
    }
}
impl<P: Parameters> SubscriptionFactoryHandle<P> {
    pub fn create<TSink: CommandSink>(
        &self,
        client: &ReactiveClient<TSink>,
        uri: impl IntoUri,
        args: impl IntoArguments<P>,
        state: Option<JsonValue>,
    ) -> Result<Subscription, ReactiveError> {
        client.create_subscription(self, uri, args, state)
    }
}
