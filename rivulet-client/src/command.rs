// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{
    hash::{hash_object, hash_sequence, HashId},
    serialize::json_object,
    Node, SerializeJson, Uri,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::{ReactiveError, ResourceKind};

mod pending;
pub use pending::*;

#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug, Serialize, Deserialize, EnumIter)]
pub enum CommandKind {
    CreateSubscription,
    CreateStream,
    DefineObservable,
    DefineObserver,
    DefineStreamFactory,
    DefineSubscriptionFactory,
    DeleteSubscription,
    DeleteStream,
    UndefineObservable,
    UndefineObserver,
    UndefineStreamFactory,
    UndefineSubscriptionFactory,
}
impl CommandKind {
    pub fn entries() -> impl Iterator<Item = Self> {
        Self::iter()
    }
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateSubscription => "CreateSubscription",
            Self::CreateStream => "CreateStream",
            Self::DefineObservable => "DefineObservable",
            Self::DefineObserver => "DefineObserver",
            Self::DefineStreamFactory => "DefineStreamFactory",
            Self::DefineSubscriptionFactory => "DefineSubscriptionFactory",
            Self::DeleteSubscription => "DeleteSubscription",
            Self::DeleteStream => "DeleteStream",
            Self::UndefineObservable => "UndefineObservable",
            Self::UndefineObserver => "UndefineObserver",
            Self::UndefineStreamFactory => "UndefineStreamFactory",
            Self::UndefineSubscriptionFactory => "UndefineSubscriptionFactory",
        }
    }
    pub fn has_expression(&self) -> bool {
        matches!(
            self,
            Self::CreateSubscription
                | Self::CreateStream
                | Self::DefineObservable
                | Self::DefineObserver
                | Self::DefineStreamFactory
                | Self::DefineSubscriptionFactory
        )
    }
    /// Kind of resource registered under the command target once the command has been submitted
    pub fn resource_kind(&self) -> ResourceKind {
        match self {
            Self::CreateSubscription | Self::DeleteSubscription => ResourceKind::Subscription,
            Self::CreateStream | Self::DeleteStream => ResourceKind::Stream,
            Self::DefineObservable | Self::UndefineObservable => ResourceKind::Observable,
            Self::DefineObserver | Self::UndefineObserver => ResourceKind::Observer,
            Self::DefineStreamFactory | Self::UndefineStreamFactory => ResourceKind::StreamFactory,
            Self::DefineSubscriptionFactory | Self::UndefineSubscriptionFactory => {
                ResourceKind::SubscriptionFactory
            }
        }
    }
}
impl std::fmt::Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(PartialEq, Clone, Debug)]
pub struct ExpressionCommand {
    pub target: Uri,
    pub expression: Node,
    pub state: Option<JsonValue>,
}

#[derive(Eq, PartialEq, Clone, Debug)]
pub struct TargetCommand {
    pub target: Uri,
}

#[derive(PartialEq, Clone, Debug)]
pub enum Command {
    CreateSubscription(ExpressionCommand),
    CreateStream(ExpressionCommand),
    DefineObservable(ExpressionCommand),
    DefineObserver(ExpressionCommand),
    DefineStreamFactory(ExpressionCommand),
    DefineSubscriptionFactory(ExpressionCommand),
    DeleteSubscription(TargetCommand),
    DeleteStream(TargetCommand),
    UndefineObservable(TargetCommand),
    UndefineObserver(TargetCommand),
    UndefineStreamFactory(TargetCommand),
    UndefineSubscriptionFactory(TargetCommand),
}
impl Command {
    pub fn teardown(kind: CommandKind, target: Uri) -> Result<Self, ReactiveError> {
        let variant = Self::target_variant(kind).ok_or_else(|| {
            ReactiveError::invalid_argument(
                "kind",
                format!("{} commands require an expression", kind),
            )
        })?;
        Ok(variant(TargetCommand { target }))
    }
    pub(crate) fn expression_variant(kind: CommandKind) -> Option<fn(ExpressionCommand) -> Self> {
        match kind {
            CommandKind::CreateSubscription => Some(Self::CreateSubscription),
            CommandKind::CreateStream => Some(Self::CreateStream),
            CommandKind::DefineObservable => Some(Self::DefineObservable),
            CommandKind::DefineObserver => Some(Self::DefineObserver),
            CommandKind::DefineStreamFactory => Some(Self::DefineStreamFactory),
            CommandKind::DefineSubscriptionFactory => Some(Self::DefineSubscriptionFactory),
            _ => None,
        }
    }
    fn target_variant(kind: CommandKind) -> Option<fn(TargetCommand) -> Self> {
        match kind {
            CommandKind::DeleteSubscription => Some(Self::DeleteSubscription),
            CommandKind::DeleteStream => Some(Self::DeleteStream),
            CommandKind::UndefineObservable => Some(Self::UndefineObservable),
            CommandKind::UndefineObserver => Some(Self::UndefineObserver),
            CommandKind::UndefineStreamFactory => Some(Self::UndefineStreamFactory),
            CommandKind::UndefineSubscriptionFactory => Some(Self::UndefineSubscriptionFactory),
            _ => None,
        }
    }
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::CreateSubscription(_) => CommandKind::CreateSubscription,
            Self::CreateStream(_) => CommandKind::CreateStream,
            Self::DefineObservable(_) => CommandKind::DefineObservable,
            Self::DefineObserver(_) => CommandKind::DefineObserver,
            Self::DefineStreamFactory(_) => CommandKind::DefineStreamFactory,
            Self::DefineSubscriptionFactory(_) => CommandKind::DefineSubscriptionFactory,
            Self::DeleteSubscription(_) => CommandKind::DeleteSubscription,
            Self::DeleteStream(_) => CommandKind::DeleteStream,
            Self::UndefineObservable(_) => CommandKind::UndefineObservable,
            Self::UndefineObserver(_) => CommandKind::UndefineObserver,
            Self::UndefineStreamFactory(_) => CommandKind::UndefineStreamFactory,
            Self::UndefineSubscriptionFactory(_) => CommandKind::UndefineSubscriptionFactory,
        }
    }
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
    pub fn target(&self) -> &Uri {
        match self {
            Self::CreateSubscription(command)
            | Self::CreateStream(command)
            | Self::DefineObservable(command)
            | Self::DefineObserver(command)
            | Self::DefineStreamFactory(command)
            | Self::DefineSubscriptionFactory(command) => &command.target,
            Self::DeleteSubscription(command)
            | Self::DeleteStream(command)
            | Self::UndefineObservable(command)
            | Self::UndefineObserver(command)
            | Self::UndefineStreamFactory(command)
            | Self::UndefineSubscriptionFactory(command) => &command.target,
        }
    }
    pub fn expression(&self) -> Option<&Node> {
        self.match_expression_command()
            .map(|command| &command.expression)
    }
    pub fn state(&self) -> Option<&JsonValue> {
        self.match_expression_command()
            .and_then(|command| command.state.as_ref())
    }
    /// Content hash over the command kind, target and expression
    pub fn id(&self) -> HashId {
        hash_sequence([
            hash_object(&self.kind()),
            hash_object(self.target()),
            self.expression().map(Node::id).unwrap_or(0),
        ])
    }
    pub fn match_expression_command(&self) -> Option<&ExpressionCommand> {
        match self {
            Self::CreateSubscription(command)
            | Self::CreateStream(command)
            | Self::DefineObservable(command)
            | Self::DefineObserver(command)
            | Self::DefineStreamFactory(command)
            | Self::DefineSubscriptionFactory(command) => Some(command),
            _ => None,
        }
    }
}
impl SerializeJson for Command {
    fn to_json(&self) -> Result<JsonValue, String> {
        let expression = self.expression().map(|node| node.to_json()).transpose()?;
        Ok(json_object(
            [
                ("command", JsonValue::from(self.name())),
                ("target", JsonValue::from(self.target().as_str())),
            ]
            .into_iter()
            .chain(expression.map(|value| ("expression", value)))
            .chain(self.state().cloned().map(|value| ("state", value))),
        ))
    }
}
