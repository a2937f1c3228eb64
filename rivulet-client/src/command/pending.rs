// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::marker::PhantomData;

use rivulet::{Node, Uri};
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::{materialize, ReactiveError, ResourceResolver};

use super::{Command, CommandKind, ExpressionCommand};

/// Expression still contains captured variables
pub struct Composing;
/// Captured variables have been replaced by constants
pub struct Materialized;
/// Resource references have been finalized and validated
pub struct Resolved;

pub struct PendingCommand<TPhase> {
    variant: fn(ExpressionCommand) -> Command,
    kind: CommandKind,
    command: ExpressionCommand,
    _phase: PhantomData<TPhase>,
}
impl<TPhase> PendingCommand<TPhase> {
    pub fn kind(&self) -> CommandKind {
        self.kind
    }
    pub fn target(&self) -> &Uri {
        &self.command.target
    }
    pub fn expression(&self) -> &Node {
        &self.command.expression
    }
    fn into_phase<TNext>(self, expression: Node) -> PendingCommand<TNext> {
        PendingCommand {
            variant: self.variant,
            kind: self.kind,
            command: ExpressionCommand {
                expression,
                ..self.command
            },
            _phase: PhantomData,
        }
    }
}
impl PendingCommand<Composing> {
    pub fn new(
        kind: CommandKind,
        target: Uri,
        expression: Node,
        state: Option<JsonValue>,
    ) -> Result<Self, ReactiveError> {
        let variant = Command::expression_variant(kind).ok_or_else(|| {
            ReactiveError::invalid_argument(
                "kind",
                format!("{} commands do not carry an expression", kind),
            )
        })?;
        Ok(Self {
            variant,
            kind,
            command: ExpressionCommand {
                target,
                expression,
                state,
            },
            _phase: PhantomData,
        })
    }
    pub fn materialize(self) -> PendingCommand<Materialized> {
        trace!(command_materialize = %self.kind);
        let expression = materialize(&self.command.expression);
        self.into_phase(expression)
    }
}
impl PendingCommand<Materialized> {
    pub fn resolve(
        self,
        resolver: &ResourceResolver,
    ) -> Result<PendingCommand<Resolved>, ReactiveError> {
        trace!(command_resolve = %self.kind);
        let expression = resolver.resolve(&self.command.expression)?;
        Ok(self.into_phase(expression))
    }
}
impl PendingCommand<Resolved> {
    pub fn build(self) -> Command {
        (self.variant)(self.command)
    }
}

#[cfg(test)]
mod tests {
    use rivulet::{GraphNode, Type};

    use super::*;
    use crate::{ClientConfig, Expr, IntoNode, ResourceRegistry, Variable};

    #[test]
    fn pipeline_materializes_then_resolves() {
        let value = Variable::new(3);
        let expression = (Expr::constant(1) + &value).into_node();
        let config = ClientConfig::default();
        let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
        let pending = PendingCommand::new(
            CommandKind::DefineObservable,
            Uri::parse("foo").unwrap(),
            expression,
            None,
        )
        .unwrap();
        assert!(pending.expression().has_captures());
        value.set(4);
        let command = pending.materialize().resolve(&resolver).unwrap().build();
        assert_eq!(command.kind(), CommandKind::DefineObservable);
        let expression = command.expression().unwrap();
        assert!(!expression.has_captures());
        assert_eq!(format!("{}", expression), "(+ 1 4)");
        assert_eq!(expression.node_type(), Type::Int);
    }

    #[test]
    fn teardown_kinds_are_rejected() {
        let result = PendingCommand::new(
            CommandKind::DeleteStream,
            Uri::parse("foo").unwrap(),
            Expr::constant(1).into_node(),
            None,
        );
        assert!(matches!(result, Err(ReactiveError::InvalidArgument { .. })));
    }
}
