// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{GraphNode, Node, Rewritable, Uri};
use tracing::trace;

use crate::{
    builtin::{is_builtin_identifier, is_reserved}, match_inline_lookup, ClientConfig, InlineLookupPolicy,
    ReactiveError, ResourceRegistry,
};

/// Chooses the final form of resource references and checks that every free parameter
/// can be resolved by the executor
pub struct ResourceResolver<'a> {
    config: &'a ClientConfig,
    registry: ResourceRegistry,
}
impl<'a> ResourceResolver<'a> {
    pub fn new(config: &'a ClientConfig, registry: ResourceRegistry) -> Self {
        Self { config, registry }
    }
    pub fn resolve(&self, node: &Node) -> Result<Node, ReactiveError> {
        if let Some(uri) = find_reserved_lookup(node) {
            return Err(ReactiveError::invalid_argument(
                "uri",
                format!("Identifier {} is within the reserved builtin namespace", uri),
            ));
        }
        let (node, registry) = match self.config.inline_lookups {
            InlineLookupPolicy::Defer => (node.clone(), None),
            InlineLookupPolicy::Bind => {
                let (node, registry) = self.bind_inline_lookups(node);
                (node, Some(registry))
            }
        };
        if self.config.validate_free_parameters {
            validate(&node, registry.as_ref().unwrap_or(&self.registry))?;
        }
        Ok(node)
    }
    fn bind_inline_lookups(&self, node: &Node) -> (Node, ResourceRegistry) {
        let mut registry = self.registry.clone();
        let result = node.substitute(&mut |node: &Node| {
            let (kind, uri) = match_inline_lookup(node)?;
            let uri = uri?;
            let call = node.match_method_call()?;
            trace!(bind_inline_lookup = %uri);
            registry.register(uri.clone(), kind);
            Some(Node::parameter(call.result_type().clone(), uri.as_str()))
        });
        (result.unwrap_or_else(|| node.clone()), registry)
    }
}

fn validate(node: &Node, registry: &ResourceRegistry) -> Result<(), ReactiveError> {
    if let Some(term) = find_capture(node) {
        return Err(ReactiveError::MalformedExpression {
            parameter: format!("{}", term),
            parameter_type: term.node_type(),
        });
    }
    let mut unresolved = node
        .free_parameters()
        .into_iter()
        .filter(|parameter| !is_resolvable(parameter.name(), registry))
        .collect::<Vec<_>>();
    unresolved.sort_by(|left, right| left.name().cmp(right.name()));
    match unresolved.into_iter().next() {
        Some(parameter) => Err(ReactiveError::MalformedExpression {
            parameter: String::from(parameter.name()),
            parameter_type: parameter.parameter_type().clone(),
        }),
        None => Ok(()),
    }
}

fn is_resolvable(identifier: &str, registry: &ResourceRegistry) -> bool {
    is_builtin_identifier(identifier)
        || Uri::parse(identifier)
            .map(|uri| registry.contains(&uri))
            .unwrap_or(false)
}

fn find_reserved_lookup(node: &Node) -> Option<&Uri> {
    match match_inline_lookup(node) {
        Some((_, Some(uri))) if is_reserved(uri) => Some(uri),
        _ => node.children().into_iter().find_map(find_reserved_lookup),
    }
}

fn find_capture(node: &Node) -> Option<&Node> {
    if !node.has_captures() {
        None
    } else if node.match_captured().is_some() {
        Some(node)
    } else {
        node.children().into_iter().find_map(find_capture)
    }
}

#[cfg(test)]
mod tests {
    use rivulet::{Type, Value};

    use super::*;
    use crate::{builtin::context_parameter, ResourceKind};

    fn uri(value: &str) -> Uri {
        Uri::parse(value).unwrap()
    }

    fn inline_lookup(value: &str) -> Node {
        Node::method_call(
            context_parameter(),
            "get_observable",
            vec![Type::Int],
            vec![Node::constant(Value::Uri(uri(value)), Type::Uri)],
            Type::observable(Type::Int),
        )
    }

    #[test]
    fn unknown_parameters_are_malformed() {
        let config = ClientConfig::default();
        let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
        let node = Node::parameter(Type::observable(Type::Int), "xs");
        assert_eq!(
            resolver.resolve(&node),
            Err(ReactiveError::MalformedExpression {
                parameter: String::from("xs"),
                parameter_type: Type::observable(Type::Int),
            })
        );
    }

    #[test]
    fn registered_parameters_resolve() {
        let config = ClientConfig::default();
        let mut registry = ResourceRegistry::default();
        registry.register(uri("xs"), ResourceKind::Observable);
        let resolver = ResourceResolver::new(&config, registry);
        let node = Node::parameter(Type::observable(Type::Int), "xs");
        assert_eq!(resolver.resolve(&node), Ok(node));
    }

    #[test]
    fn validation_can_be_disabled() {
        let config = ClientConfig::default().with_validation(false);
        let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
        let node = Node::parameter(Type::observable(Type::Int), "xs");
        assert_eq!(resolver.resolve(&node), Ok(node));
    }

    #[test]
    fn deferred_inline_lookups_are_left_for_the_executor() {
        let config = ClientConfig::default();
        let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
        let node = inline_lookup("xs");
        assert_eq!(resolver.resolve(&node), Ok(node));
    }

    #[test]
    fn bound_inline_lookups_become_parameters() {
        let config = ClientConfig::default().with_inline_lookups(InlineLookupPolicy::Bind);
        let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
        let node = Node::invoke(
            Node::parameter(Type::Opaque, "rx://builtin/filter"),
            vec![inline_lookup("xs")],
        );
        assert_eq!(
            resolver.resolve(&node),
            Ok(Node::invoke(
                Node::parameter(Type::Opaque, "rx://builtin/filter"),
                vec![Node::parameter(Type::observable(Type::Int), "xs")],
            ))
        );
    }

    #[test]
    fn reserved_inline_lookups_are_rejected() {
        let node = Node::invoke(
            Node::parameter(Type::Opaque, "rx://builtin/subscribe"),
            vec![inline_lookup("rx://builtin/subscribe")],
        );
        for policy in [InlineLookupPolicy::Defer, InlineLookupPolicy::Bind] {
            let config = ClientConfig::default()
                .with_inline_lookups(policy)
                .with_validation(false);
            let resolver = ResourceResolver::new(&config, ResourceRegistry::default());
            let result = resolver.resolve(&node);
            assert!(result.unwrap_err().is_invalid_argument());
        }
    }
}
