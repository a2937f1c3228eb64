// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::{Node, Uri};

use crate::{
    builtin::{is_reserved, CONTEXT_PARAMETER},
    Observable, ObservableHandle, Observer, ObserverHandle, ResourceKind, Stream,
    StreamFactoryHandle, Subscription, SubscriptionFactoryHandle,
};

/// Artifacts that may refer to a resource the executor already knows by identifier
pub trait KnownResource {
    fn known_uri(&self) -> Option<Uri>;
    fn is_known(&self) -> bool {
        self.known_uri().is_some()
    }
}

pub fn known_uri(node: &Node) -> Option<Uri> {
    match node.match_invoke() {
        Some(term) => resource_uri(term.target()),
        None => resource_uri(node),
    }
}

fn resource_uri(node: &Node) -> Option<Uri> {
    match node.match_parameter() {
        Some(term) => Uri::parse(term.name())
            .ok()
            .filter(|uri| !is_reserved(uri)),
        None => match_inline_lookup(node)
            .and_then(|(_, uri)| uri)
            .filter(|uri| !is_reserved(uri))
            .cloned(),
    }
}

/// Recognises `context.get_*(uri)` lookup calls, returning the looked-up kind and constant identifier
pub fn match_inline_lookup(node: &Node) -> Option<(ResourceKind, Option<&Uri>)> {
    let term = node.match_method_call()?;
    let receiver = term.receiver().match_parameter()?;
    if receiver.name() != CONTEXT_PARAMETER {
        return None;
    }
    let kind = ResourceKind::from_lookup_method(term.method())?;
    match term.args() {
        [uri] => Some((
            kind,
            uri.match_constant().and_then(|term| term.value().match_uri()),
        )),
        _ => None,
    }
}

macro_rules! impl_known_resource {
    ($target:ident $(<$($T:ident),*>)?) => {
        impl$(<$($T),*>)? KnownResource for $target$(<$($T),*>)? {
            fn known_uri(&self) -> Option<Uri> {
                known_uri(self.node())
            }
        }
    };
}

impl_known_resource!(Observable<T>);
impl_known_resource!(Observer<T>);
impl_known_resource!(Stream<TIn, TOut>);
impl_known_resource!(Subscription);
impl_known_resource!(ObservableHandle<P, R>);
impl_known_resource!(ObserverHandle<P, T>);
impl_known_resource!(StreamFactoryHandle<P, TIn, TOut>);
impl_known_resource!(SubscriptionFactoryHandle<P>);
