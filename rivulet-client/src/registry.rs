// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use rivulet::Uri;

use crate::ResourceKind;

/// Persistent map of the resources a client has looked up, defined or created
#[derive(Default, Eq, PartialEq, Clone, Debug)]
pub struct ResourceRegistry {
    entries: im::HashMap<Uri, ResourceKind>,
}
impl ResourceRegistry {
    pub fn contains(&self, uri: &Uri) -> bool {
        self.entries.contains_key(uri)
    }
    pub fn kind(&self, uri: &Uri) -> Option<ResourceKind> {
        self.entries.get(uri).copied()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn register(&mut self, uri: Uri, kind: ResourceKind) -> Option<ResourceKind> {
        self.entries.insert(uri, kind)
    }
    pub fn unregister(&mut self, uri: &Uri) -> Option<ResourceKind> {
        self.entries.remove(uri)
    }
    pub fn with(&self, uri: Uri, kind: ResourceKind) -> Self {
        Self {
            entries: self.entries.update(uri, kind),
        }
    }
    pub fn iter(&self) -> impl Iterator<Item = (&Uri, ResourceKind)> + '_ {
        self.entries.iter().map(|(uri, kind)| (uri, *kind))
    }
}
