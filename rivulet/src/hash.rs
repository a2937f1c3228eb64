// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::hash::{Hash, Hasher};

pub use fnv::{FnvHashMap, FnvHashSet, FnvHasher};

pub type HashId = u64;

pub fn hash_object(value: &impl Hash) -> HashId {
    let mut hasher = FnvHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

pub fn hash_sequence(values: impl IntoIterator<Item = HashId>) -> HashId {
    values
        .into_iter()
        .fold(FnvHasher::default(), |mut hasher, value| {
            hasher.write_u64(value);
            hasher
        })
        .finish()
}
