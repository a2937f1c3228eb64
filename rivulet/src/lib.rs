// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
pub mod hash;
pub mod node;
pub mod serialize;
pub mod types;
pub mod uri;
pub mod value;

pub use node::{GraphNode, Node, Rewritable, Term};
pub use serialize::SerializeJson;
pub use types::Type;
pub use uri::{Uri, UriError};
pub use value::Value;
