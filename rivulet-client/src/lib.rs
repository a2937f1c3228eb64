// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
pub use argument::*;
pub use arity::*;
pub use artifact::*;
pub use capture::*;
pub use client::*;
pub use command::*;
pub use config::*;
pub use context::*;
pub use error::*;
pub use expr::*;
pub use handle::*;
pub use known::*;
pub use registry::*;
pub use resolve::*;
pub use sink::*;

pub mod builtin;

mod argument;
mod arity;
mod artifact;
mod capture;
mod client;
mod command;
mod config;
mod context;
mod error;
mod expr;
mod handle;
mod known;
mod query;
mod registry;
mod resolve;
mod sink;
