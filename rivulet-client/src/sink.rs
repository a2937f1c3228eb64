// SPDX-FileCopyrightText: 2023 Marshall Wace <opensource@mwam.com>
// SPDX-License-Identifier: Apache-2.0
// SPDX-FileContributor: Tim Kendrick <t.kendrick@mwam.com> https://github.com/timkendrickmw
use std::sync::{Arc, Mutex, PoisonError};

use crate::Command;

/// Receiver for fully-built commands, typically the channel to a remote executor
pub trait CommandSink {
    fn submit(&self, command: Command);
    fn submit_batch(&self, commands: Vec<Command>) {
        for command in commands {
            self.submit(command)
        }
    }
}
impl<'a, T: CommandSink + ?Sized> CommandSink for &'a T {
    fn submit(&self, command: Command) {
        (**self).submit(command)
    }
}
impl<T: CommandSink + ?Sized> CommandSink for Arc<T> {
    fn submit(&self, command: Command) {
        (**self).submit(command)
    }
}

#[derive(Default, Debug)]
pub struct RecordingSink {
    commands: Mutex<Vec<Command>>,
}
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn commands(&self) -> Vec<Command> {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
    pub fn len(&self) -> usize {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn take(&self) -> Vec<Command> {
        std::mem::take(&mut *self.commands.lock().unwrap_or_else(PoisonError::into_inner))
    }
}
impl CommandSink for RecordingSink {
    fn submit(&self, command: Command) {
        self.commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command)
    }
}
