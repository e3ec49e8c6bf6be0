// Console registry: variables and commands, names case-insensitive.
//
// Delegates are stored with an epoch. Callers take a delegate out, run it
// with no borrow held, and put it back only if the slot's epoch is unchanged
// (the delegate was not replaced or cleared while it ran).

use std::collections::HashMap;

use uflat_ffi::ConsoleObjectHandle;

use crate::console_value::ConsoleValue;
use crate::engine::{CommandDelegate, NativeDelegate};

pub(crate) enum ConsoleEntryKind {
    Variable { value: ConsoleValue, on_changed: Option<NativeDelegate> },
    Command { handler: Option<CommandDelegate> },
}

pub(crate) struct ConsoleEntry {
    pub name: String,
    pub help: String,
    pub read_only: bool,
    pub epoch: u64,
    pub kind: ConsoleEntryKind,
}

#[derive(Default)]
pub(crate) struct ConsoleRegistry {
    slots: Vec<Option<ConsoleEntry>>,
    by_name: HashMap<String, usize>,
    next_epoch: u64,
}

impl ConsoleRegistry {
    fn key(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    fn bump(&mut self) -> u64 {
        self.next_epoch += 1;
        self.next_epoch
    }

    pub fn handle(index: usize) -> ConsoleObjectHandle {
        ConsoleObjectHandle::from_addr(index + 1)
    }

    fn index(handle: ConsoleObjectHandle) -> Option<usize> {
        handle.to_addr().checked_sub(1)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.by_name.get(&Self::key(name)).copied()
    }

    pub fn entry(&self, handle: ConsoleObjectHandle) -> Option<&ConsoleEntry> {
        self.slots.get(Self::index(handle)?)?.as_ref()
    }

    pub fn entry_mut(&mut self, handle: ConsoleObjectHandle) -> Option<&mut ConsoleEntry> {
        self.slots.get_mut(Self::index(handle)?)?.as_mut()
    }

    /// Register a new entry. A name already taken yields the null handle.
    pub fn register(&mut self, name: &str, help: &str, read_only: bool, kind: ConsoleEntryKind) -> ConsoleObjectHandle {
        if name.trim().is_empty() || self.find(name).is_some() {
            return ConsoleObjectHandle::null();
        }
        let epoch = self.bump();
        let index = self.slots.len();
        self.slots.push(Some(ConsoleEntry {
            name: name.to_string(),
            help: help.to_string(),
            read_only,
            epoch,
            kind,
        }));
        self.by_name.insert(Self::key(name), index);
        Self::handle(index)
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        match self.by_name.remove(&Self::key(name)) {
            Some(index) => {
                self.slots[index] = None;
                true
            }
            None => false,
        }
    }

    /// Store a variable's value, coerced to the variable's type. Returns the
    /// on-changed delegate (taken out of its slot) and the slot epoch.
    pub fn set_value(
        &mut self,
        handle: ConsoleObjectHandle,
        value: ConsoleValue,
    ) -> Option<(Option<NativeDelegate>, u64)> {
        let entry = self.entry_mut(handle)?;
        let epoch = entry.epoch;
        match &mut entry.kind {
            ConsoleEntryKind::Variable { value: current, on_changed } => {
                *current = value.coerce(current.value_type());
                Some((on_changed.take(), epoch))
            }
            ConsoleEntryKind::Command { .. } => None,
        }
    }

    pub fn replace_variable_delegate(&mut self, handle: ConsoleObjectHandle, delegate: Option<NativeDelegate>) {
        let epoch = self.bump();
        if let Some(entry) = self.entry_mut(handle) {
            if let ConsoleEntryKind::Variable { on_changed, .. } = &mut entry.kind {
                *on_changed = delegate;
                entry.epoch = epoch;
            }
        }
    }

    pub fn restore_variable_delegate(&mut self, handle: ConsoleObjectHandle, epoch: u64, delegate: NativeDelegate) {
        if let Some(entry) = self.entry_mut(handle).filter(|e| e.epoch == epoch) {
            if let ConsoleEntryKind::Variable { on_changed: slot @ None, .. } = &mut entry.kind {
                *slot = Some(delegate);
            }
        }
    }

    pub fn take_command(&mut self, index: usize) -> Option<(CommandDelegate, u64)> {
        let entry = self.slots.get_mut(index)?.as_mut()?;
        match &mut entry.kind {
            ConsoleEntryKind::Command { handler } => handler.take().map(|h| (h, entry.epoch)),
            ConsoleEntryKind::Variable { .. } => None,
        }
    }

    pub fn restore_command(&mut self, index: usize, epoch: u64, delegate: CommandDelegate) {
        let Some(entry) = self.slots.get_mut(index).and_then(Option::as_mut) else {
            return;
        };
        if entry.epoch != epoch {
            return;
        }
        if let ConsoleEntryKind::Command { handler: slot @ None } = &mut entry.kind {
            *slot = Some(delegate);
        }
    }
}

/// Split a console line into its name and arguments.
pub(crate) fn split_line(line: &str) -> Option<(&str, Vec<String>)> {
    let mut parts = line.split_whitespace();
    let name = parts.next()?;
    Some((name, parts.map(str::to_string).collect()))
}
