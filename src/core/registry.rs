//! # Action registry.
//!
//! Holds registered actions in registration order. Each entry carries its final
//! name and its registration index (`0..len`, never reused).
//!
//! ## Naming
//! ```text
//! add(Some(name), action)  → name
//! add(None, action)        → action.name()  (declared)
//!                          → "<anonymous_prefix>-<index>"
//! ```
//!
//! ## Rules
//! - No uniqueness check on names.
//! - Entries are immutable once added; there is no update/remove.
//! - `snapshot()` clones handles only (`Arc`), so a run never holds the registry lock.

use std::sync::Arc;

use crate::actions::ActionRef;
use crate::core::config::SequenceConfig;

/// One registered action.
#[derive(Clone)]
pub(crate) struct Entry {
    pub(crate) name: Arc<str>,
    pub(crate) index: usize,
    pub(crate) action: ActionRef,
}

impl Entry {
    pub(crate) fn info(&self) -> ActionInfo {
        ActionInfo {
            name: Arc::clone(&self.name),
            index: self.index,
        }
    }
}

/// Public view of a registered action: its name and registration index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionInfo {
    /// Final name (explicit, declared, or synthesized).
    pub name: Arc<str>,
    /// 0-based registration index.
    pub index: usize,
}

/// Registered actions in registration order.
#[derive(Default)]
pub(crate) struct Registry {
    entries: Vec<Entry>,
}

impl Registry {
    /// Appends an action and returns its registration index.
    pub(crate) fn add(
        &mut self,
        name: Option<String>,
        action: ActionRef,
        cfg: &SequenceConfig,
    ) -> usize {
        let index = self.entries.len();
        let name: Arc<str> = match name {
            Some(n) => n.into(),
            None => match action.name() {
                Some(declared) => declared.into(),
                None => cfg.anonymous_name(index).into(),
            },
        };
        self.entries.push(Entry {
            name,
            index,
            action,
        });
        index
    }

    /// Copy of all entries, in registration order.
    pub(crate) fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    pub(crate) fn infos(&self) -> Vec<ActionInfo> {
        self.entries.iter().map(Entry::info).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
