//! State that outlives a single event.
//!
//! Owned by the reactor and passed explicitly into everything that reads or
//! writes it. Handlers never overlap, so there is no locking.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::snapshot::{Role, Snapshot};
use crate::common::collections::HashMap;
use crate::ipc::{ConId, Variant};
use crate::layout_engine::Layout;

/// Layouts of main and secondary before entering tabbed or monocle mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedLayout {
    pub main: Layout,
    pub secondary: Layout,
}

impl Default for SavedLayout {
    fn default() -> Self {
        Self {
            main: Layout::SplitV,
            secondary: Layout::SplitV,
        }
    }
}

impl SavedLayout {
    pub fn get(&self, role: Role) -> Layout {
        match role {
            Role::Main => self.main,
            Role::Secondary => self.secondary,
        }
    }

    fn set(&mut self, role: Role, layout: Layout) {
        match role {
            Role::Main => self.main = layout,
            Role::Secondary => self.secondary = layout,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedLayouts(HashMap<String, SavedLayout>);

impl SavedLayouts {
    /// Makes sure `workspace` has an entry, defaulting both roles to splitv.
    pub fn ensure(&mut self, workspace: &str) -> &mut SavedLayout {
        self.0.entry(workspace.to_string()).or_default()
    }

    /// Remembers the live layout of `role`, if that role exists.
    pub fn save(&mut self, snapshot: &Snapshot, role: Role) {
        let entry = self.ensure(&snapshot.workspace_name);
        let record = snapshot.role(role);
        if record.exists() {
            trace!(workspace = %snapshot.workspace_name, %role, layout = ?record.layout, "Saving layout");
            entry.set(role, record.layout);
        }
    }

    pub fn get(&mut self, workspace: &str, role: Role) -> Layout { self.ensure(workspace).get(role) }
}

/// The previously and currently focused window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FocusHistory {
    pub previous: Option<ConId>,
    pub current: Option<ConId>,
}

impl FocusHistory {
    pub fn record(&mut self, id: ConId) {
        self.previous = self.current;
        self.current = Some(id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub saved_layouts: SavedLayouts,
    pub focus: FocusHistory,
    pub variant: Variant,
}

impl Session {
    pub fn new(variant: Variant) -> Self {
        Self { variant, ..Default::default() }
    }
}
