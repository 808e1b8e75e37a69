//! Grouped tabbed mode: main and secondary shown as tabs of one container.
//!
//! The mode is read from the live layouts and never stored. It is on when
//! the workspace or the global container is tabbed.

use tracing::debug;

use super::{Action, Backend, Command, Layout, monocle, opacity};
use crate::model::{Role, SavedLayouts, Snapshot};

#[derive(Debug, Clone, PartialEq)]
pub enum TabbedToggle {
    /// The workspace is not dynamically tiled.
    Skip,
    /// The focused role is in monocle mode, which takes precedence.
    Monocle,
    Enable(Vec<Command>),
    Disable(Vec<Command>),
}

pub fn is_enabled(snapshot: &Snapshot) -> bool {
    snapshot.workspace_layout == Layout::Tabbed || snapshot.global.layout == Layout::Tabbed
}

pub fn toggle(snapshot: &Snapshot, saved: &mut SavedLayouts, backend: &Backend) -> TabbedToggle {
    if snapshot.is_manual() {
        return TabbedToggle::Skip;
    }
    if monocle::enabled(snapshot, monocle::MonocleTarget::focused(snapshot)) {
        return TabbedToggle::Monocle;
    }
    if is_enabled(snapshot) {
        TabbedToggle::Disable(disable(snapshot, saved, backend))
    } else {
        TabbedToggle::Enable(enable(snapshot, saved))
    }
}

/// Remembers the layout of each role and turns both into tabs.
///
/// Does nothing when tabbed mode is already on.
pub fn enable(snapshot: &Snapshot, saved: &mut SavedLayouts) -> Vec<Command> {
    if snapshot.is_manual() || is_enabled(snapshot) {
        return Vec::new();
    }
    let mut commands = Vec::new();
    for role in Role::ALL {
        let record = snapshot.role(role);
        if !record.exists() {
            continue;
        }
        saved.save(snapshot, role);
        if let Some(&first) = record.children.first() {
            commands.push(Command::on(first, Action::SetLayout(Layout::Tabbed)));
        }
    }
    if let Some(secondary) = snapshot.secondary.container_id {
        commands.push(Command::on(secondary, Action::SetLayout(Layout::Tabbed)));
    }
    debug!(workspace = %snapshot.workspace_name, count = commands.len(), "Enabling tabbed mode");
    commands
}

/// Marks the container that now encloses main and secondary, for managers
/// that leave it unnamed. Needs a snapshot taken after the split exists.
pub fn mark_global(snapshot: &Snapshot) -> Option<Command> {
    if snapshot.global.exists() {
        return None;
    }
    let first = snapshot.first_descendant?;
    Some(Command::on(first, Action::Mark(snapshot.global.mark.clone())))
}

/// Splits secondary away from main again and restores the saved layouts.
pub fn disable(snapshot: &Snapshot, saved: &mut SavedLayouts, backend: &Backend) -> Vec<Command> {
    if !is_enabled(snapshot) {
        return Vec::new();
    }
    let mut commands = Vec::new();
    if let Some(secondary) = snapshot.secondary.container_id {
        commands.push(Command::on(secondary, Action::LayoutToggleSplit));
    }
    for role in Role::ALL {
        commands.extend(restore_layout(snapshot, saved, role, backend));
    }
    debug!(workspace = %snapshot.workspace_name, count = commands.len(), "Disabling tabbed mode");
    commands
}

/// Puts `role` back into the layout it had before tabbed or monocle mode.
pub fn restore_layout(
    snapshot: &Snapshot,
    saved: &mut SavedLayouts,
    role: Role,
    backend: &Backend,
) -> Vec<Command> {
    let record = snapshot.role(role);
    if !record.exists() {
        return Vec::new();
    }
    let layout = saved.get(&snapshot.workspace_name, role);
    if record.layout == layout {
        return Vec::new();
    }
    let Some(&first) = record.children.first() else {
        return Vec::new();
    };
    let mut commands = vec![Command::on(first, Action::SetLayout(layout))];
    commands.extend(opacity::for_role(record, layout, snapshot.focused, backend));
    commands
}
