//! Monocle mode: one role shown fullscreen over the rest of the workspace.
//!
//! The fullscreen flag of the role container is the mode flag. A window
//! outside both roles falls back to plain fullscreen.

use super::{Action, Backend, Command, FullscreenMode, Layout, opacity, tabbed};
use crate::ipc::ConId;
use crate::model::{Role, SavedLayouts, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonocleTarget {
    /// The window is in neither role.
    Workspace,
    Role(Role),
}

impl MonocleTarget {
    /// The target for the role holding `id`.
    pub fn of(snapshot: &Snapshot, id: ConId) -> Self {
        snapshot.role_of(id).map_or(MonocleTarget::Workspace, MonocleTarget::Role)
    }

    pub fn focused(snapshot: &Snapshot) -> Self {
        snapshot.focused.map_or(MonocleTarget::Workspace, |id| Self::of(snapshot, id))
    }

    pub fn role(self) -> Option<Role> {
        match self {
            MonocleTarget::Workspace => None,
            MonocleTarget::Role(role) => Some(role),
        }
    }
}

pub fn enabled(snapshot: &Snapshot, target: MonocleTarget) -> bool {
    match target {
        MonocleTarget::Workspace => snapshot.fullscreen,
        MonocleTarget::Role(role) => {
            let record = snapshot.role(role);
            record.exists() && record.is_fullscreen()
        }
    }
}

pub fn enable(
    snapshot: &Snapshot,
    target: MonocleTarget,
    saved: &mut SavedLayouts,
    backend: &Backend,
) -> Vec<Command> {
    if enabled(snapshot, target) {
        return Vec::new();
    }
    let role = match target {
        MonocleTarget::Workspace => {
            return vec![Command::new(Action::Fullscreen(FullscreenMode::Enable))];
        }
        MonocleTarget::Role(role) => role,
    };
    let record = snapshot.role(role);
    let Some(container) = record.container_id else {
        return Vec::new();
    };

    saved.save(snapshot, role);
    let mut commands = Vec::new();
    // Tabs keep the hidden siblings in a coherent stack behind the
    // fullscreen container.
    if record.layout != Layout::Tabbed && record.children.len() > 1 {
        commands.push(Command::new(Action::SetLayout(Layout::Tabbed)));
        commands.extend(opacity::for_role(record, Layout::Tabbed, snapshot.focused, backend));
    }
    commands.push(Command::on(container, Action::Fullscreen(FullscreenMode::Toggle)));
    if !backend.variant.is_sway() {
        commands.push(Command::new(Action::FocusChild));
    }
    commands
}

pub fn disable(
    snapshot: &Snapshot,
    target: MonocleTarget,
    saved: &mut SavedLayouts,
    backend: &Backend,
) -> Vec<Command> {
    if !enabled(snapshot, target) {
        return Vec::new();
    }
    match target {
        MonocleTarget::Workspace => vec![Command::new(Action::Fullscreen(FullscreenMode::Disable))],
        MonocleTarget::Role(role) => {
            let mut commands = tabbed::restore_layout(snapshot, saved, role, backend);
            if let Some(container) = snapshot.role(role).container_id {
                commands.push(Command::on(container, Action::Fullscreen(FullscreenMode::Toggle)));
            }
            commands
        }
    }
}

pub fn toggle(
    snapshot: &Snapshot,
    target: MonocleTarget,
    saved: &mut SavedLayouts,
    backend: &Backend,
) -> Vec<Command> {
    if enabled(snapshot, target) {
        disable(snapshot, target, saved, backend)
    } else {
        enable(snapshot, target, saved, backend)
    }
}
