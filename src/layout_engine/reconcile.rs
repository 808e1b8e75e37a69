//! Keeping main and secondary consistent after the tree changed under us.
//!
//! Each planner looks at a snapshot taken after the event and says which
//! containers to create, whether leftover windows should be moved into
//! secondary afterwards, and which commands to run last. The reactor carries
//! out the plan in that order with fresh snapshots in between.

use tracing::debug;

use super::{Action, Command};
use crate::ipc::{ConId, Node};
use crate::model::{Role, SavedLayouts, Snapshot};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Containers to create, in order. `None` builds around the focused
    /// window.
    pub create: Vec<(Role, Option<ConId>)>,
    /// Move every unmanaged window into secondary once the containers exist.
    pub attach_unmanaged: bool,
    pub commands: Vec<Command>,
}

impl Reconciliation {
    pub fn is_empty(&self) -> bool {
        self.create.is_empty() && !self.attach_unmanaged && self.commands.is_empty()
    }

    fn bootstrap(first: ConId, second: ConId) -> Self {
        Self {
            create: vec![(Role::Main, Some(first)), (Role::Secondary, Some(second))],
            ..Default::default()
        }
    }
}

/// A window was opened. New windows always end up in secondary.
pub fn on_new_window(snapshot: &Snapshot, window: &Node, bar_prefix: &str) -> Reconciliation {
    let is_bar = window.name.as_deref().is_some_and(|name| name.starts_with(bar_prefix));
    if snapshot.is_manual() || is_bar || window.is_floating() || snapshot.tiled.len() < 2 {
        return Reconciliation::default();
    }

    let mut plan = Reconciliation::default();
    if !snapshot.main.exists() {
        plan.create.push((Role::Main, Some(snapshot.tiled[0])));
        if !snapshot.secondary.exists() {
            plan.create.push((Role::Secondary, Some(snapshot.tiled[1])));
        }
        if let Some(focused) = snapshot.focused {
            plan.commands.push(Command::on(focused, Action::Focus));
        }
    } else if !snapshot.secondary.exists() {
        plan.create.push((Role::Secondary, None));
    } else if let Some(focused) = snapshot.focused
        && snapshot.main.contains(focused)
    {
        plan.commands.push(Command::on(focused, Action::MoveToMark(snapshot.secondary.mark.clone())));
        plan.commands.push(Command::on(focused, Action::Focus));
    }
    debug!(?plan, "New window");
    plan
}

/// Restores a main container after it vanished while secondary still has
/// windows.
///
/// A secondary with one window is renamed to main. Otherwise its first
/// window becomes the seed of a new main, optionally refocused afterwards.
pub fn repair(snapshot: &Snapshot, refocus: bool) -> Reconciliation {
    let mut plan = Reconciliation::default();
    if snapshot.is_manual() || snapshot.main.exists() {
        return plan;
    }
    let Some(secondary) = snapshot.secondary.container_id else {
        return plan;
    };

    if snapshot.secondary.children.len() == 1 {
        plan.commands.push(Command::on(secondary, Action::Unmark(Some(snapshot.secondary.mark.clone()))));
        plan.commands.push(Command::on(secondary, Action::Mark(snapshot.main.mark.clone())));
    } else if let Some(&first) = snapshot.secondary.children.first() {
        plan.create.push((Role::Main, Some(first)));
        if refocus {
            plan.commands.push(Command::on(first, Action::Focus));
        }
    }
    debug!(?plan, "Repairing main");
    plan
}

pub fn on_close(snapshot: &Snapshot, window: &Node) -> Reconciliation {
    if window.is_floating() {
        return Reconciliation::default();
    }
    repair(snapshot, true)
}

pub fn on_move(snapshot: &Snapshot) -> Reconciliation { repair(snapshot, false) }

/// A window was floated or sunk back into the tiling.
pub fn on_floating(snapshot: &Snapshot, window: &Node) -> Reconciliation {
    if snapshot.is_manual() {
        return Reconciliation::default();
    }
    if window.is_floating() {
        return repair(snapshot, false);
    }

    let mut plan = Reconciliation::default();
    if snapshot.secondary.exists() {
        plan.commands.push(Command::new(Action::MoveToMark(snapshot.secondary.mark.clone())));
    } else if snapshot.main.exists() {
        plan.create.push((Role::Secondary, None));
    } else if let [first, second, ..] = snapshot.unmanaged[..] {
        plan = Reconciliation::bootstrap(first, second);
        plan.attach_unmanaged = true;
    }
    plan
}

/// A workspace gained focus. Folds windows that arrived while the controller
/// was not looking into the roles.
pub fn on_workspace_focus(snapshot: &Snapshot, saved: &mut SavedLayouts) -> Reconciliation {
    if snapshot.is_manual() {
        return Reconciliation::default();
    }
    saved.ensure(&snapshot.workspace_name);
    let Some(&first) = snapshot.unmanaged.first() else {
        return Reconciliation::default();
    };

    let mut plan = if snapshot.secondary.exists() {
        // The rest is folded into secondary. A missing main is rebuilt
        // around the first stray window so secondary keeps its windows.
        let mut plan = Reconciliation::default();
        if !snapshot.main.exists() {
            plan.create.push((Role::Main, Some(first)));
        }
        plan
    } else if snapshot.main.exists() {
        Reconciliation { create: vec![(Role::Secondary, Some(first))], ..Default::default() }
    } else if let [_, second, ..] = snapshot.unmanaged[..] {
        Reconciliation::bootstrap(first, second)
    } else {
        Reconciliation::default()
    };
    plan.attach_unmanaged = true;
    debug!(workspace = %snapshot.workspace_name, ?plan, "Workspace focus");
    plan
}

/// Moves every unmanaged window into secondary. Needs a snapshot taken
/// after the containers were created.
pub fn attach_unmanaged(snapshot: &Snapshot) -> Vec<Command> {
    if !snapshot.secondary.exists() {
        return Vec::new();
    }
    snapshot
        .unmanaged
        .iter()
        .map(|&id| Command::on(id, Action::MoveToMark(snapshot.secondary.mark.clone())))
        .collect()
}
