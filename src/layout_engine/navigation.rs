//! Focus and move bindings.
//!
//! Both navigators are pure: they read the snapshot and the focus history
//! and return commands. Moving a window into a secondary container that
//! does not exist yet needs a container to be created, which the caller
//! does.

use tracing::warn;

use super::monocle::{self, MonocleTarget};
use super::{Action, Backend, Command, Step};
use crate::model::{FocusHistory, Role, SavedLayouts, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FocusAction {
    Next,
    Prev,
    /// The last focused window of the other role.
    Other,
    /// The previously focused window.
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum MoveAction {
    Next,
    Prev,
    /// Into the other role.
    Other,
    /// Trade places with the last focused window of the other role.
    Swap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MovePlan {
    Commands(Vec<Command>),
    /// Build the secondary container around the focused window.
    CreateSecondary,
}

pub fn focus(
    snapshot: &Snapshot,
    action: FocusAction,
    history: &FocusHistory,
    saved: &mut SavedLayouts,
    backend: &Backend,
) -> Vec<Command> {
    let target = MonocleTarget::focused(snapshot);
    let in_monocle = monocle::enabled(snapshot, target);
    let mut commands = Vec::new();

    match action {
        FocusAction::Next | FocusAction::Prev => {
            let step = if action == FocusAction::Next { Step::Next } else { Step::Prev };
            let children = match target.role() {
                Some(role) if in_monocle => &snapshot.role(role).children,
                _ => &snapshot.tiled,
            };
            let len = children.len();
            if len > 1 {
                let index = position(children, snapshot.focused);
                commands.push(Command::on(children[step.apply(index, len)], Action::Focus));
            } else if in_monocle {
                commands.extend(monocle::disable(snapshot, target, saved, backend));
            }
        }
        FocusAction::Other => {
            if !snapshot.secondary.exists() {
                warn!("No other container to focus");
                return commands;
            }
            if in_monocle {
                commands.extend(monocle::disable(snapshot, target, saved, backend));
            }
            let other = match target.role() {
                Some(Role::Secondary) => Role::Main,
                _ => Role::Secondary,
            };
            match snapshot.role(other).focus {
                Some(id) => commands.push(Command::on(id, Action::Focus)),
                None => warn!(%other, "Other container has no focused window"),
            }
        }
        FocusAction::Toggle => {
            let previous = history.previous;
            let leaves_role = match (target.role(), previous) {
                (Some(role), Some(previous)) => !snapshot.role(role).contains(previous),
                _ => true,
            };
            if in_monocle && leaves_role {
                commands.extend(monocle::disable(snapshot, target, saved, backend));
            }
            match previous {
                Some(id) => commands.push(Command::on(id, Action::Focus)),
                None => warn!("No previously focused window"),
            }
        }
    }
    commands
}

/// Index of `focused` in `children`, or `children.len()` when absent.
fn position(children: &[crate::ipc::ConId], focused: Option<crate::ipc::ConId>) -> usize {
    focused
        .and_then(|id| children.iter().position(|c| *c == id))
        .unwrap_or(children.len())
}

pub fn move_window(snapshot: &Snapshot, action: MoveAction) -> MovePlan {
    let Some(focused) = snapshot.focused else {
        return MovePlan::Commands(Vec::new());
    };
    let commands = match action {
        MoveAction::Next | MoveAction::Prev => move_within(snapshot, action, focused),
        MoveAction::Other => return move_other(snapshot, focused),
        MoveAction::Swap => swap(snapshot, focused),
    };
    MovePlan::Commands(commands)
}

/// Moves the window one step inside its container, never past its edge.
fn move_within(snapshot: &Snapshot, action: MoveAction, focused: crate::ipc::ConId) -> Vec<Command> {
    let (layout, children) = match snapshot.role_of(focused) {
        Some(role) => (snapshot.role(role).layout, &snapshot.role(role).children),
        None => (snapshot.workspace_layout, &snapshot.tiled),
    };
    let (step, edge) = match action {
        MoveAction::Next => (Step::Next, children.last()),
        _ => (Step::Prev, children.first()),
    };
    match edge {
        Some(&edge) if edge != focused => vec![Command::new(Action::Move(step.movement(layout)))],
        _ => Vec::new(),
    }
}

fn move_other(snapshot: &Snapshot, focused: crate::ipc::ConId) -> MovePlan {
    let main = &snapshot.main;
    let secondary = &snapshot.secondary;
    let mut commands = Vec::new();

    if main.contains(focused) {
        match (main.children.len(), secondary.container_id) {
            // Swap rather than move so main never ends up empty.
            (1, Some(_)) => {
                if let Some(&first) = secondary.children.first() {
                    commands.push(Command::on(first, Action::Focus));
                    commands.push(Command::new(Action::SwapWith(focused)));
                }
            }
            (1, None) => {}
            (_, Some(_)) => {
                commands.push(Command::on(focused, Action::MoveToMark(secondary.mark.clone())));
                if let Some(main_id) = main.container_id {
                    commands.push(Command::on(main_id, Action::Focus));
                    commands.push(Command::new(Action::FocusChild));
                }
            }
            (_, None) => return MovePlan::CreateSecondary,
        }
    } else if main.exists() {
        commands.push(Command::on(focused, Action::MoveToMark(main.mark.clone())));
        if let Some(secondary_id) = secondary.container_id {
            commands.push(Command::on(secondary_id, Action::Focus));
            commands.push(Command::new(Action::FocusChild));
        }
    }
    MovePlan::Commands(commands)
}

fn swap(snapshot: &Snapshot, focused: crate::ipc::ConId) -> Vec<Command> {
    let Some(secondary_focus) = snapshot.secondary.focus else {
        return Vec::new();
    };
    let mut commands = Vec::new();
    if snapshot.secondary.contains(focused) {
        match snapshot.main.focus {
            Some(main_focus) => commands.push(Command::on(main_focus, Action::Focus)),
            None => return commands,
        }
    }
    commands.push(Command::new(Action::SwapWith(secondary_focus)));
    commands.push(Command::on(secondary_focus, Action::Focus));
    commands
}
