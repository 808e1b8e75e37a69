//! Creating the main or secondary container around a window.
//!
//! Creation takes two round trips. [`extract`] splits the target out of
//! wherever it lives. The manager assigns the id of the new split, so the
//! caller has to read the tree again before [`mark`] can name it.

use tracing::debug;

use super::{Action, Command, Direction, Layout, LayoutError, Orientation};
use crate::ipc::ConId;
use crate::model::{Role, Snapshot};

const SPLIT_RATIO_PPT: u32 = 50;

/// First phase of container creation.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    /// The window the new container is built around.
    pub target: ConId,
    pub commands: Vec<Command>,
}

/// Splits `target` (or the focused window) so that it sits in a fresh
/// container of its own.
///
/// Fails without producing commands when `role` already has a container.
pub fn extract(
    snapshot: &Snapshot,
    role: Role,
    target: Option<ConId>,
) -> Result<SplitPlan, LayoutError> {
    if snapshot.role(role).exists() {
        return Err(LayoutError::ContainerExists(role));
    }
    let target = target.or(snapshot.focused).ok_or(LayoutError::NoTarget)?;

    let mut commands = Vec::new();
    if Some(target) != snapshot.focused {
        commands.push(Command::on(target, Action::Focus));
    }
    commands.push(Command::on(target, Action::Unmark(None)));

    let source = role.other();
    if snapshot.role(source).contains(target) {
        if snapshot.global.exists() {
            commands.push(Command::new(Action::MoveToMark(snapshot.global.mark.clone())));
            commands.push(Command::new(Action::Split(Orientation::Vertical)));
        } else {
            commands.extend(walk_out_of(snapshot, source, target));
        }
    } else {
        commands.push(Command::on(target, Action::Split(Orientation::Vertical)));
    }

    debug!(%role, target, count = commands.len(), "Planned container split");
    Ok(SplitPlan { target, commands })
}

/// Moves the focused `target` step by step to the edge of the `source`
/// container and one step beyond, then splits it perpendicular to the
/// workspace.
///
/// Main is left towards the end of the workspace axis, secondary towards the
/// start. Both directions only count steps when main's layout runs along
/// the exit direction, and they count differently.
fn walk_out_of(snapshot: &Snapshot, source: Role, target: ConId) -> Vec<Command> {
    let workspace_axis = if snapshot.workspace_layout.is_vertical_family() {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let record = snapshot.role(source);
    let len = record.children.len();
    let index = record.index_of(target).unwrap_or(len);
    let gated = runs_along(snapshot.main.layout, workspace_axis);

    let (exit, steps) = match source {
        Role::Main => (Direction::forward(workspace_axis), if gated { len - index } else { 0 }),
        Role::Secondary => (Direction::backward(workspace_axis), if gated { index + 1 } else { 0 }),
    };

    let mut commands = vec![Command::new(Action::Move(exit)); steps + 1];
    commands.push(Command::new(Action::Split(workspace_axis.perpendicular())));
    commands.push(Command::new(Action::ResizeSet { axis: workspace_axis, ppt: SPLIT_RATIO_PPT }));
    commands
}

fn runs_along(layout: Layout, axis: Orientation) -> bool {
    match axis {
        Orientation::Horizontal => layout.is_horizontal_family(),
        Orientation::Vertical => layout.is_vertical_family(),
    }
}

/// Second phase of container creation: names the split now enclosing
/// `target` and files it under the global container.
pub fn mark(snapshot: &Snapshot, role: Role, target: ConId) -> Result<Vec<Command>, LayoutError> {
    let parent = snapshot.find_parent_id(target).ok_or(LayoutError::ParentNotFound(target))?;

    let mut commands = vec![Command::on(parent, Action::Mark(role.mark(&snapshot.workspace_name)))];
    if snapshot.global.exists() {
        commands.push(Command::on(parent, Action::MoveToMark(snapshot.global.mark.clone())));
        if role == Role::Main
            && let Some(secondary) = snapshot.secondary.container_id
        {
            commands.push(Command::on(parent, Action::SwapWith(secondary)));
        }
    }
    Ok(commands)
}
