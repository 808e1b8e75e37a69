//! Whole-workspace rearrangements: mirror, reflect and the kill guard.

use super::{Action, Backend, Command, Layout, Orientation};
use crate::model::{Role, Snapshot};

/// Swaps main and secondary.
pub fn mirror(snapshot: &Snapshot) -> Vec<Command> {
    if snapshot.is_manual() {
        return Vec::new();
    }
    match (snapshot.main.container_id, snapshot.secondary.container_id) {
        (Some(main), Some(secondary)) => vec![Command::on(main, Action::SwapWith(secondary))],
        _ => Vec::new(),
    }
}

/// First step of reflect: flips secondary between beside and below main.
///
/// On i3 the flip creates an unnamed split around both roles, which the
/// caller marks with [`super::tabbed::mark_global`] from a fresh snapshot.
pub fn reflect(snapshot: &Snapshot) -> Vec<Command> {
    if snapshot.is_manual() {
        return Vec::new();
    }
    match snapshot.secondary.container_id {
        Some(secondary) => vec![Command::on(secondary, Action::LayoutToggleSplit)],
        None => Vec::new(),
    }
}

/// Last step of reflect: keeps each role split across the global
/// orientation so its windows do not line up with the other role.
pub fn align_roles(snapshot: &Snapshot, backend: &Backend) -> Vec<Command> {
    let orientation = if backend.variant.is_sway() && snapshot.workspace_layout == Layout::SplitV {
        Orientation::Vertical
    } else {
        snapshot.global.orientation
    };

    Role::ALL
        .into_iter()
        .filter_map(|role| {
            let record = snapshot.role(role);
            let parallel = matches!(
                (record.layout, orientation),
                (Layout::SplitV, Orientation::Vertical) | (Layout::SplitH, Orientation::Horizontal)
            );
            let first = record.children.first()?;
            parallel.then(|| Command::on(*first, Action::LayoutToggleSplit))
        })
        .collect()
}

/// Before the focused window is killed: a lone main window is swapped with
/// secondary first so main is not left empty.
pub fn before_kill(snapshot: &Snapshot) -> Vec<Command> {
    if snapshot.is_manual() || !snapshot.secondary.exists() {
        return Vec::new();
    }
    let Some(focused) = snapshot.focused else {
        return Vec::new();
    };
    match (snapshot.main.children.as_slice(), snapshot.secondary.children.first()) {
        ([only], Some(&first)) if *only == focused => {
            vec![Command::on(focused, Action::SwapWith(first))]
        }
        _ => Vec::new(),
    }
}
