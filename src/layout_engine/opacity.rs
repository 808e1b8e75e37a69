//! Dimming of unfocused windows. Only sway understands `opacity`, so every
//! planner here returns nothing on i3.

use super::{Action, Backend, Command, Layout};
use crate::ipc::{ConId, Node};
use crate::model::{FocusHistory, RoleRecord, Snapshot};

/// Opacity of the children of `record` once it is laid out as `layout`.
///
/// Split children are all visible, so only the focused one stays opaque.
/// Tabbed and stacked children hide each other and are kept opaque.
pub fn for_role(
    record: &RoleRecord,
    layout: Layout,
    focused: Option<ConId>,
    backend: &Backend,
) -> Vec<Command> {
    if !backend.dims_windows() {
        return Vec::new();
    }
    let opacity = backend.opacity;
    record
        .children
        .iter()
        .map(|&id| {
            let value = if layout.is_split() && Some(id) != focused {
                opacity.inactive
            } else {
                opacity.focused
            };
            Command::on(id, Action::Opacity(value))
        })
        .collect()
}

/// Dims the window that lost focus and lights up the one that gained it.
///
/// The previous window stays lit when it shares a tabbed or stacked
/// container with the new one.
pub fn on_focus(snapshot: &Snapshot, history: &FocusHistory, backend: &Backend) -> Vec<Command> {
    let (Some(previous), Some(current)) = (history.previous, history.current) else {
        return Vec::new();
    };
    if !backend.dims_windows() {
        return Vec::new();
    }

    let mut commands = Vec::new();
    if let Some(previous_role) = snapshot.role_of(previous) {
        let current_role = snapshot.focused_role();
        let shares_stack = current_role == Some(previous_role)
            && !snapshot.role(previous_role).layout.is_split();
        if !shares_stack {
            commands.push(Command::on(previous, Action::Opacity(backend.opacity.inactive)));
        }
    }
    commands.push(Command::on(current, Action::Opacity(backend.opacity.focused)));
    commands
}

/// Opacity of every window at startup.
pub fn initial(tree: &Node, backend: &Backend) -> Vec<Command> {
    if !backend.dims_windows() {
        return Vec::new();
    }
    tree.leaves()
        .map(|con| {
            let value = if con.focused { backend.opacity.focused } else { backend.opacity.inactive };
            Command::on(con.id, Action::Opacity(value))
        })
        .collect()
}

/// Re-applies opacity to the focused role after its layout was toggled by
/// the user.
pub fn refresh_focused_role(snapshot: &Snapshot, backend: &Backend) -> Vec<Command> {
    if !backend.dims_windows() {
        return Vec::new();
    }
    let Some(role) = snapshot.focused_role() else {
        return Vec::new();
    };
    let record = snapshot.role(role);
    let mut commands = for_role(record, record.layout, snapshot.focused, backend);
    // The focused window goes last so it wins over anything above.
    commands.retain(|c| c.target != snapshot.focused);
    if let Some(focused) = snapshot.focused {
        commands.push(Command::on(focused, Action::Opacity(backend.opacity.focused)));
    }
    commands
}

/// Makes every window opaque again before the controller exits.
pub fn reset(tree: &Node, backend: &Backend) -> Vec<Command> {
    if !backend.dims_windows() {
        return Vec::new();
    }
    tree.workspaces()
        .flat_map(|ws| ws.leaves())
        .map(|con| Command::on(con.id, Action::Opacity(1.0)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::{OpacitySettings, WorkspaceSettings};
    use crate::ipc::Variant;
    use crate::layout_engine::batch;
    use crate::model::testing::*;

    fn sway() -> Backend {
        Backend::new(Variant::Sway, OpacitySettings { focused: 1.0, inactive: 0.7 })
    }

    fn workspace_tree(secondary_layout: Layout) -> Node {
        root(vec![workspace(1, "1", Layout::SplitH, vec![
            split(20, Layout::SplitV, vec![leaf(10)]).mark("I3DT_MAIN_1"),
            split(21, secondary_layout, vec![leaf(11), leaf(12).focused()]).mark("I3DT_SCND_1"),
        ])])
    }

    fn snapshot(tree: &Node) -> Snapshot {
        Snapshot::extract(tree, None, &WorkspaceSettings::default()).unwrap()
    }

    #[test]
    fn i3_gets_no_opacity() {
        let tree = workspace_tree(Layout::SplitV);
        let history = FocusHistory { previous: Some(10), current: Some(12) };
        assert!(on_focus(&snapshot(&tree), &history, &Backend::default()).is_empty());
        assert!(initial(&tree, &Backend::default()).is_empty());
        assert!(reset(&tree, &Backend::default()).is_empty());
    }

    #[test]
    fn dims_window_in_other_role() {
        let tree = workspace_tree(Layout::Tabbed);
        let history = FocusHistory { previous: Some(10), current: Some(12) };
        assert_eq!(
            batch(&on_focus(&snapshot(&tree), &history, &sway())),
            "[con_id=10] opacity 0.7; [con_id=12] opacity 1"
        );
    }

    #[test]
    fn keeps_tab_siblings_lit() {
        let tree = workspace_tree(Layout::Tabbed);
        let history = FocusHistory { previous: Some(11), current: Some(12) };
        assert_eq!(batch(&on_focus(&snapshot(&tree), &history, &sway())), "[con_id=12] opacity 1");

        let tree = workspace_tree(Layout::SplitV);
        assert_eq!(
            batch(&on_focus(&snapshot(&tree), &history, &sway())),
            "[con_id=11] opacity 0.7; [con_id=12] opacity 1"
        );
    }

    #[test]
    fn initial_and_reset_cover_every_window() {
        let tree = workspace_tree(Layout::SplitV);
        assert_eq!(
            batch(&initial(&tree, &sway())),
            "[con_id=10] opacity 0.7; [con_id=11] opacity 0.7; [con_id=12] opacity 1"
        );
        assert_eq!(
            batch(&reset(&tree, &sway())),
            "[con_id=10] opacity 1; [con_id=11] opacity 1; [con_id=12] opacity 1"
        );
    }

    #[test]
    fn refresh_puts_focused_window_last() {
        let tree = workspace_tree(Layout::SplitV);
        assert_eq!(
            batch(&refresh_focused_role(&snapshot(&tree), &sway())),
            "[con_id=11] opacity 0.7; [con_id=12] opacity 1"
        );
    }
}
