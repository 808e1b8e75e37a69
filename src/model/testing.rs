//! Builders for hand-written container trees.

use crate::ipc::tree::{ConId, Node, NodeOrientation, NodeType};
use crate::layout_engine::{Layout, Orientation};

pub fn root(workspaces: Vec<Node>) -> Node {
    Node {
        id: 100_000,
        name: Some("root".into()),
        node_type: NodeType::Root,
        nodes: vec![Node {
            id: 100_001,
            name: Some("output".into()),
            node_type: NodeType::Output,
            layout: Layout::Other,
            nodes: workspaces,
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn workspace(id: ConId, name: &str, layout: Layout, nodes: Vec<Node>) -> Node {
    Node {
        id,
        name: Some(name.into()),
        node_type: NodeType::Workspace,
        layout,
        orientation: orientation_of(layout),
        nodes,
        ..Default::default()
    }
}

/// A window.
pub fn leaf(id: ConId) -> Node {
    Node {
        id,
        name: Some(format!("window {id}")),
        node_type: NodeType::Con,
        floating: Some("auto_off".into()),
        ..Default::default()
    }
}

/// A floating window inside its floating wrapper.
pub fn floating_leaf(id: ConId) -> Node {
    Node {
        id: id + 1000,
        node_type: NodeType::FloatingCon,
        nodes: vec![Node {
            floating: Some("user_on".into()),
            ..leaf(id)
        }],
        ..Default::default()
    }
}

/// An unnamed split container, as the manager creates them.
pub fn split(id: ConId, layout: Layout, nodes: Vec<Node>) -> Node {
    let focus = nodes.iter().map(|n| n.id).collect();
    Node {
        id,
        name: None,
        node_type: NodeType::Con,
        layout,
        orientation: orientation_of(layout),
        focus,
        nodes,
        ..Default::default()
    }
}

fn orientation_of(layout: Layout) -> NodeOrientation {
    match layout {
        Layout::SplitH | Layout::Tabbed => NodeOrientation::Horizontal,
        Layout::SplitV | Layout::Stacked => NodeOrientation::Vertical,
        Layout::Other => NodeOrientation::None,
    }
}

pub trait NodeExt {
    fn focused(self) -> Self;
    fn mark(self, mark: &str) -> Self;
    fn fullscreen(self) -> Self;
    fn focus_order(self, order: Vec<ConId>) -> Self;
    fn oriented(self, orientation: Orientation) -> Self;
    fn with_floating(self, nodes: Vec<Node>) -> Self;
    fn named(self, name: &str) -> Self;
}

impl NodeExt for Node {
    fn focused(mut self) -> Self {
        self.focused = true;
        self
    }

    fn mark(mut self, mark: &str) -> Self {
        self.marks.push(mark.into());
        self
    }

    fn fullscreen(mut self) -> Self {
        self.fullscreen_mode = 1;
        self
    }

    fn focus_order(mut self, order: Vec<ConId>) -> Self {
        self.focus = order;
        self
    }

    fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = match orientation {
            Orientation::Horizontal => NodeOrientation::Horizontal,
            Orientation::Vertical => NodeOrientation::Vertical,
        };
        self
    }

    fn with_floating(mut self, nodes: Vec<Node>) -> Self {
        self.floating_nodes = nodes;
        self
    }

    fn named(mut self, name: &str) -> Self {
        self.name = Some(name.into());
        self
    }
}
