use std::collections::VecDeque;

use serde::Deserialize;

use crate::layout_engine::{Layout, Orientation};

/// Container id assigned by the window manager. Ids are not stable across
/// topology changes that create or destroy split containers.
pub type ConId = i64;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Root,
    Output,
    #[default]
    Con,
    FloatingCon,
    Workspace,
    Dockarea,
    #[serde(other)]
    Unknown,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeOrientation {
    #[default]
    None,
    Horizontal,
    Vertical,
    #[serde(other)]
    Unknown,
}

/// One container of the manager's tree, as returned by `GET_TREE` and
/// embedded in window and workspace events.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: ConId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub orientation: NodeOrientation,
    #[serde(default)]
    pub focused: bool,
    #[serde(default)]
    pub focus: Vec<ConId>,
    #[serde(default)]
    pub marks: Vec<String>,
    #[serde(default)]
    pub fullscreen_mode: u8,
    /// i3 only: `auto_off`, `auto_on`, `user_off` or `user_on`.
    #[serde(default)]
    pub floating: Option<String>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub floating_nodes: Vec<Node>,
}

impl Node {
    /// Every container below this one, breadth first, tiled children before
    /// floating ones. The node itself is not included.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut queue = VecDeque::new();
        queue.extend(self.nodes.iter());
        queue.extend(self.floating_nodes.iter());
        Descendants { queue }
    }

    /// Windows: containers without children.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        self.descendants().filter(|n| n.is_window())
    }

    pub fn is_window(&self) -> bool {
        self.nodes.is_empty()
            && self.floating_nodes.is_empty()
            && matches!(self.node_type, NodeType::Con | NodeType::FloatingCon)
    }

    /// i3 reports floating through `floating`, sway through the node type.
    pub fn is_floating(&self) -> bool {
        self.node_type == NodeType::FloatingCon
            || self.floating.as_deref().is_some_and(|f| f.ends_with("on"))
    }

    pub fn orientation(&self) -> Option<Orientation> {
        match self.orientation {
            NodeOrientation::Horizontal => Some(Orientation::Horizontal),
            NodeOrientation::Vertical => Some(Orientation::Vertical),
            NodeOrientation::None | NodeOrientation::Unknown => None,
        }
    }

    pub fn has_mark(&self, mark: &str) -> bool { self.marks.iter().any(|m| m == mark) }

    pub fn contains(&self, id: ConId) -> bool { self.descendants().any(|n| n.id == id) }

    pub fn find(&self, id: ConId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.descendants().find(|n| n.id == id)
    }

    pub fn find_focused(&self) -> Option<&Node> {
        if self.focused {
            return Some(self);
        }
        self.descendants().find(|n| n.focused)
    }

    pub fn workspaces(&self) -> impl Iterator<Item = &Node> {
        self.descendants().filter(|n| n.node_type == NodeType::Workspace)
    }

    /// The workspace holding `id`, if any.
    pub fn workspace_of(&self, id: ConId) -> Option<&Node> {
        self.workspaces().find(|ws| ws.id == id || ws.contains(id))
    }

    /// The workspace holding the focused container.
    pub fn focused_workspace(&self) -> Option<&Node> {
        let focused = self.find_focused()?;
        if focused.node_type == NodeType::Workspace {
            return Some(focused);
        }
        self.workspace_of(focused.id)
    }

    /// Renders the subtree for trace logging.
    pub fn draw_tree(&self) -> String {
        let mut out = String::new();
        if ascii_tree::write_tree(&mut out, &self.ascii_tree()).is_err() {
            out.clear();
        }
        out
    }

    fn ascii_tree(&self) -> ascii_tree::Tree {
        let status = if self.focused { "☒ " } else { "" };
        let mut desc = format!("{status}{} {:?} {:?}", self.id, self.node_type, self.layout);
        if let Some(name) = &self.name {
            desc.push_str(&format!(" {name:?}"));
        }
        if !self.marks.is_empty() {
            desc.push_str(&format!(" {:?}", self.marks));
        }
        if self.fullscreen_mode != 0 {
            desc.push_str(" fullscreen");
        }
        let children: Vec<_> =
            self.nodes.iter().chain(&self.floating_nodes).map(Node::ascii_tree).collect();
        if children.is_empty() {
            ascii_tree::Tree::Leaf(vec![desc])
        } else {
            ascii_tree::Tree::Node(desc, children)
        }
    }
}

pub struct Descendants<'a> {
    queue: VecDeque<&'a Node>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.nodes.iter());
        self.queue.extend(node.floating_nodes.iter());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TREE: &str = r#"{
        "id": 1, "type": "root", "name": "root", "layout": "splith",
        "nodes": [{
            "id": 2, "type": "output", "name": "eDP-1", "layout": "output",
            "nodes": [{
                "id": 3, "type": "workspace", "name": "1", "layout": "splith",
                "orientation": "horizontal",
                "nodes": [
                    {"id": 10, "type": "con", "name": "term", "layout": "splith",
                     "floating": "auto_off"},
                    {"id": 11, "type": "con", "name": null, "layout": "splitv",
                     "orientation": "vertical", "marks": ["I3DT_SCND_1"], "focus": [13, 12],
                     "nodes": [
                        {"id": 12, "type": "con", "name": "a", "layout": "splith"},
                        {"id": 13, "type": "con", "name": "b", "layout": "splith",
                         "focused": true}
                     ]}
                ],
                "floating_nodes": [{
                    "id": 20, "type": "floating_con", "layout": "splith",
                    "nodes": [{"id": 21, "type": "con", "name": "pip",
                               "floating": "user_on"}]
                }]
            }]
        }]
    }"#;

    fn tree() -> Node { serde_json::from_str(TREE).unwrap() }

    #[test]
    fn parses_manager_json() {
        let root = tree();
        let ws = root.find(3).unwrap();
        assert_eq!(ws.node_type, NodeType::Workspace);
        assert_eq!(ws.orientation(), Some(Orientation::Horizontal));
        let secondary = root.find(11).unwrap();
        assert_eq!(secondary.layout, Layout::SplitV);
        assert!(secondary.has_mark("I3DT_SCND_1"));
        assert_eq!(secondary.focus, vec![13, 12]);
        assert_eq!(secondary.name, None);
    }

    #[test]
    fn descendants_are_breadth_first() {
        let root = tree();
        let ws = root.find(3).unwrap();
        let ids: Vec<_> = ws.descendants().map(|n| n.id).collect();
        assert_eq!(ids, vec![10, 11, 20, 12, 13, 21]);
    }

    #[test]
    fn leaves_include_floating_windows() {
        let root = tree();
        let ws = root.find(3).unwrap();
        let leaves: Vec<_> = ws.leaves().map(|n| (n.id, n.is_floating())).collect();
        assert_eq!(leaves, vec![(10, false), (12, false), (13, false), (21, true)]);
    }

    #[test]
    fn finds_focused_workspace() {
        let root = tree();
        assert_eq!(root.find_focused().map(|n| n.id), Some(13));
        assert_eq!(root.focused_workspace().map(|n| n.id), Some(3));
        assert_eq!(root.workspace_of(21).map(|n| n.id), Some(3));
        assert!(root.workspace_of(999).is_none());
    }

    #[test]
    fn draw_tree_mentions_marks() {
        let root = tree();
        let drawn = root.find(11).unwrap().draw_tree();
        assert!(drawn.contains("I3DT_SCND_1"));
        assert!(drawn.contains("13"));
    }
}
