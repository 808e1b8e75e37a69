//! The inferred shape of one workspace.
//!
//! A [`Snapshot`] is rebuilt from a fresh tree read on every handler
//! invocation and never outlives it. The manager has no notion of "main" or
//! "secondary"; those roles exist only as marks on split containers, and the
//! mark strings are confined to this module and the command renderer.

use crate::common::collections::{HashMap, HashSet};
use crate::common::config::WorkspaceSettings;
use crate::ipc::tree::{ConId, Node};
use crate::layout_engine::{Layout, Orientation};

const MARK_PREFIX: &str = "I3DT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Main,
    Secondary,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Main, Role::Secondary];

    pub fn other(self) -> Role {
        match self {
            Role::Main => Role::Secondary,
            Role::Secondary => Role::Main,
        }
    }

    pub fn mark(self, workspace: &str) -> String {
        let tag = match self {
            Role::Main => "MAIN",
            Role::Secondary => "SCND",
        };
        format!("{MARK_PREFIX}_{tag}_{workspace}")
    }
}

pub fn global_mark(workspace: &str) -> String { format!("{MARK_PREFIX}_GLBL_{workspace}") }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Excluded from dynamic tiling by configuration.
    Manual,
    Tiled,
}

/// The main or secondary container of a workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleRecord {
    pub mark: String,
    pub container_id: Option<ConId>,
    /// Most recently focused child of the container.
    pub focus: Option<ConId>,
    pub layout: Layout,
    pub fullscreen_mode: u8,
    pub children: Vec<ConId>,
}

impl RoleRecord {
    fn new(mark: String) -> Self {
        Self {
            mark,
            container_id: None,
            focus: None,
            layout: Layout::SplitV,
            fullscreen_mode: 0,
            children: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool { self.container_id.is_some() }

    pub fn is_fullscreen(&self) -> bool { self.fullscreen_mode != 0 }

    pub fn contains(&self, id: ConId) -> bool { self.children.contains(&id) }

    pub fn index_of(&self, id: ConId) -> Option<usize> { self.children.iter().position(|c| *c == id) }
}

/// The split enclosing main and secondary.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalRecord {
    pub mark: String,
    pub container_id: Option<ConId>,
    pub orientation: Orientation,
    pub layout: Layout,
}

impl GlobalRecord {
    pub fn exists(&self) -> bool { self.container_id.is_some() }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub workspace_name: String,
    pub workspace_id: ConId,
    pub workspace_layout: Layout,
    managed: bool,
    /// Non-floating windows in tree order.
    pub tiled: Vec<ConId>,
    pub floating: Vec<ConId>,
    pub focused: Option<ConId>,
    /// Fullscreen state of the focused container.
    pub fullscreen: bool,
    pub global: GlobalRecord,
    pub main: RoleRecord,
    pub secondary: RoleRecord,
    /// Tiled windows that belong to neither role.
    pub unmanaged: Vec<ConId>,
    /// First container below the workspace, in breadth first order.
    pub first_descendant: Option<ConId>,
    parents: HashMap<ConId, ConId>,
    unnamed: HashSet<ConId>,
}

impl Snapshot {
    /// Builds the snapshot of `workspace`, or of the focused workspace when
    /// none is given. Returns `None` when that workspace is not in `tree`.
    pub fn extract(
        tree: &Node,
        workspace: Option<ConId>,
        settings: &WorkspaceSettings,
    ) -> Option<Snapshot> {
        let workspace = match workspace {
            Some(id) => tree.workspaces().find(|ws| ws.id == id)?,
            None => tree.focused_workspace()?,
        };
        Some(Self::from_workspace(workspace, settings))
    }

    pub fn from_workspace(workspace: &Node, settings: &WorkspaceSettings) -> Snapshot {
        let name = workspace.name.clone().unwrap_or_default();
        let mut snapshot = Snapshot {
            managed: settings.is_managed(&name),
            workspace_id: workspace.id,
            workspace_layout: workspace.layout,
            tiled: Vec::new(),
            floating: Vec::new(),
            focused: None,
            fullscreen: false,
            global: GlobalRecord {
                mark: global_mark(&name),
                container_id: None,
                orientation: Orientation::Horizontal,
                layout: Layout::SplitH,
            },
            main: RoleRecord::new(Role::Main.mark(&name)),
            secondary: RoleRecord::new(Role::Secondary.mark(&name)),
            unmanaged: Vec::new(),
            first_descendant: workspace.descendants().next().map(|n| n.id),
            parents: HashMap::default(),
            unnamed: HashSet::default(),
            workspace_name: name,
        };

        snapshot.record_parents(workspace);

        for con in workspace.leaves() {
            if con.is_floating() {
                snapshot.floating.push(con.id);
            } else {
                snapshot.tiled.push(con.id);
            }
        }

        for con in workspace.descendants() {
            if con.focused {
                snapshot.focused = Some(con.id);
                snapshot.fullscreen = con.fullscreen_mode != 0;
            }
            if con.has_mark(&snapshot.global.mark) {
                snapshot.global.container_id = Some(con.id);
                snapshot.global.orientation = con.orientation().unwrap_or(Orientation::Horizontal);
                snapshot.global.layout = con.layout;
            }
            for role in Role::ALL {
                let record = snapshot.role_mut(role);
                if con.has_mark(&record.mark) {
                    record.container_id = Some(con.id);
                    if let Some(first) = con.focus.first() {
                        record.focus = Some(*first);
                    }
                    record.fullscreen_mode = con.fullscreen_mode;
                    record.layout = con.layout;
                    record.children =
                        con.leaves().filter(|n| !n.is_floating()).map(|n| n.id).collect();
                }
            }
        }

        snapshot.unmanaged = snapshot
            .tiled
            .iter()
            .copied()
            .filter(|id| !snapshot.main.contains(*id) && !snapshot.secondary.contains(*id))
            .collect();

        snapshot
    }

    fn record_parents(&mut self, node: &Node) {
        for child in node.nodes.iter().chain(&node.floating_nodes) {
            self.parents.insert(child.id, node.id);
            if child.name.as_deref().is_none_or(str::is_empty) {
                self.unnamed.insert(child.id);
            }
            self.record_parents(child);
        }
    }

    pub fn mode(&self) -> Mode {
        if self.managed { Mode::Tiled } else { Mode::Manual }
    }

    pub fn is_manual(&self) -> bool { self.mode() == Mode::Manual }

    pub fn role(&self, role: Role) -> &RoleRecord {
        match role {
            Role::Main => &self.main,
            Role::Secondary => &self.secondary,
        }
    }

    fn role_mut(&mut self, role: Role) -> &mut RoleRecord {
        match role {
            Role::Main => &mut self.main,
            Role::Secondary => &mut self.secondary,
        }
    }

    /// The role whose container holds `id`.
    pub fn role_of(&self, id: ConId) -> Option<Role> {
        Role::ALL.into_iter().find(|role| {
            let record = self.role(*role);
            record.exists() && record.contains(id)
        })
    }

    pub fn focused_role(&self) -> Option<Role> { self.focused.and_then(|id| self.role_of(id)) }

    /// Nearest unnamed ancestor of `id` below the workspace: the split
    /// container the manager created around it.
    pub fn find_parent_id(&self, id: ConId) -> Option<ConId> {
        let mut current = id;
        loop {
            let parent = *self.parents.get(&current)?;
            if parent == self.workspace_id {
                return None;
            }
            if self.unnamed.contains(&parent) {
                return Some(parent);
            }
            current = parent;
        }
    }

    /// Main and secondary are disjoint and together with the unmanaged
    /// windows cover every tiled window.
    pub fn is_consistent(&self) -> bool {
        let disjoint = !self.main.children.iter().any(|id| self.secondary.contains(*id));
        let mut covered: Vec<ConId> = self
            .main
            .children
            .iter()
            .chain(&self.secondary.children)
            .chain(&self.unmanaged)
            .copied()
            .collect();
        let mut tiled = self.tiled.clone();
        covered.sort_unstable();
        tiled.sort_unstable();
        disjoint && covered == tiled
    }
}
