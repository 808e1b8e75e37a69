//! A scripted window manager for driving the reactor in tests.

use std::collections::VecDeque;
use std::path::Path;

use super::{Event, Reactor};
use crate::common::config::Config;
use crate::ipc::events::{Binding, BindingEvent, WindowChange, WindowEvent, WorkspaceChange, WorkspaceEvent};
use crate::ipc::{self, CommandOutcome, IpcError, Node, VersionInfo, WmConnection};

/// Serves scripted trees in order, repeating the last one once the script
/// runs out, and records every command batch it receives.
pub struct FakeConnection {
    trees: VecDeque<Node>,
    pub version: VersionInfo,
    pub batches: Vec<String>,
    /// Commands containing this text fail.
    pub fail_matching: Option<String>,
    pub tree_reads: usize,
}

impl FakeConnection {
    pub fn new(trees: Vec<Node>) -> Self {
        assert!(!trees.is_empty(), "FakeConnection needs at least one tree");
        Self {
            trees: trees.into(),
            version: VersionInfo {
                major: 4,
                minor: 23,
                human_readable: "4.23".into(),
                ..Default::default()
            },
            batches: Vec::new(),
            fail_matching: None,
            tree_reads: 0,
        }
    }

    pub fn sway(mut self) -> Self {
        self.version = VersionInfo {
            major: 1,
            minor: 9,
            human_readable: "1.9".into(),
            variant: Some("sway".into()),
            ..Default::default()
        };
        self
    }

    /// Replaces the remaining script.
    pub fn script(&mut self, trees: Vec<Node>) {
        assert!(!trees.is_empty());
        self.trees = trees.into();
    }
}

impl WmConnection for FakeConnection {
    fn get_tree(&mut self) -> Result<Node, IpcError> {
        self.tree_reads += 1;
        let tree = if self.trees.len() > 1 {
            self.trees.pop_front()
        } else {
            self.trees.front().cloned()
        };
        Ok(tree.unwrap_or_default())
    }

    fn get_version(&mut self) -> Result<VersionInfo, IpcError> { Ok(self.version.clone()) }

    fn run_commands(&mut self, payload: &str) -> Result<Vec<CommandOutcome>, IpcError> {
        self.batches.push(payload.to_string());
        Ok(payload
            .split("; ")
            .map(|command| match &self.fail_matching {
                Some(text) if command.contains(text.as_str()) => CommandOutcome {
                    success: false,
                    error: Some(format!("cannot run {command}")),
                    parse_error: false,
                },
                _ => CommandOutcome::ok(),
            })
            .collect())
    }
}

pub fn reactor(trees: Vec<Node>) -> Reactor<FakeConnection> {
    reactor_with(FakeConnection::new(trees), Config::default())
}

/// An initialized reactor whose startup traffic has been cleared.
pub fn reactor_with(conn: FakeConnection, config: Config) -> Reactor<FakeConnection> {
    let mut reactor = Reactor::new(conn, config);
    reactor.initialize().unwrap();
    reactor.conn.batches.clear();
    reactor.conn.tree_reads = 0;
    reactor
}

impl Reactor<FakeConnection> {
    pub fn batches(&self) -> &[String] { &self.conn.batches }

    pub fn tree_reads(&self) -> usize { self.conn.tree_reads }

    pub fn script(&mut self, trees: Vec<Node>) { self.conn.script(trees) }
}

/// A config whose bar commands append `hide` or `show` to `log`.
pub fn logging_bar(log: &Path) -> Config {
    let mut config = Config::default();
    config.bar.hide_on_tabbed = true;
    config.bar.hide_command = format!("sh -c 'echo hide >> {}'", log.display());
    config.bar.show_command = format!("sh -c 'echo show >> {}'", log.display());
    config
}

pub fn bar_log(log: &Path) -> Vec<String> {
    std::fs::read_to_string(log)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

pub fn window_event(change: WindowChange, container: Node) -> Event {
    Event::Wm(ipc::Event::Window(Box::new(WindowEvent { change, container })))
}

pub fn workspace_focus(current: Node) -> Event {
    Event::Wm(ipc::Event::Workspace(Box::new(WorkspaceEvent {
        change: WorkspaceChange::Focus,
        current: Some(current),
        old: None,
    })))
}

pub fn binding(command: &str) -> Event {
    Event::Wm(ipc::Event::Binding(BindingEvent {
        change: "run".into(),
        binding: Binding { command: command.into() },
    }))
}
