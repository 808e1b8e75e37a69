//! Client side of the i3/sway IPC protocol.
//!
//! Only what the controller needs is modelled: reading the container tree,
//! running command batches, reading the version and subscribing to the
//! window, workspace, binding and shutdown events.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

pub mod connection;
pub mod events;
pub mod protocol;
pub mod tree;

pub use connection::{EventStream, I3Connection, socket_path};
pub use events::Event;
pub use tree::{ConId, Node, NodeType};

#[derive(Debug, Error)]
pub enum IpcError {
    #[error("IPC socket I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("IPC reply has bad magic {0:?}")]
    BadMagic([u8; 6]),
    #[error("Unknown IPC message type {0}")]
    UnknownMessageType(u32),
    #[error("Unexpected reply type {got:?}, expected {expected:?}")]
    UnexpectedReply {
        expected: protocol::MessageType,
        got: protocol::MessageType,
    },
    #[error("Failed to decode IPC payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not locate the window manager socket")]
    NoSocketPath,
    #[error("Subscription was rejected for {0:?}")]
    SubscribeRejected(Vec<&'static str>),
    #[error("Socket {} is not reachable", .0.display())]
    Unreachable(PathBuf),
}

/// Result of one command inside a batch.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct CommandOutcome {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub parse_error: bool,
}

impl CommandOutcome {
    pub fn ok() -> Self {
        Self { success: true, ..Default::default() }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct VersionInfo {
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    #[serde(default)]
    pub patch: u32,
    #[serde(default)]
    pub human_readable: String,
    #[serde(default)]
    pub variant: Option<String>,
}

/// Which window manager is on the other end of the socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    I3,
    Sway,
}

impl Variant {
    pub fn is_sway(self) -> bool { self == Variant::Sway }
}

impl From<&VersionInfo> for Variant {
    fn from(version: &VersionInfo) -> Self {
        match version.variant.as_deref() {
            Some("sway") => Variant::Sway,
            _ => Variant::I3,
        }
    }
}

/// The request side of the window manager connection.
///
/// Every call is a synchronous round trip. The manager executes the commands
/// of a batch in order but not atomically, so callers must inspect each
/// outcome.
pub trait WmConnection {
    fn get_tree(&mut self) -> Result<Node, IpcError>;
    fn get_version(&mut self) -> Result<VersionInfo, IpcError>;
    fn run_commands(&mut self, payload: &str) -> Result<Vec<CommandOutcome>, IpcError>;
}
