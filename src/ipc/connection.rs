use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;
use tracing::{debug, trace, warn};

use super::events::Event;
use super::protocol::{self, EventType, FrameKind, MessageType};
use super::tree::Node;
use super::{CommandOutcome, IpcError, VersionInfo, WmConnection};

/// Locates the IPC socket: `I3SOCK`, then `SWAYSOCK`, then whatever the
/// installed window manager binary reports.
pub fn socket_path() -> Result<PathBuf, IpcError> {
    for var in ["I3SOCK", "SWAYSOCK"] {
        if let Some(path) = std::env::var_os(var).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
    }

    for wm in ["i3", "sway"] {
        let Ok(output) = Command::new(wm).arg("--get-socketpath").output() else {
            continue;
        };
        if !output.status.success() {
            continue;
        }
        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    Err(IpcError::NoSocketPath)
}

/// A request/response connection to the window manager.
pub struct I3Connection {
    stream: UnixStream,
    path: PathBuf,
}

impl I3Connection {
    pub fn connect() -> Result<Self, IpcError> { Self::connect_to(&socket_path()?) }

    pub fn connect_to(path: &Path) -> Result<Self, IpcError> {
        let stream = UnixStream::connect(path).map_err(|e| {
            warn!("Failed to connect to {}: {}", path.display(), e);
            IpcError::Unreachable(path.to_path_buf())
        })?;
        debug!("Connected to {}", path.display());
        Ok(Self { stream, path: path.to_path_buf() })
    }

    /// Opens a second connection to the same socket.
    pub fn reconnect(&self) -> Result<Self, IpcError> { Self::connect_to(&self.path) }

    fn request(&mut self, message: MessageType, payload: &[u8]) -> Result<Vec<u8>, IpcError> {
        protocol::write_message(&mut self.stream, message, payload)?;
        loop {
            let frame = protocol::read_frame(&mut self.stream)?;
            match frame.kind {
                FrameKind::Reply(got) if got == message => return Ok(frame.payload),
                FrameKind::Reply(got) => {
                    return Err(IpcError::UnexpectedReply { expected: message, got });
                }
                // Only subscribed connections receive events.
                FrameKind::Event(_) | FrameKind::UnknownEvent(_) => continue,
            }
        }
    }

    /// Turns this connection into an event stream.
    pub fn subscribe(mut self, events: &[EventType]) -> Result<EventStream, IpcError> {
        #[derive(Deserialize)]
        struct SubscribeReply {
            success: bool,
        }

        let names: Vec<&'static str> = events.iter().map(|e| e.name()).collect();
        let payload = serde_json::to_vec(&names)?;
        let reply: SubscribeReply =
            serde_json::from_slice(&self.request(MessageType::Subscribe, &payload)?)?;
        if !reply.success {
            return Err(IpcError::SubscribeRejected(names));
        }
        debug!(?names, "Subscribed");
        Ok(EventStream { stream: self.stream })
    }
}

impl WmConnection for I3Connection {
    fn get_tree(&mut self) -> Result<Node, IpcError> {
        let payload = self.request(MessageType::GetTree, b"")?;
        Ok(serde_json::from_slice(&payload)?)
    }

    fn get_version(&mut self) -> Result<VersionInfo, IpcError> {
        let payload = self.request(MessageType::GetVersion, b"")?;
        Ok(serde_json::from_slice(&payload)?)
    }

    fn run_commands(&mut self, payload: &str) -> Result<Vec<CommandOutcome>, IpcError> {
        let reply = self.request(MessageType::RunCommand, payload.as_bytes())?;
        Ok(serde_json::from_slice(&reply)?)
    }
}

/// Blocking iterator over subscribed events.
///
/// Ends when the socket closes.
pub struct EventStream {
    stream: UnixStream,
}

impl Iterator for EventStream {
    type Item = Result<Event, IpcError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = match protocol::read_frame(&mut self.stream) {
                Ok(frame) => frame,
                Err(IpcError::Io(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    return None;
                }
                Err(e) => return Some(Err(e)),
            };
            match frame.kind {
                FrameKind::Event(kind) => match Event::decode(kind, &frame.payload) {
                    Ok(Some(event)) => return Some(Ok(event)),
                    Ok(None) => trace!(?kind, "Ignoring event"),
                    Err(e) => return Some(Err(e)),
                },
                FrameKind::UnknownEvent(code) => trace!(code, "Ignoring unknown event"),
                FrameKind::Reply(kind) => trace!(?kind, "Ignoring stray reply"),
            }
        }
    }
}
