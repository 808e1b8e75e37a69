//! Framing of the binary IPC protocol: the `i3-ipc` magic, a native endian
//! `u32` payload length, a native endian `u32` message type, then JSON.

use std::io::{Read, Write};

use num_enum::{IntoPrimitive, TryFromPrimitive};

use super::IpcError;

pub const MAGIC: &[u8; 6] = b"i3-ipc";
const HEADER_LEN: usize = MAGIC.len() + 8;
const EVENT_BIT: u32 = 1 << 31;

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum MessageType {
    RunCommand = 0,
    GetWorkspaces = 1,
    Subscribe = 2,
    GetOutputs = 3,
    GetTree = 4,
    GetMarks = 5,
    GetBarConfig = 6,
    GetVersion = 7,
}

#[repr(u32)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    Workspace = 0,
    Output = 1,
    Mode = 2,
    Window = 3,
    BarconfigUpdate = 4,
    Binding = 5,
    Shutdown = 6,
    Tick = 7,
}

impl EventType {
    pub fn name(self) -> &'static str { self.into() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Reply(MessageType),
    Event(EventType),
    /// An event this client does not know (sway sends a few extra ones).
    UnknownEvent(u32),
}

#[derive(Debug)]
pub struct Frame {
    pub kind: FrameKind,
    pub payload: Vec<u8>,
}

pub fn encode(message: MessageType, payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&(payload.len() as u32).to_ne_bytes());
    buf.extend_from_slice(&u32::from(message).to_ne_bytes());
    buf.extend_from_slice(payload);
    buf
}

pub fn write_message(
    writer: &mut impl Write,
    message: MessageType,
    payload: &[u8],
) -> Result<(), IpcError> {
    writer.write_all(&encode(message, payload))?;
    writer.flush()?;
    Ok(())
}

pub fn read_frame(reader: &mut impl Read) -> Result<Frame, IpcError> {
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header)?;

    let mut magic = [0u8; 6];
    magic.copy_from_slice(&header[..6]);
    if &magic != MAGIC {
        return Err(IpcError::BadMagic(magic));
    }

    let len = u32::from_ne_bytes([header[6], header[7], header[8], header[9]]) as usize;
    let raw_type = u32::from_ne_bytes([header[10], header[11], header[12], header[13]]);

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;

    let kind = if raw_type & EVENT_BIT != 0 {
        let code = raw_type & !EVENT_BIT;
        match EventType::try_from(code) {
            Ok(event) => FrameKind::Event(event),
            Err(_) => FrameKind::UnknownEvent(code),
        }
    } else {
        FrameKind::Reply(
            MessageType::try_from(raw_type).map_err(|_| IpcError::UnknownMessageType(raw_type))?,
        )
    };

    Ok(Frame { kind, payload })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn raw_frame(raw_type: u32, payload: &[u8]) -> Vec<u8> {
        let mut buf = MAGIC.to_vec();
        buf.extend_from_slice(&(payload.len() as u32).to_ne_bytes());
        buf.extend_from_slice(&raw_type.to_ne_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn encodes_header_before_payload() {
        let buf = encode(MessageType::RunCommand, b"focus");
        assert_eq!(&buf[..6], b"i3-ipc");
        assert_eq!(u32::from_ne_bytes(buf[6..10].try_into().unwrap()), 5);
        assert_eq!(u32::from_ne_bytes(buf[10..14].try_into().unwrap()), 0);
        assert_eq!(&buf[14..], b"focus");
    }

    #[test]
    fn reads_replies() {
        let mut cursor = Cursor::new(raw_frame(4, b"{}"));
        let frame = read_frame(&mut cursor).unwrap();
        assert_eq!(frame.kind, FrameKind::Reply(MessageType::GetTree));
        assert_eq!(frame.payload, b"{}");
    }

    #[test]
    fn reads_events_with_high_bit() {
        let mut cursor = Cursor::new(raw_frame(EVENT_BIT | 3, b"{}"));
        let frame = read_frame(&mut cursor).unwrap();
        assert_eq!(frame.kind, FrameKind::Event(EventType::Window));

        let mut cursor = Cursor::new(raw_frame(EVENT_BIT | 0x15, b"{}"));
        let frame = read_frame(&mut cursor).unwrap();
        assert_eq!(frame.kind, FrameKind::UnknownEvent(0x15));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut buf = raw_frame(4, b"{}");
        buf[0] = b'x';
        let err = read_frame(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, IpcError::BadMagic(_)));
    }

    #[test]
    fn truncated_payload_is_an_io_error() {
        let mut buf = raw_frame(4, b"{\"id\":1}");
        buf.truncate(buf.len() - 2);
        let err = read_frame(&mut Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, IpcError::Io(_)));
    }

    #[test]
    fn event_names_match_subscribe_payload() {
        assert_eq!(EventType::Window.name(), "window");
        assert_eq!(EventType::BarconfigUpdate.name(), "barconfig_update");
    }
}
