use serde::Deserialize;

use super::IpcError;
use super::protocol::EventType;
use super::tree::Node;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WindowChange {
    New,
    Close,
    Focus,
    Title,
    FullscreenMode,
    Move,
    Floating,
    Urgent,
    Mark,
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WindowEvent {
    pub change: WindowChange,
    pub container: Node,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceChange {
    Focus,
    Init,
    Empty,
    Urgent,
    Rename,
    Reload,
    Restored,
    Move,
    #[serde(other)]
    Other,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WorkspaceEvent {
    pub change: WorkspaceChange,
    #[serde(default)]
    pub current: Option<Node>,
    #[serde(default)]
    pub old: Option<Node>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Binding {
    pub command: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct BindingEvent {
    #[serde(default)]
    pub change: String,
    pub binding: Binding,
}

/// Events the controller subscribes to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Window(Box<WindowEvent>),
    Workspace(Box<WorkspaceEvent>),
    Binding(BindingEvent),
    Shutdown,
}

impl Event {
    pub const SUBSCRIPTIONS: [EventType; 4] =
        [EventType::Window, EventType::Workspace, EventType::Binding, EventType::Shutdown];

    /// Decodes an event payload. Event types outside [`Self::SUBSCRIPTIONS`]
    /// yield `None`.
    pub fn decode(kind: EventType, payload: &[u8]) -> Result<Option<Event>, IpcError> {
        let event = match kind {
            EventType::Window => Event::Window(Box::new(serde_json::from_slice(payload)?)),
            EventType::Workspace => Event::Workspace(Box::new(serde_json::from_slice(payload)?)),
            EventType::Binding => Event::Binding(serde_json::from_slice(payload)?),
            EventType::Shutdown => Event::Shutdown,
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_window_events() {
        let payload = br#"{"change":"floating","container":{"id":7,"type":"con","floating":"user_off"}}"#;
        let Some(Event::Window(event)) = Event::decode(EventType::Window, payload).unwrap() else {
            panic!("expected a window event");
        };
        assert_eq!(event.change, WindowChange::Floating);
        assert_eq!(event.container.id, 7);
        assert!(!event.container.is_floating());
    }

    #[test]
    fn unknown_window_change_is_other() {
        let payload = br#"{"change":"set_title_format","container":{"id":7}}"#;
        let Some(Event::Window(event)) = Event::decode(EventType::Window, payload).unwrap() else {
            panic!("expected a window event");
        };
        assert_eq!(event.change, WindowChange::Other);
    }

    #[test]
    fn decodes_binding_events() {
        let payload = br#"{"change":"run","binding":{"command":"nop i3ipc_focus next","symbols":["j"]}}"#;
        let event = Event::decode(EventType::Binding, payload).unwrap();
        assert_eq!(
            event,
            Some(Event::Binding(BindingEvent {
                change: "run".into(),
                binding: Binding { command: "nop i3ipc_focus next".into() },
            }))
        );
    }

    #[test]
    fn decodes_workspace_focus() {
        let payload = br#"{"change":"focus","current":{"id":3,"type":"workspace","name":"2"},"old":null}"#;
        let Some(Event::Workspace(event)) = Event::decode(EventType::Workspace, payload).unwrap()
        else {
            panic!("expected a workspace event");
        };
        assert_eq!(event.change, WorkspaceChange::Focus);
        assert_eq!(event.current.map(|n| n.name), Some(Some("2".to_string())));
        assert!(event.old.is_none());
    }

    #[test]
    fn ignores_unsubscribed_events() {
        assert_eq!(Event::decode(EventType::Tick, b"{}").unwrap(), None);
    }
}
