//! Reads the subscription socket and feeds the reactor.

use std::thread::JoinHandle;

use tracing::{debug, error, info, warn};

use super::Sender;
use super::reactor::Event;
use crate::ipc::{self, EventStream, IpcError};

pub fn spawn(stream: EventStream, events_tx: Sender<Event>) -> std::io::Result<JoinHandle<()>> {
    std::thread::Builder::new()
        .name("i3dt-events".to_string())
        .spawn(move || run(stream, events_tx))
}

fn run(stream: EventStream, events_tx: Sender<Event>) {
    for event in stream {
        match event {
            Ok(event) => {
                debug!(?event, "Received event");
                events_tx.send(Event::Wm(event));
            }
            // The frame was read in full, so the stream is still in sync.
            Err(IpcError::Json(e)) => warn!("Dropping undecodable event: {e}"),
            Err(e) => {
                error!("Event stream failed: {e}");
                break;
            }
        }
    }
    info!("Window manager connection closed");
    events_tx.send(Event::Wm(ipc::Event::Shutdown));
}
