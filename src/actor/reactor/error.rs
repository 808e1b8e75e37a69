use thiserror::Error;

use crate::ipc::{ConId, IpcError};
use crate::layout_engine::LayoutError;

#[derive(Debug, Error)]
pub enum ReactorError {
    #[error("IPC failed: {0}")]
    Ipc(#[from] IpcError),
    #[error("Layout engine error: {0}")]
    Layout(#[from] LayoutError),
    #[error("Workspace not found: {0:?}")]
    WorkspaceNotFound(Option<ConId>),
}
