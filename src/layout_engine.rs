pub mod builder;
pub mod command;
pub(crate) mod graph;
pub mod monocle;
pub mod navigation;
pub mod opacity;
pub mod reconcile;
pub mod tabbed;
pub mod workspace;

pub use builder::SplitPlan;
pub use command::{Action, Command, FullscreenMode, batch};
pub use graph::{Direction, Layout, Orientation, Step};
pub use monocle::MonocleTarget;
pub use navigation::{FocusAction, MoveAction, MovePlan};
pub use reconcile::Reconciliation;
pub use tabbed::TabbedToggle;
use thiserror::Error;

use crate::common::config::OpacitySettings;
use crate::ipc::{ConId, Variant};
use crate::model::Role;

/// Controller bugs. Manager-side command failures are never reported here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("The {0} container already exists")]
    ContainerExists(Role),
    #[error("There is no window to put in a container")]
    NoTarget,
    #[error("No split container encloses {0}")]
    ParentNotFound(ConId),
}

/// What the planners need to know about the manager on the other end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backend {
    pub variant: Variant,
    pub opacity: OpacitySettings,
}

impl Backend {
    pub fn new(variant: Variant, opacity: OpacitySettings) -> Self { Self { variant, opacity } }

    /// Only sway supports per-window opacity.
    pub fn dims_windows(&self) -> bool { self.variant.is_sway() }

    /// i3 does not mark the split it creates around main and secondary, so
    /// the controller has to.
    pub fn needs_global_mark(&self) -> bool { !self.variant.is_sway() }
}

impl Default for Backend {
    fn default() -> Self { Self::new(Variant::I3, OpacitySettings::default()) }
}
