pub mod session;
pub mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use session::{FocusHistory, SavedLayout, SavedLayouts, Session};
pub use snapshot::{GlobalRecord, Mode, Role, RoleRecord, Snapshot, global_mark};
