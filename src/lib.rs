//! Dynamic "main + secondary" tiling for the i3 and sway window managers.
//!
//! The controller never owns the container tree. It reads a snapshot over
//! IPC, infers which windows belong to the main and secondary containers,
//! synthesizes a batch of textual commands and reads the tree again whenever
//! a later step depends on what the manager did with the earlier ones.

pub mod actor;
pub mod common;
pub mod ipc;
pub mod layout_engine;
pub mod model;
