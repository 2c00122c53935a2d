//! Skiroute CLI library.
//!
//! Output formatting and terminal styling shared by the `skiroute` binary
//! and its tests.

pub mod output;
pub mod terminal;
