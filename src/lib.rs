//! Library crate for userdata-tui.
//!
//! This crate exposes the building blocks of the TUI:
//! - Application state, list-manager operations and update loop (`app`)
//! - Error and result types (`error`)
//! - The user record and its JSON decoding (`model`)
//! - In-memory search helpers (`search`)
//! - Where the initial user list comes from (`source`)
//! - The canonical record list keyed by generated ids (`store`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdata-tui` binary and by tests.
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod model;
pub mod search;
pub mod source;
pub mod store;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{DynError, Result, UserListError};
pub use model::User;
