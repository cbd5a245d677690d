//! Core type definitions for duosync

mod action;
mod entry;
mod error;
mod listing;
mod root;

pub use action::{CopyAction, Direction};
pub use entry::FileEntry;
pub use error::SyncError;
pub use listing::Listing;
pub use root::Root;
