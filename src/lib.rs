//! # duosync - Two-way additive file synchronization
//!
//! Keeps two storage roots (local directories or rclone remotes) holding the
//! same set of files. Listing, hashing, equality checks and copies are
//! delegated to a storage adapter, by default an rclone-compatible command.

// Module declarations
pub mod config;
pub mod lister;
pub mod diff;
pub mod executor;
pub mod storage;
pub mod synchronizer;
pub mod logging;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use types::{CopyAction, Direction, FileEntry, Listing, Root, SyncError};
pub use config::Config;
pub use storage::{MemoryStorage, RcloneStorage, RemoteStorage};
pub use synchronizer::{SyncReport, Synchronizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
