//! Countfs: In-Process Counter Filesystem
//!
//! An in-memory hierarchical namespace exposing synthetic, readable/writable
//! counter files, mountable by an external host (a FUSE-style dispatcher or
//! an in-process consumer).

pub mod config;
pub mod counter;
pub mod error;
pub mod host;
pub mod logging;
pub mod path;
pub mod store;
pub mod tree;
pub mod types;
pub mod views;
