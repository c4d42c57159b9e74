//! Core types and wire constants for the counter filesystem.

/// NodeId: arena index of a namespace node, assigned monotonically.
pub type NodeId = i64;

/// HandleId: identifier of an open counter-file handle.
pub type HandleId = u64;

/// Mode: permission bits, advisory only.
pub type Mode = u32;

/// Filesystem magic number reported by statfs.
pub const FS_MAGIC: u32 = 0x1122_3344;

/// Logical block size reported by statfs.
pub const BLOCK_SIZE: u32 = 4096;

/// Maximum length of a single entry name.
pub const NAME_MAX: usize = 255;

/// Wire buffer bound for a rendered counter value, newline included.
pub const COUNTER_BUF_SIZE: usize = 20;

/// Default mode bits for directories.
pub const DIR_MODE: Mode = 0o755;

/// Default mode bits for counter files.
pub const FILE_MODE: Mode = 0o644;
