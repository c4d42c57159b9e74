//! Namespace tree: node types and the arena that owns them.

pub mod arena;
pub mod node;

pub use arena::NodeArena;
pub use node::{CounterNode, DirectoryNode, Node, NodeBody, NodeKind};
