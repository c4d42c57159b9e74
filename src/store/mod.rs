//! Namespace Store
//!
//! Owns the fixed node tree, resolves paths, and dispatches the counter-file
//! read/write protocol. The layout is built once at initialization and never
//! structurally mutated:
//!
//! ```text
//! /                  (directory)
//! /counter           (counter file, 0644)
//! /subdir/           (directory, 0755)
//! /subdir/subcounter (counter file, 0644)
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info};

use crate::counter;
use crate::error::FsError;
use crate::path;
use crate::tree::{Node, NodeArena, NodeKind};
use crate::types::{
    HandleId, Mode, NodeId, BLOCK_SIZE, DIR_MODE, FILE_MODE, FS_MAGIC, NAME_MAX,
};

/// An open counter-file handle.
///
/// Stateless beyond the node it references; the read offset lives with the
/// caller, so any number of handles may be open against one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handle {
    id: HandleId,
    node: NodeId,
}

impl Handle {
    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Attribute record for a single node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeAttr {
    pub ino: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub mode: Mode,
    pub nlink: u32,
    pub size: u64,
    pub created_at: String,
}

/// Filesystem statistics.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FsStats {
    pub magic: u32,
    pub block_size: u32,
    pub name_max: usize,
    pub total_nodes: u64,
    pub open_handles: u64,
}

/// The namespace store.
pub struct NamespaceStore {
    label: String,
    arena: NodeArena,
    root: NodeId,
    handles: RwLock<HashMap<HandleId, NodeId>>,
    next_handle: AtomicU64,
}

impl NamespaceStore {
    /// Build the fixed layout under a caller-defined root label.
    ///
    /// Fails only on allocation failure, which the host must treat as a
    /// failed mount.
    pub fn initialize(label: &str) -> Result<Self, FsError> {
        let mut arena = NodeArena::with_capacity(4)?;

        let root = arena.insert(|id| Node::new_directory(id, label, None, DIR_MODE))?;

        let counter_file = arena.insert(|id| Node::new_counter(id, "counter", root, FILE_MODE))?;
        link(&mut arena, root, "counter", counter_file)?;

        let subdir = arena.insert(|id| Node::new_directory(id, "subdir", Some(root), DIR_MODE))?;
        link(&mut arena, root, "subdir", subdir)?;

        let subcounter =
            arena.insert(|id| Node::new_counter(id, "subcounter", subdir, FILE_MODE))?;
        link(&mut arena, subdir, "subcounter", subcounter)?;

        info!(label, nodes = arena.len(), "namespace store initialized");

        Ok(Self {
            label: label.to_string(),
            arena,
            root,
            handles: RwLock::new(HashMap::new()),
            next_handle: AtomicU64::new(1),
        })
    }

    /// The root label the host supplied at mount time.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identifier of the root directory.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node lookup by identifier.
    pub fn node(&self, id: NodeId) -> Result<&Node, FsError> {
        self.arena
            .get(id)
            .ok_or_else(|| FsError::NotFound(format!("node {id}")))
    }

    /// Walk `path` from the root, component by component.
    ///
    /// `""` and `"/"` resolve to the root. A missing component fails with
    /// [`FsError::NotFound`]; a counter file in an intermediate position
    /// fails with [`FsError::NotADirectory`].
    pub fn resolve(&self, path: &str) -> Result<NodeId, FsError> {
        let mut current = self.root;
        for component in path::split_components(path)? {
            let node = self.node(current)?;
            let dir = node
                .as_directory()
                .ok_or_else(|| FsError::NotADirectory(node.name().to_string()))?;
            current = dir
                .child(component)
                .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        }
        debug!(path, node = current, "resolved");
        Ok(current)
    }

    /// Open a counter file, registering a handle to its counter.
    ///
    /// No exclusivity: any number of handles may reference the same counter.
    pub fn open(&self, id: NodeId) -> Result<Handle, FsError> {
        let node = self.node(id)?;
        if node.as_counter().is_none() {
            return Err(FsError::InvalidArgument(format!(
                "{:?} is not a counter file",
                node.name()
            )));
        }
        let handle = Handle {
            id: self.next_handle.fetch_add(1, Ordering::SeqCst),
            node: id,
        };
        self.handles.write().insert(handle.id, id);
        debug!(handle = handle.id, node = id, "opened");
        Ok(handle)
    }

    /// Release a handle. Closing is a no-op beyond deregistration.
    pub fn close(&self, handle: Handle) {
        self.handles.write().remove(&handle.id);
        debug!(handle = handle.id, "closed");
    }

    /// Read from the counter behind `handle` per the wire protocol.
    pub fn read(&self, handle: &Handle, offset: u64, length: usize) -> Result<Vec<u8>, FsError> {
        let node = self.checked_handle(handle)?;
        let cell = self
            .node(node)?
            .as_counter()
            .ok_or_else(|| FsError::InvalidArgument(format!("node {node} is not a counter file")))?
            .cell();
        let bytes = counter::read_at(cell, offset, length)?;
        debug!(handle = handle.id, offset, count = bytes.len(), "read");
        Ok(bytes)
    }

    /// Write to the counter behind `handle`; returns bytes consumed.
    pub fn write(&self, handle: &Handle, offset: u64, payload: &[u8]) -> Result<usize, FsError> {
        let node = self.checked_handle(handle)?;
        let cell = self
            .node(node)?
            .as_counter()
            .ok_or_else(|| FsError::InvalidArgument(format!("node {node} is not a counter file")))?
            .cell();
        let consumed = counter::write_at(cell, offset, payload)?;
        debug!(handle = handle.id, offset, consumed, "write");
        Ok(consumed)
    }

    /// Attribute record for a node.
    ///
    /// A counter file's logical size is the byte length of its current
    /// rendering, reported without touching the counter.
    pub fn metadata(&self, id: NodeId) -> Result<NodeAttr, FsError> {
        let node = self.node(id)?;
        let size = match node.as_counter() {
            Some(file) => counter::render_value(file.cell().get())?.len() as u64,
            None => 0,
        };
        Ok(NodeAttr {
            ino: node.id(),
            name: node.name().to_string(),
            kind: node.kind(),
            mode: node.mode(),
            nlink: match node.kind() {
                NodeKind::Directory => 2,
                NodeKind::CounterFile => 1,
            },
            size,
            created_at: node.created_at().to_rfc3339(),
        })
    }

    /// Replace a node's advisory mode bits.
    pub fn set_mode(&self, id: NodeId, mode: Mode) -> Result<(), FsError> {
        self.node(id)?.set_mode(mode);
        Ok(())
    }

    /// Filesystem statistics.
    pub fn statfs(&self) -> FsStats {
        FsStats {
            magic: FS_MAGIC,
            block_size: BLOCK_SIZE,
            name_max: NAME_MAX,
            total_nodes: self.arena.len() as u64,
            open_handles: self.handles.read().len() as u64,
        }
    }

    /// Nodes in identifier order. Used by views and host listings.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.arena.iter()
    }

    /// Release the store. Nodes hold no external resources, so this is a
    /// plain drop with an unmount log line.
    pub fn teardown(self) {
        info!(
            label = self.label.as_str(),
            open_handles = self.handles.read().len(),
            "namespace store torn down"
        );
    }

    fn checked_handle(&self, handle: &Handle) -> Result<NodeId, FsError> {
        self.handles
            .read()
            .get(&handle.id)
            .copied()
            .ok_or_else(|| FsError::InvalidArgument(format!("stale handle {}", handle.id)))
    }
}

fn link(arena: &mut NodeArena, parent: NodeId, name: &str, child: NodeId) -> Result<(), FsError> {
    arena
        .get_mut(parent)
        .ok_or_else(|| FsError::NotFound(format!("node {parent}")))?
        .link_child(name, child)
}
