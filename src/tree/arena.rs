//! Node arena.
//!
//! Owns every node in the namespace and hands out integer identifiers that
//! double as indices. Parent/child relationships are plain index references,
//! never owning pointers. There is no removal: identifiers are never reused
//! while the arena is alive.

use crate::error::FsError;
use crate::tree::node::Node;
use crate::types::NodeId;

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an arena with room for `capacity` nodes.
    ///
    /// Reservation failure is reported as [`FsError::AllocationFailure`],
    /// which is fatal to the mount.
    pub fn with_capacity(capacity: usize) -> Result<Self, FsError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve(capacity)
            .map_err(|e| FsError::AllocationFailure(e.to_string()))?;
        Ok(Self { nodes })
    }

    /// Allocate the next identifier and insert the node built for it.
    pub fn insert(&mut self, build: impl FnOnce(NodeId) -> Node) -> Result<NodeId, FsError> {
        self.nodes
            .try_reserve(1)
            .map_err(|e| FsError::AllocationFailure(e.to_string()))?;
        let id = self.nodes.len() as NodeId;
        self.nodes.push(build(id));
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        usize::try_from(id).ok().and_then(|idx| self.nodes.get(idx))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.nodes.get_mut(idx))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }
}
