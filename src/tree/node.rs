//! Namespace node types.

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::counter::CounterCell;
use crate::error::FsError;
use crate::path;
use crate::types::{Mode, NodeId};

/// Tag distinguishing the two node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Directory,
    CounterFile,
}

/// Directory variant: named links to child nodes.
#[derive(Debug, Default)]
pub struct DirectoryNode {
    children: Vec<(String, NodeId)>,
}

impl DirectoryNode {
    /// Child lookup by entry name.
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(child_name, _)| child_name == name)
            .map(|&(_, id)| id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, NodeId)> {
        self.children.iter().map(|(name, id)| (name.as_str(), *id))
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn link(&mut self, name: String, id: NodeId) -> Result<(), FsError> {
        if self.child(&name).is_some() {
            return Err(FsError::InvalidArgument(format!(
                "duplicate entry name {name:?}"
            )));
        }
        self.children.push((name, id));
        Ok(())
    }
}

/// Counter-file variant: a single atomic integer.
#[derive(Debug, Default)]
pub struct CounterNode {
    cell: CounterCell,
}

impl CounterNode {
    pub fn cell(&self) -> &CounterCell {
        &self.cell
    }
}

/// Variant body of a node.
#[derive(Debug)]
pub enum NodeBody {
    Directory(DirectoryNode),
    Counter(CounterNode),
}

/// A namespace entry: common attributes plus the directory/counter variant.
///
/// Identifiers are arena indices and never change or get reused for the
/// lifetime of the store. Structure is fixed after the store is built; the
/// counter value and the advisory mode bits are the only mutable state.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    name: String,
    parent: Option<NodeId>,
    mode: AtomicU32,
    created_at: DateTime<Utc>,
    body: NodeBody,
}

impl Node {
    pub fn new_directory(
        id: NodeId,
        name: impl Into<String>,
        parent: Option<NodeId>,
        mode: Mode,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            mode: AtomicU32::new(mode),
            created_at: Utc::now(),
            body: NodeBody::Directory(DirectoryNode::default()),
        }
    }

    pub fn new_counter(id: NodeId, name: impl Into<String>, parent: NodeId, mode: Mode) -> Self {
        Self {
            id,
            name: name.into(),
            parent: Some(parent),
            mode: AtomicU32::new(mode),
            created_at: Utc::now(),
            body: NodeBody::Counter(CounterNode::default()),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn mode(&self) -> Mode {
        self.mode.load(Ordering::SeqCst)
    }

    /// Replace the advisory mode bits.
    pub fn set_mode(&self, mode: Mode) {
        self.mode.store(mode, Ordering::SeqCst)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn kind(&self) -> NodeKind {
        match &self.body {
            NodeBody::Directory(_) => NodeKind::Directory,
            NodeBody::Counter(_) => NodeKind::CounterFile,
        }
    }

    pub fn as_directory(&self) -> Option<&DirectoryNode> {
        match &self.body {
            NodeBody::Directory(dir) => Some(dir),
            NodeBody::Counter(_) => None,
        }
    }

    pub fn as_counter(&self) -> Option<&CounterNode> {
        match &self.body {
            NodeBody::Counter(counter) => Some(counter),
            NodeBody::Directory(_) => None,
        }
    }

    /// Link a child entry under this directory, enforcing name validity and
    /// per-directory uniqueness.
    pub fn link_child(&mut self, name: &str, id: NodeId) -> Result<(), FsError> {
        if !path::is_valid_name(name) {
            return Err(FsError::InvalidArgument(format!(
                "invalid entry name {name:?}"
            )));
        }
        match &mut self.body {
            NodeBody::Directory(dir) => dir.link(name.to_string(), id),
            NodeBody::Counter(_) => Err(FsError::NotADirectory(self.name.clone())),
        }
    }
}
