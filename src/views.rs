//! Namespace Views
//!
//! Read-only, serializable listings of the fixed layout for host status and
//! introspection surfaces.

use serde::{Deserialize, Serialize};

use crate::store::NamespaceStore;
use crate::tree::NodeKind;
use crate::types::NodeId;

/// One entry in a layout listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    /// Absolute path; directories other than the root carry a trailing `/`.
    pub path: String,
    pub kind: NodeKind,
    /// Octal mode string, e.g. `"0644"`.
    pub mode: String,
    pub ino: NodeId,
}

/// Depth-first listing of the namespace, children in creation order.
pub fn list_tree(store: &NamespaceStore) -> Vec<EntryView> {
    let mut entries = Vec::new();
    walk(store, store.root(), "", &mut entries);
    entries
}

fn walk(store: &NamespaceStore, id: NodeId, prefix: &str, out: &mut Vec<EntryView>) {
    let Ok(node) = store.node(id) else {
        return;
    };
    let is_root = node.parent().is_none();
    let path = match node.kind() {
        _ if is_root => "/".to_string(),
        NodeKind::Directory => format!("{prefix}/{}/", node.name()),
        NodeKind::CounterFile => format!("{prefix}/{}", node.name()),
    };
    out.push(EntryView {
        path: path.clone(),
        kind: node.kind(),
        mode: format!("{:04o}", node.mode()),
        ino: node.id(),
    });

    if let Some(dir) = node.as_directory() {
        let child_prefix = if is_root {
            String::new()
        } else {
            format!("{prefix}/{}", node.name())
        };
        for (_, child) in dir.entries() {
            walk(store, child, &child_prefix, out);
        }
    }
}
