//! Mount host adapter.
//!
//! The explicit constructor/destructor surface an external host drives:
//! `mount` builds the namespace once, `unmount` tears it down, and the
//! path/buffer/offset call shapes here translate host-native filesystem
//! requests into store operations. No global filesystem-type registry is
//! modeled; the host owns the [`Mount`] it created.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FsError;
use crate::store::{Handle, NamespaceStore};
use crate::types::NodeId;

/// Options supplied by the host at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountOptions {
    /// Caller-defined root label, surfaced in logs and the root node name.
    #[serde(default = "default_label")]
    pub label: String,
}

pub(crate) fn default_label() -> String {
    "countfs".to_string()
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}

/// A mounted counter filesystem.
pub struct Mount {
    store: NamespaceStore,
}

impl Mount {
    /// Build the namespace; one call per mount.
    pub fn mount(options: MountOptions) -> Result<Self, FsError> {
        info!(label = options.label.as_str(), "mounting counter filesystem");
        let store = NamespaceStore::initialize(&options.label)?;
        Ok(Self { store })
    }

    /// The underlying store, for hosts that dispatch on node identifiers.
    pub fn store(&self) -> &NamespaceStore {
        &self.store
    }

    /// Root node handle for the host's directory-entry cache.
    pub fn root(&self) -> NodeId {
        self.store.root()
    }

    /// Resolve and open a counter file in one step.
    pub fn open_path(&self, path: &str) -> Result<Handle, FsError> {
        let node = self.store.resolve(path)?;
        self.store.open(node)
    }

    /// Read into a caller-owned buffer; returns the byte count filled.
    pub fn read_at(&self, handle: &Handle, offset: u64, buf: &mut [u8]) -> Result<usize, FsError> {
        let bytes = self.store.read(handle, offset, buf.len())?;
        buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(bytes.len())
    }

    /// Write from a caller-owned buffer; returns the byte count consumed.
    pub fn write_at(&self, handle: &Handle, offset: u64, buf: &[u8]) -> Result<usize, FsError> {
        self.store.write(handle, offset, buf)
    }

    /// Release a handle obtained from [`Mount::open_path`].
    pub fn close(&self, handle: Handle) {
        self.store.close(handle)
    }

    /// Tear the namespace down; one call per unmount.
    pub fn unmount(self) {
        info!(
            label = self.store.label(),
            "unmounting counter filesystem"
        );
        self.store.teardown();
    }
}
