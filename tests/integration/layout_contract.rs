//! Contract checks for the fixed namespace layout and its serialized views.

use countfs::error::FsError;
use countfs::host::{Mount, MountOptions};
use countfs::store::NamespaceStore;
use countfs::tree::NodeKind;
use countfs::types::FS_MAGIC;
use countfs::views;

#[test]
fn every_fixed_path_resolves_and_opens() {
    let store = NamespaceStore::initialize("countfs").unwrap();

    for path in ["/counter", "/subdir/subcounter"] {
        let node = store.resolve(path).unwrap();
        let handle = store.open(node).unwrap();
        assert_eq!(handle.node(), node);
        store.close(handle);
    }

    let subdir = store.resolve("/subdir").unwrap();
    assert_eq!(store.node(subdir).unwrap().kind(), NodeKind::Directory);
}

#[test]
fn unknown_paths_fail_with_not_found() {
    let store = NamespaceStore::initialize("countfs").unwrap();
    assert!(matches!(store.resolve("/nope"), Err(FsError::NotFound(_))));
    assert!(matches!(
        store.resolve("/subdir/missing"),
        Err(FsError::NotFound(_))
    ));
}

#[test]
fn traversal_through_a_file_fails_with_not_a_directory() {
    let store = NamespaceStore::initialize("countfs").unwrap();
    assert!(matches!(
        store.resolve("/counter/x"),
        Err(FsError::NotADirectory(_))
    ));
}

#[test]
fn node_identifiers_are_distinct_and_stable() {
    let store = NamespaceStore::initialize("countfs").unwrap();
    let first = store.resolve("/counter").unwrap();
    let second = store.resolve("/counter").unwrap();
    assert_eq!(first, second);

    let all = [
        store.root(),
        store.resolve("/counter").unwrap(),
        store.resolve("/subdir").unwrap(),
        store.resolve("/subdir/subcounter").unwrap(),
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn layout_view_json_contract_has_required_fields() {
    let store = NamespaceStore::initialize("countfs").unwrap();
    let listing = views::list_tree(&store);

    let json = serde_json::to_value(&listing).unwrap();
    let entries = json.as_array().expect("listing serializes as an array");
    assert_eq!(entries.len(), 4);

    for entry in entries {
        assert!(entry.get("path").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("kind").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("mode").and_then(|v| v.as_str()).is_some());
        assert!(entry.get("ino").and_then(|v| v.as_i64()).is_some());
    }

    let paths: Vec<&str> = entries
        .iter()
        .filter_map(|e| e.get("path").and_then(|v| v.as_str()))
        .collect();
    assert_eq!(paths, vec!["/", "/counter", "/subdir/", "/subdir/subcounter"]);
}

#[test]
fn statfs_reports_fixed_identity() {
    let mount = Mount::mount(MountOptions {
        label: "scratch".to_string(),
    })
    .unwrap();

    let stats = mount.store().statfs();
    assert_eq!(stats.magic, FS_MAGIC);
    assert_eq!(stats.block_size, 4096);
    assert_eq!(stats.total_nodes, 4);
    assert_eq!(mount.store().label(), "scratch");

    mount.unmount();
}

#[test]
fn metadata_round_trips_through_json() {
    let store = NamespaceStore::initialize("countfs").unwrap();
    let attr = store.metadata(store.resolve("/counter").unwrap()).unwrap();

    let json = serde_json::to_value(&attr).unwrap();
    assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("counter"));
    assert_eq!(
        json.get("kind").and_then(|v| v.as_str()),
        Some("counter_file")
    );
    assert!(json.get("created_at").and_then(|v| v.as_str()).is_some());
}
