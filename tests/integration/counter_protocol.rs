//! End-to-end checks of the counter read/write wire protocol through the
//! mount adapter.

use countfs::error::FsError;
use countfs::host::{Mount, MountOptions};
use proptest::prelude::*;

fn mounted() -> Mount {
    Mount::mount(MountOptions::default()).unwrap()
}

#[test]
fn fresh_counter_reads_zero_and_advances() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();

    let mut buf = [0u8; 32];
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"0\n");

    // Each zero-offset read is a read-and-increment.
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"1\n");
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"2\n");
}

#[test]
fn continuation_reads_see_the_initial_snapshot() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();
    mount.write_at(&handle, 0, b"41").unwrap();

    let mut buf = [0u8; 1];
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"4");

    // The counter advanced to 42, but offsets 1.. still slice "41\n".
    let mut rest = [0u8; 8];
    let n = mount.read_at(&handle, 1, &mut rest).unwrap();
    assert_eq!(&rest[..n], b"1\n");
}

#[test]
fn read_past_end_of_stream_is_empty() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();

    let mut buf = [0u8; 32];
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"0\n");

    let n = mount.read_at(&handle, 16, &mut buf).unwrap();
    assert_eq!(n, 0);
}

#[test]
fn write_sets_the_counter() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();

    assert_eq!(mount.write_at(&handle, 0, b"42").unwrap(), 2);

    let mut buf = [0u8; 32];
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"42\n");
    let n = mount.read_at(&handle, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"43\n");
}

#[test]
fn write_at_nonzero_offset_is_invalid() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();
    assert!(matches!(
        mount.write_at(&handle, 3, b"42"),
        Err(FsError::InvalidArgument(_))
    ));
}

#[test]
fn oversized_write_is_invalid() {
    let mount = mounted();
    let handle = mount.open_path("/counter").unwrap();
    let payload = [b'1'; 20];
    assert!(matches!(
        mount.write_at(&handle, 0, &payload),
        Err(FsError::InvalidArgument(_))
    ));
    // 19 bytes still fit the bound.
    assert_eq!(mount.write_at(&handle, 0, &payload[..19]).unwrap(), 19);
}

#[test]
fn handles_share_one_counter_per_path() {
    let mount = mounted();
    let a = mount.open_path("/counter").unwrap();
    let b = mount.open_path("/counter").unwrap();

    mount.write_at(&a, 0, b"5").unwrap();
    let mut buf = [0u8; 32];
    let n = mount.read_at(&b, 0, &mut buf).unwrap();
    assert_eq!(&buf[..n], b"5\n");
}

proptest! {
    // Any value that fits the wire bound survives a write and is rendered
    // back with trailing junk after the digits ignored on the way in.
    #[test]
    fn written_values_read_back(value in -999_999_999_999i64..=999_999_999_999i64, junk in "[ a-z]{0,4}") {
        let mount = mounted();
        let handle = mount.open_path("/subdir/subcounter").unwrap();

        let payload = format!("{value}{junk}");
        prop_assume!(payload.len() < 20);
        mount.write_at(&handle, 0, payload.as_bytes()).unwrap();

        let mut buf = [0u8; 32];
        let n = mount.read_at(&handle, 0, &mut buf).unwrap();
        let expected = format!("{value}\n");
        prop_assert_eq!(&buf[..n], expected.as_bytes());
    }
}
