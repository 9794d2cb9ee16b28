//! Integration tests for archive object records and record lists.

mod common;

use common::{build_list, kernel_package, random_bytes};
use npk_zlib::record::{FileMode, HEADER_LEN, ObjectList, ObjectRecord};
use npk_zlib::{Error, Timestamps};

#[test]
fn test_boot_directory_record() {
    let record = ObjectRecord::create(FileMode::directory(0o755), "boot", b"").unwrap();
    assert_eq!(record.full_len(), 34);
    assert_eq!(record.name_len(), 4);
    assert_eq!(record.payload_len(), 0);

    let rescanned = ObjectRecord::from_bytes(record.binary().to_vec());
    assert_eq!(rescanned.mode(), record.mode());
    assert_eq!(rescanned.name().unwrap(), "boot");
    assert_eq!(rescanned.payload(), b"");
    assert_eq!(rescanned, record);
}

#[test]
fn test_grow_name_len_keeps_payload() {
    let payload = random_bytes(300, 1);
    let mut record = ObjectRecord::create(FileMode::regular(0o644), "boot", &payload).unwrap();

    record.set_name_len(8);

    assert_eq!(record.name_len(), 8);
    assert_eq!(record.name_bytes(), b"boot\0\0\0\0");
    assert_eq!(record.payload(), payload);
    assert_eq!(record.full_len(), HEADER_LEN + 8 + 300);
}

#[test]
fn test_shrink_name_len_keeps_payload() {
    let mut record = ObjectRecord::create(FileMode::regular(0o644), "bin/bash", b"data").unwrap();
    record.set_name_len(3);
    assert_eq!(record.name_bytes(), b"bin");
    assert_eq!(record.payload(), b"data");
}

#[test]
fn test_set_payload_and_name_update_lengths() {
    let mut record = ObjectRecord::create(FileMode::regular(0o755), "a", b"xyz").unwrap();

    record.set_payload(&[7u8; 1000]).unwrap();
    assert_eq!(record.payload_len(), 1000);
    assert_eq!(record.name().unwrap(), "a");

    record.set_name("lib/modules/a.ko").unwrap();
    assert_eq!(record.name_len(), 16);
    assert_eq!(record.payload(), &[7u8; 1000][..]);
    assert_eq!(record.full_len(), HEADER_LEN + 16 + 1000);
}

#[test]
fn test_non_ascii_name_rejected_without_change() {
    let mut record = ObjectRecord::create(FileMode::regular(0o644), "ok", b"1").unwrap();
    let before = record.clone();

    let err = record.set_name("caf\u{e9}").unwrap_err();
    assert!(matches!(err, Error::InvalidName { position: 3, .. }));
    assert_eq!(record, before);
}

#[test]
fn test_oversized_payload_len_is_zero_padded() {
    let mut header = vec![0u8; HEADER_LEN];
    // payload_len = 10, name_len = 2
    header[24..28].copy_from_slice(&10u32.to_le_bytes());
    header[28..30].copy_from_slice(&2u16.to_le_bytes());
    header.extend_from_slice(b"ab123");

    let record = ObjectRecord::from_bytes(header);
    assert_eq!(record.full_len(), HEADER_LEN + 2 + 10);
    assert_eq!(record.name().unwrap(), "ab");
    assert_eq!(record.payload(), b"123\0\0\0\0\0\0\0");
}

#[test]
fn test_partial_header_still_declares_payload() {
    // 28 bytes: the payload length is present, the name length is not
    let mut blob = vec![0u8; 28];
    blob[24..28].copy_from_slice(&5u32.to_le_bytes());

    let scanned = ObjectList::scan(&blob);
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].payload_len(), 5);
    assert_eq!(scanned[0].full_len(), HEADER_LEN + 5);
    assert_eq!(&scanned.flatten()[..28], &blob[..]);
}

#[test]
fn test_excess_bytes_are_truncated() {
    let record = ObjectRecord::create(FileMode::regular(0o644), "x", b"12").unwrap();
    let mut binary = record.binary().to_vec();
    binary.extend_from_slice(b"garbage");

    let repaired = ObjectRecord::from_bytes(binary);
    assert_eq!(repaired, record);
}

#[test]
fn test_timestamps_round_trip_through_binary() {
    let mut record = ObjectRecord::create(FileMode::regular(0o644), "t", b"").unwrap();
    record.set_timestamps(Timestamps::new([1, 2, 3]));

    let rescanned = ObjectRecord::from_bytes(record.into_binary());
    assert_eq!(rescanned.timestamps().raw(), [1, 2, 3]);
}

#[test]
fn test_scan_recovers_records_in_order() {
    let list = build_list(&[
        (FileMode::directory(0o755), "boot", b""),
        (FileMode::regular(0o755), "boot/kernel", &random_bytes(4096, 2)),
        (FileMode::directory(0o755), "lib", b""),
        (FileMode::regular(0o644), "lib/libc.so", &random_bytes(77, 3)),
        (FileMode::regular(0o644), "UPGRADED", &[0u8; 0x20]),
    ]);
    let blob = list.flatten();

    let scanned = ObjectList::scan(&blob);
    assert_eq!(scanned.len(), 5);
    for (original, recovered) in list.iter().zip(scanned.iter()) {
        assert_eq!(recovered.mode(), original.mode());
        assert_eq!(recovered.name().unwrap(), original.name().unwrap());
        assert_eq!(recovered.payload(), original.payload());
        assert_eq!(recovered.timestamps(), original.timestamps());
    }
    assert_eq!(scanned.flatten(), blob);
}

#[test]
fn test_scan_empty_blob() {
    assert!(ObjectList::scan(&[]).is_empty());
}

#[test]
fn test_scan_truncated_last_record_is_padded() {
    let list = kernel_package(b"kernel image bytes");
    let mut blob = list.flatten();
    blob.truncate(blob.len() - 10);

    let scanned = ObjectList::scan(&blob);
    assert_eq!(scanned.len(), 3);
    let last = &scanned[2];
    assert_eq!(last.name().unwrap(), "UPGRADED");
    assert_eq!(last.full_len(), list[2].full_len());
    assert_eq!(scanned.flatten().len(), list.flatten().len());
}

#[test]
fn test_list_editing() {
    let mut list = kernel_package(b"\x7fELF");
    assert!(list.find("UPGRADED").is_some());

    list.retain(|record| record.name_bytes() != b"UPGRADED");
    assert_eq!(list.len(), 2);

    list.find_mut("boot/kernel")
        .unwrap()
        .set_payload(b"new kernel")
        .unwrap();
    let removed = list.remove(0);
    assert_eq!(removed.name().unwrap(), "boot");

    let scanned = ObjectList::scan(&list.flatten());
    assert_eq!(scanned.len(), 1);
    assert_eq!(scanned[0].payload(), b"new kernel");
}

#[test]
fn test_file_modes() {
    let list = kernel_package(b"");
    assert!(list[0].file_mode().is_dir());
    assert!(list[1].file_mode().is_file());
    assert_eq!(list[1].file_mode().permissions(), 0o755);
    assert_eq!(list[2].file_mode().to_string(), "0o100644");
}
