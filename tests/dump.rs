#![cfg(feature = "read")]

use arcmeta::read::{DumpFlags, DumpSummary};
use arcmeta::{dump, ErrorKind, Latin1, Utf8};
use std::time::{Duration, UNIX_EPOCH};

fn volume_header(date: i32, flags: i32, label: &[u8]) -> Vec<u8> {
    let mut data = vec![0u8; dump::TP_BSIZE];
    let mut put = |offset: usize, bytes: &[u8]| {
        data[offset..offset + bytes.len()].copy_from_slice(bytes);
    };
    put(dump::DATE_OFFSET, &date.to_be_bytes());
    put(dump::DDATE_OFFSET, &(date - 3600).to_be_bytes());
    put(dump::VOLUME_OFFSET, &1i32.to_be_bytes());
    put(dump::LABEL_OFFSET, label);
    put(dump::LEVEL_OFFSET, &0i32.to_be_bytes());
    put(dump::FILESYS_OFFSET, b"/");
    put(dump::DEVNAME_OFFSET, b"/dev/mapper/vg0-root");
    put(dump::HOST_OFFSET, b"backup.example.org");
    put(dump::FLAGS_OFFSET, &flags.to_be_bytes());
    put(dump::FIRSTREC_OFFSET, &2i32.to_be_bytes());
    put(dump::NTREC_OFFSET, &10i32.to_be_bytes());
    data
}

#[test]
fn decode_volume() {
    let data = volume_header(1000, 0x8081, b"backup   \0\0");
    let summary = DumpSummary::parse(&data, &Utf8).unwrap();
    assert_eq!(
        summary.dump_date(),
        UNIX_EPOCH + Duration::from_millis(1_000_000)
    );
    assert_eq!(summary.dump_date_millis(), 1_000_000);
    assert_eq!(summary.previous_dump_date_millis(), -2_600_000);
    assert_eq!(summary.volume(), 1);
    assert_eq!(summary.label(), "backup");
    assert_eq!(summary.level(), 0);
    assert_eq!(summary.filesystem(), "/");
    assert_eq!(summary.devname(), "/dev/mapper/vg0-root");
    assert_eq!(summary.hostname(), "backup.example.org");
    assert_eq!(summary.first_record(), 2);
    assert_eq!(summary.ntrec(), 10);

    assert!(summary.is_compressed());
    assert!(summary.is_extended_attributes());
    assert!(summary.is_new_header());
    assert!(!summary.is_new_inode());
    assert!(!summary.is_metadata_only());
}

#[test]
fn full_width_label() {
    // The label runs into the level field, which must still decode.
    let mut data = volume_header(0, 0x0003, b"0123456789abcdef");
    data[dump::LEVEL_OFFSET + 3] = 7;
    let summary = DumpSummary::parse(&data, &Utf8).unwrap();
    assert_eq!(summary.label(), "0123456789abcdef");
    assert_eq!(summary.level(), 7);
}

#[test]
fn strict_encoding() {
    let data = volume_header(1000, 0x0003, b"b\xffckup");
    let error = DumpSummary::parse(&data, &Utf8).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Decode);

    let summary = DumpSummary::parse(&data, &Latin1).unwrap();
    assert_eq!(summary.label(), "b\u{ff}ckup");
}

#[test]
fn later_volume_edits() {
    let data = volume_header(1000, 0x0003, b"weekly");
    let mut summary = DumpSummary::parse(&data, &Utf8).unwrap();
    let first = summary.clone();

    summary.set_volume(2);
    summary.set_first_record(4711);
    summary.set_flags(DumpFlags::from_bits(
        summary.flags().bits() | dump::DR_COMPRESSED,
    ));
    assert!(summary.is_compressed());
    assert_eq!(summary, first);

    summary.set_dump_date(UNIX_EPOCH + Duration::from_secs(2000));
    assert_ne!(summary, first);
}
