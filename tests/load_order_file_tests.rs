//! Integration tests for the usersettings.ini load order codec
//!
//! These tests verify:
//! - Reading the section into preamble / order / postamble
//! - Write-then-read round trips
//! - Byte-identical preservation of everything outside the section
//! - Error reporting for missing sections and missing files

use camino::{Utf8Path, Utf8PathBuf};
use proptest::prelude::*;
use seapower_modman::services::BodyLine;
use seapower_modman::{LoadOrder, LoadOrderCodec, ModOrderError};
use std::fs;
use tempfile::TempDir;

const USERSETTINGS: &str = "[Audio]\r\n\
MasterVolume=0.8\r\n\
\r\n\
[LoadOrder]\r\n\
Slot1Directory=2871823014\r\n\
Slot2Directory=2899415331\r\n\
Slot3Directory=3001122334\r\n\
\r\n\
[Graphics]\r\n\
Resolution=2560x1440\r\n";

fn write_fixture(content: &str) -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let path = dir.join("usersettings.ini");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

#[test]
fn test_read_splits_file_around_section() {
    let (_temp_dir, path) = write_fixture(USERSETTINGS);
    let section = LoadOrderCodec::default().read(&path).unwrap();

    assert_eq!(
        section.preamble,
        vec!["[Audio]\r\n", "MasterVolume=0.8\r\n", "\r\n", "[LoadOrder]\r\n"]
    );
    assert_eq!(
        section.current_order(),
        vec!["2871823014", "2899415331", "3001122334"]
    );
    assert_eq!(
        section.postamble,
        vec!["\r\n", "[Graphics]\r\n", "Resolution=2560x1440\r\n"]
    );
}

#[test]
fn test_read_keeps_unrecognized_body_lines() {
    let (_temp_dir, path) =
        write_fixture("[LoadOrder]\nVersion=2\nSlot1Directory=a\n; note\nSlot2Directory=b\n");
    let section = LoadOrderCodec::default().read(&path).unwrap();

    assert_eq!(section.body.len(), 4);
    assert_eq!(section.body[0], BodyLine::Other("Version=2\n".to_string()));
    assert_eq!(section.body[2].raw(), "; note\n");
    assert_eq!(section.current_order(), vec!["a", "b"]);
    assert!(section.postamble.is_empty());
}

#[test]
fn test_read_uses_file_order_not_slot_numbers() {
    let (_temp_dir, path) = write_fixture("[LoadOrder]\nSlot2Directory=b\nSlot1Directory=a\n");
    let order = LoadOrderCodec::default().read_order(&path).unwrap();
    assert_eq!(order, Some(vec!["b".to_string(), "a".to_string()]));
}

#[test]
fn test_out_of_range_slot_number_survives_write() {
    let overflow = "Slot99999999999999999999999Directory=keep\n";
    let (_temp_dir, path) = write_fixture(&format!("[LoadOrder]\nSlot1Directory=a\n{overflow}"));
    let codec = LoadOrderCodec::default();

    let section = codec.read(&path).unwrap();
    assert_eq!(section.body[1], BodyLine::Other(overflow.to_string()));
    assert_eq!(section.current_order(), vec!["a"]);

    codec
        .write(&path, &LoadOrder::from_identities(["a"]).unwrap())
        .unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        format!("[LoadOrder]\nSlot1Directory=a\n{overflow}")
    );
    assert_eq!(codec.read(&path).unwrap().body, section.body);
}

#[test]
fn test_write_reorders_and_preserves_other_sections() {
    let (_temp_dir, path) = write_fixture(USERSETTINGS);
    let codec = LoadOrderCodec::default();

    let order = LoadOrder::from_identities(["3001122334", "2871823014", "2899415331"]).unwrap();
    codec.write(&path, &order).unwrap();

    let expected = USERSETTINGS
        .replace("Slot1Directory=2871823014", "Slot1Directory=3001122334")
        .replace("Slot2Directory=2899415331", "Slot2Directory=2871823014")
        .replace("Slot3Directory=3001122334", "Slot3Directory=2899415331");
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

#[test]
fn test_write_can_grow_and_shrink_section() {
    let (_temp_dir, path) = write_fixture(USERSETTINGS);
    let codec = LoadOrderCodec::default();

    let grown = LoadOrder::from_identities(["a", "b", "c", "d", "e"]).unwrap();
    codec.write(&path, &grown).unwrap();
    assert_eq!(codec.read(&path).unwrap().current_order(), grown.identities());

    let shrunk = LoadOrder::from_identities(["e"]).unwrap();
    codec.write(&path, &shrunk).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("[LoadOrder]\r\nSlot1Directory=e\r\n\r\n[Graphics]"));
}

#[test]
fn test_missing_section() {
    let (_temp_dir, path) = write_fixture("[Audio]\nMasterVolume=1\n");
    let codec = LoadOrderCodec::default();

    assert!(matches!(
        codec.read(&path),
        Err(ModOrderError::SectionNotFound { .. })
    ));
    assert_eq!(codec.read_order(&path).unwrap(), None);

    let order = LoadOrder::from_identities(["a"]).unwrap();
    assert!(matches!(
        codec.write(&path, &order),
        Err(ModOrderError::SectionNotFound { .. })
    ));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[Audio]\nMasterVolume=1\n"
    );
}

#[test]
fn test_missing_section_leaves_no_temp_files() {
    let (temp_dir, path) = write_fixture("nothing here\n");
    let order = LoadOrder::from_identities(["a"]).unwrap();
    let _ = LoadOrderCodec::default().write(&path, &order);

    let files = fs::read_dir(temp_dir.path()).unwrap().count();
    assert_eq!(files, 1);
}

#[test]
fn test_missing_file_is_io_error() {
    let codec = LoadOrderCodec::default();
    let path = Utf8Path::new("/definitely/not/here/usersettings.ini");
    let order = LoadOrder::from_identities(["a"]).unwrap();

    assert!(matches!(codec.read(path), Err(ModOrderError::Io { .. })));
    assert!(matches!(codec.read_order(path), Err(ModOrderError::Io { .. })));
    assert!(matches!(codec.write(path, &order), Err(ModOrderError::Io { .. })));
}

#[test]
fn test_marker_must_match_whole_line() {
    let (_temp_dir, path) = write_fixture("[LoadOrder] ; old\nSlot1Directory=a\n");
    assert!(matches!(
        LoadOrderCodec::default().read(&path),
        Err(ModOrderError::SectionNotFound { .. })
    ));
}

fn unique_identities() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[A-Za-z0-9_]{1,12}", 0..16)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn prop_write_then_read_round_trips(ids in unique_identities()) {
        let (_temp_dir, path) = write_fixture(USERSETTINGS);
        let codec = LoadOrderCodec::default();
        let order = LoadOrder::from_identities(ids.clone()).unwrap();

        codec.write(&path, &order).unwrap();
        prop_assert_eq!(codec.read(&path).unwrap().current_order(), ids);
    }

    #[test]
    fn prop_lines_outside_section_are_untouched(
        before in prop::collection::vec("[A-Za-z]{1,8}=[a-z0-9 ]{0,8}", 0..6),
        after in prop::collection::vec("[A-Za-z]{0,8}=?[a-z0-9]{0,8}", 0..6),
        ids in unique_identities(),
        crlf in any::<bool>(),
    ) {
        let newline = if crlf { "\r\n" } else { "\n" };
        let head: String = before.iter().map(|line| format!("{line}{newline}")).collect();
        let tail: String = after.iter().map(|line| format!("{line}{newline}")).collect();
        let content = format!(
            "{head}[LoadOrder]{newline}Slot1Directory=old{newline}{newline}{tail}"
        );

        let (_temp_dir, path) = write_fixture(&content);
        let codec = LoadOrderCodec::default();
        let original = codec.read(&path).unwrap();

        let order = LoadOrder::from_identities(ids).unwrap();
        codec.write(&path, &order).unwrap();
        let rewritten = codec.read(&path).unwrap();

        prop_assert_eq!(&rewritten.preamble, &original.preamble);
        prop_assert_eq!(&rewritten.postamble, &original.postamble);
        prop_assert_eq!(rewritten.current_order(), order.identities().to_vec());
    }
}
