use ne_extract::ne::scoped;
use ne_extract::ne::table::{self, RawId, MAX_NAME_LEN};
use ne_extract::ne::types;
use ne_extract::{ErrorKind, ResourceKind, ResourceName};
use std::io::{Cursor, Read, Seek, SeekFrom};

fn counted_at(offset: usize, s: &[u8]) -> Vec<u8> {
    let mut data = vec![0xEEu8; offset];
    data.push(s.len() as u8);
    data.extend_from_slice(s);
    data.extend_from_slice(b"tail");
    data
}

#[test]
fn test_classify_ids() {
    assert_eq!(RawId::classify(0x8007), RawId::Integer(7));
    assert_eq!(RawId::classify(0x0024), RawId::Named(0x24));
    assert_eq!(RawId::classify(0xFFFF), RawId::Integer(0x7FFF));
}

#[test]
fn test_counted_string_leaves_position_alone() {
    let mut reader = Cursor::new(counted_at(10, b"ICONS"));
    reader.seek(SeekFrom::Start(3)).unwrap();

    let s = table::read_counted_string(&mut reader, 10, MAX_NAME_LEN).unwrap();
    assert_eq!(s, "ICONS");
    assert_eq!(reader.stream_position().unwrap(), 3);

    let mut next = [0u8; 1];
    reader.read_exact(&mut next).unwrap();
    assert_eq!(next[0], 0xEE);
}

#[test]
fn test_counted_string_longer_than_limit() {
    let mut reader = Cursor::new(counted_at(0, b"TOOLONG"));
    let err = table::read_counted_string(&mut reader, 0, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(reader.stream_position().unwrap(), 0);
}

#[test]
fn test_counted_string_truncated_is_read_error() {
    let mut reader = Cursor::new(vec![9u8, b'a', b'b']);
    let err = table::read_counted_string(&mut reader, 0, MAX_NAME_LEN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Read);
}

#[test]
fn test_resolve_relative_to_table_base() {
    let mut reader = Cursor::new(counted_at(0x30, b"ABOUTBOX"));
    let kind = table::resolve_type(&mut reader, 0x10, 0x20).unwrap();
    assert_eq!(kind, ResourceKind::Custom("ABOUTBOX".to_string()));

    let name = table::resolve_name(&mut reader, 0x10, 0x20).unwrap();
    assert_eq!(name.to_string(), "ABOUTBOX");
    assert_eq!(table::resolve_name(&mut reader, 0x8007, 0x20).unwrap(), ResourceName::Id(7));
    assert_eq!(ResourceName::Id(7).to_string(), "00007");
}

#[test]
fn test_builtin_type_table() {
    assert_eq!(types::BUILTIN_TYPES.len(), 25);
    assert_eq!(types::name_of(1), "cursor");
    assert_eq!(types::extension_of(6), "string.rc");
    assert_eq!(types::name_of(24), "manifest");
    for unmapped in [0u16, 14, 15, 18, 25, 0x7FFF] {
        assert_eq!(types::name_of(unmapped), format!("unknown({})", unmapped));
        assert_eq!(types::extension_of(unmapped), "bin");
    }
    assert_eq!(ResourceKind::BuiltIn(30).extension(), "bin");
}

#[test]
fn test_scoped_access_restores_after_failure() {
    let mut reader = Cursor::new(vec![0u8; 4]);
    reader.seek(SeekFrom::Start(2)).unwrap();

    let res: ne_extract::ne::error::Result<()> = scoped::at_offset(&mut reader, 0, "probe", |r| {
        let mut big = [0u8; 16];
        r.read_exact(&mut big).map_err(|source| ne_extract::NeError::Read { context: "probe", source })
    });
    assert!(res.is_err());
    assert_eq!(reader.stream_position().unwrap(), 2);
}
