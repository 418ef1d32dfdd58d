use super::*;

#[test]
fn reader_tracks_position() {
    let mut r = Reader::new(&[1, 2, 3, 4]);
    assert_eq!(r.read_u8().unwrap(), 1);
    assert_eq!(r.position(), 1);
    assert_eq!(r.read_bytes(2).unwrap(), &[2, 3]);
    assert_eq!(r.remaining(), 1);
    assert!(!r.is_empty());
    assert_eq!(r.read_array::<1>().unwrap(), [4]);
    assert!(r.is_empty());
}

#[test]
fn reader_short_read_reports_offset() {
    let mut r = Reader::new(&[1, 2, 3]);
    r.read_u8().unwrap();
    let err = r.read_array::<4>().unwrap_err();
    assert_eq!(err, WireError::Truncated { offset: 1, needed: 2 });
    assert_eq!(err.offset(), Some(1));
    // failed reads do not advance
    assert_eq!(r.position(), 1);
}

#[test]
fn reader_zero_length_read_at_end() {
    let mut r = Reader::new(&[]);
    assert_eq!(r.read_bytes(0).unwrap(), &[] as &[u8]);
    assert!(r.read_u8().is_err());
}

#[test]
fn writer_collects_bytes() {
    let mut w = Writer::with_capacity(64);
    assert!(w.is_empty());
    w.write_u8(7);
    w.write_bytes(&[8, 9]);
    assert_eq!(w.len(), 3);
    assert_eq!(w.as_slice(), &[7, 8, 9]);

    let bytes = w.into_bytes();
    assert_eq!(bytes, [7, 8, 9]);
    assert!(bytes.capacity() < 64);
}

#[test]
fn wire_error_display() {
    let err = WireError::Truncated {
        offset: 4,
        needed: 2,
    };
    insta::assert_snapshot!(err.to_string(), @"unexpected end of input at offset 4 (needed 2 more bytes)");

    let err = WireError::Malformed {
        offset: 0,
        reason: "bool must be 0 or 1",
    };
    insta::assert_snapshot!(err.to_string(), @"malformed input at offset 0: bool must be 0 or 1");
    assert_eq!(WireError::Invalid("x".into()).offset(), None);
}
