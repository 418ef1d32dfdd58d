use super::*;

#[test]
fn integers_are_little_endian() {
    assert_eq!(pack_to_vec(&0x0102_u16), [0x02, 0x01]);
    assert_eq!(pack_to_vec(&-2_i32), [0xfe, 0xff, 0xff, 0xff]);
    assert_eq!(pack_to_vec(&100_u64), [100, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(pack_to_vec(&1_u128).len(), 16);
    assert_eq!(pack_to_vec(&1.5_f32), 1.5_f32.to_le_bytes());
}

#[test]
fn bool_is_strict() {
    assert!(unpack_exact::<bool>(&[1]).unwrap());
    assert!(!unpack_exact::<bool>(&[0]).unwrap());
    let err = unpack_exact::<bool>(&[2]).unwrap_err();
    assert_eq!(
        err,
        WireError::Malformed {
            offset: 0,
            reason: "bool must be 0 or 1"
        }
    );
}

#[test]
fn string_is_length_prefixed() {
    assert_eq!(pack_to_vec(&"abc".to_string()), [3, b'a', b'b', b'c']);
    assert_eq!(unpack_exact::<String>(&[0]).unwrap(), "");
}

#[test]
fn string_rejects_invalid_utf8() {
    let err = unpack_exact::<String>(&[2, 0xc3, 0x28]).unwrap_err();
    assert_eq!(err.offset(), Some(1));
}

#[test]
fn string_length_past_end() {
    let err = unpack_exact::<String>(&[5, b'a']).unwrap_err();
    assert_eq!(err, WireError::Truncated { offset: 1, needed: 4 });
}

#[test]
fn vec_rejects_hostile_length_before_allocating() {
    // varuint32 0xffff_ffff followed by nothing
    let err = unpack_exact::<Vec<u64>>(&[0xff, 0xff, 0xff, 0xff, 0x0f]).unwrap_err();
    assert!(matches!(err, WireError::Truncated { offset: 5, .. }));
}

#[test]
fn vec_and_option_layout() {
    let v = vec![1_u16, 2];
    assert_eq!(pack_to_vec(&v), [2, 1, 0, 2, 0]);
    assert_eq!(unpack_exact::<Vec<u16>>(&[2, 1, 0, 2, 0]).unwrap(), v);

    assert_eq!(pack_to_vec(&None::<u8>), [0]);
    assert_eq!(pack_to_vec(&Some(9_u8)), [1, 9]);
    assert_eq!(unpack_exact::<Option<u8>>(&[1, 9]).unwrap(), Some(9));
}

#[test]
fn unpack_exact_rejects_trailing_bytes() {
    let err = unpack_exact::<u8>(&[1, 2]).unwrap_err();
    assert_eq!(
        err,
        WireError::Malformed {
            offset: 1,
            reason: "trailing bytes after value"
        }
    );
}

/// Fixed-layout record in the style of a transaction payload.
#[derive(Debug, PartialEq)]
struct Transfer {
    from: Name,
    to: Name,
    quantity: Asset,
    memo: String,
}

impl Pack for Transfer {
    fn pack(&self, w: &mut Writer) {
        self.from.pack(w);
        self.to.pack(w);
        self.quantity.pack(w);
        self.memo.pack(w);
    }

    fn unpack(r: &mut Reader<'_>) -> Result<Self, WireError> {
        Ok(Self {
            from: Name::unpack(r)?,
            to: Name::unpack(r)?,
            quantity: Asset::unpack(r)?,
            memo: String::unpack(r)?,
        })
    }
}

#[test]
fn fixed_layout_record() {
    let transfer = Transfer {
        from: "alice".parse().unwrap(),
        to: "bob".parse().unwrap(),
        quantity: "1.0000 SYS".parse().unwrap(),
        memo: "hi".into(),
    };
    let bytes = pack_to_vec(&transfer);
    assert_eq!(bytes.len(), 8 + 8 + 16 + 3);
    assert_eq!(unpack_exact::<Transfer>(&bytes).unwrap(), transfer);

    let err = unpack_exact::<Transfer>(&bytes[..20]).unwrap_err();
    assert!(matches!(err, WireError::Truncated { offset: 16, .. }));
}

#[test]
fn length_prefix_fits_varuint32() {
    assert_eq!(checked_len(0), Ok(0));
    assert_eq!(checked_len(u32::MAX as usize), Ok(u32::MAX));
}

#[cfg(target_pointer_width = "64")]
#[test]
fn length_prefix_beyond_u32_is_rejected() {
    let err = checked_len(u32::MAX as usize + 1).unwrap_err();
    assert_eq!(
        err,
        WireError::Invalid("length 4294967296 does not fit a varuint32 prefix".to_owned())
    );
}
