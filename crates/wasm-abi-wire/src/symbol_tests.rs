use proptest::prelude::*;

use super::*;

#[test]
fn symbol_code_layout() {
    let code: SymbolCode = "SYS".parse().unwrap();
    assert_eq!(code.as_u64(), 0x53_59_53);
    assert_eq!(code.to_string(), "SYS");
    assert_eq!(SymbolCode::from_raw(0x53_59_53).unwrap(), code);
}

#[test]
fn symbol_code_rejects() {
    assert!("".parse::<SymbolCode>().is_err());
    assert!("sys".parse::<SymbolCode>().is_err());
    assert!("ABCDEFGH".parse::<SymbolCode>().is_err());
    // gap between letters
    assert!(SymbolCode::from_raw(0x53_00_53).is_err());
    assert!(SymbolCode::from_raw(0).is_err());
}

#[test]
fn symbol_text_and_wire() {
    let symbol: Symbol = "4,SYS".parse().unwrap();
    assert_eq!(symbol.precision(), 4);
    assert_eq!(symbol.to_string(), "4,SYS");
    assert_eq!(pack_to_vec(&symbol), [4, b'S', b'Y', b'S', 0, 0, 0, 0]);
    assert_eq!(
        unpack_exact::<Symbol>(&[4, b'S', b'Y', b'S', 0, 0, 0, 0]).unwrap(),
        symbol
    );
}

#[test]
fn symbol_precision_bound() {
    assert!("18,SYS".parse::<Symbol>().is_ok());
    let err = "19,SYS".parse::<Symbol>().unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"symbol precision 19 exceeds 18");

    let err = unpack_exact::<Symbol>(&[19, b'S', 0, 0, 0, 0, 0, 0]).unwrap_err();
    assert_eq!(
        err,
        WireError::Malformed {
            offset: 0,
            reason: "invalid symbol"
        }
    );
}

#[test]
fn asset_text() {
    let asset: Asset = "1.0000 SYS".parse().unwrap();
    assert_eq!(asset.amount(), 10_000);
    assert_eq!(asset.symbol().precision(), 4);
    assert_eq!(asset.to_string(), "1.0000 SYS");

    let asset: Asset = "-0.0500 EOS".parse().unwrap();
    assert_eq!(asset.amount(), -500);
    assert_eq!(asset.to_string(), "-0.0500 EOS");

    let asset: Asset = "42 TOK".parse().unwrap();
    assert_eq!(asset.symbol().precision(), 0);
    assert_eq!(asset.to_string(), "42 TOK");
}

#[test]
fn asset_text_rejects() {
    assert!("1.0000".parse::<Asset>().is_err());
    assert!("1. SYS".parse::<Asset>().is_err());
    assert!(".5 SYS".parse::<Asset>().is_err());
    assert!("1,5 SYS".parse::<Asset>().is_err());
    assert!("1.0000000000000000000 SYS".parse::<Asset>().is_err());
    assert!("99999999999999999999 SYS".parse::<Asset>().is_err());
    assert!("4611686018427387904 SYS".parse::<Asset>().is_err());
}

#[test]
fn asset_wire() {
    let asset: Asset = "1.0000 SYS".parse().unwrap();
    let bytes = pack_to_vec(&asset);
    assert_eq!(
        bytes,
        [0x10, 0x27, 0, 0, 0, 0, 0, 0, 4, b'S', b'Y', b'S', 0, 0, 0, 0]
    );
    assert_eq!(unpack_exact::<Asset>(&bytes).unwrap(), asset);

    let mut out_of_range = pack_to_vec(&i64::MAX);
    out_of_range.extend_from_slice(&bytes[8..]);
    assert!(unpack_exact::<Asset>(&out_of_range).is_err());
}

proptest! {
    #[test]
    fn asset_text_round_trip(
        amount in -MAX_ASSET_AMOUNT..=MAX_ASSET_AMOUNT,
        precision in 0..=MAX_PRECISION,
        code in "[A-Z]{1,7}",
    ) {
        let symbol = Symbol::new(precision, code.parse().unwrap()).unwrap();
        let asset = Asset::new(amount, symbol).unwrap();
        let reparsed: Asset = asset.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, asset);
    }
}
