use super::*;

fn sample() -> Schema {
    Schema::new("wasm::abi/1.0")
        .with_type("amount", "uint64")
        .with_struct(StructDef::new("transfer").field("to", "string").field("amount", "amount"))
        .with_struct(StructDef::new("ext").base("transfer").field("memo", "string$"))
        .with_action("transfer", "transfer")
        .with_table("transfers", "ext")
}

#[test]
fn roundtrip() {
    let schema = sample();
    let binary = schema.to_binary().unwrap();
    let decoded = Schema::from_binary(&binary).unwrap();

    assert_eq!(decoded, schema);
}

#[test]
fn roundtrip_preserves_order() {
    let binary = sample().to_binary().unwrap();
    let decoded = Schema::from_binary(&binary).unwrap();

    assert_eq!(decoded.structs[0].name, "transfer");
    assert_eq!(decoded.structs[1].name, "ext");
    assert_eq!(decoded.structs[0].fields[1].name, "amount");
}

#[test]
fn truncated_binary() {
    let binary = sample().to_binary().unwrap();
    let err = Schema::from_binary(&binary[..binary.len() / 2]).unwrap_err();
    assert!(matches!(err, SchemaError::Binary(_)));
}
