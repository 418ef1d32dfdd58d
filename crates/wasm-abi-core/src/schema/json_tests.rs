use indoc::indoc;

use super::*;

const TOKEN_ABI: &str = indoc! {r#"
    {
        "version": "wasm::abi/1.1",
        "types": [{ "new_type_name": "account_name", "type": "name" }],
        "structs": [
            {
                "name": "transfer",
                "base": "",
                "fields": [
                    { "name": "from", "type": "account_name" },
                    { "name": "to", "type": "account_name" },
                    { "name": "quantity", "type": "asset" },
                    { "name": "memo", "type": "string" }
                ]
            },
            {
                "name": "account",
                "fields": [{ "name": "balance", "type": "asset" }]
            }
        ],
        "actions": [
            { "name": "transfer", "type": "transfer", "ricardian_contract": "" }
        ],
        "tables": [
            {
                "name": "accounts",
                "type": "account",
                "index_type": "i64",
                "key_names": ["currency"],
                "key_types": ["uint64"]
            }
        ],
        "ricardian_clauses": [],
        "error_messages": [],
        "abi_extensions": []
    }
"#};

#[test]
fn parse_token_abi() {
    let schema = Schema::from_json(TOKEN_ABI).unwrap();

    assert_eq!(schema.version, "wasm::abi/1.1");
    assert_eq!(schema.types[0].new_type_name, "account_name");
    assert_eq!(schema.types[0].type_name, "name");
    assert_eq!(schema.structs.len(), 2);
    assert_eq!(schema.actions[0].type_name, "transfer");
    assert_eq!(schema.tables[0].key_types, ["uint64"]);
}

#[test]
fn preserves_field_order() {
    let schema = Schema::from_json(TOKEN_ABI).unwrap();
    let names: Vec<_> = schema.structs[0]
        .fields
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, ["from", "to", "quantity", "memo"]);
}

#[test]
fn missing_base_is_empty() {
    let schema = Schema::from_json(TOKEN_ABI).unwrap();
    let account = &schema.structs[1];
    assert!(!account.has_base());
    assert_eq!(account.base, "");
}

#[test]
fn missing_sections_default_to_empty() {
    let schema = Schema::from_json(r#"{ "version": "wasm::abi/1.0" }"#).unwrap();
    assert_eq!(schema, Schema::new("wasm::abi/1.0"));
}

#[test]
fn builder_matches_document() {
    let json = indoc! {r#"
        {
            "version": "wasm::abi/1.0",
            "types": [{ "new_type_name": "amount", "type": "uint64" }],
            "structs": [
                { "name": "base", "base": "", "fields": [{ "name": "id", "type": "uint32" }] },
                { "name": "item", "base": "base", "fields": [{ "name": "n", "type": "amount" }] }
            ],
            "actions": [{ "name": "put", "type": "item" }],
            "tables": [{ "name": "items", "type": "item" }]
        }
    "#};

    let built = Schema::new("wasm::abi/1.0")
        .with_type("amount", "uint64")
        .with_struct(StructDef::new("base").field("id", "uint32"))
        .with_struct(StructDef::new("item").base("base").field("n", "amount"))
        .with_action("put", "item")
        .with_table("items", "item");

    assert_eq!(Schema::from_json(json).unwrap(), built);
}

#[test]
fn malformed_document() {
    let err = Schema::from_json(r#"{ "version": 1 }"#).unwrap_err();
    assert!(matches!(err, SchemaError::Json(_)));
    assert!(err.to_string().starts_with("JSON parse error: "));

    // a field without a type
    let err = Schema::from_json(r#"{ "structs": [{ "name": "s", "fields": [{ "name": "a" }] }] }"#)
        .unwrap_err();
    assert!(err.to_string().contains("type"));
}
