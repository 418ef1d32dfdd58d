use wasm_abi_wire::WireError;

use super::*;

#[test]
fn scoped_message() {
    let err = CodecError::UnknownType("foo".into())
        .in_field("inner", "f")
        .in_scope(Scope::Struct("outer".into()));
    insta::assert_snapshot!(
        err.to_string(),
        @"in struct 'outer': in field 'inner.f': unknown type 'foo'"
    );
    assert_eq!(err.root(), &CodecError::UnknownType("foo".into()));
    assert_eq!(
        err.scopes(),
        [
            &Scope::Struct("outer".into()),
            &Scope::Field {
                struct_name: "inner".into(),
                field: "f".into()
            },
        ]
    );
}

#[test]
fn unscoped_root_is_self() {
    let err = CodecError::CircularTypeAlias("a".into());
    assert_eq!(err.root(), &err);
    assert!(err.scopes().is_empty());
}

#[test]
fn wire_errors_map_to_codec_errors() {
    let err = CodecError::from_wire(
        WireError::Truncated {
            offset: 3,
            needed: 2,
        },
        "uint16",
    );
    assert_eq!(
        err,
        CodecError::TruncatedInput {
            type_name: "uint16".into(),
            offset: 3
        }
    );

    let err = CodecError::from_wire(
        WireError::Malformed {
            offset: 0,
            reason: "invalid symbol",
        },
        "symbol",
    );
    insta::assert_snapshot!(err.to_string(), @"malformed 'symbol' at offset 0: invalid symbol");

    let err = CodecError::from_wire(WireError::Invalid("bad".into()), "name");
    insta::assert_snapshot!(err.to_string(), @"type mismatch for 'name': bad");
}

#[test]
fn messages() {
    let err = CodecError::UnsupportedSchemaVersion("eosio::abi/1.0".into());
    insta::assert_snapshot!(err.to_string(), @"unsupported schema version 'eosio::abi/1.0' (expected wasm::abi/1.x)");

    let err = CodecError::DuplicateDefinition {
        kind: DefinitionKind::Action,
        name: "transfer".into(),
    };
    insta::assert_snapshot!(err.to_string(), @"duplicate action definition 'transfer'");

    let err = CodecError::Context {
        scope: Scope::Alias("amount".into()),
        source: Box::new(CodecError::CircularTypeAlias("amount".into())),
    };
    insta::assert_snapshot!(err.to_string(), @"in alias 'amount': circular type alias 'amount'");
}

#[test]
fn schema_errors_become_json_errors() {
    let err: CodecError = wasm_abi_core::Schema::from_json("{").unwrap_err().into();
    assert!(matches!(err, CodecError::Json(_)));
}
