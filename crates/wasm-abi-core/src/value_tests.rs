use serde_json::json;

use super::*;

fn transfer() -> Value {
    Value::Object(vec![
        ("to".into(), "abc".into()),
        ("amount".into(), 100u64.into()),
    ])
}

#[test]
fn object_lookup() {
    let v = transfer();
    assert_eq!(v.get("to").and_then(Value::as_str), Some("abc"));
    assert_eq!(v.get("amount"), Some(&Value::UInt(100)));
    assert_eq!(v.get("Amount"), None);
    assert_eq!(Value::Null.get("to"), None);
}

#[test]
fn display_is_compact_json() {
    insta::assert_snapshot!(transfer().to_string(), @r#"{"to":"abc","amount":100}"#);
}

#[test]
fn serialize_preserves_field_order() {
    let v = Value::Object(vec![
        ("z".into(), Value::Null),
        ("a".into(), true.into()),
    ]);
    let json = serde_json::to_string(&v).unwrap();
    assert_eq!(json, r#"{"z":null,"a":true}"#);
}

#[test]
fn wide_integers_render_as_strings() {
    assert_eq!(Value::Int(-5).to_json(), json!(-5));
    assert_eq!(Value::Int(i64::MIN.into()).to_json(), json!(i64::MIN));
    assert_eq!(Value::UInt(u64::MAX.into()).to_json(), json!(u64::MAX));
    assert_eq!(
        Value::UInt(u128::MAX).to_json(),
        json!("340282366920938463463374607431768211455")
    );
    assert_eq!(
        Value::Int(i128::MIN).to_json(),
        json!("-170141183460469231731687303715884105728")
    );

    let json = serde_json::to_string(&Value::UInt(1u128 << 64)).unwrap();
    assert_eq!(json, r#""18446744073709551616""#);
}

#[test]
fn bytes_and_floats() {
    assert_eq!(Value::Bytes(vec![0xde, 0xad]).to_json(), json!("dead"));
    assert_eq!(Value::Float(1.5).to_json(), json!(1.5));
    assert_eq!(Value::Float(f64::INFINITY).to_json(), json!("inf"));
    assert_eq!(
        serde_json::to_string(&Value::Float(f64::NAN)).unwrap(),
        r#""NaN""#
    );
}

#[test]
fn from_json_numbers() {
    assert_eq!(Value::from_json(&json!(7)), Value::UInt(7));
    assert_eq!(Value::from_json(&json!(-7)), Value::Int(-7));
    assert_eq!(Value::from_json(&json!(0.25)), Value::Float(0.25));
    assert_eq!(Value::from_json(&json!("12")), Value::String("12".into()));
}

#[test]
fn deserialize_matches_from_json() {
    let text = r#"{"a":[1,-2,3.5,null,"x"],"b":{"c":false}}"#;
    let parsed: Value = serde_json::from_str(text).unwrap();
    let via_json = Value::from_json(&serde_json::from_str(text).unwrap());
    assert_eq!(parsed, via_json);
    assert_eq!(parsed.to_string(), text);
}

#[test]
fn kind_names() {
    assert_eq!(Value::Null.kind_name(), "null");
    assert_eq!(Value::from(vec![1u8]).kind_name(), "bytes");
    assert_eq!(Value::from(vec![Value::Null]).kind_name(), "array");
    assert_eq!(Value::from(None::<u8>), Value::Null);
    assert_eq!(Value::from(Some(-1i8)), Value::Int(-1));
}
