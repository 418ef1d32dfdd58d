use std::sync::Arc;
use std::thread;
use std::time::Duration;

use wasm_abi_core::{Schema, StructDef, Value};

use super::*;

const BUDGET: Duration = Duration::from_secs(1);

fn schema(version: &str, amount: &str) -> Schema {
    Schema::new(version)
        .with_struct(StructDef::new("transfer").field("amount", amount))
        .with_action("transfer", "transfer")
}

fn shared() -> SharedRegistry {
    let registry = Registry::load(&schema("wasm::abi/1.0", "uint8"), CodecLimits::default()).unwrap();
    SharedRegistry::new(registry)
}

#[test]
fn shared_registry_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<SharedRegistry>();
}

#[test]
fn reload_publishes_new_schema() {
    let shared = shared();
    let before = shared.load();

    shared
        .reload(&schema("wasm::abi/1.1", "uint16"), CodecLimits::default())
        .unwrap();
    let after = shared.load();

    assert_eq!(after.version(), "wasm::abi/1.1");
    assert_eq!(
        after.decode_action("transfer", &[1, 0], BUDGET).unwrap().to_string(),
        r#"{"amount":1}"#
    );

    // earlier snapshots stay usable
    assert_eq!(before.version(), "wasm::abi/1.0");
    assert_eq!(
        before.decode_action("transfer", &[1], BUDGET).unwrap().to_string(),
        r#"{"amount":1}"#
    );
}

#[test]
fn failed_reload_keeps_current() {
    let shared = shared();
    let err = shared
        .reload(&schema("wasm::abi/1.1", "nope"), CodecLimits::default())
        .unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"in field 'transfer.amount': unknown type 'nope'");
    assert_eq!(shared.load().version(), "wasm::abi/1.0");
}

#[test]
fn replace_returns_previous() {
    let shared = shared();
    let next = Registry::load(&schema("wasm::abi/1.2", "uint32"), CodecLimits::default()).unwrap();
    let previous = shared.replace(next);
    assert_eq!(previous.version(), "wasm::abi/1.0");
    assert_eq!(shared.load().version(), "wasm::abi/1.2");
}

#[test]
fn readers_run_during_reload() {
    let shared = Arc::new(shared());

    thread::scope(|scope| {
        for _ in 0..4 {
            let shared = Arc::clone(&shared);
            scope.spawn(move || {
                for _ in 0..100 {
                    let registry = shared.load();
                    let value = Value::Object(vec![("amount".to_owned(), Value::UInt(1))]);
                    let bytes = registry.encode_action("transfer", &value, BUDGET).unwrap();
                    let decoded = registry.decode_action("transfer", &bytes, BUDGET).unwrap();
                    assert_eq!(decoded, value);
                }
            });
        }
        for minor in 1..20 {
            let amount = if minor % 2 == 0 { "uint8" } else { "uint64" };
            shared
                .reload(&schema(&format!("wasm::abi/1.{minor}"), amount), CodecLimits::default())
                .unwrap();
        }
    });

    assert_eq!(shared.load().version(), "wasm::abi/1.19");
}
