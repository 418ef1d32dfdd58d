use std::time::Duration;

use super::*;

#[test]
fn defaults() {
    let limits = CodecLimits::default();
    assert_eq!(limits.get_max_time(), Duration::from_millis(15));
    assert_eq!(limits.get_recursion_limit(), 256);
    assert_eq!(limits.get_max_array_size(), MAX_ABI_ARRAY_SIZE);
    assert_eq!(limits.get_initial_buffer_capacity(), 4096);
    assert_eq!(CodecLimits::new(), limits);
}

#[test]
fn builder() {
    let limits = CodecLimits::new()
        .max_time(Duration::from_millis(2))
        .recursion_limit(16)
        .max_array_size(100)
        .initial_buffer_capacity(0);
    assert_eq!(limits.get_max_time(), Duration::from_micros(2000));
    assert_eq!(limits.get_recursion_limit(), 16);
    assert_eq!(limits.get_max_array_size(), 100);
    assert_eq!(limits.get_initial_buffer_capacity(), 0);
}

#[test]
fn array_size_is_clamped() {
    let limits = CodecLimits::new().max_array_size(usize::MAX);
    assert_eq!(limits.get_max_array_size(), MAX_ABI_ARRAY_SIZE);
}

#[test]
fn deserialize_partial_config() {
    let limits: CodecLimits =
        serde_json::from_str(r#"{ "recursion_limit": 32, "max_array_size": 4194304 }"#).unwrap();
    assert_eq!(limits.get_recursion_limit(), 32);
    // clamped on read
    assert_eq!(limits.get_max_array_size(), MAX_ABI_ARRAY_SIZE);
    assert_eq!(limits.get_max_time(), Duration::from_millis(15));
}
