use std::time::Duration;

use serde::Deserialize;

/// Hard ceiling on the element count of any decoded array.
pub const MAX_ABI_ARRAY_SIZE: usize = 1 << 20;

/// Resource limits for schema loading and payload coding.
///
/// Deserializable so hosts can embed it in their own configuration; missing
/// keys take the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecLimits {
    /// Time budget for validating a schema, in microseconds (default: 15 ms).
    pub(crate) max_time_us: u64,
    /// Maximum nesting depth (default: 256).
    pub(crate) recursion_limit: u32,
    /// Maximum elements in one array (default and ceiling: [`MAX_ABI_ARRAY_SIZE`]).
    pub(crate) max_array_size: usize,
    /// Encode buffer capacity reserved up front (default: 4 KiB).
    pub(crate) initial_buffer_capacity: usize,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_time_us: 15_000,
            recursion_limit: 256,
            max_array_size: MAX_ABI_ARRAY_SIZE,
            initial_buffer_capacity: 4096,
        }
    }
}

impl CodecLimits {
    /// Create new limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema validation time budget.
    pub fn max_time(mut self, budget: Duration) -> Self {
        self.max_time_us = u64::try_from(budget.as_micros()).unwrap_or(u64::MAX);
        self
    }

    /// Set the maximum nesting depth.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Set the array element ceiling. Values above [`MAX_ABI_ARRAY_SIZE`] are clamped.
    pub fn max_array_size(mut self, size: usize) -> Self {
        self.max_array_size = size.min(MAX_ABI_ARRAY_SIZE);
        self
    }

    /// Set the initial encode buffer capacity.
    pub fn initial_buffer_capacity(mut self, capacity: usize) -> Self {
        self.initial_buffer_capacity = capacity;
        self
    }

    pub fn get_max_time(&self) -> Duration {
        Duration::from_micros(self.max_time_us)
    }
    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
    pub fn get_max_array_size(&self) -> usize {
        self.max_array_size.min(MAX_ABI_ARRAY_SIZE)
    }
    pub fn get_initial_buffer_capacity(&self) -> usize {
        self.initial_buffer_capacity
    }
}
