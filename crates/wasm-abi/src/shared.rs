//! A registry handle that can be swapped while readers hold snapshots.
//!
//! Readers call [`SharedRegistry::load`] and keep the returned `Arc` for as
//! long as they code against it. A reload publishes a fully validated
//! registry or nothing; snapshots taken earlier stay valid.

use std::sync::Arc;

use arc_swap::ArcSwap;
use wasm_abi_core::Schema;

use crate::{CodecLimits, Registry, Result};

#[derive(Debug)]
pub struct SharedRegistry {
    current: ArcSwap<Registry>,
}

impl SharedRegistry {
    pub fn new(registry: Registry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
        }
    }

    /// Snapshot of the current registry.
    pub fn load(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// Publish `registry`, returning the one it replaces.
    pub fn replace(&self, registry: Registry) -> Arc<Registry> {
        self.current.swap(Arc::new(registry))
    }

    /// Load `schema` and publish it. On failure the current registry stays.
    pub fn reload(&self, schema: &Schema, limits: CodecLimits) -> Result<()> {
        match Registry::load(schema, limits) {
            Ok(registry) => {
                tracing::info!(version = registry.version(), "schema published");
                self.replace(registry);
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "schema reload failed, keeping current registry");
                Err(error)
            }
        }
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::new(registry)
    }
}
