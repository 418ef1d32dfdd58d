//! Binary serialization for schemas using postcard.

use super::json::SchemaError;
use super::types::Schema;

impl Schema {
    /// Deserialize a schema from binary format.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, SchemaError> {
        postcard::from_bytes(bytes).map_err(SchemaError::Binary)
    }

    /// Serialize a schema to binary format.
    pub fn to_binary(&self) -> Result<Vec<u8>, SchemaError> {
        postcard::to_allocvec(self).map_err(SchemaError::Binary)
    }
}
