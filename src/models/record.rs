//! The record served by `GET /api/test1`.

use serde::Serialize;

/// One row of the `data` table.
///
/// Serializes to exactly `{"field1": <string>, "field2": <integer>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataRecord {
    pub field1: String,
    pub field2: i32,
}

impl DataRecord {
    pub fn new(field1: impl Into<String>, field2: i32) -> Self {
        Self {
            field1: field1.into(),
            field2,
        }
    }
}
