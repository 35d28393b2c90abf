//! Row to record mapping.
//!
//! Rows are expected to carry a text `field1` and an integer `field2`. Anything
//! else is a schema contract violation and fails the whole mapping.

use crate::db::executor::QueryResult;
use crate::error::{DbError, DbResult};
use crate::models::DataRecord;
use sqlx::{ColumnIndex, Decode, Row, Type};

/// Convert one row into a [`DataRecord`].
pub fn map_row<'r, R>(row: &'r R) -> DbResult<DataRecord>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    String: Decode<'r, R::Database> + Type<R::Database>,
    i32: Decode<'r, R::Database> + Type<R::Database>,
{
    Ok(DataRecord {
        field1: column(row, "field1")?,
        field2: column(row, "field2")?,
    })
}

/// Map every row, keeping the order the database returned them in.
pub fn map_rows(result: &QueryResult) -> DbResult<Vec<DataRecord>> {
    match result {
        QueryResult::Postgres(rows) => rows.iter().map(map_row).collect(),
        QueryResult::SQLite(rows) => rows.iter().map(map_row).collect(),
    }
}

fn column<'r, R, T>(row: &'r R, name: &'static str) -> DbResult<T>
where
    R: Row,
    &'static str: ColumnIndex<R>,
    T: Decode<'r, R::Database> + Type<R::Database>,
{
    row.try_get(name).map_err(|e| match e {
        sqlx::Error::ColumnNotFound(_) => {
            DbError::schema(format!("Row is missing column {name}"), name)
        }
        other => DbError::schema(format!("Malformed value in column {name}: {other}"), name),
    })
}
