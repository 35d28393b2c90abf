//! Handler for `GET /api/test1`.

use crate::api::{ApiError, AppState};
use crate::models::DataRecord;
use axum::Json;
use axum::extract::State;
use std::time::Instant;
use tracing::debug;

/// Run the data query and answer with every matching row.
///
/// Responds exactly once: 200 with a JSON array (possibly empty) or 500 with
/// `Database error`. The worker thread is free while the query is in flight.
pub async fn get_data(State(state): State<AppState>) -> Result<Json<Vec<DataRecord>>, ApiError> {
    let start = Instant::now();

    let records = state
        .executor
        .fetch_records()
        .await
        .map_err(|e| ApiError::database(e, start.elapsed()))?;

    let elapsed = start.elapsed();
    debug!(
        rows = records.len(),
        elapsed_ms = elapsed.as_millis() as u64,
        "Query took: {:.2?}",
        elapsed
    );

    Ok(Json(records))
}
