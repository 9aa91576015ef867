// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Event ingestion route.

use crate::error::Result;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/ingest", post(ingest_event))
}

/// Success envelope: the stored record with exact decimals converted back to
/// native JSON numbers.
#[derive(Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub item: Value,
}

/// Ingest one activity event.
///
/// The body may be a JSON object or a JSON-encoded string of one. Enrichment
/// failures still produce a 200 with the error annotated in `item.extra`;
/// only a storage failure (or a structurally invalid payload) returns an
/// error envelope.
async fn ingest_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<IngestResponse>> {
    let record = state.ingest.ingest(payload).await?;

    Ok(Json(IngestResponse {
        message: "Data stored successfully".to_string(),
        item: record.to_response_item(),
    }))
}
