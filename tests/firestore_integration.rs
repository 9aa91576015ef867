// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! End-to-end persistence tests against the Firestore emulator.
//!
//! Run with: FIRESTORE_EMULATOR_HOST=localhost:8080 cargo test

use emissions_tracker::services::IngestService;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

mod common;

#[tokio::test]
async fn test_ingest_end_to_end_persists_record() {
    require_emulator!();

    let db = common::test_db().await;
    let service = IngestService::new(db.clone(), None, None);

    let record = service
        .ingest(json!({
            "user_id": "e2e-user",
            "activity_type": "travel",
            "mode": "bus",
            "distance": "10",
            "city": "X",
            "timestamp": "2026-02-01T10:00:00Z",
        }))
        .await
        .expect("ingest should succeed");

    assert_eq!(record.co2_emission, Decimal::from_str("0.89").unwrap());

    let stored = db
        .get_record("e2e-user", "2026-02-01T10:00:00Z")
        .await
        .unwrap()
        .expect("record should be stored");

    assert_eq!(stored.mode, "bus");
    assert_eq!(stored.distance, Decimal::from(10));
    assert_eq!(stored.co2_emission, Decimal::from_str("0.89").unwrap());
    assert!(stored.temperature.is_none());
    assert!(stored.extra.is_none());
}

#[tokio::test]
async fn test_upsert_same_key_replaces_record() {
    require_emulator!();

    let db = common::test_db().await;
    let service = IngestService::new(db.clone(), None, None);

    let base = json!({
        "user_id": "upsert-user",
        "timestamp": "2026-02-01T11:00:00Z",
        "mode": "car",
    });

    let mut first = base.clone();
    first["distance"] = json!(5);
    service.ingest(first).await.expect("first write");

    let mut second = base.clone();
    second["distance"] = json!(20);
    service.ingest(second).await.expect("second write");

    let stored = db
        .get_record("upsert-user", "2026-02-01T11:00:00Z")
        .await
        .unwrap()
        .expect("record should exist");

    // Exactly one visible record, reflecting the second write.
    assert_eq!(stored.distance, Decimal::from(20));
    assert_eq!(stored.co2_emission, Decimal::from_str("3.84").unwrap());
}

#[tokio::test]
async fn test_stored_decimals_round_trip_exactly() {
    require_emulator!();

    let db = common::test_db().await;
    let service = IngestService::new(db.clone(), None, None);

    service
        .ingest(json!({
            "user_id": "precision-user",
            "timestamp": "2026-02-01T12:00:00Z",
            "mode": "train",
            "distance": 19.99,
        }))
        .await
        .expect("ingest should succeed");

    let stored = db
        .get_record("precision-user", "2026-02-01T12:00:00Z")
        .await
        .unwrap()
        .expect("record should exist");

    // No binary-float drift through storage.
    assert_eq!(stored.distance.to_string(), "19.99");
    // 0.041 * 19.99 = 0.81959 -> 0.8196
    assert_eq!(stored.co2_emission, Decimal::from_str("0.8196").unwrap());
}
