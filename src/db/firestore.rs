// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! All records live in a single collection (configurable, default
//! `SmartCityEmissions`) and are keyed by (user_id, timestamp). Writes are
//! upserts: a second write with the same key replaces the first.

use crate::error::AppError;
use crate::models::{ActivityRecord, CityWeatherRecord};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
    collection: String,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str, collection: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id, collection).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, collection, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
            collection: collection.to_string(),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        // Use ExternalJwtFunctionSource to provide a dummy token without needing
        // a custom TokenSource implementation struct.
        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            collection,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
            collection: collection.to_string(),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            client: None,
            collection: crate::db::DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── Record Operations ───────────────────────────────────────

    /// Upsert an emission record, keyed by (user_id, timestamp).
    pub async fn upsert_record(&self, record: &ActivityRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(&self.collection)
            .document_id(record.document_id())
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Fetch a record by its natural key. Used by integration tests and
    /// operational tooling; the ingest pipeline itself never reads back.
    pub async fn get_record(
        &self,
        user_id: &str,
        timestamp: &str,
    ) -> Result<Option<ActivityRecord>, AppError> {
        let doc_id = format!("{}_{}", user_id, urlencoding::encode(timestamp));
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(&self.collection)
            .obj()
            .one(&doc_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Upsert a city weather snapshot written by the batch poller.
    pub async fn upsert_city_weather(&self, record: &CityWeatherRecord) -> Result<(), AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(&self.collection)
            .document_id(record.document_id())
            .object(record)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
