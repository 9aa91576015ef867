//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Default collection name for emission records.
pub const DEFAULT_COLLECTION: &str = "SmartCityEmissions";
