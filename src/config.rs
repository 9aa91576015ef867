//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; there is no reload path. API keys are
//! optional — a missing or empty key disables the corresponding enrichment.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Firestore collection holding emission records
    pub emissions_table: String,
    /// OpenWeather API key; weather enrichment is skipped when absent
    pub openweather_key: Option<String>,
    /// Climatiq API key; carbon-estimation enrichment is skipped when absent
    pub climatiq_key: Option<String>,
    /// Cities polled by the batch weather job
    pub cities: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables. Every setting has a
    /// default, so loading cannot fail.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            emissions_table: env::var("EMISSIONS_TABLE")
                .unwrap_or_else(|_| "SmartCityEmissions".to_string()),
            openweather_key: optional_key("OPENWEATHER_KEY"),
            climatiq_key: optional_key("CLIMATIQ_KEY"),
            cities: parse_cities(
                &env::var("CITIES").unwrap_or_else(|_| "Bengaluru,Delhi,Mumbai".to_string()),
            ),
        }
    }

    /// Default config for testing only: offline project, no API keys.
    pub fn test_default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            emissions_table: "SmartCityEmissions".to_string(),
            openweather_key: None,
            climatiq_key: None,
            cities: vec!["Bengaluru".to_string(), "Delhi".to_string()],
        }
    }
}

/// Read an optional API key; an empty or whitespace-only value counts as absent.
fn optional_key(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split the comma-separated city list, dropping empty entries.
fn parse_cities(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cities_skips_blanks() {
        assert_eq!(
            parse_cities("Bengaluru, Delhi,,Mumbai , "),
            vec!["Bengaluru", "Delhi", "Mumbai"]
        );
    }

    #[test]
    fn test_parse_cities_default_list() {
        assert_eq!(
            parse_cities("Bengaluru,Delhi,Mumbai"),
            vec!["Bengaluru", "Delhi", "Mumbai"]
        );
    }

    #[test]
    fn test_empty_key_counts_as_absent() {
        env::set_var("TEST_EMPTY_KEY", "   ");
        assert!(optional_key("TEST_EMPTY_KEY").is_none());

        env::set_var("TEST_EMPTY_KEY", "ck_live_123");
        assert_eq!(
            optional_key("TEST_EMPTY_KEY").as_deref(),
            Some("ck_live_123")
        );
        env::remove_var("TEST_EMPTY_KEY");
    }
}
