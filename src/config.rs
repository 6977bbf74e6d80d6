//! Configuration for the CornerPro pipeline.

use serde::{Deserialize, Serialize};

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/cornerpro.sqlite".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Scrape source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL prepended to relative event links
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Page carrying the upcoming-events table
    #[serde(default = "default_events_page")]
    pub events_page: String,
    /// Organization code baked into event ids
    #[serde(default = "default_org")]
    pub org: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_events_page() -> String {
    "https://en.wikipedia.org/wiki/List_of_UFC_events".to_string()
}

fn default_org() -> String {
    "UFC".to_string()
}

fn default_user_agent() -> String {
    "cornerpro/0.2 (event schedule ingest)".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            events_page: default_events_page(),
            org: default_org(),
            user_agent: default_user_agent(),
        }
    }
}

/// Derived-output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_predictions_csv")]
    pub predictions_csv: String,
    #[serde(default = "default_cards_json")]
    pub cards_json: String,
}

fn default_predictions_csv() -> String {
    "data/processed/predictions.csv".to_string()
}

fn default_cards_json() -> String {
    "data/processed/cards.json".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            predictions_csv: default_predictions_csv(),
            cards_json: default_cards_json(),
        }
    }
}

/// Ingest defaults (overridable per run from the CLI)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_days_ahead")]
    pub days_ahead: i64,
    #[serde(default = "default_max_events")]
    pub max_events: usize,
}

fn default_days_ahead() -> i64 {
    120
}

fn default_max_events() -> usize {
    5
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            days_ahead: default_days_ahead(),
            max_events: default_max_events(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl AppConfig {
    /// Load configuration from defaults, config file and environment
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("config").required(false))
            // Override with environment variables (CORNERPRO_DATABASE_PATH, etc.)
            .add_source(
                config::Environment::with_prefix("CORNERPRO")
                    .separator("_")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.source.org, "UFC");
        assert_eq!(config.ingest.days_ahead, 120);
        assert_eq!(config.ingest.max_events, 5);
        assert!(config.database.path.ends_with(".sqlite"));
    }
}
