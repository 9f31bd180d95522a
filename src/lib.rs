//! Premier League table and statistic pipeline
//!
//! Parses saved league-table and per-statistic HTML pages into per-season
//! record sets, reconciles team names across the two sources, inner-joins
//! them and derives per-game rates into a single semicolon-delimited dataset.

pub mod build;
pub mod extract;
pub mod merge;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod rate;
pub mod registry;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One team's row of a season's league table.
///
/// Immutable once built; scoped to a single season. `position` is the
/// 1-based league position taken from document order of the table rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: String,
    pub short_name: String,
    pub position: u32,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_conceded: i64,
    pub goal_difference: i64,
    pub points: i64,
}

/// Application-wide errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Structural marker `{marker}` not found in {context}")]
    MissingMarker {
        marker: &'static str,
        context: String,
    },

    #[error("Expected {expected} league table rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("Missing `{field}` in table row {row}")]
    MissingField { field: &'static str, row: usize },

    #[error("Could not parse `{value}` as an integer for {column} ({team})")]
    NumericCoercion {
        column: String,
        team: String,
        value: String,
    },

    #[error("Duplicate team name `{0}` in league table")]
    DuplicateTeam(String),

    #[error("Duplicate composite key `{0}` in master dataset")]
    DuplicateKey(String),

    #[error("No statistics artifact for season {0} - run `plstats stats` first")]
    MissingArtifact(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Artifact serialization error: {0}")]
    Artifact(#[from] serde_json::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Application configuration loaded from config.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub stats: StatsConfig,
    pub rate: RateConfig,
}

/// Directory layout for the input HTML and the pipeline artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub tables_html_dir: String,
    pub stats_html_dir: String,
    pub tables_out_dir: String,
    pub stats_out_dir: String,
    pub output_csv: String,
}

/// Statistic business rules, kept as data so they can be tested and
/// changed without touching the parsing code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Statistic categories to collect, in output column order.
    pub tracked: Vec<String>,
    /// Categories with no data on the live site; skipped entirely.
    pub unavailable: Vec<String>,
    /// Statistic columns that duplicate table-derived fields; the table
    /// source is authoritative for these, so they are dropped before output.
    pub duplicate_columns: Vec<String>,
}

impl StatsConfig {
    /// Tracked categories minus the unavailable ones, in tracked order.
    pub fn collected(&self) -> Vec<&str> {
        self.tracked
            .iter()
            .filter(|s| !self.unavailable.contains(s))
            .map(String::as_str)
            .collect()
    }
}

/// Rate-derivation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateConfig {
    /// Columns left as raw season totals rather than per-game rates.
    pub excluded: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                tables_html_dir: "data/tables_html".to_string(),
                stats_html_dir: "data/stats_html".to_string(),
                tables_out_dir: "data/tables_json".to_string(),
                stats_out_dir: "data/stats_json".to_string(),
                output_csv: "pl_data.csv".to_string(),
            },
            stats: StatsConfig {
                tracked: registry::TRACKED_STATISTICS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                unavailable: registry::UNAVAILABLE_STATISTICS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                duplicate_columns: registry::DUPLICATE_COLUMNS
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
            rate: RateConfig {
                excluded: registry::RATE_EXCLUDED
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            },
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file {}: {}", path, e))
        })?;
        toml::from_str(&content)
            .map_err(|e| PipelineError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PipelineError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
