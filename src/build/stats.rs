//! Season statistic builder
//!
//! Collects every tracked statistic category for one season across its
//! paginated pages, normalizes team labels and values, zero-fills teams
//! missing from a category, and drops the columns that duplicate
//! table-derived fields.

use crate::extract::{combine_pages, parse_stats_page, StatRow};
use crate::normalize::{ampersand_to_and, strip_thousands};
use crate::registry::column_name;
use crate::{PipelineError, Result, StatsConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One season's statistics: one integer column per tracked category,
/// keyed by normalized team name. A team absent from a category's pages
/// holds zero for that column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonStats {
    /// Column names in output order, after duplicate-column removal.
    pub columns: Vec<String>,
    pub teams: BTreeMap<String, BTreeMap<String, i64>>,
}

impl SeasonStats {
    /// Persist as the season's statistics artifact.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously stored statistics artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Build one season's statistics from its HTML directory.
///
/// Expects `<category>_1.html` per collected category, with an optional
/// `<category>_2.html` when the site paginated. A category whose page 1
/// file is absent is treated as having no data for the season (warned,
/// zero-filled), matching the site dropping a statistic for a year.
pub fn build_season_stats<P: AsRef<Path>>(
    season_dir: P,
    season: &str,
    config: &StatsConfig,
) -> Result<SeasonStats> {
    let season_dir = season_dir.as_ref();
    let mut extracted = Vec::new();

    for category in config.collected() {
        log::info!("Working on statistic: {}", category);
        let first_path = season_dir.join(format!("{}_1.html", category));
        let rows = if first_path.exists() {
            let first = parse_stats_page(&std::fs::read_to_string(&first_path)?, season)?;
            let second_path = season_dir.join(format!("{}_2.html", category));
            let second = if second_path.exists() {
                Some(parse_stats_page(
                    &std::fs::read_to_string(&second_path)?,
                    season,
                )?)
            } else {
                None
            };
            combine_pages(first, second)
        } else {
            Vec::new()
        };
        extracted.push((category.to_string(), rows));
    }

    assemble(extracted, season, config)
}

/// Assemble extracted (category, rows) pairs into the keyed record set.
pub fn assemble(
    extracted: Vec<(String, Vec<StatRow>)>,
    season: &str,
    config: &StatsConfig,
) -> Result<SeasonStats> {
    let mut columns = Vec::new();
    let mut per_column: Vec<(String, BTreeMap<String, i64>)> = Vec::new();

    for (category, rows) in extracted {
        let column = column_name(category.as_str());
        if rows.is_empty() {
            log::warn!("{} has no data for season {}", column, season);
        }
        let mut values = BTreeMap::new();
        for row in rows {
            let team = ampersand_to_and(row.team.trim());
            let raw = strip_thousands(&row.value);
            let value = raw.parse().map_err(|_| PipelineError::NumericCoercion {
                column: column.clone(),
                team: team.clone(),
                value: row.value.clone(),
            })?;
            values.insert(team, value);
        }
        columns.push(column.clone());
        per_column.push((column, values));
    }

    // Union of teams across all categories, zero-filling the gaps.
    let mut teams: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for (_, values) in &per_column {
        for team in values.keys() {
            teams.entry(team.clone()).or_default();
        }
    }
    for (column, values) in &per_column {
        for (team, row) in teams.iter_mut() {
            row.insert(column.clone(), values.get(team).copied().unwrap_or(0));
        }
    }

    // The table source is authoritative for these; drop to avoid
    // double-counting.
    columns.retain(|c| !config.duplicate_columns.contains(c));
    for row in teams.values_mut() {
        row.retain(|c, _| !config.duplicate_columns.contains(c));
    }

    Ok(SeasonStats { columns, teams })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn rows(pairs: &[(&str, &str)]) -> Vec<StatRow> {
        pairs
            .iter()
            .map(|(team, value)| StatRow {
                team: team.to_string(),
                value: value.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_normalizes_names_and_values() {
        let config = Config::default().stats;
        let extracted = vec![(
            "Passes".to_string(),
            rows(&[("Brighton & Hove Albion", "12,345"), ("Arsenal", "20000")]),
        )];
        let stats = assemble(extracted, "2022_23", &config).unwrap();

        assert_eq!(stats.teams["Brighton and Hove Albion"]["Passes"], 12345);
        assert_eq!(stats.teams["Arsenal"]["Passes"], 20000);
    }

    #[test]
    fn test_missing_team_zero_filled() {
        let config = Config::default().stats;
        let extracted = vec![
            ("Saves".to_string(), rows(&[("Arsenal", "90"), ("Everton", "110")])),
            ("Blocks".to_string(), rows(&[("Arsenal", "40")])),
        ];
        let stats = assemble(extracted, "2022_23", &config).unwrap();

        assert_eq!(stats.teams["Everton"]["Saves"], 110);
        assert_eq!(stats.teams["Everton"]["Blocks"], 0);
    }

    #[test]
    fn test_statistic_with_no_data_still_yields_column() {
        let config = Config::default().stats;
        let extracted = vec![
            ("Saves".to_string(), rows(&[("Arsenal", "90")])),
            ("Through_Balls".to_string(), rows(&[])),
        ];
        let stats = assemble(extracted, "2022_23", &config).unwrap();

        assert!(stats.columns.contains(&"Through_Balls".to_string()));
        assert_eq!(stats.teams["Arsenal"]["Through_Balls"], 0);
    }

    #[test]
    fn test_duplicate_columns_dropped() {
        let config = Config::default().stats;
        let extracted = vec![
            ("Wins".to_string(), rows(&[("Arsenal", "26")])),
            ("Goals Conceded".to_string(), rows(&[("Arsenal", "29")])),
            ("Saves".to_string(), rows(&[("Arsenal", "90")])),
        ];
        let stats = assemble(extracted, "2022_23", &config).unwrap();

        assert_eq!(stats.columns, vec!["Saves"]);
        assert!(!stats.teams["Arsenal"].contains_key("Wins"));
        assert!(!stats.teams["Arsenal"].contains_key("Goals_Conceded"));
    }

    #[test]
    fn test_bad_value_propagates() {
        let config = Config::default().stats;
        let extracted = vec![("Saves".to_string(), rows(&[("Arsenal", "many")]))];
        let err = assemble(extracted, "2022_23", &config).unwrap_err();
        assert!(matches!(err, PipelineError::NumericCoercion { .. }));
    }

    #[test]
    fn test_collected_excludes_unavailable_categories() {
        let config = Config::default().stats;
        let collected = config.collected();
        assert_eq!(collected.len(), 33);
        assert!(!collected.contains(&"Caught Opponent Offside"));
        assert!(!collected.contains(&"Substitutions On"));
        assert!(!collected.contains(&"Fouls"));
        assert!(collected.contains(&"Shots On Target"));
    }
}
