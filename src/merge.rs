//! Merge/join engine
//!
//! Inner-joins one season's table and statistics on team name, tags each
//! row with its season and a composite key, and accumulates seasons into
//! the master dataset. A team present on only one side is dropped by the
//! join; every dropped (team, season) pair is logged since a mismatch
//! usually means a name-reconciliation gap, not a real absence.

use crate::build::{SeasonStats, SeasonTable};
use crate::{PipelineError, Result, TeamRecord};
use std::collections::BTreeMap;

/// Table-derived numeric columns, in output order.
pub const TABLE_VALUE_COLUMNS: [&str; 9] = [
    "Position",
    "Played",
    "Won",
    "Drawn",
    "Lost",
    "Goals_For",
    "Goals_Conceded",
    "Goal_Difference",
    "Points",
];

/// One (team, season) row of the merged dataset. Numeric columns live in
/// a single map so the rate deriver can rewrite them in place.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonRecord {
    /// Composite key: short name + season tag; unique dataset-wide.
    pub key: String,
    pub team: String,
    pub short_name: String,
    pub season: String,
    pub values: BTreeMap<String, f64>,
}

/// Row-wise union of all seasons' joined records.
#[derive(Debug, Default)]
pub struct MasterDataset {
    /// Statistic columns in first-seen order (union across seasons).
    pub stat_columns: Vec<String>,
    pub records: Vec<SeasonRecord>,
}

impl MasterDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join one season's table and statistics and append the result.
    ///
    /// Rows are appended in league-position order. Statistic columns new
    /// to the dataset are added to the union and zero-filled on rows from
    /// earlier seasons (a statistic the site did not publish back then).
    pub fn push_season(
        &mut self,
        table: &SeasonTable,
        stats: &SeasonStats,
        season: &str,
    ) -> Result<()> {
        for column in &stats.columns {
            if !self.stat_columns.contains(column) {
                self.stat_columns.push(column.clone());
                for record in &mut self.records {
                    record.values.insert(column.clone(), 0.0);
                }
            }
        }

        let mut by_position: Vec<&TeamRecord> = table.teams.values().collect();
        by_position.sort_by_key(|t| t.position);

        for record in by_position {
            let Some(stat_row) = stats.teams.get(&record.team) else {
                log::warn!(
                    "Season {}: `{}` has no statistics; dropped by join",
                    season,
                    record.team
                );
                continue;
            };

            let mut values = BTreeMap::new();
            values.insert("Position".to_string(), record.position as f64);
            values.insert("Played".to_string(), record.played as f64);
            values.insert("Won".to_string(), record.won as f64);
            values.insert("Drawn".to_string(), record.drawn as f64);
            values.insert("Lost".to_string(), record.lost as f64);
            values.insert("Goals_For".to_string(), record.goals_for as f64);
            values.insert("Goals_Conceded".to_string(), record.goals_conceded as f64);
            values.insert("Goal_Difference".to_string(), record.goal_difference as f64);
            values.insert("Points".to_string(), record.points as f64);
            for column in &self.stat_columns {
                let value = stat_row.get(column).copied().unwrap_or(0);
                values.insert(column.clone(), value as f64);
            }

            let key = format!("{}{}", record.short_name, season);
            if self.records.iter().any(|r| r.key == key) {
                return Err(PipelineError::DuplicateKey(key));
            }
            self.records.push(SeasonRecord {
                key,
                team: record.team.clone(),
                short_name: record.short_name.clone(),
                season: season.to_string(),
                values,
            });
        }

        for team in stats.teams.keys() {
            if !table.teams.contains_key(team) {
                log::warn!(
                    "Season {}: `{}` has statistics but no table row; dropped by join",
                    season,
                    team
                );
            }
        }

        Ok(())
    }
}
