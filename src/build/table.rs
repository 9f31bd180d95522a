//! Season table builder
//!
//! Consumes the extractor's 20 table rows and produces a record set keyed
//! by long team name. A field that cannot be coerced to an integer means
//! the source HTML is malformed, so coercion failures propagate rather
//! than being defaulted.

use crate::extract::{TableRow, TABLE_COLUMNS};
use crate::{PipelineError, Result, TeamRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// One season's league table, keyed by long team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonTable {
    pub teams: BTreeMap<String, TeamRecord>,
}

impl SeasonTable {
    /// Build from extracted rows; row index in document order becomes the
    /// league position (index 0 -> position 1).
    pub fn from_rows(rows: Vec<TableRow>) -> Result<Self> {
        let mut teams = BTreeMap::new();
        for (i, row) in rows.into_iter().enumerate() {
            let mut values = [0i64; 8];
            for (j, raw) in row.fields.iter().enumerate() {
                values[j] =
                    raw.parse()
                        .map_err(|_| PipelineError::NumericCoercion {
                            column: TABLE_COLUMNS[j].to_string(),
                            team: row.team.clone(),
                            value: raw.clone(),
                        })?;
            }
            let record = TeamRecord {
                team: row.team.clone(),
                short_name: row.short_name,
                position: (i + 1) as u32,
                played: values[0],
                won: values[1],
                drawn: values[2],
                lost: values[3],
                goals_for: values[4],
                goals_conceded: values[5],
                goal_difference: values[6],
                points: values[7],
            };
            if teams.insert(row.team.clone(), record).is_some() {
                return Err(PipelineError::DuplicateTeam(row.team));
            }
        }
        Ok(SeasonTable { teams })
    }

    /// Persist as the season's table artifact.
    pub fn store<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Load a previously stored table artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}
