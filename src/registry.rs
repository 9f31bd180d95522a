//! Season and statistic registries
//!
//! Explicit data for what the pipeline processes: the known seasons (with
//! the dropdown indices the browser-side collectors consume) and the
//! statistic categories scraped from the site. Keeping these as data makes
//! season-iteration order a contract rather than a filesystem artifact.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One season's identity plus the positional dropdown indices used only by
/// the external collectors when navigating the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub tag: String,
    pub dropdown_index: u8,
    pub dropdown_child: u8,
}

/// The seasons the collectors know how to navigate to.
pub fn known_seasons() -> Vec<Season> {
    let codes: [(&str, u8, u8); 7] = [
        ("2017_18", 7, 8),
        ("2018_19", 6, 7),
        ("2019_20", 5, 6),
        ("2020_21", 4, 5),
        ("2021_22", 3, 4),
        ("2022_23", 2, 3),
        ("2023_24", 1, 2),
    ];
    codes
        .iter()
        .map(|(tag, idx, child)| Season {
            tag: tag.to_string(),
            dropdown_index: *idx,
            dropdown_child: *child,
        })
        .collect()
}

/// Discover season tags from a collector or artifact directory.
///
/// Table HTML lives as `<tag>.html` files, statistic HTML as `<tag>/`
/// subdirectories, and stage artifacts as `<tag>.json` files; `extension`
/// selects which file kind counts as a season. Tags are sorted so
/// iteration order is deterministic regardless of how the filesystem
/// enumerates entries.
pub fn discover_seasons<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<String>> {
    let mut tags = Vec::new();
    for entry in std::fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                tags.push(name.to_string());
            }
        } else if path.extension().map(|e| e == extension).unwrap_or(false) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                tags.push(stem.to_string());
            }
        }
    }
    tags.sort();
    tags.dedup();
    Ok(tags)
}

/// Every statistic category the site publishes, in output column order.
pub const TRACKED_STATISTICS: &[&str] = &[
    "Wins",
    "Losses",
    "Goals",
    "Yellow Cards",
    "Red Cards",
    "Substitutions On",
    "Shots",
    "Shots On Target",
    "Hit Woodwork",
    "Goals From Header",
    "Goals From Penalty",
    "Goals From Freekick",
    "Goals From Inside Box",
    "Goals From Outside Box",
    "Goals From Counter Attack",
    "Offsides",
    "Clean Sheets",
    "Goals Conceded",
    "Saves",
    "Blocks",
    "Interceptions",
    "Tackles",
    "Last Man Tackles",
    "Clearances",
    "Headed Clearances",
    "Caught Opponent Offside",
    "Own Goals",
    "Penalties Conceded",
    "Goals Conceded From Penalty",
    "Fouls",
    "Passes",
    "Through Balls",
    "Long Passes",
    "Backwards Passes",
    "Crosses",
    "Corners Taken",
];

/// Categories listed on the site but with no data behind them.
pub const UNAVAILABLE_STATISTICS: &[&str] =
    &["Caught Opponent Offside", "Substitutions On", "Fouls"];

/// Statistic columns that duplicate table-derived fields.
pub const DUPLICATE_COLUMNS: &[&str] = &["Wins", "Losses", "Goals", "Goals_Conceded"];

/// Columns never converted to per-game rates.
pub const RATE_EXCLUDED: &[&str] = &[
    "Short_name",
    "Position",
    "Played",
    "Drawn",
    "Season",
    "Points",
    "Goal_Difference",
];

/// A statistic's display name as a dataset column name.
pub fn column_name(statistic: &str) -> String {
    statistic.replace(' ', "_")
}
