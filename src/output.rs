//! Final dataset serialization
//!
//! One semicolon-delimited row per (team, season), led by the composite
//! key. Columns the rate deriver left as raw totals are written as
//! integers; rate columns as floats.

use crate::merge::{MasterDataset, TABLE_VALUE_COLUMNS};
use crate::Result;
use std::path::Path;

/// Write the master dataset to `path`.
pub fn write_csv<P: AsRef<Path>>(
    dataset: &MasterDataset,
    path: P,
    excluded: &[String],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path.as_ref())?;

    let mut header = vec!["Idx", "Team", "Short_name"];
    header.extend(TABLE_VALUE_COLUMNS);
    header.extend(dataset.stat_columns.iter().map(String::as_str));
    header.push("Season");
    writer.write_record(&header)?;

    for record in &dataset.records {
        let mut row = vec![
            record.key.clone(),
            record.team.clone(),
            record.short_name.clone(),
        ];
        for column in TABLE_VALUE_COLUMNS
            .iter()
            .copied()
            .chain(dataset.stat_columns.iter().map(String::as_str))
        {
            let value = record.values.get(column).copied().unwrap_or(0.0);
            if excluded.iter().any(|e| e == column) {
                row.push(format!("{}", value as i64));
            } else {
                row.push(value.to_string());
            }
        }
        row.push(record.season.clone());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}
