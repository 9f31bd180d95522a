//! Per-game rate derivation
//!
//! Converts cumulative season totals into per-game averages by dividing
//! every numeric column, except the exclusion set, by the row's Played
//! count. Mutates the dataset in place. A Played count of zero cannot
//! produce a meaningful rate, so such rows get a defined 0.0 instead of
//! an infinity.

use crate::merge::MasterDataset;

/// Derive per-game rates for all columns not named in `excluded`.
pub fn derive_rates(dataset: &mut MasterDataset, excluded: &[String]) {
    for record in &mut dataset.records {
        let played = record.values.get("Played").copied().unwrap_or(0.0);
        if played == 0.0 {
            log::warn!(
                "{}: Played is zero; rate columns set to 0.0",
                record.key
            );
        }
        for (column, value) in record.values.iter_mut() {
            if excluded.iter().any(|e| e == column) {
                continue;
            }
            *value = if played == 0.0 { 0.0 } else { *value / played };
        }
    }
}
