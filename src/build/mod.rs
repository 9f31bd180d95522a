//! Per-season record set builders
//!
//! Turn extracted rows into keyed record sets and persist them as one
//! JSON artifact per season, decoupling extraction from the merge stage.

pub mod stats;
pub mod table;

pub use stats::SeasonStats;
pub use table::SeasonTable;
