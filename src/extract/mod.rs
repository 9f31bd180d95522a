//! HTML extraction for league tables and statistic pages

pub mod stats;
pub mod table;

#[cfg(test)]
pub mod test_fixtures;

pub use stats::{combine_pages, parse_stats_page, StatRow};
pub use table::{parse_league_table, TableRow, TABLE_COLUMNS, TABLE_ROWS};
