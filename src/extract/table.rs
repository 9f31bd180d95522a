//! League table extraction
//!
//! One saved table page per season. The table body is identified by the
//! `league-table__tbody` marker; each team row carries long and short name
//! spans followed by eight numeric cells in fixed order. Extraction is
//! schema-validated: a missing marker or a row count other than 20 is a
//! structural-mismatch error, not an index fault.

use crate::{PipelineError, Result};
use scraper::{ElementRef, Html, Selector};

/// A league table always has one row per club.
pub const TABLE_ROWS: usize = 20;

/// Column names for the eight numeric cells, in document order.
pub const TABLE_COLUMNS: [&str; 8] = [
    "Played",
    "Won",
    "Drawn",
    "Lost",
    "Goals_For",
    "Goals_Conceded",
    "Goal_Difference",
    "Points",
];

/// One extracted table row, fields still as raw text. Numeric coercion is
/// the season table builder's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub team: String,
    pub short_name: String,
    pub fields: [String; 8],
}

/// Parse one season's table HTML into exactly [`TABLE_ROWS`] rows in
/// document order (row index 0 is league position 1).
///
/// `context` names the source (season tag or file path) for diagnostics.
pub fn parse_league_table(html: &str, context: &str) -> Result<Vec<TableRow>> {
    let document = Html::parse_document(html);

    let tbody_selector = Selector::parse("tbody.league-table__tbody").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let long_selector = Selector::parse("span.league-table__team-name--long").unwrap();
    let short_selector = Selector::parse("span.league-table__team-name--short").unwrap();
    let cell_selector = Selector::parse("td").unwrap();
    let name_cell_selector = Selector::parse("span.league-table__team-name").unwrap();

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or(PipelineError::MissingMarker {
            marker: "league-table__tbody",
            context: context.to_string(),
        })?;

    // The tbody interleaves club rows with expandable form rows; a club
    // row is the one carrying the team name spans.
    let club_rows: Vec<ElementRef> = tbody
        .select(&row_selector)
        .filter(|row| row.select(&long_selector).next().is_some())
        .collect();

    if club_rows.len() != TABLE_ROWS {
        return Err(PipelineError::RowCount {
            expected: TABLE_ROWS,
            found: club_rows.len(),
        });
    }

    let mut rows = Vec::with_capacity(TABLE_ROWS);
    for (i, row) in club_rows.iter().enumerate() {
        let team = span_text(row, &long_selector).ok_or(PipelineError::MissingField {
            field: "long team name",
            row: i,
        })?;
        let short_name = span_text(row, &short_selector).ok_or(PipelineError::MissingField {
            field: "short team name",
            row: i,
        })?;

        // The eight numeric cells follow the club cell; skip everything up
        // to and including it, then take exactly eight.
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        let club_idx = cells
            .iter()
            .position(|c| c.select(&name_cell_selector).next().is_some())
            .ok_or(PipelineError::MissingField {
                field: "club cell",
                row: i,
            })?;

        let texts: Vec<String> = cells
            .iter()
            .skip(club_idx + 1)
            .take(8)
            .map(|c| c.text().collect::<String>().trim().to_string())
            .collect();
        let fields: [String; 8] = texts.try_into().map_err(|_| PipelineError::MissingField {
            field: "statistic cell",
            row: i,
        })?;

        rows.push(TableRow {
            team,
            short_name,
            fields,
        });
    }

    Ok(rows)
}

fn span_text(row: &ElementRef, selector: &Selector) -> Option<String> {
    row.select(selector)
        .next()
        .map(|s| s.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}
