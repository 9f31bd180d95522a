//! Statistic page extraction
//!
//! One saved page per (statistic, page number). The statistics table body
//! is identified by the `statsTableContainer` marker; each row carries a
//! team label (inside an icon-aligned anchor) and a single value cell.
//! A statistic may span two pages; [`combine_pages`] guards against the
//! site returning the same page twice.

use crate::{PipelineError, Result};
use scraper::{Html, Selector};

/// One (team, raw value) pair from a statistic page. Values stay as text
/// until the season statistic builder coerces them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatRow {
    pub team: String,
    pub value: String,
}

/// Parse one statistic page into its team/value rows.
///
/// Zero rows is not an error here; the builder logs a warning for a
/// statistic that yields no data for a season.
pub fn parse_stats_page(html: &str, context: &str) -> Result<Vec<StatRow>> {
    let document = Html::parse_document(html);

    let tbody_selector = Selector::parse("tbody.statsTableContainer").unwrap();
    let row_selector = Selector::parse("tr.table__row").unwrap();
    let value_selector = Selector::parse("td.stats-table__main-stat").unwrap();
    let team_selector = Selector::parse("td.stats-table__name a.stats-table__cell-icon-align").unwrap();

    let tbody = document
        .select(&tbody_selector)
        .next()
        .ok_or(PipelineError::MissingMarker {
            marker: "statsTableContainer",
            context: context.to_string(),
        })?;

    let mut rows = Vec::new();
    for (i, row) in tbody.select(&row_selector).enumerate() {
        let value = row
            .select(&value_selector)
            .next()
            .map(|c| c.text().collect::<String>().trim().to_string())
            .ok_or(PipelineError::MissingField {
                field: "statistic value cell",
                row: i,
            })?;

        // The team anchor starts with a badge icon; the label is the last
        // text node inside it.
        let team = row
            .select(&team_selector)
            .next()
            .and_then(|a| {
                a.text()
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .last()
                    .map(str::to_string)
            })
            .ok_or(PipelineError::MissingField {
                field: "team name cell",
                row: i,
            })?;

        rows.push(StatRow { team, value });
    }

    Ok(rows)
}

/// Concatenate a second pagination page onto the first.
///
/// The site sometimes serves page 1 again when asked for page 2; the
/// second page is kept only when its team list differs from the first's.
pub fn combine_pages(mut first: Vec<StatRow>, second: Option<Vec<StatRow>>) -> Vec<StatRow> {
    if let Some(second) = second {
        let first_teams: Vec<&str> = first.iter().map(|r| r.team.as_str()).collect();
        let second_teams: Vec<&str> = second.iter().map(|r| r.team.as_str()).collect();
        if first_teams != second_teams {
            first.extend(second);
        } else {
            log::debug!("Pagination returned a duplicate page; discarding it");
        }
    }
    first
}
