//! Batch orchestration
//!
//! Runs the extraction, build and merge stages over whatever seasons the
//! collectors have saved. Each season is an independent unit of failure:
//! a malformed season is logged and skipped, and the remaining seasons'
//! artifacts and output are preserved.

use crate::build::{stats::build_season_stats, SeasonStats, SeasonTable};
use crate::extract::parse_league_table;
use crate::merge::MasterDataset;
use crate::rate::derive_rates;
use crate::registry::discover_seasons;
use crate::{output, Config, PipelineError, Result};
use std::path::Path;

/// Parse every season's table HTML into a per-season artifact.
///
/// Returns the tags of the seasons that succeeded.
pub fn run_tables(config: &Config, season: Option<&str>) -> Result<Vec<String>> {
    let html_dir = Path::new(&config.data.tables_html_dir);
    let out_dir = Path::new(&config.data.tables_out_dir);
    std::fs::create_dir_all(out_dir)?;

    let mut done = Vec::new();
    for tag in select_seasons(html_dir, season)? {
        log::info!("Working on season: {}", tag);
        let result = (|| -> Result<()> {
            let html = std::fs::read_to_string(html_dir.join(format!("{tag}.html")))?;
            let rows = parse_league_table(&html, &tag)?;
            let table = SeasonTable::from_rows(rows)?;
            table.store(out_dir.join(format!("{tag}.json")))?;
            Ok(())
        })();
        match result {
            Ok(()) => done.push(tag),
            Err(e) => log::error!("Season {} table failed: {}", tag, e),
        }
    }
    Ok(done)
}

/// Parse every season's statistic pages into a per-season artifact.
pub fn run_stats(config: &Config, season: Option<&str>) -> Result<Vec<String>> {
    let html_dir = Path::new(&config.data.stats_html_dir);
    let out_dir = Path::new(&config.data.stats_out_dir);
    std::fs::create_dir_all(out_dir)?;

    let mut done = Vec::new();
    for tag in select_seasons(html_dir, season)? {
        log::info!("Working on season: {}", tag);
        let result = build_season_stats(html_dir.join(&tag), &tag, &config.stats)
            .and_then(|stats| stats.store(out_dir.join(format!("{tag}.json"))));
        match result {
            Ok(()) => done.push(tag),
            Err(e) => log::error!("Season {} statistics failed: {}", tag, e),
        }
    }
    Ok(done)
}

/// Join the per-season artifacts, derive rates and write the final CSV.
///
/// Returns the merged dataset (post-derivation) for reporting.
pub fn run_merge(config: &Config) -> Result<MasterDataset> {
    let tables_dir = Path::new(&config.data.tables_out_dir);
    let stats_dir = Path::new(&config.data.stats_out_dir);

    let mut dataset = MasterDataset::new();
    for tag in discover_seasons(tables_dir, "json")? {
        let result = (|| -> Result<()> {
            let table = SeasonTable::load(tables_dir.join(format!("{tag}.json")))?;
            let stats_path = stats_dir.join(format!("{tag}.json"));
            if !stats_path.exists() {
                return Err(PipelineError::MissingArtifact(tag.clone()));
            }
            let stats = SeasonStats::load(stats_path)?;
            dataset.push_season(&table, &stats, &tag)
        })();
        if let Err(e) = result {
            log::error!("Season {} skipped: {}", tag, e);
        }
    }

    derive_rates(&mut dataset, &config.rate.excluded);
    output::write_csv(&dataset, &config.data.output_csv, &config.rate.excluded)?;
    log::info!(
        "Wrote {} rows to {}",
        dataset.records.len(),
        config.data.output_csv
    );
    Ok(dataset)
}

/// Tables, statistics and merge in one pass.
pub fn run_all(config: &Config) -> Result<MasterDataset> {
    run_tables(config, None)?;
    run_stats(config, None)?;
    run_merge(config)
}

fn select_seasons(dir: &Path, season: Option<&str>) -> Result<Vec<String>> {
    let mut tags = discover_seasons(dir, "html")?;
    if let Some(season) = season {
        tags.retain(|t| t == season);
        if tags.is_empty() {
            return Err(PipelineError::Config(format!(
                "Season {} not found under {}",
                season,
                dir.display()
            )));
        }
    }
    if tags.is_empty() {
        log::warn!("No seasons found under {}", dir.display());
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_fixtures::{league_table_html, stats_page_html};
    use std::path::PathBuf;

    /// Lay out a collector-style data directory for one season and return
    /// a config rooted in the temp dir.
    fn fixture_config(root: &Path, season: &str) -> Config {
        let mut config = Config::default();
        config.data.tables_html_dir = root.join("tables_html").display().to_string();
        config.data.stats_html_dir = root.join("stats_html").display().to_string();
        config.data.tables_out_dir = root.join("tables_json").display().to_string();
        config.data.stats_out_dir = root.join("stats_json").display().to_string();
        config.data.output_csv = root.join("pl_data.csv").display().to_string();

        let tables_dir = PathBuf::from(&config.data.tables_html_dir);
        std::fs::create_dir_all(&tables_dir).unwrap();
        std::fs::write(
            tables_dir.join(format!("{season}.html")),
            league_table_html(20),
        )
        .unwrap();

        let season_dir = PathBuf::from(&config.data.stats_html_dir).join(season);
        std::fs::create_dir_all(&season_dir).unwrap();
        let teams: Vec<String> = (1..=20).map(|i| format!("Club {i}")).collect();
        for category in config.stats.collected() {
            let rows: Vec<(&str, &str)> = teams.iter().map(|t| (t.as_str(), "76")).collect();
            std::fs::write(
                season_dir.join(format!("{category}_1.html")),
                stats_page_html(&rows),
            )
            .unwrap();
        }
        config
    }

    #[test]
    fn test_end_to_end_single_season() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path(), "2022_23");

        assert_eq!(run_tables(&config, None).unwrap(), vec!["2022_23"]);
        assert_eq!(run_stats(&config, None).unwrap(), vec!["2022_23"]);
        let dataset = run_merge(&config).unwrap();

        assert_eq!(dataset.records.len(), 20);

        // Rate columns are raw value / Played; exclusion set untouched.
        let top = &dataset.records[0];
        assert_eq!(top.team, "Club 1");
        assert_eq!(top.values["Position"], 1.0);
        assert_eq!(top.values["Played"], 38.0);
        assert_eq!(top.values["Points"], 81.0);
        assert!((top.values["Goals_For"] - 80.0 / 38.0).abs() < 1e-12);
        assert!((top.values["Saves"] - 76.0 / 38.0).abs() < 1e-12);

        let content = std::fs::read_to_string(&config.data.output_csv).unwrap();
        // Header plus one row per club.
        assert_eq!(content.lines().count(), 21);
        assert!(content.lines().next().unwrap().starts_with("Idx;Team;Short_name;"));
    }

    #[test]
    fn test_bad_season_skipped_good_season_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path(), "2022_23");

        // A second season with a truncated table; it must fail alone.
        let tables_dir = PathBuf::from(&config.data.tables_html_dir);
        std::fs::write(tables_dir.join("2023_24.html"), league_table_html(11)).unwrap();

        let done = run_tables(&config, None).unwrap();
        assert_eq!(done, vec!["2022_23"]);
        assert!(PathBuf::from(&config.data.tables_out_dir)
            .join("2022_23.json")
            .exists());
        assert!(!PathBuf::from(&config.data.tables_out_dir)
            .join("2023_24.json")
            .exists());
    }

    #[test]
    fn test_merge_skips_corrupt_artifact_and_keeps_good_season() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path(), "2022_23");
        run_tables(&config, None).unwrap();
        run_stats(&config, None).unwrap();

        // A second season whose table artifact is unreadable; it must not
        // take the good season down with it.
        std::fs::write(
            PathBuf::from(&config.data.tables_out_dir).join("2023_24.json"),
            "not json",
        )
        .unwrap();

        let dataset = run_merge(&config).unwrap();
        assert_eq!(dataset.records.len(), 20);
        assert!(dataset.records.iter().all(|r| r.season == "2022_23"));
    }

    #[test]
    fn test_season_filter() {
        let dir = tempfile::tempdir().unwrap();
        let config = fixture_config(dir.path(), "2022_23");

        let done = run_tables(&config, Some("2022_23")).unwrap();
        assert_eq!(done, vec!["2022_23"]);

        let err = run_tables(&config, Some("1999_00")).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }
}
