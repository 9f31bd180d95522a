//! Premier League pipeline CLI
//!
//! Turns collector-saved HTML into the per-game-rate dataset.

use clap::{Parser, Subcommand};
use plstats::{Config, Result};

#[derive(Parser)]
#[command(name = "plstats")]
#[command(about = "Premier League table and statistic pipeline", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default config and the data directory layout
    Init,
    /// Parse saved league table HTML into per-season artifacts
    Tables {
        /// Only process one season tag (e.g. 2022_23)
        #[arg(long)]
        season: Option<String>,
    },
    /// Parse saved statistic HTML into per-season artifacts
    Stats {
        /// Only process one season tag (e.g. 2022_23)
        #[arg(long)]
        season: Option<String>,
    },
    /// Join artifacts, derive per-game rates and write the final CSV
    Merge,
    /// Tables, stats and merge in one pass
    Run,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Init => commands::init(&cli.config, &config),
        Commands::Tables { season } => commands::tables(&config, season.as_deref()),
        Commands::Stats { season } => commands::stats(&config, season.as_deref()),
        Commands::Merge => commands::merge(&config),
        Commands::Run => commands::run(&config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use plstats::{pipeline, registry};

    pub fn init(config_path: &str, config: &Config) -> Result<()> {
        config.save(config_path)?;
        println!("Created config at {}", config_path);

        std::fs::create_dir_all(&config.data.tables_html_dir)?;
        std::fs::create_dir_all(&config.data.stats_html_dir)?;
        println!(
            "Created {} and {}",
            config.data.tables_html_dir, config.data.stats_html_dir
        );

        let seasons = registry::known_seasons();
        let tags: Vec<&str> = seasons.iter().map(|s| s.tag.as_str()).collect();
        println!("Seasons the collectors know: {}", tags.join(", "));

        println!("\nNext steps:");
        println!("  1. Drop collector HTML into the data directories");
        println!("  2. Run 'plstats tables' and 'plstats stats'");
        println!("  3. Run 'plstats merge' to write {}", config.data.output_csv);

        Ok(())
    }

    pub fn tables(config: &Config, season: Option<&str>) -> Result<()> {
        let done = pipeline::run_tables(config, season)?;
        println!("Built table artifacts for {} season(s)", done.len());
        Ok(())
    }

    pub fn stats(config: &Config, season: Option<&str>) -> Result<()> {
        let done = pipeline::run_stats(config, season)?;
        println!("Built statistic artifacts for {} season(s)", done.len());
        Ok(())
    }

    pub fn merge(config: &Config) -> Result<()> {
        let dataset = pipeline::run_merge(config)?;
        println!(
            "Wrote {} rows ({} statistic columns) to {}",
            dataset.records.len(),
            dataset.stat_columns.len(),
            config.data.output_csv
        );
        Ok(())
    }

    pub fn run(config: &Config) -> Result<()> {
        let dataset = pipeline::run_all(config)?;
        println!(
            "Pipeline complete: {} rows in {}",
            dataset.records.len(),
            config.data.output_csv
        );
        Ok(())
    }
}
