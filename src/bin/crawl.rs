//! Command-line crawler for WrestleStat D1 match histories.
//!
//! Reads `WRESTLESTAT_EMAIL` / `WRESTLESTAT_PASSWORD` from the environment,
//! crawls the configured season range, and writes per-team, per-season, and
//! full-history CSV datasets under the output directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use wrestlestat_scraper::{CrawlConfig, Crawler, Credentials, TeamCorrections, WrestleStatClient};

#[derive(Parser)]
#[command(
    name = "crawl",
    version,
    about = "Crawl WrestleStat D1 match results into CSV datasets"
)]
struct Cli {
    /// First season to crawl, identified by the year the season ends in
    #[arg(long, default_value_t = 2014)]
    from_season: u16,

    /// Last season to crawl, inclusive
    #[arg(long, default_value_t = 2026)]
    to_season: u16,

    /// Restrict the crawl to a single team slug (e.g. penn-state)
    #[arg(long)]
    team: Option<String>,

    /// Directory the CSV datasets are written under
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Maximum sustained request rate against wrestlestat.com
    #[arg(long, default_value_t = 30)]
    requests_per_minute: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();
    anyhow::ensure!(
        cli.from_season <= cli.to_season,
        "--from-season must not be after --to-season"
    );

    let credentials = Credentials::from_env().context("loading WrestleStat credentials")?;

    let config = CrawlConfig {
        seasons: cli.from_season..=cli.to_season,
        team: cli.team,
        out_dir: cli.out_dir,
        requests_per_minute: cli.requests_per_minute,
        corrections: TeamCorrections::default(),
    };

    let client = WrestleStatClient::new().context("building http client")?;
    let summary = Crawler::new(client, config)
        .run(&credentials)
        .await
        .context("crawl run failed")?;

    info!(
        seasons = summary.seasons,
        total_matches = summary.total_matches,
        "crawl complete"
    );
    Ok(())
}
