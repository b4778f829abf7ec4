//! Composition root: argument parsing, logging setup, component wiring.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use ofertas_core::{config, OfferSink, ScrapeConfig};
use ofertas_export::{CsvSink, JsonlSink};
use ofertas_scraper::{
    DetailHarvester, ExtractionRules, LinkCollector, OfferDetailParser, OfferListParser,
    PageClient, ScrapeCoordinator,
};

#[derive(Debug, Parser)]
#[command(name = "ofertas")]
#[command(about = "Crawl a listing site and extract structured offer records")]
struct Cli {
    /// Starting URL for the crawl.
    #[arg(long, env = "OFERTAS_SEED_URL")]
    seed_url: Url,

    /// Site root used to resolve relative links.
    #[arg(long, default_value = "https://doisporum.net")]
    base_url: Url,

    /// Maximum number of offers to collect.
    #[arg(long, default_value_t = config::DEFAULT_MAX_ITEMS)]
    max_items: usize,

    /// Seconds to wait between request starts.
    #[arg(long, default_value_t = 0.8)]
    rate_limit_seconds: f64,

    /// Maximum concurrent detail-page fetches.
    #[arg(long, default_value_t = config::DEFAULT_MAX_CONCURRENCY)]
    max_concurrency: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 20.0)]
    timeout: f64,

    /// Custom User-Agent string.
    #[arg(long)]
    user_agent: Option<String>,

    /// Path for CSV output.
    #[arg(long, default_value = "ofertas.csv")]
    csv_path: PathBuf,

    /// Path for JSONL output.
    #[arg(long, default_value = "ofertas.jsonl")]
    jsonl_path: PathBuf,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(ScrapeConfig, PathBuf, PathBuf)> {
        let rate_limit = Duration::try_from_secs_f64(self.rate_limit_seconds)
            .map_err(|e| anyhow::anyhow!("invalid --rate-limit-seconds: {e}"))?;
        let timeout = Duration::try_from_secs_f64(self.timeout)
            .map_err(|e| anyhow::anyhow!("invalid --timeout: {e}"))?;

        let mut scrape = ScrapeConfig::new(self.seed_url, self.base_url);
        scrape.max_items = self.max_items;
        scrape.rate_limit = rate_limit;
        scrape.max_concurrency = self.max_concurrency;
        scrape.timeout = timeout;
        if let Some(user_agent) = self.user_agent {
            scrape.user_agent = user_agent;
        }

        Ok((scrape.validated()?, self.csv_path, self.jsonl_path))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let (config, csv_path, jsonl_path) = Cli::parse().into_config()?;

    let rules = Arc::new(ExtractionRules::for_base(config.base_url.clone()));
    let client = Arc::new(PageClient::new(
        config.timeout,
        config.rate_limit,
        &config.user_agent,
    )?);

    let collector = LinkCollector::new(
        Arc::clone(&client),
        OfferListParser::new(Arc::clone(&rules)),
    );
    let harvester = DetailHarvester::new(
        client,
        OfferDetailParser::new(rules),
        config.max_concurrency,
    );
    let coordinator = ScrapeCoordinator::new(collector, harvester);

    let sinks: Vec<Box<dyn OfferSink>> = vec![
        Box::new(CsvSink::new(&csv_path)),
        Box::new(JsonlSink::new(&jsonl_path)),
    ];

    let summary = coordinator
        .run(config.seed_url.as_str(), config.max_items, &sinks)
        .await;

    if summary.records_harvested == 0 {
        tracing::warn!("run finished without producing any offers");
    } else {
        println!(
            "Scraped {} offers ({} URLs discovered); CSV: {}, JSONL: {}",
            summary.records_harvested,
            summary.urls_discovered,
            csv_path.display(),
            jsonl_path.display(),
        );
    }
    if summary.sinks_failed > 0 {
        anyhow::bail!("{} output destination(s) failed", summary.sinks_failed);
    }
    Ok(())
}
