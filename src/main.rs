use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use stayscrape::browser::webdriver::WebDriverSession;
use stayscrape::browser::Browser;
use stayscrape::config::{AppConfig, ConfigOverrides};
use stayscrape::export::{self, ExportFormat};
use stayscrape::logging::init_logging;
use stayscrape::{PageTraversal, RunOutcome};

#[derive(Parser)]
#[command(name = "stayscrape")]
#[command(about = "Scrape paginated hotel listing results into a tabular dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[arg(help = "Results page URL to start from")]
    url: String,

    #[arg(long, help = "Maximum number of pages to traverse")]
    max_pages: Option<usize>,

    #[arg(long, help = "Run the browser headless")]
    headless: bool,

    #[arg(short, long, default_value = "hotels.csv", help = "Output file path")]
    output: PathBuf,

    #[arg(long, help = "Output format (csv or tsv); inferred from the path by default")]
    format: Option<String>,

    #[arg(long, help = "WebDriver endpoint to connect to")]
    webdriver_url: Option<String>,

    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    url::Url::parse(&cli.url).context("target URL is not a valid absolute URL")?;

    let mut config = if let Some(config_path) = &cli.config {
        AppConfig::load_from_file(config_path).await?
    } else {
        AppConfig::load().await?
    };
    ConfigOverrides::apply(&mut config);

    if let Some(max_pages) = cli.max_pages {
        config.scraping.max_pages = max_pages;
    }
    if cli.headless {
        config.browser.headless = true;
    }
    if let Some(url) = &cli.webdriver_url {
        config.browser.webdriver_url = url.clone();
    }
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }

    init_logging(&config.logging)?;
    config.validate()?;

    info!("stayscrape v{}", env!("CARGO_PKG_VERSION"));

    // Session creation is the one fatal fault: without a browser there is
    // nothing to traverse, and the process exits non-zero.
    let session = WebDriverSession::connect(&config.browser)
        .await
        .context("failed to initialize the automation session")?;

    let report = PageTraversal::new(&session, &config.selectors, &config.scraping)
        .run(&cli.url)
        .await;

    if let Err(e) = session.close().await {
        warn!("Session teardown reported an error: {}", e);
    }

    if report.outcome == RunOutcome::Failed {
        warn!("Traversal ended on a session fault; exporting partial results");
    }

    let format = cli
        .format
        .as_deref()
        .and_then(ExportFormat::parse)
        .unwrap_or_else(|| ExportFormat::from_path(&cli.output));
    let stats = export::export_listings(&report.listings, &cli.output, format)
        .await
        .context("failed to write the output file")?;

    print_summary(&report.listings, report.pages_fetched, &cli.output, stats.records);

    Ok(())
}

fn print_summary(
    listings: &[stayscrape::Listing],
    pages: usize,
    output: &PathBuf,
    records: usize,
) {
    println!("\nScraping summary:");
    println!("  Pages traversed:   {}", pages);
    println!("  Listings collected: {}", records);

    if !listings.is_empty() {
        let priced: Vec<f64> = listings.iter().map(|l| l.price).filter(|p| *p > 0.0).collect();
        if !priced.is_empty() {
            let mean = priced.iter().sum::<f64>() / priced.len() as f64;
            println!("  Average price:     {:.2}", mean);
        }
        let rated: Vec<f64> = listings.iter().map(|l| l.rating).filter(|r| *r > 0.0).collect();
        if !rated.is_empty() {
            let mean = rated.iter().sum::<f64>() / rated.len() as f64;
            println!("  Average rating:    {:.2}", mean);
        }
    }

    println!("  Output file:       {}", output.display());
}
