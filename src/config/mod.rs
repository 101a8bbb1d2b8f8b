use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::error::{ScrapeError, ScrapeResult};
use crate::logging::LoggingConfig;
use crate::scrape::selector::SelectorSpec;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub browser: BrowserConfig,
    pub scraping: ScrapeConfig,
    pub selectors: SelectorConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".to_string(),
            headless: true,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        }
    }
}

/// Timeouts, settle pauses, and the page budget for one traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Hard upper bound on fetched pages.
    pub max_pages: usize,
    /// How long to wait for the first result card on each page.
    pub card_wait_secs: u64,
    /// Per-candidate wait while probing for a consent button.
    pub consent_wait_secs: u64,
    /// Per-candidate wait while probing for a next-page control.
    pub next_wait_secs: u64,
    /// Pause after the initial navigation.
    pub initial_settle_ms: u64,
    /// Pause after cards appear and after a next-page click.
    pub page_settle_ms: u64,
    /// Pause after dismissing a consent banner.
    pub banner_settle_ms: u64,
    /// Random jitter added on top of each settle pause.
    pub settle_jitter_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            max_pages: 5,
            card_wait_secs: 15,
            consent_wait_secs: 5,
            next_wait_secs: 5,
            initial_settle_ms: 5000,
            page_settle_ms: 3000,
            banner_settle_ms: 1000,
            settle_jitter_ms: 750,
        }
    }
}

/// Selector fallback chain for each of the six listing fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSelectors {
    pub name: SelectorSpec,
    pub price: SelectorSpec,
    pub rating: SelectorSpec,
    pub location: SelectorSpec,
    pub review_count: SelectorSpec,
    pub distance: SelectorSpec,
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            name: SelectorSpec::new(["[data-testid='title']", "div[data-testid='title']"]),
            price: SelectorSpec::new([
                "[data-testid='price-and-discounted-price']",
                "span[data-testid='price']",
            ]),
            rating: SelectorSpec::new([
                "[data-testid='review-score']",
                "[data-testid='review-score'] div:first-child",
            ]),
            location: SelectorSpec::new(["[data-testid='location']", "[data-testid='address']"]),
            review_count: SelectorSpec::new(["[data-testid='review-score'] div:last-child"]),
            distance: SelectorSpec::new([
                "[data-testid='distance']",
                "span[data-testid='distance']",
            ]),
        }
    }
}

/// Every selector the traversal touches, all expressed as fallback chains so
/// a layout variant only needs a config edit, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub card: SelectorSpec,
    pub fields: FieldSelectors,
    pub consent: SelectorSpec,
    pub next_page: SelectorSpec,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: SelectorSpec::new([
                "[data-testid='property-card']",
                "div[data-testid='property-card-container']",
            ]),
            fields: FieldSelectors::default(),
            consent: SelectorSpec::new([
                "button#onetrust-accept-btn-handler",
                "button[aria-label*='cookie']",
                "button[class*='cookie']",
                "button[data-testid*='cookie']",
            ]),
            next_page: SelectorSpec::new([
                "button[aria-label*='Next']",
                "a[aria-label*='Next']",
                "button[data-testid*='next']",
                "a[data-testid*='next']",
                "div[data-testid='pagination'] a:last-child",
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub default_format: String,
    pub output_directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            default_format: "csv".to_string(),
            output_directory: PathBuf::from("data"),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to
    /// defaults when no file exists yet.
    pub async fn load() -> Result<Self> {
        let config_path = get_config_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub async fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: AppConfig = toml::from_str(&content)?;

        config.validate()?;

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Save configuration to the default location
    pub async fn save(&self) -> Result<()> {
        let config_path = get_config_path();

        if let Some(parent) = config_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(&config_path, content).await?;

        info!("Configuration saved to: {}", config_path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> ScrapeResult<()> {
        if self.scraping.max_pages == 0 {
            return Err(ScrapeError::config("scraping max_pages must be > 0"));
        }

        if self.scraping.card_wait_secs == 0 {
            return Err(ScrapeError::config("scraping card_wait_secs must be > 0"));
        }

        if self.selectors.card.is_empty() {
            return Err(ScrapeError::config("at least one card selector must be configured"));
        }

        if self.selectors.fields.name.is_empty() {
            return Err(ScrapeError::config("at least one name selector must be configured"));
        }

        if self.browser.user_agent.is_empty() {
            return Err(ScrapeError::config("a user agent must be configured"));
        }

        Ok(())
    }
}

/// Get the configuration file path
fn get_config_path() -> PathBuf {
    directories::ProjectDirs::from("com", "stayscrape", "stayscrape")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default().join("config.toml"))
}

/// Environment-based configuration overrides
pub struct ConfigOverrides;

impl ConfigOverrides {
    /// Apply environment variable overrides to configuration
    pub fn apply(config: &mut AppConfig) {
        if let Ok(url) = std::env::var("STAYSCRAPE_WEBDRIVER_URL") {
            config.browser.webdriver_url = url;
        }

        if let Ok(headless) = std::env::var("STAYSCRAPE_HEADLESS") {
            config.browser.headless = headless.to_lowercase() == "true";
        }

        if let Ok(pages_str) = std::env::var("STAYSCRAPE_MAX_PAGES") {
            if let Ok(pages) = pages_str.parse::<usize>() {
                config.scraping.max_pages = pages;
            }
        }

        if let Ok(dir) = std::env::var("STAYSCRAPE_OUTPUT_DIR") {
            config.export.output_directory = PathBuf::from(dir);
        }

        if let Ok(log_level) = std::env::var("STAYSCRAPE_LOG_LEVEL") {
            config.logging.level = log_level;
        }
    }
}
