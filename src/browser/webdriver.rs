use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::BrowserConfig;
use crate::error::{ScrapeError, ScrapeResult};

use super::{Browser, BrowserError};

/// WebDriver-backed browser session.
///
/// Talks to a chromedriver/geckodriver endpoint over the WebDriver protocol.
/// The client handle is serialized behind a mutex: the traversal is
/// single-threaded by design and every DOM operation shares one document
/// context.
pub struct WebDriverSession {
    client: Mutex<Client>,
}

impl WebDriverSession {
    /// Create a new session against the configured WebDriver endpoint.
    ///
    /// This is the one fault that propagates to the caller: without a
    /// session there is nothing to traverse.
    pub async fn connect(config: &BrowserConfig) -> ScrapeResult<Self> {
        info!("Connecting to WebDriver at {}", config.webdriver_url);

        let mut args = vec![
            "--no-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-blink-features=AutomationControlled".to_string(),
            format!("--user-agent={}", config.user_agent),
        ];
        if config.headless {
            args.push("--headless=new".to_string());
        }

        let mut caps = serde_json::map::Map::new();
        caps.insert(
            "goog:chromeOptions".to_string(),
            json!({
                "args": args,
                "excludeSwitches": ["enable-automation"],
            }),
        );

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(&config.webdriver_url)
            .await
            .map_err(|e| ScrapeError::session_init(e.to_string()))?;

        info!("WebDriver session established");
        Ok(Self { client: Mutex::new(client) })
    }
}

fn classify(err: CmdError) -> BrowserError {
    match err {
        CmdError::Lost(e) => BrowserError::Session(e.to_string()),
        other => BrowserError::Command(other.to_string()),
    }
}

#[async_trait]
impl Browser for WebDriverSession {
    type Element = fantoccini::elements::Element;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        debug!(%url, "navigating");
        let mut client = self.client.lock().await;
        client.goto(url).await.map_err(classify)
    }

    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<Self::Element>, BrowserError> {
        let mut client = self.client.lock().await;
        match client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(element) => Ok(Some(element)),
            Err(CmdError::WaitTimeout) => Ok(None),
            Err(CmdError::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(classify(e)),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError> {
        let mut client = self.client.lock().await;
        client
            .find_all(Locator::Css(selector))
            .await
            .map_err(classify)
    }

    async fn find_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, BrowserError> {
        let mut scope = scope.clone();
        match scope.find(Locator::Css(selector)).await {
            Ok(element) => Ok(Some(element)),
            Err(CmdError::NoSuchElement(_)) => Ok(None),
            Err(e) => Err(classify(e)),
        }
    }

    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError> {
        let target = element.clone();
        let _ = target.click().await.map_err(classify)?;
        Ok(())
    }

    async fn text_of(&self, element: &Self::Element) -> Result<String, BrowserError> {
        let mut element = element.clone();
        element.text().await.map_err(classify)
    }

    async fn close(&self) -> Result<(), BrowserError> {
        let client = self.client.lock().await.clone();
        if let Err(e) = client.close().await {
            warn!("Failed to close WebDriver session cleanly: {}", e);
        }
        Ok(())
    }
}
