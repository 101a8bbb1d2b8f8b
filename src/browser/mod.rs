use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

pub mod webdriver;

#[cfg(test)]
pub mod mock;

/// Fault raised by a browser operation.
///
/// `Session` means the automation session itself has become unusable and the
/// traversal cannot continue; `Command` covers everything recoverable (a
/// stale element, a control refusing a click) and is absorbed at the card or
/// candidate level.
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("browser session failure: {0}")]
    Session(String),

    #[error("browser command failed: {0}")]
    Command(String),
}

impl BrowserError {
    pub fn is_session_fault(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}

/// The DOM operations the extraction engine needs from an automation product.
///
/// Timeouts and missing elements are ordinary outcome values (`Ok(None)`),
/// not errors; `Err` is reserved for faults of the session or the command
/// channel itself. The engine never assumes a specific automation backend
/// beyond these operations plus teardown.
#[async_trait]
pub trait Browser: Send + Sync {
    type Element: Send + Sync;

    /// Load the given URL in the current window.
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// Wait up to `timeout` for an element matching `selector` to be present
    /// and interactable. `Ok(None)` on timeout.
    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<Self::Element>, BrowserError>;

    /// All elements currently matching `selector`, in document order.
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError>;

    /// First descendant of `scope` matching `selector`, `Ok(None)` if absent.
    async fn find_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, BrowserError>;

    /// Click an element.
    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError>;

    /// Visible text content of an element.
    async fn text_of(&self, element: &Self::Element) -> Result<String, BrowserError>;

    /// Tear the session down.
    async fn close(&self) -> Result<(), BrowserError>;
}
