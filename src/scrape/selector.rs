use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::browser::{Browser, BrowserError};

/// Ordered fallback chain of CSS selectors for one logical field.
///
/// Order encodes preference: the first candidate that matches a descendant
/// wins and later candidates are never evaluated. This is what absorbs
/// markup variance across A/B-tested or versioned page layouts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorSpec {
    pub candidates: Vec<String>,
}

impl SelectorSpec {
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Resolve a field value inside `scope` by walking the fallback chain.
///
/// A candidate that matches nothing advances resolution to the next one; an
/// exhausted chain yields an empty string, which the extractor treats as the
/// field's default. Browser faults propagate so the card boundary can absorb
/// them.
pub async fn resolve<B: Browser>(
    browser: &B,
    scope: &B::Element,
    spec: &SelectorSpec,
) -> Result<String, BrowserError> {
    for candidate in &spec.candidates {
        match browser.find_in(scope, candidate).await? {
            Some(element) => {
                let text = browser.text_of(&element).await?;
                return Ok(text.trim().to_string());
            }
            None => {
                trace!(selector = %candidate, "candidate matched nothing");
                continue;
            }
        }
    }
    Ok(String::new())
}
