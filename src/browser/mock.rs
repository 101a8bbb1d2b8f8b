//! Scripted in-memory browser for exercising the extraction pipeline and the
//! traversal state machine without a WebDriver endpoint.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use super::{Browser, BrowserError};

/// One result card: field selector -> text. A faulty card errors on any
/// descendant lookup, simulating a stale or malformed DOM node.
#[derive(Debug, Clone, Default)]
pub struct MockCard {
    pub fields: HashMap<String, String>,
    pub faulty: bool,
}

impl MockCard {
    pub fn new(fields: &[(&str, &str)]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            faulty: false,
        }
    }

    pub fn faulty() -> Self {
        Self { fields: HashMap::new(), faulty: true }
    }
}

/// One rendered page of results.
#[derive(Debug, Clone, Default)]
pub struct MockPage {
    pub cards: Vec<MockCard>,
    /// Selector that matches this page's consent button, if a banner is up.
    pub consent: Option<String>,
    /// Selector that matches this page's next-page control, if present.
    pub next: Option<String>,
}

#[derive(Debug, Default)]
struct MockState {
    pages: Vec<MockPage>,
    current: usize,
    navigations: Vec<String>,
    clicks: Vec<String>,
    probes: Vec<String>,
    fail_navigate: bool,
    fail_wait_on_page: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockElement {
    Card { index: usize },
    Text { value: String },
    Control { selector: String, advances_page: bool },
}

pub struct MockBrowser {
    card_selectors: Vec<String>,
    state: Mutex<MockState>,
}

impl MockBrowser {
    pub fn new(card_selectors: &[&str], pages: Vec<MockPage>) -> Self {
        Self {
            card_selectors: card_selectors.iter().map(|s| s.to_string()).collect(),
            state: Mutex::new(MockState { pages, ..Default::default() }),
        }
    }

    /// Make the initial navigation fail with a session fault.
    pub fn fail_navigation(self) -> Self {
        self.state.lock().unwrap().fail_navigate = true;
        self
    }

    /// Make every wait on the given page index fail with a session fault.
    pub fn fail_wait_on_page(self, page: usize) -> Self {
        self.state.lock().unwrap().fail_wait_on_page = Some(page);
        self
    }

    pub fn clicks(&self) -> Vec<String> {
        self.state.lock().unwrap().clicks.clone()
    }

    /// Selectors probed against cards, in evaluation order.
    pub fn probes(&self) -> Vec<String> {
        self.state.lock().unwrap().probes.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.lock().unwrap().navigations.clone()
    }

    fn matches_card(&self, selector: &str) -> bool {
        self.card_selectors.iter().any(|s| s == selector)
    }
}

#[async_trait]
impl Browser for MockBrowser {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_navigate {
            return Err(BrowserError::Session("connection refused".into()));
        }
        state.navigations.push(url.to_string());
        state.current = 0;
        Ok(())
    }

    async fn wait_for(
        &self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Option<Self::Element>, BrowserError> {
        let state = self.state.lock().unwrap();
        if state.fail_wait_on_page == Some(state.current) {
            return Err(BrowserError::Session("tab crashed".into()));
        }
        let page = match state.pages.get(state.current) {
            Some(page) => page,
            None => return Ok(None),
        };
        if self.matches_card(selector) && !page.cards.is_empty() {
            return Ok(Some(MockElement::Card { index: 0 }));
        }
        if page.consent.as_deref() == Some(selector) {
            return Ok(Some(MockElement::Control {
                selector: selector.to_string(),
                advances_page: false,
            }));
        }
        if page.next.as_deref() == Some(selector) {
            return Ok(Some(MockElement::Control {
                selector: selector.to_string(),
                advances_page: true,
            }));
        }
        Ok(None)
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>, BrowserError> {
        let state = self.state.lock().unwrap();
        if !self.matches_card(selector) {
            return Ok(Vec::new());
        }
        let page = match state.pages.get(state.current) {
            Some(page) => page,
            None => return Ok(Vec::new()),
        };
        Ok((0..page.cards.len())
            .map(|index| MockElement::Card { index })
            .collect())
    }

    async fn find_in(
        &self,
        scope: &Self::Element,
        selector: &str,
    ) -> Result<Option<Self::Element>, BrowserError> {
        let mut state = self.state.lock().unwrap();
        state.probes.push(selector.to_string());
        let current = state.current;
        let card_index = match scope {
            MockElement::Card { index } => *index,
            _ => return Ok(None),
        };
        let card = state.pages[current]
            .cards
            .get(card_index)
            .cloned()
            .unwrap_or_default();
        if card.faulty {
            return Err(BrowserError::Command("stale element reference".into()));
        }
        Ok(card
            .fields
            .get(selector)
            .map(|value| MockElement::Text { value: value.clone() }))
    }

    async fn click(&self, element: &Self::Element) -> Result<(), BrowserError> {
        let mut state = self.state.lock().unwrap();
        if let MockElement::Control { selector, advances_page } = element {
            state.clicks.push(selector.clone());
            if *advances_page && state.current + 1 < state.pages.len() {
                state.current += 1;
            }
        }
        Ok(())
    }

    async fn text_of(&self, element: &Self::Element) -> Result<String, BrowserError> {
        match element {
            MockElement::Text { value } => Ok(value.clone()),
            _ => Ok(String::new()),
        }
    }

    async fn close(&self) -> Result<(), BrowserError> {
        Ok(())
    }
}
