use rand::Rng;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::browser::Browser;
use crate::config::{ScrapeConfig, SelectorConfig};

use super::accumulator::ResultAccumulator;
use super::{consent, extract, Listing};

/// Pagination cursor: current 0-based page index plus whether further pages
/// are believed to exist. Forward-only; a page is never revisited.
#[derive(Debug, Clone, Copy)]
pub struct PageState {
    pub index: usize,
    pub has_more: bool,
}

/// Traversal phases. Every page-level outcome is a state transition, not an
/// exception: a load timeout and a missing next-page control both land in
/// `Exhausted`, and only an unusable session lands in `Failed`.
#[derive(Debug)]
enum Phase {
    Fetching,
    Extracting,
    Paginating,
    Done(RunOutcome),
}

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No more usable results: the budget was spent, the next-page control
    /// disappeared, or a page never rendered a card.
    Exhausted,
    /// The browser session became unusable mid-run. Whatever accumulated up
    /// to that point is still in the report.
    Failed,
}

/// Final result of a traversal.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    pub pages_fetched: usize,
    pub listings: Vec<Listing>,
}

/// Drives the fetch → extract → paginate loop over one browser session.
///
/// Owns the pagination cursor and holds exclusive write access to the
/// accumulator for the duration of the run. Execution is single-threaded and
/// cooperative: every wait is a bounded suspension point and a timeout is a
/// state-machine signal, never an ad hoc retry.
pub struct PageTraversal<'a, B: Browser> {
    browser: &'a B,
    selectors: &'a SelectorConfig,
    tuning: &'a ScrapeConfig,
    accumulator: ResultAccumulator,
    page: PageState,
    pages_fetched: usize,
}

impl<'a, B: Browser> PageTraversal<'a, B> {
    pub fn new(browser: &'a B, selectors: &'a SelectorConfig, tuning: &'a ScrapeConfig) -> Self {
        Self {
            browser,
            selectors,
            tuning,
            accumulator: ResultAccumulator::new(),
            page: PageState { index: 0, has_more: true },
            pages_fetched: 0,
        }
    }

    /// Run the traversal to completion and hand back everything collected.
    pub async fn run(mut self, url: &str) -> RunReport {
        info!(max_pages = self.tuning.max_pages, "Starting traversal of {}", url);

        if let Err(e) = self.browser.navigate(url).await {
            error!("Initial navigation failed: {}", e);
            return self.finish(RunOutcome::Failed);
        }
        self.settle(self.tuning.initial_settle_ms).await;

        // The banner only blocks the first page; dismissal is best-effort.
        let dismissed = consent::dismiss(
            self.browser,
            &self.selectors.consent,
            Duration::from_secs(self.tuning.consent_wait_secs),
            Duration::from_millis(self.tuning.banner_settle_ms),
        )
        .await;
        debug!(dismissed, "Consent handling finished");

        let mut phase = Phase::Fetching;
        loop {
            phase = match phase {
                Phase::Fetching => self.fetch().await,
                Phase::Extracting => self.extract_page().await,
                Phase::Paginating => self.paginate().await,
                Phase::Done(outcome) => return self.finish(outcome),
            };
        }
    }

    /// Wait for at least one result card to be rendered on the current page.
    async fn fetch(&mut self) -> Phase {
        let timeout = Duration::from_secs(self.tuning.card_wait_secs);

        for candidate in &self.selectors.card.candidates {
            match self.browser.wait_for(candidate, timeout).await {
                Ok(Some(_)) => {
                    self.pages_fetched += 1;
                    self.settle(self.tuning.page_settle_ms).await;
                    return Phase::Extracting;
                }
                Ok(None) => continue,
                Err(e) => {
                    error!("Session fault while waiting for cards: {}", e);
                    return Phase::Done(RunOutcome::Failed);
                }
            }
        }

        warn!(page = self.page.index + 1, "No result cards appeared before the deadline");
        self.page.has_more = false;
        Phase::Done(RunOutcome::Exhausted)
    }

    /// Extract every rendered card, appending valid listings in document order.
    async fn extract_page(&mut self) -> Phase {
        let cards = match self.enumerate_cards().await {
            Ok(cards) => cards,
            Err(phase) => return phase,
        };

        let mut extracted = 0usize;
        for card in &cards {
            if let Some(listing) =
                extract::extract_card(self.browser, card, &self.selectors.fields).await
            {
                self.accumulator.append(listing);
                extracted += 1;
            }
        }

        info!(
            page = self.page.index + 1,
            cards = cards.len(),
            extracted,
            total = self.accumulator.len(),
            "Page extracted"
        );
        Phase::Paginating
    }

    async fn enumerate_cards(&mut self) -> Result<Vec<B::Element>, Phase> {
        for candidate in &self.selectors.card.candidates {
            match self.browser.find_all(candidate).await {
                Ok(cards) if !cards.is_empty() => return Ok(cards),
                Ok(_) => continue,
                Err(e) if e.is_session_fault() => {
                    error!("Session fault while enumerating cards: {}", e);
                    return Err(Phase::Done(RunOutcome::Failed));
                }
                Err(e) => {
                    warn!(selector = %candidate, "Card enumeration failed: {}", e);
                    continue;
                }
            }
        }
        Ok(Vec::new())
    }

    /// Advance to the next page, or end the run.
    async fn paginate(&mut self) -> Phase {
        if self.pages_fetched >= self.tuning.max_pages {
            // The budget is a hard bound: the next-page control is not even
            // probed on the final allowed page.
            info!(pages = self.pages_fetched, "Page budget reached");
            self.page.has_more = false;
            return Phase::Done(RunOutcome::Exhausted);
        }

        let timeout = Duration::from_secs(self.tuning.next_wait_secs);
        for candidate in &self.selectors.next_page.candidates {
            match self.browser.wait_for(candidate, timeout).await {
                Ok(Some(control)) => match self.browser.click(&control).await {
                    Ok(()) => {
                        debug!(selector = %candidate, "Navigated to next page");
                        self.page.index += 1;
                        self.settle(self.tuning.page_settle_ms).await;
                        return Phase::Fetching;
                    }
                    Err(e) if e.is_session_fault() => {
                        error!("Session fault while clicking next-page control: {}", e);
                        return Phase::Done(RunOutcome::Failed);
                    }
                    Err(e) => {
                        warn!(selector = %candidate, "Next-page control refused the click: {}", e);
                        continue;
                    }
                },
                Ok(None) => continue,
                Err(e) if e.is_session_fault() => {
                    error!("Session fault while probing for next-page control: {}", e);
                    return Phase::Done(RunOutcome::Failed);
                }
                Err(e) => {
                    warn!(selector = %candidate, "Next-page probe failed: {}", e);
                    continue;
                }
            }
        }

        info!("No next-page control found");
        self.page.has_more = false;
        Phase::Done(RunOutcome::Exhausted)
    }

    fn finish(self, outcome: RunOutcome) -> RunReport {
        let report = RunReport {
            outcome,
            pages_fetched: self.pages_fetched,
            listings: self.accumulator.into_listings(),
        };
        info!(
            outcome = ?report.outcome,
            pages = report.pages_fetched,
            listings = report.listings.len(),
            "Traversal finished"
        );
        report
    }

    async fn settle(&self, base_ms: u64) {
        if base_ms == 0 {
            return;
        }
        let jitter = if self.tuning.settle_jitter_ms > 0 {
            rand::thread_rng().gen_range(0..=self.tuning.settle_jitter_ms)
        } else {
            0
        };
        tokio::time::sleep(Duration::from_millis(base_ms + jitter)).await;
    }
}
