use std::time::Duration;
use tracing::{debug, info, warn};

use crate::browser::Browser;

use super::selector::SelectorSpec;

/// Dismiss a consent/overlay banner if one is present.
///
/// Candidates are tried in order; the first one that becomes clickable
/// within `per_attempt_timeout` is clicked and the remaining candidates are
/// skipped. A short pause afterwards lets the banner animate out before the
/// caller starts querying cards. The outcome is informational only; callers
/// proceed either way.
pub async fn dismiss<B: Browser>(
    browser: &B,
    spec: &SelectorSpec,
    per_attempt_timeout: Duration,
    settle: Duration,
) -> bool {
    for candidate in &spec.candidates {
        match browser.wait_for(candidate, per_attempt_timeout).await {
            Ok(Some(button)) => match browser.click(&button).await {
                Ok(()) => {
                    info!(selector = %candidate, "Consent banner dismissed");
                    tokio::time::sleep(settle).await;
                    return true;
                }
                Err(e) => {
                    warn!(selector = %candidate, "Could not click consent button: {}", e);
                    return false;
                }
            },
            Ok(None) => continue,
            Err(e) => {
                warn!("Consent probe failed: {}", e);
                return false;
            }
        }
    }

    debug!("No consent banner found");
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::mock::{MockBrowser, MockPage};

    const CANDIDATES: [&str; 3] = [
        "button#onetrust-accept-btn-handler",
        "button[aria-label*='cookie']",
        "button[class*='cookie']",
    ];

    fn spec() -> SelectorSpec {
        SelectorSpec::new(CANDIDATES)
    }

    #[tokio::test]
    async fn second_candidate_matches_one_click_issued() {
        let browser = MockBrowser::new(
            &[],
            vec![MockPage {
                consent: Some("button[aria-label*='cookie']".to_string()),
                ..Default::default()
            }],
        );

        let dismissed = dismiss(&browser, &spec(), Duration::ZERO, Duration::ZERO).await;
        assert!(dismissed);
        assert_eq!(browser.clicks(), vec!["button[aria-label*='cookie']"]);
    }

    #[tokio::test]
    async fn no_banner_returns_false() {
        let browser = MockBrowser::new(&[], vec![MockPage::default()]);

        let dismissed = dismiss(&browser, &spec(), Duration::ZERO, Duration::ZERO).await;
        assert!(!dismissed);
        assert!(browser.clicks().is_empty());
    }
}
