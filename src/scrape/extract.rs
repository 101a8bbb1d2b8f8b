use chrono::Utc;
use tracing::{debug, warn};

use crate::browser::{Browser, BrowserError};
use crate::config::FieldSelectors;

use super::normalize::{parse_price, parse_rating};
use super::selector::resolve;
use super::Listing;

/// Build one listing from one result card.
///
/// The six fields resolve independently; a field whose chain matches nothing
/// degrades to its default and never drags the others down. The only
/// rejection criterion is an empty name. Any browser fault while working on
/// the card is caught here and turns into `None` with a warning, so one
/// malformed card cannot stop page-level extraction.
pub async fn extract_card<B: Browser>(
    browser: &B,
    card: &B::Element,
    fields: &FieldSelectors,
) -> Option<Listing> {
    match build_listing(browser, card, fields).await {
        Ok(listing) => listing,
        Err(e) => {
            warn!("Card skipped after extraction fault: {}", e);
            None
        }
    }
}

async fn build_listing<B: Browser>(
    browser: &B,
    card: &B::Element,
    fields: &FieldSelectors,
) -> Result<Option<Listing>, BrowserError> {
    let name = resolve(browser, card, &fields.name).await?;
    if name.is_empty() {
        debug!("Card without a name, dropped");
        return Ok(None);
    }

    let price_text = resolve(browser, card, &fields.price).await?;
    let rating_text = resolve(browser, card, &fields.rating).await?;
    let location = resolve(browser, card, &fields.location).await?;
    let review_count = resolve(browser, card, &fields.review_count).await?;
    let distance = resolve(browser, card, &fields.distance).await?;

    Ok(Some(Listing {
        name,
        price: parse_price(&price_text),
        rating: parse_rating(&rating_text),
        location,
        review_count,
        distance,
        captured_at: Utc::now(),
    }))
}
