use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod accumulator;
pub mod consent;
pub mod extract;
pub mod normalize;
pub mod selector;
pub mod traversal;

/// One extracted listing record.
///
/// A listing is retained only when `name` is non-empty after trimming; every
/// other field degrades to an empty string or `0.0` when its selector chain
/// resolves nothing, and never causes rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub location: String,
    pub review_count: String,
    pub distance: String,
    pub captured_at: DateTime<Utc>,
}

impl Listing {
    /// Column names for tabular export, in field order.
    pub const COLUMNS: [&'static str; 7] = [
        "name",
        "price",
        "rating",
        "location",
        "review_count",
        "distance",
        "captured_at",
    ];
}
