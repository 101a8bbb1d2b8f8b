use super::Listing;

/// Ordered collection of every listing produced during a run.
///
/// Insertion order is extraction order across pages; duplicates are kept
/// as-is. The snapshot is safe to take at any point, including after a
/// failed traversal, which is how partial results survive a dead session.
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    listings: Vec<Listing>,
}

impl ResultAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, listing: Listing) {
        self.listings.push(listing);
    }

    pub fn snapshot(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn into_listings(self) -> Vec<Listing> {
        self.listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(name: &str) -> Listing {
        Listing {
            name: name.to_string(),
            price: 0.0,
            rating: 0.0,
            location: String::new(),
            review_count: String::new(),
            distance: String::new(),
            captured_at: Utc::now(),
        }
    }

    #[test]
    fn preserves_insertion_order_and_duplicates() {
        let mut acc = ResultAccumulator::new();
        acc.append(listing("a"));
        acc.append(listing("b"));
        acc.append(listing("a"));

        let names: Vec<_> = acc.snapshot().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(acc.len(), 3);
    }
}
