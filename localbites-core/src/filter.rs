//! Case-insensitive substring filter over the cuisine label.

use crate::{Restaurant, ranker::ScoredCandidate};

/// Keeps restaurants whose cuisine contains a needle, ignoring case.
///
/// Matching is a plain substring test so that a short filter such as `mex`
/// selects `Mexican`. It is unrelated to the token matching used for
/// relevance. A missing or blank filter matches everything.
///
/// # Examples
/// ```
/// use localbites_core::{CategoryFilter, Restaurant, lat_lon};
///
/// let taco = Restaurant::new("Taco House", "Mexican", lat_lon(33.65, -117.84)).unwrap();
/// let diner = Restaurant::new("Diner", "American", lat_lon(33.66, -117.85)).unwrap();
///
/// let filter = CategoryFilter::new(Some(" mex "));
/// assert!(filter.matches(&taco));
/// assert!(!filter.matches(&diner));
/// assert!(CategoryFilter::new(None).matches(&diner));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    needle: Option<String>,
}

impl CategoryFilter {
    /// Build a filter from an optional, untrimmed category string.
    #[must_use]
    pub fn new(category: Option<&str>) -> Self {
        let needle = category
            .map(|raw| raw.trim().to_lowercase())
            .filter(|needle| !needle.is_empty());
        Self { needle }
    }

    /// Whether the filter constrains anything.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    /// Return `true` when `restaurant` passes the filter.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| restaurant.cuisine.to_lowercase().contains(needle))
    }

    /// Drop candidates that fail the filter, keeping the original order.
    pub(crate) fn apply<'a>(
        &self,
        mut candidates: Vec<ScoredCandidate<'a>>,
    ) -> Vec<ScoredCandidate<'a>> {
        if self.is_active() {
            candidates.retain(|candidate| self.matches(candidate.restaurant));
        }
        candidates
    }
}
