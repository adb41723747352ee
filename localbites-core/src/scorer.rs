//! Score restaurants against a tokenized query.
//!
//! The `Scorer` trait assigns an integer relevance score to a
//! [`Restaurant`](crate::Restaurant) given the tokens produced by
//! [`tokenize`](crate::tokenize) for the caller's free-text query.

use crate::{Restaurant, tokenizer::token_set};

/// Points awarded when a query token appears in the restaurant name.
pub const NAME_MATCH_WEIGHT: u32 = 10;

/// Points awarded when a query token appears in the cuisine label.
pub const CATEGORY_MATCH_WEIGHT: u32 = 3;

/// Calculate a relevance score for a restaurant.
///
/// Higher scores indicate a better textual match. Implementations must be
/// thread-safe (`Send` + `Sync`) because rankers score catalog records in
/// parallel. An empty query must score `0`.
///
/// # Examples
///
/// ```rust
/// use localbites_core::{Restaurant, Scorer, lat_lon};
///
/// struct UnitScorer;
///
/// impl Scorer for UnitScorer {
///     fn score(&self, _restaurant: &Restaurant, query: &[String]) -> u32 {
///         u32::from(!query.is_empty())
///     }
/// }
///
/// let diner = Restaurant::new("Diner", "american", lat_lon(0.0, 0.0)).unwrap();
/// assert_eq!(UnitScorer.score(&diner, &[]), 0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `restaurant` according to `query` tokens.
    fn score(&self, restaurant: &Restaurant, query: &[String]) -> u32;
}

/// Presence-based keyword scorer.
///
/// The name and cuisine are reduced to sets of distinct tokens. Each query
/// token, in sequence, earns [`NAME_MATCH_WEIGHT`] when it is in the name set
/// and [`CATEGORY_MATCH_WEIGHT`] when it is in the cuisine set; both can
/// fire for the same token. A token repeated in the query is counted each
/// time it occurs.
///
/// # Examples
///
/// ```rust
/// use localbites_core::{KeywordScorer, Restaurant, Scorer, lat_lon, tokenize};
///
/// let taco = Restaurant::new("Taco House", "mexican", lat_lon(33.65, -117.84)).unwrap();
/// assert_eq!(KeywordScorer.score(&taco, &tokenize("taco")), 10);
/// assert_eq!(KeywordScorer.score(&taco, &tokenize("mexican taco")), 13);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeywordScorer;

impl Scorer for KeywordScorer {
    fn score(&self, restaurant: &Restaurant, query: &[String]) -> u32 {
        if query.is_empty() {
            return 0;
        }
        let name = token_set(&restaurant.name);
        let cuisine = token_set(&restaurant.cuisine);
        query.iter().fold(0_u32, |total, token| {
            let name_points = if name.contains(token) {
                NAME_MATCH_WEIGHT
            } else {
                0
            };
            let cuisine_points = if cuisine.contains(token) {
                CATEGORY_MATCH_WEIGHT
            } else {
                0
            };
            total
                .saturating_add(name_points)
                .saturating_add(cuisine_points)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lat_lon, tokenize};
    use rstest::{fixture, rstest};

    #[fixture]
    fn taco_house() -> Restaurant {
        Restaurant::new("Taco House", "Mexican;Tacos", lat_lon(33.65, -117.84)).expect("valid")
    }

    #[rstest]
    #[case("", 0)]
    #[case("sushi", 0)]
    #[case("taco", NAME_MATCH_WEIGHT)]
    #[case("mexican", CATEGORY_MATCH_WEIGHT)]
    #[case("tacos", CATEGORY_MATCH_WEIGHT)]
    #[case("Taco, house!", 2 * NAME_MATCH_WEIGHT)]
    #[case("taco mexican", NAME_MATCH_WEIGHT + CATEGORY_MATCH_WEIGHT)]
    // Repeated query tokens score again on each occurrence.
    #[case("taco taco", 2 * NAME_MATCH_WEIGHT)]
    fn keyword_scenarios(taco_house: Restaurant, #[case] query: &str, #[case] expected: u32) {
        assert_eq!(KeywordScorer.score(&taco_house, &tokenize(query)), expected);
    }

    #[rstest]
    fn token_in_name_and_cuisine_scores_both() {
        let restaurant =
            Restaurant::new("Pizza Planet", "pizza", lat_lon(0.0, 0.0)).expect("valid");
        let score = KeywordScorer.score(&restaurant, &tokenize("pizza"));
        assert_eq!(score, NAME_MATCH_WEIGHT + CATEGORY_MATCH_WEIGHT);
    }

    #[rstest]
    fn repeated_name_tokens_count_once() {
        let restaurant =
            Restaurant::new("Taco Taco Taco", "", lat_lon(0.0, 0.0)).expect("valid");
        assert_eq!(
            KeywordScorer.score(&restaurant, &tokenize("taco")),
            NAME_MATCH_WEIGHT
        );
    }

    #[rstest]
    fn empty_fields_never_match() {
        let restaurant = Restaurant::new("", "", lat_lon(0.0, 0.0)).expect("valid");
        assert_eq!(KeywordScorer.score(&restaurant, &tokenize("anything")), 0);
    }
}
