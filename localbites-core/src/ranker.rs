//! Rank a catalog against a position, a cuisine filter and a query.
//!
//! Ranking is pure: it borrows the catalog, never mutates it, and returns
//! a fresh list of at most [`MAX_RESULTS`] entries.

use geo::Coord;
use rayon::prelude::*;
use thiserror::Error;

use crate::{
    CategoryFilter, CoordinateError, KeywordScorer, Restaurant, Scorer, distance_miles, lat_lon,
    tokenize_optional, validate_coord,
};

/// Upper bound on the number of ranked entries returned.
pub const MAX_RESULTS: usize = 15;

/// Parameters for a single ranking.
///
/// # Examples
/// ```rust
/// use localbites_core::RankRequest;
///
/// let request = RankRequest::new(33.649, -117.846)
///     .with_cuisine("mex")
///     .with_query("tacos");
/// assert_eq!(request.origin.y, 33.649);
/// assert_eq!(request.query.as_deref(), Some("tacos"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankRequest {
    /// Where the user is.
    pub origin: Coord<f64>,
    /// Optional cuisine substring filter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cuisine: Option<String>,
    /// Optional free-text query.
    #[cfg_attr(feature = "serde", serde(default))]
    pub query: Option<String>,
}

impl RankRequest {
    /// Request ranking around a latitude and longitude with no filter or query.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            origin: lat_lon(latitude, longitude),
            cuisine: None,
            query: None,
        }
    }

    /// Restrict results to cuisines containing `cuisine`.
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Order results by relevance to `query`.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// One entry of a ranking: the restaurant and its full-precision distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedRestaurant<'a> {
    /// Catalog record, borrowed from the caller.
    pub restaurant: &'a Restaurant,
    /// Geodesic distance from the request origin, in miles.
    pub distance_miles: f64,
}

/// Per-record working state of a single ranking.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScoredCandidate<'a> {
    pub(crate) restaurant: &'a Restaurant,
    pub(crate) distance_miles: f64,
    pub(crate) score: u32,
}

impl<'a> ScoredCandidate<'a> {
    pub(crate) const fn new(restaurant: &'a Restaurant, distance_miles: f64, score: u32) -> Self {
        Self {
            restaurant,
            distance_miles,
            score,
        }
    }

    const fn into_ranked(self) -> RankedRestaurant<'a> {
        RankedRestaurant {
            restaurant: self.restaurant,
            distance_miles: self.distance_miles,
        }
    }
}

/// How candidates are ordered before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortPolicy {
    /// Nearest first. Used when the query has no tokens.
    Distance,
    /// Highest score first, nearest first among equal scores.
    RelevanceThenDistance,
}

impl SortPolicy {
    /// Pick the policy for a tokenized query.
    #[must_use]
    pub const fn for_query(tokens: &[String]) -> Self {
        if tokens.is_empty() {
            Self::Distance
        } else {
            Self::RelevanceThenDistance
        }
    }

    /// Stable sort, so exact ties keep catalog order.
    pub(crate) fn sort(self, candidates: &mut [ScoredCandidate<'_>]) {
        match self {
            Self::Distance => {
                candidates.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
            }
            Self::RelevanceThenDistance => candidates.sort_by(|a, b| {
                b.score
                    .cmp(&a.score)
                    .then_with(|| a.distance_miles.total_cmp(&b.distance_miles))
            }),
        }
    }
}

/// Errors returned by [`Ranker::rank`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankError {
    /// The request origin is outside the WGS84 domain.
    #[error("invalid request origin: {0}")]
    InvalidOrigin(#[source] CoordinateError),
    /// A catalog record carries an invalid location.
    #[error("catalog record {index} ({name:?}) has an invalid location: {source}")]
    InvalidRecord {
        /// Position of the record in the catalog slice.
        index: usize,
        /// Name of the offending record.
        name: String,
        /// The coordinate failure.
        #[source]
        source: CoordinateError,
    },
}

/// Combines distance, relevance and the cuisine filter into a shortlist.
///
/// # Examples
/// ```rust
/// use localbites_core::{RankRequest, Ranker, Restaurant, lat_lon};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = vec![
///     Restaurant::new("Taco House", "Mexican", lat_lon(33.65, -117.84))?,
///     Restaurant::new("Sushi Place", "Japanese", lat_lon(33.70, -117.90))?,
/// ];
/// let request = RankRequest::new(33.649, -117.846).with_query("sushi");
/// let ranked = Ranker::new().rank(&catalog, &request)?;
/// assert_eq!(ranked[0].restaurant.name, "Sushi Place");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ranker<S = KeywordScorer> {
    scorer: S,
}

impl Ranker {
    /// Ranker using [`KeywordScorer`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scorer: KeywordScorer,
        }
    }
}

impl<S: Scorer> Ranker<S> {
    /// Ranker using a custom relevance scorer.
    #[must_use]
    pub const fn with_scorer(scorer: S) -> Self {
        Self { scorer }
    }

    /// Rank `catalog` for `request`.
    ///
    /// Every record is measured and scored before the cuisine filter runs.
    /// With query tokens the survivors are ordered by descending score then
    /// ascending distance; without, by distance alone. The list is cut to
    /// [`MAX_RESULTS`]. An empty list is a valid outcome.
    ///
    /// # Errors
    /// Returns [`RankError::InvalidOrigin`] for a bad request origin and
    /// [`RankError::InvalidRecord`] when any catalog record has an invalid
    /// location. No partial ranking is produced.
    pub fn rank<'a>(
        &self,
        catalog: &'a [Restaurant],
        request: &RankRequest,
    ) -> Result<Vec<RankedRestaurant<'a>>, RankError> {
        let origin = validate_coord(request.origin).map_err(RankError::InvalidOrigin)?;
        let tokens = tokenize_optional(request.query.as_deref());

        let scored = self.score_catalog(catalog, origin, &tokens)?;
        let mut candidates = CategoryFilter::new(request.cuisine.as_deref()).apply(scored);
        let policy = SortPolicy::for_query(&tokens);
        policy.sort(&mut candidates);
        candidates.truncate(MAX_RESULTS);

        log::debug!(
            "ranked {} of {} restaurants using {policy:?}",
            candidates.len(),
            catalog.len()
        );
        Ok(candidates
            .into_iter()
            .map(ScoredCandidate::into_ranked)
            .collect())
    }

    fn score_catalog<'a>(
        &self,
        catalog: &'a [Restaurant],
        origin: Coord<f64>,
        tokens: &[String],
    ) -> Result<Vec<ScoredCandidate<'a>>, RankError> {
        catalog
            .par_iter()
            .enumerate()
            .map(|(index, restaurant)| {
                let distance = distance_miles(origin, restaurant.location).map_err(|source| {
                    RankError::InvalidRecord {
                        index,
                        name: restaurant.name.clone(),
                        source,
                    }
                })?;
                let score = self.scorer.score(restaurant, tokens);
                Ok(ScoredCandidate::new(restaurant, distance, score))
            })
            .collect()
    }
}

/// Rank `catalog` with the default [`Ranker`].
///
/// # Errors
/// See [`Ranker::rank`].
pub fn rank<'a>(
    catalog: &'a [Restaurant],
    request: &RankRequest,
) -> Result<Vec<RankedRestaurant<'a>>, RankError> {
    Ranker::new().rank(catalog, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{catalog_around, restaurant};
    use rstest::rstest;

    fn names<'a>(ranked: &[RankedRestaurant<'a>]) -> Vec<&'a str> {
        ranked.iter().map(|r| r.restaurant.name.as_str()).collect()
    }

    #[rstest]
    #[case(&[], SortPolicy::Distance)]
    #[case(&["taco".to_owned()], SortPolicy::RelevanceThenDistance)]
    fn policy_depends_on_tokens(#[case] tokens: &[String], #[case] expected: SortPolicy) {
        assert_eq!(SortPolicy::for_query(tokens), expected);
    }

    #[rstest]
    fn relevance_sort_breaks_ties_by_distance() {
        let near = restaurant("Near", "", 0.0, 0.0);
        let far = restaurant("Far", "", 0.0, 0.0);
        let best = restaurant("Best", "", 0.0, 0.0);
        let mut candidates = vec![
            ScoredCandidate::new(&far, 5.0, 10),
            ScoredCandidate::new(&best, 9.0, 13),
            ScoredCandidate::new(&near, 1.0, 10),
        ];
        SortPolicy::RelevanceThenDistance.sort(&mut candidates);
        let order: Vec<_> = candidates.iter().map(|c| c.restaurant.name.as_str()).collect();
        assert_eq!(order, ["Best", "Near", "Far"]);
    }

    #[rstest]
    fn distance_sort_ignores_scores() {
        let a = restaurant("A", "", 0.0, 0.0);
        let b = restaurant("B", "", 0.0, 0.0);
        let mut candidates = vec![
            ScoredCandidate::new(&a, 2.0, 100),
            ScoredCandidate::new(&b, 1.0, 0),
        ];
        SortPolicy::Distance.sort(&mut candidates);
        assert_eq!(candidates[0].restaurant.name, "B");
    }

    #[rstest]
    fn truncates_to_max_results() {
        let origin = lat_lon(33.649, -117.846);
        let catalog = catalog_around(origin, 20);
        let request = RankRequest::new(origin.y, origin.x);
        let ranked = rank(&catalog, &request).expect("valid catalog");
        assert_eq!(ranked.len(), MAX_RESULTS);
        assert!(
            ranked
                .windows(2)
                .all(|pair| pair[0].distance_miles <= pair[1].distance_miles)
        );
    }

    #[rstest]
    fn blank_query_sorts_by_distance() {
        let catalog = vec![
            restaurant("Far Taco", "Mexican", 34.0, -117.846),
            restaurant("Near Diner", "American", 33.65, -117.846),
        ];
        let request = RankRequest::new(33.649, -117.846).with_query(" ?! ");
        let ranked = rank(&catalog, &request).expect("valid catalog");
        assert_eq!(names(&ranked), ["Near Diner", "Far Taco"]);
    }

    #[rstest]
    fn rejects_invalid_origin() {
        let catalog = vec![restaurant("Diner", "American", 0.0, 0.0)];
        let err = rank(&catalog, &RankRequest::new(95.0, 0.0)).expect_err("bad origin");
        assert_eq!(
            err,
            RankError::InvalidOrigin(CoordinateError::InvalidLatitude { latitude: 95.0 })
        );
    }

    #[rstest]
    fn rejects_invalid_record_even_when_filtered_out() {
        let catalog = vec![
            restaurant("Diner", "American", 0.0, 0.0),
            restaurant("Broken", "Thai", 0.0, 999.0),
        ];
        let request = RankRequest::new(0.0, 0.0).with_cuisine("american");
        let err = rank(&catalog, &request).expect_err("bad record");
        assert!(matches!(
            err,
            RankError::InvalidRecord { index: 1, ref name, .. } if name == "Broken"
        ));
    }

    #[rstest]
    fn empty_catalog_yields_empty_ranking() {
        let ranked = rank(&[], &RankRequest::new(0.0, 0.0).with_query("x")).expect("valid");
        assert!(ranked.is_empty());
    }

    #[rstest]
    fn distances_are_not_rounded() {
        let catalog = vec![restaurant("Taco House", "Mexican", 33.65, -117.84)];
        let ranked = rank(&catalog, &RankRequest::new(33.649, -117.846)).expect("valid");
        let expected =
            distance_miles(lat_lon(33.649, -117.846), lat_lon(33.65, -117.84)).expect("valid");
        assert_eq!(ranked[0].distance_miles, expected);
    }
}
