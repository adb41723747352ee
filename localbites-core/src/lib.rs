//! Core ranking engine for LocalBites.
//!
//! Given a catalog of [`Restaurant`] records and a [`RankRequest`], the
//! [`Ranker`] measures the geodesic distance to every record, scores it
//! against the tokenized query, applies the optional cuisine filter and
//! returns at most [`MAX_RESULTS`] entries.
//!
//! The crate performs no I/O. Loading catalogs, logging events and
//! presenting results live in `localbites-data` and `localbites-cli`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod error;
mod filter;
mod ranker;
mod restaurant;
mod scorer;
mod tokenizer;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::{METRES_PER_MILE, distance_miles, lat_lon, validate_coord};
pub use error::CoordinateError;
pub use filter::CategoryFilter;
pub use ranker::{MAX_RESULTS, RankError, RankRequest, RankedRestaurant, Ranker, SortPolicy, rank};
pub use restaurant::{Restaurant, RestaurantDetails};
pub use scorer::{CATEGORY_MATCH_WEIGHT, KeywordScorer, NAME_MATCH_WEIGHT, Scorer};
pub use tokenizer::{tokenize, tokenize_optional};
