//! # prest — typed PostgREST query parameters
//!
//! > **Stop concatenating filter strings. Type your filters.**
//!
//! prest builds the query-parameter set of a PostgREST request through a
//! fluent, typed API, then hands the finished set to whatever HTTP client
//! executes the request.
//!
//! ## Quick Example
//!
//! ```
//! use prest::prelude::*;
//!
//! let params = Filter::new()
//!     .eq("status", "active")
//!     .gt("age", 21)
//!     .text_search("bio", "climber", "english", TextSearchType::Phrase)
//!     .finish()
//!     .unwrap();
//!
//! assert_eq!(
//!     params.to_query(),
//!     "age=gt.21&bio=phfts(english).climber&status=eq.active"
//! );
//! ```
//!
//! ## Operator vocabulary
//!
//! | Code   | Meaning                    | Builder method      |
//! |--------|----------------------------|---------------------|
//! | `eq`   | equals                     | [`Filter::eq`]      |
//! | `neq`  | not equals                 | [`Filter::neq`]     |
//! | `gt` `gte` `lt` `lte` | comparison  | [`Filter::gt`], …   |
//! | `like` `ilike` | pattern match      | [`Filter::like`], … |
//! | `is`   | null / boolean identity    | [`Filter::is`]      |
//! | `in`   | set membership             | [`Filter::in_vals`] |
//! | `cs` `cd` `ov` | containment, overlap | [`Filter::contains`], … |
//! | `sl` `sr` `nxl` `nxr` `adj` | range position | [`Filter::range_lt`], … |
//! | `fts` `plfts` `phfts` `wfts` | full-text search | [`Filter::text_search`] |
//!
//! Encoding never interrupts a chain: the first invalid token or failed
//! serialization is parked in the builder's error slot and reported once by
//! [`Filter::finish`].

pub mod error;
pub mod filter;
pub mod ops;
pub mod params;
pub mod value;

pub use error::{PrestError, PrestResult};
pub use filter::Filter;
pub use ops::{Operator, SortOrder, TextSearchType};
pub use params::{Params, ToQuery};
pub use value::FilterValue;

pub mod prelude {
    pub use crate::error::{PrestError, PrestResult};
    pub use crate::filter::Filter;
    pub use crate::ops::{Operator, SortOrder, TextSearchType};
    pub use crate::params::{Params, ToQuery};
    pub use crate::value::FilterValue;
}
