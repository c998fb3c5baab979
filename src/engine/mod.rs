//! Filter/Sort/Paginate Engine
//!
//! Pure functions turning the geocoded dataset snapshot and a structured
//! query into a page of results. All filters are AND-composed; a later filter
//! only ever narrows the candidate set.

mod filter;
mod query;


pub use filter::{run_listing, run_map, PageResult};
pub use query::{ListingQuery, SortOrder, UNBOUNDED};
