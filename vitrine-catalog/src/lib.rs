//! Listing records and the pipeline that turns a source list into what a
//! screen shows: search, quick filter, advanced filter, sort.

pub mod error;
pub mod filter;
pub mod models;
pub mod paging;
pub mod pipeline;
pub mod selection;
pub mod sort;
pub mod votes;

pub use error::CatalogError;
pub use filter::*;
pub use models::*;
pub use paging::LoadMore;
pub use pipeline::{run_pipeline, ListState, Listing};
pub use selection::Selection;
pub use sort::SortKey;
pub use votes::{ReviewVotes, Vote};
