//! Trait definitions for Bugsnag operations.
//!
//! Listing and filter matching are defined here once; entity types
//! supply their own endpoint paths and default parameters.

mod list;
mod resolve;

pub use list::{List, DEFAULT_PAGE_SIZE};
pub use resolve::{select_by_filter, Resolve};
