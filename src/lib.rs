//! Per-area demographic indicators from census person records.
//!
//! Rows are grouped by an area code (barangay PSGC by default) and combined
//! into counts and ratios. See [`indicators`] for the catalog and [`psgc`]
//! for deriving the grouping key.

pub mod catalog;
pub mod config;
pub mod counter;
pub mod error;
pub mod indicators;
pub mod psgc;
pub mod ratio;
pub mod schema;
pub mod schooling;

#[cfg(feature = "python")]
mod python;

pub use catalog::{compute, compute_all, results_to_frame, Indicator};
pub use config::{CensusColumns, PsgcColumns};
pub use counter::{count_per_area, sum_per_area, AreaCounts};
pub use error::{IndicatorError, Result};
pub use ratio::{IndicatorResult, Ratio};
pub use schema::DEFAULT_PLACES;
