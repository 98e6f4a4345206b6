//! Core records model shared by every target

pub mod activity;
pub mod error;
pub mod models;
pub mod query;
pub mod registry;
pub mod report;
pub mod seed;

pub use error::{RecordsError, RecordsResult};
pub use registry::Registry;

/// Returns the current version of the `NuRecords` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
