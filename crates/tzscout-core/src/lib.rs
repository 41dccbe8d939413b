//! Shared types for tzscout.
//!
//! - [`ScoutError`]: the error type returned by every tzscout crate
//! - [`ScoutConfig`]: settings read from `.tzscout.toml`
//! - [`OffsetKey`] and its `UTC±H:MM` display form
//! - [`BucketKey`], [`GenderTag`] and [`OutputFormat`]

mod config;
mod error;
mod offset;
mod types;

pub use config::{
    DataConfig, GeolocationConfig, RecommendConfig, ScoutConfig, MAX_RECOMMENDATIONS,
    MAX_WINDOW_HOURS, MIN_RECOMMENDATIONS,
};
pub use error::ScoutError;
pub use offset::{format_offset_display, parse_offset_display, OffsetKey};
pub use types::{BucketKey, GenderTag, OutputFormat, GLOBAL_BUCKET_KEY};
