//! Contributor statistics per UTC offset: loading, neighborhood aggregation,
//! diversity filtering and ranked tables.
//!
//! The stores are loaded once and never mutated; every report is rebuilt
//! from them for each request.

pub mod diversity;
pub mod neighborhood;
pub mod recommend;
pub mod store;
pub mod table;
