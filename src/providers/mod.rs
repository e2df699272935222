//! Providers Module - External Data Sources
//!
//! The analysis service is the only network surface.

pub mod analysis_api;

pub use analysis_api::*;
