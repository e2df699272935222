//! Models Module - Data Structures & Configuration
//!
//! Wire types, chain catalogue, client settings and the error taxonomy.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
