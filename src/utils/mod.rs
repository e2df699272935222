//! Utils Module - Helper Functions & Shared Utilities

pub mod constants;
pub mod format;

pub use constants::*;
pub use format::*;
