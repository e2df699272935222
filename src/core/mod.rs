//! Core Module - Client Logic
//!
//! Validation, the request state machine, risk derivation, the gauge
//! animation and view assembly. Nothing here touches the terminal.

pub mod gauge;
pub mod lifecycle;
pub mod presenter;
pub mod risk_rules;
pub mod validation;
pub mod view;

pub use gauge::*;
pub use lifecycle::*;
pub use presenter::*;
pub use risk_rules::*;
pub use validation::*;
pub use view::*;
