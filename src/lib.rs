//! RugCheck Library
//!
//! Client side of a token rug-pull risk check:
//! - Address validation before any request is issued
//! - A single-request lifecycle (`Idle → Loading → Success | Error`)
//!   guarded against stale responses
//! - Threshold rules turning raw security signals into colored indicators
//!   and panel emphasis
//! - An eased score gauge animation
//! - Formatting of raw values and assembly of a renderable view
//!
//! Scoring itself happens in the remote analysis service.

pub mod core;
pub mod display;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{
    build_view, validate_address, GaugeAnimator, LifecycleController, LifecycleState, Presenter,
    RequestTicket, ViewModel, ViewOptions,
};
pub use models::{
    AnalysisRequest, AnalysisResult, AppError, AppResult, Chain, ClientConfig, ErrorCode,
    ValidationError,
};
pub use providers::AnalysisClient;
