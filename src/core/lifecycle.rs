//! Request Lifecycle Controller
//!
//! Single-request state machine: `Idle → Loading → Success | Error`, with
//! `reset` back to `Idle` and re-entrant `submit`. Every submission gets a
//! generation-stamped ticket; a resolution carrying an older ticket (the
//! request was superseded or reset) is discarded.

use tracing::{info, warn};

use crate::models::errors::AppError;
use crate::models::types::{AnalysisRequest, AnalysisResult};

/// Exactly one of four states; illegal mixes (loading + error) cannot exist
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    Success(Box<AnalysisResult>),
    Error(String),
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "Idle",
            LifecycleState::Loading => "Loading",
            LifecycleState::Success(_) => "Success",
            LifecycleState::Error(_) => "Error",
        }
    }
}

/// Handle for one submitted request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    request: AnalysisRequest,
}

impl RequestTicket {
    /// Payload to send to the analysis service
    pub fn request(&self) -> &AnalysisRequest {
        &self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Default)]
pub struct LifecycleController {
    state: LifecycleState,
    generation: u64,
}

impl LifecycleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Loading` for a validated request, discarding any previous
    /// result or error immediately. Accepted from every state.
    pub fn submit(&mut self, request: AnalysisRequest) -> RequestTicket {
        self.generation += 1;
        info!(
            "🔍 analysis #{} submitted: {} on {}",
            self.generation, request.address, request.chain
        );
        self.state = LifecycleState::Loading;
        RequestTicket {
            generation: self.generation,
            request,
        }
    }

    /// Apply the outcome of a request. Returns `false` (state untouched)
    /// when the ticket is no longer the active one.
    pub fn resolve(&mut self, ticket: &RequestTicket, outcome: Result<AnalysisResult, AppError>) -> bool {
        if !self.is_current(ticket) {
            warn!(
                "⏭️ discarding stale response #{} (current #{}, state {})",
                ticket.generation,
                self.generation,
                self.state.name()
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    "✅ analysis #{} done: score {} ({})",
                    ticket.generation,
                    result.score.risk_score,
                    result.score.label.as_str()
                );
                LifecycleState::Success(Box::new(result))
            }
            Err(err) => {
                warn!("❌ analysis #{} failed: {}", ticket.generation, err);
                LifecycleState::Error(err.user_message().to_string())
            }
        };
        true
    }

    /// Back to `Idle`. Never touches the network; an in-flight response
    /// arriving later is discarded.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = LifecycleState::Idle;
    }

    /// Ticket belongs to the request currently loading
    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation && self.loading()
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    // `{data, loading, error}` view of the state

    pub fn data(&self) -> Option<&AnalysisResult> {
        match &self.state {
            LifecycleState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self.state, LifecycleState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LifecycleState::Error(message) => Some(message),
            _ => None,
        }
    }
}
