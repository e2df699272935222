//! Presentation Assembler
//!
//! Owns one lifecycle controller and one gauge animator and wires user
//! actions (submit, retry) and request outcomes into them. The view it
//! hands out is always rebuilt from the current state by `build_view`.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use super::gauge::{FrameTicket, GaugeAnimator, GaugeFrame};
use super::lifecycle::{LifecycleController, LifecycleState, RequestTicket};
use super::validation::validate_address;
use super::view::{build_view, ViewContext, ViewModel, ViewOptions};
use crate::models::config::{Chain, ClientConfig};
use crate::models::errors::{AppError, ValidationError};
use crate::models::types::{AnalysisRequest, AnalysisResult};
use crate::providers::analysis_api::AnalysisClient;
use crate::utils::constants::LOADING_MESSAGES;

#[derive(Debug)]
pub struct Presenter {
    lifecycle: LifecycleController,
    gauge: GaugeAnimator,
    frame_ticket: Option<FrameTicket>,
    chain: Chain,
    input_error: Option<ValidationError>,
    loading_since: Option<Instant>,
    loading_interval: Duration,
    options: ViewOptions,
}

impl Presenter {
    pub fn new(config: &ClientConfig, options: ViewOptions) -> Self {
        Self {
            lifecycle: LifecycleController::new(),
            gauge: GaugeAnimator::new(config.gauge_duration),
            frame_ticket: None,
            chain: Chain::default(),
            input_error: None,
            loading_since: None,
            loading_interval: config.loading_message_interval,
            options,
        }
    }

    /// Validate the raw input and, if it passes, start a request.
    ///
    /// On a validation failure the message is kept for inline display and
    /// the lifecycle is left exactly as it was.
    pub fn submit(&mut self, chain: Chain, raw_input: &str, now: Instant) -> Result<RequestTicket, ValidationError> {
        let address = match validate_address(raw_input.trim()) {
            Ok(address) => address,
            Err(err) => {
                debug!("input rejected: {}", err);
                self.input_error = Some(err);
                return Err(err);
            }
        };

        self.input_error = None;
        self.chain = chain;
        self.stop_gauge();
        self.loading_since = Some(now);
        Ok(self.lifecycle.submit(AnalysisRequest { chain, address }))
    }

    /// Apply a request outcome. A fresh success starts the gauge from 0.
    /// Returns `false` when the outcome was stale and ignored.
    pub fn complete(&mut self, ticket: &RequestTicket, outcome: Result<AnalysisResult, AppError>, now: Instant) -> bool {
        if !self.lifecycle.resolve(ticket, outcome) {
            return false;
        }

        self.loading_since = None;
        if let Some(score) = self.lifecycle.data().map(|d| d.score.risk_score) {
            self.frame_ticket = Some(self.gauge.start(score, now));
        }
        true
    }

    /// Validate, fetch and apply in one go
    pub async fn analyze(&mut self, client: &AnalysisClient, chain: Chain, raw_input: &str) -> Result<bool, ValidationError> {
        let ticket = self.submit(chain, raw_input, Instant::now())?;
        let outcome = client.analyze(ticket.request()).await;
        Ok(self.complete(&ticket, outcome, Instant::now()))
    }

    /// "Try Again": back to the empty state, any in-flight response and
    /// running animation discarded
    pub fn reset(&mut self) {
        self.lifecycle.reset();
        self.stop_gauge();
        self.loading_since = None;
        self.input_error = None;
    }

    /// Advance the gauge to `now`. `None` once there is nothing to draw.
    pub fn tick(&mut self, now: Instant) -> Option<GaugeFrame> {
        let ticket = self.frame_ticket?;
        let frame = self.gauge.sample(ticket, now);
        if frame.map_or(true, |f| f.done) {
            self.frame_ticket = None;
        }
        frame
    }

    /// Jump the running animation to its final value
    pub fn finish_animation(&mut self) -> Option<GaugeFrame> {
        let end = self.gauge.state()?.started_at + self.gauge.duration();
        self.tick(end)
    }

    pub fn animating(&self) -> bool {
        self.frame_ticket.is_some()
    }

    /// Position in the loading message rotation
    pub fn loading_step(&self, now: Instant) -> usize {
        let Some(since) = self.loading_since else {
            return 0;
        };
        let interval = self.loading_interval.as_millis().max(1);
        let elapsed = now.saturating_duration_since(since).as_millis();
        ((elapsed / interval) as usize) % LOADING_MESSAGES.len()
    }

    pub fn view(&self, now: Instant) -> ViewModel {
        let ctx = ViewContext {
            chain: self.chain,
            loading_step: self.loading_step(now),
            input_error: self.input_error.map(|e| e.message()),
            options: self.options,
        };
        build_view(self.lifecycle.state(), self.gauge.state(), &ctx)
    }

    pub fn state(&self) -> &LifecycleState {
        self.lifecycle.state()
    }

    pub fn lifecycle(&self) -> &LifecycleController {
        &self.lifecycle
    }

    pub fn input_error(&self) -> Option<ValidationError> {
        self.input_error
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn displayed_score(&self) -> u8 {
        self.gauge.displayed()
    }

    fn stop_gauge(&mut self) {
        self.gauge.cancel();
        self.frame_ticket = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::ViewBody;
    use crate::models::types::{AdminInfo, LinksInfo, ScoreInfo, ScoreLabel, TokenInfo};

    const ADDR: &str = "0x6982508145454Ce325dDbE47a25d4ec3d2311933";

    fn config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            request_timeout: Duration::from_secs(5),
            gauge_duration: Duration::from_millis(1200),
            frame_interval: Duration::from_millis(16),
            loading_message_interval: Duration::from_millis(2000),
        }
    }

    fn result(score: u8) -> AnalysisResult {
        AnalysisResult {
            token: TokenInfo {
                address: ADDR.to_string(),
                name: "Pepe".to_string(),
                symbol: "PEPE".to_string(),
                decimals: 18,
                total_supply: None,
                age_days: None,
                verified: None,
            },
            market: None,
            holders: None,
            admin: AdminInfo::default(),
            trade_risk: None,
            score: ScoreInfo {
                risk_score: score,
                label: ScoreLabel::Medium,
                reasons: vec![],
            },
            links: LinksInfo::default(),
        }
    }

    #[test]
    fn test_invalid_input_keeps_state() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Base, ADDR, t0).unwrap();
        p.complete(&ticket, Ok(result(40)), t0);

        assert_eq!(p.submit(Chain::Base, "  ", t0), Err(ValidationError::EmptyAddress));
        assert_eq!(p.submit(Chain::Base, "0x123", t0), Err(ValidationError::MalformedAddress));

        // still showing the previous report, error shown inline
        assert!(p.lifecycle().data().is_some());
        let view = p.view(t0);
        assert!(matches!(view.body, ViewBody::Report(_)));
        assert_eq!(
            view.input_error.as_deref(),
            Some("Invalid address: must be 0x followed by 40 hex characters")
        );
    }

    #[test]
    fn test_input_trimmed_before_submit() {
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Arbitrum, &format!("  {}\n", ADDR), Instant::now()).unwrap();
        assert_eq!(ticket.request().address, ADDR);
        assert_eq!(ticket.request().chain, Chain::Arbitrum);
        assert!(p.input_error().is_none());
    }

    #[test]
    fn test_success_starts_gauge_from_zero() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        assert!(p.complete(&ticket, Ok(result(64)), t0));
        assert!(p.animating());
        assert_eq!(p.displayed_score(), 0);

        let mid = p.tick(t0 + Duration::from_millis(400)).unwrap();
        assert!(mid.displayed > 0 && mid.displayed < 64);

        let last = p.tick(t0 + Duration::from_millis(1200)).unwrap();
        assert!(last.done);
        assert_eq!(last.displayed, 64);
        assert!(!p.animating());
        assert!(p.tick(t0 + Duration::from_millis(1300)).is_none());
    }

    #[test]
    fn test_finish_animation() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        p.complete(&ticket, Ok(result(91)), t0);
        let frame = p.finish_animation().unwrap();
        assert_eq!(frame.displayed, 91);
        assert!(frame.done);
    }

    #[test]
    fn test_resubmit_cancels_animation() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let t1 = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        p.complete(&t1, Ok(result(80)), t0);
        p.tick(t0 + Duration::from_millis(300));

        let t2 = p.submit(Chain::Ethereum, ADDR, t0 + Duration::from_millis(400)).unwrap();
        assert!(!p.animating());
        assert!(p.tick(t0 + Duration::from_millis(500)).is_none());

        p.complete(&t2, Ok(result(20)), t0 + Duration::from_millis(600));
        assert_eq!(p.displayed_score(), 0);
    }

    #[test]
    fn test_reset_discards_late_response() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        p.reset();
        assert!(!p.complete(&ticket, Ok(result(70)), t0));
        assert_eq!(p.state(), &LifecycleState::Idle);
        assert!(matches!(p.view(t0).body, ViewBody::Empty { .. }));
        assert!(!p.animating());
    }

    #[test]
    fn test_error_then_retry() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        let ticket = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        p.complete(&ticket, Err(AppError::request_rejected(429, "rate limited")), t0);
        match p.view(t0).body {
            ViewBody::Failed(e) => assert_eq!(e.message, "rate limited"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!p.animating());

        p.reset();
        assert_eq!(p.state(), &LifecycleState::Idle);
    }

    #[test]
    fn test_ticker_discarded_on_complete_and_reset() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(4100);
        let mut p = Presenter::new(&config(), ViewOptions::default());

        let ticket = p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        assert_eq!(p.loading_step(later), 2);
        p.complete(&ticket, Ok(result(10)), t0 + Duration::from_millis(100));
        assert_eq!(p.loading_step(later), 0);

        p.submit(Chain::Ethereum, ADDR, t0).unwrap();
        p.reset();
        assert_eq!(p.loading_step(later), 0);

        // a fresh submission restarts the rotation from its own start
        p.submit(Chain::Ethereum, ADDR, later).unwrap();
        assert_eq!(p.loading_step(later), 0);
        assert_eq!(p.loading_step(later + Duration::from_millis(2000)), 1);
    }

    #[test]
    fn test_loading_message_rotation() {
        let t0 = Instant::now();
        let mut p = Presenter::new(&config(), ViewOptions::default());
        assert_eq!(p.loading_step(t0), 0);
        p.submit(Chain::Ethereum, ADDR, t0).unwrap();

        assert_eq!(p.loading_step(t0 + Duration::from_millis(1999)), 0);
        assert_eq!(p.loading_step(t0 + Duration::from_millis(2000)), 1);
        assert_eq!(p.loading_step(t0 + Duration::from_millis(9000)), 4);
        assert_eq!(p.loading_step(t0 + Duration::from_millis(10_000)), 0);

        match p.view(t0 + Duration::from_millis(4100)).body {
            ViewBody::Loading(l) => assert_eq!(l.message, "Analyzing security signals..."),
            other => panic!("unexpected {:?}", other),
        }
    }
}
