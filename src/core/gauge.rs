//! Gauge Animator
//!
//! Advances the displayed score from 0 to the target over a fixed duration
//! using a cubic ease-out. Each animation is keyed by a generation number;
//! starting a new one (or cancelling) invalidates every frame ticket handed
//! out before, so two interpolations can never write the same display.

use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Fraction of the animation elapsed, in [0, 1]
pub fn progress(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
}

/// `round((1 - (1 - p)^3) * target)`
pub fn eased_score(target: u8, elapsed: Duration, duration: Duration) -> u8 {
    let p = progress(elapsed, duration);
    let eased = 1.0 - (1.0 - p).powi(3);
    (eased * f64::from(target)).round().clamp(0.0, f64::from(target)) as u8
}

/// Permission to sample one generation of the animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    generation: u64,
}

/// Live animation state
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeState {
    pub target_score: u8,
    pub displayed_score: u8,
    pub started_at: Instant,
    pub in_progress: bool,
}

/// One sampled frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeFrame {
    pub displayed: u8,
    /// Last frame of this animation; schedule no more
    pub done: bool,
}

#[derive(Debug)]
pub struct GaugeAnimator {
    duration: Duration,
    generation: u64,
    state: Option<GaugeState>,
}

impl GaugeAnimator {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            generation: 0,
            state: None,
        }
    }

    /// Begin a new animation from 0. Any earlier ticket becomes stale.
    pub fn start(&mut self, target: u8, now: Instant) -> FrameTicket {
        self.generation += 1;
        let target = target.min(100);
        self.state = Some(GaugeState {
            target_score: target,
            displayed_score: 0,
            started_at: now,
            in_progress: true,
        });
        debug!("🎯 gauge gen {} → target {}", self.generation, target);
        FrameTicket {
            generation: self.generation,
        }
    }

    /// Sample the animation at `now`.
    ///
    /// Returns `None` for a stale ticket or once the final frame has been
    /// delivered.
    pub fn sample(&mut self, ticket: FrameTicket, now: Instant) -> Option<GaugeFrame> {
        if !self.is_current(ticket) {
            debug!("gauge frame from gen {} dropped", ticket.generation);
            return None;
        }

        let duration = self.duration;
        let state = self.state.as_mut()?;
        if !state.in_progress {
            return None;
        }

        let elapsed = now.saturating_duration_since(state.started_at);
        state.displayed_score = eased_score(state.target_score, elapsed, duration);
        let done = progress(elapsed, duration) >= 1.0;
        if done {
            state.in_progress = false;
        }

        Some(GaugeFrame {
            displayed: state.displayed_score,
            done,
        })
    }

    /// Drop the current animation and invalidate its tickets
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.state = None;
    }

    pub fn is_current(&self, ticket: FrameTicket) -> bool {
        ticket.generation == self.generation && self.state.is_some()
    }

    pub fn state(&self) -> Option<&GaugeState> {
        self.state.as_ref()
    }

    /// Currently displayed value (0 without an animation)
    pub fn displayed(&self) -> u8 {
        self.state.as_ref().map_or(0, |s| s.displayed_score)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }
}
