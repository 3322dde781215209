//! Bounce motion for the window front end

use std::f64::consts::PI;

/// Seconds one bounce takes
pub const BOUNCE_SECONDS: f64 = 0.6;
/// Peak horizontal displacement in points
const AMPLITUDE: f64 = 18.0;
const HOPS: f64 = 2.0;

/// A running bounce, sampled against the UI clock every frame
#[derive(Debug, Clone, Copy)]
pub struct BounceMotion {
    started_at: f64,
}

impl BounceMotion {
    pub fn start(now: f64) -> Self {
        Self { started_at: now }
    }

    /// Displacement at `now`, or `None` once the motion has played out.
    pub fn sample(&self, now: f64) -> Option<f32> {
        let progress = (now - self.started_at) / BOUNCE_SECONDS;
        if progress >= 1.0 {
            return None;
        }
        let progress = progress.max(0.0);
        let hop = (progress * HOPS * PI).sin().abs();
        Some((AMPLITUDE * hop * (1.0 - progress)) as f32)
    }
}
