use crate::config;

/// Replace stalls (or garbage) with a single nominal frame so a long hitch
/// never turns into a physics jump.
pub fn clamp_dt(dt: f64) -> f64 {
    if !dt.is_finite() || dt > config::MAX_DT {
        config::FALLBACK_DT
    } else {
        dt.max(0.0)
    }
}

/// Fixed-cadence tick driver. Times are seconds from any monotonic origin.
/// There is no backlog: a late tick is just a longer (clamped) dt.
#[derive(Debug, Default)]
pub struct FrameClock {
    last_tick: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_tick: None }
    }

    pub fn interval(paused: bool) -> f64 {
        if paused {
            config::PAUSED_TICK_INTERVAL
        } else {
            config::TICK_INTERVAL
        }
    }

    /// Whether the cadence has elapsed since the previous tick.
    pub fn should_tick(&self, now: f64, paused: bool) -> bool {
        match self.last_tick {
            None => true,
            Some(last) => now - last >= Self::interval(paused),
        }
    }

    /// Register a tick at `now` and return the clamped delta time.
    pub fn tick(&mut self, now: f64) -> f64 {
        let dt = match self.last_tick {
            None => config::FALLBACK_DT,
            Some(last) => clamp_dt(now - last),
        };
        self.last_tick = Some(now);
        dt
    }
}
