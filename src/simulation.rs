use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::clock;
use crate::config;
use crate::day_night::{DayNightMode, HourSource};
use crate::flash::CollisionFlash;
use crate::motion::{CollisionEvent, MotionSimulator};
use crate::settings::Settings;
use crate::trail::TrailBuffer;
use crate::viewport::{self, Viewport};

/// The whole idle-screen core. The shell drives it through the command
/// methods and `tick`, then renders a snapshot of it.
pub struct SimState {
    pub motion: MotionSimulator,
    pub trail: TrailBuffer,
    pub viewport: Viewport,
    /// Last size the shell asked for. The live viewport may be larger to
    /// fit the object.
    requested: (u32, u32),
    pub flash: Option<CollisionFlash>,
    pub mode: DayNightMode,
    pub rng: ChaCha8Rng,
    pub frame_counter: u64,
    /// Seconds of ticking so far, paused or not. Drives the collision fade.
    pub elapsed: f64,
    pub effective_speed: f64,
    pub show_trail: bool,
    pub show_scanlines: bool,
    pub status: String,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::with_rng(ChaCha8Rng::from_entropy())
    }

    fn with_rng(mut rng: ChaCha8Rng) -> Self {
        let defaults = Settings::default();
        let viewport = Viewport::default();
        let motion = MotionSimulator::new(&mut rng, defaults.ball_size, defaults.base_speed, &viewport);
        Self {
            motion,
            trail: TrailBuffer::default(),
            requested: (viewport.width(), viewport.height()),
            viewport,
            flash: None,
            mode: DayNightMode::Normal,
            rng,
            frame_counter: 0,
            elapsed: 0.0,
            effective_speed: defaults.base_speed,
            show_trail: defaults.show_trail,
            show_scanlines: defaults.show_scanlines,
            status: String::from("Starting..."),
        }
    }

    /// Advance one tick. While paused only the status and fade clock move.
    pub fn tick(&mut self, dt: f64, hours: &dyn HourSource) -> Option<CollisionEvent> {
        self.elapsed += clock::clamp_dt(dt);
        self.mode = DayNightMode::from_hour(hours.hour());

        if self.motion.is_paused() {
            self.status = format!("Paused | Frame:{}", self.frame_counter);
            return None;
        }

        self.frame_counter += 1;
        self.effective_speed = self.motion.speed.effective(self.mode);

        let prev = self.motion.ball.pos;
        let event = self
            .motion
            .advance(dt, self.effective_speed, &self.viewport, &mut self.rng);

        if let Some(ref ev) = event {
            if ev.corner {
                debug!("corner hit on frame {}", self.frame_counter);
            }
            self.flash = Some(CollisionFlash::new(ev.phrase, &self.motion.ball, self.elapsed));
        }

        if self.show_trail {
            let ball = &self.motion.ball;
            self.trail.record_step(prev, ball.pos, ball.color);
        }

        self.status = self.running_status();
        event
    }

    fn running_status(&self) -> String {
        let ball = &self.motion.ball;
        let mut status = format!(
            "Frame:{} Pos:({},{}) Dir:({:.2},{:.2}) Speed:{:.1}",
            self.frame_counter,
            ball.pos.x as i64,
            ball.pos.y as i64,
            ball.dir.x,
            ball.dir.y,
            self.effective_speed,
        );
        if self.mode.is_silent() {
            status.push_str(" | SILENT");
        }
        if self.motion.speed.is_boosting() {
            status.push_str(&format!(" | BOOST:{}", self.motion.speed.boost_frames));
        }
        status
    }

    /// Collision flash still fading, if any.
    pub fn live_flash(&self) -> Option<&CollisionFlash> {
        self.flash.as_ref().filter(|f| f.is_live(self.elapsed))
    }

    pub fn is_paused(&self) -> bool {
        self.motion.is_paused()
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.motion.set_paused(paused);
        info!("{}", if paused { "paused" } else { "resumed" });
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.is_paused());
    }

    /// Replace the viewport and pull the object back inside it.
    pub fn resize(&mut self, width: i64, height: i64) {
        self.requested = (
            viewport::clamp_dimension(width, "viewport width"),
            viewport::clamp_dimension(height, "viewport height"),
        );
        self.rebuild_viewport();
    }

    pub fn set_ball_size(&mut self, size: i64) {
        let size = viewport::clamp_dimension(size, "ball size");
        self.motion.set_size(size, &self.viewport);
        self.rebuild_viewport();
    }

    fn rebuild_viewport(&mut self) {
        let (w, h) = self.requested;
        self.viewport = Viewport::new(w as i64, h as i64, self.motion.ball.size);
        self.motion.reclamp(&self.viewport);
    }

    pub fn set_base_speed(&mut self, speed: f64) {
        if !speed.is_finite() {
            warn!("ignoring non-finite base speed");
            return;
        }
        self.motion.speed.base = speed.clamp(config::MIN_BASE_SPEED, config::MAX_BASE_SPEED);
    }

    pub fn base_speed(&self) -> f64 {
        self.motion.speed.base
    }

    pub fn set_trail_enabled(&mut self, enabled: bool) {
        self.show_trail = enabled;
        if !enabled {
            self.trail.clear();
        }
    }

    pub fn set_scanlines_enabled(&mut self, enabled: bool) {
        self.show_scanlines = enabled;
    }

    pub fn settings(&self) -> Settings {
        Settings {
            base_speed: self.base_speed(),
            ball_size: self.motion.ball.size,
            show_trail: self.show_trail,
            show_scanlines: self.show_scanlines,
            canvas_w: self.requested.0,
            canvas_h: self.requested.1,
        }
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_base_speed(settings.base_speed);
        self.set_trail_enabled(settings.show_trail);
        self.set_scanlines_enabled(settings.show_scanlines);
        self.set_ball_size(settings.ball_size as i64);
        self.resize(settings.canvas_w as i64, settings.canvas_h as i64);
    }
}
