use log::debug;
use macroquad::math::DVec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::clock;
use crate::config;
use crate::day_night::DayNightMode;
use crate::palette::{self, Rgb};
use crate::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// The bouncing object. `pos` is the top-left corner of its bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct Ball {
    pub pos: DVec2,
    pub dir: DVec2,
    pub size: u32,
    pub color: Rgb,
}

impl Ball {
    pub fn center(&self) -> DVec2 {
        self.pos + DVec2::splat(self.size as f64 * 0.5)
    }

    pub fn radius(&self) -> f64 {
        self.size as f64 * 0.5
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedState {
    pub base: f64,
    pub boost_frames: u32,
}

impl SpeedState {
    /// Speed for this tick. Consumes one boost frame if a boost is active.
    pub fn effective(&mut self, mode: DayNightMode) -> f64 {
        let mut speed = self.base;
        if self.boost_frames > 0 {
            speed *= config::SPEED_BOOST_MULT;
            self.boost_frames -= 1;
        }
        speed * mode.speed_multiplier()
    }

    pub fn is_boosting(&self) -> bool {
        self.boost_frames > 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CollisionEvent {
    pub phrase: &'static str,
    pub corner: bool,
}

/// Outcome of testing a candidate position against the viewport walls,
/// before any jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallHit {
    pub pos: DVec2,
    pub dir: DVec2,
    pub hit_x: bool,
    pub hit_y: bool,
}

impl WallHit {
    pub fn collided(&self) -> bool {
        self.hit_x || self.hit_y
    }
}

fn reflect_axis(coord: f64, dir: f64, size: f64, extent: f64) -> (f64, f64, bool) {
    if coord <= 0.0 {
        let d = if dir == 0.0 { 1.0 } else { dir.abs() };
        (0.0, d, true)
    } else if coord + size >= extent {
        let d = if dir == 0.0 { -1.0 } else { -dir.abs() };
        ((extent - size).max(0.0), d, true)
    } else {
        (coord, dir, false)
    }
}

/// Clamp and reflect each axis independently. A corner hit flips both.
pub fn resolve_walls(candidate: DVec2, dir: DVec2, size: u32, viewport: &Viewport) -> WallHit {
    let size = size as f64;
    let (x, dx, hit_x) = reflect_axis(candidate.x, dir.x, size, viewport.width() as f64);
    let (y, dy, hit_y) = reflect_axis(candidate.y, dir.y, size, viewport.height() as f64);
    WallHit {
        pos: DVec2::new(x, y),
        dir: DVec2::new(dx, dy),
        hit_x,
        hit_y,
    }
}

/// Unit vector along `v`; a zero vector is left as-is rather than NaN.
pub fn normalize_or_keep(v: DVec2) -> DVec2 {
    let mag = v.length();
    let mag = if mag == 0.0 { 1.0 } else { mag };
    v / mag
}

/// Skew the direction slightly so the path never settles into a loop.
pub fn jitter_direction(dir: DVec2, jitter: f64) -> DVec2 {
    let skewed = DVec2::new(
        dir.x + jitter * config::JITTER_SCALE,
        dir.y - jitter * config::JITTER_SCALE,
    );
    normalize_or_keep(skewed)
}

fn initial_direction(rng: &mut impl Rng) -> DVec2 {
    let angle = rng.gen_range(-config::START_ANGLE_SPREAD..=config::START_ANGLE_SPREAD);
    let push_off_axis = |c: f64| {
        if c.abs() < config::START_MIN_COMPONENT {
            config::START_MIN_COMPONENT.copysign(c)
        } else {
            c
        }
    };
    normalize_or_keep(DVec2::new(push_off_axis(angle.cos()), push_off_axis(angle.sin())))
}

pub struct MotionSimulator {
    pub ball: Ball,
    pub speed: SpeedState,
    state: RunState,
}

impl MotionSimulator {
    pub fn new(rng: &mut impl Rng, size: u32, base_speed: f64, viewport: &Viewport) -> Self {
        let color = palette::random_quantized(rng, true);
        let start = DVec2::new(
            config::DEFAULT_CANVAS_W as f64 * config::START_X_FRACTION,
            config::DEFAULT_CANVAS_H as f64 * config::START_Y_FRACTION,
        );
        let size = size.max(1);
        Self {
            ball: Ball {
                pos: viewport.clamp(start, size),
                dir: initial_direction(rng),
                size,
                color,
            },
            speed: SpeedState {
                base: base_speed,
                boost_frames: 0,
            },
            state: RunState::Running,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == RunState::Paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state = if paused { RunState::Paused } else { RunState::Running };
    }

    /// Pull the object back inside a (possibly smaller) viewport.
    pub fn reclamp(&mut self, viewport: &Viewport) {
        self.ball.pos = viewport.clamp(self.ball.pos, self.ball.size);
    }

    pub fn set_size(&mut self, size: u32, viewport: &Viewport) {
        self.ball.size = size.max(1);
        self.reclamp(viewport);
    }

    /// Integrate one tick. Returns the collision, if any wall was reached.
    /// Does nothing while paused.
    pub fn advance(
        &mut self,
        dt: f64,
        effective_speed: f64,
        viewport: &Viewport,
        rng: &mut impl Rng,
    ) -> Option<CollisionEvent> {
        if self.state == RunState::Paused {
            return None;
        }

        let dt = clock::clamp_dt(dt);
        let step = effective_speed * dt * config::FRAME_RATE;
        let candidate = self.ball.pos + self.ball.dir * step;

        let hit = resolve_walls(candidate, self.ball.dir, self.ball.size, viewport);
        self.ball.dir = hit.dir;

        let event = if hit.collided() {
            let phrase = config::COLLISION_PHRASES
                .choose(rng)
                .copied()
                .unwrap_or(config::COLLISION_PHRASES[0]);
            self.speed.boost_frames = config::SPEED_BOOST_FRAMES;
            self.ball.color = palette::random_quantized(rng, true);
            let jitter = rng.gen_range(-config::JITTER_RANGE..=config::JITTER_RANGE);
            self.ball.dir = jitter_direction(self.ball.dir, jitter);

            debug!(
                "{phrase} at ({:.1}, {:.1}) color {}",
                hit.pos.x,
                hit.pos.y,
                self.ball.color.to_hex()
            );
            Some(CollisionEvent {
                phrase,
                corner: hit.hit_x && hit.hit_y,
            })
        } else {
            None
        };

        self.ball.pos = hit.pos;
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sim_at(pos: DVec2, dir: DVec2, rng: &mut ChaCha8Rng, viewport: &Viewport) -> MotionSimulator {
        let mut sim = MotionSimulator::new(rng, 36, 5.0, viewport);
        sim.ball.pos = pos;
        sim.ball.dir = dir;
        sim
    }

    #[test]
    fn left_wall_bounce_scenario() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let vp = Viewport::new(800, 600, 36);
        let mut sim = sim_at(DVec2::new(0.0, 50.0), DVec2::new(-0.7, 0.1), &mut rng, &vp);
        // Bright colors never produce this, so any reassignment is visible.
        sim.ball.color = Rgb::new(1, 2, 3);
        let event = sim.advance(1.0 / 60.0, 5.0, &vp, &mut rng);

        let event = event.expect("left wall should register a collision");
        assert!(!event.corner);
        assert!(config::COLLISION_PHRASES.contains(&event.phrase));
        assert_eq!(sim.ball.pos.x, 0.0);
        assert!(sim.ball.dir.x > 0.0);
        assert_eq!(sim.speed.boost_frames, config::SPEED_BOOST_FRAMES);
        assert_ne!(sim.ball.color, Rgb::new(1, 2, 3));
        assert!((sim.ball.dir.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn left_hit_forces_positive_dx_before_jitter() {
        let vp = Viewport::new(800, 600, 36);
        for dx in [-1.0, -0.3, -1e-6, 0.0] {
            let hit = resolve_walls(DVec2::new(-2.0, 100.0), DVec2::new(dx, 0.5), 36, &vp);
            assert!(hit.hit_x);
            assert!(hit.dir.x > 0.0, "dx {dx} reflected to {}", hit.dir.x);
            assert_eq!(hit.pos.x, 0.0);
        }
    }

    #[test]
    fn right_and_bottom_hits_force_negative_components() {
        let vp = Viewport::new(800, 600, 36);
        let hit = resolve_walls(DVec2::new(770.0, 570.0), DVec2::new(0.6, 0.8), 36, &vp);
        assert!(hit.hit_x && hit.hit_y);
        assert_eq!(hit.pos, DVec2::new(764.0, 564.0));
        assert!(hit.dir.x < 0.0 && hit.dir.y < 0.0);
        // Magnitude of each component survives the reflection.
        assert_eq!(hit.dir, DVec2::new(-0.6, -0.8));
    }

    #[test]
    fn corner_hit_fires_one_event() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let vp = Viewport::new(800, 600, 36);
        let dir = DVec2::new(-1.0, -1.0).normalize();
        let mut sim = sim_at(DVec2::new(1.0, 1.0), dir, &mut rng, &vp);

        let event = sim.advance(1.0 / 60.0, 5.0, &vp, &mut rng).expect("corner");
        assert!(event.corner);
        assert_eq!(sim.ball.pos, DVec2::ZERO);
        // Jitter can only shave 0.0875 off either component.
        assert!(sim.ball.dir.x > 0.0 && sim.ball.dir.y > 0.0);
    }

    #[test]
    fn free_flight_moves_without_collision() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vp = Viewport::new(800, 600, 36);
        let mut sim = sim_at(DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0), &mut rng, &vp);

        assert!(sim.advance(0.5 / 60.0, 6.0, &vp, &mut rng).is_none());
        assert!((sim.ball.pos.x - 103.0).abs() < 1e-9);
        assert_eq!(sim.speed.boost_frames, 0);
    }

    #[test]
    fn stalled_dt_moves_one_nominal_frame() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vp = Viewport::new(800, 600, 36);
        let mut sim = sim_at(DVec2::new(100.0, 100.0), DVec2::new(0.0, 1.0), &mut rng, &vp);

        sim.advance(4.0, 5.0, &vp, &mut rng);
        assert!((sim.ball.pos.y - 105.0).abs() < 1e-9);
    }

    #[test]
    fn paused_simulator_does_not_move() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let vp = Viewport::new(800, 600, 36);
        let mut sim = sim_at(DVec2::new(100.0, 100.0), DVec2::new(1.0, 0.0), &mut rng, &vp);
        sim.set_paused(true);

        assert!(sim.advance(1.0 / 60.0, 5.0, &vp, &mut rng).is_none());
        assert_eq!(sim.ball.pos, DVec2::new(100.0, 100.0));
        sim.set_paused(false);
        assert!(!sim.is_paused());
    }

    #[test]
    fn invariants_hold_over_long_run() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let vp = Viewport::new(320, 240, 36);
        let mut sim = MotionSimulator::new(&mut rng, 36, 24.0, &vp);

        let mut collisions = 0;
        for i in 0..5000 {
            let speed = sim.speed.effective(DayNightMode::Normal);
            let dt = if i % 97 == 0 { 0.9 } else { 1.0 / 60.0 };
            if sim.advance(dt, speed, &vp, &mut rng).is_some() {
                collisions += 1;
            }
            assert!(vp.contains(sim.ball.pos, 36), "escaped at {:?}", sim.ball.pos);
            assert!((sim.ball.dir.length() - 1.0).abs() < 1e-9);
        }
        assert!(collisions > 0);
    }

    #[test]
    fn boost_is_consumed_per_frame() {
        let mut speed = SpeedState {
            base: 4.0,
            boost_frames: 2,
        };
        assert!((speed.effective(DayNightMode::Normal) - 5.8).abs() < 1e-9);
        assert!((speed.effective(DayNightMode::Silent) - 2.9).abs() < 1e-9);
        assert!(!speed.is_boosting());
        assert_eq!(speed.effective(DayNightMode::Silent), 2.0);
    }

    #[test]
    fn jitter_fallback_on_zero_vector() {
        assert_eq!(normalize_or_keep(DVec2::ZERO), DVec2::ZERO);
        let d = jitter_direction(DVec2::new(0.6, 0.8), 0.35);
        assert!((d.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn reclamp_after_shrink() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let big = Viewport::new(1024, 768, 36);
        let mut sim = sim_at(DVec2::new(900.0, 700.0), DVec2::X, &mut rng, &big);

        let small = Viewport::new(640, 480, 36);
        sim.reclamp(&small);
        assert_eq!(sim.ball.pos, DVec2::new(604.0, 444.0));
    }

    #[test]
    fn initial_direction_is_off_axis_unit() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..200 {
            let d = initial_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-12);
            assert!(d.x > 0.0);
        }
    }
}
