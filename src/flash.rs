use macroquad::math::DVec2;

use crate::config;
use crate::motion::Ball;
use crate::palette::Rgb;

const ABOVE_THRESHOLD: f64 = 28.0;
const TEXT_OFFSET: f64 = 18.0;

fn step_seconds() -> f64 {
    (config::FLASH_DURATION_MS / config::FLASH_STEPS) as f64 / 1000.0
}

/// Transient collision phrase that fades out in discrete steps.
/// A newer collision simply replaces the current flash.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionFlash {
    pub phrase: &'static str,
    /// Text center in content-local coordinates.
    pub anchor: DVec2,
    started_at: f64,
}

impl CollisionFlash {
    pub fn new(phrase: &'static str, ball: &Ball, now: f64) -> Self {
        let cx = ball.pos.x + ball.size as f64 * 0.5;
        let cy = if ball.pos.y > ABOVE_THRESHOLD {
            ball.pos.y - TEXT_OFFSET
        } else {
            ball.pos.y + ball.size as f64 + TEXT_OFFSET
        };
        Self {
            phrase,
            anchor: DVec2::new(cx, cy),
            started_at: now,
        }
    }

    /// Fade level from `FLASH_STEPS` down to 1, or `None` once hidden.
    pub fn level(&self, now: f64) -> Option<u32> {
        let elapsed = (now - self.started_at).max(0.0);
        let steps_done = (elapsed / step_seconds()).floor() as u32;
        if steps_done >= config::FLASH_STEPS {
            None
        } else {
            Some(config::FLASH_STEPS - steps_done)
        }
    }

    pub fn color(&self, now: f64) -> Option<Rgb> {
        self.level(now).map(fade_color)
    }

    pub fn is_live(&self, now: f64) -> bool {
        self.level(now).is_some()
    }
}

/// Red-tinted text color for a fade level.
pub fn fade_color(level: u32) -> Rgb {
    let v = (config::FLASH_PEAK * level as f64 / config::FLASH_STEPS as f64) as u8;
    let tint = (v as f64 * 0.3) as u8;
    Rgb::new(v, tint, tint)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball_at(x: f64, y: f64) -> Ball {
        Ball {
            pos: DVec2::new(x, y),
            dir: DVec2::X,
            size: 36,
            color: Rgb::new(0, 0, 0),
        }
    }

    #[test]
    fn fades_in_eight_steps_then_hides() {
        let flash = CollisionFlash::new("BAM!", &ball_at(100.0, 100.0), 10.0);
        assert_eq!(flash.level(10.0), Some(8));
        assert_eq!(flash.level(10.055), Some(8));
        assert_eq!(flash.level(10.057), Some(7));
        assert_eq!(flash.level(10.440), Some(1));
        assert_eq!(flash.level(10.449), None);
        assert!(!flash.is_live(11.0));
    }

    #[test]
    fn fade_colors_step_down() {
        assert_eq!(fade_color(8), Rgb::new(220, 66, 66));
        assert_eq!(fade_color(4), Rgb::new(110, 33, 33));
        assert_eq!(fade_color(1), Rgb::new(27, 8, 8));
    }

    #[test]
    fn anchor_sits_above_unless_near_top() {
        let above = CollisionFlash::new("TOK!", &ball_at(10.0, 100.0), 0.0);
        assert_eq!(above.anchor, DVec2::new(28.0, 82.0));

        let below = CollisionFlash::new("TOK!", &ball_at(10.0, 0.0), 0.0);
        assert_eq!(below.anchor, DVec2::new(28.0, 54.0));
    }
}
