use std::collections::VecDeque;

use macroquad::math::DVec2;

use crate::config;
use crate::palette::{self, Rgb};

/// One ghost image of the object. `pos` is the object's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    pub pos: DVec2,
    pub color: Rgb,
}

/// Derived drawable for a trail sample, centered like the object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailShape {
    pub center: DVec2,
    pub radius: f64,
    pub color: Rgb,
}

/// Bounded motion-blur buffer. Index 0 is the newest sample.
pub struct TrailBuffer {
    samples: VecDeque<TrailSample>,
    max_len: usize,
}

impl TrailBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_len + config::TRAIL_MAX_INTERPOLANTS + 1),
            max_len,
        }
    }

    /// Record the step from `prev` to `new`, filling the gap with
    /// interpolated samples so fast movement still reads as a streak.
    /// Does nothing if the object did not move.
    pub fn record_step(&mut self, prev: DVec2, new: DVec2, base_color: Rgb) {
        let delta = new - prev;
        let dist = delta.length();
        if dist <= 0.0 {
            return;
        }

        let interp_count = ((dist / 2.0).round() as usize).clamp(1, config::TRAIL_MAX_INTERPOLANTS);
        let head = palette::brighten(base_color, config::TRAIL_HEAD_TINT);
        let mid = palette::brighten(base_color, config::TRAIL_MID_TINT);

        for i in 1..=interp_count {
            let t = i as f64 / (interp_count + 1) as f64;
            let color = if i < interp_count { mid } else { head };
            self.samples.push_front(TrailSample {
                pos: prev + delta * t,
                color,
            });
        }
        self.samples.push_front(TrailSample { pos: new, color: head });

        self.samples.truncate(self.max_len);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Shapes newest-first. Older samples shrink and darken.
    pub fn shapes(&self, object_size: u32) -> Vec<TrailShape> {
        let total = self.samples.len().max(1) as f64;
        let half = object_size as f64 * 0.5;
        self.samples
            .iter()
            .enumerate()
            .map(|(idx, s)| {
                let age = idx as f64 / total;
                TrailShape {
                    center: s.pos + DVec2::splat(half),
                    radius: half * (0.85 - age * 0.6),
                    color: palette::dim(s.color, 0.45 + (1.0 - age) * 0.55),
                }
            })
            .collect()
    }
}

#[cfg(test)]
impl TrailBuffer {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Samples newest-first.
    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> + '_ {
        self.samples.iter()
    }
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::new(config::TRAIL_MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: Rgb = Rgb::new(100, 60, 20);

    #[test]
    fn six_pixel_step_adds_four_samples() {
        let mut trail = TrailBuffer::default();
        trail.record_step(DVec2::new(100.0, 100.0), DVec2::new(106.0, 100.0), BASE);
        assert_eq!(trail.len(), 4);

        let xs: Vec<f64> = trail.iter().map(|s| s.pos.x).collect();
        assert_eq!(xs, vec![106.0, 104.5, 103.0, 101.5]);

        let head = palette::brighten(BASE, config::TRAIL_HEAD_TINT);
        let mid = palette::brighten(BASE, config::TRAIL_MID_TINT);
        let colors: Vec<Rgb> = trail.iter().map(|s| s.color).collect();
        assert_eq!(colors, vec![head, head, mid, mid]);
    }

    #[test]
    fn tiny_steps_still_add_one_interpolant() {
        let mut trail = TrailBuffer::default();
        trail.record_step(DVec2::ZERO, DVec2::new(0.5, 0.0), BASE);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn huge_steps_cap_interpolants() {
        let mut trail = TrailBuffer::new(100);
        trail.record_step(DVec2::ZERO, DVec2::new(500.0, 0.0), BASE);
        assert_eq!(trail.len(), config::TRAIL_MAX_INTERPOLANTS + 1);
    }

    #[test]
    fn no_movement_records_nothing() {
        let mut trail = TrailBuffer::default();
        trail.record_step(DVec2::new(3.0, 3.0), DVec2::new(3.0, 3.0), BASE);
        assert!(trail.is_empty());
    }

    #[test]
    fn length_never_exceeds_max() {
        let mut trail = TrailBuffer::default();
        let mut pos = DVec2::ZERO;
        for _ in 0..50 {
            let next = pos + DVec2::new(9.0, 4.0);
            trail.record_step(pos, next, BASE);
            assert!(trail.len() <= trail.max_len());
            pos = next;
        }
        assert_eq!(trail.len(), config::TRAIL_MAX);
        // Newest sample is the most recent position.
        assert_eq!(trail.iter().next().map(|s| s.pos), Some(pos));
    }

    #[test]
    fn clear_empties_buffer() {
        let mut trail = TrailBuffer::default();
        trail.record_step(DVec2::ZERO, DVec2::new(10.0, 0.0), BASE);
        trail.clear();
        assert!(trail.is_empty());
    }

    #[test]
    fn shapes_shrink_and_darken_with_age() {
        let mut trail = TrailBuffer::default();
        trail.record_step(DVec2::ZERO, DVec2::new(20.0, 0.0), Rgb::new(120, 120, 120));
        let shapes = trail.shapes(36);

        assert!((shapes[0].radius - 18.0 * 0.85).abs() < 1e-9);
        assert_eq!(shapes[0].center, DVec2::new(38.0, 18.0));
        for pair in shapes.windows(2) {
            assert!(pair[1].radius < pair[0].radius);
            assert!(pair[1].color.r <= pair[0].color.r);
        }
    }
}
