use log::warn;
use macroquad::math::DVec2;

use crate::config;

/// Clamp a user- or window-supplied dimension to the smallest valid value.
pub fn clamp_dimension(value: i64, what: &str) -> u32 {
    if value < 1 {
        warn!("invalid {what} {value}, clamping to 1");
        1
    } else {
        value.min(u32::MAX as i64) as u32
    }
}

/// Rectangle the object bounces in. Never smaller than the object itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub fn new(width: i64, height: i64, object_size: u32) -> Self {
        let min = object_size.max(1);
        Self {
            width: clamp_dimension(width, "viewport width").max(min),
            height: clamp_dimension(height, "viewport height").max(min),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest top-left coordinate an object of `size` may occupy.
    pub fn max_pos(&self, size: u32) -> DVec2 {
        DVec2::new(
            (self.width as f64 - size as f64).max(0.0),
            (self.height as f64 - size as f64).max(0.0),
        )
    }

    pub fn clamp(&self, pos: DVec2, size: u32) -> DVec2 {
        pos.clamp(DVec2::ZERO, self.max_pos(size))
    }
}

#[cfg(test)]
impl Viewport {
    pub fn contains(&self, pos: DVec2, size: u32) -> bool {
        let max = self.max_pos(size);
        pos.x >= 0.0 && pos.y >= 0.0 && pos.x <= max.x && pos.y <= max.y
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: config::DEFAULT_CANVAS_W,
            height: config::DEFAULT_CANVAS_H,
        }
    }
}

/// The 4:3 letterboxed content area inside the window, in window pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentBox {
    pub x0: f32,
    pub y0: f32,
    pub width: u32,
    pub height: u32,
}

impl ContentBox {
    pub fn fit(window_w: f32, window_h: f32) -> Self {
        let w = window_w.max(1.0) as i64;
        let h = window_h.max(1.0) as i64;

        let mut target_w = w.min((h as f64 * config::CONTENT_ASPECT) as i64);
        let mut target_h = (target_w as f64 / config::CONTENT_ASPECT) as i64;
        if target_w < 4 {
            target_w = 4;
            target_h = 3;
        }

        Self {
            x0: ((w - target_w) / 2) as f32,
            y0: ((h - target_h) / 2) as f32,
            width: target_w as u32,
            height: target_h as u32,
        }
    }

    pub fn x1(&self) -> f32 {
        self.x0 + self.width as f32
    }

    pub fn y1(&self) -> f32 {
        self.y0 + self.height as f32
    }

    /// Content-local coordinates to window coordinates.
    pub fn to_window(&self, local: DVec2) -> DVec2 {
        DVec2::new(local.x + self.x0 as f64, local.y + self.y0 as f64)
    }
}

#[cfg(test)]
impl Default for ContentBox {
    fn default() -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            width: config::DEFAULT_CANVAS_W,
            height: config::DEFAULT_CANVAS_H,
        }
    }
}
