use macroquad::prelude::Color;
use rand::Rng;

/// Opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba(self.r, self.g, self.b, 255)
    }
}

// CRT frame palette.
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
pub const RED: Rgb = Rgb::new(0xE4, 0x00, 0x27);
pub const YELLOW: Rgb = Rgb::new(0xF8, 0xD0, 0x34);
pub const BLUE: Rgb = Rgb::new(0x26, 0x4B, 0xCC);
pub const GREEN: Rgb = Rgb::new(0x2A, 0xA1, 0x46);
pub const LIGHT_GRAY: Rgb = Rgb::new(0xB3, 0xB4, 0xB6);
pub const DARK_GRAY: Rgb = Rgb::new(0x2C, 0x2C, 0x2E);
pub const SCANLINE: Rgb = Rgb::new(0x0b, 0x0b, 0x0b);
pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

/// Posterization levels: 0, 32, ..., 224.
const LEVELS: u8 = 8;
const LEVEL_STEP: u8 = 32;
const TOP_LEVEL: u8 = LEVEL_STEP * (LEVELS - 1);
const HIGHLIGHT_CHANCE: f64 = 0.25;
const BRIGHT_LIFT: u8 = 40;

fn quantized_channel(rng: &mut impl Rng) -> u8 {
    let v = rng.gen_range(0..LEVELS) * LEVEL_STEP;
    if v == TOP_LEVEL && rng.gen::<f64>() < HIGHLIGHT_CHANCE {
        255
    } else {
        v
    }
}

/// Random posterized color. A channel that lands on the top level is
/// occasionally promoted to full saturation; `bright` lifts every channel.
pub fn random_quantized(rng: &mut impl Rng, bright: bool) -> Rgb {
    let r = quantized_channel(rng);
    let g = quantized_channel(rng);
    let b = quantized_channel(rng);
    if bright {
        Rgb::new(
            r.saturating_add(BRIGHT_LIFT),
            g.saturating_add(BRIGHT_LIFT),
            b.saturating_add(BRIGHT_LIFT),
        )
    } else {
        Rgb::new(r, g, b)
    }
}

fn scale_channel(c: u8, factor: f64) -> u8 {
    (c as f64 * factor).clamp(0.0, 255.0) as u8
}

fn scale(color: Rgb, factor: f64) -> Rgb {
    Rgb::new(
        scale_channel(color.r, factor),
        scale_channel(color.g, factor),
        scale_channel(color.b, factor),
    )
}

pub fn brighten(color: Rgb, factor: f64) -> Rgb {
    scale(color, factor)
}

pub fn dim(color: Rgb, factor: f64) -> Rgb {
    scale(color, factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn is_level(c: u8) -> bool {
        c == 255 || (c % LEVEL_STEP == 0 && c <= TOP_LEVEL)
    }

    #[test]
    fn quantized_channels_land_on_levels() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..500 {
            let c = random_quantized(&mut rng, false);
            assert!(is_level(c.r) && is_level(c.g) && is_level(c.b), "{c:?}");
        }
    }

    #[test]
    fn bright_colors_are_lifted() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..500 {
            let c = random_quantized(&mut rng, true);
            for ch in [c.r, c.g, c.b] {
                assert!(ch >= BRIGHT_LIFT, "{c:?}");
            }
        }
    }

    #[test]
    fn top_level_is_sometimes_promoted() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let saw_full = (0..2000)
            .map(|_| random_quantized(&mut rng, false))
            .any(|c| c.r == 255 || c.g == 255 || c.b == 255);
        assert!(saw_full);
    }

    #[test]
    fn same_seed_same_colors() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(random_quantized(&mut a, true), random_quantized(&mut b, true));
        }
    }

    #[test]
    fn brighten_and_dim_clamp() {
        let c = Rgb::new(200, 100, 0);
        assert_eq!(brighten(c, 1.5), Rgb::new(255, 150, 0));
        assert_eq!(dim(c, 0.5), Rgb::new(100, 50, 0));
        assert_eq!(dim(c, -1.0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(RED.to_hex(), "#e40027");
    }
}
