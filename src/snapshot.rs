use crate::config;
use crate::palette::{self, Rgb};
use crate::simulation::SimState;
use crate::viewport::ContentBox;

const SILENT_LABEL: &str = "[Silent Mode]";
const LABEL_INSET: f32 = 8.0;
const LABEL_FONT: f32 = 16.0;
const PHRASE_FONT: f32 = 24.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
    TopLeft,
    Center,
}

/// Renderer-agnostic draw command in window pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgb,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        color: Rgb,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgb,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Rgb,
        anchor: TextAnchor,
    },
}

/// Everything the shell needs for one frame: draw commands in paint order
/// plus the toolbar's status line and pause state.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSnapshot {
    pub primitives: Vec<Primitive>,
    pub status: String,
    pub paused: bool,
}

fn frame_color(color: Rgb, dimmed: bool) -> Rgb {
    if dimmed {
        palette::dim(color, config::NIGHT_DIM_FACTOR)
    } else {
        color
    }
}

fn clipped_rect(x0: f32, y0: f32, x1: f32, y1: f32, window: (f32, f32), color: Rgb) -> Primitive {
    let (x0, y0) = (x0.max(0.0), y0.max(0.0));
    let (x1, y1) = (x1.min(window.0), y1.min(window.1));
    Primitive::Rect {
        x: x0,
        y: y0,
        w: (x1 - x0).max(0.0),
        h: (y1 - y0).max(0.0),
        color,
    }
}

/// CRT bezel: black backdrop, four colored layers, a thin inner rim, then
/// the content area.
fn push_frame(out: &mut Vec<Primitive>, content: &ContentBox, window: (f32, f32), dimmed: bool) {
    out.push(Primitive::Rect {
        x: 0.0,
        y: 0.0,
        w: window.0,
        h: window.1,
        color: palette::BLACK,
    });

    let layers = [
        (4.0, palette::RED),
        (3.0, palette::YELLOW),
        (2.0, palette::BLUE),
        (1.0, palette::GREEN),
    ];
    for (mul, color) in layers {
        let pad = config::BORDER_LAYER * mul;
        out.push(clipped_rect(
            content.x0 - pad,
            content.y0 - pad,
            content.x1() + pad,
            content.y1() + pad,
            window,
            frame_color(color, dimmed),
        ));
    }

    let pad = config::INNER_THIN;
    out.push(clipped_rect(
        content.x0 - pad,
        content.y0 - pad,
        content.x1() + pad,
        content.y1() + pad,
        window,
        frame_color(palette::LIGHT_GRAY, dimmed),
    ));

    out.push(Primitive::Rect {
        x: content.x0,
        y: content.y0,
        w: content.width as f32,
        h: content.height as f32,
        color: frame_color(palette::DARK_GRAY, dimmed),
    });
}

fn push_scanlines(out: &mut Vec<Primitive>, content: &ContentBox) {
    for row in (0..content.height).step_by(config::SCANLINE_STEP) {
        let y = content.y0 + row as f32;
        out.push(Primitive::Line {
            x0: content.x0,
            y0: y,
            x1: content.x1(),
            y1: y,
            color: palette::SCANLINE,
        });
    }
}

impl RenderSnapshot {
    pub fn build(sim: &SimState, content: &ContentBox, window_w: f32, window_h: f32) -> Self {
        let window = (window_w.max(1.0), window_h.max(1.0));
        let dimmed = sim.mode.is_dimmed();
        let silent = sim.mode.is_silent();
        let ball = &sim.motion.ball;

        let mut primitives = Vec::new();
        push_frame(&mut primitives, content, window, dimmed);
        if sim.show_scanlines {
            push_scanlines(&mut primitives, content);
        }

        // Oldest first so the newest sample and then the ball paint on top.
        for shape in sim.trail.shapes(ball.size).into_iter().rev() {
            let center = content.to_window(shape.center);
            primitives.push(Primitive::Circle {
                x: center.x as f32,
                y: center.y as f32,
                radius: shape.radius as f32,
                color: shape.color,
            });
        }

        let center = content.to_window(ball.center());
        primitives.push(Primitive::Circle {
            x: center.x as f32,
            y: center.y as f32,
            radius: ball.radius() as f32,
            color: ball.color,
        });

        if silent {
            primitives.push(Primitive::Text {
                text: SILENT_LABEL.to_string(),
                x: content.x0 + LABEL_INSET,
                y: content.y0 + LABEL_INSET,
                size: LABEL_FONT,
                color: palette::WHITE,
                anchor: TextAnchor::TopLeft,
            });
        }

        if let Some(flash) = sim.live_flash() {
            if let Some(color) = flash.color(sim.elapsed) {
                let at = content.to_window(flash.anchor);
                primitives.push(Primitive::Text {
                    text: flash.phrase.to_string(),
                    x: at.x as f32,
                    y: at.y as f32,
                    size: PHRASE_FONT,
                    color,
                    anchor: TextAnchor::Center,
                });
            }
        }

        Self {
            primitives,
            status: sim.status.clone(),
            paused: sim.is_paused(),
        }
    }
}
