use macroquad::prelude::*;

use crate::snapshot::{Primitive, RenderSnapshot, TextAnchor};

/// A minimized or closing window reports a sub-pixel surface.
pub fn has_surface(width: f32, height: f32) -> bool {
    width >= 1.0 && height >= 1.0
}

/// Draw a snapshot to the screen, or nothing when there is no surface.
pub fn draw(snapshot: &RenderSnapshot) {
    if !has_surface(screen_width(), screen_height()) {
        return;
    }

    for primitive in &snapshot.primitives {
        draw_primitive(primitive);
    }
}

fn draw_primitive(primitive: &Primitive) {
    match primitive {
        Primitive::Rect { x, y, w, h, color } => {
            draw_rectangle(*x, *y, *w, *h, color.to_color());
        }
        Primitive::Line { x0, y0, x1, y1, color } => {
            draw_line(*x0, *y0, *x1, *y1, 1.0, color.to_color());
        }
        Primitive::Circle { x, y, radius, color } => {
            draw_circle(*x, *y, radius.max(0.0), color.to_color());
        }
        Primitive::Text {
            text,
            x,
            y,
            size,
            color,
            anchor,
        } => {
            let dims = measure_text(text, None, *size as u16, 1.0);
            let (tx, ty) = match anchor {
                TextAnchor::TopLeft => (*x, *y + dims.offset_y),
                TextAnchor::Center => (*x - dims.width * 0.5, *y + dims.offset_y * 0.5),
            };
            // Drop shadow for legibility over bright trails.
            draw_text(text, tx + 1.0, ty + 1.0, *size, Color::new(0.0, 0.0, 0.0, 0.5));
            draw_text(text, tx, ty, *size, color.to_color());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_window_has_no_surface() {
        assert!(!has_surface(0.0, 0.0));
        assert!(!has_surface(800.0, 0.5));
        assert!(!has_surface(0.0, 600.0));
        assert!(!has_surface(f32::NAN, 600.0));
    }

    #[test]
    fn any_pixel_counts_as_surface() {
        assert!(has_surface(1.0, 1.0));
        assert!(has_surface(1024.0, 768.0));
    }
}
