//! Safe-area scale factors.

use peekmenu_ui_graphics::{EdgeInsets, Rect, Size};

/// The area a menu may occupy: the viewport minus its safe-area insets,
/// deflated by `padding` on every side.
pub fn safe_bounds(viewport: Size, safe_area: EdgeInsets, padding: f32) -> Rect {
    Rect::from_size(viewport)
        .deflate(safe_area)
        .deflate(EdgeInsets::uniform(padding))
}

/// Largest factor in `[min_scale, open_scale]` at which `size` still fits
/// inside `bounds`. The lower clamp wins when the two disagree.
pub fn fit_scale_factor(size: Size, bounds: Rect, open_scale: f32, min_scale: f32) -> f32 {
    if size.width <= 0.0 || size.height <= 0.0 {
        return open_scale;
    }
    let fit = (bounds.width / size.width).min(bounds.height / size.height);
    open_scale.min(fit).max(min_scale).min(open_scale)
}

/// Scales `rect` about its center by `factor`, then shifts the result so it
/// lies inside `bounds` wherever it is small enough to.
pub fn scaled_rect_within(rect: Rect, bounds: Rect, factor: f32) -> Rect {
    let scaled = rect.scale_about_center(factor);
    let dx = shift_into(scaled.left(), scaled.right(), bounds.left(), bounds.right());
    let dy = shift_into(scaled.top(), scaled.bottom(), bounds.top(), bounds.bottom());
    scaled.translate(dx, dy)
}

fn shift_into(start: f32, end: f32, min: f32, max: f32) -> f32 {
    if end - start > max - min {
        // Too large to fit: center it on the bounds.
        (min + max) / 2.0 - (start + end) / 2.0
    } else if start < min {
        min - start
    } else if end > max {
        max - end
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/scale_tests.rs"]
mod tests;
