//! Box shadows

use crate::{Color, Point};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxShadow {
    pub color: Color,
    pub offset: Point,
    pub blur_radius: f32,
    pub spread_radius: f32,
}

impl BoxShadow {
    /// A shadow that paints nothing.
    pub const NONE: BoxShadow = BoxShadow {
        color: Color::TRANSPARENT,
        offset: Point::ZERO,
        blur_radius: 0.0,
        spread_radius: 0.0,
    };

    pub const fn new(color: Color, blur_radius: f32, spread_radius: f32) -> Self {
        Self {
            color,
            offset: Point::ZERO,
            blur_radius,
            spread_radius,
        }
    }

    pub fn is_visible(&self) -> bool {
        !self.color.is_transparent() && (self.blur_radius > 0.0 || self.spread_radius > 0.0)
    }
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self::NONE
    }
}
