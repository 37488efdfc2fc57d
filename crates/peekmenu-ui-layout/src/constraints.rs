//! Layout constraints system

use peekmenu_ui_graphics::Size;

/// Constraints handed to the host when it measures a menu slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constraints {
    pub min_width: f32,
    pub max_width: f32,
    pub min_height: f32,
    pub max_height: f32,
}

impl Constraints {
    /// Creates constraints with loose bounds (min = 0, max = given values).
    /// Negative maxima collapse to zero.
    pub fn loose(max_width: f32, max_height: f32) -> Self {
        Self {
            min_width: 0.0,
            max_width: max_width.max(0.0),
            min_height: 0.0,
            max_height: max_height.max(0.0),
        }
    }

    /// Constrains the provided size to fit within these constraints.
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            size.width.clamp(self.min_width, self.max_width),
            size.height.clamp(self.min_height, self.max_height),
        )
    }
}

#[cfg(test)]
#[path = "tests/constraints_tests.rs"]
mod tests;
