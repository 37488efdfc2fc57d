//! Horizontal screen-location classification and orientation.

use peekmenu_ui_graphics::{Rect, Size};

/// Where the pressed child sits horizontally on screen. Drives which edge
/// the preview and the action sheet align to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuLocation {
    #[default]
    Center,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff the viewport is wider than it is tall.
    pub fn from_size(size: Size) -> Self {
        if size.width > size.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    pub fn is_landscape(self) -> bool {
        self == Orientation::Landscape
    }
}

/// Classifies `child` against a screen of width `screen_width`.
///
/// The child is [`MenuLocation::Center`] when it straddles the vertical
/// midline and its own center lies within a quarter of its width of it.
pub fn infer_location(child: Rect, screen_width: f32) -> MenuLocation {
    let midline = screen_width / 2.0;
    let center_x = child.center().x;
    let straddles = child.left() <= midline && child.right() >= midline;
    if straddles && (center_x - midline).abs() <= child.width / 4.0 {
        MenuLocation::Center
    } else if center_x < midline {
        MenuLocation::Left
    } else {
        MenuLocation::Right
    }
}

#[cfg(test)]
#[path = "tests/location_tests.rs"]
mod tests;
