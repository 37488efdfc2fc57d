//! The seam between the menu and the UI toolkit that hosts it.

use peekmenu_ui_graphics::{Brightness, CornerRadii, EdgeInsets, Rect, Size};
use peekmenu_ui_layout::{Constraints, MenuSlot, Orientation};

/// Viewport metrics at the time of a query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: Size,
    pub safe_area: EdgeInsets,
    pub brightness: Brightness,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            safe_area: EdgeInsets::ZERO,
            brightness: Brightness::Light,
        }
    }

    pub fn with_safe_area(mut self, safe_area: EdgeInsets) -> Self {
        self.safe_area = safe_area;
        self
    }

    pub fn with_brightness(mut self, brightness: Brightness) -> Self {
        self.brightness = brightness;
        self
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::from_size(self.size)
    }
}

/// How the pressed child decorates itself. Determines the decoy's corner
/// radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ChildDecoration {
    #[default]
    None,
    /// The child clips itself to rounded corners.
    Clip(CornerRadii),
    /// The child paints a rounded box.
    Boxed(CornerRadii),
}

impl ChildDecoration {
    pub fn corner_radii(&self) -> Option<CornerRadii> {
        match self {
            ChildDecoration::None => None,
            ChildDecoration::Clip(radii) | ChildDecoration::Boxed(radii) => Some(*radii),
        }
    }
}

/// Services the hosting toolkit provides to a menu.
pub trait MenuHost {
    fn viewport(&self) -> Viewport;

    /// Where the child currently rests, in viewport coordinates. `None`
    /// while it is not mounted.
    fn child_rect(&self) -> Option<Rect>;

    fn child_decoration(&self) -> ChildDecoration {
        ChildDecoration::None
    }

    /// Measures the preview or the top widget under `constraints`. `None`
    /// means nothing is mounted for `slot`.
    fn measure(&self, slot: MenuSlot, constraints: Constraints) -> Option<Size>;

    fn haptic_feedback(&self) {}
}
