use std::cell::Cell;

use peekmenu::{ChildDecoration, MenuHost, Viewport};
use peekmenu_ui_graphics::{CornerRadii, Point, Rect, Size};
use peekmenu_ui_layout::{Constraints, MenuSlot};

/// A phone-sized screen with one rounded tile in the middle.
pub struct DemoHost {
    viewport: Viewport,
    tile: Rect,
    haptics: Cell<usize>,
}

impl DemoHost {
    pub fn new() -> Self {
        Self {
            viewport: Viewport::new(Size::new(390.0, 844.0)),
            tile: Rect::new(120.0, 360.0, 150.0, 120.0),
            haptics: Cell::new(0),
        }
    }

    pub fn child_center(&self) -> Point {
        self.tile.center()
    }

    pub fn haptic_count(&self) -> usize {
        self.haptics.get()
    }
}

impl MenuHost for DemoHost {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn child_rect(&self) -> Option<Rect> {
        Some(self.tile)
    }

    fn child_decoration(&self) -> ChildDecoration {
        ChildDecoration::Clip(CornerRadii::uniform(12.0))
    }

    fn measure(&self, slot: MenuSlot, constraints: Constraints) -> Option<Size> {
        match slot {
            // The preview shows the tile at a larger size.
            MenuSlot::Preview => Some(constraints.constrain(Size::new(300.0, 240.0))),
            MenuSlot::TopWidget | MenuSlot::Actions => None,
        }
    }

    fn haptic_feedback(&self) {
        self.haptics.set(self.haptics.get() + 1);
        println!("-> *bzzt*");
    }
}
