//! Aligned-children layout.
//!
//! Places the preview, the action sheet and the optional top widget as one
//! block anchored on the pressed child. Portrait stacks the sheet under the
//! preview; landscape puts it beside the preview on the side the location
//! points to. Elements of different widths are aligned against the widest
//! one instead of being stretched.

use crate::{Constraints, MenuLocation, Orientation};
use peekmenu_ui_graphics::{Rect, Size};
use thiserror::Error;

/// The independently measured elements of an open menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuSlot {
    TopWidget,
    Preview,
    Actions,
}

impl MenuSlot {
    pub const ALL: [MenuSlot; 3] = [MenuSlot::TopWidget, MenuSlot::Preview, MenuSlot::Actions];
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LayoutError {
    #[error("{0:?} was not measured")]
    Unmeasured(MenuSlot),
    #[error("layout bounds {width}x{height} are empty")]
    EmptyBounds { width: f32, height: f32 },
}

/// Measures one slot under the given constraints. `None` means the slot has
/// nothing mounted.
pub trait SlotMeasurer {
    fn measure(&mut self, slot: MenuSlot, constraints: Constraints) -> Option<Size>;
}

impl<F> SlotMeasurer for F
where
    F: FnMut(MenuSlot, Constraints) -> Option<Size>,
{
    fn measure(&mut self, slot: MenuSlot, constraints: Constraints) -> Option<Size> {
        self(slot, constraints)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Where the block is anchored, usually the decoy end rect.
    pub target: Rect,
    /// Screen bounds minus safe area and padding.
    pub bounds: Rect,
    pub location: MenuLocation,
    pub orientation: Orientation,
    /// Gap between the preview, the sheet and the top widget.
    pub spacing: f32,
    pub has_top_widget: bool,
    /// Width cap for the action sheet.
    pub actions_max_width: f32,
}

/// Settled rects of every slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MenuLayout {
    pub preview: Rect,
    pub actions: Rect,
    pub top_widget: Option<Rect>,
    /// Widest measured element; edges are aligned against it.
    pub max_width: f32,
}

impl MenuLayout {
    pub fn rect(&self, slot: MenuSlot) -> Option<Rect> {
        match slot {
            MenuSlot::TopWidget => self.top_widget,
            MenuSlot::Preview => Some(self.preview),
            MenuSlot::Actions => Some(self.actions),
        }
    }

    /// Smallest rect containing every element.
    pub fn bounding_rect(&self) -> Rect {
        let mut left = self.preview.left().min(self.actions.left());
        let mut top = self.preview.top().min(self.actions.top());
        let mut right = self.preview.right().max(self.actions.right());
        let mut bottom = self.preview.bottom().max(self.actions.bottom());
        if let Some(top_widget) = self.top_widget {
            left = left.min(top_widget.left());
            top = top.min(top_widget.top());
            right = right.max(top_widget.right());
            bottom = bottom.max(top_widget.bottom());
        }
        Rect::new(left, top, right - left, bottom - top)
    }
}

pub fn layout_aligned_children(
    params: &LayoutParams,
    measurer: &mut impl SlotMeasurer,
) -> Result<MenuLayout, LayoutError> {
    let bounds = params.bounds;
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return Err(LayoutError::EmptyBounds {
            width: bounds.width,
            height: bounds.height,
        });
    }
    let spacing = params.spacing.max(0.0);
    let landscape = params.orientation.is_landscape();

    // 1. Top widget reserves its height for everything below it.
    let top_size = if params.has_top_widget {
        let size = measurer.measure(
            MenuSlot::TopWidget,
            Constraints::loose(bounds.width, bounds.height),
        );
        if size.is_none() {
            log::warn!("top widget is not mounted, laying out without it");
        }
        size
    } else {
        None
    };
    let reserved = top_size.map_or(0.0, |size| size.height + spacing);
    let available_height = (bounds.height - reserved).max(0.0);

    // 2. Preview.
    let sheet_cap = params.actions_max_width.min(bounds.width);
    let preview_max_width = if landscape {
        bounds.width - sheet_cap.min(bounds.width / 2.0) - spacing
    } else {
        bounds.width
    };
    let preview = measurer
        .measure(
            MenuSlot::Preview,
            Constraints::loose(preview_max_width, available_height),
        )
        .ok_or(LayoutError::Unmeasured(MenuSlot::Preview))?;

    // 3 + 4. Action sheet: under the preview or beside it.
    let (sheet_max_width, sheet_max_height) = if landscape {
        (
            (bounds.width - preview.width - spacing).min(sheet_cap),
            available_height,
        )
    } else {
        (sheet_cap, available_height - preview.height - spacing)
    };
    let actions = measurer
        .measure(
            MenuSlot::Actions,
            Constraints::loose(sheet_max_width, sheet_max_height),
        )
        .ok_or(LayoutError::Unmeasured(MenuSlot::Actions))?;

    // 5. Shared width for edge alignment.
    let max_width = preview
        .width
        .max(actions.width)
        .max(top_size.map_or(0.0, |size| size.width));

    // 6. Anchor the block, then clamp it on screen.
    let row_width = preview.width + spacing + actions.width;
    let block = if landscape {
        // A top widget wider than the row widens the whole block.
        Size::new(
            row_width.max(top_size.map_or(0.0, |size| size.width)),
            reserved + preview.height.max(actions.height),
        )
    } else {
        Size::new(
            max_width,
            reserved + preview.height + spacing + actions.height,
        )
    };
    let target = params.target;
    let anchor_x = match params.location {
        MenuLocation::Center if landscape => bounds.center().x - block.width / 2.0,
        MenuLocation::Center => target.center().x - block.width / 2.0,
        MenuLocation::Left => target.left(),
        MenuLocation::Right => target.right() - block.width,
    };
    let anchor_y = if landscape {
        bounds.center().y - block.height / 2.0
    } else {
        target.center().y - preview.height / 2.0 - reserved
    };
    let x = clamp_start(anchor_x, block.width, bounds.left(), bounds.right());
    let y = clamp_start(anchor_y, block.height, bounds.top(), bounds.bottom());

    // 7. Place every element inside the block.
    let layout = if landscape {
        let sheet_first = params.location == MenuLocation::Right;
        let row_x = align_in(params.location, x, block.width, row_width);
        let (preview_x, actions_x) = if sheet_first {
            (row_x + actions.width + spacing, row_x)
        } else {
            (row_x, row_x + preview.width + spacing)
        };
        let row_top = y + reserved;
        MenuLayout {
            preview: Rect::new(preview_x, row_top, preview.width, preview.height),
            actions: Rect::new(actions_x, row_top, actions.width, actions.height),
            top_widget: top_size.map(|size| {
                let top_x = align_in(params.location, x, block.width, size.width);
                Rect::new(top_x, y, size.width, size.height)
            }),
            max_width,
        }
    } else {
        let preview_top = y + reserved;
        let preview_rect = Rect::new(
            align_in(params.location, x, max_width, preview.width),
            preview_top,
            preview.width,
            preview.height,
        );
        MenuLayout {
            preview: preview_rect,
            actions: Rect::new(
                align_in(params.location, x, max_width, actions.width),
                preview_rect.bottom() + spacing,
                actions.width,
                actions.height,
            ),
            top_widget: top_size.map(|size| {
                Rect::new(
                    align_in(params.location, x, max_width, size.width),
                    y,
                    size.width,
                    size.height,
                )
            }),
            max_width,
        }
    };
    log::trace!("aligned layout {:?}", layout);
    Ok(layout)
}

/// Clamps the start of a `length`-long span into `[min, max]`. When the span
/// is longer than the range it starts at `min`.
fn clamp_start(start: f32, length: f32, min: f32, max: f32) -> f32 {
    start.clamp(min, min.max(max - length))
}

/// Offset of an element of `width` inside a column of `column_width`
/// starting at `column_x`.
fn align_in(location: MenuLocation, column_x: f32, column_width: f32, width: f32) -> f32 {
    match location {
        MenuLocation::Center => column_x + (column_width - width) / 2.0,
        MenuLocation::Left => column_x,
        MenuLocation::Right => column_x + column_width - width,
    }
}

#[cfg(test)]
#[path = "tests/aligned_tests.rs"]
mod tests;
