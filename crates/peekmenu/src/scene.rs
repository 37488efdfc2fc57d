//! Per-frame output: everything the host paints for the menu.

use crate::config::PreviewPaint;
use peekmenu_ui_graphics::{BoxShadow, Color, CornerRadii, GraphicsLayer, Rect};
use peekmenu_ui_layout::MenuSlot;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecoyFrame {
    pub rect: Rect,
    pub corner_radii: CornerRadii,
    pub shadow: BoxShadow,
    /// Builder-mode paint; `None` for [`PreviewSource::Child`](crate::PreviewSource::Child).
    pub paint: Option<PreviewPaint>,
}

/// An absolutely positioned route element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionedElement {
    pub key: MenuSlot,
    pub rect: Rect,
    pub layer: GraphicsLayer,
}

pub type Elements = SmallVec<[PositionedElement; 4]>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierFrame {
    pub color: Color,
    pub blur_sigma: f32,
}

impl BarrierFrame {
    pub const CLEAR: BarrierFrame = BarrierFrame {
        color: Color::TRANSPARENT,
        blur_sigma: 0.0,
    };
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionRowFrame {
    pub index: usize,
    pub rect: Rect,
    pub label: String,
    pub is_default: bool,
    pub is_destructive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollbarFrame {
    pub thumb: Rect,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActionSheetFrame {
    pub background: Color,
    pub corner_radius: f32,
    pub scroll_offset: f32,
    /// Rows visible through the sheet, in viewport coordinates.
    pub rows: Vec<ActionRowFrame>,
    pub scrollbar: Option<ScrollbarFrame>,
}

/// The route's contribution to a frame. Exactly one variant is published
/// while the route lives.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteScene {
    /// Laid out for measurement; not visible.
    Offstage { elements: Elements },
    Transition {
        barrier: BarrierFrame,
        elements: Elements,
        preview_paint: PreviewPaint,
        actions: ActionSheetFrame,
    },
    Settled {
        barrier: BarrierFrame,
        elements: Elements,
        preview_paint: PreviewPaint,
        actions: ActionSheetFrame,
    },
}

impl RouteScene {
    pub fn elements(&self) -> &Elements {
        match self {
            RouteScene::Offstage { elements }
            | RouteScene::Transition { elements, .. }
            | RouteScene::Settled { elements, .. } => elements,
        }
    }

    pub fn element(&self, key: MenuSlot) -> Option<&PositionedElement> {
        self.elements().iter().find(|element| element.key == key)
    }

    pub fn barrier(&self) -> Option<BarrierFrame> {
        match self {
            RouteScene::Offstage { .. } => None,
            RouteScene::Transition { barrier, .. } | RouteScene::Settled { barrier, .. } => {
                Some(*barrier)
            }
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, RouteScene::Settled { .. })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MenuScene {
    /// The child is covered by the decoy or the route.
    pub child_hidden: bool,
    pub decoy: Option<DecoyFrame>,
    pub route: Option<RouteScene>,
    /// Whole-menu progress in `[0, 1]`.
    pub progress: f32,
}
