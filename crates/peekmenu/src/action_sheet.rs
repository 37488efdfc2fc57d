//! Scrollable list of action rows.

use peekmenu_foundation::{PanEvent, PanGesture, PointerEvent, TapEvent, TapGesture};
use peekmenu_ui_graphics::{Brightness, DynamicColor, Point, Rect, Size};
use peekmenu_ui_layout::Constraints;

use crate::config::{ContextMenuAction, MenuConfig, ACTIONS_MAX_WIDTH, ACTION_ROW_HEIGHT};
use crate::scene::{ActionRowFrame, ActionSheetFrame, ScrollbarFrame};

const SCROLLBAR_THICKNESS: f32 = 3.0;
const SCROLLBAR_INSET: f32 = 2.0;
const MIN_THUMB_EXTENT: f32 = 18.0;

pub(crate) struct ActionSheet {
    actions: Vec<ContextMenuAction>,
    background: DynamicColor,
    corner_radius: f32,
    scroll_offset: f32,
    viewport_height: f32,
    tap: TapGesture,
    pan: PanGesture,
    scrolled: bool,
}

impl ActionSheet {
    pub fn new(config: &MenuConfig) -> Self {
        Self {
            actions: config.actions.clone(),
            background: config.actions_background_color,
            corner_radius: config.actions_border_radius,
            scroll_offset: 0.0,
            viewport_height: 0.0,
            tap: TapGesture::new(),
            pan: PanGesture::new(),
            scrolled: false,
        }
    }

    pub fn actions(&self) -> &[ContextMenuAction] {
        &self.actions
    }

    pub fn content_height(&self) -> f32 {
        self.actions.len() as f32 * ACTION_ROW_HEIGHT
    }

    pub fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(
            ACTIONS_MAX_WIDTH.min(constraints.max_width),
            self.content_height(),
        ))
    }

    /// Records the laid-out height and re-clamps the scroll offset.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(0.0);
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    /// Scrolls by `delta` and returns the distance actually moved.
    pub fn scroll_by(&mut self, delta: f32) -> f32 {
        let previous = self.scroll_offset;
        self.scroll_offset = (previous + delta).clamp(0.0, self.max_scroll());
        self.scroll_offset - previous
    }

    pub fn row_at(&self, sheet: Rect, position: Point) -> Option<usize> {
        if !sheet.contains_point(position) {
            return None;
        }
        let content_y = position.y - sheet.top() + self.scroll_offset;
        let index = (content_y / ACTION_ROW_HEIGHT).floor();
        if index < 0.0 {
            return None;
        }
        let index = index as usize;
        (index < self.actions.len()).then_some(index)
    }

    fn scrollbar(&self, sheet: Rect) -> Option<ScrollbarFrame> {
        let content = self.content_height();
        let viewport = sheet.height;
        if content <= viewport || viewport <= 0.0 {
            return None;
        }
        let extent = (viewport * viewport / content).max(MIN_THUMB_EXTENT).min(viewport);
        let travel = viewport - extent;
        let max_scroll = content - viewport;
        let fraction = (self.scroll_offset / max_scroll).clamp(0.0, 1.0);
        Some(ScrollbarFrame {
            thumb: Rect::new(
                sheet.right() - SCROLLBAR_INSET - SCROLLBAR_THICKNESS,
                sheet.top() + travel * fraction,
                SCROLLBAR_THICKNESS,
                extent,
            ),
        })
    }

    pub fn frame(&self, sheet: Rect, brightness: Brightness) -> ActionSheetFrame {
        let rows = self
            .actions
            .iter()
            .enumerate()
            .filter_map(|(index, action)| {
                let top = sheet.top() + index as f32 * ACTION_ROW_HEIGHT - self.scroll_offset;
                let rect = Rect::new(sheet.left(), top, sheet.width, ACTION_ROW_HEIGHT);
                let visible = rect.bottom() > sheet.top() && rect.top() < sheet.bottom();
                visible.then(|| ActionRowFrame {
                    index,
                    rect,
                    label: action.label.clone(),
                    is_default: action.is_default,
                    is_destructive: action.is_destructive,
                })
            })
            .collect();
        ActionSheetFrame {
            background: self.background.resolve(brightness),
            corner_radius: self.corner_radius,
            scroll_offset: self.scroll_offset,
            rows,
            scrollbar: self.scrollbar(sheet),
        }
    }

    /// Routes a pointer event that started on the sheet. Returns the index of
    /// a pressed row.
    pub fn on_pointer(&mut self, event: &PointerEvent, sheet: Rect) -> Option<usize> {
        for pan in self.pan.on_event(event) {
            match pan {
                PanEvent::Start { .. } => self.scrolled = true,
                PanEvent::Update { delta, .. } => {
                    self.scroll_by(-delta.y);
                }
                PanEvent::End { .. } | PanEvent::Cancel => {}
            }
        }
        let pressed = match self.tap.on_event(event) {
            Some(TapEvent::Up(position)) if !self.scrolled => self.row_at(sheet, position),
            _ => None,
        };
        if !self.pan.is_tracking() {
            self.scrolled = false;
        }
        pressed
    }

    pub fn is_tracking(&self) -> bool {
        self.pan.is_tracking() || self.tap.is_pressed()
    }

    pub fn reset_gestures(&mut self) {
        self.tap.reset();
        self.pan.reset();
        self.scrolled = false;
    }
}

#[cfg(test)]
#[path = "tests/action_sheet_tests.rs"]
mod tests;
