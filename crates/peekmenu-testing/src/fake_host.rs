use std::cell::{Cell, RefCell};

use peekmenu::{ChildDecoration, MenuHost, Viewport};
use peekmenu_ui_graphics::{Rect, Size};
use peekmenu_ui_layout::{Constraints, MenuSlot};

/// In-memory [`MenuHost`] with configurable geometry that records what the
/// menu asked of it.
#[derive(Debug)]
pub struct FakeHost {
    viewport: Cell<Viewport>,
    child: Cell<Option<Rect>>,
    decoration: Cell<ChildDecoration>,
    preview: Cell<Option<Size>>,
    top_widget: Cell<Option<Size>>,
    haptics: Cell<usize>,
    measurements: RefCell<Vec<(MenuSlot, Constraints)>>,
}

impl FakeHost {
    pub const DEFAULT_VIEWPORT: Size = Size::new(400.0, 800.0);
    pub const DEFAULT_CHILD: Rect = Rect::new(150.0, 300.0, 100.0, 100.0);
    /// The default child grown by the open scale.
    pub const DEFAULT_PREVIEW: Size = Size::new(115.0, 115.0);

    pub fn new() -> Self {
        Self {
            viewport: Cell::new(Viewport::new(Self::DEFAULT_VIEWPORT)),
            child: Cell::new(Some(Self::DEFAULT_CHILD)),
            decoration: Cell::new(ChildDecoration::None),
            preview: Cell::new(Some(Self::DEFAULT_PREVIEW)),
            top_widget: Cell::new(None),
            haptics: Cell::new(0),
            measurements: RefCell::new(Vec::new()),
        }
    }

    pub fn with_viewport(self, viewport: Viewport) -> Self {
        self.viewport.set(viewport);
        self
    }

    pub fn with_child(self, child: Option<Rect>) -> Self {
        self.child.set(child);
        self
    }

    pub fn with_decoration(self, decoration: ChildDecoration) -> Self {
        self.decoration.set(decoration);
        self
    }

    pub fn with_preview(self, preview: Option<Size>) -> Self {
        self.preview.set(preview);
        self
    }

    pub fn with_top_widget(self, top_widget: Option<Size>) -> Self {
        self.top_widget.set(top_widget);
        self
    }

    pub fn set_viewport(&self, viewport: Viewport) {
        self.viewport.set(viewport);
    }

    pub fn set_child(&self, child: Option<Rect>) {
        self.child.set(child);
    }

    pub fn set_preview(&self, preview: Option<Size>) {
        self.preview.set(preview);
    }

    pub fn haptic_count(&self) -> usize {
        self.haptics.get()
    }

    /// Every measurement request so far, oldest first.
    pub fn measurements(&self) -> Vec<(MenuSlot, Constraints)> {
        self.measurements.borrow().clone()
    }

    pub fn clear_measurements(&self) {
        self.measurements.borrow_mut().clear();
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuHost for FakeHost {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn child_rect(&self) -> Option<Rect> {
        self.child.get()
    }

    fn child_decoration(&self) -> ChildDecoration {
        self.decoration.get()
    }

    fn measure(&self, slot: MenuSlot, constraints: Constraints) -> Option<Size> {
        self.measurements.borrow_mut().push((slot, constraints));
        let size = match slot {
            MenuSlot::Preview => self.preview.get(),
            MenuSlot::TopWidget => self.top_widget.get(),
            MenuSlot::Actions => None,
        };
        size.map(|size| constraints.constrain(size))
    }

    fn haptic_feedback(&self) {
        self.haptics.set(self.haptics.get() + 1);
    }
}
