//! Menu configuration, defaults and the open-fraction timeline boundary.

use crate::MenuError;
use peekmenu_animation::Easing;
use peekmenu_foundation::gesture_constants::MIN_FLING_VELOCITY;
use peekmenu_ui_graphics::{BoxShadow, Color, CornerRadii, DynamicColor};
use peekmenu_ui_layout::MenuLocation;
use std::fmt;
use std::rc::Rc;

pub const DEFAULT_PREVIEW_LONG_PRESS_TIMEOUT_MILLIS: u64 = 800;
pub const DEFAULT_MODAL_TRANSITION_MILLIS: u64 = 335;
/// Preview corner radius is its shortest side divided by this.
pub const DEFAULT_PREVIEW_BORDER_RADIUS_RATIO: f32 = 12.0;
pub const DEFAULT_END_BOX_SHADOW: BoxShadow =
    BoxShadow::new(Color::from_argb_u32(0x3300_0000), 10.0, 0.5);
pub const DEFAULT_BARRIER_COLOR: Color = Color::from_argb_u32(0x3304_040F);
pub const DEFAULT_ACTIONS_BACKGROUND: DynamicColor = DynamicColor::new(
    Color::from_argb_u32(0xFFF1_F1F1),
    Color::from_argb_u32(0xFF21_2122),
);
pub const DEFAULT_ACTIONS_BORDER_RADIUS: f32 = 13.0;
pub const DEFAULT_BACKDROP_BLUR_SIGMA: f32 = 5.0;
/// Largest factor the decoy and preview grow to.
pub const OPEN_SCALE: f32 = 1.15;
/// Smallest factor a child is shrunk to when it does not fit on screen.
pub const MIN_SCALE_FACTOR: f32 = 0.5;
pub const ACTION_ROW_HEIGHT: f32 = 56.0;
pub const ACTIONS_MAX_WIDTH: f32 = 250.0;
pub const DEFAULT_EDGE_PADDING: f32 = 10.0;
pub const DEFAULT_LAYOUT_SPACING: f32 = 16.0;

/// Boundary between the press phase and the route transition on the
/// whole-menu timeline: `hold / (hold + transition)`.
pub fn open_fraction(hold_millis: u64, transition_millis: u64) -> f32 {
    let total = hold_millis as f64 + transition_millis as f64;
    if total == 0.0 {
        return 0.0;
    }
    (hold_millis as f64 / total) as f32
}

/// Paint parameters for the decoy and the preview.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PreviewPaint {
    pub corner_radii: CornerRadii,
    pub shadow: BoxShadow,
    pub alpha: f32,
}

impl Default for PreviewPaint {
    fn default() -> Self {
        Self {
            corner_radii: CornerRadii::ZERO,
            shadow: BoxShadow::NONE,
            alpha: 1.0,
        }
    }
}

/// Maps whole-menu progress in `[0, 1]` to preview paint.
pub type PreviewBuilder = Rc<dyn Fn(f32) -> PreviewPaint>;

/// What the decoy and the preview show.
#[derive(Clone, Default)]
pub enum PreviewSource {
    /// The pressed child itself, with the built-in shadow and radius.
    #[default]
    Child,
    /// Paint computed from the whole-menu progress.
    Builder(PreviewBuilder),
}

impl PreviewSource {
    pub fn builder(builder: impl Fn(f32) -> PreviewPaint + 'static) -> Self {
        PreviewSource::Builder(Rc::new(builder))
    }
}

impl fmt::Debug for PreviewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewSource::Child => f.write_str("Child"),
            PreviewSource::Builder(_) => f.write_str("Builder(..)"),
        }
    }
}

/// One row of the action sheet.
#[derive(Clone)]
pub struct ContextMenuAction {
    pub label: String,
    pub icon: Option<String>,
    pub is_default: bool,
    pub is_destructive: bool,
    pub on_pressed: Option<Rc<dyn Fn()>>,
}

impl ContextMenuAction {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
            is_default: false,
            is_destructive: false,
            on_pressed: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn default_action(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn destructive(mut self) -> Self {
        self.is_destructive = true;
        self
    }

    pub fn on_pressed(mut self, handler: impl Fn() + 'static) -> Self {
        self.on_pressed = Some(Rc::new(handler));
        self
    }
}

impl fmt::Debug for ContextMenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMenuAction")
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("is_default", &self.is_default)
            .field("is_destructive", &self.is_destructive)
            .field("on_pressed", &self.on_pressed.is_some())
            .finish()
    }
}

/// Tuning for drag-to-dismiss on the open menu.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConfig {
    /// Scale at which a release dismisses.
    pub min_scale: f32,
    /// Scale below which the sheet and top widget hide.
    pub sheet_scale_threshold: f32,
    /// Largest horizontal offset.
    pub padding: f32,
    /// Divisor applied to horizontal and upward movement.
    pub damping: f32,
    pub max_drag_distance: f32,
    pub move_duration_millis: u64,
    pub fling_duration_millis: u64,
    /// How far past the release point a fling away travels.
    pub fling_overshoot: f32,
    pub sheet_hide_millis: u64,
    pub sheet_show_millis: u64,
    pub min_fling_velocity: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.8,
            sheet_scale_threshold: 0.9,
            padding: 20.0,
            damping: 400.0,
            max_drag_distance: 80.0,
            move_duration_millis: 600,
            fling_duration_millis: 64,
            fling_overshoot: 100.0,
            sheet_hide_millis: 100,
            sheet_show_millis: 300,
            min_fling_velocity: MIN_FLING_VELOCITY,
        }
    }
}

impl DragConfig {
    fn validate(&self) -> Result<(), MenuError> {
        let invalid = |name: &'static str, value: f32| Err(MenuError::InvalidDrag { name, value });
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0) {
            return invalid("min_scale", self.min_scale);
        }
        if !(self.sheet_scale_threshold >= self.min_scale && self.sheet_scale_threshold <= 1.0) {
            return invalid("sheet_scale_threshold", self.sheet_scale_threshold);
        }
        if !(self.max_drag_distance > 0.0) {
            return invalid("max_drag_distance", self.max_drag_distance);
        }
        if !(self.damping > 0.0) {
            return invalid("damping", self.damping);
        }
        if !(self.padding >= 0.0) {
            return invalid("padding", self.padding);
        }
        if !(self.min_fling_velocity >= 0.0) {
            return invalid("min_fling_velocity", self.min_fling_velocity);
        }
        for (name, millis) in [
            ("move_duration_millis", self.move_duration_millis),
            ("fling_duration_millis", self.fling_duration_millis),
            ("sheet_hide_millis", self.sheet_hide_millis),
            ("sheet_show_millis", self.sheet_show_millis),
        ] {
            if millis == 0 {
                return Err(MenuError::ZeroDuration { name });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct MenuConfig {
    pub actions: Vec<ContextMenuAction>,
    pub enable_haptic_feedback: bool,
    pub backdrop_blur_sigma: f32,
    pub blur_curve: Easing,
    pub blur_reverse_curve: Easing,
    pub barrier_color: Color,
    pub modal_transition_duration_millis: u64,
    pub reverse_transition_duration_millis: u64,
    pub actions_background_color: DynamicColor,
    pub actions_border_radius: f32,
    /// Whether the host mounts a widget above the preview.
    pub top_widget: bool,
    /// Overrides location inference.
    pub location: Option<MenuLocation>,
    pub show_grow_animation: bool,
    pub preview_long_press_timeout_millis: u64,
    pub preview: PreviewSource,
    pub drag: DragConfig,
    pub open_scale: f32,
    pub min_scale_factor: f32,
    pub edge_padding: f32,
    pub layout_spacing: f32,
    /// Close the menu after a row's handler ran.
    pub dismiss_on_action: bool,
}

impl MenuConfig {
    pub fn builder() -> MenuConfigBuilder {
        MenuConfigBuilder::default()
    }

    pub fn open_fraction(&self) -> f32 {
        open_fraction(
            self.preview_long_press_timeout_millis,
            self.modal_transition_duration_millis,
        )
    }

    pub fn validate(&self) -> Result<(), MenuError> {
        if self.actions.is_empty() {
            return Err(MenuError::NoActions);
        }
        for (name, millis) in [
            (
                "preview_long_press_timeout_millis",
                self.preview_long_press_timeout_millis,
            ),
            (
                "modal_transition_duration_millis",
                self.modal_transition_duration_millis,
            ),
            (
                "reverse_transition_duration_millis",
                self.reverse_transition_duration_millis,
            ),
        ] {
            if millis == 0 {
                return Err(MenuError::ZeroDuration { name });
            }
        }
        if !(self.backdrop_blur_sigma >= 0.0) {
            return Err(MenuError::NegativeBlurSigma(self.backdrop_blur_sigma));
        }
        if !(self.min_scale_factor > 0.0 && self.min_scale_factor <= self.open_scale) {
            return Err(MenuError::InvalidScaleBounds {
                min: self.min_scale_factor,
                open: self.open_scale,
            });
        }
        for (name, value) in [
            ("actions_border_radius", self.actions_border_radius),
            ("edge_padding", self.edge_padding),
            ("layout_spacing", self.layout_spacing),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(MenuError::InvalidLength { name, value });
            }
        }
        self.drag.validate()
    }
}

pub struct MenuConfigBuilder {
    config: MenuConfig,
}

impl Default for MenuConfigBuilder {
    fn default() -> Self {
        Self {
            config: MenuConfig {
                actions: Vec::new(),
                enable_haptic_feedback: false,
                backdrop_blur_sigma: DEFAULT_BACKDROP_BLUR_SIGMA,
                blur_curve: Easing::EaseOut,
                blur_reverse_curve: Easing::EaseIn,
                barrier_color: DEFAULT_BARRIER_COLOR,
                modal_transition_duration_millis: DEFAULT_MODAL_TRANSITION_MILLIS,
                reverse_transition_duration_millis: DEFAULT_MODAL_TRANSITION_MILLIS,
                actions_background_color: DEFAULT_ACTIONS_BACKGROUND,
                actions_border_radius: DEFAULT_ACTIONS_BORDER_RADIUS,
                top_widget: false,
                location: None,
                show_grow_animation: true,
                preview_long_press_timeout_millis: DEFAULT_PREVIEW_LONG_PRESS_TIMEOUT_MILLIS,
                preview: PreviewSource::Child,
                drag: DragConfig::default(),
                open_scale: OPEN_SCALE,
                min_scale_factor: MIN_SCALE_FACTOR,
                edge_padding: DEFAULT_EDGE_PADDING,
                layout_spacing: DEFAULT_LAYOUT_SPACING,
                dismiss_on_action: true,
            },
        }
    }
}

impl MenuConfigBuilder {
    pub fn action(mut self, action: ContextMenuAction) -> Self {
        self.config.actions.push(action);
        self
    }

    pub fn actions(mut self, actions: impl IntoIterator<Item = ContextMenuAction>) -> Self {
        self.config.actions.extend(actions);
        self
    }

    pub fn enable_haptic_feedback(mut self, enabled: bool) -> Self {
        self.config.enable_haptic_feedback = enabled;
        self
    }

    pub fn backdrop_blur_sigma(mut self, sigma: f32) -> Self {
        self.config.backdrop_blur_sigma = sigma;
        self
    }

    pub fn blur_curve(mut self, curve: Easing) -> Self {
        self.config.blur_curve = curve;
        self
    }

    pub fn blur_reverse_curve(mut self, curve: Easing) -> Self {
        self.config.blur_reverse_curve = curve;
        self
    }

    pub fn barrier_color(mut self, color: Color) -> Self {
        self.config.barrier_color = color;
        self
    }

    pub fn modal_transition_duration_millis(mut self, millis: u64) -> Self {
        self.config.modal_transition_duration_millis = millis;
        self
    }

    pub fn reverse_transition_duration_millis(mut self, millis: u64) -> Self {
        self.config.reverse_transition_duration_millis = millis;
        self
    }

    pub fn actions_background_color(mut self, color: impl Into<DynamicColor>) -> Self {
        self.config.actions_background_color = color.into();
        self
    }

    pub fn actions_border_radius(mut self, radius: f32) -> Self {
        self.config.actions_border_radius = radius;
        self
    }

    pub fn top_widget(mut self, present: bool) -> Self {
        self.config.top_widget = present;
        self
    }

    pub fn location(mut self, location: MenuLocation) -> Self {
        self.config.location = Some(location);
        self
    }

    pub fn show_grow_animation(mut self, show: bool) -> Self {
        self.config.show_grow_animation = show;
        self
    }

    pub fn preview_long_press_timeout_millis(mut self, millis: u64) -> Self {
        self.config.preview_long_press_timeout_millis = millis;
        self
    }

    pub fn preview(mut self, source: PreviewSource) -> Self {
        self.config.preview = source;
        self
    }

    pub fn drag(mut self, drag: DragConfig) -> Self {
        self.config.drag = drag;
        self
    }

    pub fn open_scale(mut self, scale: f32) -> Self {
        self.config.open_scale = scale;
        self
    }

    pub fn min_scale_factor(mut self, scale: f32) -> Self {
        self.config.min_scale_factor = scale;
        self
    }

    pub fn edge_padding(mut self, padding: f32) -> Self {
        self.config.edge_padding = padding;
        self
    }

    pub fn layout_spacing(mut self, spacing: f32) -> Self {
        self.config.layout_spacing = spacing;
        self
    }

    pub fn dismiss_on_action(mut self, dismiss: bool) -> Self {
        self.config.dismiss_on_action = dismiss;
        self
    }

    pub fn build(self) -> Result<MenuConfig, MenuError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
