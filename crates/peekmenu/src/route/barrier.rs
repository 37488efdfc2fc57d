//! Dimming and backdrop blur behind the open menu.

use peekmenu_animation::{Easing, Lerp};
use peekmenu_ui_graphics::Color;

use crate::scene::BarrierFrame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Barrier {
    pub color: Color,
    pub blur_sigma: f32,
    pub curve: Easing,
    pub reverse_curve: Easing,
}

impl Barrier {
    /// The colour follows progress linearly; the blur follows the curve of
    /// the current direction.
    pub fn frame(&self, progress: f32, reversing: bool) -> BarrierFrame {
        let progress = progress.clamp(0.0, 1.0);
        let curve = if reversing {
            self.reverse_curve
        } else {
            self.curve
        };
        BarrierFrame {
            color: Color::TRANSPARENT.lerp(&self.color, progress),
            blur_sigma: (self.blur_sigma * curve.transform(progress)).max(0.0),
        }
    }

    pub fn settled(&self) -> BarrierFrame {
        BarrierFrame {
            color: self.color,
            blur_sigma: self.blur_sigma,
        }
    }
}
