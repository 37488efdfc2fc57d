//! The floating copy of the child shown while the press is held.

use peekmenu_animation::{CurveTween, Easing, Tween, TweenSequence, TweenSequenceItem};
use peekmenu_ui_graphics::{BoxShadow, CornerRadii, Rect};

use crate::config::{PreviewPaint, DEFAULT_END_BOX_SHADOW};
use crate::host::ChildDecoration;
use crate::scene::DecoyFrame;

pub(crate) struct Decoy {
    rect: TweenSequence<Rect>,
    shadow: CurveTween<BoxShadow>,
    corner_radii: Option<CurveTween<CornerRadii>>,
    end: Rect,
}

impl Decoy {
    /// The grow segment runs from `resting` to `end` and finishes exactly at
    /// the open fraction of `hold_millis` and `transition_millis`.
    pub fn new(
        resting: Rect,
        end: Rect,
        decoration: ChildDecoration,
        hold_millis: u64,
        transition_millis: u64,
        show_grow_animation: bool,
    ) -> Self {
        let end = if show_grow_animation { end } else { resting };
        let hold = hold_millis.max(1) as f32;
        let total = hold + transition_millis as f32;
        let open_fraction = hold / total;
        let rect = TweenSequence::new(vec![
            TweenSequenceItem::new(Tween::constant(resting).chain(Easing::LinearEasing), 1.0),
            TweenSequenceItem::new(Tween::new(resting, end).chain(Easing::EaseOutSine), 5.0),
            TweenSequenceItem::new(
                Tween::constant(end).chain(Easing::LinearEasing),
                6.0 * total / hold - 6.0,
            ),
        ]);
        let fade_in = Easing::Interval {
            begin: 0.0,
            end: open_fraction,
        };
        Self {
            rect,
            shadow: Tween::new(BoxShadow::NONE, DEFAULT_END_BOX_SHADOW).chain(fade_in),
            corner_radii: decoration
                .corner_radii()
                .map(|radii| Tween::new(CornerRadii::ZERO, radii).chain(fade_in)),
            end,
        }
    }

    pub fn end_rect(&self) -> Rect {
        self.end
    }

    /// Evaluates the decoy at a press value in `[0, open_fraction]`.
    pub fn frame(&self, press_value: f32, paint: Option<PreviewPaint>) -> DecoyFrame {
        let rect = self.rect.transform(press_value).unwrap_or(self.end);
        DecoyFrame {
            rect,
            corner_radii: self
                .corner_radii
                .map(|radii| radii.transform(press_value).resolve(rect.width, rect.height))
                .unwrap_or(CornerRadii::ZERO),
            shadow: self.shadow.transform(press_value),
            paint,
        }
    }
}

#[cfg(test)]
#[path = "tests/decoy_tests.rs"]
mod tests;
