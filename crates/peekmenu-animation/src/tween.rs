//! Tweens: interpolation between two values, optionally curved, and
//! weighted sequences of tweens.

use crate::Easing;
use peekmenu_ui_graphics::{BoxShadow, Color, CornerRadii, Point, Rect, Size};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for Point {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Point::new(self.x.lerp(&target.x, fraction), self.y.lerp(&target.y, fraction))
    }
}

impl Lerp for Size {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Size::new(
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for Rect {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Rect::new(
            self.x.lerp(&target.x, fraction),
            self.y.lerp(&target.y, fraction),
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for Color {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        Color(
            self.0.lerp(&target.0, fraction).clamp(0.0, 1.0),
            self.1.lerp(&target.1, fraction).clamp(0.0, 1.0),
            self.2.lerp(&target.2, fraction).clamp(0.0, 1.0),
            self.3.lerp(&target.3, fraction).clamp(0.0, 1.0),
        )
    }
}

impl Lerp for CornerRadii {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        CornerRadii {
            top_left: self.top_left.lerp(&target.top_left, fraction).max(0.0),
            top_right: self.top_right.lerp(&target.top_right, fraction).max(0.0),
            bottom_right: self.bottom_right.lerp(&target.bottom_right, fraction).max(0.0),
            bottom_left: self.bottom_left.lerp(&target.bottom_left, fraction).max(0.0),
        }
    }
}

impl Lerp for BoxShadow {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        BoxShadow {
            color: self.color.lerp(&target.color, fraction),
            offset: self.offset.lerp(&target.offset, fraction),
            blur_radius: self.blur_radius.lerp(&target.blur_radius, fraction).max(0.0),
            spread_radius: self.spread_radius.lerp(&target.spread_radius, fraction),
        }
    }
}

/// Linear interpolation between `begin` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    pub begin: T,
    pub end: T,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(begin: T, end: T) -> Self {
        Self { begin, end }
    }

    /// A tween that holds a single value.
    pub fn constant(value: T) -> Self {
        Self {
            begin: value.clone(),
            end: value,
        }
    }

    pub fn transform(&self, fraction: f32) -> T {
        if fraction == 0.0 {
            return self.begin.clone();
        }
        if fraction == 1.0 {
            return self.end.clone();
        }
        self.begin.lerp(&self.end, fraction)
    }

    pub fn chain(self, easing: Easing) -> CurveTween<T> {
        CurveTween {
            tween: self,
            easing,
        }
    }
}

/// A tween evaluated through an easing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveTween<T> {
    pub tween: Tween<T>,
    pub easing: Easing,
}

impl<T: Lerp + Clone> CurveTween<T> {
    pub fn transform(&self, fraction: f32) -> T {
        self.tween.transform(self.easing.transform(fraction))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TweenSequenceItem<T> {
    pub tween: CurveTween<T>,
    pub weight: f32,
}

impl<T> TweenSequenceItem<T> {
    pub fn new(tween: CurveTween<T>, weight: f32) -> Self {
        Self { tween, weight }
    }
}

/// Splits `[0, 1]` into consecutive intervals proportional to each item's
/// weight and evaluates the item owning the given fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct TweenSequence<T> {
    items: Vec<TweenSequenceItem<T>>,
    intervals: Vec<(f32, f32)>,
}

impl<T: Lerp + Clone> TweenSequence<T> {
    /// Builds the sequence. Items with a non-positive weight are dropped.
    pub fn new(items: Vec<TweenSequenceItem<T>>) -> Self {
        let items: Vec<_> = items.into_iter().filter(|item| item.weight > 0.0).collect();
        let total: f32 = items.iter().map(|item| item.weight).sum();
        let mut intervals = Vec::with_capacity(items.len());
        let mut start = 0.0f32;
        for item in &items {
            let end = start + item.weight / total;
            intervals.push((start, end));
            start = end;
        }
        Self { items, intervals }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start and end fraction of each item.
    pub fn intervals(&self) -> &[(f32, f32)] {
        &self.intervals
    }

    /// Evaluates the sequence, or `None` when it has no items.
    pub fn transform(&self, fraction: f32) -> Option<T> {
        let last = self.items.last()?;
        let fraction = fraction.clamp(0.0, 1.0);
        if fraction >= 1.0 {
            return Some(last.tween.transform(1.0));
        }
        for (item, (start, end)) in self.items.iter().zip(&self.intervals) {
            if fraction >= *start && fraction < *end {
                let local = (fraction - start) / (end - start);
                return Some(item.tween.transform(local));
            }
        }
        Some(last.tween.transform(1.0))
    }
}

#[cfg(test)]
#[path = "tests/tween_tests.rs"]
mod tests;
