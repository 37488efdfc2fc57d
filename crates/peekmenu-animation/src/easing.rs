//! Easing curves.
//!
//! Every curve maps 0.0 to 0.0 and 1.0 to 1.0; the "back" and elastic
//! curves overshoot in between.

use std::f32::consts::PI;

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Ease in using cubic curve.
    EaseIn,
    /// Ease out using cubic curve.
    EaseOut,
    /// Ease in and out using cubic curve.
    EaseInOut,
    /// Fast out, slow in (material design standard).
    FastOutSlowInEasing,
    /// Gentle deceleration, used by the decoy grow segment.
    EaseOutSine,
    /// Steep deceleration.
    EaseOutCubic,
    /// Symmetric cubic acceleration and deceleration.
    EaseInOutCubic,
    /// Decelerates past the target, then settles back onto it.
    EaseOutBack,
    /// Pulls back below the start before accelerating to the target.
    EaseInBack,
    /// Oscillates with growing amplitude before snapping to the target.
    ElasticIn,
    /// Linear between `begin` and `end`, flat at 0.0 before and 1.0 after.
    Interval { begin: f32, end: f32 },
}

/// Oscillation period for [`Easing::ElasticIn`].
const ELASTIC_PERIOD: f32 = 0.4;

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::EaseOutSine => cubic_bezier(0.39, 0.575, 0.565, 1.0, fraction),
            Easing::EaseOutCubic => cubic_bezier(0.215, 0.61, 0.355, 1.0, fraction),
            Easing::EaseInOutCubic => cubic_bezier(0.645, 0.045, 0.355, 1.0, fraction),
            Easing::EaseOutBack => cubic_bezier(0.175, 0.885, 0.32, 1.275, fraction),
            Easing::EaseInBack => cubic_bezier(0.6, -0.28, 0.735, 0.045, fraction),
            Easing::ElasticIn => elastic_in(fraction),
            Easing::Interval { begin, end } => interval(*begin, *end, fraction),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::LinearEasing
    }
}

fn elastic_in(fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }
    let s = ELASTIC_PERIOD / 4.0;
    let t = fraction - 1.0;
    -(2.0f32.powf(10.0 * t)) * ((t - s) * (PI * 2.0) / ELASTIC_PERIOD).sin()
}

fn interval(begin: f32, end: f32, fraction: f32) -> f32 {
    if fraction <= begin {
        return 0.0;
    }
    if fraction >= end {
        return 1.0;
    }
    ((fraction - begin) / (end - begin)).clamp(0.0, 1.0)
}

/// Cubic bezier curve approximation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson on x(t) = fraction, clamped to [0, 1].
    let mut t = fraction;
    let mut newton_success = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            newton_success = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !newton_success {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let x = sample_curve(ax, bx, cx, t);
            let delta = x - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}
