//! Shared gesture thresholds, in logical pixels.

/// Movement a long press tolerates before it stops being a tap.
///
/// Deliberately larger than [`DRAG_THRESHOLD`]: a finger resting on a
/// preview for most of a second drifts more than one that taps.
pub const TAP_SLOP: f32 = 18.0;

/// Distance the pointer must travel from the press position before a pan
/// starts.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Release speed, in logical pixels per second, above which a pan release
/// counts as a fling.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
