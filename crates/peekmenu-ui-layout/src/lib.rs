//! Layout contracts & policies for Peekmenu
//!
//! Measurement constraints, screen-location classification, safe-area
//! scale factors and the aligned layout that places the preview, the action
//! sheet and the optional top widget relative to each other.

mod aligned;
mod constraints;
mod location;
mod scale;

pub use aligned::*;
pub use constraints::*;
pub use location::*;
pub use scale::*;

pub mod prelude {
    pub use crate::aligned::{
        layout_aligned_children, LayoutError, LayoutParams, MenuLayout, MenuSlot,
    };
    pub use crate::constraints::Constraints;
    pub use crate::location::{infer_location, MenuLocation, Orientation};
    pub use crate::scale::{fit_scale_factor, safe_bounds, scaled_rect_within};
}
