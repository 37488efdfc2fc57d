//! Pure math/data for drawing in Peekmenu
//!
//! Geometry primitives, colours and shadows shared by the layout,
//! animation and menu crates.

mod color;
mod geometry;
mod shadow;

pub use color::*;
pub use geometry::*;
pub use shadow::*;

pub mod prelude {
    pub use crate::color::{Brightness, Color, DynamicColor};
    pub use crate::geometry::{CornerRadii, EdgeInsets, GraphicsLayer, Point, Rect, Size};
    pub use crate::shadow::BoxShadow;
}
