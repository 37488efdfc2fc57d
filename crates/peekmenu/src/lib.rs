//! Long-press context menu for Peekmenu
//!
//! Press and hold a child to grow it into a floating decoy; past the hold
//! duration it expands into a full-screen route with a preview, an action
//! sheet and an optional top widget. The settled menu can be dragged away,
//! tapped outside of, or closed from an action.
//!
//! The crate is headless. A host implements [`MenuHost`], forwards pointer
//! events to [`ContextMenu::on_pointer_event`], drives a
//! [`Runtime`](peekmenu_core::Runtime) and paints the [`MenuScene`] returned
//! by [`ContextMenu::scene`] every frame.

mod action_sheet;
mod config;
mod decoy;
mod drag;
mod error;
mod handle;
mod host;
mod menu;
mod press;
mod route;
mod scene;

pub use config::*;
pub use drag::{DragOutcome, ExitState};
pub use error::MenuError;
pub use handle::MenuHandle;
pub use host::{ChildDecoration, MenuHost, Viewport};
pub use menu::{ContextMenu, MenuPhase};
pub use route::RoutePhase;
pub use scene::*;

pub use peekmenu_ui_layout::{MenuLocation, MenuSlot, Orientation};

pub mod prelude {
    pub use crate::config::{ContextMenuAction, MenuConfig, PreviewPaint, PreviewSource};
    pub use crate::handle::MenuHandle;
    pub use crate::host::{ChildDecoration, MenuHost, Viewport};
    pub use crate::menu::{ContextMenu, MenuPhase};
    pub use crate::route::RoutePhase;
    pub use crate::scene::{MenuScene, RouteScene};
    pub use peekmenu_ui_layout::{MenuLocation, MenuSlot};
}
