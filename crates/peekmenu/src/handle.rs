//! Programmatic open/close.

use std::rc::Weak;

use peekmenu_core::{MutableState, State};

use crate::menu::{request, HandleCommand, MenuShared};

/// Opens and closes a [`ContextMenu`](crate::ContextMenu) from code.
///
/// Commands are applied at the start of the next frame. Opening an open menu
/// and closing a closed one do nothing. A handle outliving its menu is inert.
#[derive(Clone)]
pub struct MenuHandle {
    shared: Weak<MenuShared>,
    is_open: MutableState<bool>,
}

impl MenuHandle {
    pub(crate) fn new(shared: Weak<MenuShared>, is_open: MutableState<bool>) -> Self {
        Self { shared, is_open }
    }

    pub fn open(&self) {
        self.send(HandleCommand::Open);
    }

    pub fn close(&self) {
        self.send(HandleCommand::Close);
    }

    pub fn is_open(&self) -> bool {
        self.is_open.get()
    }

    pub fn open_state(&self) -> State<bool> {
        self.is_open.as_state()
    }

    /// True while the menu this handle controls still exists.
    pub fn is_attached(&self) -> bool {
        self.shared.strong_count() > 0
    }

    fn send(&self, command: HandleCommand) {
        match self.shared.upgrade() {
            Some(shared) => request(&shared, command),
            None => log::debug!("{command:?} sent to a dropped menu"),
        }
    }
}

impl std::fmt::Debug for MenuHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuHandle")
            .field("attached", &self.is_attached())
            .field("is_open", &self.is_open())
            .finish()
    }
}
