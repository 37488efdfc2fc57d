//! Rect tweens for the route's enter and exit transitions.
//!
//! Every element gets a forward pair (decoy end to settled) and a reverse
//! pair (resting child to settled, or to wherever the drag left it). The
//! pairs are seeded once per open cycle from the route's geometry snapshot.

use indexmap::IndexMap;
use peekmenu_animation::{Easing, Tween};
use peekmenu_ui_graphics::{GraphicsLayer, Point, Rect};
use peekmenu_ui_layout::{MenuLocation, MenuSlot, Orientation};
use rustc_hash::FxBuildHasher;

use crate::drag::ExitState;
use crate::scene::{Elements, PositionedElement};

/// Keys of the per-cycle geometry snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SnapshotKey {
    /// Where the child rests in the page.
    Resting,
    /// Where the decoy finished growing.
    DecoyEnd,
    Settled(MenuSlot),
}

pub(crate) type GeometrySnapshot = IndexMap<SnapshotKey, Rect, FxBuildHasher>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Anchoring {
    pub location: MenuLocation,
    pub orientation: Orientation,
    pub spacing: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ElementTweens {
    forward: Tween<Rect>,
    reverse: Tween<Rect>,
    forward_scale: Tween<f32>,
    reverse_scale: Tween<f32>,
}

pub(crate) struct RouteTransition {
    tweens: IndexMap<MenuSlot, ElementTweens, FxBuildHasher>,
    exit: ExitState,
}

impl RouteTransition {
    /// Seeds tweens for every settled slot in the snapshot; slots that were
    /// not measured are skipped.
    pub fn seed(snapshot: &GeometrySnapshot, anchoring: Anchoring) -> Option<Self> {
        let resting = *snapshot.get(&SnapshotKey::Resting)?;
        let decoy_end = *snapshot.get(&SnapshotKey::DecoyEnd)?;
        let mut tweens = IndexMap::default();
        for slot in MenuSlot::ALL {
            let Some(settled) = snapshot.get(&SnapshotKey::Settled(slot)).copied() else {
                continue;
            };
            let element = match slot {
                MenuSlot::Preview => ElementTweens {
                    forward: Tween::new(decoy_end, settled),
                    reverse: Tween::new(resting, settled),
                    forward_scale: Tween::constant(1.0),
                    reverse_scale: Tween::constant(1.0),
                },
                MenuSlot::Actions => ElementTweens {
                    forward: Tween::new(sheet_origin(decoy_end, settled, anchoring), settled),
                    reverse: Tween::new(sheet_origin(resting, settled, anchoring), settled),
                    forward_scale: Tween::new(0.0, 1.0),
                    reverse_scale: Tween::new(0.0, 1.0),
                },
                MenuSlot::TopWidget => ElementTweens {
                    forward: Tween::new(top_widget_origin(decoy_end, settled, anchoring), settled),
                    reverse: Tween::new(top_widget_origin(resting, settled, anchoring), settled),
                    forward_scale: Tween::new(0.0, 1.0),
                    reverse_scale: Tween::new(0.0, 1.0),
                },
            };
            tweens.insert(slot, element);
        }
        Some(Self {
            tweens,
            exit: ExitState::REST,
        })
    }

    pub fn has(&self, slot: MenuSlot) -> bool {
        self.tweens.contains_key(&slot)
    }

    pub fn exit(&self) -> ExitState {
        self.exit
    }

    /// Points the reverse tweens at the dismissed state so the exit starts
    /// where the drag left the menu.
    pub fn set_exit(&mut self, exit: ExitState) {
        self.exit = exit;
        for (slot, element) in self.tweens.iter_mut() {
            let settled = element.forward.end;
            match slot {
                MenuSlot::Preview => {
                    element.reverse.end = settled.scale_about_center(exit.scale).shift(exit.offset);
                }
                MenuSlot::Actions | MenuSlot::TopWidget => {
                    element.reverse.end = settled.shift(exit.offset);
                    element.reverse_scale.end = exit.sheet_opacity;
                }
            }
        }
    }

    pub fn elements(&self, progress: f32, reversing: bool) -> Elements {
        let curved = if reversing {
            Easing::EaseInBack.transform(progress)
        } else {
            Easing::EaseOutBack.transform(progress)
        };
        self.tweens
            .iter()
            .map(|(slot, element)| {
                let (rect, scale) = if reversing {
                    (
                        element.reverse.transform(curved),
                        element.reverse_scale.transform(curved),
                    )
                } else {
                    (
                        element.forward.transform(curved),
                        element.forward_scale.transform(curved),
                    )
                };
                let layer = match slot {
                    MenuSlot::Preview => GraphicsLayer::IDENTITY,
                    MenuSlot::Actions | MenuSlot::TopWidget => {
                        let alpha = if reversing {
                            let fade = Easing::Interval {
                                begin: 0.9,
                                end: 1.0,
                            };
                            self.exit.sheet_opacity * fade.transform(progress)
                        } else {
                            progress
                        };
                        GraphicsLayer::IDENTITY
                            .with_alpha(alpha.clamp(0.0, 1.0))
                            .with_scale(scale.max(0.0))
                    }
                };
                PositionedElement {
                    key: *slot,
                    rect: non_negative(rect),
                    layer,
                }
            })
            .collect()
    }
}

/// The sheet grows out of the child: in portrait from its bottom edge, in
/// landscape from its top edge, at the side the location points to.
fn sheet_origin(child: Rect, settled: Rect, anchoring: Anchoring) -> Rect {
    let (child_anchor, own_anchor) = match (anchoring.orientation, anchoring.location) {
        (Orientation::Portrait, MenuLocation::Center) => {
            (child.bottom_center(), settled.top_center())
        }
        (Orientation::Portrait, MenuLocation::Left) => (child.bottom_left(), settled.top_left()),
        (Orientation::Portrait, MenuLocation::Right) => (child.bottom_right(), settled.top_right()),
        (Orientation::Landscape, MenuLocation::Center) => {
            (child.top_center(), settled.top_center())
        }
        (Orientation::Landscape, MenuLocation::Left) => (child.top_left(), settled.top_left()),
        (Orientation::Landscape, MenuLocation::Right) => (child.top_right(), settled.top_right()),
    };
    settled.shift(child_anchor - own_anchor)
}

/// The top widget starts just above the child, aligned like the layout.
fn top_widget_origin(child: Rect, settled: Rect, anchoring: Anchoring) -> Rect {
    let bottom = child.top() - anchoring.spacing;
    let x = match anchoring.location {
        MenuLocation::Center => child.center().x - settled.width / 2.0,
        MenuLocation::Left => child.left(),
        MenuLocation::Right => child.right() - settled.width,
    };
    settled.shift(Point::new(x, bottom - settled.height) - settled.origin())
}

fn non_negative(rect: Rect) -> Rect {
    Rect::new(rect.x, rect.y, rect.width.max(0.0), rect.height.max(0.0))
}

#[cfg(test)]
#[path = "../tests/transition_tests.rs"]
mod tests;
