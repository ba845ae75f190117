// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer hit testing for toast buttons.
//!
//! This crate resolves pointer positions against a toolbar's button slots and turns raw
//! pointer events into hover changes and activations. It is decoupled from layout, painting,
//! and whatever the buttons do; slots are plain [`kurbo::Rect`]s in the render surface's local
//! coordinates, and results are slot indices.
//!
//! # Key types
//!
//! - [`hit_test`]: first slot containing a point.
//! - [`HitRouter`]: hover and press state across events, with the [`Cursor`] affordance that
//!   goes with it.
//! - [`press::PressTracker`]: press-to-activate recognition, usable on its own.
//!
//! ```rust
//! use canvas_toast_hit::{Cursor, HitRouter};
//! use canvas_toast_hit::press::PressResult;
//! use kurbo::{Point, Rect};
//!
//! let slots = [
//!     Rect::new(26.0, 26.0, 62.0, 62.0),
//!     Rect::new(68.0, 26.0, 104.0, 62.0),
//! ];
//! let mut router = HitRouter::new();
//!
//! let change = router.on_move(Point::new(80.0, 40.0), &slots);
//! assert_eq!(change.to, Some(1));
//! assert_eq!(router.cursor(), Cursor::Pointer);
//!
//! router.on_down(Point::new(80.0, 40.0), &slots);
//! let result = router.on_up(Point::new(82.0, 41.0), &slots);
//! assert_eq!(result, PressResult::Activate(1));
//! ```
//!
//! Slots are treated as half-open boxes (`x0 <= x < x1`, `y0 <= y < y1`), so slots that
//! share an edge never both claim a point.
//!
//! This crate is `no_std`.

#![no_std]

use kurbo::{Point, Rect};

pub mod press;

use press::{PressResult, PressTracker};

/// Index of the first slot containing `point`.
///
/// `point` must be in the same coordinate space as the slots.
pub fn hit_test(point: Point, slots: &[Rect]) -> Option<usize> {
    slots.iter().position(|slot| slot.contains(point))
}

/// Pointer affordance to display over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cursor {
    /// Regular arrow.
    #[default]
    Default,
    /// Hand cursor over an actionable button.
    Pointer,
}

/// Hover transition produced by a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverChange {
    /// Previously hovered slot.
    pub from: Option<usize>,
    /// Newly hovered slot.
    pub to: Option<usize>,
}

impl HoverChange {
    /// Whether the hovered slot changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Result of a pointer down on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DownResult {
    /// The pointer went down on a slot; the press is now tracked.
    Pressed(usize),
    /// The pointer went down on the surface but not on any slot.
    Missed,
}

/// Hover and press state for one toolbar.
#[derive(Clone, Debug, Default)]
pub struct HitRouter {
    hovered: Option<usize>,
    press: PressTracker<usize>,
}

impl HitRouter {
    /// A router with nothing hovered or pressed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Whether a slot is currently pressed.
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// Cursor matching the current hover.
    pub fn cursor(&self) -> Cursor {
        if self.hovered.is_some() {
            Cursor::Pointer
        } else {
            Cursor::Default
        }
    }

    fn set_hovered(&mut self, to: Option<usize>) -> HoverChange {
        let from = self.hovered;
        self.hovered = to;
        HoverChange { from, to }
    }

    /// Pointer moved to `point`.
    pub fn on_move(&mut self, point: Point, slots: &[Rect]) -> HoverChange {
        self.set_hovered(hit_test(point, slots))
    }

    /// Pointer left the surface; hover is cleared, an active press is kept.
    pub fn on_leave(&mut self) -> HoverChange {
        self.set_hovered(None)
    }

    /// Pointer went down at `point`.
    pub fn on_down(&mut self, point: Point, slots: &[Rect]) -> DownResult {
        self.on_move(point, slots);
        match self.hovered {
            Some(index) => {
                self.press.on_down(index);
                DownResult::Pressed(index)
            }
            None => DownResult::Missed,
        }
    }

    /// Pointer was released at `point`.
    ///
    /// Activates the pressed slot only if it is still the hovered slot.
    pub fn on_up(&mut self, point: Point, slots: &[Rect]) -> PressResult<usize> {
        self.on_move(point, slots);
        self.press.on_up(self.hovered.as_ref())
    }

    /// Drop any active press without activating it.
    pub fn cancel_press(&mut self) -> bool {
        self.press.cancel()
    }

    /// Clear hover and press state.
    pub fn reset(&mut self) {
        self.hovered = None;
        self.press.cancel();
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use canvas_toast_layout::{ToolbarMetrics, layout};
    use kurbo::{Size, Vec2};

    fn slots_for(count: usize, spacing: f64) -> alloc::vec::Vec<Rect> {
        let metrics = ToolbarMetrics {
            button_size: 36.0,
            button_spacing: spacing,
            padding: 6.0,
        };
        layout(
            Rect::new(300.0, 300.0, 380.0, 320.0),
            &metrics,
            count,
            Size::new(1024.0, 768.0),
        )
        .slots
    }

    #[test]
    fn slots_are_disjoint_and_report_their_own_index() {
        for spacing in [0.0, 2.0, 6.0] {
            let slots = slots_for(5, spacing);
            for (i, a) in slots.iter().enumerate() {
                for (j, b) in slots.iter().enumerate() {
                    if i != j {
                        assert!(a.intersect(*b).area() <= 0.0, "{i} and {j} overlap");
                    }
                }
                // Sample the interior, including points right at the leading edges.
                let points = [
                    a.center(),
                    Point::new(a.x0, a.y0),
                    Point::new(a.x1 - 0.01, a.y1 - 0.01),
                    a.center() + Vec2::new(a.width() * 0.45, 0.0),
                ];
                for point in points {
                    assert_eq!(hit_test(point, &slots), Some(i), "point {point:?} in slot {i}");
                }
            }
        }
    }

    #[test]
    fn gaps_and_margins_miss() {
        let slots = slots_for(3, 6.0);
        let gap = Point::new(slots[0].x1 + 3.0, slots[0].center().y);
        assert_eq!(hit_test(gap, &slots), None);
        assert_eq!(hit_test(Point::new(2.0, 2.0), &slots), None);
        assert_eq!(hit_test(Point::new(slots[2].x1, slots[2].y0), &slots), None);
    }

    #[test]
    fn hover_tracks_moves_and_leave() {
        let slots = slots_for(2, 6.0);
        let mut router = HitRouter::new();
        assert_eq!(router.cursor(), Cursor::Default);

        let change = router.on_move(slots[0].center(), &slots);
        assert_eq!(change, HoverChange { from: None, to: Some(0) });
        assert!(change.changed());
        assert_eq!(router.cursor(), Cursor::Pointer);

        let change = router.on_move(slots[0].center() + Vec2::new(1.0, 1.0), &slots);
        assert!(!change.changed());

        let change = router.on_leave();
        assert_eq!(change, HoverChange { from: Some(0), to: None });
        assert_eq!(router.cursor(), Cursor::Default);
    }

    #[test]
    fn release_on_pressed_slot_activates() {
        let slots = slots_for(3, 6.0);
        let mut router = HitRouter::new();
        assert_eq!(router.on_down(slots[2].center(), &slots), DownResult::Pressed(2));
        assert!(router.is_pressed());
        assert_eq!(router.on_up(slots[2].center(), &slots), PressResult::Activate(2));
        assert!(!router.is_pressed());
    }

    #[test]
    fn release_elsewhere_does_not_activate() {
        let slots = slots_for(3, 6.0);
        let mut router = HitRouter::new();
        router.on_down(slots[0].center(), &slots);
        assert_eq!(
            router.on_up(slots[1].center(), &slots),
            PressResult::Suppressed(Some(0))
        );

        router.on_down(slots[0].center(), &slots);
        assert_eq!(
            router.on_up(Point::new(1.0, 1.0), &slots),
            PressResult::Suppressed(Some(0))
        );
    }

    #[test]
    fn down_off_button_misses() {
        let slots = slots_for(2, 6.0);
        let mut router = HitRouter::new();
        assert_eq!(router.on_down(Point::new(2.0, 2.0), &slots), DownResult::Missed);
        assert!(!router.is_pressed());
        assert_eq!(router.on_up(Point::new(2.0, 2.0), &slots), PressResult::Suppressed(None));
    }

    #[test]
    fn reset_clears_everything() {
        let slots = slots_for(2, 6.0);
        let mut router = HitRouter::new();
        router.on_down(slots[1].center(), &slots);
        router.reset();
        assert_eq!(router.hovered(), None);
        assert!(!router.is_pressed());
        assert!(!router.cancel_press());
    }
}
