// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press-to-activate recognition.
//!
//! A press activates its target only when the pointer is released over the same target it
//! went down on. Dragging off the button and releasing elsewhere cancels the activation,
//! which matches how native buttons behave.
//!
//! ```
//! use canvas_toast_hit::press::{PressResult, PressTracker};
//!
//! let mut tracker: PressTracker<u32> = PressTracker::new();
//! tracker.on_down(1);
//! assert_eq!(tracker.on_up(Some(&1)), PressResult::Activate(1));
//!
//! tracker.on_down(1);
//! assert_eq!(tracker.on_up(Some(&2)), PressResult::Suppressed(Some(1)));
//! ```

/// Result of releasing the pointer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// The press should activate the given target.
    Activate(K),
    /// No activation; carries the pressed target if there was an active press.
    Suppressed(Option<K>),
}

/// Tracks a single pointer's press on a target.
#[derive(Clone, Debug)]
pub struct PressTracker<K> {
    pressed: Option<K>,
}

impl<K: PartialEq> PressTracker<K> {
    /// Create a tracker with no active press.
    pub fn new() -> Self {
        Self { pressed: None }
    }

    /// Record a pointer down on `target`, replacing any previous press.
    pub fn on_down(&mut self, target: K) {
        self.pressed = Some(target);
    }

    /// Process a pointer up over `current_target` (or over no target).
    ///
    /// Ends the active press either way.
    pub fn on_up(&mut self, current_target: Option<&K>) -> PressResult<K> {
        match self.pressed.take() {
            Some(target) if current_target == Some(&target) => PressResult::Activate(target),
            pressed => PressResult::Suppressed(pressed),
        }
    }

    /// Drop the active press without activating anything.
    ///
    /// Returns `true` if a press was canceled.
    pub fn cancel(&mut self) -> bool {
        self.pressed.take().is_some()
    }

    /// Whether a press is active.
    pub fn is_pressed(&self) -> bool {
        self.pressed.is_some()
    }
}

impl<K: PartialEq> Default for PressTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_target_activates() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        tracker.on_down(42);
        assert!(tracker.is_pressed());

        let result = tracker.on_up(Some(&42));
        assert_eq!(result, PressResult::Activate(42));
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn different_target_is_suppressed() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        tracker.on_down(42);
        assert_eq!(tracker.on_up(Some(&99)), PressResult::Suppressed(Some(42)));
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn release_over_nothing_is_suppressed() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        tracker.on_down(42);
        assert_eq!(tracker.on_up(None), PressResult::Suppressed(Some(42)));
    }

    #[test]
    fn no_active_press_no_activation() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        assert_eq!(tracker.on_up(Some(&42)), PressResult::Suppressed(None));
    }

    #[test]
    fn cancel_drops_the_press() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        assert!(!tracker.cancel());
        tracker.on_down(7);
        assert!(tracker.cancel());
        assert!(!tracker.is_pressed());
        assert_eq!(tracker.on_up(Some(&7)), PressResult::Suppressed(None));
    }

    #[test]
    fn later_down_replaces_press() {
        let mut tracker: PressTracker<u32> = PressTracker::new();
        tracker.on_down(1);
        tracker.on_down(2);
        assert_eq!(tracker.on_up(Some(&2)), PressResult::Activate(2));
    }
}
