// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visibility state machine.
//!
//! [`Lifecycle`] decides, for each named [`Trigger`], whether the toast should show, hide, or
//! stay as it is. It performs no side effects; the session applies the returned
//! [`Transition`].
//!
//! ```text
//!            SelectionShown                      Settled
//!  Hidden ─────────────────▶ Visible ──hide──▶ Hiding ──────▶ Hidden
//!                              ▲                 │
//!                              └─SelectionShown──┘
//! ```
//!
//! `hide` is any of: selection cleared while the pointer is up, an outside pointer down, a
//! scroll, or a dispatched action.

/// Visibility phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Fully transparent, loop stopped, surface hidden.
    #[default]
    Hidden,
    /// Wants to be visible; interactive.
    Visible,
    /// Fading out; not interactive, still painted until settled.
    Hiding,
}

/// Events that may change visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// A usable selection appeared or changed.
    SelectionShown {
        /// Whether the pointer is currently pressed on the toast.
        pointer_down: bool,
    },
    /// The selection became empty.
    SelectionCleared {
        /// Whether the pointer is currently pressed on the toast.
        pointer_down: bool,
    },
    /// The pointer went down somewhere in the document.
    OutsidePointerDown {
        /// Whether the target was the toast surface itself.
        on_surface: bool,
    },
    /// The document scrolled.
    Scroll,
    /// A button action was dispatched.
    ActionDispatched,
    /// The render loop reached the settled hidden state.
    Settled,
}

/// What the session should do in response to a trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Lay out, start the loop, and enable pointer events.
    Show {
        /// Snap the animation state to hidden first; only when coming from [`Phase::Hidden`].
        reset: bool,
    },
    /// Target opacity 0, disable pointer events, clear hover.
    Hide,
    /// Hide the surface; the fade-out is complete.
    Settle,
    /// Nothing to do.
    None,
}

/// Visibility state machine for one toast.
#[derive(Clone, Debug, Default)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    /// A hidden toast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the toast is animating towards visible.
    pub fn wants_visible(&self) -> bool {
        self.phase == Phase::Visible
    }

    /// Apply `trigger` and report the transition to perform.
    pub fn handle(&mut self, trigger: Trigger) -> Transition {
        let transition = match (self.phase, trigger) {
            (_, Trigger::SelectionShown { pointer_down: true }) => Transition::None,
            (phase, Trigger::SelectionShown { .. }) => Transition::Show {
                reset: phase == Phase::Hidden,
            },
            (Phase::Visible, Trigger::SelectionCleared { pointer_down: false }) => {
                Transition::Hide
            }
            (Phase::Visible, Trigger::OutsidePointerDown { on_surface: false }) => {
                Transition::Hide
            }
            (Phase::Visible, Trigger::Scroll | Trigger::ActionDispatched) => Transition::Hide,
            (Phase::Hiding, Trigger::Settled) => Transition::Settle,
            _ => Transition::None,
        };
        self.phase = match transition {
            Transition::Show { .. } => Phase::Visible,
            Transition::Hide => Phase::Hiding,
            Transition::Settle => Phase::Hidden,
            Transition::None => self.phase,
        };
        transition
    }
}
