// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas Toast Motion: frame-stepped smoothing for toast visuals.
//!
//! A toast's look is a handful of scalars that chase instantaneous targets:
//!
//! - `opacity` heads to 1 while the toast wants to be visible, 0 otherwise.
//! - `scale` heads to 1 while visible, [`RESTING_SCALE`] otherwise.
//! - Per-button `hover` heads to 1 for the hovered button only.
//! - Per-button `active` heads to 1 for the hovered button while the pointer is down.
//! - `surface_hover` heads to 1 while any button is hovered.
//!
//! Every frame, [`AnimationState::advance`] moves each scalar a fixed fraction of the way to
//! its target: `value + (target − value) · rate`. Rates are clamped into `(0, 1]`, so values
//! approach their targets monotonically and never overshoot. Hover and press feedback use a
//! faster rate, `speed · FEEDBACK_RATE_MULTIPLIER`.
//!
//! The owner of the frame loop stops ticking once [`AnimationState::is_settled`] reports that
//! the toast is hidden and its opacity has decayed below [`SETTLE_EPSILON`].
//!
//! ```rust
//! use canvas_toast_motion::{AnimationState, Rates};
//!
//! let mut state = AnimationState::new(3);
//! let rates = Rates::from_speed(0.2);
//!
//! state.set_hovered(Some(1));
//! for _ in 0..60 {
//!     state.advance(true, rates);
//! }
//! assert!(state.opacity() > 0.99);
//! assert!(state.hover_of(1) > 0.99);
//! assert_eq!(state.hover_of(0), 0.0);
//!
//! state.set_hovered(None);
//! while !state.is_settled(false) {
//!     state.advance(false, rates);
//! }
//! assert!(state.opacity() < 0.01);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use smallvec::SmallVec;

/// Opacity below which a hidden toast counts as fully faded out.
pub const SETTLE_EPSILON: f64 = 0.01;

/// Scale a hidden toast shrinks toward.
pub const RESTING_SCALE: f64 = 0.9;

/// How much faster hover and press feedback converge than opacity and scale.
pub const FEEDBACK_RATE_MULTIPLIER: f64 = 1.25;

/// Base rate used when a configured speed is not a positive number.
pub const DEFAULT_SPEED: f64 = 0.2;

/// Per-button intensities; most toolbars have only a few buttons.
type Intensities = SmallVec<[f64; 8]>;

/// Move `value` a fraction `rate` of the way toward `target`.
#[inline]
pub fn approach(value: f64, target: f64, rate: f64) -> f64 {
    value + (target - value) * rate
}

/// Interpolation rates for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rates {
    /// Rate for opacity and scale.
    pub base: f64,
    /// Rate for hover and press feedback.
    pub feedback: f64,
}

impl Rates {
    /// Derive rates from a configured animation speed.
    ///
    /// Both rates are clamped into `(0, 1]`; non-positive or NaN speeds fall back to
    /// [`DEFAULT_SPEED`].
    pub fn from_speed(speed: f64) -> Self {
        let base = clamp_rate(speed);
        Self {
            base,
            feedback: clamp_rate(base * FEEDBACK_RATE_MULTIPLIER),
        }
    }
}

impl Default for Rates {
    fn default() -> Self {
        Self::from_speed(DEFAULT_SPEED)
    }
}

fn clamp_rate(rate: f64) -> f64 {
    if rate > 0.0 { rate.min(1.0) } else { DEFAULT_SPEED }
}

/// Instantaneous targets derived from visibility and pointer state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Targets {
    /// Whether the toast wants to be visible.
    pub visible: bool,
    /// Button under the pointer, if any.
    pub hovered: Option<usize>,
    /// Whether the pointer is pressed on the toast.
    pub pointer_down: bool,
}

impl Targets {
    /// Opacity target.
    pub fn opacity(&self) -> f64 {
        if self.visible { 1.0 } else { 0.0 }
    }

    /// Scale target.
    pub fn scale(&self) -> f64 {
        if self.visible { 1.0 } else { RESTING_SCALE }
    }

    /// Hover target for button `index`.
    pub fn hover(&self, index: usize) -> f64 {
        if self.hovered == Some(index) { 1.0 } else { 0.0 }
    }

    /// Press target for button `index`.
    pub fn active(&self, index: usize) -> f64 {
        if self.pointer_down && self.hovered == Some(index) {
            1.0
        } else {
            0.0
        }
    }

    /// Whole-surface hover target.
    pub fn surface_hover(&self) -> f64 {
        if self.hovered.is_some() { 1.0 } else { 0.0 }
    }
}

/// Interpolated visual state for one toast.
///
/// One instance lives as long as the toast surface. It is reset when the toast is shown from
/// fully hidden and reused otherwise, so a show during a fade-out reverses smoothly.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    opacity: f64,
    scale: f64,
    surface_hover: f64,
    hovered: Option<usize>,
    pointer_down: bool,
    hover: Intensities,
    active: Intensities,
}

impl AnimationState {
    /// A fully hidden state for `button_count` buttons.
    pub fn new(button_count: usize) -> Self {
        Self {
            opacity: 0.0,
            scale: RESTING_SCALE,
            surface_hover: 0.0,
            hovered: None,
            pointer_down: false,
            hover: SmallVec::from_elem(0.0, button_count),
            active: SmallVec::from_elem(0.0, button_count),
        }
    }

    /// Snap back to the fully hidden state for `button_count` buttons.
    pub fn reset(&mut self, button_count: usize) {
        *self = Self::new(button_count);
    }

    /// Change the number of buttons, keeping the intensities of buttons that remain.
    ///
    /// A hovered index that no longer exists is cleared.
    pub fn resize(&mut self, button_count: usize) {
        self.hover.resize(button_count, 0.0);
        self.active.resize(button_count, 0.0);
        if self.hovered.is_some_and(|i| i >= button_count) {
            self.hovered = None;
        }
    }

    /// Number of buttons tracked.
    pub fn button_count(&self) -> usize {
        self.hover.len()
    }

    /// Current opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Current toolbar scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current whole-surface hover intensity.
    pub fn surface_hover(&self) -> f64 {
        self.surface_hover
    }

    /// Hover intensity of button `index`; `0.0` for unknown buttons.
    pub fn hover_of(&self, index: usize) -> f64 {
        self.hover.get(index).copied().unwrap_or(0.0)
    }

    /// Press intensity of button `index`; `0.0` for unknown buttons.
    pub fn active_of(&self, index: usize) -> f64 {
        self.active.get(index).copied().unwrap_or(0.0)
    }

    /// Button currently under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Set the button under the pointer. Out-of-range indices clear the hover.
    pub fn set_hovered(&mut self, hovered: Option<usize>) {
        self.hovered = hovered.filter(|&i| i < self.hover.len());
    }

    /// Whether the pointer is pressed on the toast.
    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Record whether the pointer is pressed on the toast.
    pub fn set_pointer_down(&mut self, down: bool) {
        self.pointer_down = down;
    }

    /// Targets for the current pointer state and the requested visibility.
    pub fn targets(&self, visible: bool) -> Targets {
        Targets {
            visible,
            hovered: self.hovered,
            pointer_down: self.pointer_down,
        }
    }

    /// Advance every interpolant by one frame.
    pub fn advance(&mut self, visible: bool, rates: Rates) {
        let targets = self.targets(visible);
        self.opacity = approach(self.opacity, targets.opacity(), rates.base);
        self.scale = approach(self.scale, targets.scale(), rates.base);
        self.surface_hover = approach(self.surface_hover, targets.surface_hover(), rates.feedback);
        for (i, value) in self.hover.iter_mut().enumerate() {
            *value = approach(*value, targets.hover(i), rates.feedback);
        }
        for (i, value) in self.active.iter_mut().enumerate() {
            *value = approach(*value, targets.active(i), rates.feedback);
        }
    }

    /// Whether a toast that wants to be `visible` needs no further frames.
    ///
    /// Only a hidden toast settles; a visible one keeps its loop alive.
    pub fn is_settled(&self, visible: bool) -> bool {
        !visible && self.opacity < SETTLE_EPSILON
    }
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(0)
    }
}
