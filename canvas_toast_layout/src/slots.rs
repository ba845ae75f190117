// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A horizontal strip of uniformly sized, uniformly spaced button slots.

use kurbo::{Point, Rect};

/// A left-to-right strip of `len` square slots separated by a fixed gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStrip {
    len: usize,
    extent: f64,
    gap: f64,
}

impl SlotStrip {
    /// Creates a strip of `len` slots of side `extent`, `gap` apart.
    #[must_use]
    pub fn new(len: usize, extent: f64, gap: f64) -> Self {
        debug_assert!(
            extent.is_finite() && gap.is_finite(),
            "SlotStrip extents must be finite; got {extent:?} / {gap:?}"
        );
        // Clamp finite negative values to `0.0`.
        Self {
            len,
            extent: extent.max(0.0),
            gap: gap.max(0.0),
        }
    }

    /// Number of slots in the strip.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the strip has no slots.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Side length of each slot.
    pub const fn extent(&self) -> f64 {
        self.extent
    }

    /// Distance from the strip start to the leading edge of slot `index`.
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * (self.extent + self.gap)
    }

    /// Length of the whole strip; gaps only sit between slots.
    pub fn total_extent(&self) -> f64 {
        match self.len {
            0 => 0.0,
            n => self.offset_of(n - 1) + self.extent,
        }
    }

    /// Slot `index` positioned with the strip starting at `origin`.
    pub fn rect_of(&self, origin: Point, index: usize) -> Rect {
        Rect::from_origin_size(
            (origin.x + self.offset_of(index), origin.y),
            (self.extent, self.extent),
        )
    }

    /// All slots in order, with the strip starting at `origin`.
    pub fn rects(&self, origin: Point) -> impl Iterator<Item = Rect> + '_ {
        (0..self.len).map(move |i| self.rect_of(origin, i))
    }
}
