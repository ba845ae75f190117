// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas Toast Layout: geometry for a floating toolbar anchored to a text selection.
//!
//! Given the bounding rectangle of a selection in viewport coordinates, a set of
//! [`ToolbarMetrics`], and a button count, [`layout`] computes:
//!
//! - The toolbar body size (padding on every side, buttons laid out left to right).
//! - Where the toolbar goes: centered on the selection and [`TOOLBAR_GAP`] pixels above
//!   it, or below the selection when there is no room above ([`Placement`]).
//! - A horizontal clamp that keeps the toolbar [`VIEWPORT_INSET`] pixels inside the viewport.
//! - The render surface origin, which sits [`BUFFER_MARGIN`] pixels outside the toolbar on
//!   every side so shadows and hover scale-up are not clipped.
//! - One slot rectangle per button, in surface-local coordinates.
//!
//! ## Minimal example
//!
//! ```rust
//! use canvas_toast_layout::{layout, Placement, ToolbarMetrics};
//! use kurbo::{Rect, Size};
//!
//! let metrics = ToolbarMetrics {
//!     button_size: 36.0,
//!     button_spacing: 6.0,
//!     padding: 6.0,
//! };
//! let selection = Rect::from_origin_size((100.0, 300.0), (80.0, 20.0));
//! let result = layout(selection, &metrics, 2, Size::new(1280.0, 800.0));
//!
//! assert_eq!(result.total_width, 90.0);
//! assert_eq!(result.toolbar_origin.x, 95.0);
//! assert_eq!(result.placement, Placement::Above);
//! assert_eq!(result.slots.len(), 2);
//! ```
//!
//! Surface sizing for high-density displays lives in [`SurfaceMetrics`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

mod slots;
mod surface;

pub use slots::SlotStrip;
pub use surface::SurfaceMetrics;

/// Vertical distance between the selection edge and the toolbar body.
pub const TOOLBAR_GAP: f64 = 15.0;

/// Transparent margin around the toolbar body inside the render surface.
pub const BUFFER_MARGIN: f64 = 20.0;

/// Minimum horizontal distance kept between the toolbar body and the viewport edges.
pub const VIEWPORT_INSET: f64 = 8.0;

/// Size parameters of the toolbar, taken from the toast style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToolbarMetrics {
    /// Side length of each (square) button.
    pub button_size: f64,
    /// Horizontal space between adjacent buttons.
    pub button_spacing: f64,
    /// Space between the toolbar edge and the buttons, on every side.
    pub padding: f64,
}

impl ToolbarMetrics {
    /// Size of the toolbar body for `count` buttons.
    ///
    /// `2·padding + count·button_size + (count − 1)·button_spacing`; an empty toolbar has no
    /// spacing term.
    pub fn toolbar_size(&self, count: usize) -> Size {
        let strip = SlotStrip::new(count, self.button_size, self.button_spacing);
        Size::new(
            self.padding * 2.0 + strip.total_extent(),
            self.padding * 2.0 + strip.extent(),
        )
    }
}

/// Which side of the selection the toolbar was placed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Preferred placement, above the selection's top edge.
    Above,
    /// Flipped placement, below the selection's bottom edge.
    Below,
}

/// Result of laying out the toolbar for one show.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutResult {
    /// Width of the toolbar body.
    pub total_width: f64,
    /// Height of the toolbar body.
    pub total_height: f64,
    /// Margin between the render surface edge and the toolbar body.
    pub buffer_margin: f64,
    /// Top-left corner of the toolbar body in viewport coordinates.
    pub toolbar_origin: Point,
    /// Top-left corner of the render surface in viewport coordinates.
    pub canvas_origin: Point,
    /// Side of the selection the toolbar sits on.
    pub placement: Placement,
    /// Button slots in surface-local coordinates, in button order.
    pub slots: Vec<Rect>,
}

impl LayoutResult {
    /// Size of the whole render surface, including the buffer margin.
    pub fn surface_size(&self) -> Size {
        Size::new(
            self.total_width + self.buffer_margin * 2.0,
            self.total_height + self.buffer_margin * 2.0,
        )
    }

    /// The render surface in surface-local coordinates.
    pub fn surface_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.surface_size())
    }

    /// The toolbar body in surface-local coordinates.
    pub fn toolbar_rect(&self) -> Rect {
        Rect::from_origin_size(
            (self.buffer_margin, self.buffer_margin),
            (self.total_width, self.total_height),
        )
    }

    /// Convert a viewport-space point into surface-local coordinates.
    pub fn to_local(&self, viewport_point: Point) -> Point {
        viewport_point - self.canvas_origin.to_vec2()
    }

    /// Re-apply the horizontal viewport clamp.
    ///
    /// Clamping is idempotent: calling this on a result produced by [`layout`] with the same
    /// viewport returns an equal result.
    #[must_use]
    pub fn clamp_to_viewport(&self, viewport: Size) -> Self {
        let left = clamp_horizontal(self.toolbar_origin.x, self.total_width, viewport.width);
        let toolbar_origin = Point::new(left, self.toolbar_origin.y);
        Self {
            toolbar_origin,
            canvas_origin: toolbar_origin - Vec2::new(self.buffer_margin, self.buffer_margin),
            slots: self.slots.clone(),
            ..*self
        }
    }
}

/// Whether a selection rectangle has no area and should not anchor a toast.
///
/// Non-finite extents count as degenerate.
pub fn is_degenerate(selection: Rect) -> bool {
    let size = selection.abs().size();
    !(size.width > 0.0 && size.height > 0.0 && size.is_finite())
}

/// Lay out a toolbar of `count` buttons for `selection` inside `viewport`.
///
/// `selection` is in viewport coordinates. `viewport` is the visible area size; its top-left
/// corner is the origin.
pub fn layout(
    selection: Rect,
    metrics: &ToolbarMetrics,
    count: usize,
    viewport: Size,
) -> LayoutResult {
    let selection = selection.abs();
    let size = metrics.toolbar_size(count);

    let preferred_left = selection.center().x - size.width / 2.0;
    let preferred_top = selection.y0 - TOOLBAR_GAP - size.height;
    let (top, placement) = if preferred_top < 0.0 {
        (selection.y1 + TOOLBAR_GAP, Placement::Below)
    } else {
        (preferred_top, Placement::Above)
    };
    let left = clamp_horizontal(preferred_left, size.width, viewport.width);

    let toolbar_origin = Point::new(left, top);
    let content_origin = Point::new(
        BUFFER_MARGIN + metrics.padding,
        BUFFER_MARGIN + metrics.padding,
    );
    let slots = SlotStrip::new(count, metrics.button_size, metrics.button_spacing)
        .rects(content_origin)
        .collect();

    LayoutResult {
        total_width: size.width,
        total_height: size.height,
        buffer_margin: BUFFER_MARGIN,
        toolbar_origin,
        canvas_origin: toolbar_origin - Vec2::new(BUFFER_MARGIN, BUFFER_MARGIN),
        placement,
        slots,
    }
}

/// Clamp a toolbar's left edge so the body stays inside the viewport inset.
///
/// The right edge is pulled in first and the left edge wins when the toolbar is wider than
/// the viewport, which keeps the clamp idempotent.
fn clamp_horizontal(left: f64, width: f64, viewport_width: f64) -> f64 {
    let mut left = left;
    if left + width > viewport_width - VIEWPORT_INSET {
        left = viewport_width - VIEWPORT_INSET - width;
    }
    if left < VIEWPORT_INSET {
        left = VIEWPORT_INSET;
    }
    left
}
