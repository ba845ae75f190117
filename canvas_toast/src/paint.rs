// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display list for one frame.
//!
//! The session does not rasterize. Each frame it builds a [`Frame`] from the style, the
//! layout, and the animation state, and hands it to the host
//! [`Surface`](crate::host::Surface). Coordinates inside [`PaintOp`]s are surface-local logical
//! pixels; hosts apply [`Frame::device_transform`] then [`Frame::content_transform`], and
//! composite everything at [`Frame::opacity`].

use canvas_toast_layout::{LayoutResult, SurfaceMetrics};
use canvas_toast_motion::AnimationState;
use kurbo::{Affine, Point, Rect, RoundedRect, Size, Vec2};

use crate::color::Rgba;
use crate::config::{ButtonSpec, Style};
use crate::icons::IconSet;

/// Hover intensity below which no highlight is drawn.
const HIGHLIGHT_THRESHOLD: f64 = 0.01;

/// A drop shadow under the toolbar body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    /// Shadow color.
    pub color: Rgba,
    /// Blur radius.
    pub blur: f64,
    /// Offset from the shape.
    pub offset: Vec2,
}

impl Shadow {
    /// Shadow for a toolbar with the given surface hover intensity; hovering deepens it.
    pub fn for_hover(surface_hover: f64) -> Self {
        Self {
            color: Rgba::BLACK.with_alpha(0.3),
            blur: 10.0 + 10.0 * surface_hover,
            offset: Vec2::new(0.0, 2.0 + 2.0 * surface_hover),
        }
    }
}

/// One drawing command.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOp {
    /// The toolbar body.
    Background {
        /// Body shape.
        shape: RoundedRect,
        /// Fill color.
        fill: Rgba,
        /// Drop shadow.
        shadow: Shadow,
    },
    /// Hover highlight behind a button.
    Highlight {
        /// Button index.
        button: usize,
        /// Highlight shape.
        shape: RoundedRect,
        /// Fill color.
        fill: Rgba,
        /// Outline color.
        stroke: Rgba,
        /// Outline width.
        stroke_width: f64,
    },
    /// A button icon, drawn with the image the host decoded for `id`.
    Icon {
        /// Button index.
        button: usize,
        /// Button id the icon was loaded for.
        id: String,
        /// Destination rectangle.
        rect: Rect,
        /// Brightness multiplier, 1 for unmodified.
        brightness: f64,
    },
}

/// Everything needed to draw one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Backing-store scale for the device pixel ratio.
    pub device_transform: Affine,
    /// Toolbar scale about its center.
    pub content_transform: Affine,
    /// Global opacity in `[0, 1]`.
    pub opacity: f64,
    /// Drawing commands in painter's order.
    pub ops: Vec<PaintOp>,
}

/// Scale factor of a button for its hover and press intensities.
pub fn button_scale(style: &Style, hover: f64, active: f64) -> f64 {
    let hovered = 1.0 + (style.hover_scale - 1.0) * hover;
    let pressed = 1.0 - (1.0 - style.active_scale) * active;
    hovered * pressed
}

fn scale_about(center: Point, scale: f64) -> Affine {
    Affine::translate(center.to_vec2()) * Affine::scale(scale) * Affine::translate(-center.to_vec2())
}

/// Build the display list for the current state.
pub(crate) fn build_frame(
    style: &Style,
    layout: &LayoutResult,
    motion: &AnimationState,
    buttons: &[ButtonSpec],
    icons: &IconSet,
    surface: SurfaceMetrics,
) -> Frame {
    let toolbar = layout.toolbar_rect();
    let mut ops = Vec::with_capacity(1 + layout.slots.len() * 2);

    ops.push(PaintOp::Background {
        shape: RoundedRect::from_rect(toolbar, style.corner_radius),
        fill: style.background_color.with_alpha(style.background_opacity),
        shadow: Shadow::for_hover(motion.surface_hover()),
    });

    for (index, (slot, button)) in layout.slots.iter().zip(buttons).enumerate() {
        let hover = motion.hover_of(index);
        let active = motion.active_of(index);
        let scale = button_scale(style, hover, active);
        let center = slot.center();

        if hover > HIGHLIGHT_THRESHOLD {
            let shape = Rect::from_center_size(center, slot.size() * scale);
            ops.push(PaintOp::Highlight {
                button: index,
                shape: RoundedRect::from_rect(shape, style.corner_radius / 2.0),
                fill: style
                    .hover_color
                    .with_alpha(style.hover_opacity)
                    .multiply_alpha(hover),
                stroke: style.hover_color.with_alpha(0.6 * hover),
                stroke_width: 2.0,
            });
        }

        if icons.is_drawable(&button.id) {
            let lifted = center - Vec2::new(0.0, style.icon_lift * hover);
            let side = style.icon_size * scale;
            ops.push(PaintOp::Icon {
                button: index,
                id: button.id.clone(),
                rect: Rect::from_center_size(lifted, Size::new(side, side)),
                brightness: 1.0 + 0.4 * hover,
            });
        }
    }

    Frame {
        device_transform: surface.transform(),
        content_transform: scale_about(toolbar.center(), motion.scale()),
        opacity: motion.opacity(),
        ops,
    }
}
