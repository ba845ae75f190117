// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render surface sizing for high-density displays.

use kurbo::{Affine, Size};

/// Logical and backing-store dimensions of the render surface.
///
/// The surface is laid out in logical (CSS) pixels. Its backing store is `device_pixel_ratio`
/// times larger, and painting applies [`SurfaceMetrics::transform`] so that display list
/// coordinates stay logical.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceMetrics {
    logical: Size,
    scale: f64,
}

impl SurfaceMetrics {
    /// Creates metrics for a surface of `logical` size on a display with `device_pixel_ratio`.
    ///
    /// Ratios that are not finite and positive are treated as `1.0`.
    pub fn new(logical: Size, device_pixel_ratio: f64) -> Self {
        let scale = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        Self { logical, scale }
    }

    /// Size in logical pixels.
    pub const fn logical_size(&self) -> Size {
        self.logical
    }

    /// Effective device pixel ratio.
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Backing-store size in device pixels, rounded up.
    pub fn backing_size(&self) -> (u32, u32) {
        let device = (self.logical * self.scale).ceil();
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "Surface dimensions are small, non-negative, and already rounded"
        )]
        (device.width.max(0.0) as u32, device.height.max(0.0) as u32)
    }

    /// Transform from logical paint coordinates to device pixels.
    pub fn transform(&self) -> Affine {
        Affine::scale(self.scale)
    }
}
