// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Services the toast consumes from its host document.
//!
//! Each concern is its own trait so hosts and tests can implement them separately. A
//! [`ToastSession`](crate::ToastSession) takes a single value implementing [`Host`], which
//! every type implementing all of the service traits gets for free.
//!
//! Asynchronous results flow back into the session through its `on_*` methods:
//!
//! - [`SelectionSource::schedule_selection_poll`] is answered by
//!   [`ToastSession::poll_selection`](crate::ToastSession::poll_selection).
//! - [`FrameScheduler::request_frame`] is answered by
//!   [`ToastSession::on_frame`](crate::ToastSession::on_frame).
//! - [`IconLoader::load_icon`] is answered by
//!   [`ToastSession::on_icon_loaded`](crate::ToastSession::on_icon_loaded).

use canvas_toast_hit::Cursor;
use canvas_toast_layout::SurfaceMetrics;
use kurbo::{Point, Rect, Size};
use url::Url;

use crate::error::HostError;
use crate::icons::{IconSource, IconTicket};
use crate::paint::Frame;

/// The system clipboard.
pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), HostError>;

    /// Current clipboard text.
    fn read_text(&mut self) -> Result<String, HostError>;
}

/// The document's text selection.
pub trait SelectionSource {
    /// Opaque handle to a selection range, owned by the document.
    type Range: Clone;

    /// Current selection text, untrimmed. Empty when nothing is selected.
    fn selection_text(&self) -> String;

    /// Handle to the first range of the current selection.
    fn selection_range(&self) -> Option<Self::Range>;

    /// Bounding rectangle of `range` in viewport coordinates.
    fn range_rect(&self, range: &Self::Range) -> Rect;

    /// Whether `range` still refers to live document content.
    fn is_range_valid(&self, range: &Self::Range) -> bool;

    /// Replace the contents of `range` with `text`.
    fn replace_range(&mut self, range: &Self::Range, text: &str) -> Result<(), HostError>;

    /// Call [`ToastSession::poll_selection`](crate::ToastSession::poll_selection) once after
    /// `delay_ms` milliseconds.
    fn schedule_selection_poll(&mut self, delay_ms: u64);
}

/// Image decoding for button icons.
pub trait IconLoader {
    /// Start decoding `source`; report the outcome with
    /// [`ToastSession::on_icon_loaded`](crate::ToastSession::on_icon_loaded), passing `ticket`
    /// back unchanged.
    fn load_icon(&mut self, ticket: IconTicket, source: &IconSource);
}

/// Opens links.
pub trait Navigator {
    /// Open `url` in a new browsing context.
    fn open_in_new_context(&mut self, url: &Url);
}

/// Visible area the toast is placed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Logical size; the top-left corner is the origin.
    pub size: Size,
    /// Physical pixels per logical pixel.
    pub device_pixel_ratio: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Size::new(1024.0, 768.0),
            device_pixel_ratio: 1.0,
        }
    }
}

/// The render surface the toast is drawn on.
///
/// One surface is created by the host and reused for every show.
pub trait Surface {
    /// Current viewport.
    fn viewport(&self) -> Viewport;

    /// Move the surface to `origin` (viewport coordinates) and resize its backing store.
    fn set_bounds(&mut self, origin: Point, metrics: SurfaceMetrics);

    /// Show or hide the surface.
    fn set_visible(&mut self, visible: bool);

    /// Whether the surface receives pointer events.
    fn set_pointer_events(&mut self, enabled: bool);

    /// Cursor shown over the surface.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Clear the surface and draw `frame`.
    fn present(&mut self, frame: &Frame);

    /// Recreate the surface after the document body was replaced.
    fn recreate(&mut self);
}

/// Frame pacing.
pub trait FrameScheduler {
    /// Call [`ToastSession::on_frame`](crate::ToastSession::on_frame) once, before the next
    /// repaint.
    fn request_frame(&mut self);
}

/// User-visible notices.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify_user(&mut self, message: &str);
}

/// Everything a [`ToastSession`](crate::ToastSession) needs from its host.
pub trait Host:
    Clipboard + SelectionSource + IconLoader + Navigator + Surface + FrameScheduler + Notifier
{
}

impl<T> Host for T where
    T: Clipboard + SelectionSource + IconLoader + Navigator + Surface + FrameScheduler + Notifier
{
}
