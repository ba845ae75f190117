// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canvas Toast: an animated toolbar that floats above a text selection.
//!
//! The toolbar is drawn on a single render surface owned by the host document. This crate
//! decides when it appears and disappears, what each frame looks like, and what a click on a
//! button does. Geometry, interpolation, and hit testing come from the leaf crates
//! [`canvas_toast_layout`], [`canvas_toast_motion`], and [`canvas_toast_hit`].
//!
//! ## Pieces
//!
//! - [`ToastSession`]: one toast bound to a [`Host`]. Feed it document events, frame ticks,
//!   config changes, and icon results through its `on_*` methods.
//! - [`lifecycle::Lifecycle`]: the Hidden/Visible/Hiding state machine with named
//!   [`Trigger`]s.
//! - [`render_loop::RenderLoop`]: frame requests that stop themselves once the toast has
//!   faded out.
//! - [`paint`]: the per-frame display list handed to [`host::Surface::present`].
//! - [`config`]: style and buttons, parsed from the stored JSON form and merged over the
//!   defaults.
//! - [`host`]: the services the toast needs from its environment.
//!
//! ## Configuration
//!
//! ```rust
//! use canvas_toast::{ConfigProvider, JsonConfigSource, ToastConfig};
//!
//! let stored = JsonConfigSource::new(r##"{ "style": { "bgColor": "#101010", "buttonSize": 32 } }"##);
//! let config = ToastConfig::load(&stored);
//!
//! assert_eq!(config.style.button_size, 32.0);
//! assert_eq!(config.style.padding, 6.0);
//! assert_eq!(config.buttons.len(), 3);
//! assert!(stored.get().is_some());
//! ```
//!
//! ## Threading
//!
//! A session is driven from one event loop. Every entry point takes `&mut self`, so a frame
//! never observes a half-applied event. Config changes that arrive while frames are running
//! are staged and applied at the start of the next frame.

pub mod action;
pub mod color;
pub mod config;
pub mod error;
pub mod host;
pub mod icons;
pub mod lifecycle;
pub mod paint;
pub mod render_loop;
mod session;

pub use action::{ActionOutcome, Dispatched, PASTE_PERMISSION_NOTICE, URL_PLACEHOLDER, expand_link};
pub use color::Rgba;
pub use config::{
    ActionKind, ButtonKind, ButtonSpec, ConfigProvider, JsonConfigSource, Style, StylePatch,
    ToastConfig, ToastConfigPatch,
};
pub use error::{ConfigError, HostError};
pub use host::{Host, Viewport};
pub use icons::{IconSource, IconTicket, PendingSet};
pub use lifecycle::{Phase, Trigger};
pub use paint::{Frame, PaintOp};
pub use session::{SELECTION_SETTLE_DELAY_MS, ToastSession};

pub use canvas_toast_hit::Cursor;
pub use canvas_toast_layout::{LayoutResult, Placement, SurfaceMetrics};
