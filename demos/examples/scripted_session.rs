// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless walkthrough of a toast session.
//!
//! A console host stands in for the document: it answers selection queries from a fixed
//! string, keeps a clipboard in memory, and logs every surface call. The script selects
//! text, hovers and clicks the copy button, selects again, scrolls the toast away, and pastes
//! into a selection whose clipboard read is refused.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p canvas_toast_demos --example scripted_session`

use canvas_toast::host::{
    Clipboard, FrameScheduler, IconLoader, Navigator, Notifier, SelectionSource, Surface,
};
use canvas_toast::{
    Cursor, Frame, HostError, IconSource, IconTicket, JsonConfigSource, PaintOp, Phase,
    SurfaceMetrics, ToastSession, Viewport,
};
use kurbo::{Point, Rect, Size};
use tracing_subscriber::EnvFilter;
use url::Url;

const STORED_CONFIG: &str = r##"{
    "style": { "bgColor": "#0f172a", "animationSpeed": 0.3 },
    "buttons": [
        { "id": "copy", "type": "action", "action": "copy", "icon": "<svg viewBox=\"0 0 24 24\"></svg>" },
        { "id": "docs", "type": "link", "url": "https://docs.rs/releases/search?query=%s", "icon": "docs.png" },
        { "id": "paste", "type": "action", "action": "paste", "icon": "<svg viewBox=\"0 0 24 24\"></svg>" }
    ]
}"##;

#[derive(Debug, Default)]
struct ConsoleHost {
    selection: String,
    clipboard: String,
    deny_clipboard_read: bool,
    pending_icons: Vec<IconTicket>,
    pending_frames: u32,
    pending_poll: bool,
}

impl Clipboard for ConsoleHost {
    fn write_text(&mut self, text: &str) -> Result<(), HostError> {
        tracing::info!(text, "clipboard write");
        self.clipboard = text.to_owned();
        Ok(())
    }

    fn read_text(&mut self) -> Result<String, HostError> {
        if self.deny_clipboard_read {
            return Err(HostError::Denied("clipboard-read".into()));
        }
        Ok(self.clipboard.clone())
    }
}

impl SelectionSource for ConsoleHost {
    type Range = usize;

    fn selection_text(&self) -> String {
        self.selection.clone()
    }

    fn selection_range(&self) -> Option<usize> {
        (!self.selection.is_empty()).then_some(self.selection.len())
    }

    fn range_rect(&self, range: &usize) -> Rect {
        #[allow(clippy::cast_precision_loss, reason = "Selections are short")]
        let width = *range as f64 * 7.5;
        Rect::from_origin_size((120.0, 240.0), (width, 18.0))
    }

    fn is_range_valid(&self, _range: &usize) -> bool {
        true
    }

    fn replace_range(&mut self, _range: &usize, text: &str) -> Result<(), HostError> {
        tracing::info!(text, "selection replaced");
        self.selection = text.to_owned();
        Ok(())
    }

    fn schedule_selection_poll(&mut self, delay_ms: u64) {
        tracing::debug!(delay_ms, "selection poll scheduled");
        self.pending_poll = true;
    }
}

impl IconLoader for ConsoleHost {
    fn load_icon(&mut self, ticket: IconTicket, source: &IconSource) {
        tracing::debug!(id = %ticket.button_id, src_len = source.image_src().len(), "loading icon");
        self.pending_icons.push(ticket);
    }
}

impl Navigator for ConsoleHost {
    fn open_in_new_context(&mut self, url: &Url) {
        tracing::info!(%url, "open link");
    }
}

impl Surface for ConsoleHost {
    fn viewport(&self) -> Viewport {
        Viewport {
            size: Size::new(1280.0, 800.0),
            device_pixel_ratio: 2.0,
        }
    }

    fn set_bounds(&mut self, origin: Point, metrics: SurfaceMetrics) {
        tracing::info!(?origin, backing = ?metrics.backing_size(), "surface bounds");
    }

    fn set_visible(&mut self, visible: bool) {
        tracing::info!(visible, "surface visibility");
    }

    fn set_pointer_events(&mut self, enabled: bool) {
        tracing::debug!(enabled, "surface pointer events");
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        tracing::debug!(?cursor, "cursor");
    }

    fn present(&mut self, frame: &Frame) {
        let icons = frame
            .ops
            .iter()
            .filter(|op| matches!(op, PaintOp::Icon { .. }))
            .count();
        tracing::trace!(opacity = frame.opacity, ops = frame.ops.len(), icons, "present");
    }

    fn recreate(&mut self) {
        tracing::info!("surface recreated");
    }
}

impl FrameScheduler for ConsoleHost {
    fn request_frame(&mut self) {
        self.pending_frames += 1;
    }
}

impl Notifier for ConsoleHost {
    fn notify_user(&mut self, message: &str) {
        tracing::warn!(message, "user notice");
    }
}

/// Deliver queued async results the way an event loop would.
fn run_until_idle(session: &mut ToastSession<ConsoleHost>, max_frames: u32) {
    for ticket in std::mem::take(&mut session.host_mut().pending_icons) {
        session.on_icon_loaded(ticket, Ok(()));
    }
    if std::mem::take(&mut session.host_mut().pending_poll) {
        session.poll_selection();
    }
    let mut frames = 0;
    while session.host().pending_frames > 0 && frames < max_frames {
        session.host_mut().pending_frames -= 1;
        session.on_frame();
        frames += 1;
    }
    tracing::info!(frames, phase = ?session.phase(), opacity = session.motion().opacity(), "idle");
}

fn slot_center(session: &ToastSession<ConsoleHost>, id: &str) -> Option<Point> {
    let index = session.config().buttons.iter().position(|b| b.id == id)?;
    Some(session.layout()?.slots.get(index)?.center())
}

fn click(session: &mut ToastSession<ConsoleHost>, id: &str) {
    let Some(point) = slot_center(session, id) else {
        tracing::error!(id, "no such button on screen");
        return;
    };
    session.on_surface_pointer_move(point);
    session.on_surface_pointer_down(point);
    session.on_document_pointer_down(true);
    if let Some(dispatched) = session.on_surface_pointer_up(point) {
        tracing::info!(id = %dispatched.id, outcome = ?dispatched.outcome, "dispatched");
    }
    session.on_document_pointer_up(true);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let host = ConsoleHost {
        clipboard: "from the clipboard".into(),
        ..ConsoleHost::default()
    };
    let mut session = ToastSession::from_provider(host, &JsonConfigSource::new(STORED_CONFIG));

    tracing::info!("select text");
    session.host_mut().selection = "render loop".into();
    session.on_document_pointer_up(false);
    run_until_idle(&mut session, 30);
    assert_eq!(session.phase(), Phase::Visible);

    tracing::info!("hover and click copy");
    click(&mut session, "copy");
    run_until_idle(&mut session, 120);
    assert_eq!(session.phase(), Phase::Hidden);

    tracing::info!("select again, then scroll");
    session.on_document_pointer_up(false);
    run_until_idle(&mut session, 30);
    session.on_scroll();
    run_until_idle(&mut session, 120);

    tracing::info!("paste with clipboard access refused");
    session.host_mut().deny_clipboard_read = true;
    session.on_document_pointer_up(false);
    run_until_idle(&mut session, 30);
    click(&mut session, "paste");
    run_until_idle(&mut session, 120);

    tracing::info!(session = ?session, "done");
}
