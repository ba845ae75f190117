// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The toast session: one toast bound to one host document.

use core::fmt;

use canvas_toast_hit::press::PressResult;
use canvas_toast_hit::{Cursor, DownResult, HitRouter};
use canvas_toast_layout::{LayoutResult, SurfaceMetrics, is_degenerate, layout};
use canvas_toast_motion::{AnimationState, Rates};
use kurbo::{Point, Rect};

use crate::action::{ActionOutcome, Dispatched, PASTE_PERMISSION_NOTICE, expand_link, kind_name};
use crate::config::{ActionKind, ButtonKind, ConfigProvider, ToastConfig, ToastConfigPatch};
use crate::error::HostError;
use crate::host::Host;
use crate::icons::{IconSet, IconTicket};
use crate::lifecycle::{Lifecycle, Phase, Transition, Trigger};
use crate::paint::build_frame;
use crate::render_loop::RenderLoop;

/// Delay between a document pointer up and the selection poll it schedules, so the host's
/// selection has settled.
pub const SELECTION_SETTLE_DELAY_MS: u64 = 10;

/// The selection the toast is anchored to.
struct SelectionAnchor<R> {
    rect: Rect,
    text: String,
    range: Option<R>,
}

/// One toast bound to a host.
///
/// All input arrives through `&mut self` methods, so events, frames, and config changes are
/// processed strictly one at a time.
///
/// Pointer positions passed to the `on_surface_*` methods are local to the render surface.
pub struct ToastSession<H: Host> {
    host: H,
    config: ToastConfig,
    staged_config: Option<ToastConfig>,
    rates: Rates,
    lifecycle: Lifecycle,
    render_loop: RenderLoop,
    motion: AnimationState,
    router: HitRouter,
    layout: Option<LayoutResult>,
    surface: Option<SurfaceMetrics>,
    anchor: Option<SelectionAnchor<H::Range>>,
    icons: IconSet,
    selection_poll_pending: bool,
}

impl<H: Host> fmt::Debug for ToastSession<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastSession")
            .field("phase", &self.lifecycle.phase())
            .field("render_loop", &self.render_loop)
            .field("buttons", &self.config.buttons.len())
            .field("staged_config", &self.staged_config.is_some())
            .field("layout", &self.layout)
            .field("motion", &self.motion)
            .field("hovered", &self.router.hovered())
            .field("anchored", &self.anchor.is_some())
            .finish_non_exhaustive()
    }
}

impl<H: Host> ToastSession<H> {
    /// Create a hidden toast and start loading its icons.
    pub fn new(host: H, config: ToastConfig) -> Self {
        let mut session = Self {
            host,
            rates: Rates::from_speed(config.style.animation_speed),
            motion: AnimationState::new(config.buttons.len()),
            config,
            staged_config: None,
            lifecycle: Lifecycle::new(),
            render_loop: RenderLoop::new(),
            router: HitRouter::new(),
            layout: None,
            surface: None,
            anchor: None,
            icons: IconSet::default(),
            selection_poll_pending: false,
        };
        session.host.set_visible(false);
        session.host.set_pointer_events(false);
        session.load_icons();
        session
    }

    /// Create a hidden toast with the config stored in `provider`.
    pub fn from_provider(host: H, provider: &impl ConfigProvider) -> Self {
        Self::new(host, ToastConfig::load(provider))
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Config in effect for painting and hit testing.
    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Visibility phase.
    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Whether the toast is animating towards visible.
    pub fn wants_visible(&self) -> bool {
        self.lifecycle.wants_visible()
    }

    /// Whether the render loop has a frame pending.
    pub fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// Interpolated visual state.
    pub fn motion(&self) -> &AnimationState {
        &self.motion
    }

    /// Layout of the most recent show.
    pub fn layout(&self) -> Option<&LayoutResult> {
        self.layout.as_ref()
    }

    /// Button under the pointer.
    pub fn hovered(&self) -> Option<usize> {
        self.router.hovered()
    }

    /// Whether every icon of the current button set has resolved.
    pub fn icons_ready(&self) -> bool {
        self.icons.is_ready()
    }

    /// The document saw a pointer up.
    ///
    /// Unless it happened on the toast surface, the selection is polled once after
    /// [`SELECTION_SETTLE_DELAY_MS`]. A press on a button that ends off the surface is
    /// abandoned.
    pub fn on_document_pointer_up(&mut self, on_surface: bool) {
        if on_surface {
            return;
        }
        if self.router.cancel_press() {
            tracing::debug!("press released off the toast");
            self.sync_pointer_state();
        }
        if !self.selection_poll_pending {
            self.selection_poll_pending = true;
            self.host.schedule_selection_poll(SELECTION_SETTLE_DELAY_MS);
        }
    }

    /// Read the host selection and react to it.
    pub fn poll_selection(&mut self) {
        self.selection_poll_pending = false;
        let text = self.host.selection_text();
        let range = self.host.selection_range();
        let rect = range
            .as_ref()
            .map(|range| self.host.range_rect(range))
            .unwrap_or(Rect::ZERO);
        self.on_selection_changed(text, range, rect);
    }

    /// The selection became `text`, covering `rect` in viewport coordinates.
    pub fn on_selection_changed(&mut self, text: String, range: Option<H::Range>, rect: Rect) {
        let pointer_down = self.router.is_pressed();
        if text.trim().is_empty() {
            tracing::debug!("selection cleared");
            let transition = self
                .lifecycle
                .handle(Trigger::SelectionCleared { pointer_down });
            self.apply(transition);
            return;
        }
        if is_degenerate(rect) {
            tracing::debug!(?rect, "ignoring selection without area");
            return;
        }
        let transition = self
            .lifecycle
            .handle(Trigger::SelectionShown { pointer_down });
        if matches!(transition, Transition::Show { .. }) {
            self.anchor = Some(SelectionAnchor { rect, text, range });
        }
        self.apply(transition);
    }

    /// The document scrolled. Hides the toast and forgets the selection range.
    pub fn on_scroll(&mut self) {
        let transition = self.lifecycle.handle(Trigger::Scroll);
        if transition == Transition::Hide
            && let Some(anchor) = &mut self.anchor
        {
            anchor.range = None;
        }
        self.apply(transition);
    }

    /// The document saw a pointer down; `on_surface` if its target was the toast surface.
    pub fn on_document_pointer_down(&mut self, on_surface: bool) {
        let transition = self
            .lifecycle
            .handle(Trigger::OutsidePointerDown { on_surface });
        self.apply(transition);
    }

    /// Pointer moved over the surface.
    pub fn on_surface_pointer_move(&mut self, local: Point) {
        if !self.lifecycle.wants_visible() {
            return;
        }
        let Some(layout) = &self.layout else {
            return;
        };
        if self.router.on_move(local, &layout.slots).changed() {
            self.sync_pointer_state();
            self.host.set_cursor(self.router.cursor());
        }
    }

    /// Pointer left the surface.
    pub fn on_surface_pointer_leave(&mut self) {
        if self.router.on_leave().changed() {
            self.sync_pointer_state();
            self.host.set_cursor(Cursor::Default);
        }
    }

    /// Pointer went down on the surface.
    pub fn on_surface_pointer_down(&mut self, local: Point) {
        if !self.lifecycle.wants_visible() {
            return;
        }
        let Some(layout) = &self.layout else {
            return;
        };
        match self.router.on_down(local, &layout.slots) {
            DownResult::Pressed(_) => {
                self.sync_pointer_state();
                self.host.set_cursor(self.router.cursor());
            }
            DownResult::Missed => self.on_document_pointer_down(true),
        }
    }

    /// Pointer was released on the surface.
    ///
    /// Returns the dispatched action when the release completed a press on a button. Any
    /// dispatch hides the toast, whatever its outcome.
    pub fn on_surface_pointer_up(&mut self, local: Point) -> Option<Dispatched> {
        if !self.lifecycle.wants_visible() {
            return None;
        }
        let layout = self.layout.as_ref()?;
        let result = self.router.on_up(local, &layout.slots);
        self.sync_pointer_state();
        let PressResult::Activate(index) = result else {
            return None;
        };
        let dispatched = self.dispatch(index);
        let transition = self.lifecycle.handle(Trigger::ActionDispatched);
        self.apply(transition);
        dispatched
    }

    /// Process one frame requested through the
    /// [`FrameScheduler`](crate::host::FrameScheduler).
    pub fn on_frame(&mut self) {
        if !self.render_loop.is_running() {
            tracing::trace!("frame without a running loop");
            return;
        }
        if let Some(config) = self.staged_config.take() {
            self.apply_config(config);
        }

        let visible = self.lifecycle.wants_visible();
        self.motion.advance(visible, self.rates);
        if let (Some(layout), Some(surface)) = (&self.layout, self.surface) {
            let frame = build_frame(
                &self.config.style,
                layout,
                &self.motion,
                &self.config.buttons,
                &self.icons,
                surface,
            );
            self.host.present(&frame);
        }
        tracing::trace!(
            frame = self.render_loop.frame_count(),
            opacity = self.motion.opacity(),
            scale = self.motion.scale(),
            "frame"
        );

        let settled = self.motion.is_settled(visible);
        if self.render_loop.finish_frame(settled, &mut self.host) {
            let transition = self.lifecycle.handle(Trigger::Settled);
            self.apply(transition);
        }
    }

    /// A new stored config arrived.
    ///
    /// While frames are running the change is staged and applied at the start of the next
    /// frame; otherwise it applies immediately.
    pub fn on_config_changed(&mut self, patch: ToastConfigPatch) {
        let config = ToastConfig::resolve(patch);
        if self.render_loop.is_running() {
            tracing::debug!("staging config change until the next frame");
            self.staged_config = Some(config);
        } else {
            self.apply_config(config);
        }
    }

    /// The host finished loading the icon for `ticket`.
    pub fn on_icon_loaded(&mut self, ticket: IconTicket, result: Result<(), HostError>) {
        if let Err(err) = &result {
            tracing::warn!(id = %ticket.button_id, %err, "icon failed to load");
        }
        if self.icons.resolve(&ticket, result.is_ok()) {
            tracing::debug!("all icons resolved");
        }
    }

    /// The host replaced the document body, taking the surface with it.
    pub fn on_document_body_replaced(&mut self) {
        tracing::debug!("recreating toast surface");
        self.host.recreate();
        let shown = self.lifecycle.phase() != Phase::Hidden;
        if let (true, Some(layout), Some(surface)) = (shown, &self.layout, self.surface) {
            self.host.set_bounds(layout.canvas_origin, surface);
        }
        self.host.set_visible(shown);
        self.host.set_pointer_events(self.lifecycle.wants_visible());
        self.host.set_cursor(self.router.cursor());
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Show { reset } => self.show(reset),
            Transition::Hide => self.hide(),
            Transition::Settle => {
                tracing::debug!("toast hidden");
                self.host.set_visible(false);
            }
            Transition::None => {}
        }
    }

    fn show(&mut self, reset: bool) {
        let Some(rect) = self.anchor.as_ref().map(|a| a.rect) else {
            return;
        };
        let count = self.config.buttons.len();
        if reset {
            self.router.reset();
            self.motion.reset(count);
        }
        self.relayout(rect);
        self.host.set_visible(true);
        self.host.set_pointer_events(true);
        self.render_loop.start(&mut self.host);
        tracing::debug!(reset, placement = ?self.layout.as_ref().map(|l| l.placement), "toast shown");
    }

    fn hide(&mut self) {
        tracing::debug!("toast hiding");
        self.host.set_pointer_events(false);
        self.router.reset();
        self.sync_pointer_state();
        self.host.set_cursor(Cursor::Default);
        self.render_loop.start(&mut self.host);
    }

    /// Mirror the router's hover and press into the animation targets.
    fn sync_pointer_state(&mut self) {
        self.motion.set_hovered(self.router.hovered());
        self.motion.set_pointer_down(self.router.is_pressed());
    }

    fn relayout(&mut self, selection: Rect) {
        let viewport = self.host.viewport();
        let result = layout(
            selection,
            &self.config.style.metrics(),
            self.config.buttons.len(),
            viewport.size,
        );
        let surface = SurfaceMetrics::new(result.surface_size(), viewport.device_pixel_ratio);
        self.host.set_bounds(result.canvas_origin, surface);
        self.layout = Some(result);
        self.surface = Some(surface);
    }

    fn apply_config(&mut self, config: ToastConfig) {
        let buttons_changed = config.buttons != self.config.buttons;
        self.config = config;
        self.rates = Rates::from_speed(self.config.style.animation_speed);
        self.motion.resize(self.config.buttons.len());
        if buttons_changed {
            // Indices refer to the old buttons; any hover or press on them is void.
            self.router.reset();
            self.sync_pointer_state();
            self.host.set_cursor(Cursor::Default);
            self.load_icons();
        }
        if self.lifecycle.phase() != Phase::Hidden
            && let Some(rect) = self.anchor.as_ref().map(|a| a.rect)
        {
            self.relayout(rect);
        }
        tracing::debug!(buttons = self.config.buttons.len(), "config applied");
    }

    fn load_icons(&mut self) {
        for (ticket, source) in self.icons.begin(&self.config.buttons) {
            self.host.load_icon(ticket, &source);
        }
    }

    fn dispatch(&mut self, index: usize) -> Option<Dispatched> {
        let button = self.config.buttons.get(index)?.clone();
        let (text, range) = match &self.anchor {
            Some(anchor) => (anchor.text.clone(), anchor.range.clone()),
            None => (String::new(), None),
        };
        tracing::debug!(id = %button.id, kind = kind_name(&button.kind), "dispatching");

        let outcome = match &button.kind {
            ButtonKind::Action {
                action: ActionKind::Copy,
            } => match self.host.write_text(&text) {
                Ok(()) => ActionOutcome::Copied,
                Err(err) => {
                    tracing::warn!(%err, "copy failed");
                    ActionOutcome::Failed(err)
                }
            },
            ButtonKind::Action {
                action: ActionKind::Paste,
            } => self.paste(range),
            ButtonKind::Link { url } => match expand_link(url, &text) {
                Ok(url) => {
                    self.host.open_in_new_context(&url);
                    ActionOutcome::Opened(url)
                }
                Err(err) => {
                    tracing::warn!(template = %url, %err, "invalid link URL");
                    ActionOutcome::InvalidUrl(err)
                }
            },
        };

        Some(Dispatched {
            index,
            id: button.id,
            outcome,
        })
    }

    fn paste(&mut self, range: Option<H::Range>) -> ActionOutcome {
        let clip = match self.host.read_text() {
            Ok(clip) => clip,
            Err(err) => {
                tracing::warn!(%err, "clipboard read failed");
                self.host.notify_user(PASTE_PERMISSION_NOTICE);
                return ActionOutcome::Failed(err);
            }
        };
        let Some(range) = range.filter(|range| self.host.is_range_valid(range)) else {
            tracing::debug!("paste target range is gone");
            return ActionOutcome::RangeGone;
        };
        match self.host.replace_range(&range, &clip) {
            Ok(()) => ActionOutcome::Pasted,
            Err(err) => {
                tracing::warn!(%err, "replacing the selection failed");
                ActionOutcome::Failed(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{
        Clipboard, FrameScheduler, IconLoader, Navigator, Notifier, SelectionSource, Surface,
        Viewport,
    };
    use crate::icons::IconSource;
    use crate::paint::Frame;
    use kurbo::Size;
    use url::Url;

    /// Host that records every call.
    #[derive(Default)]
    struct RecordingHost {
        viewport: Viewport,

        clipboard: Option<String>,
        clipboard_error: Option<HostError>,
        written: Vec<String>,

        selection: String,
        range: Option<u32>,
        range_rect: Rect,
        range_valid: bool,
        replaced: Vec<(u32, String)>,
        polls: Vec<u64>,

        icon_requests: Vec<IconTicket>,
        opened: Vec<Url>,
        notices: Vec<String>,

        bounds: Option<(Point, SurfaceMetrics)>,
        visible: bool,
        pointer_events: bool,
        cursor: Cursor,
        presented: Vec<Frame>,
        recreated: u32,

        pending_frames: u32,
    }

    impl Clipboard for RecordingHost {
        fn write_text(&mut self, text: &str) -> Result<(), HostError> {
            if let Some(err) = &self.clipboard_error {
                return Err(err.clone());
            }
            self.written.push(text.to_owned());
            Ok(())
        }

        fn read_text(&mut self) -> Result<String, HostError> {
            match (&self.clipboard_error, &self.clipboard) {
                (Some(err), _) => Err(err.clone()),
                (None, Some(text)) => Ok(text.clone()),
                (None, None) => Err(HostError::Unavailable("empty clipboard".into())),
            }
        }
    }

    impl SelectionSource for RecordingHost {
        type Range = u32;

        fn selection_text(&self) -> String {
            self.selection.clone()
        }

        fn selection_range(&self) -> Option<u32> {
            self.range
        }

        fn range_rect(&self, _range: &u32) -> Rect {
            self.range_rect
        }

        fn is_range_valid(&self, _range: &u32) -> bool {
            self.range_valid
        }

        fn replace_range(&mut self, range: &u32, text: &str) -> Result<(), HostError> {
            self.replaced.push((*range, text.to_owned()));
            Ok(())
        }

        fn schedule_selection_poll(&mut self, delay_ms: u64) {
            self.polls.push(delay_ms);
        }
    }

    impl IconLoader for RecordingHost {
        fn load_icon(&mut self, ticket: IconTicket, _source: &IconSource) {
            self.icon_requests.push(ticket);
        }
    }

    impl Navigator for RecordingHost {
        fn open_in_new_context(&mut self, url: &Url) {
            self.opened.push(url.clone());
        }
    }

    impl Surface for RecordingHost {
        fn viewport(&self) -> Viewport {
            self.viewport
        }

        fn set_bounds(&mut self, origin: Point, metrics: SurfaceMetrics) {
            self.bounds = Some((origin, metrics));
        }

        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }

        fn set_pointer_events(&mut self, enabled: bool) {
            self.pointer_events = enabled;
        }

        fn set_cursor(&mut self, cursor: Cursor) {
            self.cursor = cursor;
        }

        fn present(&mut self, frame: &Frame) {
            self.presented.push(frame.clone());
        }

        fn recreate(&mut self) {
            self.recreated += 1;
        }
    }

    impl FrameScheduler for RecordingHost {
        fn request_frame(&mut self) {
            self.pending_frames += 1;
        }
    }

    impl Notifier for RecordingHost {
        fn notify_user(&mut self, message: &str) {
            self.notices.push(message.to_owned());
        }
    }

    const SELECTION: Rect = Rect::new(200.0, 300.0, 400.0, 320.0);

    fn session() -> ToastSession<RecordingHost> {
        let host = RecordingHost {
            selection: "hello world".into(),
            range: Some(7),
            range_rect: SELECTION,
            range_valid: true,
            clipboard: Some("pasted".into()),
            ..RecordingHost::default()
        };
        ToastSession::new(host, ToastConfig::default())
    }

    /// Run requested frames until none are pending; returns the number run.
    fn pump(session: &mut ToastSession<RecordingHost>, limit: u32) -> u32 {
        let mut ran = 0;
        while session.host().pending_frames > 0 && ran < limit {
            session.host_mut().pending_frames -= 1;
            session.on_frame();
            ran += 1;
        }
        ran
    }

    fn shown() -> ToastSession<RecordingHost> {
        let mut session = session();
        session.on_document_pointer_up(false);
        session.poll_selection();
        pump(&mut session, 40);
        session
    }

    fn slot_center(session: &ToastSession<RecordingHost>, index: usize) -> Point {
        session.layout().unwrap().slots[index].center()
    }

    fn click(session: &mut ToastSession<RecordingHost>, index: usize) -> Option<Dispatched> {
        let p = slot_center(session, index);
        session.on_surface_pointer_move(p);
        session.on_surface_pointer_down(p);
        session.on_surface_pointer_up(p)
    }

    #[test]
    fn starts_hidden_and_requests_icons() {
        let session = session();
        assert_eq!(session.phase(), Phase::Hidden);
        assert!(!session.is_running());
        assert!(!session.host().visible);
        assert!(!session.host().pointer_events);
        assert_eq!(session.host().icon_requests.len(), 3);
        assert!(!session.icons_ready());
    }

    #[test]
    fn pointer_up_polls_selection_once() {
        let mut session = session();
        session.on_document_pointer_up(false);
        session.on_document_pointer_up(false);
        session.on_document_pointer_up(true);
        assert_eq!(session.host().polls, [SELECTION_SETTLE_DELAY_MS]);
        session.poll_selection();
        session.on_document_pointer_up(false);
        assert_eq!(session.host().polls.len(), 2);
    }

    #[test]
    fn selection_shows_the_toast() {
        let mut session = session();
        session.poll_selection();
        assert_eq!(session.phase(), Phase::Visible);
        assert!(session.is_running());
        assert!(session.host().visible);
        assert!(session.host().pointer_events);
        let (origin, metrics) = session.host().bounds.unwrap();
        let layout = session.layout().unwrap();
        assert_eq!(origin, layout.canvas_origin);
        assert_eq!(metrics.logical_size(), layout.surface_size());

        pump(&mut session, 40);
        assert!(session.motion().opacity() > 0.98);
        assert!(session.is_running(), "a visible toast keeps its loop");
        assert!(!session.host().presented.is_empty());
    }

    #[test]
    fn empty_or_degenerate_selections_do_not_show() {
        let mut session = session();
        session.on_selection_changed("   ".into(), Some(1), SELECTION);
        assert_eq!(session.phase(), Phase::Hidden);
        session.on_selection_changed("text".into(), Some(1), Rect::new(5.0, 5.0, 5.0, 20.0));
        assert_eq!(session.phase(), Phase::Hidden);
        assert!(!session.is_running());
    }

    #[test]
    fn scroll_hides_before_the_next_paint() {
        let mut session = shown();
        let presented = session.host().presented.len();
        session.on_scroll();
        assert_eq!(session.phase(), Phase::Hiding);
        assert!(!session.host().pointer_events);
        assert_eq!(session.motion().targets(session.wants_visible()).opacity(), 0.0);
        assert_eq!(session.host().presented.len(), presented);

        let before = session.motion().opacity();
        pump(&mut session, 1);
        assert!(session.motion().opacity() < before);

        pump(&mut session, 200);
        assert_eq!(session.phase(), Phase::Hidden);
        assert!(!session.is_running());
        assert!(!session.host().visible);
        assert_eq!(session.host().pending_frames, 0);
        assert!(session.motion().opacity() < canvas_toast_motion::SETTLE_EPSILON);
    }

    #[test]
    fn settling_paints_the_final_frame_then_stops() {
        let mut session = shown();
        session.on_document_pointer_down(false);
        let before = session.host().presented.len();
        let ran = pump(&mut session, 500);
        assert!(ran < 500, "loop terminates");
        assert_eq!(session.host().presented.len(), before + ran as usize);
        let last = session.host().presented.last().unwrap();
        assert!(last.opacity < canvas_toast_motion::SETTLE_EPSILON);
        session.on_frame();
        assert_eq!(
            session.host().presented.len(),
            before + ran as usize,
            "stopped loop ignores stray frames"
        );
    }

    #[test]
    fn show_during_hide_reverses_without_reset() {
        let mut session = shown();
        session.on_scroll();
        pump(&mut session, 3);
        let mid = session.motion().opacity();
        assert!(mid > 0.0 && mid < 1.0);

        session.poll_selection();
        assert_eq!(session.phase(), Phase::Visible);
        assert_eq!(session.motion().opacity(), mid, "state kept on reversal");
        pump(&mut session, 1);
        assert!(session.motion().opacity() > mid);
    }

    #[test]
    fn copy_writes_selection_and_hides() {
        let mut session = shown();
        let dispatched = click(&mut session, 0).unwrap();
        assert_eq!(dispatched.id, "copy");
        assert_eq!(dispatched.outcome, ActionOutcome::Copied);
        assert_eq!(session.host().written, ["hello world"]);
        assert_eq!(session.phase(), Phase::Hiding);
        assert!(!session.motion().is_pointer_down());
        assert_eq!(session.host().cursor, Cursor::Default);
    }

    #[test]
    fn link_opens_escaped_url() {
        let mut session = shown();
        session.on_config_changed(
            ToastConfigPatch::from_json(
                r#"{ "buttons": [
                    { "id": "x", "type": "link", "url": "https://x.com/s?q=%s", "icon": "x.png" }
                ] }"#,
            )
            .unwrap(),
        );
        pump(&mut session, 1);
        session.on_selection_changed("a b".into(), Some(3), SELECTION);
        let dispatched = click(&mut session, 0).unwrap();
        let url = Url::parse("https://x.com/s?q=a%20b").unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::Opened(url.clone()));
        assert_eq!(session.host().opened, [url]);
        assert_eq!(session.phase(), Phase::Hiding);
    }

    #[test]
    fn paste_replaces_a_live_range() {
        let mut session = shown();
        let dispatched = click(&mut session, 2).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::Pasted);
        assert_eq!(session.host().replaced, [(7, "pasted".to_owned())]);
    }

    #[test]
    fn paste_failure_warns_and_hides_without_mutation() {
        let mut session = shown();
        session.host_mut().clipboard_error = Some(HostError::Denied("clipboard-read".into()));
        let dispatched = click(&mut session, 2).unwrap();
        assert!(matches!(
            dispatched.outcome,
            ActionOutcome::Failed(HostError::Denied(_))
        ));
        assert!(session.host().replaced.is_empty());
        assert_eq!(session.host().notices, [PASTE_PERMISSION_NOTICE]);
        assert_eq!(session.phase(), Phase::Hiding);
    }

    #[test]
    fn paste_into_stale_range_is_skipped() {
        let mut session = shown();
        session.host_mut().range_valid = false;
        let dispatched = click(&mut session, 2).unwrap();
        assert_eq!(dispatched.outcome, ActionOutcome::RangeGone);
        assert!(session.host().replaced.is_empty());
    }

    #[test]
    fn copy_failure_is_logged_only() {
        let mut session = shown();
        session.host_mut().clipboard_error = Some(HostError::Other("busy".into()));
        let dispatched = click(&mut session, 0).unwrap();
        assert!(matches!(dispatched.outcome, ActionOutcome::Failed(_)));
        assert!(session.host().notices.is_empty());
        assert_eq!(session.phase(), Phase::Hiding);
    }

    #[test]
    fn release_off_the_pressed_button_does_nothing() {
        let mut session = shown();
        let down = slot_center(&session, 0);
        session.on_surface_pointer_down(down);
        assert!(session.motion().is_pointer_down());
        assert_eq!(session.on_surface_pointer_up(slot_center(&session, 1)), None);
        assert_eq!(session.phase(), Phase::Visible);
        assert!(session.host().written.is_empty());
    }

    #[test]
    fn press_held_across_selection_change_keeps_the_toast() {
        let mut session = shown();
        session.on_surface_pointer_down(slot_center(&session, 0));
        session.on_selection_changed(String::new(), None, Rect::ZERO);
        assert_eq!(session.phase(), Phase::Visible);

        session.on_document_pointer_up(false);
        assert!(!session.motion().is_pointer_down(), "press abandoned off the surface");
        session.on_selection_changed(String::new(), None, Rect::ZERO);
        assert_eq!(session.phase(), Phase::Hiding);
    }

    #[test]
    fn hover_updates_cursor_and_motion() {
        let mut session = shown();
        session.on_surface_pointer_move(slot_center(&session, 1));
        assert_eq!(session.hovered(), Some(1));
        assert_eq!(session.motion().hovered(), Some(1));
        assert_eq!(session.host().cursor, Cursor::Pointer);

        session.on_surface_pointer_move(Point::new(1.0, 1.0));
        assert_eq!(session.host().cursor, Cursor::Default);

        session.on_surface_pointer_move(slot_center(&session, 1));
        session.on_surface_pointer_leave();
        assert_eq!(session.hovered(), None);
        assert_eq!(session.motion().hovered(), None);
        assert_eq!(session.host().cursor, Cursor::Default);
    }

    #[test]
    fn down_on_surface_padding_does_not_hide() {
        let mut session = shown();
        session.on_surface_pointer_down(Point::new(1.0, 1.0));
        assert_eq!(session.phase(), Phase::Visible);
        assert!(!session.motion().is_pointer_down());
    }

    #[test]
    fn hidden_toast_ignores_surface_input() {
        let mut session = session();
        session.on_surface_pointer_move(Point::new(40.0, 40.0));
        assert_eq!(session.hovered(), None);
        assert_eq!(session.on_surface_pointer_up(Point::new(40.0, 40.0)), None);
    }

    #[test]
    fn config_change_is_staged_while_running() {
        let mut session = shown();
        let patch = ToastConfigPatch::from_json(r#"{ "style": { "buttonSize": 48 } }"#).unwrap();
        session.on_config_changed(patch);
        assert_eq!(session.config().style.button_size, 36.0, "staged until the next frame");
        pump(&mut session, 1);
        assert_eq!(session.config().style.button_size, 48.0);
        assert_eq!(session.layout().unwrap().slots[0].width(), 48.0);
        assert_eq!(session.host().icon_requests.len(), 3, "same buttons, no reload");
    }

    #[test]
    fn config_change_applies_immediately_when_stopped() {
        let mut session = session();
        let patch = ToastConfigPatch::from_json(
            r#"{ "buttons": [ { "id": "c", "type": "action", "action": "copy", "icon": "c.png" } ] }"#,
        )
        .unwrap();
        session.on_config_changed(patch);
        assert_eq!(session.config().buttons.len(), 1);
        assert_eq!(session.motion().button_count(), 1);
        assert_eq!(session.host().icon_requests.len(), 4);
        assert_eq!(session.host().icon_requests[3].generation, 2);
    }

    fn single_button_patch() -> ToastConfigPatch {
        ToastConfigPatch::from_json(
            r#"{ "buttons": [ { "id": "c", "type": "action", "action": "copy", "icon": "c.png" } ] }"#,
        )
        .unwrap()
    }

    #[test]
    fn config_change_during_a_press_drops_the_press() {
        let mut session = shown();
        session.on_surface_pointer_down(slot_center(&session, 0));
        assert!(session.motion().is_pointer_down());

        session.on_config_changed(single_button_patch());
        pump(&mut session, 1);
        assert!(!session.motion().is_pointer_down(), "press on a replaced button is void");
        assert_eq!(session.motion().hovered(), None);

        session.on_document_pointer_up(false);
        session.host_mut().selection = String::new();
        session.poll_selection();
        assert_eq!(session.phase(), Phase::Hiding);

        session.host_mut().selection = "new".into();
        session.poll_selection();
        assert_eq!(session.phase(), Phase::Visible);
        assert_eq!(session.layout().unwrap().slots.len(), 1);
    }

    #[test]
    fn shrinking_buttons_clears_hover_on_removed_button() {
        let mut session = shown();
        let removed = slot_center(&session, 2);
        session.on_surface_pointer_move(removed);
        assert_eq!(session.hovered(), Some(2));
        assert_eq!(session.host().cursor, Cursor::Pointer);

        session.on_config_changed(single_button_patch());
        pump(&mut session, 1);
        assert_eq!(session.hovered(), None);
        assert_eq!(session.motion().hovered(), None);
        assert_eq!(session.motion().button_count(), 1);
        assert_eq!(session.host().cursor, Cursor::Default);

        session.on_surface_pointer_move(removed);
        assert_eq!(session.hovered(), None);
        session.on_surface_pointer_down(removed);
        assert_eq!(session.on_surface_pointer_up(removed), None);
        assert_eq!(session.phase(), Phase::Visible);
        assert!(session.host().written.is_empty());
    }

    #[test]
    fn icons_drawn_after_every_ticket_resolves() {
        let mut session = shown();
        let has_icons = |s: &ToastSession<RecordingHost>| {
            s.host()
                .presented
                .last()
                .unwrap()
                .ops
                .iter()
                .any(|op| matches!(op, crate::paint::PaintOp::Icon { .. }))
        };
        assert!(!has_icons(&session));

        let tickets = session.host().icon_requests.clone();
        session.on_icon_loaded(tickets[0].clone(), Ok(()));
        session.on_icon_loaded(tickets[1].clone(), Err(HostError::Other("decode".into())));
        pump(&mut session, 1);
        assert!(!has_icons(&session));

        session.on_icon_loaded(tickets[2].clone(), Ok(()));
        assert!(session.icons_ready());
        pump(&mut session, 1);
        assert!(has_icons(&session));
    }

    #[test]
    fn body_replacement_restores_the_surface() {
        let mut live = shown();
        live.host_mut().visible = false;
        live.host_mut().pointer_events = false;
        live.host_mut().bounds = None;
        live.on_document_body_replaced();
        assert_eq!(live.host().recreated, 1);
        assert!(live.host().visible);
        assert!(live.host().pointer_events);
        assert!(live.host().bounds.is_some());

        let mut hidden = session();
        hidden.on_document_body_replaced();
        assert!(!hidden.host().visible);
        assert!(!hidden.host().pointer_events);
    }

    #[test]
    fn toolbar_flips_below_near_the_top() {
        let mut session = session();
        session.host_mut().viewport = Viewport {
            size: Size::new(800.0, 600.0),
            device_pixel_ratio: 2.0,
        };
        session.on_selection_changed("top".into(), None, Rect::new(100.0, 10.0, 180.0, 30.0));
        let layout = session.layout().unwrap();
        assert_eq!(layout.placement, canvas_toast_layout::Placement::Below);
        let (_, metrics) = session.host().bounds.unwrap();
        assert_eq!(metrics.scale(), 2.0);
    }
}
