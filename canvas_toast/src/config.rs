// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toast configuration: style, buttons, defaults, and merging of stored partial configs.
//!
//! The stored form is the JSON document written by the settings editor:
//!
//! ```json
//! {
//!   "style": { "bgColor": "#1e293b", "bgOpacity": 0.95, "buttonSize": 36 },
//!   "buttons": [
//!     { "id": "copy", "type": "action", "action": "copy", "icon": "<svg ...>" },
//!     { "id": "search", "type": "link", "url": "https://duckduckgo.com/?q=%s", "icon": "..." }
//!   ]
//! }
//! ```
//!
//! Every field is optional. [`ToastConfig::resolve`] fills missing style fields one by one from
//! [`Style::default`], and replaces a missing or empty button list with the built-in set.
//! Values outside their valid range are repaired and logged.

use serde::{Deserialize, Serialize};

use canvas_toast_layout::ToolbarMetrics;
use canvas_toast_motion::DEFAULT_SPEED;

use crate::color::Rgba;
use crate::error::ConfigError;
use crate::icons::IconSource;

/// Visual parameters of the toast. Fixed for the duration of a frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    /// Toolbar background color.
    #[serde(rename = "bgColor")]
    pub background_color: Rgba,
    /// Toolbar background opacity in `[0, 1]`.
    #[serde(rename = "bgOpacity")]
    pub background_opacity: f64,
    /// Button highlight color.
    pub hover_color: Rgba,
    /// Peak opacity of the button highlight in `[0, 1]`.
    pub hover_opacity: f64,
    /// Toolbar corner radius; button highlights use half of it.
    #[serde(rename = "borderRadius")]
    pub corner_radius: f64,
    /// Side of each square button.
    pub button_size: f64,
    /// Space between buttons.
    pub button_spacing: f64,
    /// Space between the toolbar edge and the buttons.
    pub padding: f64,
    /// Side of each square icon.
    pub icon_size: f64,
    /// Fraction of the remaining distance covered per frame, in `(0, 1]`.
    pub animation_speed: f64,
    /// Scale of a fully hovered button, at least 1.
    pub hover_scale: f64,
    /// Scale of a fully pressed button, in `(0, 1]`.
    pub active_scale: f64,
    /// How far a fully hovered icon rises, in pixels.
    pub icon_lift: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            background_color: Rgba::rgb(0x1e, 0x29, 0x3b),
            background_opacity: 0.95,
            hover_color: Rgba::rgb(0x3b, 0x82, 0xf6),
            hover_opacity: 0.2,
            corner_radius: 12.0,
            button_size: 36.0,
            button_spacing: 6.0,
            padding: 6.0,
            icon_size: 20.0,
            animation_speed: DEFAULT_SPEED,
            hover_scale: 1.08,
            active_scale: 0.92,
            icon_lift: 3.0,
        }
    }
}

impl Style {
    /// Toolbar geometry parameters.
    pub fn metrics(&self) -> ToolbarMetrics {
        ToolbarMetrics {
            button_size: self.button_size,
            button_spacing: self.button_spacing,
            padding: self.padding,
        }
    }

    /// Repair out-of-range fields.
    ///
    /// Opacities are clamped into `[0, 1]`. Any other field that is non-finite or out of range
    /// is replaced by its default. Each repair is logged.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        Self {
            background_opacity: unit("bgOpacity", self.background_opacity, d.background_opacity),
            hover_opacity: unit("hoverOpacity", self.hover_opacity, d.hover_opacity),
            corner_radius: checked("borderRadius", self.corner_radius, d.corner_radius, |v| {
                v >= 0.0
            }),
            button_size: checked("buttonSize", self.button_size, d.button_size, |v| v > 0.0),
            button_spacing: checked("buttonSpacing", self.button_spacing, d.button_spacing, |v| {
                v >= 0.0
            }),
            padding: checked("padding", self.padding, d.padding, |v| v >= 0.0),
            icon_size: checked("iconSize", self.icon_size, d.icon_size, |v| v > 0.0),
            animation_speed: checked("animationSpeed", self.animation_speed, d.animation_speed, |v| {
                v > 0.0 && v <= 1.0
            }),
            hover_scale: checked("hoverScale", self.hover_scale, d.hover_scale, |v| v >= 1.0),
            active_scale: checked("activeScale", self.active_scale, d.active_scale, |v| {
                v > 0.0 && v <= 1.0
            }),
            icon_lift: checked("iconLift", self.icon_lift, d.icon_lift, |v| v >= 0.0),
            ..self
        }
    }
}

fn unit(field: &'static str, value: f64, default: f64) -> f64 {
    if !value.is_finite() {
        tracing::warn!(field, value, "non-finite style value, using default");
        return default;
    }
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        tracing::warn!(field, value, clamped, "style opacity out of range, clamping");
    }
    clamped
}

fn checked(field: &'static str, value: f64, default: f64, valid: impl Fn(f64) -> bool) -> f64 {
    if value.is_finite() && valid(value) {
        value
    } else {
        tracing::warn!(field, value, default, "invalid style value, using default");
        default
    }
}

/// Built-in clipboard actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Copy the selection text to the clipboard.
    Copy,
    /// Replace the selection with the clipboard text.
    Paste,
}

/// What a button does when activated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ButtonKind {
    /// A built-in clipboard action.
    Action {
        /// Which action.
        action: ActionKind,
    },
    /// Open a URL in a new browsing context.
    Link {
        /// URL template; the first [`URL_PLACEHOLDER`](crate::URL_PLACEHOLDER) is replaced by
        /// the escaped selection text.
        url: String,
    },
}

/// One toolbar button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSpec {
    /// Identifier, unique within a config.
    pub id: String,
    /// Behavior on activation.
    #[serde(flatten)]
    pub kind: ButtonKind,
    /// Icon drawn on the button.
    pub icon: IconSource,
}

const COPY_ICON: &str = r##"<svg viewBox="0 0 24 24" fill="none" stroke="#ddd" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" xmlns="http://www.w3.org/2000/svg"><rect x="9" y="9" width="13" height="13" rx="2" ry="2"></rect><path d="M5 15H4a2 2 0 0 1-2-2V4a2 2 0 0 1 2-2h9a2 2 0 0 1 2 2v1"></path></svg>"##;
const SEARCH_ICON: &str = r##"<svg viewBox="0 0 24 24" fill="none" stroke="#ddd" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" xmlns="http://www.w3.org/2000/svg"><circle cx="11" cy="11" r="8"></circle><line x1="21" y1="21" x2="16.65" y2="16.65"></line></svg>"##;
const PASTE_ICON: &str = r##"<svg viewBox="0 0 24 24" fill="none" stroke="#ddd" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" xmlns="http://www.w3.org/2000/svg"><path d="M16 4h2a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2H6a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2h2"></path><rect x="8" y="2" width="8" height="4" rx="1" ry="1"></rect></svg>"##;

/// The built-in button set: copy, web search, paste.
pub fn default_buttons() -> Vec<ButtonSpec> {
    vec![
        ButtonSpec {
            id: "copy".into(),
            kind: ButtonKind::Action {
                action: ActionKind::Copy,
            },
            icon: IconSource::parse(COPY_ICON),
        },
        ButtonSpec {
            id: "google".into(),
            kind: ButtonKind::Link {
                url: "https://www.google.com/search?q=%s".into(),
            },
            icon: IconSource::parse(SEARCH_ICON),
        },
        ButtonSpec {
            id: "paste".into(),
            kind: ButtonKind::Action {
                action: ActionKind::Paste,
            },
            icon: IconSource::parse(PASTE_ICON),
        },
    ]
}

/// A complete, validated configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToastConfig {
    /// Visual style.
    pub style: Style,
    /// Buttons, left to right. Never empty.
    pub buttons: Vec<ButtonSpec>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            buttons: default_buttons(),
        }
    }
}

impl ToastConfig {
    /// Merge a stored partial config over the defaults.
    pub fn resolve(patch: ToastConfigPatch) -> Self {
        let style = patch.style.unwrap_or_default().apply(Style::default()).sanitized();
        let buttons = match patch.buttons {
            Some(buttons) if !buttons.is_empty() => dedupe_ids(buttons),
            _ => default_buttons(),
        };
        Self { style, buttons }
    }

    /// Load from a provider, falling back to the defaults when it has nothing.
    pub fn load(provider: &impl ConfigProvider) -> Self {
        provider.get().map(Self::resolve).unwrap_or_default()
    }
}

/// Give repeated ids a positional suffix so every id stays unique.
fn dedupe_ids(mut buttons: Vec<ButtonSpec>) -> Vec<ButtonSpec> {
    let mut seen = hashbrown::HashSet::new();
    for (index, button) in buttons.iter_mut().enumerate() {
        if !seen.insert(button.id.clone()) {
            let renamed = format!("{}#{index}", button.id);
            tracing::warn!(id = %button.id, %renamed, "duplicate button id");
            button.id = renamed;
            seen.insert(button.id.clone());
        }
    }
    buttons
}

/// Stored style with every field optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs, reason = "Fields mirror `Style`")]
pub struct StylePatch {
    #[serde(rename = "bgColor", alias = "backgroundColor")]
    pub background_color: Option<Rgba>,
    #[serde(rename = "bgOpacity", alias = "backgroundOpacity")]
    pub background_opacity: Option<f64>,
    pub hover_color: Option<Rgba>,
    pub hover_opacity: Option<f64>,
    #[serde(rename = "borderRadius", alias = "cornerRadius")]
    pub corner_radius: Option<f64>,
    pub button_size: Option<f64>,
    pub button_spacing: Option<f64>,
    pub padding: Option<f64>,
    pub icon_size: Option<f64>,
    pub animation_speed: Option<f64>,
    pub hover_scale: Option<f64>,
    pub active_scale: Option<f64>,
    pub icon_lift: Option<f64>,
}

impl StylePatch {
    /// Overlay the present fields on `base`.
    pub fn apply(self, base: Style) -> Style {
        Style {
            background_color: self.background_color.unwrap_or(base.background_color),
            background_opacity: self.background_opacity.unwrap_or(base.background_opacity),
            hover_color: self.hover_color.unwrap_or(base.hover_color),
            hover_opacity: self.hover_opacity.unwrap_or(base.hover_opacity),
            corner_radius: self.corner_radius.unwrap_or(base.corner_radius),
            button_size: self.button_size.unwrap_or(base.button_size),
            button_spacing: self.button_spacing.unwrap_or(base.button_spacing),
            padding: self.padding.unwrap_or(base.padding),
            icon_size: self.icon_size.unwrap_or(base.icon_size),
            animation_speed: self.animation_speed.unwrap_or(base.animation_speed),
            hover_scale: self.hover_scale.unwrap_or(base.hover_scale),
            active_scale: self.active_scale.unwrap_or(base.active_scale),
            icon_lift: self.icon_lift.unwrap_or(base.icon_lift),
        }
    }
}

/// Stored config with every part optional, as delivered by a [`ConfigProvider`] or a change
/// notification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToastConfigPatch {
    /// Style overrides.
    pub style: Option<StylePatch>,
    /// Button list; `None` or empty selects the built-in set.
    pub buttons: Option<Vec<ButtonSpec>>,
}

impl ToastConfigPatch {
    /// Parse the stored JSON form.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Source of the stored configuration at startup.
pub trait ConfigProvider {
    /// The stored config, if there is one.
    fn get(&self) -> Option<ToastConfigPatch>;
}

/// A [`ConfigProvider`] over a stored JSON document.
///
/// A malformed document is logged and treated as absent.
#[derive(Clone, Debug, Default)]
pub struct JsonConfigSource {
    json: Option<String>,
}

impl JsonConfigSource {
    /// A source holding `json`.
    pub fn new(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }

    /// A source with nothing stored.
    pub fn empty() -> Self {
        Self::default()
    }
}

impl ConfigProvider for JsonConfigSource {
    fn get(&self) -> Option<ToastConfigPatch> {
        let json = self.json.as_deref()?;
        match ToastConfigPatch::from_json(json) {
            Ok(patch) => Some(patch),
            Err(err) => {
                tracing::warn!(%err, "ignoring stored toast config");
                None
            }
        }
    }
}
