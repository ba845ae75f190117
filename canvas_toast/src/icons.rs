// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Icon sources and load tracking.
//!
//! Icons are decoded by the host. The session hands each button's [`IconSource`] to the
//! host's [`IconLoader`](crate::host::IconLoader) together with an [`IconTicket`], and the host
//! reports back through [`ToastSession::on_icon_loaded`](crate::ToastSession::on_icon_loaded).
//! Icons are painted only once every ticket of the current generation has come back, either
//! loaded or failed, so a toolbar never shows a partial icon set.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hashbrown::HashSet;

use crate::config::ButtonSpec;

/// Where a button's icon comes from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconSource {
    /// Inline SVG markup.
    Svg(String),
    /// Any other image reference (URL, data URI, extension asset path).
    Image(String),
}

impl IconSource {
    /// Classify a configured icon string; markup starting with `<svg` is inline SVG.
    pub fn parse(raw: &str) -> Self {
        if raw.trim_start().starts_with("<svg") {
            Self::Svg(raw.to_owned())
        } else {
            Self::Image(raw.to_owned())
        }
    }

    /// A string an image decoder can load directly.
    ///
    /// Inline SVG is wrapped as a base64 `data:image/svg+xml` URI; image references are
    /// returned as-is.
    pub fn image_src(&self) -> String {
        match self {
            Self::Svg(markup) => {
                format!("data:image/svg+xml;base64,{}", STANDARD.encode(markup))
            }
            Self::Image(src) => src.clone(),
        }
    }

    /// The configured string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Svg(s) | Self::Image(s) => s,
        }
    }
}

impl From<String> for IconSource {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<IconSource> for String {
    fn from(source: IconSource) -> Self {
        match source {
            IconSource::Svg(s) | IconSource::Image(s) => s,
        }
    }
}

/// Identifies one icon load request.
///
/// The generation changes whenever the button set is replaced, so results for a previous
/// config are recognized and dropped.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct IconTicket {
    /// Load generation this request belongs to.
    pub generation: u64,
    /// Id of the button whose icon is loading.
    pub button_id: String,
}

/// Ids still waiting for a result.
#[derive(Clone, Debug, Default)]
pub struct PendingSet {
    outstanding: HashSet<String>,
}

impl PendingSet {
    /// A set waiting on every id in `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outstanding: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Mark `id` as resolved. Returns `true` if it was outstanding.
    pub fn mark_resolved(&mut self, id: &str) -> bool {
        self.outstanding.remove(id)
    }

    /// Whether every id has resolved.
    pub fn is_complete(&self) -> bool {
        self.outstanding.is_empty()
    }

    /// Number of outstanding ids.
    pub fn len(&self) -> usize {
        self.outstanding.len()
    }

    /// Whether nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.outstanding.is_empty()
    }
}

/// Load state of the current button set's icons.
#[derive(Clone, Debug, Default)]
pub(crate) struct IconSet {
    generation: u64,
    pending: PendingSet,
    loaded: HashSet<String>,
}

impl IconSet {
    /// Start loading icons for `buttons`, forgetting any previous set.
    pub(crate) fn begin(&mut self, buttons: &[ButtonSpec]) -> Vec<(IconTicket, IconSource)> {
        self.generation += 1;
        self.pending = PendingSet::new(buttons.iter().map(|b| b.id.as_str()));
        self.loaded.clear();
        buttons
            .iter()
            .map(|b| {
                let ticket = IconTicket {
                    generation: self.generation,
                    button_id: b.id.clone(),
                };
                (ticket, b.icon.clone())
            })
            .collect()
    }

    /// Record a load result. Returns `true` if this result completed the set.
    ///
    /// Results for an older generation or an id that already resolved are ignored.
    pub(crate) fn resolve(&mut self, ticket: &IconTicket, loaded: bool) -> bool {
        if ticket.generation != self.generation || !self.pending.mark_resolved(&ticket.button_id)
        {
            return false;
        }
        if loaded {
            self.loaded.insert(ticket.button_id.clone());
        }
        self.pending.is_complete()
    }

    /// Whether every icon of the current set has resolved.
    pub(crate) fn is_ready(&self) -> bool {
        self.pending.is_complete()
    }

    /// Whether the icon for `id` should be drawn this frame.
    pub(crate) fn is_drawable(&self, id: &str) -> bool {
        self.is_ready() && self.loaded.contains(id)
    }
}
