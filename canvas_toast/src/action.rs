// Copyright 2025 the Canvas Toast Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Button actions.

use url::Url;

use crate::config::{ActionKind, ButtonKind};
use crate::error::HostError;

/// Placeholder in link templates replaced by the selection text.
pub const URL_PLACEHOLDER: &str = "%s";

/// Shown once when reading the clipboard fails during a paste.
pub const PASTE_PERMISSION_NOTICE: &str =
    "Paste failed. Allow clipboard access for this site and try again.";

/// Build the URL for a link button.
///
/// The first [`URL_PLACEHOLDER`] is replaced by the percent-encoded `text`; a template
/// without a placeholder is used verbatim. The result must be an absolute URL.
///
/// Encoding follows the URI component rules: `!'()*` pass through unescaped alongside the
/// unreserved characters.
pub fn expand_link(template: &str, text: &str) -> Result<Url, url::ParseError> {
    let expanded = if template.contains(URL_PLACEHOLDER) {
        template.replacen(URL_PLACEHOLDER, &encode_component(text), 1)
    } else {
        template.to_owned()
    };
    Url::parse(&expanded)
}

/// Marks a URI component may carry unescaped.
const COMPONENT_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

fn encode_component(text: &str) -> String {
    // A literal `%` is always emitted as `%25`, so these escapes never overlap it.
    let mut encoded = urlencoding::encode(text).into_owned();
    for (escaped, mark) in COMPONENT_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}

/// What a dispatched button did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Selection text written to the clipboard.
    Copied,
    /// Selection range replaced with the clipboard text.
    Pasted,
    /// Link opened.
    Opened(Url),
    /// Paste skipped because the selection range no longer exists.
    RangeGone,
    /// Link template did not produce a valid URL.
    InvalidUrl(url::ParseError),
    /// A host service failed.
    Failed(HostError),
}

/// A button activation and its outcome.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatched {
    /// Index of the activated button.
    pub index: usize,
    /// Id of the activated button.
    pub id: String,
    /// What happened.
    pub outcome: ActionOutcome,
}

/// Short name of a button kind for logs.
pub(crate) fn kind_name(kind: &ButtonKind) -> &'static str {
    match kind {
        ButtonKind::Action {
            action: ActionKind::Copy,
        } => "copy",
        ButtonKind::Action {
            action: ActionKind::Paste,
        } => "paste",
        ButtonKind::Link { .. } => "link",
    }
}
