//! Markup stripping for note lines.
//!
//! # Responsibility
//! - Remove an optional highlight wrapper and report its color.
//! - Remove a single leading bullet glyph or checkbox token.
//! - Derive the display text and checkbox prefix of Kanban task lines.
//!
//! # Invariants
//! - Each strip operation removes at most one occurrence of its markup.
//! - Input without the markup is returned unchanged (never an error).

use once_cell::sync::Lazy;
use regex::Regex;

static HIGHLIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<highlight\s+color=["']([^"']+)["']>(.+)</highlight>"#)
        .expect("valid highlight regex")
});
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[•\-*+]\s+").expect("valid bullet regex"));
static CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*-?\s*\[[ x]?\]\s*").expect("valid checkbox regex"));
static CHECKED_BOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^-?\s*\[x\]").expect("valid checked box regex"));
static CHECKBOX_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-\s*\[[ xX]\]\s*|\[[ xX]\]\s*)").expect("valid checkbox prefix regex")
});
static LEADING_INVISIBLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\x{200B}\x{FEFF}]*").expect("valid invisible regex"));
static BULLET_CHECKBOX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[-–—•*+]\s*\[[ x]?\]\s*").expect("valid bullet checkbox regex")
});
static BARE_CHECKBOX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\[[ x]?\]\s*").expect("valid bare checkbox regex"));
static DISPLAY_BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-–—•*+]\s+").expect("valid display bullet regex"));
static HIGHLIGHT_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?highlight[^>]*>").expect("valid highlight tag regex"));
static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color regex"));

/// Prefix used when a task line carries no checkbox of its own.
pub const DEFAULT_CHECKBOX_PREFIX: &str = "- [ ] ";

/// Result of [`strip_highlight`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedHighlight {
    /// Text with the wrapper removed (trimmed when a wrapper was found).
    pub content: String,
    /// Color attribute of the wrapper, `None` when the text was not wrapped.
    pub color: Option<String>,
}

/// Located highlight wrapper inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HighlightSpan<'a> {
    pub before: &'a str,
    pub color: &'a str,
    pub inner: &'a str,
    pub after: &'a str,
}

pub(crate) fn find_highlight(text: &str) -> Option<HighlightSpan<'_>> {
    let caps = HIGHLIGHT_RE.captures(text)?;
    let whole = caps.get(0)?;
    Some(HighlightSpan {
        before: &text[..whole.start()],
        color: caps.get(1)?.as_str(),
        inner: caps.get(2)?.as_str(),
        after: &text[whole.end()..],
    })
}

/// Removes a `<highlight color="NAME">…</highlight>` wrapper.
///
/// The tag is matched case-insensitively with either quote style; text around
/// the wrapper is kept in place.
pub fn strip_highlight(text: &str) -> StrippedHighlight {
    match find_highlight(text) {
        Some(span) => StrippedHighlight {
            content: format!("{}{}{}", span.before, span.inner, span.after)
                .trim()
                .to_string(),
            color: Some(span.color.to_string()),
        },
        None => StrippedHighlight {
            content: text.to_string(),
            color: None,
        },
    }
}

/// Emits the canonical highlight wrapper (lowercase tag, double quotes).
pub fn wrap_highlight(content: &str, color: &str) -> String {
    format!("<highlight color=\"{color}\">{content}</highlight>")
}

/// Removes one leading bullet glyph (`-`, `•`, `*`, `+`) and its whitespace.
pub fn strip_bullet(text: &str) -> &str {
    match BULLET_RE.find(text) {
        Some(found) => &text[found.end()..],
        None => text,
    }
}

/// Removes one leading `[ ]` / `[x]` token, with an optional bullet dash.
pub fn strip_checkbox(text: &str) -> &str {
    match CHECKBOX_RE.find(text) {
        Some(found) => text[found.end()..].trim(),
        None => text,
    }
}

/// Returns whether the line starts with a ticked checkbox.
pub fn has_checked_box(text: &str) -> bool {
    CHECKED_BOX_RE.is_match(text)
}

/// Returns the literal checkbox prefix of a task line.
///
/// Falls back to [`DEFAULT_CHECKBOX_PREFIX`] when the line has none.
pub fn checkbox_prefix(markdown: &str) -> &str {
    CHECKBOX_PREFIX_RE
        .find(markdown)
        .map(|found| found.as_str())
        .unwrap_or(DEFAULT_CHECKBOX_PREFIX)
}

/// Derives the display text of a task line.
///
/// Drops leading zero-width characters, the bullet/checkbox prefix and every
/// highlight tag.
pub fn task_display_text(markdown: &str) -> String {
    let text = LEADING_INVISIBLE_RE.replace(markdown.trim(), "");
    let text = BULLET_CHECKBOX_RE.replace(&text, "");
    let text = BARE_CHECKBOX_RE.replace(&text, "");
    let text = DISPLAY_BULLET_RE.replace(&text, "");
    let text = HIGHLIGHT_TAG_RE.replace_all(&text, "");
    text.trim().to_string()
}

/// Returns whether a highlight value is a `#RRGGBB` color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}
