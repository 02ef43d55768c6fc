//! Clipboard export of icon markup.
//!
//! Rewrites are done with attribute-level pattern substitution rather than a
//! full XML parse. Only whole attribute names are matched, so `stroke-width`
//! is never mistaken for `width`, and both quote styles are accepted.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Dimension written when an icon has no explicit width or height.
pub const DEFAULT_DIMENSION: u32 = 20;

/// Fill value that makes a pasted icon follow the surrounding text color.
pub const INHERIT_COLOR: &str = "currentColor";

static ROOT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<svg\b[^>]*>").expect("valid regex"));

static FILL_ATTR: Lazy<Regex> = Lazy::new(|| attr_regex("fill"));
static WIDTH_ATTR: Lazy<Regex> = Lazy::new(|| attr_regex("width"));
static HEIGHT_ATTR: Lazy<Regex> = Lazy::new(|| attr_regex("height"));

fn attr_regex(name: &str) -> Regex {
    Regex::new(&format!(
        r#"(?P<pre>\s){}\s*=\s*(?:"[^"]*"|'[^']*')"#,
        regex::escape(name)
    ))
    .expect("valid regex")
}

/// How an icon is transformed before it reaches the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    /// Markup as stored, with missing dimensions backfilled.
    Raw,
    /// Fills inherit the text color and the root element takes `size`.
    Styled { size: u32 },
}

impl ExportMode {
    pub fn new(apply_settings: bool, size: u32) -> Self {
        if apply_settings {
            Self::Styled { size }
        } else {
            Self::Raw
        }
    }
}

/// Produces the markup to copy for an icon.
pub fn export(markup: &str, mode: ExportMode) -> String {
    let sized = ensure_dimensions(markup);
    match mode {
        ExportMode::Raw => sized.into_owned(),
        ExportMode::Styled { size } => {
            let filled = replace_attr(&FILL_ATTR, &sized, INHERIT_COLOR);
            resize_root(&filled, size)
        }
    }
}

/// Adds `width`/`height` to the root element where they are absent.
pub fn ensure_dimensions(markup: &str) -> Cow<'_, str> {
    let Some(tag) = ROOT_TAG.find(markup) else {
        return Cow::Borrowed(markup);
    };

    let mut missing = String::new();
    if !WIDTH_ATTR.is_match(tag.as_str()) {
        missing.push_str(&format!(" width=\"{}\"", DEFAULT_DIMENSION));
    }
    if !HEIGHT_ATTR.is_match(tag.as_str()) {
        missing.push_str(&format!(" height=\"{}\"", DEFAULT_DIMENSION));
    }
    if missing.is_empty() {
        return Cow::Borrowed(markup);
    }

    let insert_at = tag.start() + "<svg".len();
    let mut out = String::with_capacity(markup.len() + missing.len());
    out.push_str(&markup[..insert_at]);
    out.push_str(&missing);
    out.push_str(&markup[insert_at..]);
    Cow::Owned(out)
}

/// Sets `width` and `height` on the root element only.
fn resize_root(markup: &str, size: u32) -> String {
    let Some(tag) = ROOT_TAG.find(markup) else {
        return markup.to_string();
    };

    let value = size.to_string();
    let tag_text = replace_attr(&WIDTH_ATTR, tag.as_str(), &value);
    let tag_text = replace_attr(&HEIGHT_ATTR, &tag_text, &value);

    let mut out = String::with_capacity(markup.len());
    out.push_str(&markup[..tag.start()]);
    out.push_str(&tag_text);
    out.push_str(&markup[tag.end()..]);
    out
}

fn replace_attr(re: &Regex, text: &str, value: &str) -> String {
    // The attribute name is recovered from the match so one helper serves every regex.
    re.replace_all(text, |caps: &Captures| {
        let whole = &caps[0];
        let pre = &caps["pre"];
        let name_end = whole.find('=').unwrap_or(whole.len());
        let name = whole[pre.len()..name_end].trim_end();
        format!("{}{}=\"{}\"", pre, name, value)
    })
    .into_owned()
}
