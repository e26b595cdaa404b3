//! Whitelist-driven HTML filtering engine
//!
//! [`XssFilter`] rebuilds allowed tags from their parsed attributes and
//! escapes everything else. It is exposed through the [`HtmlFilter`] trait so
//! the sanitizer can run with a caller-supplied engine.

pub mod attr;
pub mod css;
mod parser;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::attribute::AttributeSanitizer;
use crate::error::Result;
use crate::whitelist::Whitelist;

pub use attr::{escape_attr_value, escape_html, friendly_attr_value, safe_attr_value};
pub use css::{CssFilter, DefaultCssFilter};
use parser::{parse_attr, parse_tag, tag_attributes, RawTag};

/// Filters a fragment of HTML
pub trait HtmlFilter: Send + Sync {
    /// Returns the filtered markup, or an error if the fragment could not be
    /// processed at all
    fn process(&self, html: &str) -> Result<String>;
}

impl<F> HtmlFilter for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn process(&self, html: &str) -> Result<String> {
        self(html)
    }
}

/// Engine switches that are not part of the whitelist
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XssSettings {
    /// Leave `<!-- -->` comments in the input; they are then escaped like any
    /// other non-whitelisted markup
    pub allow_comment_tag: bool,
    /// Remove ASCII control characters (other than LF and CR) before scanning
    pub strip_blank_char: bool,
    /// Drop non-whitelisted tags instead of escaping them
    pub strip_ignore_tag: bool,
    /// Non-whitelisted tags whose whole body is removed along with the tag
    pub strip_ignore_tag_body: Vec<String>,
}

/// The default filtering engine
#[derive(Clone)]
pub struct XssFilter {
    whitelist: Whitelist,
    settings: XssSettings,
    attribute_sanitizer: Arc<dyn AttributeSanitizer>,
    css_filter: Arc<dyn CssFilter>,
}

impl fmt::Debug for XssFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XssFilter")
            .field("whitelist", &self.whitelist)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl XssFilter {
    /// Creates an engine using the default CSS filter
    pub fn new(
        whitelist: Whitelist,
        settings: XssSettings,
        attribute_sanitizer: Arc<dyn AttributeSanitizer>,
    ) -> Self {
        Self {
            whitelist,
            settings,
            attribute_sanitizer,
            css_filter: Arc::new(DefaultCssFilter),
        }
    }

    /// Replaces the CSS filter applied to `style` values
    pub fn with_css_filter(mut self, css_filter: Arc<dyn CssFilter>) -> Self {
        self.css_filter = css_filter;
        self
    }

    /// Filters `html`, never failing
    pub fn filter(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }

        let mut html = Cow::Borrowed(html);
        if self.settings.strip_blank_char {
            html = Cow::Owned(strip_blank_char(&html));
        }
        if !self.settings.allow_comment_tag {
            html = Cow::Owned(strip_comment_tag(&html));
        }

        let mut body_stripper = (!self.settings.strip_ignore_tag_body.is_empty())
            .then(|| BodyStripper::new(&self.settings.strip_ignore_tag_body));

        let filtered = parse_tag(&html, |tag, position| {
            if let Some(allowed) = self.whitelist.allowed_attributes(&tag.name) {
                return self.render_allowed_tag(tag, allowed);
            }

            trace!(tag = %tag.name, "escaping non-whitelisted tag");
            if let Some(marker) = body_stripper
                .as_mut()
                .and_then(|stripper| stripper.on_ignored_tag(tag, position))
            {
                return marker;
            }
            if self.settings.strip_ignore_tag {
                String::new()
            } else {
                escape_html(&tag.raw)
            }
        });

        match body_stripper {
            Some(stripper) => stripper.remove(&filtered),
            None => filtered,
        }
    }

    fn render_allowed_tag(&self, tag: &RawTag, allowed: &[String]) -> String {
        if tag.is_closing {
            return format!("</{}>", tag.name);
        }

        let (attr_html, self_closing) = tag_attributes(&tag.raw);
        let attributes = parse_attr(&attr_html, |name, value| {
            if !allowed.iter().any(|a| a == name) {
                trace!(tag = %tag.name, attribute = name, "dropping attribute");
                return None;
            }
            let safe = self.attribute_sanitizer.sanitize_attribute(
                &tag.name,
                name,
                value,
                self.css_filter.as_ref(),
            );
            if safe.is_empty() {
                Some(name.to_string())
            } else {
                Some(format!("{}=\"{}\"", name, safe))
            }
        });

        let mut rendered = format!("<{}", tag.name);
        if !attributes.is_empty() {
            rendered.push(' ');
            rendered.push_str(&attributes);
        }
        if self_closing {
            rendered.push_str(" /");
        }
        rendered.push('>');
        rendered
    }
}

impl HtmlFilter for XssFilter {
    fn process(&self, html: &str) -> Result<String> {
        Ok(self.filter(html))
    }
}

/// Removes `<!-- ... -->` comments; an unterminated comment swallows the
/// rest of the input
pub fn strip_comment_tag(html: &str) -> String {
    let mut output = String::with_capacity(html.len());
    let mut rest = html;

    loop {
        let Some(start) = rest.find("<!--") else {
            output.push_str(rest);
            break;
        };
        output.push_str(&rest[..start]);
        let Some(end) = rest[start..].find("-->") else {
            break;
        };
        rest = &rest[start + end + 3..];
    }

    output
}

/// Removes ASCII control characters except line feed and carriage return
pub fn strip_blank_char(html: &str) -> String {
    html.chars()
        .filter(|&c| !(c.is_ascii_control() && c != '\n' && c != '\r'))
        .collect()
}

/// Tracks the output ranges between an ignored opening tag and its closing
/// tag so they can be cut once scanning is done
struct BodyStripper<'t> {
    tags: &'t [String],
    start: Option<usize>,
    removals: Vec<(usize, usize)>,
}

impl<'t> BodyStripper<'t> {
    const OPEN_MARKER: &'static str = "[removed]";
    const CLOSE_MARKER: &'static str = "[/removed]";

    fn new(tags: &'t [String]) -> Self {
        Self {
            tags,
            start: None,
            removals: Vec::new(),
        }
    }

    fn on_ignored_tag(&mut self, tag: &RawTag, position: usize) -> Option<String> {
        if !self.tags.iter().any(|t| *t == tag.name) {
            return None;
        }

        if tag.is_closing {
            let end = position + Self::CLOSE_MARKER.len();
            let start = self.start.take().unwrap_or(position);
            self.removals.push((start, end));
            Some(Self::CLOSE_MARKER.to_string())
        } else {
            self.start.get_or_insert(position);
            Some(Self::OPEN_MARKER.to_string())
        }
    }

    fn remove(&self, html: &str) -> String {
        let mut output = String::with_capacity(html.len());
        let mut last = 0;

        for &(start, end) in &self.removals {
            if start >= last {
                output.push_str(&html[last..start]);
            }
            last = last.max(end);
        }

        if last < html.len() {
            output.push_str(&html[last..]);
        }
        output
    }
}
