//! Declaration-level filtering of inline `style` values
//!
//! Not a CSS parser: values are split into `name:value` declarations and each
//! declaration is kept or dropped on its own.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Filters the value of a `style` attribute
pub trait CssFilter: Send + Sync {
    /// Returns the filtered declarations
    fn process(&self, css: &str) -> String;
}

impl<F> CssFilter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn process(&self, css: &str) -> String {
        self(css)
    }
}

/// The default CSS filter: property allow-list plus a `javascript:` check
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCssFilter;

impl CssFilter for DefaultCssFilter {
    fn process(&self, css: &str) -> String {
        if css.is_empty() {
            return String::new();
        }

        let allowed = allowed_properties();
        parse_style(css, |name, value| {
            if javascript_url().is_match(value) || value.is_empty() {
                return None;
            }
            allowed
                .contains(name)
                .then(|| format!("{}:{}", name, value))
        })
    }
}

fn javascript_url() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)javascript\s*:").expect("valid regex"))
}

/// Splits a style value into declarations and rebuilds it from the ones the
/// callback keeps
///
/// Declarations end at `;` (outside parentheses) or at a newline. Text read
/// before a `/* ... */` comment is discarded together with the comment, and an
/// unterminated comment ends parsing.
pub(crate) fn parse_style<F>(css: &str, mut on_declaration: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut chars: Vec<char> = css.trim_end().chars().collect();
    if chars.last() != Some(&';') {
        chars.push(';');
    }

    let len = chars.len();
    let mut in_parens = false;
    let mut last_pos = 0;
    let mut filtered = String::new();

    let mut flush = |start: usize, end: usize, in_parens: bool, out: &mut String| {
        if in_parens || start >= end {
            return;
        }
        let source: String = chars[start..end].iter().collect();
        let source = source.trim();
        if let Some(colon) = source.find(':') {
            let name = source[..colon].trim();
            let value = source[colon + 1..].trim();
            if !name.is_empty() {
                if let Some(declaration) = on_declaration(name, value) {
                    out.push_str(&declaration);
                    out.push_str("; ");
                }
            }
        }
    };

    let mut i = 0;
    while i < len {
        let c = chars[i];
        if c == '/' && chars.get(i + 1) == Some(&'*') {
            match find_comment_end(&chars, i + 2) {
                Some(end) => {
                    i = end + 1;
                    last_pos = i + 1;
                    in_parens = false;
                }
                None => break,
            }
        } else if c == '(' {
            in_parens = true;
        } else if c == ')' {
            in_parens = false;
        } else if c == ';' {
            if !in_parens {
                flush(last_pos, i, in_parens, &mut filtered);
                last_pos = i + 1;
            }
        } else if c == '\n' {
            flush(last_pos, i, in_parens, &mut filtered);
            last_pos = i + 1;
        }
        i += 1;
    }

    filtered.trim().to_string()
}

fn find_comment_end(chars: &[char], from: usize) -> Option<usize> {
    (from..chars.len().saturating_sub(1)).find(|&j| chars[j] == '*' && chars[j + 1] == '/')
}

fn allowed_properties() -> &'static HashSet<&'static str> {
    static PROPERTIES: OnceLock<HashSet<&'static str>> = OnceLock::new();
    PROPERTIES.get_or_init(|| ALLOWED_PROPERTIES.iter().copied().collect())
}

const ALLOWED_PROPERTIES: &[&str] = &[
    "align-content",
    "align-items",
    "align-self",
    "animation",
    "animation-delay",
    "animation-direction",
    "animation-duration",
    "animation-fill-mode",
    "animation-iteration-count",
    "animation-name",
    "animation-play-state",
    "animation-timing-function",
    "background-attachment",
    "background-clip",
    "background-color",
    "background-image",
    "background-origin",
    "background-position",
    "background-repeat",
    "background-size",
    "border",
    "border-bottom",
    "border-bottom-color",
    "border-bottom-left-radius",
    "border-bottom-right-radius",
    "border-bottom-style",
    "border-bottom-width",
    "border-collapse",
    "border-color",
    "border-left",
    "border-left-color",
    "border-left-style",
    "border-left-width",
    "border-radius",
    "border-right",
    "border-right-color",
    "border-right-style",
    "border-right-width",
    "border-spacing",
    "border-style",
    "border-top",
    "border-top-color",
    "border-top-left-radius",
    "border-top-right-radius",
    "border-top-style",
    "border-top-width",
    "border-width",
    "bottom",
    "box-shadow",
    "box-sizing",
    "caption-side",
    "clear",
    "color",
    "column-count",
    "column-gap",
    "column-width",
    "columns",
    "direction",
    "display",
    "empty-cells",
    "flex",
    "flex-basis",
    "flex-direction",
    "flex-flow",
    "flex-grow",
    "flex-shrink",
    "flex-wrap",
    "float",
    "font",
    "font-family",
    "font-size",
    "font-stretch",
    "font-style",
    "font-variant",
    "font-weight",
    "height",
    "justify-content",
    "left",
    "letter-spacing",
    "line-height",
    "list-style",
    "list-style-image",
    "list-style-position",
    "list-style-type",
    "margin",
    "margin-bottom",
    "margin-left",
    "margin-right",
    "margin-top",
    "max-height",
    "max-width",
    "min-height",
    "min-width",
    "opacity",
    "order",
    "outline",
    "outline-color",
    "outline-style",
    "outline-width",
    "overflow",
    "overflow-wrap",
    "overflow-x",
    "overflow-y",
    "padding",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "position",
    "right",
    "table-layout",
    "text-align",
    "text-decoration",
    "text-decoration-color",
    "text-decoration-line",
    "text-decoration-style",
    "text-indent",
    "text-overflow",
    "text-shadow",
    "text-transform",
    "top",
    "transform",
    "transform-origin",
    "transition",
    "unicode-bidi",
    "vertical-align",
    "visibility",
    "white-space",
    "width",
    "word-break",
    "word-spacing",
    "word-wrap",
    "writing-mode",
    "z-index",
];
