//! Attribute value decoding and escaping used by the filtering engine

use regex::Regex;
use std::sync::OnceLock;

use super::css::CssFilter;

/// Prefixes accepted for `href`/`src` by the engine's own value filter
const SAFE_LINK_PREFIXES: [&str; 8] = [
    "http://",
    "https://",
    "mailto:",
    "tel:",
    "data:image/",
    "ftp://",
    "./",
    "../",
];

fn script_scheme() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?i)((j\s*a\s*v\s*a|v\s*b|l\s*i\s*v\s*e)\s*s\s*c\s*r\s*i\s*p\s*t\s*|m\s*o\s*c\s*h\s*a):",
        )
        .expect("valid regex")
    })
}

fn css_expression() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)e\s*x\s*p\s*r\s*e\s*s\s*s\s*i\s*o\s*n\s*\(").expect("valid regex")
    })
}

fn css_url_call() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)u\s*r\s*l\s*\(").expect("valid regex"))
}

/// Whitespace as the engine understands it (includes the BOM)
pub(crate) fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub(crate) fn trim(value: &str) -> &str {
    value.trim_matches(is_space)
}

/// Decodes the entity body captured from `&#...;`
///
/// Leading digits are read in base 10, or base 16 after an `x`; parsing stops
/// at the first invalid digit. No digits at all decodes to NUL, which the
/// control-character pass then turns into a space. The code is reduced to a
/// UTF-16 unit; lone surrogates become U+FFFD.
fn decode_numeric_reference(code: &str) -> char {
    let (digits, radix) = match code.strip_prefix(['x', 'X']) {
        Some(hex) => (hex, 16),
        None => (code, 10),
    };

    let mut unit: u32 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        match c.to_digit(radix) {
            Some(d) => {
                unit = (unit * radix + d) % 0x1_0000;
                seen_digit = true;
            }
            None => break,
        }
    }

    if !seen_digit {
        return '\0';
    }
    char::from_u32(unit).unwrap_or('\u{fffd}')
}

/// Longest text an emitted `&` can start that a later decoded character may
/// still complete into a reference (`&newlin`)
const REFERENCE_TAIL: usize = 8;

/// Matches a reference at the top of `ahead`, the remaining input reversed
/// with the `&` already taken off
///
/// Returns the decoded character and how many characters after the `&` it
/// consumed.
fn match_reference(ahead: &[char]) -> Option<(char, usize)> {
    let at = |i: usize| ahead.len().checked_sub(i + 1).map(|j| ahead[j]);
    let named = |name: &str, ignore_case: bool| {
        name.chars().enumerate().all(|(i, n)| {
            at(i).is_some_and(|c| if ignore_case { c.eq_ignore_ascii_case(&n) } else { c == n })
        })
    };
    let optional_semicolon = |len: usize| len + usize::from(at(len) == Some(';'));

    if at(0) == Some('#') {
        let body: String = (1..)
            .map_while(|i| at(i).filter(|c| c.is_ascii_alphanumeric()))
            .collect();
        let len = 1 + body.chars().count();
        return Some((decode_numeric_reference(&body), optional_semicolon(len)));
    }

    if named("quot;", false) {
        Some(('"', 5))
    } else if named("colon", true) {
        Some((':', optional_semicolon(5)))
    } else if named("newline", true) {
        Some((' ', optional_semicolon(7)))
    } else {
        None
    }
}

/// Decodes `&quot;`, numeric references, `&colon;` and `&newline;` until none
/// are left, including references spelled out by other references
/// (`&#38;#x72;`)
///
/// Decoded characters are pushed back onto the input, so every reference is
/// resolved in one left-to-right scan.
fn decode_references(value: &str) -> String {
    let mut input: Vec<char> = value.chars().rev().collect();
    let mut output: Vec<char> = Vec::with_capacity(input.len());

    while let Some(c) = input.pop() {
        if c != '&' {
            output.push(c);
            continue;
        }
        match match_reference(&input) {
            Some((decoded, consumed)) => {
                input.truncate(input.len() - consumed);
                input.push(decoded);
                let tail = output
                    .iter()
                    .rev()
                    .take(REFERENCE_TAIL)
                    .position(|&c| c == '&');
                if let Some(offset) = tail {
                    let start = output.len() - 1 - offset;
                    input.extend(output.drain(start..).rev());
                }
            }
            None => output.push('&'),
        }
    }

    output.into_iter().collect()
}

/// Normalizes a raw attribute value before inspection
///
/// Undoes the encodings attackers use to hide schemes: `&quot;`, numeric
/// character references, `&colon;` and `&newline;`, however deeply nested.
/// Control characters become spaces and the result is trimmed.
pub fn friendly_attr_value(value: &str) -> String {
    let cleaned: String = decode_references(value)
        .chars()
        .map(|c| if u32::from(c) < 0x20 { ' ' } else { c })
        .collect();

    trim(&cleaned).to_string()
}

/// Escapes a value for embedding in a double-quoted attribute
///
/// The value is normalized with [`friendly_attr_value`] first, then `"`, `<`
/// and `>` are replaced with named entities. `&` is left alone so query
/// strings survive unchanged.
pub fn escape_attr_value(value: &str) -> String {
    friendly_attr_value(value)
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes text found outside of an allowed tag
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// The engine's default attribute value filter
///
/// Returns an empty string when the value is unsafe as a whole. Link
/// attributes need a known-safe prefix, `background` may not carry a script
/// scheme, and `style` is screened for `expression(` and scripted `url(`
/// before going through the CSS filter.
pub fn safe_attr_value(_tag: &str, name: &str, value: &str, css_filter: &dyn CssFilter) -> String {
    let mut value = friendly_attr_value(value);

    match name {
        "href" | "src" => {
            if value == "#" {
                return value;
            }
            let is_safe_link = SAFE_LINK_PREFIXES
                .iter()
                .any(|prefix| value.starts_with(prefix))
                || value.starts_with('#')
                || value.starts_with('/');
            if !is_safe_link {
                return String::new();
            }
        }
        "background" => {
            if script_scheme().is_match(&value) {
                return String::new();
            }
        }
        "style" => {
            if css_expression().is_match(&value) {
                return String::new();
            }
            if css_url_call().is_match(&value) && script_scheme().is_match(&value) {
                return String::new();
            }
            value = css_filter.process(&value);
        }
        _ => {}
    }

    escape_attr_value(&value)
}
