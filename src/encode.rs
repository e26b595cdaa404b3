//! HTML entity encoders
//!
//! Two independent, total encoders:
//! - [`encode_html`] rewrites the six structural characters `& < > " ' /`
//! - [`encode_attribute_value`] rewrites every non-alphanumeric Latin-1
//!   character, for attribute contexts where URL-like or script-like payloads
//!   must be neutralized character by character

use std::fmt::Write;

/// Encodes the structural HTML characters as hexadecimal character references
///
/// Only `&`, `<`, `>`, `"`, `'` and `/` are rewritten; every other character
/// passes through unchanged.
///
/// # Examples
///
/// ```
/// use xss_sanitizer::encode::encode_html;
///
/// assert_eq!(encode_html("<b>"), "&#x3C;b&#x3E;");
/// assert_eq!(encode_html("plain text"), "plain text");
/// ```
pub fn encode_html(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => encoded.push_str("&#x26;"),
            '<' => encoded.push_str("&#x3C;"),
            '>' => encoded.push_str("&#x3E;"),
            '"' => encoded.push_str("&#x22;"),
            '\'' => encoded.push_str("&#x27;"),
            '/' => encoded.push_str("&#x2F;"),
            _ => encoded.push(c),
        }
    }

    encoded
}

/// Encodes every non-alphanumeric character in the Latin-1 range
///
/// Characters with a code point of 255 or lower that are not ASCII letters or
/// digits become `&#x` + lowercase hex + `;`. Characters above 255 are left
/// alone.
///
/// # Examples
///
/// ```
/// use xss_sanitizer::encode::encode_attribute_value;
///
/// assert_eq!(
///     encode_attribute_value("javascript:alert(1)"),
///     "javascript&#x3a;alert&#x28;1&#x29;"
/// );
/// ```
pub fn encode_attribute_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());

    for c in value.chars() {
        let code = u32::from(c);
        if code <= 0xff && !c.is_ascii_alphanumeric() {
            // Writing into a String cannot fail
            let _ = write!(encoded, "&#x{:x};", code);
        } else {
            encoded.push(c);
        }
    }

    encoded
}
