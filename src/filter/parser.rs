//! Lexical scanning of tags and attributes
//!
//! The scanner never builds a tree. It walks the input once, hands every
//! complete `<...>` span to a callback and escapes the text in between.

use super::attr::{escape_html, is_space, trim};

/// A tag span found by [`parse_tag`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTag {
    /// Lower-cased tag name without surrounding slashes
    pub name: String,
    /// The tag exactly as it appeared in the input, brackets included
    pub raw: String,
    /// Whether the tag starts with `</`
    pub is_closing: bool,
}

impl RawTag {
    fn new(raw: String) -> Self {
        Self {
            name: tag_name(&raw),
            is_closing: raw.starts_with("</"),
            raw,
        }
    }
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

fn space_index(chars: &[char]) -> Option<usize> {
    chars.iter().position(|&c| is_space(c))
}

/// Extracts the tag name from a raw tag
fn tag_name(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let len = chars.len();

    let name = match space_index(&chars) {
        Some(i) => collect(&chars[1.min(len)..(i + 1).min(len)]),
        None if len >= 2 => collect(&chars[1..len - 1]),
        None => String::new(),
    };

    let name = trim(&name).to_lowercase();
    let name = name.strip_prefix('/').unwrap_or(&name);
    let name = name.strip_suffix('/').unwrap_or(name);
    name.to_string()
}

/// Splits the attribute section off a raw tag
///
/// Returns the trimmed attribute text and whether the tag is self-closing.
pub(crate) fn tag_attributes(raw: &str) -> (String, bool) {
    let chars: Vec<char> = raw.chars().collect();
    let len = chars.len();

    let Some(i) = space_index(&chars) else {
        let closing = len >= 2 && chars[len - 2] == '/';
        return (String::new(), closing);
    };

    let end = len.saturating_sub(1);
    let inner = if i + 1 < end {
        collect(&chars[i + 1..end])
    } else {
        String::new()
    };

    let inner = trim(&inner);
    match inner.strip_suffix('/') {
        Some(rest) => (trim(rest).to_string(), true),
        None => (inner.to_string(), false),
    }
}

/// Whether the quote at `pos` opens an attribute value, i.e. the nearest
/// preceding non-space character is `=`
fn opens_quoted_value(chars: &[char], pos: usize) -> bool {
    chars[..pos]
        .iter()
        .rev()
        .find(|&&c| !is_space(c))
        .map(|&c| c == '=')
        .unwrap_or(false)
}

/// Scans `html`, calling `on_tag` for every tag span
///
/// `on_tag` receives the tag and the byte length of the output produced so
/// far, and returns the replacement text for the tag. Text outside tags is
/// escaped. An unterminated tag at the end of input is escaped as text.
pub(crate) fn parse_tag<F>(html: &str, mut on_tag: F) -> String
where
    F: FnMut(&RawTag, usize) -> String,
{
    let chars: Vec<char> = html.chars().collect();
    let len = chars.len();

    let mut output = String::with_capacity(html.len());
    let mut last_pos = 0;
    let mut tag_start: Option<usize> = None;
    let mut quote: Option<char> = None;

    for pos in 0..len {
        let c = chars[pos];

        let Some(start) = tag_start else {
            if c == '<' {
                tag_start = Some(pos);
            }
            continue;
        };

        if let Some(open) = quote {
            if c == open {
                quote = None;
            }
            continue;
        }

        if c == '<' {
            output.push_str(&escape_html(&collect(&chars[last_pos..pos])));
            tag_start = Some(pos);
            last_pos = pos;
        } else if c == '>' || pos == len - 1 {
            output.push_str(&escape_html(&collect(&chars[last_pos..start])));
            let tag = RawTag::new(collect(&chars[start..=pos]));
            let rendered = on_tag(&tag, output.len());
            output.push_str(&rendered);
            last_pos = pos + 1;
            tag_start = None;
        } else if (c == '"' || c == '\'') && opens_quoted_value(&chars, pos) {
            quote = Some(c);
        }
    }

    if last_pos < len {
        output.push_str(&escape_html(&collect(&chars[last_pos..])));
    }

    output
}

enum NextEqual {
    Found(usize),
    /// Holds the index of the first non-space character, which is not `=`
    NotFound(usize),
    EndOfInput,
}

fn find_next_equal(chars: &[char], from: usize) -> NextEqual {
    for (i, &c) in chars.iter().enumerate().skip(from) {
        match c {
            ' ' => continue,
            '=' => return NextEqual::Found(i),
            _ => return NextEqual::NotFound(i),
        }
    }
    NextEqual::EndOfInput
}

fn find_next_quotation_mark(chars: &[char], from: usize) -> Option<usize> {
    for (i, &c) in chars.iter().enumerate().skip(from) {
        match c {
            ' ' => continue,
            '"' | '\'' => return Some(i),
            _ => return None,
        }
    }
    None
}

/// Whether a value is still pending after the whitespace at `from + 1`: true
/// when the closest preceding non-space character is `=` or the scan reaches
/// the start of the input
fn value_pending(chars: &[char], from: usize) -> bool {
    let mut i = from;
    while i > 0 {
        match chars[i] {
            ' ' => i -= 1,
            '=' => return true,
            _ => return false,
        }
    }
    true
}

fn strip_quote_wrap(text: &str) -> &str {
    let wrapped = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')));
    if wrapped {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

fn attribute_name(raw: &str) -> String {
    trim(raw)
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || matches!(c, '\\' | '_' | ':' | '.' | '-'))
        .collect::<String>()
        .to_lowercase()
}

/// Parses an attribute section, calling `on_attr(name, value)` for each
/// attribute and joining the returned fragments with spaces
///
/// Accepts `name="v"`, `name='v'`, unquoted `name=v` and bare `name`. Names are
/// reduced to `[a-z0-9\_:.-]`; attributes whose name ends up empty are skipped.
pub(crate) fn parse_attr<F>(html: &str, mut on_attr: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut chars: Vec<char> = html.chars().collect();
    let len = chars.len();

    let mut rendered: Vec<String> = Vec::new();
    let mut add_attr = |name: &str, value: &str| {
        let name = attribute_name(name);
        if name.is_empty() {
            return;
        }
        if let Some(fragment) = on_attr(&name, value) {
            if !fragment.is_empty() {
                rendered.push(fragment);
            }
        }
    };

    let mut last_pos = 0;
    let mut last_mark_pos: Option<usize> = None;
    let mut pending_name: Option<String> = None;
    let mut normalized = false;
    // Results that hold for the rest of a run of spaces, so each run is
    // scanned once
    let mut next_word: Option<usize> = None;
    let mut pending_through: Option<usize> = None;
    let mut i = 0;

    while i < len {
        let c = chars[i];

        if pending_name.is_none() && c == '=' {
            pending_name = Some(collect(&chars[last_pos..i]));
            last_pos = i + 1;
            last_mark_pos = match chars.get(last_pos) {
                Some('"') | Some('\'') => Some(last_pos),
                _ => find_next_quotation_mark(&chars, i + 1),
            };
            i += 1;
            continue;
        }

        if let (Some(name), Some(mark)) = (pending_name.as_deref(), last_mark_pos) {
            if i == mark {
                let Some(offset) = chars[i + 1..].iter().position(|&q| q == c) else {
                    break;
                };
                let close = i + 1 + offset;
                let value = collect(&chars[mark + 1..close]);
                add_attr(name, trim(&value));
                pending_name = None;
                last_mark_pos = None;
                i = close + 1;
                last_pos = i;
                continue;
            }
        }

        if is_space(c) {
            if !normalized {
                for ch in chars.iter_mut() {
                    if is_space(*ch) {
                        *ch = ' ';
                    }
                }
                normalized = true;
            }

            match pending_name.as_deref() {
                None => {
                    let next_equal = match next_word {
                        Some(word) if i < word => NextEqual::NotFound(word),
                        _ => find_next_equal(&chars, i),
                    };
                    match next_equal {
                        NextEqual::NotFound(word) => {
                            next_word = Some(word);
                            let name = collect(&chars[last_pos..i]);
                            add_attr(trim(&name), "");
                            last_pos = i + 1;
                        }
                        NextEqual::Found(equal) => {
                            i = equal;
                            continue;
                        }
                        NextEqual::EndOfInput => break,
                    }
                }
                Some(name) => {
                    let pending = pending_through == Some(i - 1) || value_pending(&chars, i - 1);
                    if pending {
                        pending_through = Some(i);
                    } else {
                        let value = collect(&chars[last_pos..i]);
                        add_attr(name, strip_quote_wrap(trim(&value)));
                        pending_name = None;
                        last_mark_pos = None;
                        last_pos = i + 1;
                    }
                }
            }
        }

        i += 1;
    }

    if last_pos < len {
        let rest = collect(&chars[last_pos..]);
        match pending_name.as_deref() {
            None => add_attr(&rest, ""),
            Some(name) => add_attr(name, strip_quote_wrap(trim(&rest))),
        }
    }

    trim(&rendered.join(" ")).to_string()
}
