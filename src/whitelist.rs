//! Tag and attribute allow-lists
//!
//! A [`Whitelist`] maps a tag name to a [`TagRule`]. Caller extensions are
//! composed with the built-in list through [`Whitelist::merge`], which
//! concatenates attribute lists per tag rather than replacing them.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// What a whitelist entry permits for one tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagRule {
    /// The tag is allowed together with the listed attributes
    Allowed(Vec<String>),
    /// The tag is present but disabled; it is treated like any
    /// non-whitelisted tag. Produced by any non-array value in JSON options.
    Disabled,
}

impl TagRule {
    /// Builds an `Allowed` rule from attribute names
    pub fn allowed<I, S>(attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TagRule::Allowed(attributes.into_iter().map(Into::into).collect())
    }

    /// Returns the permitted attributes, or `None` for a disabled tag
    pub fn attributes(&self) -> Option<&[String]> {
        match self {
            TagRule::Allowed(attributes) => Some(attributes),
            TagRule::Disabled => None,
        }
    }
}

impl<'de> Deserialize<'de> for TagRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    serde_json::Value::String(name) => Ok(name),
                    other => Err(de::Error::custom(format!(
                        "attribute names must be strings, found {}",
                        other
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TagRule::Allowed),
            _ => Ok(TagRule::Disabled),
        }
    }
}

impl Serialize for TagRule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TagRule::Allowed(attributes) => attributes.serialize(serializer),
            TagRule::Disabled => serializer.serialize_bool(false),
        }
    }
}

/// Ordered mapping from tag name to [`TagRule`]
///
/// Tag names are stored as authored. The filtering engine lower-cases the
/// tags it scans, so entries meant to match markup should be lowercase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Whitelist(IndexMap<String, TagRule>);

impl Whitelist {
    /// Creates an empty whitelist
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the rule for a tag
    pub fn insert(&mut self, tag: impl Into<String>, rule: TagRule) -> Option<TagRule> {
        self.0.insert(tag.into(), rule)
    }

    /// Builder-style variant of [`Whitelist::insert`] for an allowed tag
    pub fn with_tag<I, S>(mut self, tag: &str, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(tag, TagRule::allowed(attributes));
        self
    }

    /// Returns the rule registered for a tag
    pub fn get(&self, tag: &str) -> Option<&TagRule> {
        self.0.get(tag)
    }

    /// Attribute list of an allowed tag; `None` for unknown or disabled tags
    pub fn allowed_attributes(&self, tag: &str) -> Option<&[String]> {
        self.0.get(tag).and_then(TagRule::attributes)
    }

    /// Whether the attribute is listed for the tag
    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.allowed_attributes(tag)
            .map(|attributes| attributes.iter().any(|a| a == attribute))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TagRule)> {
        self.0.iter().map(|(tag, rule)| (tag.as_str(), rule))
    }

    /// Merges whitelists left to right
    ///
    /// When a tag appears in a later source and both the accumulated rule and
    /// the new rule are `Allowed`, the attribute lists are concatenated (later
    /// entries appended, duplicates kept). Otherwise the later rule replaces
    /// the accumulated one, which is how a tag gets disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use xss_sanitizer::whitelist::{TagRule, Whitelist};
    ///
    /// let base = Whitelist::new().with_tag("a", ["href"]);
    /// let extra = Whitelist::new().with_tag("a", ["title"]);
    /// let merged = Whitelist::merge([&base, &extra]);
    ///
    /// assert_eq!(merged.get("a"), Some(&TagRule::allowed(["href", "title"])));
    /// ```
    pub fn merge<'a, I>(sources: I) -> Whitelist
    where
        I: IntoIterator<Item = &'a Whitelist>,
    {
        let mut merged: IndexMap<String, TagRule> = IndexMap::new();

        for source in sources {
            for (tag, rule) in &source.0 {
                match (merged.get_mut(tag), rule) {
                    (Some(TagRule::Allowed(existing)), TagRule::Allowed(extra)) => {
                        existing.extend(extra.iter().cloned());
                    }
                    _ => {
                        merged.insert(tag.clone(), rule.clone());
                    }
                }
            }
        }

        Whitelist(merged)
    }
}

impl<S: Into<String>> FromIterator<(S, TagRule)> for Whitelist {
    fn from_iter<T: IntoIterator<Item = (S, TagRule)>>(iter: T) -> Self {
        Whitelist(iter.into_iter().map(|(tag, rule)| (tag.into(), rule)).collect())
    }
}

const TABLE_CELL_ATTRIBUTES: [&str; 8] = [
    "height", "width", "valign", "align", "colspan", "rowspan", "nowrap", "style",
];

/// The built-in allow-list for user-authored rich content
///
/// A fresh copy is built on every call so no instance shares mutable state.
pub fn default_whitelist() -> Whitelist {
    Whitelist::new()
        .with_tag("a", ["href", "style", "target"])
        .with_tag("abbr", ["title"])
        .with_tag("audio", ["autoplay", "controls", "loop", "muted", "preload"])
        .with_tag("b", Vec::<String>::new())
        .with_tag("br", Vec::<String>::new())
        .with_tag("dd", ["style"])
        .with_tag("div", ["align", "class", "style"])
        .with_tag("dl", ["style"])
        .with_tag("dt", ["style"])
        .with_tag("em", Vec::<String>::new())
        .with_tag("figcaption", ["style"])
        .with_tag("figure", ["style"])
        .with_tag("font", ["color", "face", "size", "style"])
        .with_tag("h1", ["style"])
        .with_tag("h2", ["style"])
        .with_tag("h3", ["style"])
        .with_tag("h4", ["style"])
        .with_tag("h5", ["style"])
        .with_tag("h6", ["style"])
        .with_tag("hr", Vec::<String>::new())
        .with_tag("i", Vec::<String>::new())
        .with_tag("img", ["alt", "border", "height", "src", "style", "width"])
        .with_tag("li", Vec::<String>::new())
        .with_tag("ol", Vec::<String>::new())
        .with_tag("p", ["style"])
        .with_tag("source", ["media", "src", "type"])
        .with_tag("span", ["style"])
        .with_tag("strong", Vec::<String>::new())
        .with_tag("sub", ["style"])
        .with_tag("sup", ["style"])
        .with_tag(
            "table",
            ["width", "height", "cellpadding", "cellspacing", "border", "style"],
        )
        .with_tag("tbody", Vec::<String>::new())
        .with_tag("td", TABLE_CELL_ATTRIBUTES)
        .with_tag("th", TABLE_CELL_ATTRIBUTES)
        .with_tag("tr", ["height", "valign", "align", "style"])
        .with_tag("u", Vec::<String>::new())
        .with_tag("ul", Vec::<String>::new())
        .with_tag(
            "video",
            [
                "autoplay", "controls", "height", "loop", "muted", "poster", "preload", "width",
            ],
        )
}
