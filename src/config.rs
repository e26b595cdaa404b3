//! Sanitizer configuration
//!
//! [`FilterOptions`] is the constructor-time policy record. It deserializes
//! from JSON with the option names used by the HTML filtering engine
//! (`allowCommentTag`, `whiteList`, ...). [`SanitizeOptions`] holds the
//! per-call switches of [`crate::Sanitizer::sanitize`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attribute::AttributeSanitizer;
use crate::error::{Result, SanitizeError};
use crate::filter::XssSettings;
use crate::whitelist::{default_whitelist, Whitelist};

/// Constructor options of a sanitizer
///
/// Every field is optional; [`FilterOptions::resolve`] fills the gaps.
/// `safe_attr_value` cannot be expressed in JSON and is only set from code.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Keep `<!-- -->` comments in the input instead of removing them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_comment_tag: Option<bool>,

    /// Tag and attribute allow-list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub white_list: Option<Whitelist>,

    /// Replaces the built-in attribute dispatch entirely
    #[serde(skip)]
    pub safe_attr_value: Option<Arc<dyn AttributeSanitizer>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_blank_char: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_ignore_tag: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip_ignore_tag_body: Option<Vec<String>>,
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("allow_comment_tag", &self.allow_comment_tag)
            .field("white_list", &self.white_list)
            .field("safe_attr_value", &self.safe_attr_value.as_ref().map(|_| "<custom>"))
            .field("strip_blank_char", &self.strip_blank_char)
            .field("strip_ignore_tag", &self.strip_ignore_tag)
            .field("strip_ignore_tag_body", &self.strip_ignore_tag_body)
            .finish()
    }
}

impl FilterOptions {
    /// The options a sanitizer uses when constructed without any: comments
    /// allowed through (and escaped) and the built-in whitelist
    pub fn defaults() -> Self {
        Self {
            allow_comment_tag: Some(true),
            white_list: Some(default_whitelist()),
            ..Self::default()
        }
    }

    /// Parses options from a JSON document
    ///
    /// # Examples
    /// ```
    /// use xss_sanitizer::config::FilterOptions;
    ///
    /// let options = FilterOptions::from_json_str(r#"{"allowCommentTag": false, "whiteList": {"b": []}}"#)?;
    /// assert_eq!(options.allow_comment_tag, Some(false));
    /// # Ok::<(), xss_sanitizer::SanitizeError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading filter options from {}", path.display());
        let json = std::fs::read_to_string(path).map_err(|source| SanitizeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Produces the effective options of a sanitizer
    ///
    /// With `extend_defaults`, every supplied field overwrites the built-in
    /// default except `white_list`, which is merged into the built-in list.
    /// Without it, the supplied options are used as they are and any missing
    /// field takes the engine default (comments stripped, built-in whitelist,
    /// built-in attribute dispatch).
    pub fn resolve(self, extend_defaults: bool) -> FilterOptions {
        if !extend_defaults {
            return FilterOptions {
                allow_comment_tag: Some(self.allow_comment_tag.unwrap_or(false)),
                white_list: Some(self.white_list.unwrap_or_else(default_whitelist)),
                ..self
            };
        }

        let defaults = FilterOptions::defaults();
        let white_list = match (&defaults.white_list, &self.white_list) {
            (Some(base), Some(extra)) => Some(Whitelist::merge([base, extra])),
            _ => defaults.white_list.clone(),
        };

        FilterOptions {
            allow_comment_tag: self.allow_comment_tag.or(defaults.allow_comment_tag),
            white_list,
            safe_attr_value: self.safe_attr_value.or(defaults.safe_attr_value),
            strip_blank_char: self.strip_blank_char.or(defaults.strip_blank_char),
            strip_ignore_tag: self.strip_ignore_tag.or(defaults.strip_ignore_tag),
            strip_ignore_tag_body: self.strip_ignore_tag_body.or(defaults.strip_ignore_tag_body),
        }
    }

    /// Engine switches carried by these options
    pub(crate) fn xss_settings(&self) -> XssSettings {
        XssSettings {
            allow_comment_tag: self.allow_comment_tag.unwrap_or(false),
            strip_blank_char: self.strip_blank_char.unwrap_or(false),
            strip_ignore_tag: self.strip_ignore_tag.unwrap_or(false),
            strip_ignore_tag_body: self.strip_ignore_tag_body.clone().unwrap_or_default(),
        }
    }
}

/// Per-call options of [`crate::Sanitizer::sanitize`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SanitizeOptions {
    /// Let `undefined` through instead of turning it into null
    #[serde(default)]
    pub allow_undefined: bool,

    /// Deepest composite nesting that is walked; a composite beyond it
    /// becomes null. Unbounded when `None`.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl SanitizeOptions {
    pub fn allow_undefined() -> Self {
        Self {
            allow_undefined: true,
            ..Self::default()
        }
    }
}
