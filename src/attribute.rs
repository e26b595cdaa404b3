//! Attribute value dispatch
//!
//! The filtering engine calls an [`AttributeSanitizer`] for every attribute it
//! keeps. The default dispatcher sends URL-bearing attributes through the
//! [`UrlPolicy`] and everything else through the engine's own value filter.

use std::sync::Arc;

use crate::filter::{safe_attr_value, CssFilter};
use crate::url::{UrlOptions, UrlPolicy};

/// Produces the safe value of one attribute
///
/// An empty return value marks the attribute as wholly unsafe; the engine then
/// renders it without a value. Implementations are responsible for escaping
/// and may delegate to [`safe_attr_value`].
pub trait AttributeSanitizer: Send + Sync {
    fn sanitize_attribute(&self, tag: &str, name: &str, value: &str, css: &dyn CssFilter)
        -> String;
}

impl<F> AttributeSanitizer for F
where
    F: Fn(&str, &str, &str, &dyn CssFilter) -> String + Send + Sync,
{
    fn sanitize_attribute(
        &self,
        tag: &str,
        name: &str,
        value: &str,
        css: &dyn CssFilter,
    ) -> String {
        self(tag, name, value, css)
    }
}

const DEFAULT_URL_ATTRIBUTES: [(&str, &str); 3] = [("a", "href"), ("img", "src"), ("source", "src")];

/// The `(tag, attribute)` pairs that carry URLs by default
pub fn default_url_attributes() -> Vec<(String, String)> {
    DEFAULT_URL_ATTRIBUTES
        .iter()
        .map(|(tag, name)| (tag.to_string(), name.to_string()))
        .collect()
}

/// Routes URL-bearing attributes through the URL policy
#[derive(Debug, Clone)]
pub struct DefaultAttributeSanitizer {
    url_policy: UrlPolicy,
    url_attributes: Arc<[(String, String)]>,
}

impl Default for DefaultAttributeSanitizer {
    fn default() -> Self {
        Self::new(UrlPolicy::default(), default_url_attributes())
    }
}

impl DefaultAttributeSanitizer {
    pub fn new(url_policy: UrlPolicy, url_attributes: Vec<(String, String)>) -> Self {
        Self {
            url_policy,
            url_attributes: url_attributes.into(),
        }
    }

    pub fn url_policy(&self) -> &UrlPolicy {
        &self.url_policy
    }

    /// Whether the attribute is judged by the URL policy
    pub fn is_url_attribute(&self, tag: &str, name: &str) -> bool {
        self.url_attributes
            .iter()
            .any(|(t, n)| t == tag && n == name)
    }
}

impl AttributeSanitizer for DefaultAttributeSanitizer {
    fn sanitize_attribute(
        &self,
        tag: &str,
        name: &str,
        value: &str,
        css: &dyn CssFilter,
    ) -> String {
        if self.is_url_attribute(tag, name) {
            self.url_policy.sanitize(value, UrlOptions::default())
        } else {
            safe_attr_value(tag, name, value, css)
        }
    }
}
