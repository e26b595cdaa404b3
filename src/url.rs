//! URL sanitization policy
//!
//! A URL is accepted when it is the site root, an in-page fragment, or uses a
//! scheme from the allow-list. Accepted URLs are returned escaped for an
//! attribute context; everything else collapses to an empty string.

use std::sync::Arc;

use tracing::trace;

use crate::filter::escape_attr_value;

const DEFAULT_PROTOCOLS: [&str; 26] = [
    "http",
    "https",
    "mailto",
    "iform",
    "tel",
    "flow",
    "lfmobile",
    "arcgis-navigator",
    "arcgis-appstudio-player",
    "arcgis-survey123",
    "arcgis-collector",
    "arcgis-workforce",
    "arcgis-explorer",
    "arcgis-trek2there",
    "arcgis-quickcapture",
    "mspbi",
    "comgooglemaps",
    "pdfefile",
    "pdfehttp",
    "pdfehttps",
    "boxapp",
    "boxemm",
    "awb",
    "awbs",
    "gropen",
    "radarscope",
];

/// The built-in scheme allow-list, in declaration order
pub fn default_protocols() -> Vec<String> {
    DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect()
}

/// Per-call options for [`UrlPolicy::sanitize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlOptions {
    /// When false, a URL without any scheme is completed with `https://`
    pub is_protocol_required: bool,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            is_protocol_required: true,
        }
    }
}

/// Scheme allow-list used to judge link and source URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPolicy {
    protocols: Arc<[String]>,
}

impl Default for UrlPolicy {
    fn default() -> Self {
        Self::new(default_protocols())
    }
}

impl UrlPolicy {
    /// Creates a policy from scheme names; names are compared lower-cased
    pub fn new<I, S>(protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protocols: protocols
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .collect(),
        }
    }

    pub fn protocols(&self) -> &[String] {
        &self.protocols
    }

    /// Whether `protocol` is in the allow-list, ignoring case
    pub fn allows_protocol(&self, protocol: &str) -> bool {
        let protocol = protocol.to_lowercase();
        self.protocols.iter().any(|p| *p == protocol)
    }

    /// Sanitizes a URL
    ///
    /// # Arguments
    /// * `url` - Raw URL as found in markup or supplied by a caller
    /// * `options` - Whether a scheme-less URL is rejected or completed
    ///
    /// # Returns
    /// * `String` - The escaped URL, or an empty string when it is rejected
    ///
    /// # Examples
    /// ```
    /// use xss_sanitizer::url::{UrlOptions, UrlPolicy};
    ///
    /// let policy = UrlPolicy::default();
    /// assert_eq!(policy.sanitize("https://esri.com", UrlOptions::default()), "https://esri.com");
    /// assert_eq!(policy.sanitize("javascript:alert(1)", UrlOptions::default()), "");
    ///
    /// let optional = UrlOptions { is_protocol_required: false };
    /// assert_eq!(policy.sanitize("esri.com", optional), "https://esri.com");
    /// ```
    pub fn sanitize(&self, url: &str, options: UrlOptions) -> String {
        let protocol = protocol_of(url);
        let is_root = url == "/";
        let is_fragment = url.starts_with('#');

        if is_root || is_fragment || (!protocol.is_empty() && self.allows_protocol(protocol)) {
            return escape_attr_value(url);
        }

        if protocol.is_empty() && !options.is_protocol_required {
            return escape_attr_value(&format!("https://{}", url));
        }

        trace!(url, protocol, "rejecting url");
        String::new()
    }
}

/// Text before the first `:`, trimmed; empty when there is no colon
fn protocol_of(url: &str) -> &str {
    url.split_once(':')
        .map(|(scheme, _)| scheme.trim())
        .unwrap_or("")
}
