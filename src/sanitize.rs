// src/sanitize.rs
//
// Deep value sanitization. Every string leaf goes through the HTML filtering
// engine; everything else is kept, nulled or walked. Unchanged input is
// returned borrowed so callers can tell a no-op apart from a rewrite.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::attribute::{default_url_attributes, AttributeSanitizer, DefaultAttributeSanitizer};
use crate::config::{FilterOptions, SanitizeOptions};
use crate::encode;
use crate::error::{Result, SanitizeError};
use crate::filter::{CssFilter, DefaultCssFilter, HtmlFilter, XssFilter};
use crate::url::{default_protocols, UrlOptions, UrlPolicy};
use crate::validation::ValidationResult;
use crate::value::{Map, Value};
use crate::whitelist::Whitelist;

struct Inner {
    options: FilterOptions,
    whitelist: Whitelist,
    url_policy: UrlPolicy,
    attribute_sanitizer: Arc<dyn AttributeSanitizer>,
    css_filter: Arc<dyn CssFilter>,
    engine: Arc<dyn HtmlFilter>,
}

/// Policy-driven XSS sanitizer
///
/// Cheap to clone and safe to share between threads: all state is built once
/// at construction and never mutated.
///
/// # Examples
///
/// ```
/// use xss_sanitizer::{Sanitizer, SanitizeOptions, Value};
///
/// let sanitizer = Sanitizer::new();
/// let dirty = Value::from(r#"<img src="https://example.org/a.png" onerror="alert(1)">"#);
/// let clean = sanitizer.sanitize(&dirty, &SanitizeOptions::default());
///
/// assert_eq!(clean.as_str(), Some(r#"<img src="https://example.org/a.png">"#));
/// ```
#[derive(Clone)]
pub struct Sanitizer {
    inner: Arc<Inner>,
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("options", &self.inner.options)
            .field("url_policy", &self.inner.url_policy)
            .finish_non_exhaustive()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sanitizer {
    /// Creates a sanitizer with the built-in policy
    pub fn new() -> Self {
        SanitizerBuilder::default().build()
    }

    /// Creates a sanitizer from caller options
    ///
    /// # Arguments
    /// * `options` - Constructor options, usually loaded from JSON
    /// * `extend_defaults` - Merge into the built-in policy instead of
    ///   replacing it
    pub fn with_options(options: FilterOptions, extend_defaults: bool) -> Self {
        Self::builder().options(options, extend_defaults).build()
    }

    /// Starts a builder for policies beyond [`FilterOptions`]
    pub fn builder() -> SanitizerBuilder {
        SanitizerBuilder::default()
    }

    /// The effective options after defaults were applied
    pub fn filter_options(&self) -> &FilterOptions {
        &self.inner.options
    }

    /// The effective whitelist
    pub fn whitelist(&self) -> &Whitelist {
        &self.inner.whitelist
    }

    pub fn url_policy(&self) -> &UrlPolicy {
        &self.inner.url_policy
    }

    /// Sanitizes a value of any shape
    ///
    /// Numbers, booleans and null are kept (non-finite numbers become null),
    /// strings are filtered as HTML, arrays and objects are walked and copied
    /// only when something inside them changed, and opaque values become null.
    /// `Cow::Borrowed` means the input was already safe.
    ///
    /// A fault while walking a composite, such as an engine error on one of
    /// its strings or exceeding [`SanitizeOptions::max_depth`], turns that
    /// composite into null; it is never reported to the caller.
    pub fn sanitize<'a>(&self, value: &'a Value, options: &SanitizeOptions) -> Cow<'a, Value> {
        self.try_sanitize(value, options, 0).unwrap_or_else(|e| {
            debug!("Sanitization of top-level value failed: {}", e);
            Cow::Owned(Value::Null)
        })
    }

    /// Sanitizes a value and reports whether that changed anything
    ///
    /// # Examples
    /// ```
    /// use xss_sanitizer::{Sanitizer, SanitizeOptions, Value};
    ///
    /// let sanitizer = Sanitizer::new();
    /// let ok = Value::from("<b>ok</b>");
    /// let result = sanitizer.validate(&ok, &SanitizeOptions::default());
    /// assert!(result.is_valid);
    ///
    /// let bad = Value::from("<script>x</script>");
    /// let result = sanitizer.validate(&bad, &SanitizeOptions::default());
    /// assert!(!result.is_valid);
    /// ```
    pub fn validate<'a>(&self, value: &'a Value, options: &SanitizeOptions) -> ValidationResult<'a> {
        ValidationResult::from_sanitized(self.sanitize(value, options))
    }

    /// Filters one HTML string
    ///
    /// Returns the input borrowed when the engine left it untouched.
    pub fn sanitize_html<'a>(&self, html: &'a str) -> Result<Cow<'a, str>> {
        let filtered = self.inner.engine.process(html)?;
        if filtered == html {
            Ok(Cow::Borrowed(html))
        } else {
            Ok(Cow::Owned(filtered))
        }
    }

    /// Applies the URL policy to a single URL
    pub fn sanitize_url(&self, url: &str, options: UrlOptions) -> String {
        self.inner.url_policy.sanitize(url, options)
    }

    /// Sanitizes one attribute value the same way the engine does
    ///
    /// # Arguments
    /// * `tag` - Lower-case tag name
    /// * `name` - Lower-case attribute name
    /// * `value` - Raw attribute value
    /// * `css_filter` - CSS filter for `style` values; the sanitizer's own
    ///   filter when `None`
    pub fn sanitize_attribute_value(
        &self,
        tag: &str,
        name: &str,
        value: &str,
        css_filter: Option<&dyn CssFilter>,
    ) -> String {
        let css = css_filter.unwrap_or(self.inner.css_filter.as_ref());
        self.inner
            .attribute_sanitizer
            .sanitize_attribute(tag, name, value, css)
    }

    /// See [`encode::encode_html`]
    pub fn encode_html(&self, value: &str) -> String {
        encode::encode_html(value)
    }

    /// See [`encode::encode_attribute_value`]
    pub fn encode_attribute_value(&self, value: &str) -> String {
        encode::encode_attribute_value(value)
    }

    fn try_sanitize<'a>(
        &self,
        value: &'a Value,
        options: &SanitizeOptions,
        depth: usize,
    ) -> Result<Cow<'a, Value>> {
        match value {
            Value::Number(n) if !n.is_finite() => Ok(Cow::Owned(Value::Null)),
            Value::Number(_) | Value::Bool(_) | Value::Null => Ok(Cow::Borrowed(value)),
            Value::String(s) => Ok(match self.sanitize_html(s)? {
                Cow::Borrowed(_) => Cow::Borrowed(value),
                Cow::Owned(filtered) => Cow::Owned(Value::String(filtered)),
            }),
            Value::Array(_) | Value::Object(_) => {
                Ok(self.iterate_over(value, options, depth + 1).unwrap_or_else(|e| {
                    debug!("Collapsing composite at depth {} to null: {}", depth + 1, e);
                    Cow::Owned(Value::Null)
                }))
            }
            Value::Undefined if options.allow_undefined => Ok(Cow::Borrowed(value)),
            Value::Undefined | Value::Opaque(_) => Ok(Cow::Owned(Value::Null)),
        }
    }

    /// Walks the children of a composite, copying it on the first change
    fn iterate_over<'a>(
        &self,
        value: &'a Value,
        options: &SanitizeOptions,
        depth: usize,
    ) -> Result<Cow<'a, Value>> {
        if let Some(max_depth) = options.max_depth {
            if depth > max_depth {
                return Err(SanitizeError::DepthExceeded { max_depth });
            }
        }

        match value {
            Value::Array(items) => {
                let mut copy: Option<Vec<Value>> = None;
                for (i, item) in items.iter().enumerate() {
                    match self.try_sanitize(item, options, depth)? {
                        Cow::Owned(changed) => {
                            copy.get_or_insert_with(|| items[..i].to_vec()).push(changed)
                        }
                        Cow::Borrowed(same) => {
                            if let Some(copy) = copy.as_mut() {
                                copy.push(same.clone());
                            }
                        }
                    }
                }
                Ok(copy.map_or(Cow::Borrowed(value), |items| Cow::Owned(Value::Array(items))))
            }
            Value::Object(map) => {
                let mut copy: Option<Map> = None;
                for (i, (key, item)) in map.iter().enumerate() {
                    match self.try_sanitize(item, options, depth)? {
                        Cow::Owned(changed) => {
                            copy.get_or_insert_with(|| {
                                map.iter()
                                    .take(i)
                                    .map(|(k, v)| (k.clone(), v.clone()))
                                    .collect()
                            })
                            .insert(key.clone(), changed);
                        }
                        Cow::Borrowed(same) => {
                            if let Some(copy) = copy.as_mut() {
                                copy.insert(key.clone(), same.clone());
                            }
                        }
                    }
                }
                Ok(copy.map_or(Cow::Borrowed(value), |map| Cow::Owned(Value::Object(map))))
            }
            _ => self.try_sanitize(value, options, depth),
        }
    }
}

/// Builder for [`Sanitizer`]
///
/// # Examples
/// ```
/// use xss_sanitizer::{Sanitizer, UrlOptions};
///
/// let sanitizer = Sanitizer::builder()
///     .protocols(["https", "myapp"])
///     .build();
///
/// assert_eq!(sanitizer.sanitize_url("myapp://open", UrlOptions::default()), "myapp://open");
/// assert_eq!(sanitizer.sanitize_url("http://example.com", UrlOptions::default()), "");
/// ```
#[derive(Default)]
pub struct SanitizerBuilder {
    options: Option<(FilterOptions, bool)>,
    protocols: Option<Vec<String>>,
    url_attributes: Option<Vec<(String, String)>>,
    css_filter: Option<Arc<dyn CssFilter>>,
    engine: Option<Arc<dyn HtmlFilter>>,
}

impl SanitizerBuilder {
    /// Sets constructor options; see [`FilterOptions::resolve`]
    pub fn options(mut self, options: FilterOptions, extend_defaults: bool) -> Self {
        self.options = Some((options, extend_defaults));
        self
    }

    /// Replaces the URL scheme allow-list
    pub fn protocols<I, S>(mut self, protocols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.protocols = Some(protocols.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a `(tag, attribute)` pair judged by the URL policy
    pub fn url_attribute(mut self, tag: &str, attribute: &str) -> Self {
        self.url_attributes
            .get_or_insert_with(default_url_attributes)
            .push((tag.to_string(), attribute.to_string()));
        self
    }

    /// Replaces the CSS filter used for `style` values
    pub fn css_filter(mut self, css_filter: Arc<dyn CssFilter>) -> Self {
        self.css_filter = Some(css_filter);
        self
    }

    /// Replaces the HTML filtering engine
    ///
    /// A custom engine ignores the whitelist and engine switches of the
    /// options; they remain visible through [`Sanitizer::filter_options`].
    pub fn engine(mut self, engine: Arc<dyn HtmlFilter>) -> Self {
        self.engine = Some(engine);
        self
    }

    pub fn build(self) -> Sanitizer {
        let options = match self.options {
            Some((options, extend_defaults)) => options.resolve(extend_defaults),
            None => FilterOptions::defaults(),
        };

        let url_policy = UrlPolicy::new(self.protocols.unwrap_or_else(default_protocols));
        let attribute_sanitizer = options.safe_attr_value.clone().unwrap_or_else(|| {
            Arc::new(DefaultAttributeSanitizer::new(
                url_policy.clone(),
                self.url_attributes.unwrap_or_else(default_url_attributes),
            ))
        });
        let css_filter = self
            .css_filter
            .unwrap_or_else(|| Arc::new(DefaultCssFilter));

        let whitelist = options.white_list.clone().unwrap_or_default();
        let engine = self.engine.unwrap_or_else(|| {
            Arc::new(
                XssFilter::new(
                    whitelist.clone(),
                    options.xss_settings(),
                    attribute_sanitizer.clone(),
                )
                .with_css_filter(css_filter.clone()),
            )
        });

        info!(
            tags = whitelist.len(),
            protocols = url_policy.protocols().len(),
            "Sanitizer configured"
        );

        Sanitizer {
            inner: Arc::new(Inner {
                options,
                whitelist,
                url_policy,
                attribute_sanitizer,
                css_filter,
                engine,
            }),
        }
    }
}
