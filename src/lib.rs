// xss-sanitizer: policy-driven XSS sanitization
// Exposes the sanitizer, its policy building blocks and the batch/CLI surface as a library

pub mod attribute;
pub mod batch;
pub mod cli;
pub mod config;
pub mod encode;
pub mod error;
pub mod filter;
pub mod sanitize;
pub mod url;
pub mod validation;
pub mod value;
pub mod whitelist;

pub use attribute::{AttributeSanitizer, DefaultAttributeSanitizer};
pub use config::{FilterOptions, SanitizeOptions};
pub use encode::{encode_attribute_value, encode_html};
pub use error::{Result, SanitizeError};
pub use filter::{CssFilter, DefaultCssFilter, HtmlFilter, XssFilter};
pub use sanitize::{Sanitizer, SanitizerBuilder};
pub use url::{UrlOptions, UrlPolicy};
pub use validation::ValidationResult;
pub use value::{OpaqueKind, Value};
pub use whitelist::{default_whitelist, TagRule, Whitelist};
