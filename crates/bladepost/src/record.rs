//! Template records.

use serde::{Deserialize, Serialize};

/// A template as returned by a [`TemplateSource`](crate::TemplateSource).
///
/// `html` holds the raw Blade body. It may be empty: a record can exist in a
/// source before its body has been authored, and the porting layer skips
/// such records rather than writing empty output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Stable identifier the source and sink agree on.
    pub slug: String,
    /// Human-readable template name.
    pub name: String,
    /// Raw Blade template body.
    #[serde(default)]
    pub html: String,
}

impl TemplateRecord {
    /// Creates a record.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            html: html.into(),
        }
    }

    /// Whether the record carries a body worth converting.
    pub fn has_body(&self) -> bool {
        !self.html.is_empty()
    }
}
