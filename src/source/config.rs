//! Keys that describe how a list endpoint expects its query parameters and
//! where it puts rows and row counts in its responses.

use serde::{Deserialize, Serialize};

use crate::error::{ListSourceError, Result};

/// Placeholder substituted with the field name in
/// [`SourceConfig::filter_field_template`].
pub const FIELD_PLACEHOLDER: &str = "#field#";

/// Immutable configuration of a [`RemoteListSource`](super::RemoteListSource).
///
/// Every key except `endpoint` has a default, so a settings file only needs
/// to name what differs from the conventions below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// List endpoint URL. Must be non-empty.
    #[serde(default)]
    pub endpoint: String,

    /// Dot-path to the row array in the response body (default: `data`).
    /// `None` or an empty string means the whole body is the array.
    #[serde(default = "default_data_key")]
    pub data_key: Option<String>,

    /// Response header name, or dot-path into the body, holding the total
    /// row count (default: `total`).
    #[serde(default = "default_total_key")]
    pub total_key: String,

    /// Query parameter carrying the page number (default: `page`)
    #[serde(default = "default_page_key")]
    pub page_key: String,

    /// Query parameter carrying the page size (default: `per_page`)
    #[serde(default = "default_per_page_key")]
    pub per_page_key: String,

    /// Query parameter carrying a sort field (default: `_sort`)
    #[serde(default = "default_sort_field_key")]
    pub sort_field_key: String,

    /// Query parameter carrying a sort direction (default: `_order`)
    #[serde(default = "default_sort_direction_key")]
    pub sort_direction_key: String,

    /// Filter parameter name template; `#field#` is replaced with the
    /// filtered field's name (default: `#field#_like`).
    #[serde(default = "default_filter_field_template")]
    pub filter_field_template: String,
}

fn default_data_key() -> Option<String> {
    Some("data".to_string())
}

fn default_total_key() -> String {
    "total".to_string()
}

fn default_page_key() -> String {
    "page".to_string()
}

fn default_per_page_key() -> String {
    "per_page".to_string()
}

fn default_sort_field_key() -> String {
    "_sort".to_string()
}

fn default_sort_direction_key() -> String {
    "_order".to_string()
}

fn default_filter_field_template() -> String {
    format!("{FIELD_PLACEHOLDER}_like")
}

impl SourceConfig {
    /// Create a configuration for `endpoint` with every other key defaulted.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            data_key: default_data_key(),
            total_key: default_total_key(),
            page_key: default_page_key(),
            per_page_key: default_per_page_key(),
            sort_field_key: default_sort_field_key(),
            sort_direction_key: default_sort_direction_key(),
            filter_field_template: default_filter_field_template(),
        }
    }

    /// Check the invariants that construction of a source relies on.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(ListSourceError::Config(
                "at least an endpoint must be specified for a remote list source".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured data key, treating an empty string as "not set".
    pub fn data_key(&self) -> Option<&str> {
        self.data_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Parameter name used to filter on `field`.
    pub fn filter_param(&self, field: &str) -> String {
        self.filter_field_template.replace(FIELD_PLACEHOLDER, field)
    }

    pub fn with_data_key(mut self, key: Option<&str>) -> Self {
        self.data_key = key.map(str::to_string);
        self
    }

    pub fn with_total_key(mut self, key: &str) -> Self {
        self.total_key = key.to_string();
        self
    }

    pub fn with_paging_keys(mut self, page_key: &str, per_page_key: &str) -> Self {
        self.page_key = page_key.to_string();
        self.per_page_key = per_page_key.to_string();
        self
    }

    pub fn with_sort_keys(mut self, field_key: &str, direction_key: &str) -> Self {
        self.sort_field_key = field_key.to_string();
        self.sort_direction_key = direction_key.to_string();
        self
    }

    pub fn with_filter_template(mut self, template: &str) -> Self {
        self.filter_field_template = template.to_string();
        self
    }
}
