//! Sort, filter and paging state, and its translation into query parameters.

use serde::{Deserialize, Serialize};

use super::config::SourceConfig;

/// Sort direction for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

enum_display_fromstr!(
    SortDirection,
    crate::error::ListSourceError::invalid_sort_direction,
    {
        Asc => "asc",
        Desc => "desc",
    }
);

impl SortDirection {
    /// Upper-case form sent on the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One entry of the sort specification. Earlier entries are primary keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// One entry of the filter specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub field: String,
    pub search: String,
}

impl FilterSpec {
    pub fn new(field: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            search: search.into(),
        }
    }
}

/// Paging specification. A zero in either field disables paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Paging {
    pub page: u32,
    pub per_page: u32,
}

impl Paging {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Both values are set (non-zero).
    pub fn is_active(&self) -> bool {
        self.page != 0 && self.per_page != 0
    }
}

/// Ordered query-parameter multimap. Keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// All values for `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Form-urlencoded rendering in insertion order, without a leading `?`.
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// Build the full parameter set: sort first, then filters, then paging.
pub fn build_params(
    config: &SourceConfig,
    sort: &[SortSpec],
    filters: &[FilterSpec],
    paging: Option<&Paging>,
) -> QueryParams {
    let mut params = QueryParams::new();
    add_sort_params(&mut params, config, sort);
    add_filter_params(&mut params, config, filters);
    add_paging_params(&mut params, config, paging);
    params
}

fn add_sort_params(params: &mut QueryParams, config: &SourceConfig, sort: &[SortSpec]) {
    for spec in sort {
        params.append(&config.sort_field_key, &spec.field);
        params.append(&config.sort_direction_key, spec.direction.as_wire());
    }
}

fn add_filter_params(params: &mut QueryParams, config: &SourceConfig, filters: &[FilterSpec]) {
    for filter in filters.iter().filter(|f| !f.search.is_empty()) {
        params.append(config.filter_param(&filter.field), &filter.search);
    }
}

fn add_paging_params(params: &mut QueryParams, config: &SourceConfig, paging: Option<&Paging>) {
    if let Some(paging) = paging.filter(|p| p.is_active()) {
        params.append(&config.page_key, paging.page.to_string());
        params.append(&config.per_page_key, paging.per_page.to_string());
    }
}
