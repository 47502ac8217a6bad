//! Remote, server-driven list data source.
//!
//! A [`RemoteListSource`] turns the sort, filter and paging state set by a
//! table component into one authenticated GET request and normalizes the
//! response into rows plus a total row count.
//!
//! Fetching takes `&mut self`, so one source never has two fetches in
//! flight, and the stored state always belongs to the last completed call. Callers
//! that want to fetch concurrently use [`RemoteListSource::fetch`], which
//! leaves the cached result alone.

pub mod config;
pub mod extract;
pub mod query;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;

use crate::auth::{BearerHeader, TokenProvider};
use crate::error::{ListSourceError, Result};
use crate::transport::HttpClient;

pub use config::{FIELD_PLACEHOLDER, SourceConfig};
pub use extract::{extract_data, extract_total};
pub use query::{FilterSpec, Paging, QueryParams, SortDirection, SortSpec, build_params};

/// Rows and total row count of one successful fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchResult {
    pub items: Vec<Value>,
    pub total_count: u64,
}

/// List data source backed by a remote endpoint.
pub struct RemoteListSource<C, A> {
    client: C,
    auth: A,
    config: SourceConfig,
    sort: Vec<SortSpec>,
    filters: Vec<FilterSpec>,
    paging: Option<Paging>,
    last_total: u64,
    data: Vec<Value>,
}

impl<C: HttpClient, A: TokenProvider> RemoteListSource<C, A> {
    /// Create a source for `endpoint` with default keys.
    ///
    /// Fails with [`ListSourceError::Config`] when the endpoint is empty.
    pub fn new(client: C, auth: A, endpoint: impl Into<String>) -> Result<Self> {
        Self::with_config(client, auth, SourceConfig::new(endpoint))
    }

    /// Create a source from a full configuration.
    pub fn with_config(client: C, auth: A, config: SourceConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            client,
            auth,
            config,
            sort: Vec::new(),
            filters: Vec::new(),
            paging: None,
            last_total: 0,
            data: Vec::new(),
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    pub fn sort(&self) -> &[SortSpec] {
        &self.sort
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn paging(&self) -> Option<&Paging> {
        self.paging.as_ref()
    }

    /// Replace the sort specification. Order is significant.
    pub fn set_sort(&mut self, sort: Vec<SortSpec>) {
        self.sort = sort;
    }

    pub fn set_filters(&mut self, filters: Vec<FilterSpec>) {
        self.filters = filters;
    }

    /// Set or replace the filter on one field, keeping the others.
    pub fn set_filter(&mut self, field: &str, search: &str) {
        match self.filters.iter_mut().find(|f| f.field == field) {
            Some(existing) => existing.search = search.to_string(),
            None => self.filters.push(FilterSpec::new(field, search)),
        }
    }

    pub fn set_paging(&mut self, paging: Option<Paging>) {
        self.paging = paging;
    }

    /// Move to `page`, keeping the current page size.
    pub fn set_page(&mut self, page: u32) {
        let per_page = self.paging.map(|p| p.per_page).unwrap_or_default();
        self.paging = Some(Paging::new(page, per_page));
    }

    /// Query parameters for the current request state.
    pub fn request_params(&self) -> QueryParams {
        build_params(
            &self.config,
            &self.sort,
            &self.filters,
            self.paging.as_ref(),
        )
    }

    /// Total row count stored by the last successful fetch (0 before any).
    pub fn count(&self) -> u64 {
        self.last_total
    }

    /// Rows stored by the last successful fetch.
    pub fn data(&self) -> &[Value] {
        &self.data
    }

    /// Fetch the current page and store its rows and total.
    ///
    /// On failure the previously stored rows and total are kept.
    pub async fn get_elements(&mut self) -> Result<&[Value]> {
        let FetchResult { items, total_count } = self.fetch().await?;
        self.last_total = total_count;
        self.data = items;
        Ok(&self.data)
    }

    /// Run the request pipeline without touching stored state:
    /// token, request, response, extraction.
    pub async fn fetch(&self) -> Result<FetchResult> {
        let params = self.request_params();

        let token = self.auth.token().await.map_err(|e| match e {
            ListSourceError::Auth(_) => e,
            other => ListSourceError::Auth(other.to_string()),
        })?;
        let bearer = BearerHeader::new(&token)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer.as_header_value().clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(
            "requesting {} ?{} ({})",
            self.config.endpoint,
            params.to_query_string(),
            bearer
        );

        let response = self
            .client
            .get(&self.config.endpoint, &params, headers)
            .await
            .map_err(|e| match e {
                ListSourceError::Transport { .. } => e,
                other => ListSourceError::transport(other.to_string()),
            })?;

        let total_count = extract_total(&self.config, &response).inspect_err(|e| {
            tracing::warn!("unexpected total in response from {}: {e}", self.config.endpoint);
        })?;
        let items = extract_data(&self.config, response.into_body()).inspect_err(|e| {
            tracing::warn!("unexpected response shape from {}: {e}", self.config.endpoint);
        })?;

        Ok(FetchResult { items, total_count })
    }
}
