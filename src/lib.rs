//! Server-driven list data source.
//!
//! [`RemoteListSource`] lets a table component page, sort and filter rows
//! that live behind an authenticated HTTP endpoint, without the component
//! knowing about HTTP, tokens or the response layout.

#[macro_use]
mod macros;

pub mod auth;
pub mod config;
pub mod display;
pub mod error;
pub mod json_path;
pub mod source;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_guards;

pub use auth::{ConfiguredToken, EnvToken, StaticToken, TokenProvider};
pub use error::{ListSourceError, Result};
pub use source::{
    FetchResult, FilterSpec, Paging, QueryParams, RemoteListSource, SortDirection, SortSpec,
    SourceConfig,
};
pub use transport::{HttpClient, HttpResponse, ReqwestClient};
