//! # module-browser
//!
//! A read-only web front end for a catalog of software modules stored in
//! Elasticsearch: module names, versions and releases, runtime and build
//! dependencies, and the reverse "required by" relation.
//!
//! ## Request flow
//!
//! ```text
//!   path params ──► sanitize ──► LookupResolver ──► query builder
//!                                     │                   │
//!                                     │            SearchRequest / MultiGetRequest
//!                                     │                   ▼
//!                                     │             SearchGateway ──► index
//!                                     ▼
//!                              views (HTML page)
//! ```
//!
//! Dependency pages are two sequential hops: resolve the module by its
//! (name, version, release) key, then batch-fetch its dependency ids.
//! "Required by" pages resolve the module, then filter every document
//! whose dependency list contains the module's id.
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server and index address
//! - [`models`] - Module documents, hits, multi-get slots, aggregation buckets
//! - [`sanitize`] - Character whitelist applied to all user input
//! - [`search::query`] - Pure builders for search, aggregation and multi-get bodies
//! - [`search::gateway`] - `SearchGateway` trait and its Elasticsearch implementation
//! - [`resolver`] - Composite lookups: module, versions, dependencies, required-by
//! - [`api`] - Axum routes, handlers and HTML views
//! - [`state`] - Shared application state holding the injected gateway

pub mod api;
pub mod config;
pub mod models;
pub mod resolver;
pub mod sanitize;
pub mod search;
pub mod state;
