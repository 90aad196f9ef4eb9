//! # cbcexams Catalog Backend Library
//!
//! Core library for the cbcexams resource catalog: a read-only view over crawled
//! educational resources (exam papers, notes, schemes of work) with a JSON API.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: HTTP server and routing
//! - **SQLx**: Asynchronous database access with SQLite
//! - **Tokio**: Async runtime, also driving the cache sweeper
//! - **Serde**: Serialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`search`]: free-text search over four ordered parameters with progressive relaxation
//! - [`directories`]: distinct parent-directory listing with prefix stripping
//! - [`cache`]: time-expiring response cache and its background sweeper
//! - [`pagination`]: page/limit parsing and pagination metadata
//! - [`routes`]: HTTP handlers and router
//! - [`config`]: layered configuration (embedded defaults, TOML, environment)
//! - [`db`]: schema initialization
//! - [`error`]: centralized error handling and HTTP error responses
//! - [`metrics`]: request and cache counters
//! - [`state`]: shared application state
//! - [`types`]: response payloads

pub mod cache;
pub mod config;
pub mod db;
pub mod directories;
pub mod error;
pub mod metrics;
pub mod pagination;
pub mod routes;
pub mod search;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
