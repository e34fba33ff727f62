//! Typed service layer for the placement portal REST API.
//!
//! Each service is a stateless wrapper that turns a caller's intent into one
//! HTTP call, unwraps the `{ "data": ... }` envelope and normalizes failures
//! into [`ClientError`].

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::ClientError;
pub use services::{JnfService, PlacementService, PlacementSessionService, StudentService};
