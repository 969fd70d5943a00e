//! HTTP transport layer for listdeck resource bindings.
//!
//! Wraps the admin backend's wire conventions: an enveloped JSON body
//! (`code`/`msg`/`data`), comma-joined id lists on DELETE, and exports
//! delivered as file downloads.

pub mod client;
pub mod config;
pub mod error;

pub use client::{PageDto, ResponseData, RestClient};
pub use config::{AuthConfig, ConfigError, ConsoleConfig};
pub use error::ApiClientError;
