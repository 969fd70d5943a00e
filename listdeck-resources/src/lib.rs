//! Concrete resource bindings for the admin console.
//!
//! Each module wires one server resource (endpoints, filter and row
//! shapes, default sort) into the generic controller's
//! [`ResourceBinding`](listdeck_core::ResourceBinding) interface. The
//! status dictionary key `common.status` is shared by all resources.

pub mod category;
pub mod post;

pub use category::{CategoryBinding, CategoryFilter, CategoryRow};
pub use post::{PostBinding, PostFilter, PostRow};

/// Dictionary key for the shared enabled/disabled status codes.
pub const STATUS_DICTIONARY_KEY: &str = "common.status";
