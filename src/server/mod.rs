//! Server module for building the HTTP application
//!
//! This module provides a `ServerBuilder` that registers:
//! - the routes of every resource (companies, invoices, industries)
//! - health check routes
//! - request tracing and optional CORS layers

pub mod builder;
pub mod entity_registry;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
