//! API Documentation module
//!
//! Provides OpenAPI specification generation for the chat API using utoipa.

mod openapi;

pub use openapi::ChatApiDoc;
