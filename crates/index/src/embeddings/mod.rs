//! Embedding encoder for queries.
//!
//! Queries must be embedded in the same vector space the indices were built
//! with, so the provider and model are part of the application configuration
//! and validated against each loaded store.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
