//! Prompt system for the Rihla assistant.
//!
//! This crate provides the supported-language model and the per-language
//! prompt templates used by the answering pipeline:
//! - Relevance grading prompts
//! - Grounded answer generation prompts
//! - Query rewriting prompts
//! - Fixed localized fallback messages
//!
//! Templates are rendered with Handlebars; each node's template is looked up
//! by language so the pipeline logic stays independent of how many languages
//! are supported.

pub mod language;
pub mod templates;

// Re-export main types
pub use language::Language;
pub use templates::{
    generation_prompt, grading_prompt, index_unavailable_message, no_information_message,
    rewrite_prompt, unsupported_language_message,
};
