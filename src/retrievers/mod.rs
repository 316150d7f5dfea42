//! Concrete candidate retriever implementations.
//!
//! Each module provides a struct implementing [`crate::retriever::Retriever`]
//! against a specific retrieval source.

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGoRetriever;
