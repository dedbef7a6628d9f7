//! # docdex - Documentation search index
//!
//! docdex loads the flat record list a static documentation generator emits
//! for its client-side search widget (Documenter's `search_index.js`) into an
//! immutable in-memory table, and answers case-insensitive substring queries
//! against record titles and text.
//!
//! ## Architecture
//!
//! - [`index`] - Record types, the loader for generated index files, and [`DocIndex`]
//! - [`query`] - Query-string parsing (filters, limits), execution, snippets
//! - [`output`] - Terminal and JSON result formatting
//! - [`utils`] - Case folding and per-user configuration
//! - [`error`] - Typed errors for loading and lookups
//!
//! ## Quick Start
//!
//! ```
//! use docdex::{Category, DocIndex, DocumentRecord};
//!
//! let index = DocIndex::load(vec![
//!     DocumentRecord::new("a", "Guide", "Streaming", Category::Section, "stream kernel execution"),
//!     DocumentRecord::new("b", "Guide", "Setup", Category::Section, "install CUDA"),
//! ])
//! .unwrap();
//!
//! let hits = index.search("cuda");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].location, "b");
//! assert!(index.search("").is_empty());
//! ```
//!
//! Results always follow load order: there is no relevance ranking.

pub mod error;
pub mod index;
pub mod output;
pub mod query;
pub mod utils;

pub use error::{IndexError, LoadError};
pub use index::{Category, DocIndex, DocumentRecord, MatchField};
