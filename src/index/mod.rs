pub mod doc_index;
pub mod loader;
pub mod stats;
pub mod types;

pub use doc_index::{DocIndex, MatchField};
pub use loader::{load_file, parse_search_index};
pub use types::*;
