pub mod executor;
pub mod parser;
pub mod snippet;

pub use executor::{QueryExecutor, SearchMatch, SearchResults};
pub use parser::{parse_query, parse_query_with_options};
// Re-exports for public API
pub use parser::{Query, QueryFilters, QueryOptions};
pub use snippet::Snippet;
