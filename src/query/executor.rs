use crate::index::doc_index::{DocIndex, MatchField};
use crate::index::types::DocumentRecord;
use crate::query::parser::{Query, QueryFilters};
use crate::query::snippet::{leading_snippet, make_snippet, Snippet};
use crate::utils::fold_case;
use serde::Serialize;
use tracing::debug;

/// A record matched by a query
#[derive(Debug, Clone, Serialize)]
pub struct SearchMatch<'a> {
    #[serde(flatten)]
    pub record: &'a DocumentRecord,
    /// Field the query text was found in
    pub field: MatchField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
}

/// Matches in load order, truncated to the query limit
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults<'a> {
    pub matches: Vec<SearchMatch<'a>>,
    /// Number of matches before the limit was applied
    pub total: usize,
}

impl SearchResults<'_> {
    pub fn is_truncated(&self) -> bool {
        self.total > self.matches.len()
    }
}

/// Query executor
pub struct QueryExecutor<'a> {
    index: &'a DocIndex,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(index: &'a DocIndex) -> Self {
        Self { index }
    }

    /// Execute a query and return matches.
    ///
    /// A limit of 0 returns every match.
    pub fn execute(&self, query: &Query) -> SearchResults<'a> {
        if query.is_empty() {
            return SearchResults {
                matches: Vec::new(),
                total: 0,
            };
        }

        let needle = fold_case(&query.text);
        let page = query.filters.page.as_deref().map(fold_case);

        let hits: Vec<(&'a DocumentRecord, MatchField)> = self
            .index
            .search_fields(&query.text)
            .into_iter()
            .filter(|(record, _)| passes_filters(record, &query.filters, page.as_deref()))
            .collect();

        let total = hits.len();
        let limit = if query.options.limit == 0 {
            total
        } else {
            query.options.limit
        };

        let matches = hits
            .into_iter()
            .take(limit)
            .map(|(record, field)| SearchMatch {
                record,
                field,
                snippet: snippet_for(record, field, &needle, query.options.snippet_width),
            })
            .collect::<Vec<_>>();

        debug!(
            query = %query.text,
            total,
            returned = matches.len(),
            "executed query"
        );

        SearchResults { matches, total }
    }
}

fn passes_filters(record: &DocumentRecord, filters: &QueryFilters, page_folded: Option<&str>) -> bool {
    if let Some(category) = filters.category {
        if record.category != category {
            return false;
        }
    }

    if let Some(page) = page_folded {
        if fold_case(&record.page) != page {
            return false;
        }
    }

    true
}

fn snippet_for(
    record: &DocumentRecord,
    field: MatchField,
    needle: &str,
    width: usize,
) -> Option<Snippet> {
    match field {
        MatchField::Text => make_snippet(&record.text, needle, width),
        // The text may still contain the query even when the title matched first
        MatchField::Title => make_snippet(&record.text, needle, width)
            .or_else(|| leading_snippet(&record.text, width)),
    }
}
