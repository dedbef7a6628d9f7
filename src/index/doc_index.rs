use crate::error::IndexError;
use crate::index::loader;
use crate::index::types::{Category, DocId, DocumentRecord, IndexStats};
use crate::utils::fold_case;
use anyhow::{Context, Result};
use memchr::memmem::Finder;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;
use std::path::Path;
use tracing::{info, warn};

/// Which field of a record a query matched (title wins when both do)
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    Title,
    Text,
}

/// Case-folded copies of the searchable fields, computed once at load
struct FoldedFields {
    title: String,
    text: String,
}

/// Immutable, ordered table of documentation records.
///
/// Built once from a full record list and never mutated; rebuilding means
/// constructing a new index. All queries are plain reads, so a shared
/// `&DocIndex` may be used from any number of threads.
pub struct DocIndex {
    records: Vec<DocumentRecord>,
    folded: Vec<FoldedFields>,
    by_location: FxHashMap<String, DocId>,
}

impl DocIndex {
    /// Build an index from records in table-of-contents order.
    ///
    /// Fails if two records share a location.
    pub fn load(records: Vec<DocumentRecord>) -> Result<Self, IndexError> {
        let mut by_location =
            FxHashMap::with_capacity_and_hasher(records.len(), Default::default());
        let mut folded = Vec::with_capacity(records.len());

        for (position, record) in records.iter().enumerate() {
            match by_location.entry(record.location.clone()) {
                Entry::Occupied(existing) => {
                    let first = *existing.get() as usize;
                    warn!(
                        location = %record.location,
                        first,
                        second = position,
                        "duplicate location in search index"
                    );
                    return Err(IndexError::Validation {
                        location: record.location.clone(),
                        first,
                        second: position,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(position as DocId);
                }
            }

            folded.push(FoldedFields {
                title: fold_case(&record.title),
                text: fold_case(&record.text),
            });
        }

        info!(records = records.len(), "built documentation index");

        Ok(Self {
            records,
            folded,
            by_location,
        })
    }

    /// Read a search index file and build an index from it
    pub fn open(path: &Path) -> Result<Self> {
        let records = loader::load_file(path)
            .with_context(|| format!("Failed to load search index {}", path.display()))?;
        let index = Self::load(records)
            .with_context(|| format!("Invalid search index {}", path.display()))?;
        Ok(index)
    }

    /// Records whose title or text contains `query`, ignoring case, in load order.
    ///
    /// An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&DocumentRecord> {
        self.search_fields(query)
            .into_iter()
            .map(|(record, _)| record)
            .collect()
    }

    /// Like [`search`](Self::search), also reporting which field matched
    pub fn search_fields(&self, query: &str) -> Vec<(&DocumentRecord, MatchField)> {
        if query.is_empty() {
            return Vec::new();
        }

        let needle = fold_case(query);
        let finder = Finder::new(needle.as_bytes());

        self.records
            .iter()
            .zip(&self.folded)
            .filter_map(|(record, fields)| {
                if finder.find(fields.title.as_bytes()).is_some() {
                    Some((record, MatchField::Title))
                } else if finder.find(fields.text.as_bytes()).is_some() {
                    Some((record, MatchField::Text))
                } else {
                    None
                }
            })
            .collect()
    }

    /// Exact lookup by location
    pub fn get(&self, location: &str) -> Result<&DocumentRecord, IndexError> {
        self.position(location)
            .map(|id| &self.records[id as usize])
            .ok_or_else(|| IndexError::NotFound {
                location: location.to_string(),
            })
    }

    /// Load-order position of a location
    pub fn position(&self, location: &str) -> Option<DocId> {
        self.by_location.get(location).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in load order
    pub fn records(&self) -> &[DocumentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocumentRecord> {
        self.records.iter()
    }

    /// Page-level records in load order
    pub fn pages(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter().filter(|r| r.category == Category::Page)
    }

    /// Section records of the named page in load order
    pub fn sections_of<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a DocumentRecord> {
        self.records
            .iter()
            .filter(move |r| r.category == Category::Section && r.page == page)
    }

    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            records: self.records.len(),
            ..IndexStats::default()
        };

        for record in &self.records {
            match record.category {
                Category::Page => stats.pages += 1,
                Category::Section => stats.sections += 1,
            }
            if record.text.is_empty() {
                stats.empty_text += 1;
            }
            stats.text_bytes += record.text.len();
        }

        stats
    }
}

impl<'a> IntoIterator for &'a DocIndex {
    type Item = &'a DocumentRecord;
    type IntoIter = std::slice::Iter<'a, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl std::fmt::Debug for DocIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocIndex")
            .field("records", &self.records.len())
            .finish()
    }
}
