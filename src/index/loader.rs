//! Reading generated documentation search indexes.
//!
//! Documenter writes its index as a JavaScript assignment:
//!
//! ```text
//! var documenterSearchIndex = {"docs": [
//! {
//!     "location": "#",
//!     "page": "Home",
//!     "title": "Home",
//!     "category": "page",
//!     "text": "don\'t panic"
//! },
//! ]}
//! ```
//!
//! which is not JSON: the assignment prefix, `\'` escapes and the trailing
//! comma are all rejected by a strict parser. [`normalize_source`] rewrites
//! those quirks in one pass before handing the text to `serde_json`. Plain
//! `{"docs": [...]}` objects and bare `[...]` arrays are accepted as well.

use crate::error::LoadError;
use crate::index::types::DocumentRecord;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize)]
struct WrappedIndex {
    docs: Vec<DocumentRecord>,
}

/// Read and parse a search index file
pub fn load_file(path: &Path) -> Result<Vec<DocumentRecord>, LoadError> {
    let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = source.len(), "read search index");
    parse_search_index(&source)
}

/// Parse the contents of a search index file into records, in file order
pub fn parse_search_index(source: &str) -> Result<Vec<DocumentRecord>, LoadError> {
    let body = strip_assignment(source);
    let json = normalize_source(body);

    let records = if json.trim_start().starts_with('[') {
        serde_json::from_str::<Vec<DocumentRecord>>(&json)?
    } else {
        serde_json::from_str::<WrappedIndex>(&json)?.docs
    };

    debug!(records = records.len(), "parsed search index");
    Ok(records)
}

/// Strip a leading `var name =` assignment and trailing `;`
fn strip_assignment(source: &str) -> &str {
    let trimmed = source.trim_start_matches('\u{feff}').trim();

    let body = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        trimmed
    } else if let Some(eq) = trimmed.find('=') {
        trimmed[eq + 1..].trim_start()
    } else {
        trimmed
    };

    body.trim_end_matches(|c: char| c == ';' || c.is_whitespace())
}

/// Rewrite JavaScript-literal quirks into strict JSON.
///
/// Inside strings `\'` becomes `'`, raw control characters become JSON
/// escapes, and every other escape is copied verbatim.
/// Outside strings a comma followed (after whitespace) by `]` or `}` is dropped.
pub fn normalize_source(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.char_indices();
    let mut in_string = false;
    let mut rewrites = 0usize;

    while let Some((idx, ch)) = chars.next() {
        if in_string {
            match ch {
                '\\' => match chars.next() {
                    Some((_, '\'')) => {
                        out.push('\'');
                        rewrites += 1;
                    }
                    Some((_, escaped)) => {
                        out.push('\\');
                        out.push(escaped);
                    }
                    None => out.push('\\'),
                },
                '"' => {
                    in_string = false;
                    out.push(ch);
                }
                '\t' => {
                    out.push_str("\\t");
                    rewrites += 1;
                }
                '\n' => {
                    out.push_str("\\n");
                    rewrites += 1;
                }
                '\r' => {
                    out.push_str("\\r");
                    rewrites += 1;
                }
                c if c < '\u{20}' => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                    rewrites += 1;
                }
                _ => out.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' if is_trailing_comma(&body[idx + 1..]) => {
                rewrites += 1;
            }
            _ => out.push(ch),
        }
    }

    if rewrites > 0 {
        debug!(rewrites, "normalized javascript literal quirks");
    }
    out
}

fn is_trailing_comma(rest: &str) -> bool {
    matches!(rest.trim_start().chars().next(), Some(']') | Some('}'))
}
