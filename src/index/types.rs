use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a record in load (table-of-contents) order
pub type DocId = u32;

/// Whether a record denotes a whole page or a subsection of one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Page,
    Section,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Page => "page",
            Category::Section => "section",
        }
    }

    /// Parse a category name as written in query filters
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "page" | "pages" => Some(Category::Page),
            "section" | "sections" | "sec" => Some(Category::Section),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a generated documentation search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique identifier / URI fragment linking back to the rendered page
    pub location: String,
    /// Human-readable page name
    pub page: String,
    /// Section or page title
    pub title: String,
    pub category: Category,
    /// Plain text of the section (empty for page-level placeholders)
    #[serde(default)]
    pub text: String,
}

impl DocumentRecord {
    pub fn new(
        location: impl Into<String>,
        page: impl Into<String>,
        title: impl Into<String>,
        category: Category,
        text: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            page: page.into(),
            title: title.into(),
            category,
            text: text.into(),
        }
    }

    pub fn is_page(&self) -> bool {
        self.category == Category::Page
    }

    pub fn is_section(&self) -> bool {
        self.category == Category::Section
    }
}

/// Summary counts for a loaded index
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub records: usize,
    pub pages: usize,
    pub sections: usize,
    /// Records whose text is empty
    pub empty_text: usize,
    /// Total bytes of record text
    pub text_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Section).unwrap();
        assert_eq!(json, "\"section\"");

        let parsed: Category = serde_json::from_str("\"page\"").unwrap();
        assert_eq!(parsed, Category::Page);
    }

    #[test]
    fn test_category_from_name() {
        assert_eq!(Category::from_name("Page"), Some(Category::Page));
        assert_eq!(Category::from_name("sections"), Some(Category::Section));
        assert_eq!(Category::from_name("chapter"), None);
    }

    #[test]
    fn test_record_missing_text_defaults_to_empty() {
        let record: DocumentRecord = serde_json::from_str(
            r##"{"location": "#", "page": "Home", "title": "Home", "category": "page"}"##,
        )
        .unwrap();
        assert!(record.text.is_empty());
        assert!(record.is_page());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let result: Result<DocumentRecord, _> = serde_json::from_str(
            r##"{"location": "#", "page": "Home", "title": "Home", "category": "chapter", "text": ""}"##,
        );
        assert!(result.is_err());
    }
}
