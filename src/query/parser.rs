use crate::index::types::Category;

/// Parsed query: a literal search text plus record filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Literal substring matched against titles and text
    pub text: String,
    pub filters: QueryFilters,
    pub options: QueryOptions,
}

impl Query {
    /// A query with no text matches nothing
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Query filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilters {
    /// Category filter (category:page, cat:section)
    pub category: Option<Category>,
    /// Page name filter (page:Home, page:"Some Background on GPUs")
    pub page: Option<String>,
}

impl QueryFilters {
    /// Check if any filter is set
    pub fn has_any(&self) -> bool {
        self.category.is_some() || self.page.is_some()
    }
}

/// Query options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Maximum results
    pub limit: usize,
    /// Snippet width in chars
    pub snippet_width: usize,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            snippet_width: 120,
        }
    }
}

/// Parse a query string into a Query structure
pub fn parse_query(input: &str) -> Query {
    parse_query_with_options(input, QueryOptions::default())
}

/// Parse a query string, starting from the given options.
///
/// Options written in the query itself (`top:5`) override `defaults`.
pub fn parse_query_with_options(input: &str, defaults: QueryOptions) -> Query {
    let mut parser = QueryParser::new(input, defaults);
    parser.parse()
}

/// Query parser
struct QueryParser<'a> {
    input: &'a str,
    pos: usize,
    words: Vec<String>,
    filters: QueryFilters,
    options: QueryOptions,
}

impl<'a> QueryParser<'a> {
    fn new(input: &'a str, options: QueryOptions) -> Self {
        Self {
            input,
            pos: 0,
            words: Vec::new(),
            filters: QueryFilters::default(),
            options,
        }
    }

    fn parse(&mut self) -> Query {
        loop {
            self.skip_whitespace();
            if self.is_eof() {
                break;
            }

            if self.peek_char() == Some('"') {
                let phrase = self.parse_phrase();
                if !phrase.is_empty() {
                    self.words.push(phrase);
                }
            } else {
                self.parse_term();
            }
        }

        Query {
            text: self.words.join(" ").trim().to_string(),
            filters: self.filters.clone(),
            options: self.options.clone(),
        }
    }

    fn parse_phrase(&mut self) -> String {
        self.consume_char('"');
        let start = self.pos;

        while !self.is_eof() && self.peek_char() != Some('"') {
            self.advance();
        }

        let phrase = self.input[start..self.pos].to_string();
        self.consume_char('"');

        phrase
    }

    fn parse_term(&mut self) {
        let start = self.pos;

        // Check for field prefix
        while !self.is_eof() {
            let ch = self.peek_char().unwrap_or(' ');
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                self.advance();
                if ch == ':' {
                    let field = self.input[start..self.pos - 1].to_string();
                    self.parse_field(start, &field);
                    return;
                }
            } else {
                break;
            }
        }

        // Regular word
        self.read_word();
        let word = &self.input[start..self.pos];
        if !word.is_empty() {
            self.words.push(word.to_string());
        }
    }

    fn parse_field(&mut self, start: usize, field: &str) {
        let value = if self.peek_char() == Some('"') {
            self.parse_phrase()
        } else {
            let value_start = self.pos;
            self.read_word();
            self.input[value_start..self.pos].to_string()
        };

        let recognized = match field.to_lowercase().as_str() {
            "category" | "cat" => match Category::from_name(&value) {
                Some(category) => {
                    self.filters.category = Some(category);
                    true
                }
                None => false,
            },
            "page" if !value.trim().is_empty() => {
                self.filters.page = Some(value.trim().to_string());
                true
            }
            "top" | "limit" => match value.parse() {
                Ok(n) => {
                    self.options.limit = n;
                    true
                }
                Err(_) => false,
            },
            _ => false,
        };

        if !recognized {
            // Unknown field or bad value, treat as literal
            self.words.push(self.input[start..self.pos].to_string());
        }
    }

    fn read_word(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn consume_char(&mut self, expected: char) -> bool {
        if self.peek_char() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_query() {
        let q = parse_query("stream");
        assert_eq!(q.text, "stream");
        assert!(!q.filters.has_any());
    }

    #[test]
    fn test_words_joined_with_single_space() {
        let q = parse_query("  shared    memory  ");
        assert_eq!(q.text, "shared memory");
    }

    #[test]
    fn test_phrase_keeps_inner_spacing() {
        let q = parse_query("\"kernel  launch\"");
        assert_eq!(q.text, "kernel  launch");
    }

    #[test]
    fn test_empty_query() {
        assert!(parse_query("").is_empty());
        assert!(parse_query("   ").is_empty());
        assert!(parse_query("\"\"").is_empty());
    }

    #[test]
    fn test_category_filter() {
        let q = parse_query("category:page gpu");
        assert_eq!(q.filters.category, Some(Category::Page));
        assert_eq!(q.text, "gpu");

        let q = parse_query("cat:section threads");
        assert_eq!(q.filters.category, Some(Category::Section));
        assert_eq!(q.text, "threads");
    }

    #[test]
    fn test_unknown_category_is_literal() {
        let q = parse_query("cat:dog");
        assert_eq!(q.filters.category, None);
        assert_eq!(q.text, "cat:dog");
    }

    #[test]
    fn test_page_filter_quoted() {
        let q = parse_query("page:\"Some Background on GPUs\" threads");
        assert_eq!(q.filters.page.as_deref(), Some("Some Background on GPUs"));
        assert_eq!(q.text, "threads");
    }

    #[test]
    fn test_page_filter_bare() {
        let q = parse_query("page:Home gpu");
        assert_eq!(q.filters.page.as_deref(), Some("Home"));
        assert_eq!(q.text, "gpu");
    }

    #[test]
    fn test_empty_page_filter_is_literal() {
        let q = parse_query("page: gpu");
        assert_eq!(q.filters.page, None);
        assert_eq!(q.text, "page: gpu");
    }

    #[test]
    fn test_limit_option() {
        let q = parse_query("top:5 gpu");
        assert_eq!(q.options.limit, 5);
        assert_eq!(q.text, "gpu");

        let q = parse_query("limit:many gpu");
        assert_eq!(q.options.limit, QueryOptions::default().limit);
        assert_eq!(q.text, "limit:many gpu");
    }

    #[test]
    fn test_query_options_override_defaults() {
        let defaults = QueryOptions {
            limit: 3,
            snippet_width: 40,
        };

        let q = parse_query_with_options("gpu", defaults.clone());
        assert_eq!(q.options, defaults);

        let q = parse_query_with_options("top:7 gpu", defaults);
        assert_eq!(q.options.limit, 7);
        assert_eq!(q.options.snippet_width, 40);
    }

    #[test]
    fn test_url_like_word_is_literal() {
        let q = parse_query("https://docs.julialang.org");
        assert_eq!(q.text, "https://docs.julialang.org");
    }

    #[test]
    fn test_unicode_input() {
        let q = parse_query("über cat:page naïve");
        assert_eq!(q.text, "über naïve");
        assert_eq!(q.filters.category, Some(Category::Page));
    }

    #[test]
    fn test_unterminated_phrase() {
        let q = parse_query("\"open ended");
        assert_eq!(q.text, "open ended");
    }
}
