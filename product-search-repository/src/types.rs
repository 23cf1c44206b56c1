//! Field selectors and query descriptors for product searches.

use std::fmt;

use product_search_shared::Page;

/// A searchable field of a `Product` document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductField {
    Id,
    Name,
    Quantity,
    Price,
}

impl ProductField {
    /// The field name in the stored document.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Quantity => "quantity",
            Self::Price => "price",
        }
    }

    /// The unanalyzed path used for exact-value matching.
    ///
    /// Text fields are matched against their `keyword` sub-field so a term
    /// query sees the value exactly as it was indexed.
    pub fn exact_path(&self) -> &'static str {
        match self {
            Self::Name => "name.keyword",
            other => other.path(),
        }
    }

    /// Whether the field is analyzed (tokenized and lowercased) at index time.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Name)
    }
}

impl fmt::Display for ProductField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A query over product documents.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductQuery {
    /// Every document in the index.
    MatchAll,
    /// Analyzed full-text match on one field.
    Match { field: ProductField, query: String },
    /// Edit-distance tolerant match on one field.
    Fuzzy { field: ProductField, value: String },
    /// Glob pattern (`*` and `?`) on one field.
    Wildcard { field: ProductField, pattern: String },
    /// Unanalyzed exact-value match on one field.
    Term { field: ProductField, value: String },
    /// Documents where the field is present and non-null.
    Exists { field: ProductField },
    /// Documents matching at least one of the clauses.
    Bool { should: Vec<ProductQuery> },
}

impl ProductQuery {
    pub fn match_query(field: ProductField, query: impl Into<String>) -> Self {
        Self::Match {
            field,
            query: query.into(),
        }
    }

    pub fn fuzzy(field: ProductField, value: impl Into<String>) -> Self {
        Self::Fuzzy {
            field,
            value: value.into(),
        }
    }

    pub fn wildcard(field: ProductField, pattern: impl Into<String>) -> Self {
        Self::Wildcard {
            field,
            pattern: pattern.into(),
        }
    }

    pub fn term(field: ProductField, value: impl Into<String>) -> Self {
        Self::Term {
            field,
            value: value.into(),
        }
    }

    pub fn exists(field: ProductField) -> Self {
        Self::Exists { field }
    }
}

/// The three independent clauses of a bool query.
///
/// A document is returned when it satisfies ANY of the clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolQuery {
    pub match_clause: (ProductField, String),
    pub fuzzy_clause: (ProductField, String),
    pub wildcard_clause: (ProductField, String),
}

impl BoolQuery {
    pub fn new(
        match_clause: (ProductField, impl Into<String>),
        fuzzy_clause: (ProductField, impl Into<String>),
        wildcard_clause: (ProductField, impl Into<String>),
    ) -> Self {
        Self {
            match_clause: (match_clause.0, match_clause.1.into()),
            fuzzy_clause: (fuzzy_clause.0, fuzzy_clause.1.into()),
            wildcard_clause: (wildcard_clause.0, wildcard_clause.1.into()),
        }
    }
}

impl From<&BoolQuery> for ProductQuery {
    fn from(query: &BoolQuery) -> Self {
        let (match_field, match_keyword) = &query.match_clause;
        let (fuzzy_field, fuzzy_keyword) = &query.fuzzy_clause;
        let (wildcard_field, wildcard_pattern) = &query.wildcard_clause;

        ProductQuery::Bool {
            should: vec![
                ProductQuery::match_query(*match_field, match_keyword.as_str()),
                ProductQuery::fuzzy(*fuzzy_field, fuzzy_keyword.as_str()),
                ProductQuery::wildcard(*wildcard_field, wildcard_pattern.as_str()),
            ],
        }
    }
}

/// A caller-built search: target index, query and page window.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub index: String,
    pub query: ProductQuery,
    pub page: Page,
}

impl SearchRequest {
    /// A `match_all` search over `index` with the default page.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            query: ProductQuery::MatchAll,
            page: Page::default(),
        }
    }

    pub fn query(mut self, query: ProductQuery) -> Self {
        self.query = query;
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page.clamped();
        self
    }

    pub fn from(mut self, from: usize) -> Self {
        self.page = Page::new(from, self.page.size);
        self
    }

    pub fn size(mut self, size: usize) -> Self {
        self.page = Page::new(self.page.from, size);
        self
    }
}
