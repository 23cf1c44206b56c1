//! OpenSearch query builders.
//!
//! This module renders `ProductQuery` and `SearchRequest` values into the
//! OpenSearch query DSL.

use serde_json::{json, Value};

use crate::types::{ProductQuery, SearchRequest};

/// Build the full `_search` body for a request.
///
/// Pagination is always explicit so the engine's implicit page size never
/// silently truncates results.
pub fn build_search_body(request: &SearchRequest, fuzziness: &str) -> Value {
    json!({
        "query": build_query(&request.query, fuzziness),
        "from": request.page.from,
        "size": request.page.size
    })
}

/// Render a single query clause.
pub fn build_query(query: &ProductQuery, fuzziness: &str) -> Value {
    match query {
        ProductQuery::MatchAll => json!({ "match_all": {} }),
        ProductQuery::Match { field, query } => json!({
            "match": {
                field.path(): { "query": query }
            }
        }),
        ProductQuery::Fuzzy { field, value } => {
            // Fuzzy is term-level: the value skips analysis, so fold it the
            // way the text field was folded at index time.
            let value = if field.is_text() {
                value.to_lowercase()
            } else {
                value.clone()
            };
            json!({
                "fuzzy": {
                    field.path(): {
                        "value": value,
                        "fuzziness": fuzziness
                    }
                }
            })
        }
        ProductQuery::Wildcard { field, pattern } => json!({
            "wildcard": {
                field.path(): {
                    "value": pattern,
                    "case_insensitive": true
                }
            }
        }),
        ProductQuery::Term { field, value } => json!({
            "term": {
                field.exact_path(): { "value": value }
            }
        }),
        ProductQuery::Exists { field } => json!({
            "exists": { "field": field.path() }
        }),
        ProductQuery::Bool { should } => {
            let clauses: Vec<Value> = should.iter().map(|q| build_query(q, fuzziness)).collect();
            json!({
                "bool": {
                    "should": clauses,
                    "minimum_should_match": 1
                }
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoolQuery, ProductField};
    use product_search_shared::Page;

    const FUZZINESS: &str = "AUTO:3,4";

    #[test]
    fn test_build_match_all() {
        let query = build_query(&ProductQuery::MatchAll, FUZZINESS);
        assert!(query["match_all"].is_object());
    }

    #[test]
    fn test_build_match_query() {
        let query = build_query(
            &ProductQuery::match_query(ProductField::Name, "Mouse"),
            FUZZINESS,
        );
        assert_eq!(query["match"]["name"]["query"], "Mouse");
    }

    #[test]
    fn test_build_fuzzy_query_lowercases_text_value() {
        let query = build_query(&ProductQuery::fuzzy(ProductField::Name, "Mors"), FUZZINESS);

        assert_eq!(query["fuzzy"]["name"]["value"], "mors");
        assert_eq!(query["fuzzy"]["name"]["fuzziness"], FUZZINESS);
    }

    #[test]
    fn test_build_fuzzy_query_keeps_non_text_value() {
        let query = build_query(&ProductQuery::fuzzy(ProductField::Id, "AbC"), FUZZINESS);
        assert_eq!(query["fuzzy"]["id"]["value"], "AbC");
    }

    #[test]
    fn test_build_wildcard_query() {
        let query = build_query(
            &ProductQuery::wildcard(ProductField::Name, "*ous*"),
            FUZZINESS,
        );

        assert_eq!(query["wildcard"]["name"]["value"], "*ous*");
        assert_eq!(query["wildcard"]["name"]["case_insensitive"], true);
    }

    #[test]
    fn test_build_term_query_uses_keyword_subfield() {
        let query = build_query(&ProductQuery::term(ProductField::Name, "Mouse"), FUZZINESS);

        assert_eq!(query["term"]["name.keyword"]["value"], "Mouse");
        assert!(query["term"].get("name").is_none());
    }

    #[test]
    fn test_build_exists_query() {
        let query = build_query(&ProductQuery::exists(ProductField::Name), FUZZINESS);
        assert_eq!(query["exists"]["field"], "name");
    }

    #[test]
    fn test_build_bool_query() {
        let bool_query = BoolQuery::new(
            (ProductField::Name, "Mouse"),
            (ProductField::Name, "erasr"),
            (ProductField::Name, "*se*"),
        );
        let query = build_query(&ProductQuery::from(&bool_query), FUZZINESS);

        let should = query["bool"]["should"].as_array().unwrap();
        assert_eq!(should.len(), 3);
        assert_eq!(query["bool"]["minimum_should_match"], 1);
        assert!(query["bool"].get("must").is_none());

        assert_eq!(should[0]["match"]["name"]["query"], "Mouse");
        assert_eq!(should[1]["fuzzy"]["name"]["value"], "erasr");
        assert_eq!(should[2]["wildcard"]["name"]["value"], "*se*");
    }

    #[test]
    fn test_build_search_body_pagination() {
        let request = SearchRequest::new("products")
            .query(ProductQuery::exists(ProductField::Name))
            .page(Page::new(20, 5));
        let body = build_search_body(&request, FUZZINESS);

        assert_eq!(body["from"], 20);
        assert_eq!(body["size"], 5);
        assert_eq!(body["query"]["exists"]["field"], "name");
    }
}
