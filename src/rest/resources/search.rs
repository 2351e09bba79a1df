//! Search across pages and databases.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::{ClientError, RequestContext};
use crate::codec::Accumulate;
use crate::models::{Database, ObjectKind, Page, SearchFilter, Sort};
use crate::rest::pagination::{paginate, Pager, ResultLimit};
use crate::rest::path::SEARCH;
use crate::rest::resources::NotionClient;
use crate::rest::response::Listing;

/// A search request.
///
/// # Example
///
/// ```rust
/// use notion_api::models::{ObjectKind, SearchFilter};
/// use notion_api::rest::SearchQuery;
/// use serde_json::json;
///
/// let query = SearchQuery::new("roadmap").filter(SearchFilter::object(ObjectKind::Page));
/// assert_eq!(
///     serde_json::to_value(&query).unwrap(),
///     json!({"query": "roadmap", "filter": {"value": "page", "property": "object"}})
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SearchQuery {
    /// Text matched against titles. Empty matches everything.
    pub query: String,
    /// Restricts results to pages or databases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<SearchFilter>,
    /// Orders results by a timestamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
    /// Where to resume a previous search.
    #[serde(skip)]
    pub start_cursor: Option<String>,
    /// How many results to collect.
    #[serde(skip)]
    pub limit: ResultLimit,
}

impl SearchQuery {
    /// Searches for `query`.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Sets the object filter.
    #[must_use]
    pub fn filter(mut self, filter: SearchFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the sort.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Resumes from a cursor returned by an earlier search.
    #[must_use]
    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    /// Sets how many results to collect.
    #[must_use]
    pub const fn limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }
}

/// One search result, dispatched on its `object` field.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchHit {
    /// A page.
    Page(Box<Page>),
    /// A database.
    Database(Box<Database>),
    /// An object kind this client does not model. Dropped when merged.
    Other(String),
}

impl<'de> Deserialize<'de> for SearchHit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let object = value
            .get("object")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        match object.parse::<ObjectKind>() {
            Ok(ObjectKind::Page) => Page::deserialize(value)
                .map(|page| Self::Page(Box::new(page)))
                .map_err(de::Error::custom),
            Ok(ObjectKind::Database) => Database::deserialize(value)
                .map(|database| Self::Database(Box::new(database)))
                .map_err(de::Error::custom),
            Err(_) => Ok(Self::Other(object)),
        }
    }
}

/// Search results split by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchResults {
    /// Matching pages, in result order.
    pub pages: Vec<Page>,
    /// Matching databases, in result order.
    pub databases: Vec<Database>,
}

impl Accumulate for SearchResults {
    type Item = SearchHit;

    fn append(&mut self, items: Vec<SearchHit>) {
        for item in items {
            match item {
                SearchHit::Page(page) => self.pages.push(*page),
                SearchHit::Database(database) => self.databases.push(*database),
                SearchHit::Other(object) => {
                    tracing::warn!(object = %object, "skipping search result of unknown kind");
                }
            }
        }
    }

    fn count(&self) -> usize {
        self.pages.len() + self.databases.len()
    }
}

impl NotionClient {
    /// Searches the pages and databases shared with the integration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from any page of results.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &SearchQuery,
    ) -> Result<Listing<SearchResults>, ClientError> {
        let pager = Pager::post(SEARCH, None, query)?;
        paginate(
            &self.http,
            ctx,
            &pager,
            query.start_cursor.clone(),
            query.limit,
            SearchResults::default(),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::merge_page;
    use crate::models::{SortDirection, SortTimestamp};
    use serde_json::json;

    fn page(id: &str) -> Value {
        json!({
            "object": "page",
            "id": id,
            "parent": {"type": "workspace", "workspace": true},
            "properties": {}
        })
    }

    fn database(id: &str) -> Value {
        json!({
            "object": "database",
            "id": id,
            "title": [],
            "properties": {}
        })
    }

    #[test]
    fn test_results_are_split_by_kind() {
        let mut results = SearchResults::default();
        let merged = merge_page(
            json!([
                page("b55c9c91-384d-452b-81db-d1ef79372b75"),
                database("668d797c-76fa-4934-9b05-ad288df2d136"),
                page("a1d8501e-1ac1-43e9-a6bd-ea9fe6c8822b"),
            ]),
            &mut results,
        )
        .unwrap();

        assert_eq!(merged, 3);
        assert_eq!(results.pages.len(), 2);
        assert_eq!(results.databases.len(), 1);
    }

    #[test]
    fn test_unknown_kinds_are_skipped() {
        let mut results = SearchResults::default();
        let merged = merge_page(
            json!([
                {"object": "workspace", "id": "x"},
                page("b55c9c91-384d-452b-81db-d1ef79372b75"),
                {"id": "no-object-field"},
            ]),
            &mut results,
        )
        .unwrap();

        assert_eq!(merged, 1);
        assert_eq!(results.count(), 1);
    }

    #[test]
    fn test_malformed_page_fails_the_merge() {
        let mut results = SearchResults::default();
        let result = merge_page(json!([{"object": "page", "id": 7}]), &mut results);
        assert!(result.is_err());
        assert_eq!(results.count(), 0);
    }

    #[test]
    fn test_query_serializes_sort() {
        let query = SearchQuery::new("")
            .sort(Sort::by_timestamp(
                SortTimestamp::LastEditedTime,
                SortDirection::Descending,
            ))
            .limit(ResultLimit::AtMost(5));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "query": "",
                "sort": {"timestamp": "last_edited_time", "direction": "descending"}
            })
        );
    }
}
