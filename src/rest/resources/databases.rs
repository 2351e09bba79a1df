//! Database operations.

use serde::Serialize;

use crate::clients::{ClientError, RequestContext};
use crate::codec::NamedEntries;
use crate::models::{Database, DatabaseProperty, Filter, ObjectId, Page, Parent, RichText, Sort};
use crate::rest::pagination::{paginate, Pager, ResultLimit};
use crate::rest::path::{
    CREATE_DATABASE, GET_DATABASE, LIST_DATABASES, QUERY_DATABASE, UPDATE_DATABASE,
};
use crate::rest::resources::{missing, NotionClient};
use crate::rest::response::Listing;

/// A database query.
///
/// Only `filter` and `sorts` are sent as the request body; `start_cursor`
/// and `limit` steer pagination.
///
/// # Example
///
/// ```rust
/// use notion_api::models::{Sort, SortDirection};
/// use notion_api::rest::DatabaseQuery;
/// use notion_api::ResultLimit;
/// use serde_json::json;
///
/// let query = DatabaseQuery::new()
///     .sort(Sort::by_property("Due", SortDirection::Descending))
///     .limit(ResultLimit::AtMost(10));
///
/// assert_eq!(
///     serde_json::to_value(&query).unwrap(),
///     json!({"sorts": [{"property": "Due", "direction": "descending"}]})
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DatabaseQuery {
    /// Which rows to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Sort keys, most significant first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    /// Where to resume a previous query.
    #[serde(skip)]
    pub start_cursor: Option<String>,
    /// How many rows to collect.
    #[serde(skip)]
    pub limit: ResultLimit,
}

impl DatabaseQuery {
    /// An unfiltered, unsorted query for every row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter.
    #[must_use]
    pub fn filter(mut self, filter: impl Into<Filter>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Adds a sort key after any existing ones.
    #[must_use]
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    /// Resumes from a cursor returned by an earlier query.
    #[must_use]
    pub fn start_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = Some(cursor.into());
        self
    }

    /// Sets how many rows to collect.
    #[must_use]
    pub const fn limit(mut self, limit: ResultLimit) -> Self {
        self.limit = limit;
        self
    }
}

#[derive(Serialize)]
struct CreateDatabase<'a> {
    parent: &'a Parent,
    properties: &'a NamedEntries<DatabaseProperty>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    title: &'a [RichText],
}

#[derive(Serialize)]
struct UpdateDatabase<'a> {
    title: &'a [RichText],
    properties: &'a NamedEntries<DatabaseProperty>,
}

impl NotionClient {
    /// Retrieves a database and its schema.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the database does
    /// not decode.
    pub async fn get_database(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
    ) -> Result<Database, ClientError> {
        let request = GET_DATABASE.request_for(id).build()?;
        self.http.send_json(ctx, request).await
    }

    /// Retrieves a database and up to `limit` of its child blocks into
    /// [`Database::children`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either request fails. No database is
    /// returned when the children cannot be listed.
    pub async fn get_database_and_children(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
        limit: ResultLimit,
    ) -> Result<Database, ClientError> {
        let mut database = self.get_database(ctx, id).await?;
        database.children = self
            .get_block_children(ctx, id, None, limit)
            .await?
            .into_inner();
        Ok(database)
    }

    /// Queries the rows of a database.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from any page.
    pub async fn query_database(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
        query: &DatabaseQuery,
    ) -> Result<Listing<Vec<Page>>, ClientError> {
        let pager = Pager::post(QUERY_DATABASE, Some(&id.to_string()), query)?;
        paginate(
            &self.http,
            ctx,
            &pager,
            query.start_cursor.clone(),
            query.limit,
            Vec::new(),
        )
        .await
    }

    /// Creates a database and returns it as stored.
    ///
    /// Sends the parent, the property schema and, when not empty, the title.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] without sending anything if
    /// `database.parent` is unset, and [`ClientError`] if the request fails.
    pub async fn create_database(
        &self,
        ctx: &RequestContext,
        database: &Database,
    ) -> Result<Database, ClientError> {
        let parent = database
            .parent
            .as_ref()
            .ok_or_else(|| missing("database", "parent"))?;
        let body = CreateDatabase {
            parent,
            properties: &database.properties,
            title: &database.title,
        };
        let request = CREATE_DATABASE
            .request()
            .body(serde_json::to_value(body)?)
            .build()?;
        self.http.send_json(ctx, request).await
    }

    /// Updates the title and property schema of a database and returns it
    /// as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] without sending anything if
    /// `database.id` is unset, and [`ClientError`] if the request fails.
    pub async fn update_database(
        &self,
        ctx: &RequestContext,
        database: &Database,
    ) -> Result<Database, ClientError> {
        let id = database.id.ok_or_else(|| missing("database", "id"))?;
        let body = UpdateDatabase {
            title: &database.title,
            properties: &database.properties,
        };
        let request = UPDATE_DATABASE
            .request_for(id)
            .body(serde_json::to_value(body)?)
            .build()?;
        self.http.send_json(ctx, request).await
    }

    /// Lists the databases shared with the integration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from any page.
    pub async fn list_databases(
        &self,
        ctx: &RequestContext,
        start_cursor: Option<String>,
        limit: ResultLimit,
    ) -> Result<Listing<Vec<Database>>, ClientError> {
        let pager = Pager::get(LIST_DATABASES, None);
        paginate(&self.http, ctx, &pager, start_cursor, limit, Vec::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CheckboxFilter, Empty, PropertyCondition, PropertyConfig, SortDirection};
    use serde_json::json;

    #[test]
    fn test_query_body_omits_pagination_fields() {
        let query = DatabaseQuery::new()
            .filter(Filter::property(
                "Done",
                PropertyCondition::Checkbox(CheckboxFilter::Equals(true)),
            ))
            .start_cursor("abc")
            .limit(ResultLimit::AtMost(3));

        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"filter": {"property": "Done", "checkbox": {"equals": true}}})
        );
    }

    #[test]
    fn test_empty_query_serializes_to_empty_object() {
        assert_eq!(
            serde_json::to_value(DatabaseQuery::new()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_query_sorts_keep_order() {
        let query = DatabaseQuery::new()
            .sort(Sort::by_property("A", SortDirection::Ascending))
            .sort(Sort::by_property("B", SortDirection::Descending));
        assert_eq!(query.sorts.len(), 2);
        assert_eq!(query.sorts[0].property.as_deref(), Some("A"));
    }

    #[test]
    fn test_create_body_skips_empty_title() {
        let database = Database {
            parent: Some(Parent::workspace()),
            properties: NamedEntries::from(vec![DatabaseProperty::new(
                "Name",
                PropertyConfig::Title(Empty::default()),
            )]),
            ..Database::default()
        };
        let body = CreateDatabase {
            parent: database.parent.as_ref().unwrap(),
            properties: &database.properties,
            title: &database.title,
        };
        let value = serde_json::to_value(body).unwrap();
        assert!(value.get("title").is_none());
        assert_eq!(value["parent"]["type"], "workspace");
        assert_eq!(value["properties"]["Name"]["type"], "title");
    }
}
