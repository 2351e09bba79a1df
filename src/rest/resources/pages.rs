//! Page operations.

use serde::Serialize;

use crate::clients::{ClientError, RequestContext};
use crate::codec::NamedEntries;
use crate::models::{Block, ObjectId, Page, PageProperty, Parent};
use crate::rest::pagination::ResultLimit;
use crate::rest::path::{CREATE_PAGE, GET_PAGE, UPDATE_PAGE};
use crate::rest::resources::{missing, NotionClient};

#[derive(Serialize)]
struct CreatePage<'a> {
    parent: &'a Parent,
    properties: &'a NamedEntries<PageProperty>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    children: &'a [Block],
}

#[derive(Serialize)]
struct UpdateProperties<'a> {
    properties: &'a NamedEntries<PageProperty>,
}

impl NotionClient {
    /// Retrieves a page and its property values.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the page does not
    /// decode.
    pub async fn get_page(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
    ) -> Result<Page, ClientError> {
        let request = GET_PAGE.request_for(id).build()?;
        self.http.send_json(ctx, request).await
    }

    /// Retrieves a page and up to `limit` of its blocks into
    /// [`Page::children`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either request fails.
    pub async fn get_page_and_children(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
        limit: ResultLimit,
    ) -> Result<Page, ClientError> {
        let mut page = self.get_page(ctx, id).await?;
        page.children = self
            .get_block_children(ctx, id, None, limit)
            .await?
            .into_inner();
        Ok(page)
    }

    /// Creates a page and returns it as stored.
    ///
    /// Sends the parent, the property values and, when present, the
    /// initial content blocks.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] without sending anything if
    /// `page.parent` is unset, and [`ClientError`] if the request fails.
    pub async fn create_page(
        &self,
        ctx: &RequestContext,
        page: &Page,
    ) -> Result<Page, ClientError> {
        let parent = page
            .parent
            .as_ref()
            .ok_or_else(|| missing("page", "parent"))?;
        let body = CreatePage {
            parent,
            properties: &page.properties,
            children: &page.children,
        };
        let request = CREATE_PAGE
            .request()
            .body(serde_json::to_value(body)?)
            .build()?;
        self.http.send_json(ctx, request).await
    }

    /// Sends the property values of `page` and returns the page as stored.
    ///
    /// Properties left out of `page.properties` are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] without sending anything if
    /// `page.id` is unset, and [`ClientError`] if the request fails.
    pub async fn update_page_properties(
        &self,
        ctx: &RequestContext,
        page: &Page,
    ) -> Result<Page, ClientError> {
        let id = page.id.ok_or_else(|| missing("page", "id"))?;
        let body = UpdateProperties {
            properties: &page.properties,
        };
        let request = UPDATE_PAGE
            .request_for(id)
            .body(serde_json::to_value(body)?)
            .build()?;
        self.http.send_json(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PropertyValue, RichText};

    #[test]
    fn test_create_body_includes_children_only_when_present() {
        let mut page = Page::new(Parent::workspace());
        page.set_property("Name", PropertyValue::Title(vec![RichText::plain("Plan")]));

        let body = CreatePage {
            parent: page.parent.as_ref().unwrap(),
            properties: &page.properties,
            children: &page.children,
        };
        let value = serde_json::to_value(body).unwrap();
        assert!(value.get("children").is_none());
        assert_eq!(value["properties"]["Name"]["type"], "title");

        page.children.push(Block::paragraph(vec![RichText::plain("hello")]));
        let body = CreatePage {
            parent: page.parent.as_ref().unwrap(),
            properties: &page.properties,
            children: &page.children,
        };
        let value = serde_json::to_value(body).unwrap();
        assert_eq!(value["children"][0]["type"], "paragraph");
    }

    #[test]
    fn test_update_body_only_carries_properties() {
        let mut page = Page::new(Parent::workspace());
        page.set_property("Done", PropertyValue::Checkbox(true));

        let value = serde_json::to_value(UpdateProperties {
            properties: &page.properties,
        })
        .unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["properties"]["Done"]["checkbox"], true);
    }
}
