//! Block operations.

use serde::Serialize;

use crate::clients::{ClientError, RequestContext};
use crate::models::{Block, ObjectId};
use crate::rest::pagination::{paginate, Pager, ResultLimit};
use crate::rest::path::{
    APPEND_BLOCK_CHILDREN, BLOCK_CHILDREN, DELETE_BLOCK, GET_BLOCK, UPDATE_BLOCK,
};
use crate::rest::resources::{missing, NotionClient};
use crate::rest::response::Listing;

#[derive(Serialize)]
struct AppendChildren<'a> {
    children: &'a [Block],
}

impl NotionClient {
    /// Retrieves a block.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the block does not
    /// decode.
    pub async fn get_block(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
    ) -> Result<Block, ClientError> {
        let request = GET_BLOCK.request_for(id).build()?;
        self.http.send_json(ctx, request).await
    }

    /// Archives a block. The archived block is not returned.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails.
    pub async fn delete_block(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
    ) -> Result<(), ClientError> {
        let request = DELETE_BLOCK.request_for(id).build()?;
        self.http.send_discard(ctx, request).await
    }

    /// Sends `block` as an update and returns the block as stored.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingField`] without sending anything if
    /// `block.id` is unset, and [`ClientError`] if the request fails.
    pub async fn update_block(
        &self,
        ctx: &RequestContext,
        block: &Block,
    ) -> Result<Block, ClientError> {
        let id = block.id.ok_or_else(|| missing("block", "id"))?;
        let request = UPDATE_BLOCK
            .request_for(id)
            .body(serde_json::to_value(block)?)
            .build()?;
        self.http.send_json(ctx, request).await
    }

    /// Lists the children of a block or page.
    ///
    /// Starts at `start_cursor` (the beginning when `None`) and stops once
    /// `limit` results have been collected or the server has no more.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from any page.
    pub async fn get_block_children(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
        start_cursor: Option<String>,
        limit: ResultLimit,
    ) -> Result<Listing<Vec<Block>>, ClientError> {
        let pager = Pager::get(BLOCK_CHILDREN, Some(&id.to_string()));
        paginate(&self.http, ctx, &pager, start_cursor, limit, Vec::new()).await
    }

    /// Appends `children` to a block, then lists all of the block's
    /// children.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if either the append or the listing fails.
    pub async fn append_block_children(
        &self,
        ctx: &RequestContext,
        id: ObjectId,
        children: &[Block],
    ) -> Result<Listing<Vec<Block>>, ClientError> {
        let request = APPEND_BLOCK_CHILDREN
            .request_for(id)
            .body(serde_json::to_value(AppendChildren { children })?)
            .build()?;
        self.http.send_discard(ctx, request).await?;

        self.get_block_children(ctx, id, None, ResultLimit::Unbounded).await
    }
}
