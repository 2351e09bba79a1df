//! User operations.

use crate::clients::{ClientError, RequestContext};
use crate::models::{ObjectId, User};
use crate::rest::pagination::{paginate, Pager, ResultLimit};
use crate::rest::path::{GET_USER, LIST_USERS};
use crate::rest::resources::NotionClient;
use crate::rest::response::Listing;

impl NotionClient {
    /// Retrieves a user.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails or the user does not
    /// decode.
    pub async fn get_user(&self, ctx: &RequestContext, id: ObjectId) -> Result<User, ClientError> {
        let request = GET_USER.request_for(id).build()?;
        self.http.send_json(ctx, request).await
    }

    /// Lists the users of the workspace, including bots.
    ///
    /// # Errors
    ///
    /// Returns the first [`ClientError`] from any page.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        start_cursor: Option<String>,
        limit: ResultLimit,
    ) -> Result<Listing<Vec<User>>, ClientError> {
        let pager = Pager::get(LIST_USERS, None);
        paginate(&self.http, ctx, &pager, start_cursor, limit, Vec::new()).await
    }
}
