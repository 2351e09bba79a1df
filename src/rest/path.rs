//! Endpoint table and path building.
//!
//! Every endpoint the client calls is an [`Endpoint`] constant pairing an
//! HTTP method with a path template. Placeholders such as `{id}` are
//! filled in by [`build_path`], which percent-encodes each value.
//!
//! # Example
//!
//! ```rust
//! use notion_api::rest::{build_path, BLOCK_CHILDREN};
//! use notion_api::clients::HttpMethod;
//!
//! assert_eq!(BLOCK_CHILDREN.method, HttpMethod::Get);
//! assert_eq!(build_path("v1/blocks/{id}", &[("id", "a b")]), "v1/blocks/a%20b");
//! ```

use std::fmt::Display;

use crate::clients::{HttpMethod, HttpRequest, HttpRequestBuilder};

/// An API endpoint: a method and a path template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The path relative to the API root, with `{name}` placeholders.
    pub template: &'static str,
}

impl Endpoint {
    /// Creates an endpoint.
    #[must_use]
    pub const fn new(method: HttpMethod, template: &'static str) -> Self {
        Self { method, template }
    }

    /// Starts a request to an endpoint without placeholders.
    #[must_use]
    pub fn request(&self) -> HttpRequestBuilder {
        HttpRequest::builder(self.method, self.template)
    }

    /// Starts a request with `{id}` filled in.
    #[must_use]
    pub fn request_for(&self, id: impl Display) -> HttpRequestBuilder {
        HttpRequest::builder(self.method, build_path(self.template, &[("id", id)]))
    }
}

/// `GET v1/blocks/{id}`
pub const GET_BLOCK: Endpoint = Endpoint::new(HttpMethod::Get, "v1/blocks/{id}");
/// `PATCH v1/blocks/{id}`
pub const UPDATE_BLOCK: Endpoint = Endpoint::new(HttpMethod::Patch, "v1/blocks/{id}");
/// `DELETE v1/blocks/{id}`
pub const DELETE_BLOCK: Endpoint = Endpoint::new(HttpMethod::Delete, "v1/blocks/{id}");
/// `GET v1/blocks/{id}/children`
pub const BLOCK_CHILDREN: Endpoint = Endpoint::new(HttpMethod::Get, "v1/blocks/{id}/children");
/// `PATCH v1/blocks/{id}/children`
pub const APPEND_BLOCK_CHILDREN: Endpoint =
    Endpoint::new(HttpMethod::Patch, "v1/blocks/{id}/children");

/// `GET v1/databases/{id}`
pub const GET_DATABASE: Endpoint = Endpoint::new(HttpMethod::Get, "v1/databases/{id}");
/// `POST v1/databases/{id}/query`
pub const QUERY_DATABASE: Endpoint = Endpoint::new(HttpMethod::Post, "v1/databases/{id}/query");
/// `POST v1/databases`
pub const CREATE_DATABASE: Endpoint = Endpoint::new(HttpMethod::Post, "v1/databases");
/// `PATCH v1/databases/{id}`
pub const UPDATE_DATABASE: Endpoint = Endpoint::new(HttpMethod::Patch, "v1/databases/{id}");
/// `GET v1/databases`
pub const LIST_DATABASES: Endpoint = Endpoint::new(HttpMethod::Get, "v1/databases");

/// `GET v1/pages/{id}`
pub const GET_PAGE: Endpoint = Endpoint::new(HttpMethod::Get, "v1/pages/{id}");
/// `POST v1/pages`
pub const CREATE_PAGE: Endpoint = Endpoint::new(HttpMethod::Post, "v1/pages");
/// `PATCH v1/pages/{id}`
pub const UPDATE_PAGE: Endpoint = Endpoint::new(HttpMethod::Patch, "v1/pages/{id}");

/// `GET v1/users/{id}`
pub const GET_USER: Endpoint = Endpoint::new(HttpMethod::Get, "v1/users/{id}");
/// `GET v1/users`
pub const LIST_USERS: Endpoint = Endpoint::new(HttpMethod::Get, "v1/users");

/// `POST v1/search`
pub const SEARCH: Endpoint = Endpoint::new(HttpMethod::Post, "v1/search");

/// Fills `{name}` placeholders in `template`, percent-encoding each value.
#[must_use]
pub fn build_path<V: Display>(template: &str, params: &[(&str, V)]) -> String {
    let mut result = template.to_string();

    for (key, value) in params {
        let placeholder = format!("{{{key}}}");
        let value = value.to_string();
        result = result.replace(&placeholder, &urlencoding::encode(&value));
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Endpoint>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_template_interpolation_single_id() {
        assert_eq!(build_path("v1/pages/{id}", &[("id", "123")]), "v1/pages/123");
    }

    #[test]
    fn test_path_values_are_percent_encoded() {
        assert_eq!(
            build_path("v1/pages/{id}", &[("id", "a/b?c")]),
            "v1/pages/a%2Fb%3Fc"
        );
    }

    #[test]
    fn test_unknown_placeholders_are_left_alone() {
        assert_eq!(build_path("v1/users", &[("id", "x")]), "v1/users");
    }

    #[test]
    fn test_request_for_fills_id() {
        let request = QUERY_DATABASE
            .request_for("abc")
            .body(serde_json::json!({}))
            .build()
            .unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "v1/databases/abc/query");
    }

    #[test]
    fn test_endpoint_methods() {
        assert_eq!(APPEND_BLOCK_CHILDREN.method, HttpMethod::Patch);
        assert_eq!(DELETE_BLOCK.method, HttpMethod::Delete);
        assert_eq!(SEARCH.template, "v1/search");
        assert_eq!(LIST_DATABASES.request().build().unwrap().url, "v1/databases");
    }
}
