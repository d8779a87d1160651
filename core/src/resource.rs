//! Resource kinds and the request builder.
//!
//! # Design
//! Each remote resource family is a zero-sized type implementing `Resource`.
//! The trait carries only what differs between families (the path prefix and
//! the noun used in not-found messages). `RequestBuilder<R>` turns that into
//! fully specified `HttpRequest`s, so one builder and one classifier serve
//! every resource.

use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::classify;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::outcome::Outcome;

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const USER_AGENT: &str = concat!("digitalhumani-rust/", env!("CARGO_PKG_VERSION"));

/// A family of remote operations rooted at one path.
pub trait Resource: Send + Sync + 'static {
    /// Path under the base URL, with a leading slash.
    const PATH: &'static str;
    /// Noun used in "could not find ..." messages.
    const NOUN: &'static str;

    fn classify<P: DeserializeOwned>(response: &HttpResponse) -> Outcome<P> {
        classify::classify(Self::NOUN, response)
    }

    fn classify_deleted(response: &HttpResponse) -> Outcome<bool> {
        classify::classify_deleted(Self::NOUN, response)
    }
}

/// Tree-planting records: `/tree`.
#[derive(Debug, Clone, Copy)]
pub struct TreeResource;

impl Resource for TreeResource {
    const PATH: &'static str = "/tree";
    const NOUN: &'static str = "tree";
}

/// Enterprise aggregates: `/enterprise`.
#[derive(Debug, Clone, Copy)]
pub struct EnterpriseResource;

impl Resource for EnterpriseResource {
    const PATH: &'static str = "/enterprise";
    const NOUN: &'static str = "enterprise";
}

/// Builds requests for resource `R` against one base URL and API key.
///
/// Holds no mutable state; building is pure.
pub struct RequestBuilder<R> {
    base_url: String,
    api_key: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for RequestBuilder<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            api_key: self.api_key.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for RequestBuilder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestBuilder")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> RequestBuilder<R> {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            _resource: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base}{PATH}` with `payload` as the JSON body.
    pub fn build_create<B: Serialize>(&self, payload: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(payload).map_err(ApiError::encoding)?;
        Ok(self.request(HttpMethod::Post, self.url(&[]), Some(body)))
    }

    /// `GET {base}{PATH}/{segments...}`.
    pub fn build_fetch(&self, segments: &[&str]) -> HttpRequest {
        self.request(HttpMethod::Get, self.url(segments), None)
    }

    /// `DELETE {base}{PATH}/{segments...}`.
    pub fn build_delete(&self, segments: &[&str]) -> HttpRequest {
        self.request(HttpMethod::Delete, self.url(segments), None)
    }

    fn url(&self, segments: &[&str]) -> String {
        let mut url = format!("{}{}", self.base_url, R::PATH);
        if !segments.is_empty() {
            url.push('/');
            url.push_str(&segments.join("/"));
        }
        url
    }

    fn request(&self, method: HttpMethod, url: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
                (API_KEY_HEADER.to_string(), self.api_key.clone()),
            ],
            body,
        }
    }
}
