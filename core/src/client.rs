//! Resource clients for the DigitalHumani API.
//!
//! # Design
//! Every operation runs the same three steps: build a request (synchronous,
//! pure), send it through the `Transport` (the only suspension point), and
//! classify the response (synchronous, pure). `dispatch` implements the last
//! two once for all resources. Errors at any step come back as
//! `Outcome::Failure`; operations never return `Err` and never panic.
//!
//! Clients hold their transport in an `Arc` and no mutable state, so clones
//! can be used from many tasks at once.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::outcome::Outcome;
use crate::resource::{EnterpriseResource, RequestBuilder, Resource, TreeResource};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{EnterpriseRequest, MonthlyCount, Tree, TreeRequest};

/// Send `request` and classify the response as resource `R`.
pub(crate) async fn dispatch<R, P, X>(transport: &X, request: HttpRequest) -> Outcome<P>
where
    R: Resource,
    P: DeserializeOwned,
    X: Transport + ?Sized,
{
    dispatch_with(transport, request, R::classify::<P>).await
}

/// Send `request` and hand the response to `classify`.
pub(crate) async fn dispatch_with<P, X, F>(transport: &X, request: HttpRequest, classify: F) -> Outcome<P>
where
    X: Transport + ?Sized,
    F: FnOnce(&HttpResponse) -> Outcome<P>,
{
    let method = request.method;
    let url = request.url.clone();
    debug!(%method, %url, "sending request");

    match transport.send(request).await {
        Ok(response) => {
            debug!(%method, %url, status = response.status, "response received");
            classify(&response)
        }
        Err(err) => {
            warn!(%method, %url, error = %err, "transport failure");
            Outcome::Failure(ApiError::transport(err))
        }
    }
}

/// Client for tree-planting records (`/tree`).
pub struct TreeClient<X = ReqwestTransport> {
    builder: RequestBuilder<TreeResource>,
    transport: Arc<X>,
}

impl<X> Clone for TreeClient<X> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<X: Transport> TreeClient<X> {
    pub fn new(base_url: &str, api_key: &str, transport: Arc<X>) -> Self {
        Self {
            builder: RequestBuilder::new(base_url, api_key),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    /// Plant a single tree.
    pub async fn plant_one(&self, enterprise_id: &str, project_id: &str, user: &str) -> Outcome<Tree> {
        self.plant_many(enterprise_id, project_id, user, 1).await
    }

    /// Plant `count` trees in one record. The count is not validated here;
    /// the service rejects values it does not accept.
    pub async fn plant_many(
        &self,
        enterprise_id: &str,
        project_id: &str,
        user: &str,
        count: u32,
    ) -> Outcome<Tree> {
        self.plant(&TreeRequest::new(enterprise_id, project_id, user, count))
            .await
    }

    pub async fn plant(&self, request: &TreeRequest) -> Outcome<Tree> {
        let request = match self.builder.build_create(request) {
            Ok(request) => request,
            Err(err) => return Outcome::Failure(err),
        };
        dispatch::<TreeResource, _, _>(self.transport.as_ref(), request).await
    }

    pub async fn fetch_by_id(&self, id: &str) -> Outcome<Tree> {
        let request = self.builder.build_fetch(&[id]);
        dispatch::<TreeResource, _, _>(self.transport.as_ref(), request).await
    }

    /// Delete a record. Any 2xx answer counts as deleted, whatever its body.
    pub async fn delete_by_id(&self, id: &str) -> Outcome<bool> {
        let request = self.builder.build_delete(&[id]);
        dispatch_with(self.transport.as_ref(), request, TreeResource::classify_deleted).await
    }
}

/// Client for enterprise aggregates (`/enterprise`).
pub struct EnterpriseClient<X = ReqwestTransport> {
    builder: RequestBuilder<EnterpriseResource>,
    transport: Arc<X>,
}

impl<X> Clone for EnterpriseClient<X> {
    fn clone(&self) -> Self {
        Self {
            builder: self.builder.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<X: Transport> EnterpriseClient<X> {
    pub fn new(base_url: &str, api_key: &str, transport: Arc<X>) -> Self {
        Self {
            builder: RequestBuilder::new(base_url, api_key),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.builder.base_url()
    }

    /// Trees planted by `enterprise_id` in `month`. The month token is used
    /// verbatim as a path segment.
    pub async fn monthly_total(&self, enterprise_id: &str, month: &str) -> Outcome<MonthlyCount> {
        self.fetch_monthly(&EnterpriseRequest::new(enterprise_id, month))
            .await
    }

    pub async fn fetch_monthly(&self, request: &EnterpriseRequest) -> Outcome<MonthlyCount> {
        let request = self.builder.build_fetch(&request.path_segments());
        dispatch::<EnterpriseResource, _, _>(self.transport.as_ref(), request).await
    }
}
