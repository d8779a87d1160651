//! Async client for the DigitalHumani reforestation API.
//!
//! # Overview
//! Plant trees, fetch and delete planting records, and read monthly totals
//! without dealing with HTTP, API-key headers or JSON. Every operation
//! returns an `Outcome`: either the decoded payload or an `ApiError`
//! describing what went wrong. Async operations never return `Err` and never
//! panic; only construction can fail.
//!
//! # Design
//! - `RequestBuilder` produces `HttpRequest` values and `classify` turns
//!   `HttpResponse` values into `Outcome`s. Both are pure.
//! - The `Transport` trait is the only place I/O happens; `ReqwestTransport`
//!   is the default.
//! - `TreeClient` and `EnterpriseClient` share one dispatch pipeline,
//!   parameterized by a `Resource` type.
//! - `DigitalHumani` holds the validated `Config` and fills in the enterprise
//!   id on every call.
//!
//! ```no_run
//! # async fn run() -> Result<(), digitalhumani_core::ApiError> {
//! let client = digitalhumani_core::DigitalHumani::new("api-key", "4c6e672d", "sandbox")?;
//! let outcome = client.plant_one("81818182", "alice@example.com").await;
//! if let Some(err) = outcome.error() {
//!     eprintln!("planting failed: {err}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
pub mod facade;
pub mod http;
pub mod outcome;
pub mod resource;
pub mod transport;
pub mod types;

pub use classify::{classify, classify_deleted};
pub use client::{EnterpriseClient, TreeClient};
pub use config::{Config, Environment};
pub use error::{ApiError, BoxError, ErrorKind};
pub use facade::DigitalHumani;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use outcome::Outcome;
pub use resource::{EnterpriseResource, RequestBuilder, Resource, TreeResource};
pub use transport::{ReqwestTransport, Transport};
pub use types::{EnterpriseRequest, MonthlyCount, Tree, TreeRequest};
