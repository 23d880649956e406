//! Client and test-support core for the reqres user/employee/resource API.
//!
//! # Overview
//! Entity models (`Employee`, `User`, `Resource`) own the HTTP calls that
//! create, read, update and delete them. Each call goes through a `Session`:
//! the stateless `ReqresClient` builds an `HttpRequest`, the `HttpTransport`
//! executes it with `ureq`, and `ApiLogger` records both directions before
//! the client checks the status against the caller's expectation.
//!
//! # Design
//! - `ReqresClient` is stateless; it holds only `base_url`. Each operation is
//!   split into `build_*` (produces a request) and `parse_*` (consumes a
//!   response), so the I/O boundary is explicit and testable with vectors.
//! - All failures, status mismatches included, are `ApiError` values.
//! - Logging is scoped to a `Session` and flushed by `Session::finish`.
//! - DTOs are defined independently from the mock-server crate; the scenario
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod entities;
pub mod error;
pub mod http;
pub mod logging;
pub mod session;
pub mod transport;
pub mod types;

pub use client::ReqresClient;
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use logging::{ApiLogger, LoggingContext};
pub use session::Session;
pub use transport::HttpTransport;
pub use types::{Employee, EmployeeField, EmployeeObject, Resource, User, UserPage};
