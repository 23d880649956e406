//! Error types for the reqres client.
//!
//! # Design
//! A status mismatch is the error every scenario cares about, so it carries
//! both codes and the raw body. Everything else (bad JSON, a rejected merge,
//! a dead connection) gets its own variant so tests can match on the cause.

use thiserror::Error;

/// Errors returned by client, transport and entity operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a status other than the one the caller expected.
    #[error("unexpected status code: {actual} (expected {expected}): {body}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// A response or partial update named a field `Employee` does not have.
    #[error("unrecognized employee field `{0}`")]
    UnknownField(String),

    /// A known field arrived with a JSON value of the wrong type.
    #[error("field `{field}` cannot hold {value}")]
    InvalidField { field: String, value: String },

    /// The employee has not been created yet, so there is no URL to address.
    #[error("cannot {0} an employee without an id")]
    MissingId(&'static str),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    TransportError(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Log directory or file could not be prepared.
    #[error("log setup failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("{var} is not a valid URL ({value}): {reason}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        reason: String,
    },
}
