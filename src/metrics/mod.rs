//! Metrics backend access
//!
//! A query either yields one finite scalar or a [`QueryError`] saying why it
//! could not. Callers decide what a failure means; the health collector maps
//! every failure to zero.

mod client;

pub use client::PrometheusClient;

use thiserror::Error;

/// Reasons a single metric query produced no usable value
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("backend reported {status}: {error_type}: {message}")]
    Backend {
        status: String,
        error_type: String,
        message: String,
    },

    #[error("query returned no series")]
    EmptyResult,

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("query summed to a non-finite value ({0})")]
    NonFinite(f64),
}

pub type QueryResult = Result<f64, QueryError>;

/// Anything that can evaluate a query expression to a scalar
pub trait MetricsQuery {
    /// Evaluate `expression`, summing every returned series into one value
    fn query(&self, expression: &str) -> QueryResult;
}

impl<T: MetricsQuery + ?Sized> MetricsQuery for &T {
    fn query(&self, expression: &str) -> QueryResult {
        (**self).query(expression)
    }
}
