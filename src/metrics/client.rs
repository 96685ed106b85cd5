//! Prometheus instant-query client
//!
//! Uses ureq (sync HTTP). One GET per query, `?query=<expression>`, bounded by
//! the configured timeout.

use super::{MetricsQuery, QueryError, QueryResult};
use crate::config::PrometheusConfig;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Longest response body kept in an error message
const MAX_ERROR_BODY: usize = 200;

pub struct PrometheusClient {
    url: String,
    agent: ureq::Agent,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // Prometheus sends its error envelope with 4xx/5xx
        .timeout_global(Some(timeout))
        .proxy(None) // Prometheus is queried directly, never through HTTP(S)_PROXY
        .build()
        .new_agent()
}

impl PrometheusClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            agent: make_agent(timeout),
        }
    }

    pub fn from_config(config: &PrometheusConfig) -> Self {
        Self::new(config.url.clone(), config.timeout())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl MetricsQuery for PrometheusClient {
    fn query(&self, expression: &str) -> QueryResult {
        let response = self
            .agent
            .get(&self.url)
            .query("query", expression)
            .call()
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| QueryError::Transport(e.to_string()))?;

        let value = parse_response(status, &body)?;
        debug!("{} = {}", expression, value);
        Ok(value)
    }
}

#[derive(Deserialize)]
struct QueryResponse {
    status: String,
    #[serde(default)]
    data: Option<QueryData>,
    #[serde(default, rename = "errorType")]
    error_type: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
struct QueryData {
    #[serde(default)]
    result: Vec<Series>,
}

#[derive(Deserialize)]
struct Series {
    /// `[unix_timestamp, "stringified number"]`
    value: (serde_json::Value, String),
}

/// Reduce a query response body to one scalar.
///
/// The values of all returned series are summed.
pub(crate) fn parse_response(status: u16, body: &str) -> QueryResult {
    let envelope: QueryResponse = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if (200..300).contains(&status) => return Err(QueryError::Malformed(e.to_string())),
        Err(_) => {
            return Err(QueryError::HttpStatus {
                status,
                body: truncate(body),
            })
        }
    };

    if envelope.status != "success" {
        return Err(QueryError::Backend {
            status: envelope.status,
            error_type: envelope.error_type.unwrap_or_default(),
            message: envelope.error.unwrap_or_default(),
        });
    }

    let series = envelope.data.map(|d| d.result).unwrap_or_default();
    if series.is_empty() {
        return Err(QueryError::EmptyResult);
    }

    let mut total = 0.0;
    for s in &series {
        let raw = s.value.1.trim();
        let value: f64 = raw
            .parse()
            .map_err(|_| QueryError::Malformed(format!("'{}' is not a number", raw)))?;
        total += value;
    }

    if !total.is_finite() {
        return Err(QueryError::NonFinite(total));
    }
    Ok(total)
}

fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY {
        let head: String = body.chars().take(MAX_ERROR_BODY).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
