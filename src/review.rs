//! Client for the assignment-review status API and validation of its payload.
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::fmt;
use thiserror::Error;
use tracing::debug;

use crate::model::Homework;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Failure while querying the status endpoint. The variants matter for
/// operator diagnostics; the polling loop retries them all the same way.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered with status {0}")]
    ServerStatus(StatusCode),
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure while validating a decoded response payload.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("response is not a JSON object")]
    MalformedResponse,
    #[error("response is missing the {0:?} field")]
    MissingField(&'static str),
    #[error("the {0:?} field is not a list")]
    TypeMismatch(&'static str),
    #[error("homework record is malformed: {0}")]
    Record(#[source] serde_json::Error),
}

#[async_trait]
pub trait ReviewService: Send + Sync {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, FetchError>;
}

#[derive(Clone)]
pub struct ReviewClient {
    http: Client,
    endpoint: Url,
    token: String,
}

impl fmt::Debug for ReviewClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReviewClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ReviewClient {
    pub fn new(token: String) -> Self {
        let endpoint = Url::parse(DEFAULT_ENDPOINT).expect("valid default endpoint URL");
        Self::with_endpoint(token, endpoint)
    }

    pub fn with_endpoint(token: String, endpoint: Url) -> Self {
        let http = Client::builder()
            .user_agent("tg-reviewbot/0.1")
            .build()
            .expect("reqwest client");
        Self {
            http,
            endpoint,
            token,
        }
    }

    pub fn build_request(&self, from_date: i64) -> Result<reqwest::Request, reqwest::Error> {
        self.http
            .get(self.endpoint.clone())
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .build()
    }
}

#[async_trait]
impl ReviewService for ReviewClient {
    async fn fetch_statuses(&self, from_date: i64) -> Result<Value, FetchError> {
        let request = self.build_request(from_date)?;
        debug!(url = %request.url(), "querying review status endpoint");
        let res = self.http.execute(request).await?;
        if res.status() != StatusCode::OK {
            return Err(FetchError::ServerStatus(res.status()));
        }
        let body = res.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract the homework records from a decoded response. An empty list is
/// valid; a missing or mistyped `homeworks` field is not.
pub fn extract_homeworks(response: &Value) -> Result<Vec<Homework>, ExtractError> {
    let fields = response.as_object().ok_or(ExtractError::MalformedResponse)?;
    let homeworks = fields
        .get("homeworks")
        .ok_or(ExtractError::MissingField("homeworks"))?;
    let records = homeworks
        .as_array()
        .ok_or(ExtractError::TypeMismatch("homeworks"))?;
    records
        .iter()
        .map(|record| serde_json::from_value(record.clone()).map_err(ExtractError::Record))
        .collect()
}
