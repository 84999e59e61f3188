use crate::domain::models::{Query, SearchResponse, ServiceSettings};
use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service answered with status {0}")]
    Status(reqwest::StatusCode),
    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The two calls made to the connection service.
pub trait SearchService: Send + Sync {
    fn suggest(&self, term: &str) -> Result<Vec<String>, ClientError>;
    fn find_connection(&self, query: &Query) -> Result<SearchResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(settings: &ServiceSettings) -> anyhow::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl SearchService for HttpSearchClient {
    fn suggest(&self, term: &str) -> Result<Vec<String>, ClientError> {
        log::debug!("suggestion lookup for {term:?}");
        let resp = self
            .http
            .get(self.endpoint("/api/players"))
            .query(&[("q", term)])
            .send()?;
        Ok(serde_json::from_str(&checked_body(resp)?)?)
    }

    fn find_connection(&self, query: &Query) -> Result<SearchResponse, ClientError> {
        log::debug!(
            "connection search for {:?} and {:?}",
            query.subject1,
            query.subject2
        );
        let resp = self
            .http
            .post(self.endpoint("/api/find_connection"))
            .json(&serde_json::json!({
                "player1": query.subject1,
                "player2": query.subject2,
            }))
            .send()?;
        decode_search_response(&checked_body(resp)?)
    }
}

fn checked_body(resp: reqwest::blocking::Response) -> Result<String, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Status(status));
    }
    Ok(resp.text()?)
}

pub fn decode_search_response(body: &str) -> Result<SearchResponse, ClientError> {
    Ok(serde_json::from_str(body)?)
}

/// Trimmed lookup term, or `None` when it is too short to send.
pub fn suggestion_term(raw: &str, min_chars: usize) -> Option<&str> {
    let term = raw.trim();
    (term.chars().count() >= min_chars.max(1)).then_some(term)
}
