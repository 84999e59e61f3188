//! Query lifecycle: `Idle -> Loading -> {Results | Error}`.
//!
//! Every submission takes a fresh request token and re-enters `Loading`.
//! A response is applied only if its token is the one the controller is
//! still waiting on; anything else is stale and dropped.

use crate::domain::models::{ClassifiedError, FailureReport, Query, SearchResponse};
use crate::services::classifier::{ErrorClassifier, MessagePatternClassifier};
use crate::services::client::ClientError;
use crate::services::response::{path_set, MalformedResponse};
use crate::services::selector::{PathSelector, SelectError};
use std::fmt;

pub const VALIDATION_MESSAGE: &str = "Please enter both player names";
pub const TRANSPORT_MESSAGE: &str = "Error connecting to server. Please try again.";
const UNKNOWN_SERVICE_ERROR: &str = "Unknown error";

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("both names required")]
    Validation,
}

pub fn validate_query(raw_subject1: &str, raw_subject2: &str) -> Result<Query, QueryError> {
    let (subject1, subject2) = (raw_subject1.trim(), raw_subject2.trim());
    if subject1.is_empty() || subject2.is_empty() {
        return Err(QueryError::Validation);
    }
    Ok(Query {
        subject1: subject1.to_string(),
        subject2: subject2.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What the caller must send to the service for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    pub token: RequestToken,
    pub query: Query,
}

#[derive(Debug)]
pub enum SearchOutcome {
    Response(SearchResponse),
    Malformed(MalformedResponse),
    Transport(String),
}

impl SearchOutcome {
    pub fn from_client(result: Result<SearchResponse, ClientError>) -> Self {
        match result {
            Ok(resp) => Self::Response(resp),
            Err(ClientError::Decode(err)) => Self::Malformed(MalformedResponse::Body(err.to_string())),
            Err(err) => Self::Transport(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading {
        token: RequestToken,
        query: Query,
    },
    Results {
        query: Query,
        selector: PathSelector,
    },
    Error {
        query: Option<Query>,
        error: ClassifiedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Applied,
    Stale,
}

/// Owns the single current-query state; everything else reads it through `phase()`.
pub struct QueryController<C = MessagePatternClassifier> {
    phase: Phase,
    issued: u64,
    classifier: C,
}

impl QueryController {
    pub fn new() -> Self {
        Self::with_classifier(MessagePatternClassifier)
    }
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ErrorClassifier> QueryController<C> {
    pub fn with_classifier(classifier: C) -> Self {
        Self {
            phase: Phase::Idle,
            issued: 0,
            classifier,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Accepts a new query and invalidates whatever was in flight.
    ///
    /// Rejected input moves to `Error` without a token being handed out,
    /// so no request may be sent for it.
    pub fn submit(
        &mut self,
        raw_subject1: &str,
        raw_subject2: &str,
    ) -> Result<PendingSearch, QueryError> {
        self.issued += 1;
        let query = match validate_query(raw_subject1, raw_subject2) {
            Ok(query) => query,
            Err(err) => {
                self.phase = Phase::Error {
                    query: None,
                    error: self.classify(VALIDATION_MESSAGE),
                };
                return Err(err);
            }
        };
        let token = RequestToken(self.issued);
        log::debug!(
            "request {token}: {:?} and {:?}",
            query.subject1,
            query.subject2
        );
        self.phase = Phase::Loading {
            token,
            query: query.clone(),
        };
        Ok(PendingSearch { token, query })
    }

    pub fn complete(&mut self, token: RequestToken, outcome: SearchOutcome) -> Delivery {
        let query = match &self.phase {
            Phase::Loading {
                token: current,
                query,
            } if *current == token => query.clone(),
            _ => {
                log::debug!("request {token}: response arrived after a newer submission, dropped");
                return Delivery::Stale;
            }
        };
        self.phase = self.resolve(query, outcome);
        Delivery::Applied
    }

    /// Switches the displayed path without re-querying.
    pub fn select_path(&mut self, index: usize) -> Result<(), SelectError> {
        match &mut self.phase {
            Phase::Results { selector, .. } => selector.set_active(index),
            _ => Err(SelectError::NoResults),
        }
    }

    fn resolve(&self, query: Query, outcome: SearchOutcome) -> Phase {
        match outcome {
            SearchOutcome::Transport(detail) => {
                log::warn!("connection search failed: {detail}");
                self.failed(Some(query), TRANSPORT_MESSAGE)
            }
            SearchOutcome::Malformed(err) => {
                log::warn!("unusable connection search response: {err}");
                self.no_connection(query)
            }
            SearchOutcome::Response(resp) if !resp.success => {
                let message = resp
                    .error
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| UNKNOWN_SERVICE_ERROR.to_string());
                self.failed(Some(query), &message)
            }
            SearchOutcome::Response(resp) => match path_set(resp.paths) {
                Ok(paths) => match PathSelector::select(paths) {
                    Some(selector) => Phase::Results { query, selector },
                    None => self.no_connection(query),
                },
                Err(err) => {
                    log::warn!("unusable connection search response: {err}");
                    self.no_connection(query)
                }
            },
        }
    }

    fn no_connection(&self, query: Query) -> Phase {
        let message = format!(
            "No connection found between {} and {}",
            query.subject1, query.subject2
        );
        self.failed(Some(query), &message)
    }

    fn failed(&self, query: Option<Query>, message: &str) -> Phase {
        Phase::Error {
            query,
            error: self.classify(message),
        }
    }

    fn classify(&self, message: &str) -> ClassifiedError {
        self.classifier.classify(&FailureReport {
            message: message.to_string(),
        })
    }
}
