use crate::domain::models::{ClassifiedError, ErrorKind, FailureReport};

const NO_CONNECTION_MARKER: &str = "No connection found between";
const NO_CONNECTION_PREFIX: &str = "No connection found between ";
const NOT_FOUND_MARKER: &str = "Player not found";
const NOT_FOUND_PREFIXES: [&str; 2] = ["Player not found: ", "Player not found in graph: "];

const NO_CONNECTION_HINTS: [&str; 4] = [
    "These players may have never shared a team (directly or through other players)",
    "One or both players might be in the database with a different spelling or name format",
    "Try using full names (e.g., \"Karim Benzema\" instead of just \"Benzema\")",
    "The connection might involve more players than can currently be traced",
];
const NO_CONNECTION_FOLLOW_UP: &str =
    "Try searching for other players these individuals might have played with first.";

const NOT_FOUND_HINTS: [&str; 3] = [
    "Check the spelling of the player's name",
    "Try using the player's full name",
    "The player might be known by a different name in the database",
];

/// Maps a raw failure message onto a user-facing category.
///
/// Callers only see this trait, so the matching rules can move to structured
/// error codes without touching them.
pub trait ErrorClassifier {
    fn classify(&self, report: &FailureReport) -> ClassifiedError;
}

/// Substring rules over the service's free-text messages, checked in order:
/// no-connection, not-found, then everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePatternClassifier;

impl ErrorClassifier for MessagePatternClassifier {
    fn classify(&self, report: &FailureReport) -> ClassifiedError {
        let message = report.message.as_str();
        if message.contains(NO_CONNECTION_MARKER) {
            return no_connection(message).unwrap_or_else(|| generic(message));
        }
        if message.contains(NOT_FOUND_MARKER) {
            return not_found(message).unwrap_or_else(|| generic(message));
        }
        generic(message)
    }
}

fn no_connection(message: &str) -> Option<ClassifiedError> {
    let names = message.replacen(NO_CONNECTION_PREFIX, "", 1);
    let parts: Vec<&str> = names.split(" and ").collect();
    let [first, second] = parts.as_slice() else {
        return None;
    };
    let (first, second) = (first.trim(), second.trim());
    if first.is_empty() || second.is_empty() {
        return None;
    }
    Some(ClassifiedError {
        kind: ErrorKind::NoConnection,
        message: format!("{NO_CONNECTION_PREFIX}{first} and {second}"),
        subjects: vec![first.to_string(), second.to_string()],
        remediation: NO_CONNECTION_HINTS.iter().map(|h| h.to_string()).collect(),
        follow_up: Some(NO_CONNECTION_FOLLOW_UP.to_string()),
    })
}

fn not_found(message: &str) -> Option<ClassifiedError> {
    let subject = NOT_FOUND_PREFIXES
        .iter()
        .find(|prefix| message.contains(*prefix))
        .map(|prefix| message.replacen(prefix, "", 1))?;
    let subject = subject.trim();
    if subject.is_empty() {
        return None;
    }
    Some(ClassifiedError {
        kind: ErrorKind::NotFound,
        message: format!("Player not found: {subject}"),
        subjects: vec![subject.to_string()],
        remediation: NOT_FOUND_HINTS.iter().map(|h| h.to_string()).collect(),
        follow_up: None,
    })
}

fn generic(message: &str) -> ClassifiedError {
    ClassifiedError {
        kind: ErrorKind::Generic,
        message: message.to_string(),
        subjects: Vec::new(),
        remediation: Vec::new(),
        follow_up: None,
    }
}
