use serde::{Deserialize, Deserializer, Serialize};

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// One submitted pair of player names, already trimmed and checked non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    pub subject1: String,
    pub subject2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// One shared team/season fact backing a connection.
///
/// The service calls these fields `team` and `season`; the generic
/// `group`/`period` spellings are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRecord {
    #[serde(alias = "group")]
    pub team: String,
    #[serde(alias = "period")]
    pub season: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConnectionEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub details: Vec<EvidenceRecord>,
}

/// `"details": null` means no evidence, same as an absent field.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated path: `length == connections.len() == nodes.len() - 1` and `length >= 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path {
    pub nodes: Vec<PathNode>,
    pub connections: Vec<ConnectionEdge>,
    pub length: usize,
}

/// All equally-short paths returned for one query, in service order.
pub type PathSet = Vec<Path>;

/// Path exactly as it arrives on the wire, before the shape is checked.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePath {
    #[serde(default)]
    pub nodes: Option<Vec<PathNode>>,
    #[serde(default)]
    pub connections: Option<Vec<ConnectionEdge>>,
    #[serde(default)]
    pub length: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub paths: Option<Vec<WirePath>>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureReport {
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryKind {
    None,
    SingleGroup,
    MultiGroup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedEdge {
    pub sorted_details: Vec<EvidenceRecord>,
    pub distinct_groups: usize,
    pub summary_kind: SummaryKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderBlock {
    Node {
        name: String,
    },
    Edge {
        terminal: bool,
        connection: NormalizedEdge,
        summary: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedPath {
    pub length: usize,
    pub blocks: Vec<RenderBlock>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSummary {
    pub headline: String,
    pub alternatives: Option<String>,
}

/// Everything a front-end needs to draw the results panel for one active path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathView {
    pub query: Query,
    pub summary: ConnectionSummary,
    pub active_index: usize,
    pub path_count: usize,
    pub labels: Vec<String>,
    pub path: RenderedPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NoConnection,
    NotFound,
    Generic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
    pub subjects: Vec<String>,
    pub remediation: Vec<String>,
    /// Closing advice shown after the hint list.
    pub follow_up: Option<String>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_min_chars() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub service: ServiceSettings,
    #[serde(default)]
    pub suggest: SuggestSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuggestSettings {
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
        }
    }
}
