use crate::domain::models::{Path, PathSet, WirePath};

/// A 2xx body that does not have the promised shape.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("response body is not valid JSON: {0}")]
    Body(String),
    #[error("path {index} is missing `{field}`")]
    MissingField { index: usize, field: &'static str },
    #[error("path {index} has {nodes} nodes, {connections} connections and length {length}")]
    ShapeMismatch {
        index: usize,
        nodes: usize,
        connections: usize,
        length: usize,
    },
    #[error("path {index} has {found} links but path 0 has {expected}")]
    MixedLengths {
        index: usize,
        expected: usize,
        found: usize,
    },
}

/// Checks every wire path and the equal-length guarantee across the set.
///
/// An absent `paths` field is an empty set, not an error.
pub fn path_set(paths: Option<Vec<WirePath>>) -> Result<PathSet, MalformedResponse> {
    let paths = paths
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, wire)| checked_path(index, wire))
        .collect::<Result<PathSet, _>>()?;

    if let Some(first) = paths.first() {
        let expected = first.length;
        if let Some((index, other)) = paths
            .iter()
            .enumerate()
            .find(|(_, p)| p.length != expected)
        {
            return Err(MalformedResponse::MixedLengths {
                index,
                expected,
                found: other.length,
            });
        }
    }
    Ok(paths)
}

fn checked_path(index: usize, wire: WirePath) -> Result<Path, MalformedResponse> {
    let missing = |field| MalformedResponse::MissingField { index, field };
    let nodes = wire.nodes.ok_or_else(|| missing("nodes"))?;
    let connections = wire.connections.ok_or_else(|| missing("connections"))?;
    let length = wire.length.unwrap_or(connections.len());

    if length == 0 || connections.len() != length || nodes.len() != length + 1 {
        return Err(MalformedResponse::ShapeMismatch {
            index,
            nodes: nodes.len(),
            connections: connections.len(),
            length,
        });
    }
    Ok(Path {
        nodes,
        connections,
        length,
    })
}
