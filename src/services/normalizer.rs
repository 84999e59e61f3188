use crate::domain::models::{ConnectionEdge, EvidenceRecord, NormalizedEdge, SummaryKind};
use std::cmp::Reverse;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PeriodError {
    #[error("malformed season period: {0:?}")]
    Malformed(String),
}

/// Start year of a `"<startYear>-<endYear>"` period.
pub fn start_year(period: &str) -> Result<i32, PeriodError> {
    let malformed = || PeriodError::Malformed(period.to_string());
    let (start, end) = period.trim().split_once('-').ok_or_else(malformed)?;
    let (start, end) = (start.trim(), end.trim());
    if !is_year(start) || !is_year(end) {
        return Err(malformed());
    }
    start.parse().map_err(|_| malformed())
}

fn is_year(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Orders an edge's evidence most-recent-season first and classifies the summary.
///
/// Records sharing a start year keep their input order. A period that does not
/// parse leaves the whole edge in input order with no summary.
pub fn normalize(edge: &ConnectionEdge) -> NormalizedEdge {
    if edge.details.is_empty() {
        return NormalizedEdge {
            sorted_details: Vec::new(),
            distinct_groups: 0,
            summary_kind: SummaryKind::None,
        };
    }

    let distinct_groups = edge
        .details
        .iter()
        .map(|d| d.team.as_str())
        .collect::<HashSet<_>>()
        .len();

    match sort_by_start_year(&edge.details) {
        Ok(sorted_details) => {
            let summary_kind = summary_kind(sorted_details.len(), distinct_groups);
            NormalizedEdge {
                sorted_details,
                distinct_groups,
                summary_kind,
            }
        }
        Err(err) => {
            log::warn!("{err}; keeping service order for this connection");
            NormalizedEdge {
                sorted_details: edge.details.clone(),
                distinct_groups,
                summary_kind: SummaryKind::None,
            }
        }
    }
}

fn sort_by_start_year(details: &[EvidenceRecord]) -> Result<Vec<EvidenceRecord>, PeriodError> {
    let mut keyed = details
        .iter()
        .map(|d| start_year(&d.season).map(|year| (year, d)))
        .collect::<Result<Vec<_>, _>>()?;
    // sort_by_key is stable: same-season records stay in service order.
    keyed.sort_by_key(|(year, _)| Reverse(*year));
    Ok(keyed.into_iter().map(|(_, d)| d.clone()).collect())
}

fn summary_kind(records: usize, distinct_groups: usize) -> SummaryKind {
    if records <= 1 {
        SummaryKind::None
    } else if distinct_groups > 1 {
        SummaryKind::MultiGroup
    } else {
        SummaryKind::SingleGroup
    }
}
