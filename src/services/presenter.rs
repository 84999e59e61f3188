use crate::domain::models::{
    ClassifiedError, ConnectionSummary, ErrorKind, NormalizedEdge, Path, PathView, Query,
    RenderBlock, RenderedPath, SummaryKind,
};
use crate::services::normalizer::normalize;
use crate::services::selector::PathSelector;

/// Lays a path out as node, edge, node, ..., node.
///
/// Pure function of `path`: rendering the same path again yields the same value.
pub fn render(path: &Path) -> RenderedPath {
    let mut blocks = Vec::with_capacity(path.nodes.len() + path.connections.len());
    for (i, node) in path.nodes.iter().enumerate() {
        blocks.push(RenderBlock::Node {
            name: node.name.clone(),
        });
        if let Some(edge) = path.connections.get(i) {
            let connection = normalize(edge);
            let summary = summary_line(&connection);
            blocks.push(RenderBlock::Edge {
                terminal: i + 1 == path.connections.len(),
                connection,
                summary,
            });
        }
    }
    RenderedPath {
        length: path.length,
        blocks,
    }
}

pub fn summary_line(edge: &NormalizedEdge) -> Option<String> {
    let seasons = edge.sorted_details.len();
    match edge.summary_kind {
        SummaryKind::None => None,
        SummaryKind::SingleGroup => Some(format!("Played together for {seasons} seasons")),
        SummaryKind::MultiGroup => Some(format!(
            "Played at {} different teams across {seasons} seasons",
            edge.distinct_groups
        )),
    }
}

pub fn connection_summary(query: &Query, selector: &PathSelector) -> ConnectionSummary {
    let links = selector.active().length;
    ConnectionSummary {
        headline: format!(
            "{} and {} are connected through {} link{}.",
            query.subject1,
            query.subject2,
            links,
            if links > 1 { "s" } else { "" }
        ),
        alternatives: selector.alternatives_summary(),
    }
}

pub fn present(query: &Query, selector: &PathSelector) -> PathView {
    PathView {
        query: query.clone(),
        summary: connection_summary(query, selector),
        active_index: selector.active_index(),
        path_count: selector.path_count(),
        labels: selector.labels(),
        path: render(selector.active()),
    }
}

pub fn path_view_text(view: &PathView) -> String {
    let mut out = Vec::new();
    out.push(view.summary.headline.clone());
    if let Some(alternatives) = &view.summary.alternatives {
        out.push(alternatives.clone());
    }
    if !view.labels.is_empty() {
        let labels: Vec<String> = view
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                if i == view.active_index {
                    format!("[{label}]")
                } else {
                    label.clone()
                }
            })
            .collect();
        out.push(format!("Paths: {}", labels.join(" ")));
    }
    out.push(String::new());

    for block in &view.path.blocks {
        match block {
            RenderBlock::Node { name } => out.push(name.clone()),
            RenderBlock::Edge {
                terminal,
                connection,
                summary,
            } => {
                if connection.sorted_details.is_empty() {
                    out.push("  | No team/season details available".to_string());
                } else {
                    out.push("  | Played together at:".to_string());
                    for detail in &connection.sorted_details {
                        out.push(format!("  |   {} ({})", detail.team, detail.season));
                    }
                    if let Some(summary) = summary {
                        out.push(format!("  |   {summary}"));
                    }
                }
                out.push(if *terminal { "  '" } else { "  |" }.to_string());
            }
        }
    }
    out.join("\n")
}

pub fn error_text(error: &ClassifiedError) -> String {
    let mut out = vec![error.message.clone()];
    let intro = match error.kind {
        ErrorKind::NoConnection => Some("This could be due to several reasons:"),
        ErrorKind::NotFound => Some("Suggestions:"),
        ErrorKind::Generic => None,
    };
    if let Some(intro) = intro.filter(|_| !error.remediation.is_empty()) {
        out.push(intro.to_string());
        out.extend(error.remediation.iter().map(|hint| format!("- {hint}")));
    }
    if let Some(follow_up) = &error.follow_up {
        out.push(follow_up.clone());
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{error_text, path_view_text, present, render};
    use crate::domain::models::{
        ClassifiedError, ConnectionEdge, ErrorKind, EvidenceRecord, Path, PathNode, Query,
        RenderBlock,
    };
    use crate::services::selector::PathSelector;

    fn rec(team: &str, season: &str) -> EvidenceRecord {
        EvidenceRecord {
            team: team.to_string(),
            season: season.to_string(),
        }
    }

    fn path(names: &[&str], details: Vec<Vec<EvidenceRecord>>) -> Path {
        Path {
            nodes: names
                .iter()
                .map(|n| PathNode {
                    id: None,
                    name: n.to_string(),
                })
                .collect(),
            connections: details
                .into_iter()
                .map(|details| ConnectionEdge {
                    details,
                    ..ConnectionEdge::default()
                })
                .collect(),
            length: names.len() - 1,
        }
    }

    fn query() -> Query {
        Query {
            subject1: "Mesut Ozil".to_string(),
            subject2: "Karim Benzema".to_string(),
        }
    }

    fn two_paths() -> Vec<Path> {
        vec![
            path(
                &["Mesut Ozil", "Sami Khedira", "Karim Benzema"],
                vec![
                    vec![rec("Real Madrid", "2010-2011"), rec("Real Madrid", "2012-2013")],
                    vec![rec("Real Madrid", "2011-2012")],
                ],
            ),
            path(
                &["Mesut Ozil", "Xabi Alonso", "Karim Benzema"],
                vec![vec![], vec![rec("Real Madrid", "2009-2010")]],
            ),
        ]
    }

    #[test]
    fn render_alternates_nodes_and_edges() {
        let rendered = render(&two_paths()[0]);
        assert_eq!(rendered.length, 2);
        assert_eq!(rendered.blocks.len(), 5);
        assert!(matches!(&rendered.blocks[0], RenderBlock::Node { name } if name == "Mesut Ozil"));
        assert!(matches!(
            &rendered.blocks[1],
            RenderBlock::Edge { terminal: false, summary: Some(s), .. }
                if s == "Played together for 2 seasons"
        ));
        assert!(matches!(
            &rendered.blocks[3],
            RenderBlock::Edge { terminal: true, summary: None, .. }
        ));
        assert!(matches!(&rendered.blocks[4], RenderBlock::Node { name } if name == "Karim Benzema"));
    }

    #[test]
    fn switching_paths_back_and_forth_renders_identically() {
        let paths = two_paths();
        let mut selector = PathSelector::select(paths.clone()).unwrap();
        let first = path_view_text(&present(&query(), &selector));
        let first_json = serde_json::to_string(&render(selector.active())).unwrap();

        selector.set_active(1).unwrap();
        let second = path_view_text(&present(&query(), &selector));
        assert_ne!(first, second);

        selector.set_active(0).unwrap();
        assert_eq!(path_view_text(&present(&query(), &selector)), first);
        assert_eq!(
            serde_json::to_string(&render(selector.active())).unwrap(),
            first_json
        );
        assert_eq!(selector.active(), &paths[0]);
    }

    #[test]
    fn text_view_lists_recent_seasons_first() {
        let selector = PathSelector::select(two_paths()).unwrap();
        let text = path_view_text(&present(&query(), &selector));
        let expected = "\
Mesut Ozil and Karim Benzema are connected through 2 links.
Found 2 different paths with the same number of links.
Paths: [Path 1] Path 2

Mesut Ozil
  | Played together at:
  |   Real Madrid (2012-2013)
  |   Real Madrid (2010-2011)
  |   Played together for 2 seasons
  |
Sami Khedira
  | Played together at:
  |   Real Madrid (2011-2012)
  '
Karim Benzema";
        assert_eq!(text, expected);
    }

    #[test]
    fn edge_without_evidence_says_so() {
        let mut selector = PathSelector::select(two_paths()).unwrap();
        selector.set_active(1).unwrap();
        let text = path_view_text(&present(&query(), &selector));
        assert!(text.contains("  | No team/season details available"));
        assert!(text.contains("Paths: Path 1 [Path 2]"));
    }

    #[test]
    fn single_link_headline_is_singular() {
        let selector =
            PathSelector::select(vec![path(&["A", "B"], vec![vec![rec("X", "2001-2002")]])])
                .unwrap();
        let view = present(
            &Query {
                subject1: "A".to_string(),
                subject2: "B".to_string(),
            },
            &selector,
        );
        assert_eq!(view.summary.headline, "A and B are connected through 1 link.");
        assert!(view.summary.alternatives.is_none());
        assert!(view.labels.is_empty());
    }

    #[test]
    fn error_text_lists_hints_under_intro() {
        let error = ClassifiedError {
            kind: ErrorKind::NotFound,
            message: "Player not found: Xyz".to_string(),
            subjects: vec!["Xyz".to_string()],
            remediation: vec!["Check the spelling".to_string()],
            follow_up: None,
        };
        assert_eq!(
            error_text(&error),
            "Player not found: Xyz\nSuggestions:\n- Check the spelling"
        );
    }

    #[test]
    fn error_text_ends_with_follow_up_line() {
        let error = ClassifiedError {
            kind: ErrorKind::NoConnection,
            message: "No connection found between A and B".to_string(),
            subjects: vec!["A".to_string(), "B".to_string()],
            remediation: vec!["Check names".to_string()],
            follow_up: Some("Try other players first.".to_string()),
        };
        assert_eq!(
            error_text(&error),
            "No connection found between A and B\nThis could be due to several reasons:\n- Check names\nTry other players first."
        );
    }
}
