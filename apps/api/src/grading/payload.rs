//! Grading payload assembly — renders the request into the prompt the
//! grading backend receives. Rendering is deterministic: same request,
//! same payload, byte for byte.

use crate::grading::models::{DiagramGraph, GradeInterviewRequest, Transcript};
use crate::grading::prompts::GRADING_PROMPT_TEMPLATE;

/// Renders the full grading prompt from a validated request.
pub fn render_grading_payload(request: &GradeInterviewRequest) -> String {
    GRADING_PROMPT_TEMPLATE
        .replace("{problem_description}", request.problem_description.trim())
        .replace("{rubric}", request.rubric.trim())
        .replace("{transcript}", &render_transcript(&request.transcript))
        .replace("{diagram}", &render_diagram(&request.diagram_json))
}

/// Renders the transcript as `speaker: text` lines.
/// A flat string transcript becomes a single unattributed turn.
pub fn render_transcript(transcript: &Transcript) -> String {
    match transcript {
        Transcript::Text(text) => text.trim().to_string(),
        Transcript::Turns(turns) => turns
            .iter()
            .filter(|t| !t.text.trim().is_empty())
            .map(|t| format!("{}: {}", t.speaker, t.text.trim()))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Renders the diagram as a node list plus `source -> target` adjacency lines.
/// An empty graph renders as an explicit marker so the prompt shape is stable.
pub fn render_diagram(diagram: &DiagramGraph) -> String {
    if diagram.nodes.is_empty() && diagram.edges.is_empty() {
        return "(no diagram submitted)".to_string();
    }

    let mut lines = Vec::with_capacity(diagram.nodes.len() + diagram.edges.len() + 2);

    lines.push("Components:".to_string());
    for node in &diagram.nodes {
        let name = node.label.as_deref().unwrap_or(&node.id);
        match node.kind.as_deref() {
            Some(kind) => lines.push(format!("- {name} [{kind}]")),
            None => lines.push(format!("- {name}")),
        }
    }

    if !diagram.edges.is_empty() {
        lines.push("Connections:".to_string());
        for edge in &diagram.edges {
            let source = node_name(diagram, &edge.source);
            let target = node_name(diagram, &edge.target);
            match edge.label.as_deref() {
                Some(label) => lines.push(format!("- {source} -> {target} ({label})")),
                None => lines.push(format!("- {source} -> {target}")),
            }
        }
    }

    lines.join("\n")
}

/// Resolves a node id to its label, falling back to the raw id for edges
/// that reference nodes missing from the node list.
fn node_name<'a>(diagram: &'a DiagramGraph, id: &'a str) -> &'a str {
    diagram
        .nodes
        .iter()
        .find(|n| n.id == id)
        .and_then(|n| n.label.as_deref())
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grading::models::{DiagramEdge, DiagramNode, TranscriptTurn};
    use uuid::Uuid;

    fn make_request() -> GradeInterviewRequest {
        GradeInterviewRequest {
            problem_description: "Design a URL shortener".to_string(),
            rubric: "Scalability (40%), Data model (30%), Communication (30%)".to_string(),
            transcript: Transcript::Turns(vec![
                TranscriptTurn {
                    speaker: "interviewer".to_string(),
                    text: "How would you handle collisions?".to_string(),
                },
                TranscriptTurn {
                    speaker: "candidate".to_string(),
                    text: "Retry with a new random key.".to_string(),
                },
            ]),
            diagram_json: DiagramGraph {
                nodes: vec![
                    DiagramNode {
                        id: "n1".to_string(),
                        label: Some("API Gateway".to_string()),
                        kind: Some("service".to_string()),
                    },
                    DiagramNode {
                        id: "n2".to_string(),
                        label: Some("Postgres".to_string()),
                        kind: Some("database".to_string()),
                    },
                ],
                edges: vec![DiagramEdge {
                    source: "n1".to_string(),
                    target: "n2".to_string(),
                    label: Some("writes".to_string()),
                }],
            },
            assessment_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_payload_contains_every_section() {
        let payload = render_grading_payload(&make_request());
        assert!(payload.contains("Design a URL shortener"));
        assert!(payload.contains("Scalability (40%)"));
        assert!(payload.contains("candidate: Retry with a new random key."));
        assert!(payload.contains("API Gateway [service]"));
        assert!(payload.contains("API Gateway -> Postgres (writes)"));
    }

    #[test]
    fn test_payload_is_deterministic() {
        let request = make_request();
        assert_eq!(
            render_grading_payload(&request),
            render_grading_payload(&request)
        );
    }

    #[test]
    fn test_transcript_turns_render_in_order() {
        let rendered = render_transcript(&Transcript::Turns(vec![
            TranscriptTurn {
                speaker: "a".to_string(),
                text: "first".to_string(),
            },
            TranscriptTurn {
                speaker: "b".to_string(),
                text: "second".to_string(),
            },
        ]));
        assert_eq!(rendered, "a: first\nb: second");
    }

    #[test]
    fn test_transcript_string_passes_through() {
        let rendered = render_transcript(&Transcript::Text("  raw notes  ".to_string()));
        assert_eq!(rendered, "raw notes");
    }

    #[test]
    fn test_transcript_skips_blank_turns() {
        let rendered = render_transcript(&Transcript::Turns(vec![
            TranscriptTurn {
                speaker: "a".to_string(),
                text: "   ".to_string(),
            },
            TranscriptTurn {
                speaker: "b".to_string(),
                text: "kept".to_string(),
            },
        ]));
        assert_eq!(rendered, "b: kept");
    }

    #[test]
    fn test_empty_diagram_renders_marker() {
        assert_eq!(
            render_diagram(&DiagramGraph::default()),
            "(no diagram submitted)"
        );
    }

    #[test]
    fn test_diagram_edge_with_unknown_node_falls_back_to_id() {
        let diagram = DiagramGraph {
            nodes: vec![DiagramNode {
                id: "n1".to_string(),
                label: Some("Cache".to_string()),
                kind: None,
            }],
            edges: vec![DiagramEdge {
                source: "n1".to_string(),
                target: "ghost".to_string(),
                label: None,
            }],
        };
        let rendered = render_diagram(&diagram);
        assert!(rendered.contains("- Cache"));
        assert!(rendered.contains("Cache -> ghost"));
    }

    #[test]
    fn test_node_without_label_uses_id() {
        let diagram = DiagramGraph {
            nodes: vec![DiagramNode {
                id: "lb-1".to_string(),
                label: None,
                kind: Some("load_balancer".to_string()),
            }],
            edges: vec![],
        };
        assert!(render_diagram(&diagram).contains("- lb-1 [load_balancer]"));
    }
}
