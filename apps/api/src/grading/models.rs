use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for `POST /api/grade-interview`.
///
/// Wire names follow the dashboard's existing contract: camelCase keys with
/// the one historical exception of `assessment_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeInterviewRequest {
    pub problem_description: String,
    pub rubric: String,
    pub transcript: Transcript,
    #[serde(default)]
    pub diagram_json: DiagramGraph,
    #[serde(rename = "assessment_id")]
    pub assessment_id: Uuid,
}

/// Interview transcript as submitted by the dashboard.
/// Older clients send one flat string; newer ones send attributed turns.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Transcript {
    Text(String),
    Turns(Vec<TranscriptTurn>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptTurn {
    pub speaker: String,
    pub text: String,
}

impl Transcript {
    pub fn is_empty(&self) -> bool {
        match self {
            Transcript::Text(text) => text.trim().is_empty(),
            Transcript::Turns(turns) => turns.iter().all(|t| t.text.trim().is_empty()),
        }
    }
}

/// The system-design diagram the candidate drew, as a flat node/edge list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiagramGraph {
    #[serde(default)]
    pub nodes: Vec<DiagramNode>,
    #[serde(default)]
    pub edges: Vec<DiagramEdge>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramNode {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagramEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub label: Option<String>,
}

/// Normalized grading result returned to the dashboard and stored on the
/// assessment row. Every score is clamped to [0, 10], confidence to [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    pub overall_score: f64,
    pub criterion_scores: Vec<CriterionScore>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub confidence: f64,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionScore {
    pub criterion: String,
    pub score: f64,
    pub justification: String,
}
