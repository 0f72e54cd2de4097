//! Score normalization — the grading backend's output is never trusted as-is.
//! Scores are clamped to [0, 10], confidence to [0, 1], and criterion rows
//! missing a name or a usable score are dropped.

use serde::Deserialize;

use crate::grading::models::{CriterionScore, GradeReport};

pub const MAX_SCORE: f64 = 10.0;

/// Loosely-typed report as the model actually returns it.
#[derive(Debug, Deserialize)]
pub struct RawGradeReport {
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub criterion_scores: Vec<RawCriterionScore>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    pub confidence: Option<f64>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCriterionScore {
    pub criterion: Option<String>,
    pub score: Option<f64>,
    #[serde(default)]
    pub justification: Option<String>,
}

/// Produces the normalized report stored on the assessment and returned to
/// the dashboard. Never fails: malformed pieces are dropped or defaulted.
pub fn normalize_report(raw: RawGradeReport) -> GradeReport {
    let criterion_scores: Vec<CriterionScore> = raw
        .criterion_scores
        .into_iter()
        .filter_map(|row| {
            let criterion = row.criterion.filter(|c| !c.trim().is_empty())?;
            let score = clamp_score(row.score?)?;
            Some(CriterionScore {
                criterion,
                score,
                justification: row.justification.unwrap_or_default(),
            })
        })
        .collect();

    let overall_score = raw
        .overall_score
        .and_then(clamp_score)
        .unwrap_or_else(|| mean_score(&criterion_scores));

    let confidence = raw
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.0);

    GradeReport {
        overall_score,
        criterion_scores,
        strengths: raw.strengths,
        areas_for_improvement: raw.areas_for_improvement,
        confidence,
        summary: raw.summary.unwrap_or_default(),
    }
}

/// Clamps a score to [0, MAX_SCORE]; NaN and infinities count as missing.
fn clamp_score(score: f64) -> Option<f64> {
    score.is_finite().then(|| score.clamp(0.0, MAX_SCORE))
}

/// Fallback overall score when the model omits one: unweighted mean of the
/// surviving criterion scores, 0.0 if none survived.
fn mean_score(scores: &[CriterionScore]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_criterion(criterion: &str, score: f64) -> RawCriterionScore {
        RawCriterionScore {
            criterion: Some(criterion.to_string()),
            score: Some(score),
            justification: Some("evidence".to_string()),
        }
    }

    #[test]
    fn test_in_range_report_unchanged() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(7.5),
            criterion_scores: vec![raw_criterion("Scalability", 8.0)],
            strengths: vec!["clear tradeoffs".to_string()],
            areas_for_improvement: vec![],
            confidence: Some(0.9),
            summary: Some("Strong".to_string()),
        });
        assert_eq!(report.overall_score, 7.5);
        assert_eq!(report.criterion_scores.len(), 1);
        assert_eq!(report.confidence, 0.9);
    }

    #[test]
    fn test_overall_score_clamped_high() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(42.0),
            criterion_scores: vec![],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(0.5),
            summary: None,
        });
        assert_eq!(report.overall_score, MAX_SCORE);
    }

    #[test]
    fn test_negative_criterion_score_clamped_to_zero() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(5.0),
            criterion_scores: vec![raw_criterion("Data model", -3.0)],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(0.5),
            summary: None,
        });
        assert_eq!(report.criterion_scores[0].score, 0.0);
    }

    #[test]
    fn test_confidence_clamped_to_unit_interval() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(5.0),
            criterion_scores: vec![],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(1.7),
            summary: None,
        });
        assert_eq!(report.confidence, 1.0);
    }

    #[test]
    fn test_nan_scores_dropped() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(f64::NAN),
            criterion_scores: vec![raw_criterion("Scalability", f64::NAN)],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(f64::NAN),
            summary: None,
        });
        assert!(report.criterion_scores.is_empty());
        assert_eq!(report.overall_score, 0.0);
        assert_eq!(report.confidence, 0.0);
    }

    #[test]
    fn test_missing_overall_falls_back_to_criterion_mean() {
        let report = normalize_report(RawGradeReport {
            overall_score: None,
            criterion_scores: vec![raw_criterion("A", 6.0), raw_criterion("B", 8.0)],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(0.4),
            summary: None,
        });
        assert_eq!(report.overall_score, 7.0);
    }

    #[test]
    fn test_unnamed_criterion_row_dropped() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(5.0),
            criterion_scores: vec![
                RawCriterionScore {
                    criterion: Some("  ".to_string()),
                    score: Some(5.0),
                    justification: None,
                },
                raw_criterion("Communication", 7.0),
            ],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(0.5),
            summary: None,
        });
        assert_eq!(report.criterion_scores.len(), 1);
        assert_eq!(report.criterion_scores[0].criterion, "Communication");
    }

    #[test]
    fn test_missing_justification_defaults_empty() {
        let report = normalize_report(RawGradeReport {
            overall_score: Some(5.0),
            criterion_scores: vec![RawCriterionScore {
                criterion: Some("Scalability".to_string()),
                score: Some(6.0),
                justification: None,
            }],
            strengths: vec![],
            areas_for_improvement: vec![],
            confidence: Some(0.5),
            summary: None,
        });
        assert_eq!(report.criterion_scores[0].justification, "");
    }
}
