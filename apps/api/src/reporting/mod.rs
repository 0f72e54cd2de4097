//! Reporting — templates, materialized instances, schedules, CSV export.
//!
//! A template fixes the column order; an instance is a frozen snapshot of
//! the score data at generation time, stored as JSON rows.

pub mod handlers;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::info;
use uuid::Uuid;

use crate::models::report::{ReportInstanceRow, ReportScheduleRow, ReportTemplateRow};

pub async fn list_templates(pool: &PgPool) -> Result<Vec<ReportTemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportTemplateRow>("SELECT * FROM report_templates ORDER BY name")
        .fetch_all(pool)
        .await
}

pub async fn fetch_template(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ReportTemplateRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportTemplateRow>("SELECT * FROM report_templates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list_schedules(pool: &PgPool) -> Result<Vec<ReportScheduleRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportScheduleRow>(
        "SELECT * FROM report_schedules ORDER BY next_run_at",
    )
    .fetch_all(pool)
    .await
}

pub async fn list_instances(
    pool: &PgPool,
    template_id: Option<Uuid>,
) -> Result<Vec<ReportInstanceRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportInstanceRow>(
        r#"
        SELECT * FROM report_instances
        WHERE ($1::uuid IS NULL OR template_id = $1)
        ORDER BY generated_at DESC
        "#,
    )
    .bind(template_id)
    .fetch_all(pool)
    .await
}

pub async fn fetch_instance(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<ReportInstanceRow>, sqlx::Error> {
    sqlx::query_as::<_, ReportInstanceRow>("SELECT * FROM report_instances WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// One snapshot row of the score data a report freezes.
#[derive(Debug, Serialize, FromRow)]
struct ScoreSnapshotRow {
    candidate: String,
    assessment: String,
    criterion: String,
    score: f64,
    graded_by: String,
    created_at: DateTime<Utc>,
}

/// Materializes a template now: snapshots the current score rows into a
/// completed instance.
pub async fn materialize_template(
    pool: &PgPool,
    template: &ReportTemplateRow,
) -> Result<ReportInstanceRow> {
    let rows: Vec<ScoreSnapshotRow> = sqlx::query_as(
        r#"
        SELECT c.name AS candidate,
               a.title AS assessment,
               sc.name AS criterion,
               cs.score,
               cs.graded_by,
               cs.created_at
        FROM candidate_scores cs
        JOIN candidates c ON c.id = cs.candidate_id
        JOIN assessments a ON a.id = cs.assessment_id
        JOIN scoring_criteria sc ON sc.id = cs.criterion_id
        ORDER BY cs.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let payload = serde_json::to_value(&rows)?;
    let instance = sqlx::query_as::<_, ReportInstanceRow>(
        r#"
        INSERT INTO report_instances (template_id, status, row_count, payload)
        VALUES ($1, 'completed', $2, $3)
        RETURNING *
        "#,
    )
    .bind(template.id)
    .bind(rows.len() as i32)
    .bind(&payload)
    .fetch_one(pool)
    .await?;

    info!(
        "Materialized report '{}': {} rows (instance {})",
        template.name, instance.row_count, instance.id
    );
    Ok(instance)
}

/// Column keys a template exports, in order. Non-string entries are skipped.
pub fn template_columns(template: &ReportTemplateRow) -> Vec<String> {
    template
        .columns
        .as_array()
        .map(|columns| {
            columns
                .iter()
                .filter_map(|c| c.as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

/// Serializes an instance payload as CSV in the template's column order.
/// Falls back to the first row's keys (sorted) when the template defines none.
pub fn instance_to_csv(columns: &[String], payload: &Value) -> Result<Vec<u8>> {
    let rows = payload
        .as_array()
        .ok_or_else(|| anyhow!("Report instance payload is not an array"))?;

    let columns: Vec<String> = if columns.is_empty() {
        let mut keys: Vec<String> = rows
            .first()
            .and_then(|row| row.as_object())
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    } else {
        columns.to_vec()
    };

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for row in rows {
        let record: Vec<String> = columns.iter().map(|c| field_to_string(row.get(c))).collect();
        writer.write_record(&record)?;
    }
    Ok(writer.into_inner()?)
}

fn field_to_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn make_template(columns: Value) -> ReportTemplateRow {
        ReportTemplateRow {
            id: Uuid::new_v4(),
            name: "Weekly scores".to_string(),
            description: "Per-criterion scores".to_string(),
            columns,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_template_columns_in_order() {
        let template = make_template(json!(["candidate", "criterion", "score"]));
        assert_eq!(
            template_columns(&template),
            vec!["candidate", "criterion", "score"]
        );
    }

    #[test]
    fn test_template_columns_skips_non_strings() {
        let template = make_template(json!(["candidate", 7, "score"]));
        assert_eq!(template_columns(&template), vec!["candidate", "score"]);
    }

    #[test]
    fn test_template_columns_tolerates_malformed_value() {
        let template = make_template(json!({"not": "an array"}));
        assert!(template_columns(&template).is_empty());
    }

    #[test]
    fn test_csv_respects_column_order() {
        let payload = json!([
            {"candidate": "Ada", "score": 8.5, "criterion": "Scalability"},
        ]);
        let columns = vec!["score".to_string(), "candidate".to_string()];
        let text = String::from_utf8(instance_to_csv(&columns, &payload).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), "score,candidate");
        assert_eq!(lines.next().unwrap(), "8.5,Ada");
    }

    #[test]
    fn test_csv_missing_key_is_empty_field() {
        let payload = json!([{"candidate": "Ada"}]);
        let columns = vec!["candidate".to_string(), "score".to_string()];
        let text = String::from_utf8(instance_to_csv(&columns, &payload).unwrap()).unwrap();
        assert_eq!(text.lines().nth(1).unwrap(), "Ada,");
    }

    #[test]
    fn test_csv_falls_back_to_sorted_row_keys() {
        let payload = json!([{"b": 1, "a": 2}]);
        let text = String::from_utf8(instance_to_csv(&[], &payload).unwrap()).unwrap();
        assert_eq!(text.lines().next().unwrap(), "a,b");
    }

    #[test]
    fn test_csv_rejects_non_array_payload() {
        assert!(instance_to_csv(&[], &json!({"rows": []})).is_err());
    }

    #[test]
    fn test_csv_empty_payload_is_header_only() {
        let columns = vec!["candidate".to_string()];
        let text = String::from_utf8(instance_to_csv(&columns, &json!([])).unwrap()).unwrap();
        assert_eq!(text.trim_end(), "candidate");
    }
}
