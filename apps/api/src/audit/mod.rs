//! Audit trail — queries for the dashboard view plus the `record_entry`
//! helper every mutating operation goes through.

pub mod handlers;

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use crate::models::audit::AuditEntryRow;

/// Hard cap on a single audit page; the dashboard never needs more.
pub const MAX_PAGE_SIZE: i64 = 500;
const DEFAULT_PAGE_SIZE: i64 = 100;

pub struct NewAuditEntry<'a> {
    pub actor: &'a str,
    pub action: &'a str,
    pub entity_type: &'a str,
    pub entity_id: String,
    pub detail: serde_json::Value,
}

/// Appends one entry to the audit trail. Append-only; entries are never
/// updated or deleted.
pub async fn record_entry(pool: &PgPool, entry: NewAuditEntry<'_>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO audit_trail (actor, action, entity_type, entity_id, detail)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(entry.actor)
    .bind(entry.action)
    .bind(entry.entity_type)
    .bind(&entry.entity_id)
    .bind(&entry.detail)
    .execute(pool)
    .await?;

    debug!(
        "Audit: {} {} {}/{}",
        entry.actor, entry.action, entry.entity_type, entry.entity_id
    );
    Ok(())
}

#[derive(Debug, Default)]
pub struct AuditFilter {
    pub actor: Option<String>,
    pub action: Option<String>,
    pub entity_type: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<i64>,
}

impl AuditFilter {
    /// Requested page size, defaulted and capped.
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Returns the filtered trail, newest first.
pub async fn list_entries(
    pool: &PgPool,
    filter: &AuditFilter,
) -> Result<Vec<AuditEntryRow>, sqlx::Error> {
    sqlx::query_as::<_, AuditEntryRow>(
        r#"
        SELECT * FROM audit_trail
        WHERE ($1::text IS NULL OR actor = $1)
          AND ($2::text IS NULL OR action = $2)
          AND ($3::text IS NULL OR entity_type = $3)
          AND ($4::timestamptz IS NULL OR created_at >= $4)
          AND ($5::timestamptz IS NULL OR created_at <= $5)
        ORDER BY created_at DESC
        LIMIT $6
        "#,
    )
    .bind(&filter.actor)
    .bind(&filter.action)
    .bind(&filter.entity_type)
    .bind(filter.from)
    .bind(filter.to)
    .bind(filter.effective_limit())
    .fetch_all(pool)
    .await
}

/// Serializes audit entries as CSV for the dashboard's export button.
pub fn entries_to_csv(entries: &[AuditEntryRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "actor",
        "action",
        "entity_type",
        "entity_id",
        "detail",
        "created_at",
    ])?;
    for entry in entries {
        writer.write_record([
            entry.id.to_string(),
            entry.actor.clone(),
            entry.action.clone(),
            entry.entity_type.clone(),
            entry.entity_id.clone(),
            entry.detail.to_string(),
            entry.created_at.to_rfc3339(),
        ])?;
    }
    Ok(writer.into_inner()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    fn make_entry(actor: &str, action: &str) -> AuditEntryRow {
        AuditEntryRow {
            id: Uuid::new_v4(),
            actor: actor.to_string(),
            action: action.to_string(),
            entity_type: "assessment".to_string(),
            entity_id: Uuid::new_v4().to_string(),
            detail: json!({"overall_score": 7.5}),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(AuditFilter::default().effective_limit(), 100);
    }

    #[test]
    fn test_limit_capped_at_max() {
        let filter = AuditFilter {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(), MAX_PAGE_SIZE);
    }

    #[test]
    fn test_limit_floor_is_one() {
        let filter = AuditFilter {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(filter.effective_limit(), 1);
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let entries = vec![make_entry("admin", "assessment.graded")];
        let bytes = entries_to_csv(&entries).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,actor,action,entity_type,entity_id,detail,created_at"
        );
        assert!(lines.next().unwrap().contains("assessment.graded"));
    }

    #[test]
    fn test_csv_escapes_embedded_commas() {
        let mut entry = make_entry("admin", "report.generated");
        entry.detail = json!({"note": "a,b"});
        let bytes = entries_to_csv(&[entry]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // the json detail contains a comma, so the field must be quoted
        assert!(text.contains("\"{\"\"note\"\":\"\"a,b\"\"}\""));
    }
}
