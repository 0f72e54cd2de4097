//! Email composition for completion notifications.
//! The HTML is built programmatically; user-supplied strings are escaped.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Request body for `POST /api/send-completion-notification`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionNotificationRequest {
    pub candidate_name: String,
    pub candidate_email: String,
    pub assessment_title: String,
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct EmailContent {
    pub subject: String,
    pub html: String,
}

/// The congratulation email sent to the candidate.
/// Score and internal detail are deliberately left out.
pub fn candidate_email(request: &CompletionNotificationRequest) -> EmailContent {
    let name = escape_html(&request.candidate_name);
    let title = escape_html(&request.assessment_title);
    EmailContent {
        subject: format!("Your assessment \"{}\" is complete", request.assessment_title),
        html: format!(
            "<h2>Thank you, {name}!</h2>\
             <p>You have completed <strong>{title}</strong>. \
             Our team will review your results and get back to you shortly.</p>\
             <p>— The Hiring Team</p>"
        ),
    }
}

/// The internal summary email sent to the admin inbox.
pub fn admin_email(request: &CompletionNotificationRequest) -> EmailContent {
    let name = escape_html(&request.candidate_name);
    let title = escape_html(&request.assessment_title);
    let score_line = match request.overall_score {
        Some(score) => format!("<p>Overall score: <strong>{score:.1}/10</strong></p>"),
        None => "<p>Not yet graded.</p>".to_string(),
    };
    let completed_line = match request.completed_at {
        Some(at) => format!("<p>Completed at: {}</p>", at.format("%Y-%m-%d %H:%M UTC")),
        None => String::new(),
    };
    EmailContent {
        subject: format!(
            "Assessment completed: {} — {}",
            request.candidate_name, request.assessment_title
        ),
        html: format!(
            "<h2>Assessment completed</h2>\
             <p><strong>{name}</strong> ({email}) finished <strong>{title}</strong>.</p>\
             {score_line}{completed_line}",
            email = escape_html(&request.candidate_email),
        ),
    }
}

/// Minimal shape check for a recipient address. Not RFC-complete; it exists
/// to reject obviously broken input before the provider call.
pub fn is_valid_address(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !address.chars().any(char::is_whitespace)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_request() -> CompletionNotificationRequest {
        CompletionNotificationRequest {
            candidate_name: "Ada Lovelace".to_string(),
            candidate_email: "ada@example.com".to_string(),
            assessment_title: "Backend System Design".to_string(),
            overall_score: Some(8.25),
            completed_at: Some(Utc.with_ymd_and_hms(2025, 6, 1, 14, 30, 0).unwrap()),
        }
    }

    #[test]
    fn test_candidate_email_mentions_name_and_title() {
        let content = candidate_email(&make_request());
        assert!(content.subject.contains("Backend System Design"));
        assert!(content.html.contains("Ada Lovelace"));
        assert!(content.html.contains("Backend System Design"));
    }

    #[test]
    fn test_candidate_email_omits_score() {
        let content = candidate_email(&make_request());
        assert!(!content.html.contains("8.2"));
    }

    #[test]
    fn test_admin_email_formats_score_to_one_decimal() {
        let content = admin_email(&make_request());
        assert!(content.html.contains("8.2/10"));
        assert!(content.html.contains("ada@example.com"));
    }

    #[test]
    fn test_admin_email_without_score() {
        let mut request = make_request();
        request.overall_score = None;
        let content = admin_email(&request);
        assert!(content.html.contains("Not yet graded"));
    }

    #[test]
    fn test_admin_email_includes_completion_time() {
        let content = admin_email(&make_request());
        assert!(content.html.contains("2025-06-01 14:30 UTC"));
    }

    #[test]
    fn test_html_is_escaped() {
        let mut request = make_request();
        request.candidate_name = "<script>alert(1)</script>".to_string();
        let content = candidate_email(&request);
        assert!(!content.html.contains("<script>"));
        assert!(content.html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_valid_addresses() {
        assert!(is_valid_address("ada@example.com"));
        assert!(is_valid_address("first.last@sub.domain.io"));
    }

    #[test]
    fn test_invalid_addresses() {
        assert!(!is_valid_address("no-at-sign"));
        assert!(!is_valid_address("@example.com"));
        assert!(!is_valid_address("ada@nodot"));
        assert!(!is_valid_address("ada@.com"));
        assert!(!is_valid_address("ada @example.com"));
        assert!(!is_valid_address("ada@example.com "));
    }
}
