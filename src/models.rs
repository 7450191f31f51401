use serde::{Deserialize, Serialize};

use crate::error::CivitError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: String,
}

impl Profile {
    /// Avatar initial: first name, falling back to email.
    pub fn initial(&self) -> char {
        self.first_name
            .chars()
            .next()
            .or_else(|| self.email.chars().next())
            .unwrap_or('U')
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,
    pub views_count: i64,
    pub upvotes: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub message: String,
    pub priority: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<String>,
    pub created_at: String,
}

/// Feedback form state as entered by the citizen, before submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackForm {
    #[serde(rename = "type", default = "default_kind")]
    pub kind: String,
    pub subject: String,
    pub message: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_kind() -> String {
    "suggestion".to_string()
}

fn default_priority() -> String {
    "medium".to_string()
}

impl FeedbackForm {
    /// Required-field gate. Runs before any write is attempted; an empty
    /// subject or message blocks submission outright.
    pub fn validate(&self) -> Result<(), CivitError> {
        if self.subject.is_empty() {
            return Err(CivitError::Validation {
                field: "subject".to_string(),
            });
        }
        if self.message.is_empty() {
            return Err(CivitError::Validation {
                field: "message".to_string(),
            });
        }
        Ok(())
    }
}

/// Fully-assembled feedback record handed to the store. Built only after
/// `FeedbackForm::validate` passes; `status` is always forced to `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    pub user_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub message: String,
    pub priority: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    pub status: String,
}

/// Per-location rollup for the heatmap. Recomputed on every filter change,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationStat {
    pub location: String,
    pub count: i64,
    pub resolved: i64,
    pub pending: i64,
    pub categories: Vec<String>,
}

/// One full heatmap render: quick stats over the filtered set plus the
/// ranked location cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatmapView {
    pub tracked: i64,
    pub resolved: i64,
    pub pending: i64,
    pub locations: i64,
    pub stats: Vec<LocationStat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackView {
    pub total: i64,
    pub responded: i64,
    pub pending: i64,
    pub items: Vec<Feedback>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total: i64,
    pub by_status: std::collections::HashMap<String, i64>,
    pub by_category: std::collections::HashMap<String, i64>,
    pub views: i64,
    pub upvotes: i64,
    pub feedback_total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(subject: &str, message: &str) -> FeedbackForm {
        FeedbackForm {
            kind: "suggestion".to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            priority: "medium".to_string(),
        }
    }

    #[test]
    fn empty_subject_blocks_submission() {
        let err = form("", "please add benches").validate().unwrap_err();
        assert!(err.to_string().contains("subject"));
    }

    #[test]
    fn empty_message_blocks_submission() {
        let err = form("Benches", "").validate().unwrap_err();
        assert!(err.to_string().contains("message"));
    }

    #[test]
    fn filled_form_passes() {
        assert!(form("Benches", "please add benches").validate().is_ok());
    }

    #[test]
    fn whitespace_only_fields_pass() {
        // Matches the original screen's falsy check: only the empty string
        // counts as missing.
        assert!(form(" ", " ").validate().is_ok());
    }

    #[test]
    fn profile_initial_falls_back_to_email() {
        let p = Profile {
            id: 1,
            email: "ada@example.org".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            created_at: "2025-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(p.initial(), 'a');
    }
}
