use crate::db;
use crate::error::{self, CivitError};
use crate::format::{self, Format};
use crate::models::{FeedbackForm, FeedbackView, NewFeedback};
use rusqlite::Connection;

pub fn run_list(conn: &Connection, fmt: Format) -> Result<(), CivitError> {
    let user = db::current_user(conn)?;
    let items = db::user_feedback(conn, user.id)?;
    if items.is_empty() {
        error::exit_empty(fmt.is_json(), "No feedback submitted yet.");
    }

    let view = FeedbackView {
        total: items.len() as i64,
        responded: items.iter().filter(|f| f.status == "responded").count() as i64,
        pending: items.iter().filter(|f| f.status == "pending").count() as i64,
        items,
    };

    println!("{}", format::format_feedback_view(&view, fmt));
    Ok(())
}

pub fn run_submit(
    conn: &Connection,
    subject: &str,
    message: &str,
    kind: &str,
    priority: &str,
    fmt: Format,
) -> Result<(), CivitError> {
    validate_kind(kind)?;
    validate_priority(priority)?;

    let form = FeedbackForm {
        kind: kind.to_string(),
        subject: subject.to_string(),
        message: message.to_string(),
        priority: priority.to_string(),
    };
    // Validation failures block before anything touches the store.
    form.validate()?;

    let user = db::current_user(conn)?;
    let record = NewFeedback {
        user_id: user.id,
        kind: form.kind,
        subject: form.subject,
        message: form.message,
        priority: form.priority,
        contact_email: Some(user.email.clone()),
        // Always enters the queue as pending, whatever the caller says.
        status: "pending".to_string(),
    };

    let saved = db::insert_feedback(conn, &record)?;
    log::debug!("feedback {} submitted by user {}", saved.id, user.id);

    println!("{}", format::format_feedback_item(&saved, fmt));
    Ok(())
}

pub fn validate_kind(k: &str) -> Result<(), CivitError> {
    match k {
        "suggestion" | "complaint" | "compliment" | "inquiry" => Ok(()),
        _ => Err(CivitError::InvalidValue {
            field: "kind".to_string(),
            value: k.to_string(),
            valid: "suggestion, complaint, compliment, inquiry".to_string(),
        }),
    }
}

pub fn validate_priority(p: &str) -> Result<(), CivitError> {
    match p {
        "low" | "medium" | "high" => Ok(()),
        _ => Err(CivitError::InvalidValue {
            field: "priority".to_string(),
            value: p.to_string(),
            valid: "low, medium, high".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_priority_validation() {
        assert!(validate_kind("inquiry").is_ok());
        assert!(validate_kind("rant").is_err());
        assert!(validate_priority("high").is_ok());
        assert!(validate_priority("urgent").is_err());
    }

    #[test]
    fn invalid_form_never_touches_the_store() {
        // No schema here: any store call would surface as a Db error, so a
        // Validation error proves submission stopped at the gate.
        let conn = Connection::open_in_memory().unwrap();
        let err = run_submit(&conn, "Benches", "", "suggestion", "medium", Format::Compact)
            .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION");
    }
}
