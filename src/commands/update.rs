use crate::db;
use crate::error::CivitError;
use crate::format::{self, Format};
use rusqlite::Connection;

pub fn run(conn: &Connection, id: i64, status: &str, fmt: Format) -> Result<(), CivitError> {
    validate_status(status)?;
    db::update_issue_status(conn, id, status)?;

    let issue = db::get_issue(conn, id)?;
    println!("{}", format::format_issue_detail(&issue, fmt));
    Ok(())
}

pub fn validate_status(s: &str) -> Result<(), CivitError> {
    match s {
        "pending" | "acknowledged" | "in_progress" | "resolved" => Ok(()),
        _ => Err(CivitError::InvalidValue {
            field: "status".to_string(),
            value: s.to_string(),
            valid: "pending, acknowledged, in_progress, resolved".to_string(),
        }),
    }
}
