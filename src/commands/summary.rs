use crate::db;
use crate::error::CivitError;
use crate::format::{self, Format};
use crate::models::Summary;
use rusqlite::Connection;
use std::collections::HashMap;

pub fn run(conn: &Connection, fmt: Format) -> Result<(), CivitError> {
    let user = db::current_user(conn)?;
    let issues = db::user_issues(conn, user.id)?;
    let feedback_total = db::count_feedback(conn, user.id)?;

    let mut by_status: HashMap<String, i64> = HashMap::new();
    let mut by_category: HashMap<String, i64> = HashMap::new();

    // Initialize all known statuses to 0; categories are free-form and only
    // appear once observed.
    for s in &["pending", "acknowledged", "in_progress", "resolved"] {
        by_status.insert((*s).to_string(), 0);
    }

    let mut views = 0i64;
    let mut upvotes = 0i64;

    for issue in &issues {
        *by_status.entry(issue.status.clone()).or_insert(0) += 1;
        *by_category.entry(issue.category.clone()).or_insert(0) += 1;
        views += issue.views_count;
        upvotes += issue.upvotes;
    }

    let summary = Summary {
        total: issues.len() as i64,
        by_status,
        by_category,
        views,
        upvotes,
        feedback_total,
    };

    println!("{}", format::format_summary(&summary, fmt));
    Ok(())
}
