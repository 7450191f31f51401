use crate::db;
use crate::error::CivitError;
use crate::format::{self, Format};
use rusqlite::Connection;

#[allow(clippy::too_many_arguments)]
pub fn run(
    conn: &Connection,
    title: &str,
    description: Option<&str>,
    category: &str,
    area: Option<&str>,
    ward: Option<&str>,
    location_name: Option<&str>,
    fmt: Format,
) -> Result<(), CivitError> {
    if title.is_empty() {
        return Err(CivitError::InvalidValue {
            field: "title".to_string(),
            value: String::new(),
            valid: "non-empty string".to_string(),
        });
    }

    let user = db::current_user(conn)?;
    let issue = db::insert_issue(
        conn,
        user.id,
        title,
        description.unwrap_or(""),
        category,
        area,
        ward,
        location_name,
    )?;
    log::debug!("issue {} reported by user {}", issue.id, user.id);

    println!("{}", format::format_issue_detail(&issue, fmt));
    Ok(())
}
