use crate::analytics::{self, FilterSelection, Period};
use crate::commands::update::validate_status;
use crate::db;
use crate::error::{self, CivitError};
use crate::format::{self, Format};
use chrono::Utc;
use rusqlite::Connection;

/// Turn CLI filter flags into a pipeline selection. "all" disables a
/// dimension; the period has no "all" setting.
pub fn parse_selection(
    status: &str,
    location: &str,
    period: &str,
) -> Result<FilterSelection, CivitError> {
    let status = match status {
        "all" => None,
        s => {
            validate_status(s)?;
            Some(s.to_string())
        }
    };

    let location = match location {
        "all" => None,
        l => Some(l.to_string()),
    };

    let period = Period::from_str(period).ok_or_else(|| CivitError::InvalidValue {
        field: "period".to_string(),
        value: period.to_string(),
        valid: "week, month, quarter, year".to_string(),
    })?;

    Ok(FilterSelection {
        status,
        location,
        period,
    })
}

pub fn run(
    conn: &Connection,
    status: &str,
    location: &str,
    period: &str,
    limit: usize,
    fmt: Format,
) -> Result<(), CivitError> {
    let selection = parse_selection(status, location, period)?;
    let user = db::current_user(conn)?;
    let issues = db::user_issues(conn, user.id)?;
    log::debug!("loaded {} issues for user {}", issues.len(), user.id);

    let mut filtered = analytics::filter_issues(&issues, &selection, Utc::now().naive_utc());
    if filtered.is_empty() {
        error::exit_empty(fmt.is_json(), "No matching issues found.");
    }

    filtered.truncate(limit);

    println!("{}", format::format_issue_list(&filtered, fmt));
    Ok(())
}
