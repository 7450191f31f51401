use crate::error::CivitError;
use crate::models::{Feedback, Issue, NewFeedback, Profile};
use rusqlite::{params, Connection, Row};
use std::env;
use std::path::{Path, PathBuf};

const SCHEMA: &str = r#"
PRAGMA journal_mode=WAL;
PRAGMA foreign_keys=ON;

CREATE TABLE IF NOT EXISTS profiles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    email           TEXT NOT NULL UNIQUE,
    first_name      TEXT NOT NULL DEFAULT '',
    last_name       TEXT NOT NULL DEFAULT '',
    created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);

CREATE TABLE IF NOT EXISTS issues (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    title           TEXT NOT NULL,
    description     TEXT NOT NULL DEFAULT '',
    status          TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'acknowledged', 'in_progress', 'resolved')),
    category        TEXT NOT NULL DEFAULT 'other',
    area            TEXT,
    ward            TEXT,
    location_name   TEXT,
    views_count     INTEGER NOT NULL DEFAULT 0,
    upvotes         INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
    updated_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);

CREATE TABLE IF NOT EXISTS feedback (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES profiles(id) ON DELETE CASCADE,
    type            TEXT NOT NULL DEFAULT 'suggestion'
                    CHECK (type IN ('suggestion', 'complaint', 'compliment', 'inquiry')),
    subject         TEXT NOT NULL,
    message         TEXT NOT NULL,
    priority        TEXT NOT NULL DEFAULT 'medium'
                    CHECK (priority IN ('low', 'medium', 'high')),
    status          TEXT NOT NULL DEFAULT 'pending'
                    CHECK (status IN ('pending', 'responded', 'closed')),
    contact_email   TEXT,
    admin_response  TEXT,
    responded_at    TEXT,
    created_at      TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
);

CREATE TABLE IF NOT EXISTS config (
    key             TEXT PRIMARY KEY,
    value           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_issues_user ON issues(user_id);
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_category ON issues(category);
CREATE INDEX IF NOT EXISTS idx_feedback_user ON feedback(user_id);

CREATE TRIGGER IF NOT EXISTS trg_issues_updated_at
    AFTER UPDATE ON issues
    FOR EACH ROW
BEGIN
    UPDATE issues SET updated_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
    WHERE id = OLD.id;
END;
"#;

const SESSION_KEY: &str = "session.user_id";

pub fn find_db(override_path: Option<&str>) -> Result<PathBuf, CivitError> {
    // Check env var
    if let Ok(path) = env::var("CIVIT_DB_PATH") {
        return Ok(PathBuf::from(path));
    }

    // Check CLI override
    if let Some(p) = override_path {
        return Ok(PathBuf::from(p));
    }

    // Walk up from cwd
    let mut dir = env::current_dir().map_err(CivitError::Io)?;
    loop {
        let candidate = dir.join(".civit.db");
        if candidate.exists() {
            return Ok(candidate);
        }
        if !dir.pop() {
            return Err(CivitError::NoDatabase);
        }
    }
}

pub fn open_db(path: &Path) -> Result<Connection, CivitError> {
    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(path: &Path) -> Result<Connection, CivitError> {
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

// --- Profiles & session ---

fn profile_from_row(row: &Row) -> rusqlite::Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        created_at: row.get(4)?,
    })
}

pub fn profile_by_email(conn: &Connection, email: &str) -> Result<Option<Profile>, CivitError> {
    match conn.query_row(
        "SELECT id, email, first_name, last_name, created_at FROM profiles WHERE email = ?1",
        params![email],
        profile_from_row,
    ) {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(CivitError::Db(e)),
    }
}

pub fn profile_by_id(conn: &Connection, id: i64) -> Result<Option<Profile>, CivitError> {
    match conn.query_row(
        "SELECT id, email, first_name, last_name, created_at FROM profiles WHERE id = ?1",
        params![id],
        profile_from_row,
    ) {
        Ok(p) => Ok(Some(p)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(CivitError::Db(e)),
    }
}

/// Create or refresh a profile keyed by email. Name fields only overwrite
/// when explicitly provided.
pub fn upsert_profile(
    conn: &Connection,
    email: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<Profile, CivitError> {
    match profile_by_email(conn, email)? {
        Some(existing) => {
            if first_name.is_some() || last_name.is_some() {
                conn.execute(
                    "UPDATE profiles SET first_name = COALESCE(?1, first_name),
                                         last_name = COALESCE(?2, last_name)
                     WHERE id = ?3",
                    params![first_name, last_name, existing.id],
                )?;
            }
            Ok(profile_by_id(conn, existing.id)?.unwrap_or(existing))
        }
        None => {
            conn.execute(
                "INSERT INTO profiles (email, first_name, last_name) VALUES (?1, ?2, ?3)",
                params![email, first_name.unwrap_or(""), last_name.unwrap_or("")],
            )?;
            let id = conn.last_insert_rowid();
            conn.query_row(
                "SELECT id, email, first_name, last_name, created_at FROM profiles WHERE id = ?1",
                params![id],
                profile_from_row,
            )
            .map_err(CivitError::Db)
        }
    }
}

pub fn set_session(conn: &Connection, user_id: i64) -> Result<(), CivitError> {
    config_set(conn, SESSION_KEY, &user_id.to_string())
}

/// Resolve the logged-in user's profile. The local store has no separate auth
/// identity, so the session row resolves straight to a profile.
pub fn current_user(conn: &Connection) -> Result<Profile, CivitError> {
    let id = config_get(conn, SESSION_KEY)?
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or(CivitError::NoSession)?;
    profile_by_id(conn, id)?.ok_or(CivitError::NoSession)
}

// --- Issues ---

fn issue_from_row(row: &Row) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        status: row.get(4)?,
        category: row.get(5)?,
        area: row.get(6)?,
        ward: row.get(7)?,
        location_name: row.get(8)?,
        views_count: row.get(9)?,
        upvotes: row.get(10)?,
        created_at: row.get(11)?,
        updated_at: row.get(12)?,
    })
}

const ISSUE_COLUMNS: &str = "id, user_id, title, description, status, category, area, ward, location_name, views_count, upvotes, created_at, updated_at";

#[allow(clippy::too_many_arguments)]
pub fn insert_issue(
    conn: &Connection,
    user_id: i64,
    title: &str,
    description: &str,
    category: &str,
    area: Option<&str>,
    ward: Option<&str>,
    location_name: Option<&str>,
) -> Result<Issue, CivitError> {
    conn.execute(
        "INSERT INTO issues (user_id, title, description, category, area, ward, location_name)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![user_id, title, description, category, area, ward, location_name],
    )?;
    let id = conn.last_insert_rowid();
    get_issue(conn, id)
}

pub fn get_issue(conn: &Connection, id: i64) -> Result<Issue, CivitError> {
    conn.query_row(
        &format!("SELECT {} FROM issues WHERE id = ?1", ISSUE_COLUMNS),
        params![id],
        issue_from_row,
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => CivitError::NotFound(id),
        other => CivitError::Db(other),
    })
}

pub fn update_issue_status(conn: &Connection, id: i64, status: &str) -> Result<(), CivitError> {
    let changed = conn.execute(
        "UPDATE issues SET status = ?1 WHERE id = ?2",
        params![status, id],
    )?;
    if changed == 0 {
        return Err(CivitError::NotFound(id));
    }
    Ok(())
}

/// The load-cycle snapshot: every issue the user has submitted, newest first.
pub fn user_issues(conn: &Connection, user_id: i64) -> Result<Vec<Issue>, CivitError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM issues WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        ISSUE_COLUMNS
    ))?;
    let issues: Vec<Issue> = stmt
        .query_map(params![user_id], issue_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(issues)
}

// --- Feedback ---

fn feedback_from_row(row: &Row) -> rusqlite::Result<Feedback> {
    Ok(Feedback {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: row.get(2)?,
        subject: row.get(3)?,
        message: row.get(4)?,
        priority: row.get(5)?,
        status: row.get(6)?,
        contact_email: row.get(7)?,
        admin_response: row.get(8)?,
        responded_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

const FEEDBACK_COLUMNS: &str = "id, user_id, type, subject, message, priority, status, contact_email, admin_response, responded_at, created_at";

pub fn user_feedback(conn: &Connection, user_id: i64) -> Result<Vec<Feedback>, CivitError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM feedback WHERE user_id = ?1 ORDER BY created_at DESC, id DESC",
        FEEDBACK_COLUMNS
    ))?;
    let feedback: Vec<Feedback> = stmt
        .query_map(params![user_id], feedback_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(feedback)
}

pub fn insert_feedback(conn: &Connection, record: &NewFeedback) -> Result<Feedback, CivitError> {
    conn.execute(
        "INSERT INTO feedback (user_id, type, subject, message, priority, contact_email, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.user_id,
            record.kind,
            record.subject,
            record.message,
            record.priority,
            record.contact_email,
            record.status
        ],
    )?;
    let id = conn.last_insert_rowid();
    conn.query_row(
        &format!("SELECT {} FROM feedback WHERE id = ?1", FEEDBACK_COLUMNS),
        params![id],
        feedback_from_row,
    )
    .map_err(CivitError::Db)
}

pub fn count_feedback(conn: &Connection, user_id: i64) -> Result<i64, CivitError> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM feedback WHERE user_id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

// --- Config ---

pub fn config_get(conn: &Connection, key: &str) -> Result<Option<String>, CivitError> {
    match conn.query_row(
        "SELECT value FROM config WHERE key = ?1",
        params![key],
        |row| row.get::<_, String>(0),
    ) {
        Ok(val) => Ok(Some(val)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(CivitError::Db(e)),
    }
}

pub fn config_set(conn: &Connection, key: &str, value: &str) -> Result<(), CivitError> {
    conn.execute(
        "INSERT OR REPLACE INTO config (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    fn login(conn: &Connection, email: &str) -> Profile {
        let profile = upsert_profile(conn, email, Some("Ada"), None).unwrap();
        set_session(conn, profile.id).unwrap();
        profile
    }

    #[test]
    fn current_user_without_session_is_no_session() {
        let conn = test_conn();
        let err = current_user(&conn).unwrap_err();
        assert_eq!(err.error_code(), "NO_SESSION");
    }

    #[test]
    fn login_then_current_user_round_trips() {
        let conn = test_conn();
        let profile = login(&conn, "ada@example.org");
        let current = current_user(&conn).unwrap();
        assert_eq!(current.id, profile.id);
        assert_eq!(current.email, "ada@example.org");
        assert_eq!(current.first_name, "Ada");
    }

    #[test]
    fn upsert_keeps_existing_names_when_not_provided() {
        let conn = test_conn();
        login(&conn, "ada@example.org");
        let again = upsert_profile(&conn, "ada@example.org", None, None).unwrap();
        assert_eq!(again.first_name, "Ada");
    }

    #[test]
    fn new_issue_defaults_to_pending_with_zero_counters() {
        let conn = test_conn();
        let user = login(&conn, "ada@example.org");
        let issue = insert_issue(
            &conn,
            user.id,
            "Pothole on Main St",
            "",
            "roads",
            Some("Ward 5"),
            None,
            Some("Near Ward 5 Market"),
        )
        .unwrap();
        assert_eq!(issue.status, "pending");
        assert_eq!(issue.views_count, 0);
        assert_eq!(issue.upvotes, 0);
        assert_eq!(issue.area.as_deref(), Some("Ward 5"));
        assert!(issue.ward.is_none());
    }

    #[test]
    fn update_status_of_missing_issue_is_not_found() {
        let conn = test_conn();
        let err = update_issue_status(&conn, 99, "resolved").unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
    }

    #[test]
    fn update_status_round_trips() {
        let conn = test_conn();
        let user = login(&conn, "ada@example.org");
        let issue =
            insert_issue(&conn, user.id, "Broken lamp", "", "utilities", None, None, None).unwrap();
        update_issue_status(&conn, issue.id, "resolved").unwrap();
        assert_eq!(get_issue(&conn, issue.id).unwrap().status, "resolved");
    }

    #[test]
    fn user_issues_only_returns_that_users_rows() {
        let conn = test_conn();
        let ada = upsert_profile(&conn, "ada@example.org", None, None).unwrap();
        let bob = upsert_profile(&conn, "bob@example.org", None, None).unwrap();
        insert_issue(&conn, ada.id, "Ada's issue", "", "roads", None, None, None).unwrap();
        insert_issue(&conn, bob.id, "Bob's issue", "", "parks", None, None, None).unwrap();

        let issues = user_issues(&conn, ada.id).unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].title, "Ada's issue");
    }

    #[test]
    fn feedback_insert_round_trips_with_forced_status() {
        let conn = test_conn();
        let user = login(&conn, "ada@example.org");
        let record = NewFeedback {
            user_id: user.id,
            kind: "complaint".to_string(),
            subject: "Slow repairs".to_string(),
            message: "Pothole open for months".to_string(),
            priority: "high".to_string(),
            contact_email: Some(user.email.clone()),
            status: "pending".to_string(),
        };
        let saved = insert_feedback(&conn, &record).unwrap();
        assert_eq!(saved.status, "pending");
        assert_eq!(saved.kind, "complaint");
        assert!(saved.admin_response.is_none());

        let listed = user_feedback(&conn, user.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(count_feedback(&conn, user.id).unwrap(), 1);
    }
}
