use crate::db;
use crate::error::CivitError;
use crate::format::Format;
use rusqlite::Connection;

pub fn run(
    conn: &Connection,
    email: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
    fmt: Format,
) -> Result<(), CivitError> {
    if email.is_empty() {
        return Err(CivitError::InvalidValue {
            field: "email".to_string(),
            value: String::new(),
            valid: "non-empty email address".to_string(),
        });
    }

    let profile = db::upsert_profile(conn, email, first_name, last_name)?;
    db::set_session(conn, profile.id)?;
    log::debug!("session set to user {}", profile.id);

    match fmt {
        Format::Json => println!("{}", serde_json::to_string(&profile)?),
        Format::Compact => println!("USER:{} EMAIL:{}", profile.id, profile.email),
        Format::Pretty => println!("Logged in as {} [{}]", profile.email, profile.initial()),
    }
    Ok(())
}
