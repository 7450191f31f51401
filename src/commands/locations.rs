use crate::analytics;
use crate::db;
use crate::error::{self, CivitError};
use crate::format::Format;
use rusqlite::Connection;

pub fn run(conn: &Connection, fmt: Format) -> Result<(), CivitError> {
    let user = db::current_user(conn)?;
    let issues = db::user_issues(conn, user.id)?;

    let locations = analytics::unique_locations(&issues);
    if locations.is_empty() {
        error::exit_empty(fmt.is_json(), "No locations observed yet.");
    }

    match fmt {
        Format::Json => println!("{}", serde_json::to_string(&locations)?),
        Format::Compact => {
            for location in &locations {
                println!("LOCATION:{}", location);
            }
        }
        Format::Pretty => {
            println!("Locations ({}):", locations.len());
            for location in &locations {
                println!("  {}", location);
            }
        }
    }
    Ok(())
}
