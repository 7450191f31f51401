use crate::analytics;
use crate::commands::issues::parse_selection;
use crate::db;
use crate::error::CivitError;
use crate::format::{self, Format};
use crate::models::HeatmapView;
use chrono::Utc;
use rusqlite::Connection;

pub fn run(
    conn: &Connection,
    status: &str,
    location: &str,
    period: &str,
    limit: usize,
    fmt: Format,
) -> Result<(), CivitError> {
    let selection = parse_selection(status, location, period)?;

    // One load cycle: profile, then the issue snapshot, then pure recompute.
    let user = db::current_user(conn)?;
    let issues = db::user_issues(conn, user.id)?;
    log::debug!("loaded {} issues for user {}", issues.len(), user.id);

    let filtered = analytics::filter_issues(&issues, &selection, Utc::now().naive_utc());

    // Buckets come from the raw collection; rollups from the filtered set.
    let locations = analytics::unique_locations(&issues);
    let mut stats = analytics::compute_location_stats(&filtered, &locations);
    stats.truncate(limit);

    let view = HeatmapView {
        tracked: filtered.len() as i64,
        resolved: filtered.iter().filter(|i| i.status == "resolved").count() as i64,
        pending: filtered.iter().filter(|i| i.status == "pending").count() as i64,
        locations: locations.len() as i64,
        stats,
    };

    println!("{}", format::format_heatmap(&view, fmt));
    Ok(())
}
