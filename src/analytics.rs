//! Filtering and aggregation over a citizen's issue collection.
//!
//! Everything here is pure: the caller loads a snapshot from the store,
//! passes the clock in, and re-runs these on every filter change.

use crate::models::{Issue, LocationStat};
use chrono::{Duration, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Rolling time window measured backward from the current time.
///
/// Month and quarter are fixed 30/90-day approximations, not calendar-aware.
/// There is no "all time" option; a week is the narrowest window offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn from_str(s: &str) -> Option<Period> {
        match s {
            "week" => Some(Period::Week),
            "month" => Some(Period::Month),
            "quarter" => Some(Period::Quarter),
            "year" => Some(Period::Year),
            _ => None,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Period::Week => 7,
            Period::Month => 30,
            Period::Quarter => 90,
            Period::Year => 365,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Period::Month
    }
}

/// Filter state fed in by the presentation layer. `None` means "all".
#[derive(Debug, Clone, Default)]
pub struct FilterSelection {
    pub status: Option<String>,
    pub location: Option<String>,
    pub period: Period,
}

/// An issue passes if status, location, and period all match. Output preserves
/// the relative order of `issues`; empty input yields empty output.
pub fn filter_issues(issues: &[Issue], selection: &FilterSelection, now: NaiveDateTime) -> Vec<Issue> {
    let date_from = now - Duration::days(selection.period.days());

    issues
        .iter()
        .filter(|issue| {
            let matches_status = selection
                .status
                .as_deref()
                .map_or(true, |s| issue.status == s);

            let matches_location = selection
                .location
                .as_deref()
                .map_or(true, |loc| matches_location(issue, loc));

            // Unparseable timestamps fail the window test rather than erroring.
            let matches_period = parse_timestamp(&issue.created_at)
                .map_or(false, |created| created >= date_from);

            matches_status && matches_location && matches_period
        })
        .cloned()
        .collect()
}

/// Fuzzy OR over three independent fields: exact match on area or ward,
/// case-sensitive substring containment on location_name.
fn matches_location(issue: &Issue, location: &str) -> bool {
    issue.area.as_deref() == Some(location)
        || issue.ward.as_deref() == Some(location)
        || issue
            .location_name
            .as_deref()
            .map_or(false, |name| name.contains(location))
}

/// Distinct location buckets over the RAW (unfiltered) collection, in order of
/// first occurrence. Fallback order per issue: area, then ward, then
/// location_name; the first non-empty value wins, the rest are ignored.
pub fn unique_locations(issues: &[Issue]) -> Vec<String> {
    let mut locations: Vec<String> = Vec::new();
    for issue in issues {
        let bucket = [
            issue.area.as_deref(),
            issue.ward.as_deref(),
            issue.location_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty());

        if let Some(b) = bucket {
            if !locations.iter().any(|l| l == b) {
                locations.push(b.to_string());
            }
        }
    }
    locations
}

/// Per-location rollups over the already-filtered set, ranked by count
/// descending (stable, so ties keep enumeration order).
///
/// Matching here reuses the three-field OR of `filter_issues`, NOT the
/// first-non-empty bucketing of `unique_locations`. The asymmetry is
/// intentional and can count one issue under two locations when its area and
/// ward equal two different enumerated buckets.
pub fn compute_location_stats(filtered: &[Issue], locations: &[String]) -> Vec<LocationStat> {
    let mut stats: Vec<LocationStat> = locations
        .iter()
        .map(|location| {
            let matched: Vec<&Issue> = filtered
                .iter()
                .filter(|issue| matches_location(issue, location))
                .collect();

            let mut categories: Vec<String> = Vec::new();
            for issue in &matched {
                if !categories.contains(&issue.category) {
                    categories.push(issue.category.clone());
                }
            }

            LocationStat {
                location: location.clone(),
                count: matched.len() as i64,
                resolved: matched.iter().filter(|i| i.status == "resolved").count() as i64,
                pending: matched.iter().filter(|i| i.status == "pending").count() as i64,
                categories,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

fn parse_timestamp(iso: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(iso, TIMESTAMP_FORMAT).ok()
}
