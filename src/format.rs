use crate::models::{Feedback, FeedbackView, HeatmapView, Issue, Summary};
use chrono::NaiveDateTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Format {
    Compact,
    Json,
    Pretty,
}

impl Format {
    pub fn from_str(s: &str) -> Option<Format> {
        match s {
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            "pretty" => Some(Format::Pretty),
            _ => None,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Format::Json)
    }
}

/// "Sep 3"-style short date. Falls back to the raw string when the timestamp
/// does not parse.
pub fn short_date(iso: &str) -> String {
    match NaiveDateTime::parse_from_str(iso, "%Y-%m-%dT%H:%M:%SZ") {
        Ok(dt) => dt.format("%b %-d").to_string(),
        Err(_) => iso.to_string(),
    }
}

/// Display label for a status value: "in_progress" becomes "In Progress".
pub fn status_label(status: &str) -> String {
    status
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// --- Heatmap ---

pub fn format_heatmap(view: &HeatmapView, fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(view).unwrap_or_default(),
        Format::Compact => format_heatmap_compact(view),
        Format::Pretty => format_heatmap_pretty(view),
    }
}

fn format_heatmap_compact(view: &HeatmapView) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "TRACKED:{} RESOLVED:{} PENDING:{} LOCATIONS:{}",
        view.tracked, view.resolved, view.pending, view.locations
    ));
    for stat in &view.stats {
        let mut line = format!(
            "LOCATION:{} COUNT:{} RESOLVED:{} PENDING:{}",
            stat.location, stat.count, stat.resolved, stat.pending
        );
        if !stat.categories.is_empty() {
            line.push_str(&format!(" CATEGORIES:{}", stat.categories.join(",")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

fn format_heatmap_pretty(view: &HeatmapView) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Issue Analytics — {} issues tracked", view.tracked));
    lines.push(format!(
        "  Resolved: {}  Pending: {}  Locations: {}",
        view.resolved, view.pending, view.locations
    ));
    if !view.stats.is_empty() {
        lines.push(String::new());
    }
    for (rank, stat) in view.stats.iter().enumerate() {
        let noun = if stat.count == 1 { "issue" } else { "issues" };
        let mut line = format!(
            " #{:<2} {:24} {:>3} {} ({} resolved, {} pending)",
            rank + 1,
            stat.location,
            stat.count,
            noun,
            stat.resolved,
            stat.pending
        );
        if !stat.categories.is_empty() {
            // Only the first three category chips fit on a card.
            let mut chips: Vec<String> = stat.categories.iter().take(3).cloned().collect();
            if stat.categories.len() > 3 {
                chips.push(format!("+{}", stat.categories.len() - 3));
            }
            line.push_str(&format!("  [{}]", chips.join(", ")));
        }
        lines.push(line);
    }
    lines.join("\n")
}

// --- Issue timeline & detail ---

pub fn format_issue_list(issues: &[Issue], fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(issues).unwrap_or_default(),
        Format::Compact => issues
            .iter()
            .map(format_issue_compact)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Format::Pretty => format_issue_list_pretty(issues),
    }
}

pub fn format_issue_detail(issue: &Issue, fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(issue).unwrap_or_default(),
        Format::Compact => format_issue_compact(issue),
        Format::Pretty => format_issue_pretty(issue),
    }
}

fn format_issue_compact(i: &Issue) -> String {
    let mut lines = vec![format!(
        "ID:{} STATUS:{} CATEGORY:{} VIEWS:{} UPVOTES:{}",
        i.id, i.status, i.category, i.views_count, i.upvotes
    )];
    lines.push(format!("TITLE: {}", i.title));
    if !i.description.is_empty() {
        lines.push(format!("DESCRIPTION: {}", i.description));
    }
    if let Some(ref area) = i.area {
        lines.push(format!("AREA: {}", area));
    }
    if let Some(ref ward) = i.ward {
        lines.push(format!("WARD: {}", ward));
    }
    if let Some(ref name) = i.location_name {
        lines.push(format!("LOCATION: {}", name));
    }
    lines.push(format!("CREATED: {}", i.created_at));
    lines.join("\n")
}

fn format_issue_pretty(i: &Issue) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Issue #{}: {}", i.id, i.title));
    lines.push(format!(
        "  Status: {}  Category: {}  Views: {}  Upvotes: {}",
        status_label(&i.status),
        i.category,
        i.views_count,
        i.upvotes
    ));
    if !i.description.is_empty() {
        lines.push(format!("  Description: {}", i.description));
    }
    if let Some(ref name) = i.location_name {
        lines.push(format!("  Location: {}", name));
    }
    lines.push(format!("  Reported: {}", short_date(&i.created_at)));
    lines.join("\n")
}

fn format_issue_list_pretty(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return String::new();
    }
    let mut lines = Vec::new();
    lines.push(format!(
        " {:>3} | {:11} | {:11} | {:6} | {:40} | Location",
        "#", "Status", "Category", "Date", "Title"
    ));
    lines.push(
        "-----|-------------|-------------|--------|------------------------------------------|---------"
            .to_string(),
    );
    for i in issues {
        // Truncate on char boundaries; titles are free text and may be multibyte.
        let title = if i.title.chars().count() > 40 {
            let prefix: String = i.title.chars().take(37).collect();
            format!("{}...", prefix)
        } else {
            i.title.clone()
        };
        let location = i.location_name.as_deref().unwrap_or("");
        lines.push(format!(
            " {:>3} | {:11} | {:11} | {:6} | {:40} | {}",
            i.id,
            i.status,
            i.category,
            short_date(&i.created_at),
            title,
            location
        ));
    }
    lines.join("\n")
}

// --- Feedback ---

pub fn format_feedback_view(view: &FeedbackView, fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(view).unwrap_or_default(),
        Format::Compact => {
            let mut lines = vec![format!(
                "TOTAL:{} RESPONDED:{} PENDING:{}",
                view.total, view.responded, view.pending
            )];
            for f in &view.items {
                lines.push(String::new());
                lines.push(format_feedback_compact(f));
            }
            lines.join("\n")
        }
        Format::Pretty => {
            let mut lines = vec![format!(
                "Feedback — {} total ({} responded, {} pending)",
                view.total, view.responded, view.pending
            )];
            for f in &view.items {
                lines.push(String::new());
                lines.push(format_feedback_pretty(f));
            }
            lines.join("\n")
        }
    }
}

pub fn format_feedback_item(feedback: &Feedback, fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(feedback).unwrap_or_default(),
        Format::Compact => format_feedback_compact(feedback),
        Format::Pretty => format_feedback_pretty(feedback),
    }
}

fn format_feedback_compact(f: &Feedback) -> String {
    let mut lines = vec![format!(
        "FEEDBACK:{} TYPE:{} PRIORITY:{} STATUS:{}",
        f.id, f.kind, f.priority, f.status
    )];
    lines.push(format!("SUBJECT: {}", f.subject));
    lines.push(format!("MESSAGE: {}", f.message));
    if let Some(ref response) = f.admin_response {
        lines.push(format!("RESPONSE: {}", response));
    }
    lines.push(format!("CREATED: {}", f.created_at));
    lines.join("\n")
}

fn format_feedback_pretty(f: &Feedback) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "[{}] {} ({}, {} priority)",
        short_date(&f.created_at),
        f.subject,
        f.kind,
        f.priority
    ));
    lines.push(format!("  {}", f.message));
    match f.admin_response {
        Some(ref response) => lines.push(format!("  Response: {}", response)),
        None => lines.push(format!("  Status: {}", status_label(&f.status))),
    }
    lines.join("\n")
}

// --- Summary ---

pub fn format_summary(summary: &Summary, fmt: Format) -> String {
    match fmt {
        Format::Json => serde_json::to_string(summary).unwrap_or_default(),
        _ => format_summary_compact(summary),
    }
}

fn format_summary_compact(summary: &Summary) -> String {
    let mut lines = Vec::new();
    lines.push(format!("TOTAL:{}", summary.total));
    lines.push(format!(
        "BY_STATUS: pending={} acknowledged={} in_progress={} resolved={}",
        summary.by_status.get("pending").unwrap_or(&0),
        summary.by_status.get("acknowledged").unwrap_or(&0),
        summary.by_status.get("in_progress").unwrap_or(&0),
        summary.by_status.get("resolved").unwrap_or(&0),
    ));

    // Categories are free-form; list them by count, then name, for stable output.
    let mut categories: Vec<(&String, &i64)> = summary.by_category.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    let category_str = categories
        .iter()
        .map(|(name, count)| format!("{}={}", name, count))
        .collect::<Vec<_>>()
        .join(" ");
    lines.push(format!("BY_CATEGORY: {}", category_str));

    lines.push(format!("VIEWS:{} UPVOTES:{}", summary.views, summary.upvotes));
    lines.push(format!("FEEDBACK:{}", summary.feedback_total));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationStat;

    #[test]
    fn short_date_renders_month_and_day() {
        assert_eq!(short_date("2025-09-03T10:00:00Z"), "Sep 3");
    }

    #[test]
    fn short_date_falls_back_to_raw_input() {
        assert_eq!(short_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn status_label_title_cases_snake_case() {
        assert_eq!(status_label("in_progress"), "In Progress");
        assert_eq!(status_label("pending"), "Pending");
    }

    fn view_with(categories: Vec<&str>) -> HeatmapView {
        HeatmapView {
            tracked: 2,
            resolved: 1,
            pending: 1,
            locations: 1,
            stats: vec![LocationStat {
                location: "Ward 5".to_string(),
                count: 2,
                resolved: 1,
                pending: 1,
                categories: categories.into_iter().map(str::to_string).collect(),
            }],
        }
    }

    #[test]
    fn compact_heatmap_lists_every_card() {
        let out = format_heatmap(&view_with(vec!["roads"]), Format::Compact);
        assert!(out.starts_with("TRACKED:2 RESOLVED:1 PENDING:1 LOCATIONS:1"));
        assert!(out.contains("LOCATION:Ward 5 COUNT:2 RESOLVED:1 PENDING:1 CATEGORIES:roads"));
    }

    #[test]
    fn pretty_heatmap_truncates_category_chips_to_three() {
        let out = format_heatmap(
            &view_with(vec!["roads", "parks", "safety", "utilities"]),
            Format::Pretty,
        );
        assert!(out.contains("[roads, parks, safety, +1]"));
        assert!(!out.contains("utilities"));
    }

    #[test]
    fn json_heatmap_is_valid_json() {
        let out = format_heatmap(&view_with(vec!["roads"]), Format::Json);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["stats"][0]["location"], "Ward 5");
    }

    fn titled_issue(title: &str) -> Issue {
        Issue {
            id: 1,
            user_id: 1,
            title: title.to_string(),
            description: String::new(),
            status: "pending".to_string(),
            category: "roads".to_string(),
            area: None,
            ward: None,
            location_name: None,
            views_count: 0,
            upvotes: 0,
            created_at: "2025-06-01T10:00:00Z".to_string(),
            updated_at: "2025-06-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn pretty_list_renders_multibyte_titles() {
        // 25 chars but 50 bytes; must render untruncated, not slice mid-char.
        let short = "é".repeat(25);
        let out = format_issue_list(&[titled_issue(&short)], Format::Pretty);
        assert!(out.contains(&short));
    }

    #[test]
    fn pretty_list_truncates_long_multibyte_titles_on_char_boundaries() {
        let long = "é".repeat(45);
        let out = format_issue_list(&[titled_issue(&long)], Format::Pretty);
        let expected = format!("{}...", "é".repeat(37));
        assert!(out.contains(&expected));
        assert!(!out.contains(&long));
    }
}
