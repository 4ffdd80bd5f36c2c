//! List and detail rendering for the profile collection.
//!
//! Pure string builders so rendering is testable without a terminal.
//! Layout mirrors the web UI: a summary row per profile (avatar, full
//! name, first-attend date) and a label/value detail block with `-` for
//! absent values.

use chrono::{DateTime, Utc};
use parokya_cache::{CacheEntry, FetchStatus};
use parokya_core::Profile;

use crate::avatar;

/// Detail rows, in display order: wire field name -> label.
pub const FIELD_LABELS: &[(&str, &str)] = &[
    ("first_name", "First name"),
    ("last_name", "Last name"),
    ("suffix", "Suffix"),
    ("gender", "Gender"),
    ("contact_number", "Contact #"),
    ("marital_status", "Marital status"),
    ("email", "Email"),
    ("created_at", "First attend"),
    ("address", "Address"),
];

/// `Apr 1, 2023` style rendering for first-attend dates.
pub fn format_attend_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y").to_string()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Absent values render as `-`, like the web UI.
fn or_dash(value: Option<String>) -> String {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "-".to_string(),
    }
}

/// One summary row: id, avatar badge, full name, first-attend date.
pub fn list_line(profile: &Profile) -> String {
    let name = profile.full_name();
    format!(
        "{:>4}  {}  {}  ({})",
        profile.id,
        avatar::badge(&name),
        name,
        format_attend_date(&profile.created_at),
    )
}

/// The label/value detail block for one profile.
pub fn detail_lines(profile: &Profile) -> Vec<String> {
    FIELD_LABELS
        .iter()
        .map(|(field, label)| {
            let value = match *field {
                "first_name" => Some(profile.first_name.clone()),
                "last_name" => Some(profile.last_name.clone()),
                "suffix" => profile.suffix.clone(),
                "gender" => profile.gender.map(|g| capitalize(g.as_str())),
                "contact_number" => profile.contact_number.clone(),
                "marital_status" => profile.marital_status.map(|m| capitalize(m.as_str())),
                "email" => profile.email.clone(),
                "created_at" => Some(format_attend_date(&profile.created_at)),
                "address" => profile
                    .address
                    .as_ref()
                    .map(|a| a.display_line())
                    .filter(|line| !line.is_empty()),
                _ => None,
            };
            format!("{label}: {}", or_dash(value))
        })
        .collect()
}

/// Render the whole cache entry: loading/error banners plus the rows.
pub fn render_list(entry: &CacheEntry) -> String {
    let mut out = String::new();
    match entry.status {
        FetchStatus::NotLoaded | FetchStatus::Loading if entry.generation == 0 => {
            return "Loading profiles...".to_string();
        }
        FetchStatus::Loading => out.push_str("(refreshing...)\n"),
        FetchStatus::Error => {
            if let Some(error) = &entry.error {
                out.push_str(&format!("(last refresh failed: {error})\n"));
            }
        }
        _ => {}
    }
    if entry.profiles.is_empty() {
        out.push_str("No profiles yet.");
    } else {
        for profile in &entry.profiles {
            out.push_str(&list_line(profile));
            out.push('\n');
        }
        out.push_str(&format!("{} profile(s)", entry.profiles.len()));
    }
    out
}
