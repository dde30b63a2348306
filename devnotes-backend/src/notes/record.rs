//! Map a raw frontmatter header onto a typed `NoteFrontMatter`.
//!
//! Validation failures are returned as a `NoteRejection` so callers can log
//! the reason; the repository collapses every rejection to "not found".

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use super::frontmatter::Header;
use crate::config::is_truthy;
use crate::models::NoteFrontMatter;

/// Why a note was excluded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteRejection {
    #[error("no frontmatter block")]
    NoFrontmatter,
    #[error("missing title")]
    MissingTitle,
    #[error("missing date")]
    MissingDate,
    #[error("unparseable date: {0:?}")]
    UnparseableDate(String),
    #[error("unreadable file: {0}")]
    Unreadable(String),
}

/// Build the typed header, or explain why the note is invalid.
pub fn build_frontmatter(header: &Header) -> Result<NoteFrontMatter, NoteRejection> {
    let title = header
        .get("title")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .ok_or(NoteRejection::MissingTitle)?;

    let date_raw = header
        .get("date")
        .filter(|d| !d.trim().is_empty())
        .ok_or(NoteRejection::MissingDate)?;
    let date = parse_date(date_raw)
        .ok_or_else(|| NoteRejection::UnparseableDate(date_raw.clone()))?;

    let tags = header.get("tags").map(|t| parse_list(t)).unwrap_or_default();

    let draft = header
        .get("draft")
        .map(|d| is_truthy(d))
        .unwrap_or(false);

    Ok(NoteFrontMatter {
        title: title.to_string(),
        date,
        tags,
        summary: header.get("summary").cloned(),
        draft,
    })
}

/// Parse an ISO-8601 timestamp, falling back to a bare date at midnight UTC.
///
/// A trailing `Z` is read as `+00:00`; timestamps without an offset are UTC.
/// Basic dates (`20240310`) and hour-only times (`2024-03-10T14`) are accepted.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let mut v = value.trim().to_string();
    if v.ends_with('Z') {
        v.pop();
        v.push_str("+00:00");
    }
    if let Some(extended) = extend_basic_date(&v) {
        v = extended;
    }

    parse_datetime(&v).or_else(|| parse_datetime(&format!("{}T00:00:00+00:00", v)))
}

fn parse_datetime(v: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(v) {
        return Some(dt.with_timezone(&Utc));
    }

    const OFFSET_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M%:z",
        "%Y-%m-%d %H:%M%:z",
        "%Y-%m-%dT%H:%M:%S%z",
        "%Y-%m-%d %H:%M:%S%z",
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%dT%H:%M%z",
        "%Y-%m-%d %H:%M%z",
    ];
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(v, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    const NAIVE_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    const MINUTE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

    let hour_only = format!("{}:00", v);
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(v, fmt).ok())
        .or_else(|| {
            MINUTE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(&hour_only, fmt).ok())
        })
        .map(|naive| naive.and_utc())
}

/// `YYYYMMDD` → `YYYY-MM-DD`
fn extend_basic_date(v: &str) -> Option<String> {
    (v.len() == 8 && v.bytes().all(|b| b.is_ascii_digit()))
        .then(|| format!("{}-{}-{}", &v[..4], &v[4..6], &v[6..]))
}

/// Parse an inline list like `[foo, "bar", 'baz qux']`.
///
/// A non-bracketed value is a single-element list; an empty value is empty.
pub fn parse_list(value: &str) -> Vec<String> {
    let v = value.trim();
    if v.is_empty() {
        return Vec::new();
    }

    match v.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => {
            let inner = inner.trim();
            if inner.is_empty() {
                return Vec::new();
            }
            inner.split(',').map(|part| unquote(part.trim())).collect()
        }
        None => vec![v.to_string()],
    }
}

/// Remove one layer of matching surrounding quotes
fn unquote(s: &str) -> String {
    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s[1..s.len() - 1].to_string()
    } else {
        s.to_string()
    }
}
