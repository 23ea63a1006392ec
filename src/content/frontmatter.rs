//! Front-matter parsing

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde_yaml::Value;

use crate::posts::raw_tags;

/// Ordered front-matter fields, exactly as authored
pub type Metadata = IndexMap<String, Value>;

/// Opening and closing line of a front-matter block
const DELIMITER: &str = "---";

/// Front-matter data from a post or page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub metadata: Metadata,
}

impl FrontMatter {
    /// Split content into front-matter and body.
    ///
    /// Never fails: content without a delimited block is all body, and a
    /// block that isn't a YAML mapping is logged and treated the same way,
    /// returning the input untouched.
    pub fn parse(content: &str) -> (Self, &str) {
        let Some((yaml, body)) = split_block(content) else {
            return (FrontMatter::default(), content.trim());
        };

        if yaml.trim().is_empty() {
            return (FrontMatter::default(), body.trim());
        }

        match serde_yaml::from_str::<Metadata>(yaml) {
            Ok(metadata) => (FrontMatter { metadata }, body.trim()),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), content)
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Non-blank scalar value of `key`, trimmed
    fn text(&self, key: &str) -> Option<String> {
        self.get(key)
            .and_then(value_to_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn title(&self) -> Option<String> {
        self.text("title")
    }

    pub fn author(&self) -> Option<String> {
        self.text("author")
    }

    /// Trimmed excerpt; blank excerpts count as absent
    pub fn excerpt(&self) -> Option<String> {
        self.text("excerpt")
    }

    pub fn slug(&self) -> Option<String> {
        self.text("slug")
    }

    /// Tags as authored, from a list or a comma-separated string
    pub fn tags(&self) -> Vec<String> {
        self.get("tags").map(raw_tags).unwrap_or_default()
    }

    /// Parse the date field; naive dates are read in `tz`
    pub fn parse_date(&self, tz: Tz) -> Option<DateTime<Utc>> {
        self.text("date").and_then(|s| parse_date_string(&s, tz))
    }
}

/// Render a YAML scalar as text; sequences, mappings and null have none
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Locate a `---` delimited block at the start of `content`.
/// Returns (block, rest).
fn split_block(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let opening = lines.next()?;
    if opening.trim_end() != DELIMITER {
        return None;
    }

    let start = opening.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            return Some((&content[start..offset], &content[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Parse a date string in various formats
fn parse_date_string(s: &str, tz: Tz) -> Option<DateTime<Utc>> {
    let s = s.trim();

    // Try RFC 3339 / ISO 8601 with an offset first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(localize(naive, tz));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(localize(date.and_hms_opt(0, 0, 0)?, tz));
        }
    }

    None
}

/// Read a wall-clock time in `tz`.
///
/// Ambiguous times take the earlier instant; times skipped by a DST jump are
/// moved forward past the gap.
fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Utc> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| tz.from_utc_datetime(&naive).with_timezone(&Utc))
}
