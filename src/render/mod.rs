//! Markup generation. Every function here is a pure function of its
//! arguments and regenerates the whole container.

pub mod admin;
pub mod events;
pub mod leaderboard;

use chrono::{DateTime, Utc};
use itertools::Itertools;

/// `Friday, June 6, 2025 at 07:00 PM`
pub(crate) const LONG_DATE_FORMAT: &str = "%A, %B %-d, %Y at %I:%M %p";
/// `Jun 6, 07:00 PM`
pub(crate) const SHORT_DATE_FORMAT: &str = "%b %-d, %I:%M %p";

pub(crate) fn long_date(date: &DateTime<Utc>) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

pub(crate) fn short_date(date: &DateTime<Utc>) -> String {
    date.format(SHORT_DATE_FORMAT).to_string()
}

/// Escape text for use in element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Group digits in threes with commas: `1234567` becomes `1,234,567`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let head = digits.len() % 3;
    let groups = digits
        .char_indices()
        .chunk_by(|(i, _)| if *i < head { 0 } else { (*i - head) / 3 + 1 })
        .into_iter()
        .map(|(_, group)| group.map(|(_, c)| c).collect::<String>())
        .join(",");
    if n < 0 {
        format!("-{groups}")
    } else {
        groups
    }
}
