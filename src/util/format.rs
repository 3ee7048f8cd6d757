use std::time::{Duration, SystemTime};

use time::{macros::format_description, OffsetDateTime, UtcOffset};

/// Whole aUEC with thousands separators, e.g. `84,115 aUEC`.
pub fn format_auec(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-{grouped} aUEC")
    } else {
        format!("{grouped} aUEC")
    }
}

/// Local date and time of a fetch, falling back to UTC when the local
/// offset cannot be determined.
pub fn format_timestamp(at: SystemTime) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let datetime = OffsetDateTime::from(at).to_offset(offset);
    datetime
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Compact age such as `42s`, `2m`, `3h` or `1d`.
pub fn humanize_age(age: Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3_600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3_600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

/// Time elapsed since `at`. Timestamps in the future count as zero.
pub fn age_since(at: SystemTime) -> Duration {
    SystemTime::now().duration_since(at).unwrap_or_default()
}
