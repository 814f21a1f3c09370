//! Display helpers for amounts and timestamps.

use chrono::{Local, TimeZone};
use std::fmt::Display;

/// Format a whole-rupee amount with Indian digit grouping.
///
/// ```
/// use fraud_core::format::format_amount;
///
/// assert_eq!(format_amount(999), "₹999");
/// assert_eq!(format_amount(1_234_567), "₹12,34,567");
/// ```
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }

    // last three digits form one group, the rest are grouped in pairs
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("₹{},{}", groups.join(","), tail)
}

/// Format an epoch-millisecond timestamp as local wall-clock time.
pub fn format_time(timestamp_ms: i64) -> String {
    format_time_in(timestamp_ms, &Local)
}

/// Format an epoch-millisecond timestamp as `h:mm:ss am` in `tz`.
///
/// Out-of-range timestamps render as `--:--:--`.
pub fn format_time_in<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%-I:%M:%S %P").to_string(),
        None => "--:--:--".to_string(),
    }
}
