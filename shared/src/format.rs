//! Display formatting shared by every page.

use chrono::{DateTime, Utc};

use crate::date;

/// Group an integer with thousands separators (`1,234,567`).
fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0 {
        out.insert(0, '-');
    }
    out
}

/// `AED 1,250,000`, rounded to whole units.
pub fn currency(amount: f64) -> String {
    format!("AED {}", group_thousands(amount.round() as i64))
}

/// Currency for optional amounts; missing or zero reads `N/A`.
pub fn currency_or_na(amount: Option<f64>) -> String {
    match amount {
        Some(a) if a != 0.0 => currency(a),
        _ => "N/A".to_owned(),
    }
}

/// Compact figure using crore / lakh / thousand suffixes.
pub fn compact_number(num: f64) -> String {
    if num >= 10_000_000.0 {
        format!("{:.1}Cr", num / 10_000_000.0)
    } else if num >= 100_000.0 {
        format!("{:.1}L", num / 100_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        trim_float(num)
    }
}

fn trim_float(num: f64) -> String {
    if num.fract() == 0.0 {
        format!("{}", num as i64)
    } else {
        format!("{num}")
    }
}

/// `15 Oct 2023`
pub fn short_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-d %b %Y").to_string()
}

/// `15 October 2023, 08:30 am`
pub fn long_date(dt: &DateTime<Utc>) -> String {
    dt.format("%-d %B %Y, %I:%M %P").to_string()
}

/// Short date of a loosely formatted server string; unparseable input is
/// returned as-is.
pub fn short_date_str(raw: &str) -> String {
    date::parse(raw).map_or_else(|| raw.to_owned(), |dt| short_date(&dt))
}

pub fn relative_time(dt: &DateTime<Utc>) -> String {
    relative_time_from(dt, &date::now())
}

/// Relative phrasing against an explicit `now`; older than thirty days
/// falls back to the short date.
pub fn relative_time_from(dt: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *dt).num_seconds();
    let plural = |n: i64| if n > 1 { "s" } else { "" };
    if secs < 60 {
        "Just now".to_owned()
    } else if secs < 3_600 {
        let m = secs / 60;
        format!("{m} minute{} ago", plural(m))
    } else if secs < 86_400 {
        let h = secs / 3_600;
        format!("{h} hour{} ago", plural(h))
    } else if secs < 2_592_000 {
        let d = secs / 86_400;
        format!("{d} day{} ago", plural(d))
    } else {
        short_date(dt)
    }
}

/// Indian mobile formatting: `+91 98765 43210`.
pub fn phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("+91 {} {}", &digits[..5], &digits[5..]),
        12 if digits.starts_with("91") => {
            format!("+{} {} {}", &digits[..2], &digits[2..7], &digits[7..])
        }
        _ => raw.to_owned(),
    }
}

/// Up to two upper-case initials.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

/// Rounded integer percentage; zero total yields zero.
pub fn percentage(value: f64, total: f64) -> i64 {
    if total == 0.0 {
        return 0;
    }
    (value / total * 100.0).round() as i64
}

pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_owned();
    }
    let head: String = text.chars().take(max).collect();
    format!("{head}...")
}

pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let exp = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", trim_float(rounded), UNITS[exp])
}

/// `leadAssignment` -> `Lead Assignment`
pub fn camel_to_title(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    for (i, ch) in raw.chars().enumerate() {
        if ch.is_ascii_uppercase() && i > 0 {
            out.push(' ');
        }
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }
    out.trim().to_owned()
}

/// `no_activity_rotation` -> `No Activity Rotation`
pub fn snake_to_title(raw: &str) -> String {
    raw.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == ' ')
        .collect();
    kept.split(' ')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Badge colour classes for any lead, deal, project or communication status.
pub fn status_class(status: &str) -> &'static str {
    match status.to_lowercase().as_str() {
        "new" | "planning" | "scheduled" | "sent" => "bg-blue-100 text-blue-800",
        "contacted" | "pending" | "under_construction" => "bg-yellow-100 text-yellow-800",
        "qualified" | "approved" | "ready_to_move" | "delivered" | "active" => {
            "bg-green-100 text-green-800"
        }
        "nurturing" | "interested" => "bg-purple-100 text-purple-800",
        "converted" | "completed" | "paid" => "bg-emerald-100 text-emerald-800",
        "dead" | "rejected" | "cancelled" | "missed" | "failed" | "overdue" | "lost" => {
            "bg-red-100 text-red-800"
        }
        _ => "bg-gray-100 text-gray-800",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_currency_groups_thousands() {
        assert_eq!(currency(18_500_000.0), "AED 18,500,000");
        assert_eq!(currency(999.6), "AED 1,000");
        assert_eq!(currency(0.0), "AED 0");
        assert_eq!(currency_or_na(None), "N/A");
    }

    #[test]
    fn test_compact_number_suffixes() {
        assert_eq!(compact_number(25_000_000.0), "2.5Cr");
        assert_eq!(compact_number(350_000.0), "3.5L");
        assert_eq!(compact_number(1_580.0), "1.6K");
        assert_eq!(compact_number(42.0), "42");
    }

    #[test]
    fn test_relative_time_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        assert_eq!(relative_time_from(&(now - Duration::seconds(30)), &now), "Just now");
        assert_eq!(relative_time_from(&(now - Duration::minutes(1)), &now), "1 minute ago");
        assert_eq!(relative_time_from(&(now - Duration::hours(5)), &now), "5 hours ago");
        assert_eq!(relative_time_from(&(now - Duration::days(2)), &now), "2 days ago");
        assert_eq!(relative_time_from(&(now - Duration::days(40)), &now), "31 Mar 2024");
    }

    #[test]
    fn test_phone_formatting() {
        assert_eq!(phone("9876543210"), "+91 98765 43210");
        assert_eq!(phone("+91 98765-43210"), "+91 98765 43210");
        assert_eq!(phone("12345"), "12345");
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(initials("sarah jane wilson"), "SJ");
        assert_eq!(percentage(1.0, 3.0), 33);
        assert_eq!(percentage(5.0, 0.0), 0);
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(file_size(0), "0 Bytes");
        assert_eq!(file_size(1536), "1.5 KB");
        assert_eq!(camel_to_title("leadAssignment"), "Lead Assignment");
        assert_eq!(snake_to_title("cron_failed"), "Cron Failed");
        assert_eq!(slugify("Phoenix Heights, Tower B"), "phoenix-heights-tower-b");
        assert_eq!(status_class("Completed"), "bg-emerald-100 text-emerald-800");
    }
}
