//! 时间工具
//!
//! 服务端的业务日期（跟进时间、成交日期、活动起止）以字符串传输，
//! 格式不统一：可能是 RFC 3339、`YYYY-MM-DD` 或 `YYYY-MM-DDTHH:MM`。
//! 这里集中做宽松解析，解析失败返回 `None`，由调用方决定显示什么。

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 当前时间
#[inline]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// 宽松解析时间字符串
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// 解析为日期部分（忽略时刻）
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    parse(s).map(|dt| dt.date_naive())
}

/// `YYYY-MM-DD`，用于 `<input type="date">` 和导出文件名
pub fn iso_day(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// 把表单里的日期值规范成 RFC 3339 字符串
pub fn to_rfc3339(s: &str) -> Option<String> {
    parse(s).map(|dt| dt.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_common_shapes() {
        let full = parse("2023-10-15T08:30:00Z").unwrap();
        assert_eq!(iso_day(&full), "2023-10-15");
        assert_eq!(parse("2023-11-15").map(|d| iso_day(&d)).as_deref(), Some("2023-11-15"));
        assert!(parse("2024-01-20T10:00").is_some());
        assert!(parse("").is_none());
        assert!(parse("next tuesday").is_none());
    }

    #[test]
    fn test_rfc3339_normalization() {
        assert_eq!(
            to_rfc3339("2024-03-01").as_deref(),
            Some("2024-03-01T00:00:00.000Z")
        );
    }
}
