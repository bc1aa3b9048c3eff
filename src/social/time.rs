//! 时间转换工具
//!
//! 服务端返回的时间统一是 ISO-8601 字符串，所有解析都经过 `from_iso`，
//! 解析失败直接返回错误，不会静默变成 `None`。

use crate::social::error::Result;
use chrono::{DateTime, SecondsFormat, Utc};

/// 解析服务端 ISO-8601 时间（如 `2024-01-01T00:00:00.000Z`）为 UTC 时间
pub fn from_iso(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value.trim())?;
    Ok(parsed.with_timezone(&Utc))
}

/// 转换为服务端使用的格式（毫秒精度，`Z` 结尾）
pub fn to_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::social::error::SocialError;
    use chrono::TimeZone;

    #[test]
    fn parses_zulu_and_millis() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(from_iso("2024-01-01T00:00:00Z").unwrap(), expected);
        assert_eq!(from_iso("2024-01-01T00:00:00.000Z").unwrap(), expected);
    }

    #[test]
    fn normalizes_offsets_to_utc() {
        let dt = from_iso("2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn malformed_input_is_an_error() {
        let err = from_iso("yesterday").unwrap_err();
        assert!(matches!(err, SocialError::Timestamp(_)));
    }

    #[test]
    fn formats_with_millisecond_precision() {
        let dt = Utc.with_ymd_and_hms(2020, 5, 17, 8, 30, 1).unwrap();
        assert_eq!(to_iso(&dt), "2020-05-17T08:30:01.000Z");
        assert_eq!(from_iso(&to_iso(&dt)).unwrap(), dt);
    }
}
