use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;

pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Quota information GitHub attaches to every API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

impl RateLimit {
    /// Human-relative reset time, e.g. "in 12 minutes".
    pub fn reset_from_now(&self) -> String {
        self.reset_relative_to(Utc::now())
    }

    pub fn reset_relative_to(&self, now: DateTime<Utc>) -> String {
        relative_time(self.reset_at, now)
    }
}

/// Result of inspecting a response for rate-limit headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitHeaders {
    Present(RateLimit),
    Absent,
    Malformed(String),
}

impl RateLimitHeaders {
    /// Reads both rate-limit headers. Never panics: unreadable or
    /// non-numeric values come back as `Malformed`.
    pub fn extract(headers: &HeaderMap) -> Self {
        let remaining = headers.get(REMAINING_HEADER);
        let reset = headers.get(RESET_HEADER);

        let (remaining, reset) = match (remaining, reset) {
            (None, None) => return Self::Absent,
            (Some(remaining), Some(reset)) => (remaining, reset),
            (None, Some(_)) => return Self::Malformed(format!("missing {}", REMAINING_HEADER)),
            (Some(_), None) => return Self::Malformed(format!("missing {}", RESET_HEADER)),
        };

        let remaining = match remaining.to_str().ok().and_then(|v| v.trim().parse::<u32>().ok()) {
            Some(value) => value,
            None => return Self::Malformed(format!("invalid {} value {:?}", REMAINING_HEADER, remaining)),
        };

        let reset_secs = match reset.to_str().ok().and_then(|v| v.trim().parse::<i64>().ok()) {
            Some(value) => value,
            None => return Self::Malformed(format!("invalid {} value {:?}", RESET_HEADER, reset)),
        };

        match Utc.timestamp_opt(reset_secs, 0).single() {
            Some(reset_at) => Self::Present(RateLimit {
                remaining,
                reset_at,
            }),
            None => Self::Malformed(format!("{} out of range: {}", RESET_HEADER, reset_secs)),
        }
    }
}

/// Formats `target` relative to `now` the way people say it out loud:
/// "in a few seconds", "5 minutes ago", "in 2 hours".
pub fn relative_time(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let delta = target.signed_duration_since(now).num_seconds();
    let phrase = humanize_seconds(delta.unsigned_abs());

    if delta >= 0 {
        format!("in {}", phrase)
    } else {
        format!("{} ago", phrase)
    }
}

fn humanize_seconds(secs: u64) -> String {
    let secs = secs as f64;
    let minutes = (secs / 60.0).round();
    let hours = (secs / 3600.0).round();
    let days = (secs / 86_400.0).round();

    if secs < 45.0 {
        "a few seconds".to_string()
    } else if secs < 90.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{} minutes", minutes as u64)
    } else if minutes < 90.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{} hours", hours as u64)
    } else if hours < 36.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{} days", days as u64)
    } else if days < 45.0 {
        "a month".to_string()
    } else if days < 320.0 {
        format!("{} months", ((days / 30.4).round() as u64).max(2))
    } else if days < 548.0 {
        "a year".to_string()
    } else {
        format!("{} years", ((days / 365.0).round() as u64).max(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use reqwest::header::HeaderValue;

    fn headers(remaining: Option<&'static str>, reset: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(value) = remaining {
            map.insert(REMAINING_HEADER, HeaderValue::from_static(value));
        }
        if let Some(value) = reset {
            map.insert(RESET_HEADER, HeaderValue::from_static(value));
        }
        map
    }

    #[test]
    fn test_extract_present() {
        let parsed = RateLimitHeaders::extract(&headers(Some("0"), Some("1700000000")));
        let expected = RateLimit {
            remaining: 0,
            reset_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        };
        assert_eq!(parsed, RateLimitHeaders::Present(expected));
    }

    #[test]
    fn test_extract_absent() {
        assert_eq!(
            RateLimitHeaders::extract(&HeaderMap::new()),
            RateLimitHeaders::Absent
        );
    }

    #[test]
    fn test_extract_single_header_is_malformed() {
        assert!(matches!(
            RateLimitHeaders::extract(&headers(Some("10"), None)),
            RateLimitHeaders::Malformed(_)
        ));
        assert!(matches!(
            RateLimitHeaders::extract(&headers(None, Some("1700000000"))),
            RateLimitHeaders::Malformed(_)
        ));
    }

    #[test]
    fn test_extract_non_numeric_values() {
        assert!(matches!(
            RateLimitHeaders::extract(&headers(Some("lots"), Some("1700000000"))),
            RateLimitHeaders::Malformed(_)
        ));
        assert!(matches!(
            RateLimitHeaders::extract(&headers(Some("5"), Some("soon"))),
            RateLimitHeaders::Malformed(_)
        ));
    }

    #[test]
    fn test_extract_opaque_bytes() {
        let mut map = headers(Some("5"), None);
        map.insert(RESET_HEADER, HeaderValue::from_bytes(b"\xff\xfe").unwrap());
        assert!(matches!(
            RateLimitHeaders::extract(&map),
            RateLimitHeaders::Malformed(_)
        ));
    }

    #[test]
    fn test_relative_time_future_and_past() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(relative_time(now + Duration::seconds(10), now), "in a few seconds");
        assert_eq!(relative_time(now + Duration::seconds(60), now), "in a minute");
        assert_eq!(relative_time(now + Duration::minutes(12), now), "in 12 minutes");
        assert_eq!(relative_time(now + Duration::minutes(60), now), "in an hour");
        assert_eq!(relative_time(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(relative_time(now - Duration::hours(30), now), "a day ago");
        assert_eq!(relative_time(now + Duration::days(3), now), "in 3 days");
        assert_eq!(relative_time(now - Duration::days(400), now), "a year ago");
    }

    #[test]
    fn test_reset_relative_to_is_never_empty() {
        let now = Utc::now();
        let limit = RateLimit {
            remaining: 0,
            reset_at: now,
        };
        assert!(!limit.reset_relative_to(now).is_empty());
    }
}
