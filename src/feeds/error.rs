use super::rate_limit::{RateLimit, RateLimitHeaders};
use reqwest::StatusCode;
use thiserror::Error;

/// What went wrong fetching the profile, as far as the user needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("github rate limit exceeded")]
    RateLimited,
    #[error("github user `{0}` not found")]
    NotFound(String),
    #[error("profile fetch failed: {0}")]
    Unknown(UnknownCause),
}

/// Every distinct failure folded into [`ProfileError::Unknown`]. Only logged,
/// the error page renders all of them the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownCause {
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed rate-limit headers: {0}")]
    MalformedHeaders(String),
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl ProfileError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RateLimited => 403,
            Self::NotFound(_) => 404,
            Self::Unknown(_) => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub error: ProfileError,
    pub rate_limit: Option<RateLimit>,
}

impl FetchFailure {
    pub fn unknown(cause: UnknownCause) -> Self {
        Self {
            error: ProfileError::Unknown(cause),
            rate_limit: None,
        }
    }

    /// Maps a non-200 response onto the error taxonomy.
    ///
    /// 404 is `NotFound` whether or not quota headers came back. 403 only
    /// counts as rate limiting when the quota headers are there to back it
    /// up. Unreadable headers always end in `Unknown`.
    pub fn classify(status: StatusCode, headers: RateLimitHeaders, username: &str) -> Self {
        match headers {
            RateLimitHeaders::Malformed(reason) => {
                Self::unknown(UnknownCause::MalformedHeaders(reason))
            }
            RateLimitHeaders::Absent => {
                let error = if status == StatusCode::NOT_FOUND {
                    ProfileError::NotFound(username.to_string())
                } else {
                    ProfileError::Unknown(UnknownCause::Status(status.as_u16()))
                };
                Self {
                    error,
                    rate_limit: None,
                }
            }
            RateLimitHeaders::Present(rate_limit) => {
                let error = match status {
                    StatusCode::FORBIDDEN => ProfileError::RateLimited,
                    StatusCode::NOT_FOUND => ProfileError::NotFound(username.to_string()),
                    other => ProfileError::Unknown(UnknownCause::Status(other.as_u16())),
                };
                Self {
                    error,
                    rate_limit: Some(rate_limit),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn present() -> RateLimitHeaders {
        RateLimitHeaders::Present(RateLimit {
            remaining: 0,
            reset_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        })
    }

    #[test]
    fn test_403_with_headers_is_rate_limited() {
        let failure = FetchFailure::classify(StatusCode::FORBIDDEN, present(), "ada");
        assert_eq!(failure.error, ProfileError::RateLimited);
        assert_eq!(failure.error.status_code(), 403);
        let reset = failure.rate_limit.unwrap().reset_from_now();
        assert!(!reset.is_empty());
    }

    #[test]
    fn test_404_regardless_of_headers() {
        for headers in [present(), RateLimitHeaders::Absent] {
            let failure = FetchFailure::classify(StatusCode::NOT_FOUND, headers, "ada");
            assert_eq!(failure.error, ProfileError::NotFound("ada".to_string()));
            assert_eq!(failure.error.status_code(), 404);
        }
    }

    #[test]
    fn test_missing_headers_never_rate_limited() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::UNAUTHORIZED,
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::CREATED,
        ] {
            let failure = FetchFailure::classify(status, RateLimitHeaders::Absent, "ada");
            assert_eq!(
                failure.error,
                ProfileError::Unknown(UnknownCause::Status(status.as_u16()))
            );
            assert_eq!(failure.error.status_code(), 500);
            assert!(failure.rate_limit.is_none());
        }
    }

    #[test]
    fn test_malformed_headers_degrade_to_unknown() {
        for status in [
            StatusCode::FORBIDDEN,
            StatusCode::NOT_FOUND,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            let failure = FetchFailure::classify(
                status,
                RateLimitHeaders::Malformed("bad".to_string()),
                "ada",
            );
            assert_eq!(failure.error.status_code(), 500);
            assert!(matches!(
                failure.error,
                ProfileError::Unknown(UnknownCause::MalformedHeaders(_))
            ));
        }
    }

    #[test]
    fn test_other_status_keeps_rate_limit_hint() {
        let failure = FetchFailure::classify(StatusCode::BAD_GATEWAY, present(), "ada");
        assert_eq!(failure.error.status_code(), 500);
        assert!(failure.rate_limit.is_some());
    }
}
