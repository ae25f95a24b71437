//! Catalog rules that can be evaluated without touching the database.
//!
//! Trending, featured and upcoming are derived at read time from stored
//! counters and dates. The repository query filters express the same
//! predicates in SQL.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid duration '{0}': expected hh:mm:ss, mm:ss or seconds")]
    InvalidDuration(String),

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: String,
        max: String,
    },

    #[error("Invalid URL '{0}': must be an absolute http(s) URL")]
    InvalidUrl(String),

    #[error("Unknown user type: {0}")]
    UnknownUserType(String),
}

/// Role of an account. Staff endpoints are restricted to [`UserType::Admin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    #[default]
    User,
}

impl UserType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    #[must_use]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(DomainError::UnknownUserType(other.to_string())),
        }
    }
}

/// A series path segment: numeric ids are looked up by id, anything else by slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesKey {
    Id(i32),
    Slug(String),
}

impl SeriesKey {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i32>()
            .map_or_else(|_| Self::Slug(raw.to_string()), Self::Id)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Slug(slug) => f.write_str(slug),
        }
    }
}

/// One-based page number and a page size already clamped to the configured limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    #[must_use]
    pub fn clamped(
        page: Option<u64>,
        page_size: Option<u64>,
        default_size: u64,
        max_size: u64,
    ) -> Self {
        let max_size = max_size.max(1);
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(default_size).clamp(1, max_size),
        }
    }
}

#[must_use]
pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// A series is trending once its views reach its own threshold.
#[must_use]
pub const fn is_trending(view_count: i64, trending_threshold: i64) -> bool {
    view_count >= trending_threshold
}

/// Featured only while the promotion window has not expired. The expiry day itself counts.
#[must_use]
pub fn is_currently_featured(
    is_featured: bool,
    featured_until: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    is_featured && featured_until.is_some_and(|until| until >= today)
}

#[must_use]
pub fn is_upcoming(release_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    release_date.is_some_and(|date| date > today)
}

/// Earliest release date that still counts as a new release.
#[must_use]
pub fn new_release_cutoff(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(i64::from(days))
}

/// Lowercase ASCII slug. Runs of other characters collapse into one hyphen;
/// apostrophes are dropped so "Don't" becomes "dont".
///
/// # Examples
///
/// ```rust
/// use dramabox::domain::slugify;
///
/// assert_eq!(slugify("Crash Landing on You"), "crash-landing-on-you");
/// assert_eq!(slugify("  Mr. & Mrs. Kim!  "), "mr-mrs-kim");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch != '\'' {
            pending_dash = true;
        }
    }

    slug
}

/// Longest accepted episode runtime: 99:59:59.
pub const MAX_DURATION_SECS: i64 = 99 * 3600 + 59 * 60 + 59;

/// Parses `hh:mm:ss`, `mm:ss` or plain seconds into a number of seconds.
pub fn parse_duration(raw: &str) -> Result<i64, DomainError> {
    let invalid = || DomainError::InvalidDuration(raw.to_string());

    let parts: Vec<&str> = raw.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return Err(invalid());
    }

    let mut values = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        values.push(part.parse::<i64>().map_err(|_| invalid())?);
    }

    // Lower units are bounded once a higher unit is present.
    if values.iter().skip(1).any(|v| *v >= 60) {
        return Err(invalid());
    }

    let total = values
        .iter()
        .try_fold(0_i64, |acc, v| acc.checked_mul(60)?.checked_add(*v))
        .ok_or_else(invalid)?;
    if total > MAX_DURATION_SECS {
        return Err(invalid());
    }
    Ok(total)
}

#[must_use]
pub fn format_duration(total_secs: i64) -> String {
    let total = total_secs.max(0);
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<f64, DomainError> {
    let rounded = round_one_decimal(value);
    if !value.is_finite() || rounded < min || rounded > max {
        return Err(DomainError::OutOfRange {
            field,
            min: format!("{min:.1}"),
            max: format!("{max:.1}"),
        });
    }
    Ok(rounded)
}

/// Series ratings are stored with one decimal in `0.0..=9.9`.
pub fn validate_series_rating(value: f64) -> Result<f64, DomainError> {
    check_range("rating", value, 0.0, 9.9)
}

/// Review ratings are stored with one decimal in `1.0..=5.0`.
pub fn validate_review_rating(value: f64) -> Result<f64, DomainError> {
    check_range("rating", value, 1.0, 5.0)
}

pub fn validate_http_url(raw: &str) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    match url::Url::parse(trimmed) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(DomainError::InvalidUrl(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trending_boundary() {
        assert!(is_trending(100, 100));
        assert!(is_trending(101, 100));
        assert!(!is_trending(99, 100));
        assert!(is_trending(0, 0));
    }

    #[test]
    fn test_featured_window() {
        let today = date(2025, 3, 10);
        assert!(is_currently_featured(true, Some(today), today));
        assert!(is_currently_featured(true, Some(date(2025, 4, 1)), today));
        assert!(!is_currently_featured(true, Some(date(2025, 3, 9)), today));
        assert!(!is_currently_featured(true, None, today));
        assert!(!is_currently_featured(false, Some(date(2025, 4, 1)), today));
    }

    #[test]
    fn test_upcoming_and_new_release() {
        let today = date(2025, 3, 10);
        assert!(is_upcoming(Some(date(2025, 3, 11)), today));
        assert!(!is_upcoming(Some(today), today));
        assert!(!is_upcoming(None, today));
        assert_eq!(new_release_cutoff(today, 30), date(2025, 2, 8));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("--Already--slugged--"), "already-slugged");
        assert_eq!(slugify("Don't Look Back"), "dont-look-back");
        assert_eq!(slugify("Season 2: The Return"), "season-2-the-return");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("01:02:03"), Ok(3723));
        assert_eq!(parse_duration("45:00"), Ok(2700));
        assert_eq!(parse_duration("90"), Ok(90));
        assert_eq!(parse_duration(" 00:00:59 "), Ok(59));
        assert!(parse_duration("1:60:00").is_err());
        assert!(parse_duration("a:b").is_err());
        assert!(parse_duration("").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("-5").is_err());
        assert_eq!(parse_duration("99:59:59"), Ok(MAX_DURATION_SECS));
        assert!(parse_duration("100:00:00").is_err());
        assert!(parse_duration("9223372036854775807:00").is_err());
        assert!(parse_duration("9223372036854775807").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(3723), "01:02:03");
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(-10), "00:00:00");
        assert_eq!(format_duration(36_000), "10:00:00");
    }

    #[test]
    fn test_rating_validation() {
        assert_eq!(validate_series_rating(7.25), Ok(7.3));
        assert_eq!(validate_series_rating(0.0), Ok(0.0));
        assert!(validate_series_rating(10.0).is_err());
        assert!(validate_series_rating(-0.5).is_err());
        assert!(validate_series_rating(f64::NAN).is_err());

        assert_eq!(validate_review_rating(4.5), Ok(4.5));
        assert!(validate_review_rating(0.9).is_err());
        assert!(validate_review_rating(5.1).is_err());
    }

    #[test]
    fn test_page_request_clamping() {
        let page = PageRequest::clamped(None, None, 10, 100);
        assert_eq!(page, PageRequest { page: 1, page_size: 10 });

        let page = PageRequest::clamped(Some(0), Some(1000), 10, 100);
        assert_eq!(page, PageRequest { page: 1, page_size: 100 });

        let page = PageRequest::clamped(Some(3), Some(0), 10, 100);
        assert_eq!(page, PageRequest { page: 3, page_size: 1 });
    }

    #[test]
    fn test_series_key_and_user_type() {
        assert_eq!(SeriesKey::parse("42"), SeriesKey::Id(42));
        assert_eq!(
            SeriesKey::parse("my-drama"),
            SeriesKey::Slug("my-drama".to_string())
        );

        assert_eq!("ADMIN".parse::<UserType>(), Ok(UserType::Admin));
        assert!("guest".parse::<UserType>().is_err());
        assert!(UserType::Admin.is_staff());
        assert!(!UserType::User.is_staff());
    }

    #[test]
    fn test_validate_http_url() {
        assert!(validate_http_url("https://youtu.be/abc").is_ok());
        assert!(validate_http_url("ftp://example.com/file").is_err());
        assert!(validate_http_url("not a url").is_err());
    }
}
