//! HTTP date parsing and formatting utilities
//!
//! Parses the three RFC 7231 date formats used by `Expires` and
//! `Last-Modified`, and formats IMF-fixdate for synthesized responses.

/// HTTP date parsing error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HttpDateParseError {
    /// Date format was not recognized by any of the supported parsers
    #[error("Unrecognized HTTP date format: {0}")]
    UnrecognizedFormat(String),
}

/// HTTP date parsing utilities
pub mod httpdate {
    use std::time::{Duration, SystemTime};

    use super::HttpDateParseError;

    /// Parse HTTP date string into `SystemTime` following RFC 7231 formats
    ///
    /// # Errors
    ///
    /// Returns [`HttpDateParseError::UnrecognizedFormat`] when no format matches
    /// or the date lies before the Unix epoch.
    pub fn parse_http_date(date_str: &str) -> Result<SystemTime, HttpDateParseError> {
        use chrono::{DateTime, NaiveDateTime};

        let date_str = date_str.trim();

        // IMF-fixdate: "Sun, 06 Nov 1994 08:49:37 GMT"
        let imf = NaiveDateTime::parse_from_str(date_str, "%a, %d %b %Y %H:%M:%S GMT").ok();
        // RFC 850: "Sunday, 06-Nov-94 08:49:37 GMT"
        let rfc850 = || NaiveDateTime::parse_from_str(date_str, "%A, %d-%b-%y %H:%M:%S GMT").ok();
        // asctime: "Sun Nov  6 08:49:37 1994"
        let asctime = || NaiveDateTime::parse_from_str(date_str, "%a %b %e %H:%M:%S %Y").ok();

        let timestamp = imf
            .or_else(rfc850)
            .or_else(asctime)
            .map(|naive| naive.and_utc().timestamp())
            .or_else(|| DateTime::parse_from_rfc2822(date_str).ok().map(|dt| dt.timestamp()));

        match timestamp.and_then(|secs| u64::try_from(secs).ok()) {
            Some(secs) => Ok(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)),
            None => Err(HttpDateParseError::UnrecognizedFormat(date_str.to_string())),
        }
    }

    /// Format `SystemTime` as HTTP date string in RFC 7231 IMF-fixdate format
    #[must_use]
    pub fn fmt_http_date(time: SystemTime) -> String {
        use chrono::{DateTime, Utc};

        let duration = time
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default();
        let secs = i64::try_from(duration.as_secs()).unwrap_or_default();
        let dt = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();

        dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::httpdate::{fmt_http_date, parse_http_date};
    use std::time::{Duration, SystemTime};

    #[test]
    fn parses_all_rfc7231_formats() {
        let expected = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(parse_http_date("Sun, 06 Nov 1994 08:49:37 GMT").unwrap(), expected);
        assert_eq!(parse_http_date("Sunday, 06-Nov-94 08:49:37 GMT").unwrap(), expected);
        assert_eq!(parse_http_date("Sun Nov  6 08:49:37 1994").unwrap(), expected);
    }

    #[test]
    fn formats_imf_fixdate() {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        assert_eq!(fmt_http_date(time), "Sun, 06 Nov 1994 08:49:37 GMT");
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_http_date("yesterday").is_err());
        assert!(parse_http_date("0").is_err());
    }
}
