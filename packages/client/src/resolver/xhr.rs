//! Header extraction for XHR-style responses.

use crate::header::HeaderCollection;
use crate::http::{ResponseBody, ResponseHead};
use crate::transport::XhrResponse;

use super::NativeResponse;

/// Parse the combined raw header text of an XHR response.
///
/// Each non-blank line is split at its first colon; values are trimmed and
/// a repeated name keeps its last occurrence. Lines without a colon are
/// skipped.
#[must_use]
pub fn parse_raw_headers(raw: &str) -> HeaderCollection {
    let mut headers = HeaderCollection::new();
    for line in raw.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            if !name.is_empty() {
                headers.set(name, value.trim());
            }
        }
    }
    headers
}

impl NativeResponse for XhrResponse {
    fn into_head_and_body(self) -> (ResponseHead, ResponseBody) {
        let head = ResponseHead {
            status: self.status,
            status_text: self.status_text,
            headers: parse_raw_headers(&self.raw_headers),
        };
        (head, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_first_colon_and_trims() {
        let headers = parse_raw_headers("Date: Tue, 01 Jan 2030 10:00:00 GMT\r\nX-Empty:\r\n\r\n");
        assert_eq!(headers.get("date"), Some("Tue, 01 Jan 2030 10:00:00 GMT"));
        assert_eq!(headers.get("x-empty"), Some(""));
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn last_duplicate_wins() {
        let headers = parse_raw_headers("x-trace: one\r\nX-Trace: two\r\nno colon here\r\n");
        assert_eq!(headers.get("x-trace"), Some("two"));
        assert_eq!(headers.len(), 1);
    }
}
