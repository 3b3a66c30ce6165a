//! Header extraction for fetch-style responses.

use http::HeaderMap;

use crate::header::HeaderCollection;
use crate::http::{ResponseBody, ResponseHead};
use crate::transport::FetchResponse;

use super::NativeResponse;

/// Copy a native header map into a [`HeaderCollection`].
///
/// Repeated values of one name are joined with `", "`, as a browser's
/// `Headers` iterator does. Values that are not visible ASCII are decoded
/// lossily.
#[must_use]
pub fn collect_headers(map: &HeaderMap) -> HeaderCollection {
    let mut headers = HeaderCollection::new();
    for name in map.keys() {
        let joined = map
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        headers.set(name.as_str(), joined);
    }
    headers
}

impl NativeResponse for FetchResponse {
    fn into_head_and_body(self) -> (ResponseHead, ResponseBody) {
        let head = ResponseHead {
            status: self.status.as_u16(),
            status_text: self.status_text,
            headers: collect_headers(&self.headers),
        };
        (head, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn repeated_values_are_joined() {
        let mut map = HeaderMap::new();
        map.append("vary", HeaderValue::from_static("accept"));
        map.append("vary", HeaderValue::from_static("origin"));
        map.insert("content-type", HeaderValue::from_static("text/plain"));
        let headers = collect_headers(&map);
        assert_eq!(headers.get("Vary"), Some("accept, origin"));
        assert_eq!(headers.get("content-type"), Some("text/plain"));
    }
}
