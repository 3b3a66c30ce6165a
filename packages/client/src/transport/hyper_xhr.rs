//! Built-in [`XhrTransport`] over hyper.

use std::fmt::Write as _;

use bytes::BytesMut;
use http::HeaderMap;
use http_body_util::BodyExt;

use super::connector::{Connector, apply_request_defaults, content_length};
use super::fetch::status_text;
use super::xhr::{XhrDispatch, XhrEventSink, XhrResponse, XhrTransport, guard};
use crate::config::TransportConfig;
use crate::error::BoxError;
use crate::http::{CredentialsMode, ResponseBody};

/// Performs XHR exchanges on spawned Tokio tasks, one connection each.
///
/// Download progress is reported once per received body chunk.
#[derive(Clone)]
pub struct HyperXhr {
    connector: Connector,
}

impl HyperXhr {
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        Self {
            connector: Connector::new(config),
        }
    }
}

impl XhrTransport for HyperXhr {
    fn dispatch(&self, request: XhrDispatch, sink: XhrEventSink) {
        let connector = self.connector.clone();
        tokio::spawn(async move {
            let outcome = guard(request.timeout, sink.abort_signal(), perform(connector, request, &sink)).await;
            sink.complete(outcome);
        });
    }
}

async fn perform(
    connector: Connector,
    request: XhrDispatch,
    sink: &XhrEventSink,
) -> Result<XhrResponse, BoxError> {
    let XhrDispatch {
        method,
        url,
        mut headers,
        body,
        with_credentials,
        ..
    } = request;

    let credentials = if with_credentials {
        CredentialsMode::Include
    } else {
        CredentialsMode::SameOrigin
    };
    apply_request_defaults(&mut headers, &body, credentials);
    let payload = body.into_bytes()?;

    let response = connector.send(&method, &url, headers, payload).await?;
    sink.headers_received();

    let (parts, mut incoming) = response.into_parts();
    let total = content_length(&parts.headers);
    let raw_headers = raw_headers(&parts.headers);

    sink.loading();
    let mut buffer = BytesMut::new();
    while let Some(frame) = incoming.frame().await {
        if let Ok(data) = frame?.into_data() {
            buffer.extend_from_slice(&data);
            sink.progress(buffer.len() as u64, total);
        }
    }

    Ok(XhrResponse {
        status: parts.status.as_u16(),
        status_text: status_text(parts.status),
        raw_headers,
        body: ResponseBody::from_bytes(buffer.freeze()),
    })
}

/// Serialize `headers` the way `getAllResponseHeaders()` does: one CRLF
/// terminated line per name, repeated values joined with `", "`.
pub(crate) fn raw_headers(headers: &HeaderMap) -> String {
    let mut raw = String::new();
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = write!(raw, "{name}: {values}\r\n");
    }
    raw
}
