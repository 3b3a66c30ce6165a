//! Built-in [`FetchTransport`] over hyper.

use futures::TryStreamExt;
use futures::future::BoxFuture;
use http::header::{CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LENGTH, CONTENT_LOCATION, CONTENT_TYPE, LOCATION};
use http::{Method, Response, StatusCode};
use http_body_util::BodyStream;
use hyper::body::Incoming;
use url::Url;

use super::connector::{Connector, apply_request_defaults};
use super::fetch::{FetchFailure, FetchRequest, FetchResponse, FetchTransport, status_text};
use crate::config::TransportConfig;
use crate::error::BoxError;
use crate::http::{RedirectMode, RequestBody, RequestMode, ResponseBody};

/// Performs fetch exchanges over fresh connections, following the
/// request's redirect and mode policies.
#[derive(Clone)]
pub struct HyperFetch {
    connector: Connector,
    max_redirects: usize,
    origin: Option<Url>,
}

impl HyperFetch {
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        Self {
            connector: Connector::new(config),
            max_redirects: config.max_redirects,
            origin: config.origin.clone(),
        }
    }

    async fn run(self, request: FetchRequest) -> Result<FetchResponse, FetchFailure> {
        if request.mode == RequestMode::SameOrigin
            && let Some(origin) = &self.origin
            && origin.origin() != request.url.origin()
        {
            return Err(FetchFailure::network(format!(
                "same-origin request to {} blocked from origin {}",
                request.url,
                origin.origin().ascii_serialization()
            )));
        }

        let FetchRequest {
            mut method,
            mut url,
            mut headers,
            mut body,
            credentials,
            redirect,
            ..
        } = request;
        apply_request_defaults(&mut headers, &body, credentials);

        let mut redirected = false;
        for _ in 0..=self.max_redirects {
            let payload = body.clone().into_bytes().map_err(FetchFailure::Network)?;
            let response = self
                .connector
                .send(&method, &url, headers.clone(), payload)
                .await
                .map_err(FetchFailure::Network)?;

            let Some(location) = redirect_target(&response, &url) else {
                return Ok(into_fetch_response(response, url, redirected));
            };

            match redirect {
                RedirectMode::Manual => return Ok(into_fetch_response(response, url, redirected)),
                RedirectMode::Error => {
                    return Err(FetchFailure::network(format!(
                        "redirect to {location} refused by redirect mode 'error'"
                    )));
                }
                RedirectMode::Follow => {
                    let status = response.status();
                    if status == StatusCode::SEE_OTHER
                        || (matches!(status, StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND)
                            && method == Method::POST)
                    {
                        method = Method::GET;
                        body = RequestBody::Empty;
                        for name in [CONTENT_TYPE, CONTENT_LENGTH, CONTENT_ENCODING, CONTENT_LANGUAGE, CONTENT_LOCATION] {
                            headers.remove(name);
                        }
                    }
                    tracing::debug!(target: "niupee::fetch", from = %url, to = %location, %status, "following redirect");
                    url = location;
                    redirected = true;
                }
            }
        }

        Err(FetchFailure::network(format!(
            "too many redirects (limit {})",
            self.max_redirects
        )))
    }
}

impl FetchTransport for HyperFetch {
    fn fetch(&self, request: FetchRequest) -> BoxFuture<'static, Result<FetchResponse, FetchFailure>> {
        let transport = self.clone();
        Box::pin(async move {
            let signal = request.signal.clone();
            tokio::select! {
                biased;
                () = signal.aborted() => Err(FetchFailure::Aborted),
                result = transport.run(request) => result,
            }
        })
    }
}

/// The resolved `Location` of a redirect response.
fn redirect_target(response: &Response<Incoming>, base: &Url) -> Option<Url> {
    if !matches!(
        response.status(),
        StatusCode::MOVED_PERMANENTLY
            | StatusCode::FOUND
            | StatusCode::SEE_OTHER
            | StatusCode::TEMPORARY_REDIRECT
            | StatusCode::PERMANENT_REDIRECT
    ) {
        return None;
    }
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    base.join(location).ok()
}

fn into_fetch_response(response: Response<Incoming>, url: Url, redirected: bool) -> FetchResponse {
    let (parts, incoming) = response.into_parts();
    let stream = BodyStream::new(incoming)
        .map_err(|e| Box::new(e) as BoxError)
        .try_filter_map(|frame| futures::future::ready(Ok(frame.into_data().ok())));
    FetchResponse {
        status: parts.status,
        status_text: status_text(parts.status),
        headers: parts.headers,
        url,
        redirected,
        body: ResponseBody::from_stream(Box::pin(stream)),
    }
}
