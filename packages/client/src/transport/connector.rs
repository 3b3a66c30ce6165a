//! One-shot HTTP/1.1 connections over TCP or TLS.
//!
//! Every request performs its own handshake; connections are never reused.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, COOKIE, HOST, USER_AGENT};
use http::{HeaderMap, HeaderValue, Method, Request, Response, Uri};
use http_body_util::Full;
use hyper::body::Incoming;
use hyper_util::rt::TokioIo;
use rustls::pki_types::ServerName;
use rustls::{ClientConfig, RootCertStore};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use url::{Host, Position, Url};

use crate::config::TransportConfig;
use crate::error::BoxError;
use crate::http::{CredentialsMode, RequestBody};

/// Opens a fresh connection for every request it sends.
#[derive(Clone)]
pub struct Connector {
    tls: Option<TlsConnector>,
    connect_timeout: Duration,
    user_agent: HeaderValue,
    https_only: bool,
}

impl Connector {
    #[must_use]
    pub fn new(config: &TransportConfig) -> Self {
        let tls = match tls_connector() {
            Ok(connector) => Some(connector),
            Err(e) => {
                tracing::error!(target: "niupee::transport", error = %e, "TLS unavailable, https requests will fail");
                None
            }
        };
        let user_agent = HeaderValue::from_str(&config.user_agent).unwrap_or_else(|_| {
            tracing::warn!(target: "niupee::transport", user_agent = %config.user_agent, "invalid user agent, using default");
            HeaderValue::from_static(crate::config::DEFAULT_USER_AGENT)
        });
        Self {
            tls,
            connect_timeout: config.connect_timeout,
            user_agent,
            https_only: config.https_only,
        }
    }

    /// Send one request over a new connection and return the response head
    /// with its still-streaming body.
    ///
    /// # Errors
    ///
    /// Returns the cause when the connection, the TLS handshake or the HTTP
    /// exchange fails.
    pub async fn send(
        &self,
        method: &Method,
        url: &Url,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response<Incoming>, BoxError> {
        if self.https_only && url.scheme() == "http" {
            return Err("plain http is disabled by https_only".into());
        }
        let (host, port) = endpoint(url)?;
        let request = self.build_request(method, url, headers, body)?;

        let tcp = tokio::time::timeout(self.connect_timeout, TcpStream::connect((host.as_str(), port)))
            .await
            .map_err(|_| format!("connect to {host}:{port} timed out"))??;
        tcp.set_nodelay(true)?;

        tracing::debug!(target: "niupee::transport", %method, %url, "connected to {}:{}", host, port);

        match url.scheme() {
            "https" => {
                let tls = self
                    .tls
                    .as_ref()
                    .ok_or("TLS is unavailable for https requests")?;
                let server_name = ServerName::try_from(host.clone())?;
                let stream = tls.connect(server_name, tcp).await?;
                exchange(stream, request).await
            }
            "http" => exchange(tcp, request).await,
            other => Err(format!("unsupported scheme {other:?}").into()),
        }
    }

    fn build_request(
        &self,
        method: &Method,
        url: &Url,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Request<Full<Bytes>>, BoxError> {
        let authority = &url[Position::BeforeHost..Position::BeforePath];
        let target: Uri = url[Position::BeforePath..Position::AfterQuery].parse()?;

        let mut request = Request::new(Full::new(body));
        *request.method_mut() = method.clone();
        *request.uri_mut() = target;
        *request.headers_mut() = headers;

        let headers = request.headers_mut();
        if !headers.contains_key(HOST) {
            headers.insert(HOST, HeaderValue::from_str(authority)?);
        }
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, self.user_agent.clone());
        }
        Ok(request)
    }
}

/// Apply the defaults a browser adds before sending: the body's content
/// type when none was set, and no cookies when credentials are omitted.
pub(crate) fn apply_request_defaults(
    headers: &mut HeaderMap,
    body: &RequestBody,
    credentials: CredentialsMode,
) {
    if let Some(content_type) = body.default_content_type()
        && !headers.contains_key(CONTENT_TYPE)
    {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    if credentials == CredentialsMode::Omit {
        headers.remove(COOKIE);
    }
}

/// The declared body length, if any.
pub(crate) fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

fn endpoint(url: &Url) -> Result<(String, u16), BoxError> {
    let host = match url.host() {
        Some(Host::Ipv6(addr)) => addr.to_string(),
        Some(host) => host.to_string(),
        None => return Err(format!("url {url} has no host").into()),
    };
    let port = url
        .port_or_known_default()
        .ok_or_else(|| format!("url {url} has no port"))?;
    Ok((host, port))
}

async fn exchange<S>(stream: S, request: Request<Full<Bytes>>) -> Result<Response<Incoming>, BoxError>
where
    S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
{
    let (mut sender, connection) = hyper::client::conn::http1::handshake(TokioIo::new(stream)).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::debug!(target: "niupee::transport", error = %e, "connection closed with error");
        }
    });
    Ok(sender.send_request(request).await?)
}

fn tls_connector() -> Result<TlsConnector, rustls::Error> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(TlsConnector::from(Arc::new(config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_targets_origin_form_with_host() {
        let connector = Connector::new(&TransportConfig::default());
        let url = Url::parse("http://example.com:8080/a/b?x=1#frag").unwrap();
        let request = connector
            .build_request(&Method::GET, &url, HeaderMap::new(), Bytes::new())
            .unwrap();
        assert_eq!(request.uri(), "/a/b?x=1");
        assert_eq!(request.headers()[HOST], "example.com:8080");
        assert!(request.headers().contains_key(USER_AGENT));
    }

    #[test]
    fn defaults_add_content_type_and_strip_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("a=b"));
        apply_request_defaults(&mut headers, &RequestBody::from("hi"), CredentialsMode::Omit);
        assert!(!headers.contains_key(COOKIE));
        assert_eq!(headers[CONTENT_TYPE], "text/plain;charset=UTF-8");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/csv"));
        headers.insert(COOKIE, HeaderValue::from_static("a=b"));
        apply_request_defaults(&mut headers, &RequestBody::from("x,y"), CredentialsMode::Include);
        assert_eq!(headers[CONTENT_TYPE], "text/csv");
        assert!(headers.contains_key(COOKIE));
    }

    #[test]
    fn ipv6_endpoint_drops_brackets() {
        let url = Url::parse("http://[::1]:3000/").unwrap();
        assert_eq!(endpoint(&url).unwrap(), ("::1".to_string(), 3000));
    }
}
