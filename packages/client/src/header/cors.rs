//! Fixed CORS-safelisted and forbidden header sets.
//!
//! These lists are advisory: the engines never filter headers against them.

use super::names::{common, request, response};

const CORS_SAFELISTED_REQUEST: &[&str] = &[
    request::ACCEPT,
    request::ACCEPT_LANGUAGE,
    common::CONTENT_LANGUAGE,
    common::CONTENT_TYPE,
];

const CORS_RESPONSE: &[&str] = &[
    response::ACCESS_CONTROL_ALLOW_CREDENTIALS,
    response::ACCESS_CONTROL_ALLOW_HEADERS,
    response::ACCESS_CONTROL_ALLOW_METHODS,
    response::ACCESS_CONTROL_ALLOW_ORIGIN,
    response::ACCESS_CONTROL_EXPOSE_HEADERS,
    response::ACCESS_CONTROL_MAX_AGE,
];

const FORBIDDEN_REQUEST: &[&str] = &[
    request::ACCEPT_ENCODING,
    request::ACCESS_CONTROL_REQUEST_HEADERS,
    request::ACCESS_CONTROL_REQUEST_METHOD,
    common::CONNECTION,
    common::CONTENT_LENGTH,
    request::COOKIE,
    common::DATE,
    request::EXPECT,
    request::HOST,
    common::KEEP_ALIVE,
    request::ORIGIN,
    request::REFERER,
    request::TE,
    common::TRAILER,
    common::TRANSFER_ENCODING,
    common::UPGRADE,
    common::VIA,
    request::PROXY_AUTHORIZATION,
    request::SEC_FETCH_DEST,
    request::SEC_FETCH_MODE,
    request::SEC_FETCH_SITE,
    request::SEC_FETCH_USER,
];

const FORBIDDEN_RESPONSE: &[&str] = &[response::SET_COOKIE];

const FORBIDDEN: &[&str] = &[
    request::ACCEPT_ENCODING,
    request::ACCESS_CONTROL_REQUEST_HEADERS,
    request::ACCESS_CONTROL_REQUEST_METHOD,
    common::CONNECTION,
    common::CONTENT_LENGTH,
    request::COOKIE,
    common::DATE,
    request::EXPECT,
    request::HOST,
    common::KEEP_ALIVE,
    request::ORIGIN,
    request::REFERER,
    request::TE,
    common::TRAILER,
    common::TRANSFER_ENCODING,
    common::UPGRADE,
    common::VIA,
    request::PROXY_AUTHORIZATION,
    request::SEC_FETCH_DEST,
    request::SEC_FETCH_MODE,
    request::SEC_FETCH_SITE,
    request::SEC_FETCH_USER,
    response::SET_COOKIE,
];

/// Request headers a cross-origin request may carry without a preflight.
#[must_use]
pub fn cors_safelisted_request_headers() -> &'static [&'static str] {
    CORS_SAFELISTED_REQUEST
}

/// Response headers exposed to cross-origin callers by default.
#[must_use]
pub fn cors_response_headers() -> &'static [&'static str] {
    CORS_RESPONSE
}

#[must_use]
pub fn forbidden_request_headers() -> &'static [&'static str] {
    FORBIDDEN_REQUEST
}

#[must_use]
pub fn forbidden_response_headers() -> &'static [&'static str] {
    FORBIDDEN_RESPONSE
}

/// Union of the forbidden request and response header names.
#[must_use]
pub fn forbidden_headers() -> &'static [&'static str] {
    FORBIDDEN
}

/// Whether `name` belongs to the default CORS response set.
#[must_use]
pub fn is_cors_response_header(name: &str) -> bool {
    contains(CORS_RESPONSE, name)
}

#[must_use]
pub fn is_cors_safelisted_request_header(name: &str) -> bool {
    contains(CORS_SAFELISTED_REQUEST, name)
}

#[must_use]
pub fn is_forbidden_request_header(name: &str) -> bool {
    contains(FORBIDDEN_REQUEST, name)
}

fn contains(set: &[&str], name: &str) -> bool {
    set.iter().any(|candidate| candidate.eq_ignore_ascii_case(name))
}
