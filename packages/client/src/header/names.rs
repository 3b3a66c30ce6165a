//! Canonical header names.
//!
//! Static catalog only; nothing in the request path validates against it.

/// Request header names.
pub mod request {
    pub const ACCEPT: &str = "Accept";
    pub const ACCEPT_CHARSET: &str = "Accept-Charset";
    pub const ACCEPT_ENCODING: &str = "Accept-Encoding";
    pub const ACCEPT_LANGUAGE: &str = "Accept-Language";
    pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "Access-Control-Request-Headers";
    pub const ACCESS_CONTROL_REQUEST_METHOD: &str = "Access-Control-Request-Method";
    pub const AUTHORIZATION: &str = "Authorization";
    pub const COOKIE: &str = "Cookie";
    pub const DNT: &str = "DNT";
    pub const EXPECT: &str = "Expect";
    pub const FORWARDED: &str = "Forwarded";
    pub const FROM: &str = "From";
    pub const HOST: &str = "Host";
    pub const IF_MATCH: &str = "If-Match";
    pub const IF_MODIFIED_SINCE: &str = "If-Modified-Since";
    pub const IF_NONE_MATCH: &str = "If-None-Match";
    pub const IF_RANGE: &str = "If-Range";
    pub const IF_UNMODIFIED_SINCE: &str = "If-Unmodified-Since";
    pub const MAX_FORWARDS: &str = "Max-Forwards";
    pub const ORIGIN: &str = "Origin";
    pub const PROXY_AUTHORIZATION: &str = "Proxy-Authorization";
    pub const RANGE: &str = "Range";
    pub const REFERER: &str = "Referer";
    pub const SEC_FETCH_DEST: &str = "Sec-Fetch-Dest";
    pub const SEC_FETCH_MODE: &str = "Sec-Fetch-Mode";
    pub const SEC_FETCH_SITE: &str = "Sec-Fetch-Site";
    pub const SEC_FETCH_USER: &str = "Sec-Fetch-User";
    pub const TE: &str = "TE";
    pub const UPGRADE_INSECURE_REQUESTS: &str = "Upgrade-Insecure-Requests";
    pub const USER_AGENT: &str = "User-Agent";

    pub const ALL: &[&str] = &[
        ACCEPT,
        ACCEPT_CHARSET,
        ACCEPT_ENCODING,
        ACCEPT_LANGUAGE,
        ACCESS_CONTROL_REQUEST_HEADERS,
        ACCESS_CONTROL_REQUEST_METHOD,
        AUTHORIZATION,
        COOKIE,
        DNT,
        EXPECT,
        FORWARDED,
        FROM,
        HOST,
        IF_MATCH,
        IF_MODIFIED_SINCE,
        IF_NONE_MATCH,
        IF_RANGE,
        IF_UNMODIFIED_SINCE,
        MAX_FORWARDS,
        ORIGIN,
        PROXY_AUTHORIZATION,
        RANGE,
        REFERER,
        SEC_FETCH_DEST,
        SEC_FETCH_MODE,
        SEC_FETCH_SITE,
        SEC_FETCH_USER,
        TE,
        UPGRADE_INSECURE_REQUESTS,
        USER_AGENT,
    ];
}

/// Response header names.
pub mod response {
    pub const ACCEPT_RANGES: &str = "Accept-Ranges";
    pub const ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
    pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
    pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
    pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
    pub const ACCESS_CONTROL_EXPOSE_HEADERS: &str = "Access-Control-Expose-Headers";
    pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
    pub const AGE: &str = "Age";
    pub const ALLOW: &str = "Allow";
    pub const CLEAR_SITE_DATA: &str = "Clear-Site-Data";
    pub const CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
    pub const ETAG: &str = "ETag";
    pub const EXPIRES: &str = "Expires";
    pub const LOCATION: &str = "Location";
    pub const PROXY_AUTHENTICATE: &str = "Proxy-Authenticate";
    pub const REFERRER_POLICY: &str = "Referrer-Policy";
    pub const RETRY_AFTER: &str = "Retry-After";
    pub const SERVER: &str = "Server";
    pub const SET_COOKIE: &str = "Set-Cookie";
    pub const STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
    pub const VARY: &str = "Vary";
    pub const WWW_AUTHENTICATE: &str = "WWW-Authenticate";
    pub const X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
    pub const X_FRAME_OPTIONS: &str = "X-Frame-Options";

    pub const ALL: &[&str] = &[
        ACCEPT_RANGES,
        ACCESS_CONTROL_ALLOW_CREDENTIALS,
        ACCESS_CONTROL_ALLOW_HEADERS,
        ACCESS_CONTROL_ALLOW_METHODS,
        ACCESS_CONTROL_ALLOW_ORIGIN,
        ACCESS_CONTROL_EXPOSE_HEADERS,
        ACCESS_CONTROL_MAX_AGE,
        AGE,
        ALLOW,
        CLEAR_SITE_DATA,
        CONTENT_SECURITY_POLICY,
        ETAG,
        EXPIRES,
        LOCATION,
        PROXY_AUTHENTICATE,
        REFERRER_POLICY,
        RETRY_AFTER,
        SERVER,
        SET_COOKIE,
        STRICT_TRANSPORT_SECURITY,
        VARY,
        WWW_AUTHENTICATE,
        X_CONTENT_TYPE_OPTIONS,
        X_FRAME_OPTIONS,
    ];
}

/// Names valid on both requests and responses.
pub mod common {
    pub const CACHE_CONTROL: &str = "Cache-Control";
    pub const CONNECTION: &str = "Connection";
    pub const CONTENT_DISPOSITION: &str = "Content-Disposition";
    pub const CONTENT_ENCODING: &str = "Content-Encoding";
    pub const CONTENT_LANGUAGE: &str = "Content-Language";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_LOCATION: &str = "Content-Location";
    pub const CONTENT_RANGE: &str = "Content-Range";
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const DATE: &str = "Date";
    pub const KEEP_ALIVE: &str = "Keep-Alive";
    pub const LAST_MODIFIED: &str = "Last-Modified";
    pub const PRAGMA: &str = "Pragma";
    pub const TRAILER: &str = "Trailer";
    pub const TRANSFER_ENCODING: &str = "Transfer-Encoding";
    pub const UPGRADE: &str = "Upgrade";
    pub const VIA: &str = "Via";
    pub const WARNING: &str = "Warning";

    pub const ALL: &[&str] = &[
        CACHE_CONTROL,
        CONNECTION,
        CONTENT_DISPOSITION,
        CONTENT_ENCODING,
        CONTENT_LANGUAGE,
        CONTENT_LENGTH,
        CONTENT_LOCATION,
        CONTENT_RANGE,
        CONTENT_TYPE,
        DATE,
        KEEP_ALIVE,
        LAST_MODIFIED,
        PRAGMA,
        TRAILER,
        TRANSFER_ENCODING,
        UPGRADE,
        VIA,
        WARNING,
    ];
}
