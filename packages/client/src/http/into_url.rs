use url::Url;

use crate::error::{Error, builder};

/// A trait to try to convert some type into a `Url`.
///
/// This trait is "sealed", such that only types within niupee can
/// implement it.
pub trait IntoUrl: IntoUrlSealed {}

impl IntoUrl for Url {}
impl IntoUrl for String {}
impl IntoUrl for &str {}
impl IntoUrl for &String {}

pub trait IntoUrlSealed {
    /// Besides parsing as a valid `Url`, the `Url` must use the `http` or
    /// `https` scheme and carry a host, so that it makes sense to use in a
    /// network request.
    ///
    /// # Errors
    ///
    /// Returns a `builder` error if the string is malformed or the scheme
    /// is not usable for a network request.
    fn into_url(self) -> Result<Url, Error>;

    fn as_str(&self) -> &str;
}

impl IntoUrlSealed for Url {
    fn into_url(self) -> Result<Url, Error> {
        if self.has_host() && matches!(self.scheme(), "http" | "https") {
            Ok(self)
        } else {
            Err(builder(format!("Bad scheme in URL: {self}")))
        }
    }

    fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl IntoUrlSealed for &str {
    fn into_url(self) -> Result<Url, Error> {
        Url::parse(self).map_err(builder)?.into_url()
    }

    fn as_str(&self) -> &str {
        self
    }
}

impl IntoUrlSealed for &String {
    fn into_url(self) -> Result<Url, Error> {
        (&**self).into_url()
    }

    fn as_str(&self) -> &str {
        self.as_ref()
    }
}

impl IntoUrlSealed for String {
    fn into_url(self) -> Result<Url, Error> {
        (&*self).into_url()
    }

    fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_url_accepts_http_and_https() {
        assert!("http://example.com".into_url().is_ok());
        assert!(String::from("https://example.com/a?b=c").into_url().is_ok());
    }

    #[test]
    fn into_url_rejects_unusable_urls() {
        let err = "file:///etc/hosts".into_url().unwrap_err();
        assert!(err.is_builder());
        assert!("not a url".into_url().unwrap_err().is_builder());
        assert!("mailto:someone@example.com".into_url().is_err());
    }
}
