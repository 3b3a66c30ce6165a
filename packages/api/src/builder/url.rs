//! URL stage: query editing before headers are set

use http::Method;
use niupee_client::http::{QueryParameterList, canonical_url};
use url::Url;

use super::headers::HeaderStage;

/// First stage of a request: owns the method, URL and query list.
///
/// The query list starts as the URL's own query, in order.
#[derive(Debug, Clone)]
pub struct UrlStage {
    method: Method,
    url: Url,
    query: QueryParameterList,
    debug_enabled: bool,
}

impl UrlStage {
    pub(crate) fn new(method: Method, url: Url) -> Self {
        let query = QueryParameterList::from_url(&url);
        Self {
            method,
            url,
            query,
            debug_enabled: false,
        }
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn query(&self) -> &QueryParameterList {
        &self.query
    }

    /// Enable debug logging for this request
    ///
    /// When enabled, the fired request line is logged at debug level.
    #[must_use]
    pub fn debug(mut self) -> Self {
        self.debug_enabled = true;
        self
    }

    /// Replace the whole query list
    ///
    /// # Examples
    /// ```no_run
    /// # fn main() -> niupee::Result<()> {
    /// let stage = niupee::get("http://pp.com/search?num=4")?
    ///     .reset_query([("age", "15"), ("num", "30")]);
    /// assert_eq!(stage.ready_for_headers().url().as_str(), "http://pp.com/search?age=15&num=30");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn reset_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query.reset(pairs);
        self
    }

    /// Remove every entry whose key appears in `pairs`, then append one entry per key (last value wins)
    ///
    /// # Examples
    /// ```no_run
    /// # fn main() -> niupee::Result<()> {
    /// let stage = niupee::get("http://pp.com/search?num=4&age=3&num=9")?
    ///     .replace_query([("age", "3"), ("num", "10")]);
    /// assert_eq!(stage.ready_for_headers().url().as_str(), "http://pp.com/search?age=3&num=10");
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn replace_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query.replace(pairs);
        self
    }

    /// Append `pairs`, keeping existing entries with the same keys
    #[must_use]
    pub fn add_query<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query.add(pairs);
        self
    }

    /// Serialize the canonical URL and move on to the header stage
    ///
    /// The URL is rebuilt from origin, path, the query list in order and the
    /// fragment if there is one.
    #[must_use]
    pub fn ready_for_headers(self) -> HeaderStage {
        let url = canonical_url(&self.url, &self.query);
        if self.debug_enabled {
            log::debug!("niupee: {} {url} ready for headers", self.method);
        }
        HeaderStage::new(self.method, url, self.debug_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(url: &str) -> UrlStage {
        UrlStage::new(Method::GET, Url::parse(url).unwrap())
    }

    #[test]
    fn add_query_keeps_duplicates() {
        let headers = stage("http://pp.com/search?num=4&age=3&num=9")
            .add_query([("num", "11"), ("fruit", "apple"), ("age", "11")])
            .ready_for_headers();
        assert_eq!(
            headers.url().as_str(),
            "http://pp.com/search?num=4&age=3&num=9&num=11&fruit=apple&age=11"
        );
    }

    #[test]
    fn empty_query_drops_question_mark_and_keeps_fragment() {
        let headers = stage("http://pp.com/a?x=1#top")
            .reset_query(Vec::<(String, String)>::new())
            .ready_for_headers();
        assert_eq!(headers.url().as_str(), "http://pp.com/a#top");
    }

    #[test]
    fn replace_removes_every_prior_entry() {
        let headers = stage("http://pp.com/s?num=4&age=3&num=9")
            .replace_query([("num", "10")])
            .ready_for_headers();
        assert_eq!(headers.url().as_str(), "http://pp.com/s?age=3&num=10");
    }
}
