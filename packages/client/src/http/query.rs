use url::Url;
use url::form_urlencoded;

/// Ordered `(key, value)` pairs of a URL query.
///
/// Duplicate keys are permitted and insertion order is preserved, so
/// serialization is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameterList {
    pairs: Vec<(String, String)>,
}

impl QueryParameterList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The decoded query pairs of `url`.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self {
            pairs: url.query_pairs().into_owned().collect(),
        }
    }

    /// Replace the entire list.
    pub fn reset<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pairs.clear();
        self.add(pairs);
    }

    /// Remove every existing entry whose key appears in `pairs`, then append `pairs`.
    ///
    /// `pairs` is read as a map: one entry per key, the last value given for
    /// a key wins and keeps that key's first position.
    pub fn replace<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut incoming: Vec<(String, String)> = Vec::new();
        for (key, value) in pairs {
            let (key, value) = (key.into(), value.into());
            match incoming.iter_mut().find(|(existing, _)| *existing == key) {
                Some(slot) => slot.1 = value,
                None => incoming.push((key, value)),
            }
        }
        self.pairs
            .retain(|(key, _)| !incoming.iter().any(|(replaced, _)| replaced == key));
        self.pairs.extend(incoming);
    }

    /// Append `pairs` unconditionally.
    pub fn add<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.pairs
            .extend(pairs.into_iter().map(|(key, value)| (key.into(), value.into())));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Every value recorded for `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `key=value` pairs joined by `&`, form-urlencoded, without a leading `?`.
    #[must_use]
    pub fn serialize(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

/// `url` with its query replaced by `query` and any userinfo dropped.
///
/// The result serializes as origin, path, query and fragment; the `?` is
/// omitted when `query` is empty and `#` appears only with a fragment.
#[must_use]
pub fn canonical_url(url: &Url, query: &QueryParameterList) -> Url {
    let mut canonical = url.clone();
    if query.is_empty() {
        canonical.set_query(None);
    } else {
        canonical.set_query(Some(&query.serialize()));
    }
    // Only fails for cannot-be-a-base URLs, which never carry userinfo.
    let _ = canonical.set_username("");
    let _ = canonical.set_password(None);
    canonical
}
