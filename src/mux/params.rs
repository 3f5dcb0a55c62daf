//! Path parameters
//!
//! Parameter extraction itself belongs to the pattern matcher; this module
//! only carries the captured values from the match to the handler, riding in
//! request extensions.

use hyper::Request;

/// Parameters captured from placeholder segments of a matched pattern.
///
/// A route registered as `/users/{id}` and dispatched `/users/42` yields
/// `get("id") == Some("42")`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams {
    pairs: Vec<(String, String)>,
}

impl PathParams {
    /// Look up a captured parameter by placeholder name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Copy captured values out of a matcher result.
    pub(crate) fn from_matched(params: &matchit::Params<'_, '_>) -> Self {
        Self {
            pairs: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

/// Request extension methods for route-aware handlers.
pub trait RequestExt {
    /// Value of a path parameter captured by the matched pattern, if any.
    fn param(&self, name: &str) -> Option<&str>;
}

impl<B> RequestExt for Request<B> {
    fn param(&self, name: &str) -> Option<&str> {
        self.extensions()
            .get::<PathParams>()
            .and_then(|params| params.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;
    use hyper::body::Bytes;

    #[test]
    fn test_get_by_name() {
        let params = PathParams::from_pairs(vec![
            ("id".to_string(), "42".to_string()),
            ("tab".to_string(), "posts".to_string()),
        ]);
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("tab"), Some("posts"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_request_param_via_extensions() {
        let mut req = hyper::Request::builder()
            .uri("/users/42")
            .body(Full::new(Bytes::new()))
            .unwrap();
        req.extensions_mut()
            .insert(PathParams::from_pairs(vec![(
                "id".to_string(),
                "42".to_string(),
            )]));

        assert_eq!(req.param("id"), Some("42"));
        assert_eq!(req.param("name"), None);
    }

    #[test]
    fn test_request_param_without_match() {
        let req = hyper::Request::builder()
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        assert_eq!(req.param("id"), None);
    }
}
