//! Local path rewrite rule.
//!
//! When the form and the answer service share an origin, requests to
//! `/api/<path>` are forwarded to `<destination>/<path>`. A configured
//! endpoint that is a bare path is resolved through this rule.

use url::Url;

/// Default rewrite source prefix.
pub const DEFAULT_PROXY_SOURCE: &str = "/api/";
/// Default rewrite destination origin.
pub const DEFAULT_PROXY_DESTINATION: &str = "http://localhost:8000/";

/// A single prefix rewrite, `/api/:path*` → `http://localhost:8000/:path*`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProxyRule {
    source: String,
    destination: Url,
}

impl ProxyRule {
    /// Create a rule. The source is normalised to start and end with `/`,
    /// and the destination to end with `/` so joins keep its path.
    pub fn new(source: impl Into<String>, mut destination: Url) -> Self {
        let mut source = source.into();
        if !source.starts_with('/') {
            source.insert(0, '/');
        }
        if !source.ends_with('/') {
            source.push('/');
        }
        if !destination.path().ends_with('/') {
            let path = format!("{}/", destination.path());
            destination.set_path(&path);
        }
        Self {
            source,
            destination,
        }
    }

    /// Path prefix this rule rewrites
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Origin (and base path) requests are forwarded to
    pub fn destination(&self) -> &Url {
        &self.destination
    }

    /// Whether `path` falls under this rule
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(&self.source) || path == self.source.trim_end_matches('/')
    }

    /// Rewrite `path` onto the destination, or `None` if the rule does not apply.
    ///
    /// The remainder after the prefix is always joined as a relative path, so
    /// a rewrite never leaves the destination origin.
    pub fn rewrite(&self, path: &str) -> Option<Url> {
        if path == self.source.trim_end_matches('/') {
            return Some(self.destination.clone());
        }
        let rest = path.strip_prefix(&self.source)?.trim_start_matches('/');
        if Url::parse(rest).is_ok() {
            tracing::debug!(path, "Proxy rewrite rejected an absolute URL");
            return None;
        }
        match self.destination.join(rest) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(path, error = %e, "Proxy rewrite produced an invalid URL");
                None
            }
        }
    }
}

impl Default for ProxyRule {
    fn default() -> Self {
        Self {
            source: DEFAULT_PROXY_SOURCE.to_string(),
            destination: Url::parse(DEFAULT_PROXY_DESTINATION)
                .expect("default proxy destination is a valid URL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rewrite() {
        let rule = ProxyRule::default();
        assert_eq!(
            rule.rewrite("/api/query").unwrap().as_str(),
            "http://localhost:8000/query"
        );
        assert_eq!(
            rule.rewrite("/api/a/b?x=1").unwrap().as_str(),
            "http://localhost:8000/a/b?x=1"
        );
    }

    #[test]
    fn test_bare_prefix_maps_to_origin() {
        let rule = ProxyRule::default();
        assert_eq!(rule.rewrite("/api").unwrap().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_non_matching_path() {
        let rule = ProxyRule::default();
        assert!(rule.rewrite("/query").is_none());
        assert!(rule.rewrite("/apix/query").is_none());
        assert!(!rule.matches("/static/app.js"));
    }

    #[test]
    fn test_absolute_remainder_rejected() {
        let rule = ProxyRule::default();
        assert!(rule.rewrite("/api/http://other.host/x").is_none());
        assert!(rule.rewrite("/api/https:other.host").is_none());
        assert_eq!(
            rule.rewrite("/api//other.host/x").unwrap().as_str(),
            "http://localhost:8000/other.host/x"
        );
    }

    #[test]
    fn test_normalisation_keeps_destination_path() {
        let rule = ProxyRule::new("backend", Url::parse("http://svc:9000/v1").unwrap());
        assert_eq!(rule.source(), "/backend/");
        assert_eq!(
            rule.rewrite("/backend/query").unwrap().as_str(),
            "http://svc:9000/v1/query"
        );
    }
}
