//! Explicit request context handed to the dispatcher by the transport layer.

use http::Method;
use std::collections::HashMap;

/// Method, path and query of one request, plus the script location used to
/// build absolute URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub method: Method,
    /// Request path without the query string
    pub path: String,
    /// Raw query string without the leading `?`
    pub query: String,
    /// Path of the entry script or mount point, e.g. `/app/index.php`
    pub script_name: String,
}

impl RequestContext {
    /// Build a context from a request URI such as `/admin/panel?tab=users`.
    #[must_use]
    pub fn from_uri(method: Method, request_uri: &str) -> Self {
        let (path, query) = match request_uri.split_once('?') {
            Some((path, query)) => (path, query),
            None => (request_uri, ""),
        };
        Self {
            method,
            path: path.to_string(),
            query: query.to_string(),
            script_name: "/".to_string(),
        }
    }

    /// Set the entry script path used by [`base_dir`](Self::base_dir).
    #[must_use]
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    /// Decoded query parameters. Repeated names keep the last value.
    #[must_use]
    pub fn query_params(&self) -> HashMap<String, String> {
        url::form_urlencoded::parse(self.query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Directory of the entry script, with a trailing `/`.
    ///
    /// `/app/index.php` gives `/app/`, `/index.php` gives `/`.
    #[must_use]
    pub fn base_dir(&self) -> &str {
        match self.script_name.rfind('/') {
            Some(idx) => &self.script_name[..=idx],
            None => "/",
        }
    }

    /// Absolute URL for a path relative to the application root.
    ///
    /// ```
    /// use http::Method;
    /// use multiroute::context::RequestContext;
    ///
    /// let ctx = RequestContext::from_uri(Method::GET, "/app/admin/panel")
    ///     .with_script_name("/app/index.php");
    /// assert_eq!(ctx.build_url("login"), "/app/login");
    /// ```
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_dir(), path)
    }
}
