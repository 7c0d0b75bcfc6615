//! The request value object.

use crate::method::Method;
use std::collections::HashMap;

/// An already-parsed incoming request, reduced to the fields the engine
/// touches.
///
/// Transport concerns (bodies, query strings, cookie parsing) live in the
/// adapter that produced this value. The engine reads the method and path to
/// route, and rewrites the path-parameter map once a route has matched.
/// Interceptors receive the request by value and return the next version of
/// it, so the type is cheap to clone and carries no interior mutability.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    path: String,
    headers: HashMap<String, Vec<String>>,
    path_parameters: HashMap<String, String>,
}

impl Request {
    /// Create a request for the given method and raw path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            headers: HashMap::new(),
            path_parameters: HashMap::new(),
        }
    }

    /// Append a header value. Header names are normalized to lowercase.
    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .entry(name.as_ref().to_ascii_lowercase())
            .or_default()
            .push(value.into());
        self
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All values recorded for a header, case-insensitive on the name.
    pub fn header(&self, name: &str) -> Option<&[String]> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(Vec::as_slice)
    }

    /// The value captured for a named path parameter, if the matched route
    /// declared one.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters.get(name).map(String::as_str)
    }

    /// The full path-parameter map.
    pub fn path_parameters(&self) -> &HashMap<String, String> {
        &self.path_parameters
    }

    /// Copy this request with the path-parameter map replaced.
    ///
    /// The engine calls this once per request, after traversal and before the
    /// interceptor phase, with the parameters the matched route captured.
    pub fn with_path_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.path_parameters = parameters;
        self
    }
}
