//! Error types crossing the engine boundary.
//!
//! Handlers and interceptors fail with the opaque [`BoxError`]; the concrete
//! types here are the ones the engine itself raises (or that default error
//! handlers must be able to match) and are therefore part of the public
//! contract.

use crate::method::Method;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// This is what user-supplied handlers and interceptors return on failure,
/// and what the error-handler tables dispatch on.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A URI path did not conform to the splitting rule.
///
/// Paths must start with `/`, and empty segments (two adjacent slashes) are
/// rejected. A single trailing slash is tolerated and ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    /// The path did not begin with a `/`.
    #[error("path {0:?} does not start with '/'")]
    MissingLeadingSlash(String),

    /// The path contained an empty segment (two adjacent slashes).
    #[error("path {0:?} contains an empty segment")]
    EmptySegment(String),
}

/// No handler was registered for the requested method and path.
///
/// The only negative outcome of route traversal. The default pre-response
/// error table converts this into a not-found response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no route found for http method {method} on path {path:?}")]
pub struct RouteNotFoundError {
    /// The method of the unmatched request.
    pub method: Method,
    /// The raw path of the unmatched request.
    pub path: String,
}

/// A status code outside the valid HTTP range was supplied.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{0} is not a valid http status code")]
pub struct InvalidStatusError(pub u16);

/// A request carried a cookie header that could not be parsed.
///
/// Produced by the cookie-parsing collaborator outside this engine; declared
/// here because the default pre-response error table matches it to emit a
/// bad-request response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid cookie header: {header:?}")]
pub struct InvalidCookieHeaderError {
    /// The offending raw header value.
    pub header: String,
}
