//! HTTP method newtype.

use std::borrow::Cow;
use std::fmt;

/// An HTTP method, compared case-sensitively.
///
/// Constants are provided for the common verbs; any other token can be built
/// with [`Method::new`]. Methods key the per-node handler map in the route
/// tree, so two handlers for the same method at the same path collide while
/// different methods coexist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Method(Cow<'static, str>);

impl Method {
    /// The `GET` method.
    pub const GET: Method = Method(Cow::Borrowed("GET"));
    /// The `POST` method.
    pub const POST: Method = Method(Cow::Borrowed("POST"));
    /// The `PUT` method.
    pub const PUT: Method = Method(Cow::Borrowed("PUT"));
    /// The `DELETE` method.
    pub const DELETE: Method = Method(Cow::Borrowed("DELETE"));
    /// The `PATCH` method.
    pub const PATCH: Method = Method(Cow::Borrowed("PATCH"));
    /// The `HEAD` method.
    pub const HEAD: Method = Method(Cow::Borrowed("HEAD"));
    /// The `OPTIONS` method.
    pub const OPTIONS: Method = Method(Cow::Borrowed("OPTIONS"));

    /// Create a method from an arbitrary token.
    pub fn new(method: impl Into<String>) -> Self {
        Method(Cow::Owned(method.into()))
    }

    /// The method token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&'static str> for Method {
    fn from(method: &'static str) -> Self {
        Method(Cow::Borrowed(method))
    }
}
