//! The response value object and its builder.

use crate::error::InvalidStatusError;

/// An HTTP status: code plus canonical reason phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    code: u16,
    reason: &'static str,
}

impl Status {
    /// 200 OK.
    pub const OK: Status = Status { code: 200, reason: "OK" };
    /// 400 Bad Request.
    pub const BAD_REQUEST: Status = Status { code: 400, reason: "Bad Request" };
    /// 404 Not Found.
    pub const NOT_FOUND: Status = Status { code: 404, reason: "Not Found" };
    /// 500 Internal Server Error.
    pub const INTERNAL_SERVER_ERROR: Status = Status { code: 500, reason: "Internal Server Error" };

    /// Build a status from a bare code, validating the HTTP range.
    ///
    /// Codes with a well-known reason phrase get it; others carry an empty
    /// reason.
    pub fn from_code(code: u16) -> Result<Status, InvalidStatusError> {
        if !(100..=599).contains(&code) {
            return Err(InvalidStatusError(code));
        }
        let reason = match code {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "",
        };
        Ok(Status { code, reason })
    }

    /// The numeric status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The canonical reason phrase, or an empty string for uncommon codes.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// The body of a response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResponseBody {
    /// No body.
    #[default]
    Empty,
    /// A UTF-8 text body.
    Utf8(String),
    /// A raw byte body.
    Bytes(Vec<u8>),
}

/// A cookie to set on the response. RFC validation is the transport
/// adapter's concern; the engine only carries the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCookie {
    /// The cookie name.
    pub name: String,
    /// The cookie value.
    pub value: String,
}

/// An outgoing response, reduced to the fields the engine touches.
#[derive(Debug, Clone)]
pub struct Response {
    status: Status,
    body: ResponseBody,
    headers: Vec<(String, String)>,
    cookies: Vec<SetCookie>,
}

impl Response {
    /// Start building a response. Defaults to 200 with an empty body.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder::new()
    }

    /// The response status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// The response body.
    pub fn body(&self) -> &ResponseBody {
        &self.body
    }

    /// The response headers, in the order they were added.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The cookies to set on the response.
    pub fn cookies(&self) -> &[SetCookie] {
        &self.cookies
    }
}

/// Staged construction for [`Response`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    status: Option<Status>,
    body: ResponseBody,
    headers: Vec<(String, String)>,
    cookies: Vec<SetCookie>,
}

impl ResponseBuilder {
    /// Create a builder with the defaults (200, empty body).
    pub fn new() -> Self {
        ResponseBuilder::default()
    }

    /// Set the status.
    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set a UTF-8 text body.
    pub fn utf8_body(mut self, body: impl Into<String>) -> Self {
        self.body = ResponseBody::Utf8(body.into());
        self
    }

    /// Set a raw byte body.
    pub fn bytes_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = ResponseBody::Bytes(body.into());
        self
    }

    /// Append a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a cookie.
    pub fn cookie(mut self, cookie: SetCookie) -> Self {
        self.cookies.push(cookie);
        self
    }

    /// Finish the response.
    pub fn build(self) -> Response {
        Response {
            status: self.status.unwrap_or(Status::OK),
            body: self.body,
            headers: self.headers,
            cookies: self.cookies,
        }
    }
}
