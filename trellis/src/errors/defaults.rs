//! The default error handlers appended at table build time.
//!
//! Callers never see a stack trace: each default produces a terse response
//! body and logs the full error context server-side.

use trellis_core::{
    BoxError, InvalidCookieHeaderError, Request, Response, RouteNotFoundError, Status,
};

/// Default pre-response handler for [`RouteNotFoundError`]: a 404 naming the
/// method and path.
pub fn route_not_found(_error: &RouteNotFoundError, request: &Request) -> Response {
    Response::builder()
        .status(Status::NOT_FOUND)
        .utf8_body(format!(
            "No route found for http method '{}' on path '{}'.",
            request.method(),
            request.path()
        ))
        .build()
}

/// Default pre-response handler for [`InvalidCookieHeaderError`]: a 400
/// pointing at the formatting standard.
pub fn invalid_cookie_header(error: &InvalidCookieHeaderError, request: &Request) -> Response {
    tracing::warn!(
        header = %error.header,
        path = request.path(),
        "request attempted with an invalid cookie header"
    );
    Response::builder()
        .status(Status::BAD_REQUEST)
        .utf8_body(
            "Invalid cookies sent (did you forget to URL-encode them?). \
             Check your formatting against RFC 6265 standards.",
        )
        .build()
}

/// Default pre-response catch-all: a bare 500, with the error logged.
pub fn internal_server_error(error: &BoxError, request: &Request) -> Response {
    tracing::error!(
        error = %error,
        method = %request.method(),
        path = request.path(),
        "unexpected error while processing request"
    );
    Response::builder()
        .status(Status::INTERNAL_SERVER_ERROR)
        .utf8_body("Internal Server Error")
        .build()
}

/// Default post-response catch-all: a bare 500, with the error and the
/// discarded response status logged.
pub fn internal_server_error_with_response(
    error: &BoxError,
    request: &Request,
    response: &Response,
) -> Response {
    tracing::error!(
        error = %error,
        method = %request.method(),
        path = request.path(),
        discarded_status = response.status().code(),
        "unexpected error while adapting response"
    );
    Response::builder()
        .status(Status::INTERNAL_SERVER_ERROR)
        .utf8_body("Internal Server Error")
        .build()
}
