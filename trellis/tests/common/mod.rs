//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use trellis::{
    BoxError, Request, RequestHandler, RequestInterceptor, Response, ResponseInterceptor, Status,
};

/// A handler that counts invocations and answers with a fixed body tag.
pub struct CountingHandler {
    pub calls: Arc<AtomicUsize>,
    pub tag: &'static str,
}

impl CountingHandler {
    pub fn new(tag: &'static str) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            CountingHandler {
                calls: calls.clone(),
                tag,
            },
            calls,
        )
    }
}

impl RequestHandler for CountingHandler {
    async fn handle(&self, _request: Request) -> Result<Response, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Response::builder().utf8_body(self.tag).build())
    }
}

/// A handler that always fails with [`TestError`].
pub struct FailingHandler;

impl RequestHandler for FailingHandler {
    async fn handle(&self, _request: Request) -> Result<Response, BoxError> {
        Err(Box::new(TestError("handler blew up".to_owned())))
    }
}

/// A request interceptor that appends its tag to a shared log and passes the
/// request through unchanged.
pub struct RecordingRequestInterceptor {
    pub log: Arc<Mutex<Vec<&'static str>>>,
    pub tag: &'static str,
}

impl RequestInterceptor for RecordingRequestInterceptor {
    async fn intercept(&self, request: Request) -> Result<Request, BoxError> {
        self.log.lock().unwrap().push(self.tag);
        Ok(request)
    }
}

/// A response interceptor that appends its tag to a shared log and passes the
/// response through unchanged.
pub struct RecordingResponseInterceptor {
    pub log: Arc<Mutex<Vec<&'static str>>>,
    pub tag: &'static str,
}

impl ResponseInterceptor for RecordingResponseInterceptor {
    async fn intercept(&self, _request: Request, response: Response) -> Result<Response, BoxError> {
        self.log.lock().unwrap().push(self.tag);
        Ok(response)
    }
}

/// An opaque application error for failure-path tests.
#[derive(Error, Debug)]
#[error("{0}")]
pub struct TestError(pub String);

/// An error enum standing in for a small error hierarchy: a handler
/// registered for the enum covers every variant.
#[derive(Error, Debug)]
pub enum ParentError {
    #[error("specific failure")]
    Specific,
    #[error("other failure")]
    Other,
}

/// Shorthand for the fixed response a test error handler emits.
pub fn tagged_response(status: Status, tag: &str) -> Response {
    Response::builder().status(status).utf8_body(tag).build()
}

/// Extract a UTF-8 body or panic.
pub fn body_text(response: &Response) -> &str {
    match response.body() {
        trellis::ResponseBody::Utf8(text) => text,
        other => panic!("expected utf8 body, got {other:?}"),
    }
}
