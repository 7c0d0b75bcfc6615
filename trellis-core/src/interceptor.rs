//! Request and response interceptors.
//!
//! Interceptors are the cross-cutting stages of the pipeline. Request
//! interceptors run before the handler in registration order, outermost path
//! scope first; response interceptors run after the handler in the reverse
//! order, handler-adjacent scope first. Each stage receives the current value
//! and returns the next one, so a chain is a fold, not a mutation.
//!
//! As with handlers, each trait has a native-async form for static dispatch
//! and an object-safe `Dyn*` twin produced by a blanket impl, plus blanket
//! impls for async closures.

use crate::error::BoxError;
use crate::request::Request;
use crate::response::Response;
use futures::future::BoxFuture;
use std::future::Future;

/// A pre-handler stage that maps the current request to the next one.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot intercept requests",
    label = "missing `RequestInterceptor` implementation",
    note = "Request interceptors are async functions from `Request` to `Result<Request, BoxError>`."
)]
pub trait RequestInterceptor: Send + Sync + 'static {
    /// Produce the next request from the current one.
    fn intercept(&self, request: Request) -> impl Future<Output = Result<Request, BoxError>> + Send;
}

impl<F, Fut> RequestInterceptor for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Request, BoxError>> + Send,
{
    fn intercept(&self, request: Request) -> impl Future<Output = Result<Request, BoxError>> + Send {
        (self)(request)
    }
}

/// Dynamic object-safe version of [`RequestInterceptor`].
pub trait DynRequestInterceptor: Send + Sync + 'static {
    /// Produce the next request from the current one (dynamic dispatch
    /// version).
    fn intercept_dyn(&self, request: Request) -> BoxFuture<'_, Result<Request, BoxError>>;
}

impl<T: RequestInterceptor> DynRequestInterceptor for T {
    fn intercept_dyn(&self, request: Request) -> BoxFuture<'_, Result<Request, BoxError>> {
        Box::pin(self.intercept(request))
    }
}

/// A post-handler stage that maps the current response to the next one.
///
/// The request the handler saw is supplied alongside for context.
pub trait ResponseInterceptor: Send + Sync + 'static {
    /// Produce the next response from the current one.
    fn intercept(
        &self,
        request: Request,
        response: Response,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send;
}

impl<F, Fut> ResponseInterceptor for F
where
    F: Fn(Request, Response) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, BoxError>> + Send,
{
    fn intercept(
        &self,
        request: Request,
        response: Response,
    ) -> impl Future<Output = Result<Response, BoxError>> + Send {
        (self)(request, response)
    }
}

/// Dynamic object-safe version of [`ResponseInterceptor`].
pub trait DynResponseInterceptor: Send + Sync + 'static {
    /// Produce the next response from the current one (dynamic dispatch
    /// version).
    fn intercept_dyn(
        &self,
        request: Request,
        response: Response,
    ) -> BoxFuture<'_, Result<Response, BoxError>>;
}

impl<T: ResponseInterceptor> DynResponseInterceptor for T {
    fn intercept_dyn(
        &self,
        request: Request,
        response: Response,
    ) -> BoxFuture<'_, Result<Response, BoxError>> {
        Box::pin(self.intercept(request, response))
    }
}
