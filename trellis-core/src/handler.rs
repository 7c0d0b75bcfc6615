//! The terminal handler of a matched route.
//!
//! A handler receives the final intercepted request and produces the
//! response. It is the endpoint of the pipeline; response interceptors run
//! after it, but nothing else consumes the request.
//!
//! Two forms are provided: [`RequestHandler`] uses a native async method for
//! zero-cost static dispatch, and [`DynRequestHandler`] is its object-safe
//! twin for storage in the route tree behind `Arc<dyn _>`. A blanket impl
//! converts the former into the latter, and async closures of the right shape
//! implement [`RequestHandler`] directly.

use crate::error::BoxError;
use crate::request::Request;
use crate::response::Response;
use futures::future::BoxFuture;
use std::future::Future;

/// The terminal endpoint of a request pipeline.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle requests",
    label = "missing `RequestHandler` implementation",
    note = "Handlers are async functions from `Request` to `Result<Response, BoxError>`."
)]
pub trait RequestHandler: Send + Sync + 'static {
    /// Turn the final intercepted request into a response.
    fn handle(&self, request: Request) -> impl Future<Output = Result<Response, BoxError>> + Send;
}

// Blanket impl for async closures.
impl<F, Fut> RequestHandler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Response, BoxError>> + Send,
{
    fn handle(&self, request: Request) -> impl Future<Output = Result<Response, BoxError>> + Send {
        (self)(request)
    }
}

/// Dynamic object-safe version of [`RequestHandler`].
pub trait DynRequestHandler: Send + Sync + 'static {
    /// Turn the final intercepted request into a response (dynamic dispatch
    /// version).
    fn handle_dyn(&self, request: Request) -> BoxFuture<'_, Result<Response, BoxError>>;
}

// Blanket implementation: any RequestHandler is a DynRequestHandler.
impl<T: RequestHandler> DynRequestHandler for T {
    fn handle_dyn(&self, request: Request) -> BoxFuture<'_, Result<Response, BoxError>> {
        Box::pin(self.handle(request))
    }
}
