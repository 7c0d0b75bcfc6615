//! # trellis-core
//!
//! Boundary contracts for the Trellis request routing and pipeline engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! transport adapters and application code that don't need the full `trellis`
//! engine. It defines:
//!
//! - The request and response value objects, reduced to the fields the engine
//!   reads or writes ([`Request`], [`Response`], [`Method`], [`Status`]).
//! - The pipeline traits crossed by user code: [`RequestHandler`],
//!   [`RequestInterceptor`], and [`ResponseInterceptor`], each with an
//!   object-safe `Dyn*` twin for storage behind `Arc<dyn _>`.
//! - The error types that travel across the boundary, including the opaque
//!   [`BoxError`] returned by handlers and interceptors.
//!
//! # Pipeline contracts
//!
//! A request interceptor receives the current request and produces the next
//! one; a handler turns the final request into a response; a response
//! interceptor receives the request plus the current response and produces the
//! next response. All three are async and may fail with any error type, which
//! the engine routes through its error-handler tables.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod interceptor;
mod method;
mod request;
mod response;

pub use error::{BoxError, InvalidCookieHeaderError, InvalidPathError, InvalidStatusError, RouteNotFoundError};
pub use handler::{DynRequestHandler, RequestHandler};
pub use interceptor::{
    DynRequestInterceptor, DynResponseInterceptor, RequestInterceptor, ResponseInterceptor,
};
pub use method::Method;
pub use request::Request;
pub use response::{Response, ResponseBody, ResponseBuilder, SetCookie, Status};
