//! # trellis - Route-Tree Matching and Pipeline Execution
//!
//! `trellis` is the dispatch core of a server-side request/response pipeline:
//! given an incoming method and path it locates the matching handler, collects
//! the ordered chain of interceptors scoped to that path, extracts named path
//! parameters, and executes the whole pipeline under a two-phase
//! error-handling contract that always produces a response.
//!
//! ## Architecture
//!
//! - [`RoutesBuilder`] parses raw path strings into the immutable route tree
//!   ([`RouteTreeNode`]), where static segments take precedence over `{name}`
//!   pattern segments at every level.
//! - [`traverse`] walks the tree for one request, producing an
//!   [`ExecutionPlan`]: interceptors in root-to-leaf order, the chosen
//!   handler, and the captured path parameters.
//! - [`PlanExecutor`] runs a plan: request interceptors in order, the handler,
//!   then response interceptors in reverse order, each phase guarded by the
//!   error-handler tables.
//! - [`ErrorHandlersBuilder`] registers typed error handlers in two tables
//!   (pre-response and post-response); registration order is priority order,
//!   and defaults for not-found, invalid cookie headers, and a catch-all are
//!   appended at build time.
//! - [`App`] wires the frozen tree and tables together behind a single
//!   `handle(request)` entry point for the transport adapter.
//!
//! Everything mutable lives in the builders. The built tree, tables, and app
//! are immutable and freely shared across concurrent requests without locks.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use trellis::{App, Method, Request, Response, RoutesBuilder};
//!
//! let routes = RoutesBuilder::new()
//!     .add_handler(Method::GET, "/users/{id}", |req: Request| async move {
//!         let id = req.path_parameter("id").unwrap_or("?").to_owned();
//!         Ok(Response::builder().utf8_body(id).build())
//!     })?
//!     .build();
//!
//! let app = App::builder().routes(routes).build()?;
//! let response = app.handle(Request::new(Method::GET, "/users/42")).await?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod app;
mod errors;
mod plan;
mod routes_builder;
mod routing;

pub use app::{App, AppBuildError, AppBuilder};
pub use errors::defaults;
pub use errors::registry::{ErrorHandlersBuilder, RegistryBuildError};
pub use errors::{DispatchExhaustedError, ErrorHandlers, Table};
pub use plan::executor::PlanExecutor;
pub use plan::{ExecutionPlan, ExecutionPlanBuilder, PlanBuildError};
pub use routes_builder::{RouteBuildError, RoutesBuilder};
pub use routing::path::split_path;
pub use routing::traverser::{TraverseError, traverse};
pub use routing::tree::RouteTreeNode;

pub use trellis_core::{
    // Opaque pipeline error
    BoxError,
    // Pipeline traits
    DynRequestHandler,
    DynRequestInterceptor,
    DynResponseInterceptor,
    // Boundary error types
    InvalidCookieHeaderError,
    InvalidPathError,
    InvalidStatusError,
    // Value objects
    Method,
    Request,
    RequestHandler,
    RequestInterceptor,
    Response,
    ResponseBody,
    ResponseBuilder,
    ResponseInterceptor,
    RouteNotFoundError,
    SetCookie,
    Status,
};
