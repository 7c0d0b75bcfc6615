//! The assembled application: frozen routes plus frozen error tables.

use crate::errors::registry::ErrorHandlersBuilder;
use crate::errors::{DispatchExhaustedError, ErrorHandlers};
use crate::plan::executor::PlanExecutor;
use crate::routing::traverser::traverse;
use crate::routing::tree::RouteTreeNode;
use std::sync::Arc;
use thiserror::Error;
use trellis_core::{Request, Response};

/// Failure to assemble an [`App`].
#[derive(Error, Debug)]
pub enum AppBuildError {
    /// No route tree was supplied.
    #[error("an app requires routes to dispatch requests into")]
    MissingRoutes,

    /// Building the default error tables failed.
    #[error(transparent)]
    Registry(#[from] crate::errors::registry::RegistryBuildError),
}

/// The dispatch entry point handed to the transport adapter.
///
/// Holds nothing but frozen state, so one `App` serves unlimited concurrent
/// requests without locks; each call to [`App::handle`] owns its request,
/// plan, and response exclusively.
pub struct App {
    routes: RouteTreeNode,
    executor: PlanExecutor,
}

impl App {
    /// Start assembling an app.
    pub fn builder() -> AppBuilder {
        AppBuilder::default()
    }

    /// Process one request to a response.
    ///
    /// Traversal failures are dispatched through the pre-response table (the
    /// default tables turn an unmatched route into a 404), so the only error
    /// that can escape is an exhausted dispatch table, which the transport
    /// adapter is expected to turn into a minimal hardcoded error response.
    pub async fn handle(&self, request: Request) -> Result<Response, DispatchExhaustedError> {
        let plan = match traverse(&self.routes, request.method(), request.path()) {
            Ok(plan) => plan,
            Err(error) => {
                let error = error.into_source();
                return self
                    .executor
                    .error_handlers()
                    .handle_pre_response(&error, &request);
            }
        };
        let request = request.with_path_parameters(plan.path_parameters().clone());
        self.executor.execute(&plan, request).await
    }
}

/// Staged construction for [`App`].
#[derive(Default)]
pub struct AppBuilder {
    routes: Option<RouteTreeNode>,
    error_handlers: Option<ErrorHandlers>,
}

impl AppBuilder {
    /// Supply the frozen route tree. Required.
    pub fn routes(mut self, routes: RouteTreeNode) -> Self {
        self.routes = Some(routes);
        self
    }

    /// Supply custom error tables. When omitted, the default tables are
    /// built (not-found, invalid-cookie, and catch-all handlers only).
    pub fn error_handlers(mut self, error_handlers: ErrorHandlers) -> Self {
        self.error_handlers = Some(error_handlers);
        self
    }

    /// Assemble the app.
    pub fn build(self) -> Result<App, AppBuildError> {
        let routes = self.routes.ok_or(AppBuildError::MissingRoutes)?;
        let error_handlers = match self.error_handlers {
            Some(handlers) => handlers,
            None => ErrorHandlersBuilder::new().build()?,
        };
        Ok(App {
            routes,
            executor: PlanExecutor::new(Arc::new(error_handlers)),
        })
    }
}
