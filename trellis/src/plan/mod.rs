//! The execution plan: one request's fully resolved pipeline.

pub(crate) mod executor;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use trellis_core::{DynRequestHandler, DynRequestInterceptor, DynResponseInterceptor};

/// The fully resolved bundle for one request: interceptors in root-to-leaf
/// visiting order, exactly one handler, and the captured path parameters.
///
/// Built fresh per request by a tree walk, immutable afterwards, and owned
/// exclusively by that request's processing flow. Note that the response
/// interceptor list is stored in visiting order too; the executor applies it
/// in reverse.
pub struct ExecutionPlan {
    request_interceptors: Vec<Arc<dyn DynRequestInterceptor>>,
    handler: Arc<dyn DynRequestHandler>,
    response_interceptors: Vec<Arc<dyn DynResponseInterceptor>>,
    path_parameters: HashMap<String, String>,
}

impl ExecutionPlan {
    /// Request interceptors in root-to-leaf order.
    pub fn request_interceptors(&self) -> &[Arc<dyn DynRequestInterceptor>] {
        &self.request_interceptors
    }

    /// The handler chosen for the request's method and path.
    pub fn handler(&self) -> &Arc<dyn DynRequestHandler> {
        &self.handler
    }

    /// Response interceptors in root-to-leaf order (the executor reverses).
    pub fn response_interceptors(&self) -> &[Arc<dyn DynResponseInterceptor>] {
        &self.response_interceptors
    }

    /// Parameter name to captured literal segment value.
    pub fn path_parameters(&self) -> &HashMap<String, String> {
        &self.path_parameters
    }
}

/// Failure to finalize an [`ExecutionPlan`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanBuildError {
    /// `build()` was called before a handler was set.
    #[error("cannot build an execution plan without a handler")]
    MissingHandler,
}

/// Accumulates an [`ExecutionPlan`] during a tree walk.
///
/// Interceptor additions append across repeated calls; the handler is set
/// exactly once per walk; adding a path parameter under an existing name
/// overwrites it (name uniqueness within one route is enforced upstream at
/// registration time).
#[derive(Default)]
pub struct ExecutionPlanBuilder {
    request_interceptors: Vec<Arc<dyn DynRequestInterceptor>>,
    handler: Option<Arc<dyn DynRequestHandler>>,
    response_interceptors: Vec<Arc<dyn DynResponseInterceptor>>,
    path_parameters: HashMap<String, String>,
}

impl ExecutionPlanBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ExecutionPlanBuilder::default()
    }

    /// Append request interceptors in the order given.
    pub fn add_request_interceptors(
        &mut self,
        interceptors: impl IntoIterator<Item = Arc<dyn DynRequestInterceptor>>,
    ) -> &mut Self {
        self.request_interceptors.extend(interceptors);
        self
    }

    /// Append response interceptors in the order given.
    pub fn add_response_interceptors(
        &mut self,
        interceptors: impl IntoIterator<Item = Arc<dyn DynResponseInterceptor>>,
    ) -> &mut Self {
        self.response_interceptors.extend(interceptors);
        self
    }

    /// Set the handler for the plan.
    pub fn handler(&mut self, handler: Arc<dyn DynRequestHandler>) -> &mut Self {
        self.handler = Some(handler);
        self
    }

    /// Record a captured path parameter.
    pub fn add_path_parameter(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// Finalize the plan.
    pub fn build(self) -> Result<ExecutionPlan, PlanBuildError> {
        Ok(ExecutionPlan {
            request_interceptors: self.request_interceptors,
            handler: self.handler.ok_or(PlanBuildError::MissingHandler)?,
            response_interceptors: self.response_interceptors,
            path_parameters: self.path_parameters,
        })
    }
}
