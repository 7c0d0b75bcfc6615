//! Runs a built execution plan against one request.

use crate::errors::{DispatchExhaustedError, ErrorHandlers};
use crate::plan::ExecutionPlan;
use std::sync::Arc;
use trellis_core::{BoxError, Request, Response};

/// Executes plans under the two-phase error-handling contract.
///
/// Three strictly ordered phases, each guarded: request interceptors fold in
/// registration order, the handler runs once, response interceptors fold in
/// reverse registration order. A failure in the first two phases goes to the
/// pre-response table with the most recent valid request; a failure in the
/// third goes to the post-response table with the last good response. No
/// phase is retried, and side effects of a failing stage are not undone.
///
/// The only propagating failure is [`DispatchExhaustedError`]: the tables
/// themselves found no matching entry, which signals a construction bug, not
/// a runtime outcome.
pub struct PlanExecutor {
    error_handlers: Arc<ErrorHandlers>,
}

impl PlanExecutor {
    /// Create an executor dispatching failures into the given tables.
    pub fn new(error_handlers: Arc<ErrorHandlers>) -> Self {
        PlanExecutor { error_handlers }
    }

    /// The tables this executor dispatches into.
    pub fn error_handlers(&self) -> &Arc<ErrorHandlers> {
        &self.error_handlers
    }

    /// Run the plan's pipeline, producing a response for every outcome the
    /// tables can cover.
    pub async fn execute(
        &self,
        plan: &ExecutionPlan,
        request: Request,
    ) -> Result<Response, DispatchExhaustedError> {
        let request = match self.run_request_interceptors(plan, request).await {
            Ok(request) => request,
            Err((error, last_good)) => {
                return self.error_handlers.handle_pre_response(&error, &last_good);
            }
        };

        let response = match plan.handler().handle_dyn(request.clone()).await {
            Ok(response) => response,
            Err(error) => return self.error_handlers.handle_pre_response(&error, &request),
        };

        match self.run_response_interceptors(plan, &request, response).await {
            Ok(response) => Ok(response),
            Err((error, last_good)) => {
                self.error_handlers
                    .handle_post_response(&error, &request, &last_good)
            }
        }
    }

    /// Fold the request through the interceptors in registration order.
    /// On failure, returns the error with the most recent valid request.
    async fn run_request_interceptors(
        &self,
        plan: &ExecutionPlan,
        request: Request,
    ) -> Result<Request, (BoxError, Request)> {
        let mut current = request;
        for interceptor in plan.request_interceptors() {
            match interceptor.intercept_dyn(current.clone()).await {
                Ok(next) => current = next,
                Err(error) => return Err((error, current)),
            }
        }
        Ok(current)
    }

    /// Fold the response through the interceptors in reverse registration
    /// order, so the interceptor closest to the handler's leaf runs first.
    /// On failure, returns the error with the last good response.
    async fn run_response_interceptors(
        &self,
        plan: &ExecutionPlan,
        request: &Request,
        response: Response,
    ) -> Result<Response, (BoxError, Response)> {
        let mut current = response;
        for interceptor in plan.response_interceptors().iter().rev() {
            match interceptor
                .intercept_dyn(request.clone(), current.clone())
                .await
            {
                Ok(next) => current = next,
                Err(error) => return Err((error, current)),
            }
        }
        Ok(current)
    }
}
