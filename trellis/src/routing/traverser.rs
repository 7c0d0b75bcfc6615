//! Tree traversal: from a raw path to an execution plan.

use crate::plan::{ExecutionPlan, PlanBuildError};
use crate::routing::path::split_path;
use crate::routing::tree::{RouteTreeNode, WalkError};
use thiserror::Error;
use trellis_core::{BoxError, InvalidPathError, Method, RouteNotFoundError};

/// Failures of [`traverse`].
///
/// `RouteNotFound` is the only legitimate per-request outcome; the other
/// variants indicate malformed input or a construction bug and propagate
/// unchanged.
#[derive(Error, Debug)]
pub enum TraverseError {
    /// No handler is registered for the method and path.
    #[error(transparent)]
    RouteNotFound(#[from] RouteNotFoundError),

    /// The path did not conform to the splitting rule.
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    /// The walk selected a handler but the plan failed to finalize. Cannot
    /// occur for a tree produced by the routes builder.
    #[error(transparent)]
    Plan(#[from] PlanBuildError),
}

impl TraverseError {
    /// Unwrap into the concrete boxed error for error-handler dispatch, so a
    /// typed table entry can downcast to the inner type.
    pub fn into_source(self) -> BoxError {
        match self {
            TraverseError::RouteNotFound(e) => Box::new(e),
            TraverseError::InvalidPath(e) => Box::new(e),
            TraverseError::Plan(e) => Box::new(e),
        }
    }
}

/// Walk the route tree for one request.
///
/// Splits the path, walks the tree from an empty plan builder, and converts
/// the internal handler-not-found signal into the public
/// [`RouteNotFoundError`].
pub fn traverse(
    root: &RouteTreeNode,
    method: &Method,
    path: &str,
) -> Result<ExecutionPlan, TraverseError> {
    let segments = split_path(path)?;
    root.find_plan(method, &segments).map_err(|e| match e {
        WalkError::HandlerNotFound => {
            tracing::debug!(method = %method, path, "no route matched");
            TraverseError::RouteNotFound(RouteNotFoundError {
                method: method.clone(),
                path: path.to_owned(),
            })
        }
        WalkError::Plan(e) => TraverseError::Plan(e),
    })
}
