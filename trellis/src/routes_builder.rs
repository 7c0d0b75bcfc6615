//! The user-facing route registration surface.
//!
//! Paths given here are parsed with the exact same splitting and
//! pattern-detection rules the matcher uses, so registration and matching
//! cannot diverge.

use crate::routing::path::{pattern_parameter, split_path};
use crate::routing::tree::{InsertError, RouteTreeNode, RouteTreeNodeBuilder};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use trellis_core::{
    InvalidPathError, Method, RequestHandler, RequestInterceptor, ResponseInterceptor,
};

/// Registration failures of [`RoutesBuilder`]. All fatal at startup.
#[derive(Error, Debug)]
pub enum RouteBuildError {
    /// The path string did not conform to the splitting rule.
    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    /// Two handlers were registered for the same method and path.
    #[error("a handler is already registered for {method} {path:?}")]
    DuplicateRoute {
        /// The colliding method.
        method: Method,
        /// The colliding path.
        path: String,
    },

    /// A pattern segment's name disagrees with the one already declared at
    /// the same tree position.
    #[error(
        "pattern segment {{{offered}}} in {path:?} conflicts with {{{existing}}} declared at the same position"
    )]
    ConflictingPatternName {
        /// The name already attached to the pattern child.
        existing: String,
        /// The conflicting name in the new registration.
        offered: String,
        /// The path being registered.
        path: String,
    },

    /// One path declared the same parameter name in two pattern segments.
    #[error("path parameter {name:?} appears more than once in {path:?}")]
    DuplicateParameterName {
        /// The repeated parameter name.
        name: String,
        /// The path being registered.
        path: String,
    },
}

/// Builds the route tree from raw path strings.
///
/// Fluent and fallible: each method consumes the builder and returns it (or
/// the registration error), so chains read naturally with `?`.
#[derive(Default)]
pub struct RoutesBuilder {
    root: RouteTreeNodeBuilder,
}

impl RoutesBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        RoutesBuilder::default()
    }

    /// Register the handler for `method` on `path`.
    pub fn add_handler<H>(
        mut self,
        method: Method,
        path: &str,
        handler: H,
    ) -> Result<Self, RouteBuildError>
    where
        H: RequestHandler,
    {
        let segments = parse_and_validate(path)?;
        self.root
            .add_handler(method, &segments, Arc::new(handler))
            .map_err(|e| with_path(e, path))?;
        Ok(self)
    }

    /// Register a request interceptor scoped to `path` and everything below
    /// it.
    pub fn add_request_interceptor<I>(
        mut self,
        path: &str,
        interceptor: I,
    ) -> Result<Self, RouteBuildError>
    where
        I: RequestInterceptor,
    {
        let segments = parse_and_validate(path)?;
        self.root
            .add_request_interceptor(&segments, Arc::new(interceptor))
            .map_err(|e| with_path(e, path))?;
        Ok(self)
    }

    /// Register a response interceptor scoped to `path` and everything below
    /// it.
    pub fn add_response_interceptor<I>(
        mut self,
        path: &str,
        interceptor: I,
    ) -> Result<Self, RouteBuildError>
    where
        I: ResponseInterceptor,
    {
        let segments = parse_and_validate(path)?;
        self.root
            .add_response_interceptor(&segments, Arc::new(interceptor))
            .map_err(|e| with_path(e, path))?;
        Ok(self)
    }

    /// Freeze the tree.
    pub fn build(self) -> RouteTreeNode {
        self.root.build()
    }
}

fn parse_and_validate(path: &str) -> Result<Vec<&str>, RouteBuildError> {
    let segments = split_path(path)?;
    let mut seen = HashSet::new();
    for segment in &segments {
        if let Some(name) = pattern_parameter(segment) {
            if !seen.insert(name) {
                return Err(RouteBuildError::DuplicateParameterName {
                    name: name.to_owned(),
                    path: path.to_owned(),
                });
            }
        }
    }
    Ok(segments)
}

fn with_path(error: InsertError, path: &str) -> RouteBuildError {
    match error {
        InsertError::DuplicateRoute { method } => RouteBuildError::DuplicateRoute {
            method,
            path: path.to_owned(),
        },
        InsertError::ConflictingPatternName { existing, offered } => {
            RouteBuildError::ConflictingPatternName {
                existing,
                offered,
                path: path.to_owned(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteBuildError;
    use super::RoutesBuilder;
    use trellis_core::{BoxError, Method, Request, Response};

    async fn ok_handler(_request: Request) -> Result<Response, BoxError> {
        Ok(Response::builder().build())
    }

    #[test]
    fn duplicate_parameter_names_in_one_path_are_rejected() {
        let result = RoutesBuilder::new().add_handler(Method::GET, "/a/{x}/b/{x}", ok_handler);
        assert!(matches!(
            result,
            Err(RouteBuildError::DuplicateParameterName { ref name, .. }) if name == "x"
        ));
    }

    #[test]
    fn conflicting_pattern_names_at_one_position_are_rejected() {
        let result = RoutesBuilder::new()
            .add_handler(Method::GET, "/foo/{a}", ok_handler)
            .unwrap()
            .add_handler(Method::POST, "/foo/{b}", ok_handler);
        assert!(matches!(
            result,
            Err(RouteBuildError::ConflictingPatternName { ref existing, ref offered, .. })
                if existing == "a" && offered == "b"
        ));
    }

    #[test]
    fn same_pattern_name_reuses_the_node() {
        let result = RoutesBuilder::new()
            .add_handler(Method::GET, "/foo/{id}", ok_handler)
            .unwrap()
            .add_handler(Method::POST, "/foo/{id}", ok_handler);
        assert!(result.is_ok());
    }

    #[test]
    fn malformed_paths_are_rejected_at_registration() {
        assert!(RoutesBuilder::new()
            .add_handler(Method::GET, "no-slash", ok_handler)
            .is_err());
        assert!(RoutesBuilder::new()
            .add_handler(Method::GET, "/a//b", ok_handler)
            .is_err());
    }
}
