//! The route tree: builder nodes and frozen nodes.
//!
//! A node keys static children by their literal segment and holds at most one
//! pattern child for a named wildcard. Interceptors attach to the node whose
//! path prefix they were registered under; handlers attach by method at the
//! node where the path ends. The builder tree parallels the frozen tree and
//! is consumed exactly once by `build()`.

use crate::plan::{ExecutionPlan, ExecutionPlanBuilder, PlanBuildError};
use crate::routing::path::pattern_parameter;
use std::collections::HashMap;
use std::sync::Arc;
use trellis_core::{DynRequestHandler, DynRequestInterceptor, DynResponseInterceptor, Method};

/// A frozen node of the route tree.
///
/// Built once at startup, then read-only; safe for unlimited concurrent
/// readers without locking.
pub struct RouteTreeNode {
    static_children: HashMap<String, RouteTreeNode>,
    pattern_child: Option<Box<PatternChild>>,
    request_interceptors: Vec<Arc<dyn DynRequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn DynResponseInterceptor>>,
    handlers: HashMap<Method, Arc<dyn DynRequestHandler>>,
}

struct PatternChild {
    parameter_name: String,
    node: RouteTreeNode,
}

/// Internal negative outcomes of a tree walk. Never exposed raw; the
/// traverser converts them into the public route-not-found signal.
pub(crate) enum WalkError {
    HandlerNotFound,
    Plan(PlanBuildError),
}

impl RouteTreeNode {
    /// Walk the tree for one request, accumulating an execution plan.
    ///
    /// Iterative, one segment per step. Every visited node contributes its
    /// interceptors on entry, whether or not the walk ultimately finds a
    /// handler; static children are consulted strictly before the pattern
    /// child; a pattern descent records the segment's literal value under
    /// the child's declared parameter name.
    pub(crate) fn find_plan(
        &self,
        method: &Method,
        segments: &[&str],
    ) -> Result<ExecutionPlan, WalkError> {
        let mut builder = ExecutionPlanBuilder::new();
        let mut node = self;
        node.append_interceptors(&mut builder);

        for segment in segments {
            node = if let Some(child) = node.static_children.get(*segment) {
                child
            } else if let Some(pattern) = &node.pattern_child {
                builder.add_path_parameter(pattern.parameter_name.clone(), *segment);
                &pattern.node
            } else {
                return Err(WalkError::HandlerNotFound);
            };
            node.append_interceptors(&mut builder);
        }

        match node.handlers.get(method) {
            Some(handler) => {
                builder.handler(Arc::clone(handler));
                builder.build().map_err(WalkError::Plan)
            }
            None => Err(WalkError::HandlerNotFound),
        }
    }

    fn append_interceptors(&self, builder: &mut ExecutionPlanBuilder) {
        builder.add_request_interceptors(self.request_interceptors.iter().cloned());
        builder.add_response_interceptors(self.response_interceptors.iter().cloned());
    }
}

/// A mutable node of the builder tree, same shape as [`RouteTreeNode`].
#[derive(Default)]
pub(crate) struct RouteTreeNodeBuilder {
    static_children: HashMap<String, RouteTreeNodeBuilder>,
    pattern_child: Option<Box<PatternChildBuilder>>,
    request_interceptors: Vec<Arc<dyn DynRequestInterceptor>>,
    response_interceptors: Vec<Arc<dyn DynResponseInterceptor>>,
    handlers: HashMap<Method, Arc<dyn DynRequestHandler>>,
}

struct PatternChildBuilder {
    parameter_name: String,
    node: RouteTreeNodeBuilder,
}

/// Registration-time failures at the tree level. The routes builder wraps
/// them with the offending path for context.
pub(crate) enum InsertError {
    DuplicateRoute { method: Method },
    ConflictingPatternName { existing: String, offered: String },
}

impl RouteTreeNodeBuilder {
    pub(crate) fn add_handler(
        &mut self,
        method: Method,
        segments: &[&str],
        handler: Arc<dyn DynRequestHandler>,
    ) -> Result<(), InsertError> {
        let node = self.node_at(segments)?;
        if node.handlers.contains_key(&method) {
            return Err(InsertError::DuplicateRoute { method });
        }
        node.handlers.insert(method, handler);
        Ok(())
    }

    pub(crate) fn add_request_interceptor(
        &mut self,
        segments: &[&str],
        interceptor: Arc<dyn DynRequestInterceptor>,
    ) -> Result<(), InsertError> {
        self.node_at(segments)?.request_interceptors.push(interceptor);
        Ok(())
    }

    pub(crate) fn add_response_interceptor(
        &mut self,
        segments: &[&str],
        interceptor: Arc<dyn DynResponseInterceptor>,
    ) -> Result<(), InsertError> {
        self.node_at(segments)?.response_interceptors.push(interceptor);
        Ok(())
    }

    /// Walk to (creating as needed) the builder node at the given segments.
    ///
    /// A pattern segment reuses the node's single pattern child when the
    /// names agree; a second declaration with a different name is rejected
    /// rather than silently renamed.
    fn node_at(&mut self, segments: &[&str]) -> Result<&mut RouteTreeNodeBuilder, InsertError> {
        let mut node = self;
        for segment in segments {
            node = if let Some(name) = pattern_parameter(segment) {
                let child = node.pattern_child.get_or_insert_with(|| {
                    Box::new(PatternChildBuilder {
                        parameter_name: name.to_owned(),
                        node: RouteTreeNodeBuilder::default(),
                    })
                });
                if child.parameter_name != name {
                    return Err(InsertError::ConflictingPatternName {
                        existing: child.parameter_name.clone(),
                        offered: name.to_owned(),
                    });
                }
                &mut child.node
            } else {
                node.static_children.entry((*segment).to_owned()).or_default()
            };
        }
        Ok(node)
    }

    /// Freeze this builder subtree into an immutable node tree.
    pub(crate) fn build(self) -> RouteTreeNode {
        RouteTreeNode {
            static_children: self
                .static_children
                .into_iter()
                .map(|(segment, child)| (segment, child.build()))
                .collect(),
            pattern_child: self.pattern_child.map(|child| {
                Box::new(PatternChild {
                    parameter_name: child.parameter_name,
                    node: child.node.build(),
                })
            }),
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
            handlers: self.handlers,
        }
    }
}
