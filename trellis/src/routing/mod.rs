//! Route tree construction and matching.
//!
//! The tree is built once at startup through [`crate::RoutesBuilder`], frozen
//! into [`tree::RouteTreeNode`]s, and then read concurrently for the life of
//! the process. Matching consumes one path segment per level; a static child
//! always wins over the node's pattern child, which is the router's core
//! disambiguation rule.

pub(crate) mod path;
pub(crate) mod traverser;
pub(crate) mod tree;
