//! Two-phase error-to-handler dispatch.
//!
//! Errors raised before a response exists (during traversal, request
//! interception, or the handler) go to the pre-response table; errors raised
//! while a response already exists (during response interception) go to the
//! post-response table. Each table is scanned in registration order and the
//! first entry whose registered type matches the raised error wins, so
//! registration order functions as priority order: specific types first,
//! the catch-all appended last at build time.

pub mod defaults;
pub mod registry;

use std::any::TypeId;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use trellis_core::{BoxError, Request, Response};

/// Which of the two dispatch tables an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    /// Errors raised before any response value exists.
    PreResponse,
    /// Errors raised while a response value already exists.
    PostResponse,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Table::PreResponse => f.write_str("pre-response"),
            Table::PostResponse => f.write_str("post-response"),
        }
    }
}

/// No entry in the table matched the raised error.
///
/// Structurally impossible once the catch-all default is in place; reaching
/// it signals a construction bug, and it is the one failure allowed to
/// propagate to the transport adapter.
#[derive(Error, Debug)]
#[error("no {table} error handler matched: {error_text}")]
pub struct DispatchExhaustedError {
    /// The table that was exhausted.
    pub table: Table,
    /// Display text of the unmatched error.
    pub error_text: String,
}

// An entry couples the match test and the invocation: the stored closure
// returns None when the raised error is not its registered type.
type PreResponseFn = Arc<dyn Fn(&BoxError, &Request) -> Option<Response> + Send + Sync>;
type PostResponseFn = Arc<dyn Fn(&BoxError, &Request, &Response) -> Option<Response> + Send + Sync>;

pub(crate) struct PreResponseEntry {
    /// `None` marks the catch-all entry.
    pub(crate) type_id: Option<TypeId>,
    pub(crate) type_name: &'static str,
    pub(crate) handler: PreResponseFn,
}

pub(crate) struct PostResponseEntry {
    pub(crate) type_id: Option<TypeId>,
    pub(crate) type_name: &'static str,
    pub(crate) handler: PostResponseFn,
}

/// The frozen dispatch tables. Built once by
/// [`registry::ErrorHandlersBuilder`], then read-only and freely shared.
pub struct ErrorHandlers {
    pre: Vec<PreResponseEntry>,
    post: Vec<PostResponseEntry>,
}

impl ErrorHandlers {
    pub(crate) fn new(pre: Vec<PreResponseEntry>, post: Vec<PostResponseEntry>) -> Self {
        ErrorHandlers { pre, post }
    }

    /// Convert an error raised before a response existed into a response.
    pub fn handle_pre_response(
        &self,
        error: &BoxError,
        request: &Request,
    ) -> Result<Response, DispatchExhaustedError> {
        for entry in &self.pre {
            if let Some(response) = (entry.handler)(error, request) {
                tracing::trace!(handler = entry.type_name, "pre-response error handled");
                return Ok(response);
            }
        }
        Err(DispatchExhaustedError {
            table: Table::PreResponse,
            error_text: error.to_string(),
        })
    }

    /// Convert an error raised while a response existed into a response.
    pub fn handle_post_response(
        &self,
        error: &BoxError,
        request: &Request,
        response: &Response,
    ) -> Result<Response, DispatchExhaustedError> {
        for entry in &self.post {
            if let Some(response) = (entry.handler)(error, request, response) {
                tracing::trace!(handler = entry.type_name, "post-response error handled");
                return Ok(response);
            }
        }
        Err(DispatchExhaustedError {
            table: Table::PostResponse,
            error_text: error.to_string(),
        })
    }
}
