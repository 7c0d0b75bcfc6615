//! Registration-time construction of the error-handler tables.

use crate::errors::{
    ErrorHandlers, PostResponseEntry, PreResponseEntry, Table, defaults,
};
use std::any::TypeId;
use std::sync::Arc;
use thiserror::Error;
use trellis_core::{
    BoxError, InvalidCookieHeaderError, Request, Response, RouteNotFoundError,
};

/// Registration failures of [`ErrorHandlersBuilder`]. All fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryBuildError {
    /// The same error type was registered twice in one table.
    #[error("{type_name} is already registered in the {table} table")]
    DuplicateErrorType {
        /// The offending error type.
        type_name: &'static str,
        /// The table it was registered in.
        table: Table,
    },

    /// A second catch-all was registered in one table.
    #[error("a catch-all handler is already registered in the {table} table")]
    DuplicateCatchAll {
        /// The table it was registered in.
        table: Table,
    },

    /// A table still lacks a catch-all after defaulting. Cannot occur with
    /// the built-in defaults; checked so construction fails fast rather than
    /// dispatch failing later.
    #[error("the {table} table has no catch-all handler after defaulting")]
    MissingCatchAll {
        /// The table missing its catch-all.
        table: Table,
    },
}

/// Builds the two dispatch tables.
///
/// Each error type may be registered at most once per table, and scan order
/// is registration order, so register specific types before generic ones.
/// `build()` appends the defaults that are still missing: a not-found handler
/// for [`RouteNotFoundError`], a bad-request handler for
/// [`InvalidCookieHeaderError`], and a catch-all in each table. User
/// registrations therefore always take priority over the defaults.
///
/// Handler signatures (the error, the request, and for post-response the
/// response) are enforced by the function bounds; there is no runtime arity
/// check to fail.
#[derive(Default)]
pub struct ErrorHandlersBuilder {
    pre: Vec<PreResponseEntry>,
    post: Vec<PostResponseEntry>,
    pre_catch_all: bool,
    post_catch_all: bool,
}

impl ErrorHandlersBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        ErrorHandlersBuilder::default()
    }

    /// Register a pre-response handler for the concrete error type `E`.
    ///
    /// The entry matches a raised error when it downcasts to `E`; registering
    /// an error enum therefore covers every variant of it.
    pub fn on_pre_response<E, H>(mut self, handler: H) -> Result<Self, RegistryBuildError>
    where
        E: std::error::Error + Send + Sync + 'static,
        H: Fn(&E, &Request) -> Response + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        let type_name = std::any::type_name::<E>();
        if self.pre.iter().any(|entry| entry.type_id == Some(type_id)) {
            return Err(RegistryBuildError::DuplicateErrorType {
                type_name,
                table: Table::PreResponse,
            });
        }
        self.pre.push(PreResponseEntry {
            type_id: Some(type_id),
            type_name,
            handler: Arc::new(move |error: &BoxError, request: &Request| {
                error.downcast_ref::<E>().map(|e| handler(e, request))
            }),
        });
        Ok(self)
    }

    /// Register a post-response handler for the concrete error type `E`.
    pub fn on_post_response<E, H>(mut self, handler: H) -> Result<Self, RegistryBuildError>
    where
        E: std::error::Error + Send + Sync + 'static,
        H: Fn(&E, &Request, &Response) -> Response + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<E>();
        let type_name = std::any::type_name::<E>();
        if self.post.iter().any(|entry| entry.type_id == Some(type_id)) {
            return Err(RegistryBuildError::DuplicateErrorType {
                type_name,
                table: Table::PostResponse,
            });
        }
        self.post.push(PostResponseEntry {
            type_id: Some(type_id),
            type_name,
            handler: Arc::new(
                move |error: &BoxError, request: &Request, response: &Response| {
                    error.downcast_ref::<E>().map(|e| handler(e, request, response))
                },
            ),
        });
        Ok(self)
    }

    /// Register the pre-response catch-all, overriding the default one.
    pub fn pre_response_catch_all<H>(mut self, handler: H) -> Result<Self, RegistryBuildError>
    where
        H: Fn(&BoxError, &Request) -> Response + Send + Sync + 'static,
    {
        if self.pre_catch_all {
            return Err(RegistryBuildError::DuplicateCatchAll {
                table: Table::PreResponse,
            });
        }
        self.pre_catch_all = true;
        self.pre.push(PreResponseEntry {
            type_id: None,
            type_name: "catch-all",
            handler: Arc::new(move |error: &BoxError, request: &Request| {
                Some(handler(error, request))
            }),
        });
        Ok(self)
    }

    /// Register the post-response catch-all, overriding the default one.
    pub fn post_response_catch_all<H>(mut self, handler: H) -> Result<Self, RegistryBuildError>
    where
        H: Fn(&BoxError, &Request, &Response) -> Response + Send + Sync + 'static,
    {
        if self.post_catch_all {
            return Err(RegistryBuildError::DuplicateCatchAll {
                table: Table::PostResponse,
            });
        }
        self.post_catch_all = true;
        self.post.push(PostResponseEntry {
            type_id: None,
            type_name: "catch-all",
            handler: Arc::new(
                move |error: &BoxError, request: &Request, response: &Response| {
                    Some(handler(error, request, response))
                },
            ),
        });
        Ok(self)
    }

    /// Apply the missing defaults and freeze the tables.
    pub fn build(self) -> Result<ErrorHandlers, RegistryBuildError> {
        let mut this = self;

        if !this.has_pre_type(TypeId::of::<RouteNotFoundError>()) {
            this = this.on_pre_response(defaults::route_not_found)?;
        }
        if !this.has_pre_type(TypeId::of::<InvalidCookieHeaderError>()) {
            this = this.on_pre_response(defaults::invalid_cookie_header)?;
        }
        if !this.pre_catch_all {
            this = this.pre_response_catch_all(defaults::internal_server_error)?;
        }
        if !this.post_catch_all {
            this = this.post_response_catch_all(defaults::internal_server_error_with_response)?;
        }

        // Fail fast here rather than exhausting dispatch at request time.
        if !this.pre_catch_all {
            return Err(RegistryBuildError::MissingCatchAll {
                table: Table::PreResponse,
            });
        }
        if !this.post_catch_all {
            return Err(RegistryBuildError::MissingCatchAll {
                table: Table::PostResponse,
            });
        }

        Ok(ErrorHandlers::new(this.pre, this.post))
    }

    fn has_pre_type(&self, type_id: TypeId) -> bool {
        self.pre.iter().any(|entry| entry.type_id == Some(type_id))
    }
}
