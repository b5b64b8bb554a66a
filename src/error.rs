//! Service error taxonomy and its transport mapping.
//!
//! Every fallible operation in the crate returns [`ServiceResult`]. The four
//! error kinds are categorical and terminal for the current request: callers
//! never retry, they only map the category to a response.

use std::collections::BTreeMap;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::constants;
use crate::models::response::ResponseBody;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error categories surfaced by the service layer.
///
/// `BadRequest` covers structural validation failures, `Conflict` is the
/// email-uniqueness violation, `NotFound` is an update referencing a missing
/// id, and `InternalServerError` wraps opaque storage faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Conflict,
    InternalServerError,
}

/// Supplemental diagnostic context attached to an error.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    tag: Option<String>,
    detail: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl ErrorContext {
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }
}

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ServiceError {
    kind: ErrorKind,
    message: String,
    context: ErrorContext,
}

impl ServiceError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalServerError, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &ErrorContext {
        &self.context
    }

    pub fn with_tag(self, tag: impl Into<String>) -> Self {
        self.with_context(|ctx| ctx.with_tag(tag))
    }

    pub fn with_detail(self, detail: impl Into<String>) -> Self {
        self.with_context(|ctx| ctx.with_detail(detail))
    }

    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ErrorContext) -> ErrorContext,
    {
        self.context = f(self.context);
        self
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            // Conflicts surface as 400 "already exists", matching the
            // customer-facing contract rather than 409.
            ErrorKind::BadRequest | ErrorKind::Conflict => StatusCode::BAD_REQUEST,
            ErrorKind::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .json(ResponseBody::new(&self.message, constants::EMPTY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(
            ServiceError::bad_request("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::conflict("exists").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::internal_server_error("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn context_builders_accumulate() {
        let err = ServiceError::internal_server_error("boom")
            .with_tag("customer")
            .with_detail("constraint violated")
            .with_context(|ctx| ctx.with_metadata("constraint", "customers_email_address_key"));

        assert_eq!(err.kind(), ErrorKind::InternalServerError);
        assert_eq!(err.message(), "boom");
        assert_eq!(err.context().tag(), Some("customer"));
        assert_eq!(err.context().detail(), Some("constraint violated"));
        assert_eq!(
            err.context().metadata().get("constraint").map(String::as_str),
            Some("customers_email_address_key")
        );
    }

    #[test]
    fn display_is_the_message() {
        let err = ServiceError::conflict("Customer email already exists");
        assert_eq!(err.to_string(), "Customer email already exists");
    }
}
