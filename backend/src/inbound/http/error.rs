//! HTTP adapter mapping for domain errors.
//!
//! Field-scoped failures render as `{"field_errors": {field: message}}` and
//! everything else as `{"error": [message]}`. Internal errors are logged and
//! redacted before they reach the client.

use std::collections::BTreeMap;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

/// Wire shape of an error response.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorBody<'a> {
    Fields {
        field_errors: &'a BTreeMap<String, String>,
    },
    General {
        error: [&'a str; 1],
    },
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn body_for(error: &Error) -> ErrorBody<'_> {
    if matches!(error.code(), ErrorCode::InternalError) {
        return ErrorBody::General {
            error: [REDACTED_MESSAGE],
        };
    }
    if error.field_errors().is_empty() {
        ErrorBody::General {
            error: [error.message()],
        }
    } else {
        ErrorBody::Fields {
            field_errors: error.field_errors(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                "request failed with an internal error"
            );
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(body_for(self))
    }
}

/// Turn malformed JSON bodies into `400 {"error": [...]}`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(err.to_string()).into()
}

/// Turn malformed query strings into `400 {"error": [...]}`.
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(err.to_string()).into()
}
