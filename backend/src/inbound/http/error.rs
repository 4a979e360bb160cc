//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into a consistent `{"errorMessage": ...}`
//! body and status code. Extractor failures (bad JSON, missing query
//! parameters, non-numeric ids) are routed through the same envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of internal failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON error envelope returned for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Human-readable reason for the failure.
    #[schema(example = "Birth date must be earlier than current date")]
    pub error_message: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::MalformedDate => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn client_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_ERROR_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current().map(tracing::field::display);
        if status.is_server_error() {
            error!(trace_id, code = %self.code(), message = self.message(), "request failed");
        } else {
            warn!(trace_id, code = %self.code(), message = self.message(), "request rejected");
        }

        HttpResponse::build(status).json(ErrorBody {
            error_message: client_message(self).to_owned(),
        })
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Request body is not valid: {err}")).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Query parameters are not valid: {err}")).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("Path parameter is not valid: {err}")).into()
}

/// Register extractor configurations that answer with [`ErrorBody`].
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use users_backend::inbound::http::error::configure_extractors;
///
/// let app = App::new().configure(configure_extractors);
/// ```
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}

#[cfg(test)]
mod tests;
