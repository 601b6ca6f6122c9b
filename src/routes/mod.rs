use actix_web::HttpResponse;
use serde_json::json;

use crate::services::ServiceError;

pub mod bookings;
pub mod catalog;
pub mod providers;
pub mod requests;

/// JSON error envelope shared by every endpoint.
pub(crate) fn error_body(message: &str) -> serde_json::Value {
    json!({ "success": false, "error": message })
}

/// Map a service error onto the HTTP contract: validation and parse
/// failures are client errors, lookups map to 404, everything else is a
/// 500 with a generic body (internal details stay in the logs).
pub(crate) fn service_error_response(err: &ServiceError, not_found: &str) -> HttpResponse {
    match err {
        ServiceError::Validation(message) | ServiceError::Parse(message) => {
            HttpResponse::BadRequest().json(error_body(message))
        }
        ServiceError::NotFound => HttpResponse::NotFound().json(error_body(not_found)),
        ServiceError::Internal => {
            HttpResponse::InternalServerError().json(error_body("internal error"))
        }
    }
}
