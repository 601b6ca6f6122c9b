//! Error conversion glue between layers.
//!
//! The domain layer does not depend on service/repository error types;
//! conversions into them live here instead.

use crate::domain::types::TypeConstraintError;
use crate::forms::bookings::BookingFormError;
use crate::forms::requests::RequestFormError;
use crate::repository::errors::RepositoryError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Validation(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Validation(val.to_string())
    }
}

impl From<BookingFormError> for ServiceError {
    fn from(val: BookingFormError) -> Self {
        match val {
            BookingFormError::InvalidDate(_) | BookingFormError::InvalidCoordinates(_) => {
                ServiceError::Parse(val.to_string())
            }
            _ => ServiceError::Validation(val.to_string()),
        }
    }
}

impl From<RequestFormError> for ServiceError {
    fn from(val: RequestFormError) -> Self {
        match val {
            RequestFormError::InvalidDate(_) => ServiceError::Parse(val.to_string()),
            _ => ServiceError::Validation(val.to_string()),
        }
    }
}
