use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::booking::NewBooking;
use crate::domain::types::{
    BookingStatus, EmailAddress, Latitude, Longitude, NonEmptyString, PhoneNumber, ProviderId,
    ServiceId, SubServiceId, TypeConstraintError,
};
use crate::forms::{DateParseError, de_opt_scalar, parse_flexible_date};

/// Raw booking submission. Every field is optional at this layer so the
/// required-field check can name all omissions at once.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateBookingForm {
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub service_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub provider_id: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub customer_first_name: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub customer_last_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub customer_email: Option<String>,
    #[validate(length(max = 17))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub customer_phone: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_lat: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_lng: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub appointment_date: Option<String>,
    #[validate(length(max = 20))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub appointment_time: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub notes: Option<String>,
    /// Either a JSON array of ids/objects or a JSON-encoded string of one.
    #[serde(default)]
    pub selected_sub_services: Option<Value>,
}

/// Field names checked by the required-field pass, in reporting order.
const REQUIRED_FIELDS: [&str; 10] = [
    "service_id",
    "customer_first_name",
    "customer_last_name",
    "customer_email",
    "customer_phone",
    "location_lat",
    "location_lng",
    "location_address",
    "appointment_date",
    "appointment_time",
];

/// Validated, typed form of a booking submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateBookingPayload {
    pub service_id: ServiceId,
    pub provider_id: Option<ProviderId>,
    pub first_name: NonEmptyString,
    pub last_name: NonEmptyString,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub latitude: Latitude,
    pub longitude: Longitude,
    pub location_address: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub notes: Option<String>,
    pub sub_service_ids: Vec<SubServiceId>,
}

impl CreateBookingPayload {
    /// Build the insertable record; the sub-service associations travel
    /// separately to the repository.
    pub fn into_new_booking(self) -> (NewBooking, Vec<SubServiceId>) {
        let now = Utc::now().naive_utc();
        let booking = NewBooking {
            service_id: self.service_id,
            provider_id: self.provider_id,
            customer_first_name: self.first_name,
            customer_last_name: self.last_name,
            customer_email: self.email,
            customer_phone: self.phone,
            location_latitude: self.latitude,
            location_longitude: self.longitude,
            location_address: self.location_address,
            appointment_date: self.appointment_date,
            appointment_time: self.appointment_time,
            status: BookingStatus::Pending,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        };
        (booking, self.sub_service_ids)
    }
}

#[derive(Debug, Error)]
pub enum BookingFormError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
    #[error("Invalid location coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("Booking form validation failed: {0}")]
    Validation(String),
    #[error("Booking form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for BookingFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BookingFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, BookingFormError> {
    value.ok_or_else(|| BookingFormError::MissingFields(vec![field.to_string()]))
}

/// Extract sub-service ids from the flexible payload shapes the booking
/// widget produces: `[1, "2", {"id": 3}]` or the same array JSON-encoded
/// into a string. Anything unrecognizable is dropped.
fn parse_sub_service_ids(value: Option<&Value>) -> Vec<SubServiceId> {
    let Some(value) = value else {
        return Vec::new();
    };

    let items: Vec<Value> = match value {
        Value::Array(items) => items.clone(),
        Value::String(raw) => serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|parsed| parsed.as_array().cloned())
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Number(n) => n.as_i64().map(|v| v as i32),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            Value::Object(map) => map.get("id").and_then(|id| match id {
                Value::Number(n) => n.as_i64().map(|v| v as i32),
                Value::String(s) => s.trim().parse::<i32>().ok(),
                _ => None,
            }),
            _ => None,
        })
        .filter_map(|raw| SubServiceId::new(raw).ok())
        .collect()
}

impl TryFrom<CreateBookingForm> for CreateBookingPayload {
    type Error = BookingFormError;

    fn try_from(form: CreateBookingForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let values = [
            &form.service_id,
            &form.customer_first_name,
            &form.customer_last_name,
            &form.customer_email,
            &form.customer_phone,
            &form.location_lat,
            &form.location_lng,
            &form.location_address,
            &form.appointment_date,
            &form.appointment_time,
        ];
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(BookingFormError::MissingFields(missing));
        }

        let raw_service_id = required(form.service_id, "service_id")?;
        let service_id = raw_service_id
            .parse::<i32>()
            .map_err(|_| {
                BookingFormError::TypeConstraint(format!(
                    "service_id must be numeric: {raw_service_id}"
                ))
            })
            .and_then(|id| ServiceId::new(id).map_err(Into::into))?;

        // Unknown or malformed provider ids degrade to "no provider".
        let provider_id = form
            .provider_id
            .and_then(|raw| raw.parse::<i32>().ok())
            .and_then(|id| ProviderId::new(id).ok());

        let raw_lat = required(form.location_lat, "location_lat")?;
        let latitude = raw_lat
            .parse::<f64>()
            .map_err(|_| BookingFormError::InvalidCoordinates(raw_lat.clone()))
            .and_then(|v| {
                Latitude::new(v).map_err(|_| BookingFormError::InvalidCoordinates(raw_lat.clone()))
            })?;
        let raw_lng = required(form.location_lng, "location_lng")?;
        let longitude = raw_lng
            .parse::<f64>()
            .map_err(|_| BookingFormError::InvalidCoordinates(raw_lng.clone()))
            .and_then(|v| {
                Longitude::new(v).map_err(|_| BookingFormError::InvalidCoordinates(raw_lng.clone()))
            })?;

        let appointment_date =
            parse_flexible_date(&required(form.appointment_date, "appointment_date")?)?;
        // Stored verbatim; no semantic validation of the time value.
        let appointment_time = required(form.appointment_time, "appointment_time")?;

        let sub_service_ids = parse_sub_service_ids(form.selected_sub_services.as_ref());

        Ok(Self {
            service_id,
            provider_id,
            first_name: NonEmptyString::new_for_field(
                required(form.customer_first_name, "customer_first_name")?,
                "customer_first_name",
            )?,
            last_name: NonEmptyString::new_for_field(
                required(form.customer_last_name, "customer_last_name")?,
                "customer_last_name",
            )?,
            email: EmailAddress::new(required(form.customer_email, "customer_email")?)?,
            phone: PhoneNumber::new(required(form.customer_phone, "customer_phone")?)?,
            latitude,
            longitude,
            location_address: required(form.location_address, "location_address")?,
            appointment_date,
            appointment_time,
            notes: form.notes,
            sub_service_ids,
        })
    }
}
