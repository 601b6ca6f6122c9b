use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::request::{NewServiceRequest, QuoteTotals};
use crate::domain::types::{
    EmailAddress, Latitude, Longitude, Money, NonEmptyString, PhoneNumber, RequestStatus,
    ServiceId, TypeConstraintError,
};
use crate::forms::{DateParseError, de_opt_scalar, parse_flexible_date};

/// Raw quotation submission. Arrives as JSON or as the text parts of a
/// multipart upload; every field is optional at this layer.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateRequestForm {
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub service_id: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub pricing_tier: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub booking_date: Option<String>,
    #[validate(length(max = 20))]
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub booking_time: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub number_of_people: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub hourly_rate: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_address: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_latitude: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub location_longitude: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub additional_notes: Option<String>,
    #[serde(default, deserialize_with = "de_opt_scalar")]
    pub cc_zone: Option<String>,
}

const REQUIRED_FIELDS: [&str; 5] = ["service_id", "first_name", "last_name", "email", "phone"];

/// Validated, typed form of a quotation submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequestPayload {
    pub service_id: ServiceId,
    pub first_name: NonEmptyString,
    pub last_name: NonEmptyString,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub pricing_tier: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<String>,
    pub number_of_people: i32,
    pub hourly_rate: Option<Money>,
    pub location_address: Option<String>,
    pub location_latitude: Option<Latitude>,
    pub location_longitude: Option<Longitude>,
    pub notes: Option<String>,
    pub cc_zone: bool,
}

impl CreateRequestPayload {
    /// Build the insertable record with its derived monetary breakdown.
    pub fn into_new_request(self, totals: QuoteTotals) -> NewServiceRequest {
        let now = Utc::now().naive_utc();
        NewServiceRequest {
            service_id: self.service_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            pricing_tier: self.pricing_tier,
            booking_date: self.booking_date,
            booking_time: self.booking_time,
            number_of_people: self.number_of_people,
            hourly_rate: self.hourly_rate,
            location_address: self.location_address,
            location_latitude: self.location_latitude,
            location_longitude: self.location_longitude,
            notes: self.notes,
            cc_zone: self.cc_zone,
            booking_charge: totals.booking_charge,
            cc_zone_charge: totals.cc_zone_charge,
            vat: totals.vat,
            total_amount: totals.total_amount,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Error)]
pub enum RequestFormError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error(transparent)]
    InvalidDate(#[from] DateParseError),
    #[error("Request form validation failed: {0}")]
    Validation(String),
    #[error("Request form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for RequestFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for RequestFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RequestFormError> {
    value.ok_or_else(|| RequestFormError::MissingFields(vec![field.to_string()]))
}

fn parse_flag(value: Option<&str>) -> bool {
    value.is_some_and(|raw| {
        matches!(
            raw.to_ascii_lowercase().as_str(),
            "true" | "1" | "on" | "yes"
        )
    })
}

impl TryFrom<CreateRequestForm> for CreateRequestPayload {
    type Error = RequestFormError;

    fn try_from(form: CreateRequestForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let values = [
            &form.service_id,
            &form.first_name,
            &form.last_name,
            &form.email,
            &form.phone,
        ];
        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .zip(values)
            .filter(|(_, value)| value.is_none())
            .map(|(field, _)| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(RequestFormError::MissingFields(missing));
        }

        let raw_service_id = required(form.service_id, "service_id")?;
        let service_id = raw_service_id
            .parse::<i32>()
            .map_err(|_| {
                RequestFormError::TypeConstraint(format!(
                    "service_id must be numeric: {raw_service_id}"
                ))
            })
            .and_then(|id| ServiceId::new(id).map_err(Into::into))?;

        // Present-but-unparseable dates are a client error; absent is fine.
        let booking_date = form
            .booking_date
            .as_deref()
            .map(parse_flexible_date)
            .transpose()?;

        // Loose numeric fields degrade rather than fail, matching the
        // tolerant intake behavior for optional inputs.
        let number_of_people = form
            .number_of_people
            .and_then(|raw| raw.parse::<i32>().ok())
            .filter(|n| *n >= 1)
            .unwrap_or(1);
        let hourly_rate = form
            .hourly_rate
            .and_then(|raw| raw.parse::<f64>().ok())
            .and_then(|v| Money::new(v).ok());
        let location_latitude = form
            .location_latitude
            .and_then(|raw| raw.parse::<f64>().ok())
            .and_then(|v| Latitude::new(v).ok());
        let location_longitude = form
            .location_longitude
            .and_then(|raw| raw.parse::<f64>().ok())
            .and_then(|v| Longitude::new(v).ok());

        Ok(Self {
            service_id,
            first_name: NonEmptyString::new_for_field(
                required(form.first_name, "first_name")?,
                "first_name",
            )?,
            last_name: NonEmptyString::new_for_field(
                required(form.last_name, "last_name")?,
                "last_name",
            )?,
            email: EmailAddress::new(required(form.email, "email")?)?,
            phone: PhoneNumber::new(required(form.phone, "phone")?)?,
            pricing_tier: form.pricing_tier,
            booking_date,
            booking_time: form.booking_time,
            number_of_people,
            hourly_rate,
            location_address: form.location_address,
            location_latitude,
            location_longitude,
            notes: form.additional_notes,
            cc_zone: parse_flag(form.cc_zone.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_form() -> CreateRequestForm {
        CreateRequestForm {
            service_id: Some("3".to_string()),
            first_name: Some("John".to_string()),
            last_name: Some("Smith".to_string()),
            email: Some("john@example.com".to_string()),
            phone: Some("07700900456".to_string()),
            ..CreateRequestForm::default()
        }
    }

    #[test]
    fn minimal_forms_convert_with_defaults() {
        let payload: CreateRequestPayload = complete_form().try_into().unwrap();
        assert_eq!(payload.service_id.get(), 3);
        assert_eq!(payload.number_of_people, 1);
        assert!(payload.hourly_rate.is_none());
        assert!(!payload.cc_zone);
    }

    #[test]
    fn all_missing_fields_are_enumerated() {
        let form = CreateRequestForm::default();
        let err = CreateRequestPayload::try_from(form).unwrap_err();
        match err {
            RequestFormError::MissingFields(fields) => {
                assert_eq!(
                    fields,
                    vec!["service_id", "first_name", "last_name", "email", "phone"]
                );
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn optional_schedule_and_flags_are_parsed() {
        let mut form = complete_form();
        form.booking_date = Some("2025-11-20".to_string());
        form.booking_time = Some("2:30 PM".to_string());
        form.cc_zone = Some("true".to_string());
        form.hourly_rate = Some("70".to_string());
        form.number_of_people = Some("2".to_string());
        let payload: CreateRequestPayload = form.try_into().unwrap();
        assert_eq!(
            payload.booking_date,
            Some(NaiveDate::from_ymd_opt(2025, 11, 20).unwrap())
        );
        assert_eq!(payload.booking_time.as_deref(), Some("2:30 PM"));
        assert!(payload.cc_zone);
        assert_eq!(payload.hourly_rate.map(Money::get), Some(70.0));
        assert_eq!(payload.number_of_people, 2);
    }

    #[test]
    fn invalid_optional_date_is_still_an_error() {
        let mut form = complete_form();
        form.booking_date = Some("whenever".to_string());
        assert!(matches!(
            CreateRequestPayload::try_from(form).unwrap_err(),
            RequestFormError::InvalidDate(_)
        ));
    }

    #[test]
    fn malformed_optional_numerics_degrade_to_defaults() {
        let mut form = complete_form();
        form.number_of_people = Some("many".to_string());
        form.hourly_rate = Some("-5".to_string());
        let payload: CreateRequestPayload = form.try_into().unwrap();
        assert_eq!(payload.number_of_people, 1);
        assert!(payload.hourly_rate.is_none());
    }
}
