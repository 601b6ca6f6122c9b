use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    AttachmentKind, EmailAddress, Latitude, Longitude, Money, NonEmptyString, PhoneNumber,
    RequestId, RequestStatus, ServiceId, TypeConstraintError,
};

/// A pre-booking quotation inquiry, distinct from a confirmed booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: RequestId,
    pub service_id: ServiceId,
    pub first_name: NonEmptyString,
    pub last_name: NonEmptyString,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub pricing_tier: Option<String>,
    pub booking_date: Option<NaiveDate>,
    /// Stored verbatim, e.g. "2:30 PM"; no semantic validation.
    pub booking_time: Option<String>,
    pub number_of_people: i32,
    pub hourly_rate: Option<Money>,
    pub location_address: Option<String>,
    pub location_latitude: Option<Latitude>,
    pub location_longitude: Option<Longitude>,
    pub notes: Option<String>,
    pub cc_zone: bool,
    pub booking_charge: Money,
    pub cc_zone_charge: Money,
    pub vat: Money,
    pub total_amount: Money,
    pub status: RequestStatus,
    pub whatsapp_sent: bool,
    pub whatsapp_sent_at: Option<NaiveDateTime>,
    pub whatsapp_number_used: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ServiceRequest {
    /// Customer's full display name.
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.first_name.as_str(), self.last_name.as_str())
    }
}

/// Data required to insert a new [`ServiceRequest`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewServiceRequest {
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
    pub booking_charge: Money,
    pub cc_zone_charge: Money,
    pub vat: Money,
    pub total_amount: Money,
    pub status: RequestStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// File uploaded alongside a quotation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestAttachment {
    pub id: i32,
    pub request_id: RequestId,
    pub file_name: String,
    pub kind: AttachmentKind,
    pub file_size: i64,
    pub stored_path: String,
    pub uploaded_at: NaiveDateTime,
}

/// Data required to insert a new [`RequestAttachment`]. The owning request
/// id is supplied by the repository inside the creation transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRequestAttachment {
    pub file_name: String,
    pub kind: AttachmentKind,
    pub file_size: i64,
    pub stored_path: String,
    pub uploaded_at: NaiveDateTime,
}

/// Derived monetary breakdown for a quotation, computed once at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteTotals {
    pub booking_charge: Money,
    pub cc_zone_charge: Money,
    pub vat: Money,
    pub total_amount: Money,
}

impl QuoteTotals {
    /// Compute the quotation breakdown.
    ///
    /// subtotal = base charge + congestion surcharge (if flagged) + hourly
    /// rate; VAT is applied to the subtotal and rounded to cents.
    pub fn compute(
        base_charge: f64,
        cc_zone: bool,
        cc_zone_charge: f64,
        hourly_rate: Option<Money>,
        vat_rate: f64,
    ) -> Result<Self, TypeConstraintError> {
        let surcharge = if cc_zone { cc_zone_charge } else { 0.0 };
        let subtotal = base_charge + surcharge + hourly_rate.map_or(0.0, Money::get);
        let vat = Money::round2(subtotal * vat_rate);
        Ok(Self {
            booking_charge: Money::new(base_charge)?,
            cc_zone_charge: Money::new(surcharge)?,
            vat: Money::new(vat)?,
            total_amount: Money::new(Money::round2(subtotal + vat))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_apply_vat_to_the_subtotal() {
        let totals = QuoteTotals::compute(42.0, false, 15.0, None, 0.2).unwrap();
        assert_eq!(totals.booking_charge.get(), 42.0);
        assert_eq!(totals.cc_zone_charge.get(), 0.0);
        assert_eq!(totals.vat.get(), 8.4);
        assert_eq!(totals.total_amount.get(), 50.4);
    }

    #[test]
    fn congestion_zone_adds_the_surcharge() {
        let rate = Money::new(70.0).unwrap();
        let totals = QuoteTotals::compute(42.0, true, 15.0, Some(rate), 0.2).unwrap();
        // subtotal 127.00, VAT 25.40
        assert_eq!(totals.cc_zone_charge.get(), 15.0);
        assert_eq!(totals.vat.get(), 25.4);
        assert_eq!(totals.total_amount.get(), 152.4);
    }
}
