use chrono::{NaiveDate, NaiveDateTime};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BookingId, BookingReference, BookingStatus, EmailAddress, Latitude, Longitude, NonEmptyString,
    PhoneNumber, ProviderId, ServiceId,
};

/// Prefix carried by every booking reference.
pub const REFERENCE_PREFIX: &str = "BK";

const REFERENCE_SUFFIX_LEN: usize = 4;
const REFERENCE_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A confirmed appointment record tied to one service and one customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    /// Immutable once assigned; unique across all bookings.
    pub reference: BookingReference,
    pub service_id: ServiceId,
    pub provider_id: Option<ProviderId>,
    pub customer_first_name: NonEmptyString,
    pub customer_last_name: NonEmptyString,
    pub customer_email: EmailAddress,
    pub customer_phone: PhoneNumber,
    pub location_latitude: Latitude,
    pub location_longitude: Longitude,
    pub location_address: String,
    pub appointment_date: NaiveDate,
    /// Stored verbatim, e.g. "10:00 AM"; no semantic validation.
    pub appointment_time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub whatsapp_sent: bool,
    pub whatsapp_sent_at: Option<NaiveDateTime>,
    pub whatsapp_number_used: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Booking {
    /// Customer's full display name.
    pub fn customer_full_name(&self) -> String {
        format!(
            "{} {}",
            self.customer_first_name.as_str(),
            self.customer_last_name.as_str()
        )
    }

    /// "December 01, 2025 at 10:00 AM" style rendering.
    pub fn formatted_appointment(&self) -> String {
        format!(
            "{} at {}",
            self.appointment_date.format("%B %d, %Y"),
            self.appointment_time
        )
    }

    /// Google Maps link for the service location.
    pub fn maps_link(&self) -> String {
        format!(
            "https://www.google.com/maps?q={},{}",
            self.location_latitude.get(),
            self.location_longitude.get()
        )
    }
}

impl BookingReference {
    /// Generate a candidate reference of the form `BK-YYYYMMDD-XXXX`.
    ///
    /// The four-character suffix is random; uniqueness is enforced by the
    /// repository, which retries on conflict.
    pub fn generate(date: NaiveDate) -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..REFERENCE_SUFFIX_LEN)
            .map(|_| REFERENCE_CHARSET[rng.random_range(0..REFERENCE_CHARSET.len())] as char)
            .collect();
        let reference = format!("{}-{}-{}", REFERENCE_PREFIX, date.format("%Y%m%d"), suffix);
        // The formatted string is never empty, so construction cannot fail.
        Self::new(reference).unwrap_or_else(|_| unreachable!("generated reference is non-empty"))
    }
}

/// Data required to insert a new [`Booking`].
///
/// The reference is generated by the repository at insert time; sub-service
/// associations travel separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBooking {
    pub service_id: ServiceId,
    pub provider_id: Option<ProviderId>,
    pub customer_first_name: NonEmptyString,
    pub customer_last_name: NonEmptyString,
    pub customer_email: EmailAddress,
    pub customer_phone: PhoneNumber,
    pub location_latitude: Latitude,
    pub location_longitude: Longitude,
    pub location_address: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_references_match_the_documented_pattern() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let reference = BookingReference::generate(date);
        let value = reference.as_str();
        assert!(value.starts_with("BK-20251201-"), "got {value}");
        let suffix = &value["BK-20251201-".len()..];
        assert_eq!(suffix.len(), 4);
        assert!(
            suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
    }
}
