use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::booking::{Booking as DomainBooking, NewBooking as DomainNewBooking};
use crate::domain::types::{
    BookingReference, BookingStatus, EmailAddress, Latitude, Longitude, NonEmptyString,
    PhoneNumber, TypeConstraintError,
};

/// Diesel model representing the `bookings` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct Booking {
    pub id: i32,
    pub reference: String,
    pub service_id: i32,
    pub provider_id: Option<i32>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub location_latitude: f64,
    pub location_longitude: f64,
    pub location_address: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub whatsapp_sent: bool,
    pub whatsapp_sent_at: Option<NaiveDateTime>,
    pub whatsapp_number_used: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Booking`]. The reference is assigned by the
/// repository immediately before insert.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub reference: String,
    pub service_id: i32,
    pub provider_id: Option<i32>,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub location_latitude: f64,
    pub location_longitude: f64,
    pub location_address: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: String,
    pub notes: Option<String>,
    pub whatsapp_sent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewBooking {
    /// Pair a domain payload with the generated reference.
    pub fn from_domain(booking: &DomainNewBooking, reference: &BookingReference) -> Self {
        Self {
            reference: reference.as_str().to_string(),
            service_id: booking.service_id.get(),
            provider_id: booking.provider_id.map(|id| id.get()),
            customer_first_name: booking.customer_first_name.as_str().to_string(),
            customer_last_name: booking.customer_last_name.as_str().to_string(),
            customer_email: booking.customer_email.as_str().to_string(),
            customer_phone: booking.customer_phone.as_str().to_string(),
            location_latitude: booking.location_latitude.get(),
            location_longitude: booking.location_longitude.get(),
            location_address: booking.location_address.clone(),
            appointment_date: booking.appointment_date,
            appointment_time: booking.appointment_time.clone(),
            status: booking.status.as_str().to_string(),
            notes: booking.notes.clone(),
            whatsapp_sent: false,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

impl TryFrom<Booking> for DomainBooking {
    type Error = TypeConstraintError;

    fn try_from(booking: Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id.try_into()?,
            reference: BookingReference::new(booking.reference)?,
            service_id: booking.service_id.try_into()?,
            provider_id: booking.provider_id.map(TryInto::try_into).transpose()?,
            customer_first_name: NonEmptyString::new_for_field(
                booking.customer_first_name,
                "first name",
            )?,
            customer_last_name: NonEmptyString::new_for_field(
                booking.customer_last_name,
                "last name",
            )?,
            customer_email: EmailAddress::new(booking.customer_email)?,
            customer_phone: PhoneNumber::new(booking.customer_phone)?,
            location_latitude: Latitude::new(booking.location_latitude)?,
            location_longitude: Longitude::new(booking.location_longitude)?,
            location_address: booking.location_address,
            appointment_date: booking.appointment_date,
            appointment_time: booking.appointment_time,
            status: BookingStatus::try_from(booking.status)?,
            notes: booking.notes.filter(|n| !n.trim().is_empty()),
            whatsapp_sent: booking.whatsapp_sent,
            whatsapp_sent_at: booking.whatsapp_sent_at,
            whatsapp_number_used: booking.whatsapp_number_used,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        })
    }
}
