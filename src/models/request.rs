use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::request::{
    NewRequestAttachment as DomainNewRequestAttachment, NewServiceRequest as DomainNewServiceRequest,
    RequestAttachment as DomainRequestAttachment, ServiceRequest as DomainServiceRequest,
};
use crate::domain::types::{
    AttachmentKind, EmailAddress, Latitude, Longitude, Money, NonEmptyString, PhoneNumber,
    RequestStatus, TypeConstraintError,
};

/// Diesel model representing the `service_requests` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::service_requests)]
pub struct ServiceRequest {
    pub id: i32,
    pub service_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub pricing_tier: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<String>,
    pub number_of_people: i32,
    pub hourly_rate: Option<f64>,
    pub location_address: Option<String>,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub notes: Option<String>,
    pub cc_zone: bool,
    pub booking_charge: f64,
    pub cc_zone_charge: f64,
    pub vat: f64,
    pub total_amount: f64,
    pub status: String,
    pub whatsapp_sent: bool,
    pub whatsapp_sent_at: Option<NaiveDateTime>,
    pub whatsapp_number_used: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`ServiceRequest`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::service_requests)]
pub struct NewServiceRequest {
    pub service_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub pricing_tier: Option<String>,
    pub booking_date: Option<NaiveDate>,
    pub booking_time: Option<String>,
    pub number_of_people: i32,
    pub hourly_rate: Option<f64>,
    pub location_address: Option<String>,
    pub location_latitude: Option<f64>,
    pub location_longitude: Option<f64>,
    pub notes: Option<String>,
    pub cc_zone: bool,
    pub booking_charge: f64,
    pub cc_zone_charge: f64,
    pub vat: f64,
    pub total_amount: f64,
    pub status: String,
    pub whatsapp_sent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<DomainNewServiceRequest> for NewServiceRequest {
    fn from(request: DomainNewServiceRequest) -> Self {
        Self {
            service_id: request.service_id.get(),
            first_name: request.first_name.into_inner(),
            last_name: request.last_name.into_inner(),
            email: request.email.into_inner(),
            phone: request.phone.into_inner(),
            pricing_tier: request.pricing_tier,
            booking_date: request.booking_date,
            booking_time: request.booking_time,
            number_of_people: request.number_of_people,
            hourly_rate: request.hourly_rate.map(Money::get),
            location_address: request.location_address,
            location_latitude: request.location_latitude.map(Latitude::get),
            location_longitude: request.location_longitude.map(Longitude::get),
            notes: request.notes,
            cc_zone: request.cc_zone,
            booking_charge: request.booking_charge.get(),
            cc_zone_charge: request.cc_zone_charge.get(),
            vat: request.vat.get(),
            total_amount: request.total_amount.get(),
            status: request.status.as_str().to_string(),
            whatsapp_sent: false,
            created_at: request.created_at,
            updated_at: request.updated_at,
        }
    }
}

impl TryFrom<ServiceRequest> for DomainServiceRequest {
    type Error = TypeConstraintError;

    fn try_from(request: ServiceRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            id: request.id.try_into()?,
            service_id: request.service_id.try_into()?,
            first_name: NonEmptyString::new_for_field(request.first_name, "first name")?,
            last_name: NonEmptyString::new_for_field(request.last_name, "last name")?,
            email: EmailAddress::new(request.email)?,
            phone: PhoneNumber::new(request.phone)?,
            pricing_tier: request.pricing_tier.filter(|t| !t.trim().is_empty()),
            booking_date: request.booking_date,
            booking_time: request.booking_time,
            number_of_people: request.number_of_people,
            hourly_rate: request.hourly_rate.map(Money::new).transpose()?,
            location_address: request.location_address,
            location_latitude: request.location_latitude.map(Latitude::new).transpose()?,
            location_longitude: request.location_longitude.map(Longitude::new).transpose()?,
            notes: request.notes.filter(|n| !n.trim().is_empty()),
            cc_zone: request.cc_zone,
            booking_charge: Money::new(request.booking_charge)?,
            cc_zone_charge: Money::new(request.cc_zone_charge)?,
            vat: Money::new(request.vat)?,
            total_amount: Money::new(request.total_amount)?,
            status: RequestStatus::try_from(request.status)?,
            whatsapp_sent: request.whatsapp_sent,
            whatsapp_sent_at: request.whatsapp_sent_at,
            whatsapp_number_used: request.whatsapp_number_used,
            created_at: request.created_at,
            updated_at: request.updated_at,
        })
    }
}

/// Diesel model representing the `request_attachments` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::request_attachments)]
pub struct RequestAttachment {
    pub id: i32,
    pub request_id: i32,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub stored_path: String,
    pub uploaded_at: NaiveDateTime,
}

/// Insertable form of [`RequestAttachment`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::request_attachments)]
pub struct NewRequestAttachment {
    pub request_id: i32,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub stored_path: String,
    pub uploaded_at: NaiveDateTime,
}

impl NewRequestAttachment {
    /// Bind an attachment payload to its owning request row.
    pub fn from_domain(attachment: &DomainNewRequestAttachment, request_id: i32) -> Self {
        Self {
            request_id,
            file_name: attachment.file_name.clone(),
            file_type: attachment.kind.as_str().to_string(),
            file_size: attachment.file_size,
            stored_path: attachment.stored_path.clone(),
            uploaded_at: attachment.uploaded_at,
        }
    }
}

impl TryFrom<RequestAttachment> for DomainRequestAttachment {
    type Error = TypeConstraintError;

    fn try_from(attachment: RequestAttachment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: attachment.id,
            request_id: attachment.request_id.try_into()?,
            file_name: attachment.file_name,
            kind: AttachmentKind::try_from(attachment.file_type)?,
            file_size: attachment.file_size,
            stored_path: attachment.stored_path,
            uploaded_at: attachment.uploaded_at,
        })
    }
}
