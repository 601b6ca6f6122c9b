use serde::Serialize;

use crate::domain::booking::Booking;
use crate::domain::request::ServiceRequest;
use crate::domain::service::Service;

/// Human-readable summary nested in the booking success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct BookingDetails {
    pub reference: String,
    pub customer_name: String,
    pub service_name: String,
    pub appointment: String,
    pub status: String,
}

/// Success envelope returned by the booking intake endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreatedResponse {
    pub success: bool,
    pub booking_reference: String,
    pub message: String,
    pub whatsapp_sent: bool,
    pub whatsapp_url: Option<String>,
    pub booking_details: BookingDetails,
}

impl BookingCreatedResponse {
    pub fn new(
        booking: &Booking,
        service: &Service,
        whatsapp_sent: bool,
        whatsapp_url: Option<String>,
    ) -> Self {
        Self {
            success: true,
            booking_reference: booking.reference.as_str().to_string(),
            message: "Booking created successfully!".to_string(),
            whatsapp_sent,
            whatsapp_url,
            booking_details: BookingDetails {
                reference: booking.reference.as_str().to_string(),
                customer_name: booking.customer_full_name(),
                service_name: service.name.as_str().to_string(),
                appointment: booking.formatted_appointment(),
                status: booking.status.label().to_string(),
            },
        }
    }
}

/// Human-readable summary nested in the quotation success envelope.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDetails {
    pub id: i32,
    pub customer_name: String,
    pub service_name: String,
    pub booking_date: String,
    pub booking_time: String,
    pub location: String,
    pub status: String,
}

/// Success envelope returned by the quotation intake endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct RequestCreatedResponse {
    pub success: bool,
    pub request_id: i32,
    pub message: String,
    pub whatsapp_sent: bool,
    pub whatsapp_url: Option<String>,
    pub request_details: RequestDetails,
}

impl RequestCreatedResponse {
    pub fn new(
        request: &ServiceRequest,
        service: &Service,
        whatsapp_sent: bool,
        whatsapp_url: Option<String>,
    ) -> Self {
        Self {
            success: true,
            request_id: request.id.get(),
            message: "Service request submitted successfully!".to_string(),
            whatsapp_sent,
            whatsapp_url,
            request_details: RequestDetails {
                id: request.id.get(),
                customer_name: request.customer_name(),
                service_name: service.name.as_str().to_string(),
                booking_date: request
                    .booking_date
                    .map(|date| date.format("%B %d, %Y").to_string())
                    .unwrap_or_else(|| "Not specified".to_string()),
                booking_time: request
                    .booking_time
                    .clone()
                    .unwrap_or_else(|| "Not specified".to_string()),
                location: request
                    .location_address
                    .clone()
                    .unwrap_or_else(|| "Not specified".to_string()),
                status: request.status.label().to_string(),
            },
        }
    }
}
