//! WhatsApp deep-link construction.
//!
//! "Sending" a notification in this system means building a `wa.me` link
//! with a pre-filled, URL-encoded message. Nothing here performs network
//! I/O; the caller persists the sent flag and hands the link back to the
//! client for dispatch.

use crate::config::SiteConfig;
use crate::domain::booking::Booking;
use crate::domain::category::Category;
use crate::domain::provider::Provider;
use crate::domain::request::ServiceRequest;
use crate::domain::service::{Service, SubService};

/// A prepared notification: the normalized destination number, the plain
/// message text and the deep link embedding it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub number: String,
    pub message: String,
    pub link: String,
}

/// Everything the booking message template needs, loaded by the caller.
#[derive(Debug, Clone, Copy)]
pub struct BookingMessageContext<'a> {
    pub booking: &'a Booking,
    pub service: &'a Service,
    pub category: &'a Category,
    pub provider: Option<&'a Provider>,
    pub sub_services: &'a [SubService],
}

/// Everything the quotation message template needs.
#[derive(Debug, Clone, Copy)]
pub struct RequestMessageContext<'a> {
    pub request: &'a ServiceRequest,
    pub service: &'a Service,
    pub category: &'a Category,
}

/// Pick the destination number by fixed priority; the first non-empty
/// candidate wins. Callers pass candidates most-specific first (record
/// override, owning service, owning category, site default).
pub fn resolve_number<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|number| !number.trim().is_empty())
}

/// Normalize a number for `wa.me`: strip everything but digits, drop any
/// leading zeros in favor of the configured country code, and prepend the
/// country code when it is not already present.
pub fn normalize_number(raw: &str, country_code: &str) -> Option<String> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        return None;
    }

    if stripped.len() < digits.len() {
        Some(format!("{country_code}{stripped}"))
    } else if digits.starts_with(country_code) {
        Some(digits)
    } else {
        Some(format!("{country_code}{digits}"))
    }
}

/// Build the `wa.me` deep link for a normalized number and message.
pub fn whatsapp_link(number: &str, message: &str) -> String {
    format!("https://wa.me/{number}?text={}", urlencoding::encode(message))
}

/// Render the fixed booking message template.
pub fn build_booking_message(ctx: &BookingMessageContext) -> String {
    let booking = ctx.booking;

    let sub_services_text = if ctx.sub_services.is_empty() {
        String::new()
    } else {
        let list = ctx
            .sub_services
            .iter()
            .map(|sub| format!("  • {}", sub.name))
            .collect::<Vec<_>>()
            .join("\n");
        format!("\n\n*Services Requested:*\n{list}")
    };

    let provider_text = ctx
        .provider
        .map(|provider| format!("\n*Provider:* {}", provider.business_name))
        .unwrap_or_default();

    let mut message = format!(
        "🔔 *New Appointment Booking*\n\
         \n\
         *Booking Reference:* {reference}\n\
         *Status:* {status}\n\
         \n\
         *Customer Information:*\n\
         👤 Name: {name}\n\
         📧 Email: {email}\n\
         📱 Phone: {phone}\n\
         \n\
         *Service Details:*\n\
         🔧 Service: {service}\n\
         📂 Category: {category}{provider_text}{sub_services_text}\n\
         \n\
         *Appointment:*\n\
         📅 Date: {date}\n\
         ⏰ Time: {time}\n\
         \n\
         *Service Location:*\n\
         📍 {address}\n\
         🗺️ Map: {map}",
        reference = booking.reference,
        status = booking.status.label(),
        name = booking.customer_full_name(),
        email = booking.customer_email,
        phone = booking.customer_phone,
        service = ctx.service.name,
        category = ctx.category.name,
        date = booking.appointment_date.format("%A, %B %d, %Y"),
        time = booking.appointment_time,
        address = booking.location_address,
        map = booking.maps_link(),
    );

    if let Some(notes) = &booking.notes {
        message.push_str(&format!("\n\n💬 *Customer Notes:*\n{notes}"));
    }

    message.push_str(&format!(
        "\n\n⏱️ _Booked on {}_",
        booking.created_at.format("%B %d, %Y at %I:%M %p")
    ));

    message
}

/// Render the fixed quotation message template.
pub fn build_request_message(ctx: &RequestMessageContext) -> String {
    let request = ctx.request;

    let schedule = match (&request.booking_date, &request.booking_time) {
        (Some(date), Some(time)) => format!("{} at {}", date.format("%A, %B %d, %Y"), time),
        (Some(date), None) => date.format("%A, %B %d, %Y").to_string(),
        (None, Some(time)) => time.clone(),
        (None, None) => "Not specified".to_string(),
    };

    let mut message = format!(
        "🚚 *NEW SERVICE REQUEST*\n\
         \n\
         *Request ID:* {id}\n\
         *Status:* {status}\n\
         \n\
         *Customer Information:*\n\
         👤 Name: {name}\n\
         📧 Email: {email}\n\
         📱 Phone: {phone}\n\
         \n\
         *Service Details:*\n\
         🔧 Service: {service}\n\
         📂 Category: {category}\n\
         \n\
         *Booking Schedule:*\n\
         📅 Date & Time: {schedule}",
        id = request.id,
        status = request.status.label(),
        name = request.customer_name(),
        email = request.email,
        phone = request.phone,
        service = ctx.service.name,
        category = ctx.category.name,
    );

    if let Some(address) = &request.location_address {
        message.push_str(&format!("\n\n*Location:*\n📍 {address}"));
        if let (Some(lat), Some(lon)) = (request.location_latitude, request.location_longitude) {
            message.push_str(&format!(
                "\n🗺️ Map: https://www.google.com/maps?q={},{}",
                lat.get(),
                lon.get()
            ));
        }
    }

    if let Some(notes) = &request.notes {
        message.push_str(&format!("\n\n💬 *Additional Notes:*\n{notes}"));
    }

    message.push_str(&format!(
        "\n\n⏱️ _Submitted on {}_",
        request.created_at.format("%B %d, %Y at %I:%M %p")
    ));

    message
}

/// Build the notification for a booking, or `None` when no number resolves
/// at any level.
pub fn booking_notification(
    ctx: &BookingMessageContext,
    site: &SiteConfig,
) -> Option<Notification> {
    let raw = resolve_number([
        ctx.service.whatsapp_number.as_ref().map(|n| n.as_str()),
        ctx.category.whatsapp_number.as_ref().map(|n| n.as_str()),
        site.default_whatsapp.as_deref(),
    ])?;
    let number = normalize_number(raw, &site.default_country_code)?;
    let message = build_booking_message(ctx);
    let link = whatsapp_link(&number, &message);
    Some(Notification {
        number,
        message,
        link,
    })
}

/// Build the notification for a quotation request, or `None` when no
/// number resolves at any level.
pub fn request_notification(
    ctx: &RequestMessageContext,
    site: &SiteConfig,
) -> Option<Notification> {
    let raw = resolve_number([
        ctx.service.whatsapp_number.as_ref().map(|n| n.as_str()),
        ctx.category.whatsapp_number.as_ref().map(|n| n.as_str()),
        site.default_whatsapp.as_deref(),
    ])?;
    let number = normalize_number(raw, &site.default_country_code)?;
    let message = build_request_message(ctx);
    let link = whatsapp_link(&number, &message);
    Some(Notification {
        number,
        message,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_zeros_are_replaced_by_the_country_code() {
        assert_eq!(
            normalize_number("00501234567", "971").as_deref(),
            Some("971501234567")
        );
        assert_eq!(
            normalize_number("0501234567", "971").as_deref(),
            Some("971501234567")
        );
    }

    #[test]
    fn already_prefixed_numbers_are_unchanged() {
        assert_eq!(
            normalize_number("971501234567", "971").as_deref(),
            Some("971501234567")
        );
        assert_eq!(
            normalize_number("+971 50 123 4567", "971").as_deref(),
            Some("971501234567")
        );
    }

    #[test]
    fn bare_local_numbers_get_the_prefix() {
        assert_eq!(
            normalize_number("501234567", "971").as_deref(),
            Some("971501234567")
        );
    }

    #[test]
    fn numbers_without_digits_do_not_resolve() {
        assert_eq!(normalize_number("n/a", "971"), None);
        assert_eq!(normalize_number("0000", "971"), None);
    }

    #[test]
    fn resolution_prefers_the_most_specific_candidate() {
        assert_eq!(
            resolve_number([Some("111"), Some("222"), Some("333")]),
            Some("111")
        );
        assert_eq!(
            resolve_number([None, Some("  "), Some("333")]),
            Some("333")
        );
        let unset: [Option<&str>; 3] = [None, None, None];
        assert_eq!(resolve_number(unset), None);
    }

    #[test]
    fn link_embeds_the_encoded_message() {
        let link = whatsapp_link("971501234567", "Hello & welcome");
        assert_eq!(
            link,
            "https://wa.me/971501234567?text=Hello%20%26%20welcome"
        );
    }

    #[test]
    fn encoded_messages_decode_back_verbatim() {
        let message = "🔔 *New Appointment Booking*\n\n*Status:* Pending";
        let link = whatsapp_link("971501234567", message);
        let encoded = link.split("?text=").nth(1).unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), message);
    }
}
