use chrono::Utc;

use crate::config::SiteConfig;
use crate::domain::types::SubServiceId;
use crate::dto::intake::BookingCreatedResponse;
use crate::forms::bookings::{CreateBookingForm, CreateBookingPayload};
use crate::repository::{
    BookingReader, BookingWriter, CategoryReader, ProviderReader, ServiceReader,
};
use crate::whatsapp::{self, BookingMessageContext};

use super::{ServiceError, ServiceResult};

/// Core business logic for the booking intake endpoint.
///
/// Validates the submission (naming every missing field), resolves the
/// booked service and its category, persists the booking together with its
/// sub-service associations, and finally attempts the WhatsApp
/// notification. Notification failures never fail the created booking; the
/// caller learns about them through the `whatsapp_sent` flag.
pub fn create_booking<R>(
    form: CreateBookingForm,
    site: &SiteConfig,
    repo: &R,
) -> ServiceResult<BookingCreatedResponse>
where
    R: ServiceReader + CategoryReader + ProviderReader + BookingReader + BookingWriter,
{
    let payload = CreateBookingPayload::try_from(form)?;

    let service = match repo.get_service_by_id(payload.service_id) {
        Ok(Some(service)) => service,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let category = match repo.get_category_by_id(service.category_id) {
        Ok(Some(category)) => category,
        Ok(None) => {
            log::error!(
                "Service {} references missing category {}",
                service.id,
                service.category_id
            );
            return Err(ServiceError::Internal);
        }
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    // Unknown provider ids degrade to "no provider" rather than failing.
    let provider = match payload.provider_id {
        Some(provider_id) => match repo.get_provider_by_id(provider_id) {
            Ok(provider) => provider,
            Err(e) => {
                log::error!("Failed to get provider: {e}");
                return Err(ServiceError::Internal);
            }
        },
        None => None,
    };

    let available = match repo.list_sub_services(service.id) {
        Ok(sub_services) => sub_services,
        Err(e) => {
            log::error!("Failed to list sub-services: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let (new_booking, requested) = payload.into_new_booking();
    // Only sub-services that belong to the booked service are linked.
    let selected: Vec<SubServiceId> = requested
        .into_iter()
        .filter(|id| available.iter().any(|sub| sub.id == *id))
        .collect();

    let booking = match repo.create_booking(&new_booking, &selected) {
        Ok(booking) => booking,
        Err(e) => {
            log::error!("Failed to create booking: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let sub_services = match repo.list_booking_sub_services(booking.id) {
        Ok(sub_services) => sub_services,
        Err(e) => {
            log::error!(
                "Failed to load sub-services for booking {}: {e}",
                booking.reference
            );
            Vec::new()
        }
    };

    let ctx = BookingMessageContext {
        booking: &booking,
        service: &service,
        category: &category,
        provider: provider.as_ref(),
        sub_services: &sub_services,
    };

    let mut whatsapp_sent = false;
    let mut whatsapp_url = None;
    match whatsapp::booking_notification(&ctx, site) {
        Some(notification) => {
            match repo.mark_booking_notified(
                booking.id,
                &notification.number,
                Utc::now().naive_utc(),
            ) {
                Ok(_) => whatsapp_sent = true,
                Err(e) => {
                    log::error!(
                        "Failed to record notification for booking {}: {e}",
                        booking.reference
                    );
                }
            }
            whatsapp_url = Some(notification.link);
        }
        None => {
            log::warn!(
                "No WhatsApp number available for booking {}",
                booking.reference
            );
        }
    }

    Ok(BookingCreatedResponse::new(
        &booking,
        &service,
        whatsapp_sent,
        whatsapp_url,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::provider::Provider;
    use crate::domain::service::{Service, SubService};
    use crate::domain::types::{
        BusinessName, CategoryId, CategoryName, EmailAddress, Money, PhoneNumber, ProviderId,
        Rating, ServiceId, ServiceName, Slug, SubServiceId, SubServiceName, ViewCount,
    };
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, NaiveDateTime};

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn sample_category() -> Category {
        Category {
            id: CategoryId::new(1).unwrap(),
            name: CategoryName::new("Cleaning").unwrap(),
            slug: Slug::new("cleaning").unwrap(),
            description: None,
            whatsapp_number: Some(PhoneNumber::new("0501234567").unwrap()),
            is_active: true,
            is_featured: false,
            display_order: 0,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn sample_service() -> Service {
        Service {
            id: ServiceId::new(5).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            subcategory_id: None,
            provider_id: None,
            name: ServiceName::new("Deep Cleaning").unwrap(),
            slug: Slug::new("deep-cleaning").unwrap(),
            short_description: "Full home deep clean".to_string(),
            description: "Full home deep clean with equipment".to_string(),
            whatsapp_number: None,
            is_active: true,
            is_featured: false,
            is_popular: false,
            views_count: ViewCount::new(0).unwrap(),
            rating: Rating::new(4.5).unwrap(),
            display_order: 0,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn sample_sub_service(id: i32) -> SubService {
        SubService {
            id: SubServiceId::new(id).unwrap(),
            service_id: ServiceId::new(5).unwrap(),
            name: SubServiceName::new(format!("Extra {id}")).unwrap(),
            price: Money::new(25.0).unwrap(),
            duration: Some("1 Hr".to_string()),
            is_active: true,
            display_order: id,
            created_at: epoch(),
        }
    }

    fn sample_provider() -> Provider {
        Provider {
            id: ProviderId::new(2).unwrap(),
            business_name: BusinessName::new("Sparkle Co").unwrap(),
            contact_name: None,
            email: EmailAddress::new("ops@sparkle.example").unwrap(),
            phone: PhoneNumber::new("0501112233").unwrap(),
            whatsapp: None,
            city: "Dubai".to_string(),
            address: None,
            bio: None,
            rating: Rating::new(4.8).unwrap(),
            total_reviews: 10,
            total_jobs: 12,
            is_active: true,
            is_featured: true,
            is_available: true,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            name: "Test".to_string(),
            default_whatsapp: Some("0509999999".to_string()),
            default_country_code: "971".to_string(),
            booking_charge: 42.0,
            cc_zone_charge: 15.0,
            vat_rate: 0.2,
            media_root: "media".to_string(),
        }
    }

    fn complete_form() -> CreateBookingForm {
        CreateBookingForm {
            service_id: Some("5".to_string()),
            customer_first_name: Some("Jane".to_string()),
            customer_last_name: Some("Doe".to_string()),
            customer_email: Some("jane@example.com".to_string()),
            customer_phone: Some("+447700900123".to_string()),
            location_lat: Some("51.5".to_string()),
            location_lng: Some("-0.1".to_string()),
            location_address: Some("10 Downing St".to_string()),
            appointment_date: Some("2025-12-01".to_string()),
            appointment_time: Some("10:00 AM".to_string()),
            ..CreateBookingForm::default()
        }
    }

    #[test]
    fn creates_a_booking_and_builds_the_notification() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![sample_sub_service(1)],
            vec![sample_provider()],
        );

        let response = create_booking(complete_form(), &site(), &repo).unwrap();

        assert!(response.success);
        assert!(response.booking_reference.starts_with("BK-"));
        assert!(response.whatsapp_sent);
        let url = response.whatsapp_url.expect("notification link");
        // Category-level number wins over the site default.
        assert!(url.starts_with("https://wa.me/971501234567?text="));
        assert!(url.contains("Jane%20Doe"));
        assert!(url.contains("Deep%20Cleaning"));
        assert_eq!(response.booking_details.status, "Pending");

        let stored = repo.bookings();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].whatsapp_sent);
        assert_eq!(
            stored[0].whatsapp_number_used.as_deref(),
            Some("971501234567")
        );
    }

    #[test]
    fn missing_fields_fail_without_persisting() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![],
            vec![],
        );
        let mut form = complete_form();
        form.customer_email = None;

        let err = create_booking(form, &site(), &repo).unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                assert!(message.contains("customer_email"), "got {message}");
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.bookings().is_empty());
    }

    #[test]
    fn unknown_services_are_not_found() {
        let repo = TestRepository::new(vec![sample_category()], vec![], vec![], vec![]);
        let err = create_booking(complete_form(), &site(), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn foreign_sub_services_are_dropped() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![sample_sub_service(1)],
            vec![],
        );
        let mut form = complete_form();
        form.selected_sub_services = Some(serde_json::json!([1, 99]));

        let response = create_booking(form, &site(), &repo).unwrap();
        let booking = &repo.bookings()[0];
        let linked = repo.list_booking_sub_services(booking.id).unwrap();
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].id.get(), 1);
        assert!(response.success);
    }

    #[test]
    fn booking_survives_a_missing_notification_number() {
        let mut category = sample_category();
        category.whatsapp_number = None;
        let repo = TestRepository::new(vec![category], vec![sample_service()], vec![], vec![]);
        let mut config = site();
        config.default_whatsapp = None;

        let response = create_booking(complete_form(), &config, &repo).unwrap();

        assert!(response.success);
        assert!(!response.whatsapp_sent);
        assert!(response.whatsapp_url.is_none());
        assert_eq!(repo.bookings().len(), 1);
        assert!(!repo.bookings()[0].whatsapp_sent);
    }
}
