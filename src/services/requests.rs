use chrono::Utc;

use crate::config::SiteConfig;
use crate::domain::request::{NewRequestAttachment, QuoteTotals};
use crate::dto::intake::RequestCreatedResponse;
use crate::forms::requests::{CreateRequestForm, CreateRequestPayload};
use crate::repository::{CategoryReader, RequestReader, RequestWriter, ServiceReader};
use crate::whatsapp::{self, RequestMessageContext};

use super::{ServiceError, ServiceResult};

/// Core business logic for the quotation intake endpoint.
///
/// Validates the submission, derives the monetary breakdown from the site
/// pricing configuration, persists the request and its attachments in one
/// transaction, and attempts the WhatsApp notification. Attachment
/// metadata is prepared by the route layer, which has already stored the
/// uploaded files.
pub fn create_service_request<R>(
    form: CreateRequestForm,
    attachments: Vec<NewRequestAttachment>,
    site: &SiteConfig,
    repo: &R,
) -> ServiceResult<RequestCreatedResponse>
where
    R: ServiceReader + CategoryReader + RequestReader + RequestWriter,
{
    let payload = CreateRequestPayload::try_from(form)?;

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

    let totals = match QuoteTotals::compute(
        site.booking_charge,
        payload.cc_zone,
        site.cc_zone_charge,
        payload.hourly_rate,
        site.vat_rate,
    ) {
        Ok(totals) => totals,
        Err(e) => {
            log::error!("Quote totals computation failed: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let new_request = payload.into_new_request(totals);
    let request = match repo.create_request(&new_request, &attachments) {
        Ok(request) => request,
        Err(e) => {
            log::error!("Failed to create service request: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let ctx = RequestMessageContext {
        request: &request,
        service: &service,
        category: &category,
    };

    let mut whatsapp_sent = false;
    let mut whatsapp_url = None;
    match whatsapp::request_notification(&ctx, site) {
        Some(notification) => {
            match repo.mark_request_notified(
                request.id,
                &notification.number,
                Utc::now().naive_utc(),
            ) {
                Ok(_) => whatsapp_sent = true,
                Err(e) => {
                    log::error!(
                        "Failed to record notification for request {}: {e}",
                        request.id
                    );
                }
            }
            whatsapp_url = Some(notification.link);
        }
        None => {
            log::warn!("No WhatsApp number available for request {}", request.id);
        }
    }

    Ok(RequestCreatedResponse::new(
        &request,
        &service,
        whatsapp_sent,
        whatsapp_url,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::service::Service;
    use crate::domain::types::{
        AttachmentKind, CategoryId, CategoryName, PhoneNumber, Rating, ServiceId, ServiceName,
        Slug, ViewCount,
    };
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, NaiveDateTime};

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn sample_category() -> Category {
        Category {
            id: CategoryId::new(1).unwrap(),
            name: CategoryName::new("Removals").unwrap(),
            slug: Slug::new("removals").unwrap(),
            description: None,
            whatsapp_number: None,
            is_active: true,
            is_featured: false,
            display_order: 0,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn sample_service() -> Service {
        Service {
            id: ServiceId::new(3).unwrap(),
            category_id: CategoryId::new(1).unwrap(),
            subcategory_id: None,
            provider_id: None,
            name: ServiceName::new("Man and Van").unwrap(),
            slug: Slug::new("man-and-van").unwrap(),
            short_description: "Small moves".to_string(),
            description: "Small moves within the city".to_string(),
            whatsapp_number: Some(PhoneNumber::new("0507654321").unwrap()),
            is_active: true,
            is_featured: false,
            is_popular: false,
            views_count: ViewCount::new(0).unwrap(),
            rating: Rating::new(4.0).unwrap(),
            display_order: 0,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn site() -> SiteConfig {
        SiteConfig {
            name: "Test".to_string(),
            default_whatsapp: None,
            default_country_code: "971".to_string(),
            booking_charge: 42.0,
            cc_zone_charge: 15.0,
            vat_rate: 0.2,
            media_root: "media".to_string(),
        }
    }

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
    fn creates_a_request_with_derived_totals() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![],
            vec![],
        );
        let mut form = complete_form();
        form.cc_zone = Some("true".to_string());
        form.hourly_rate = Some("70".to_string());

        let response = create_service_request(form, Vec::new(), &site(), &repo).unwrap();

        assert!(response.success);
        assert!(response.whatsapp_sent);
        let stored = &repo.requests()[0];
        assert_eq!(stored.booking_charge.get(), 42.0);
        assert_eq!(stored.cc_zone_charge.get(), 15.0);
        // subtotal 127.00 -> VAT 25.40 -> total 152.40
        assert_eq!(stored.vat.get(), 25.4);
        assert_eq!(stored.total_amount.get(), 152.4);
        // Service-level number wins; no category/default fallback needed.
        assert_eq!(
            stored.whatsapp_number_used.as_deref(),
            Some("971507654321")
        );
    }

    #[test]
    fn attachments_are_stored_with_the_request() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![],
            vec![],
        );
        let attachments = vec![NewRequestAttachment {
            file_name: "kitchen.jpg".to_string(),
            kind: AttachmentKind::Image,
            file_size: 2048,
            stored_path: "media/quotations/kitchen.jpg".to_string(),
            uploaded_at: epoch(),
        }];

        let response =
            create_service_request(complete_form(), attachments, &site(), &repo).unwrap();

        let stored = repo.attachments();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].request_id.get(), response.request_id);
        assert_eq!(stored[0].kind, AttachmentKind::Image);
    }

    #[test]
    fn missing_fields_fail_without_persisting() {
        let repo = TestRepository::new(
            vec![sample_category()],
            vec![sample_service()],
            vec![],
            vec![],
        );
        let err =
            create_service_request(CreateRequestForm::default(), Vec::new(), &site(), &repo)
                .unwrap_err();
        match err {
            ServiceError::Validation(message) => {
                for field in ["service_id", "first_name", "last_name", "email", "phone"] {
                    assert!(message.contains(field), "missing {field} in {message}");
                }
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert!(repo.requests().is_empty());
    }

    #[test]
    fn request_survives_a_missing_notification_number() {
        let mut service = sample_service();
        service.whatsapp_number = None;
        let repo = TestRepository::new(vec![sample_category()], vec![service], vec![], vec![]);

        let response =
            create_service_request(complete_form(), Vec::new(), &site(), &repo).unwrap();

        assert!(response.success);
        assert!(!response.whatsapp_sent);
        assert!(response.whatsapp_url.is_none());
        assert_eq!(repo.requests().len(), 1);
    }
}
