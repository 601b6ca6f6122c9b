use chrono::{NaiveDate, Utc};

use golden_services::domain::booking::NewBooking;
use golden_services::domain::category::NewCategory;
use golden_services::domain::request::{NewRequestAttachment, NewServiceRequest};
use golden_services::domain::service::{NewService, NewSubService};
use golden_services::domain::types::{
    AttachmentKind, BookingStatus, CategoryId, CategoryName, EmailAddress, Latitude, Longitude,
    Money, NonEmptyString, PhoneNumber, RequestStatus, ServiceId, ServiceName, Slug,
    SubServiceName,
};
use golden_services::pagination::DEFAULT_ITEMS_PER_PAGE;
use golden_services::repository::{
    BookingReader, BookingWriter, CategoryReader, CategoryWriter, DieselRepository, RequestReader,
    RequestWriter, ServiceListQuery, ServiceReader, ServiceWriter, SubCategoryListQuery,
};

mod common;

fn new_category(name: &str) -> NewCategory {
    let now = Utc::now().naive_utc();
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        slug: Slug::from_name(name).expect("valid slug"),
        description: None,
        whatsapp_number: None,
        is_active: true,
        is_featured: false,
        display_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn new_service(category_id: CategoryId, name: &str) -> NewService {
    let now = Utc::now().naive_utc();
    NewService {
        category_id,
        subcategory_id: None,
        provider_id: None,
        name: ServiceName::new(name).expect("valid service name"),
        slug: Slug::from_name(name).expect("valid slug"),
        short_description: format!("{name} for homes"),
        description: format!("{name} with full equipment"),
        whatsapp_number: None,
        is_active: true,
        is_featured: false,
        is_popular: false,
        display_order: 0,
        created_at: now,
        updated_at: now,
    }
}

fn new_sub_service(service_id: ServiceId, name: &str) -> NewSubService {
    NewSubService {
        service_id,
        name: SubServiceName::new(name).expect("valid sub-service name"),
        price: Money::new(25.0).expect("valid price"),
        duration: Some("1 Hr".to_string()),
        is_active: true,
        display_order: 0,
        created_at: Utc::now().naive_utc(),
    }
}

fn new_booking(service_id: ServiceId) -> NewBooking {
    let now = Utc::now().naive_utc();
    NewBooking {
        service_id,
        provider_id: None,
        customer_first_name: NonEmptyString::new("Jane").expect("valid name"),
        customer_last_name: NonEmptyString::new("Doe").expect("valid name"),
        customer_email: EmailAddress::new("jane@example.com").expect("valid email"),
        customer_phone: PhoneNumber::new("+447700900123").expect("valid phone"),
        location_latitude: Latitude::new(51.5).expect("valid latitude"),
        location_longitude: Longitude::new(-0.1).expect("valid longitude"),
        location_address: "10 Downing St".to_string(),
        appointment_date: NaiveDate::from_ymd_opt(2025, 12, 1).expect("valid date"),
        appointment_time: "10:00 AM".to_string(),
        status: BookingStatus::Pending,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn new_request(service_id: ServiceId) -> NewServiceRequest {
    let now = Utc::now().naive_utc();
    NewServiceRequest {
        service_id,
        first_name: NonEmptyString::new("John").expect("valid name"),
        last_name: NonEmptyString::new("Smith").expect("valid name"),
        email: EmailAddress::new("john@example.com").expect("valid email"),
        phone: PhoneNumber::new("07700900456").expect("valid phone"),
        pricing_tier: None,
        booking_date: None,
        booking_time: None,
        number_of_people: 1,
        hourly_rate: None,
        location_address: None,
        location_latitude: None,
        location_longitude: None,
        notes: None,
        cc_zone: false,
        booking_charge: Money::new(42.0).expect("valid amount"),
        cc_zone_charge: Money::new(0.0).expect("valid amount"),
        vat: Money::new(8.4).expect("valid amount"),
        total_amount: Money::new(50.4).expect("valid amount"),
        status: RequestStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn booking_creation_assigns_a_patterned_reference_and_links_sub_services() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let service = repo
        .create_service(&new_service(category.id, "Deep Cleaning"))
        .expect("should create service");
    let sub_service = repo
        .create_sub_service(&new_sub_service(service.id, "Oven"))
        .expect("should create sub-service");

    let booking = repo
        .create_booking(&new_booking(service.id), &[sub_service.id])
        .expect("should create booking");

    let reference = booking.reference.as_str();
    assert!(reference.starts_with("BK-"), "got {reference}");
    let mut parts = reference.splitn(3, '-');
    assert_eq!(parts.next(), Some("BK"));
    let date_part = parts.next().expect("date part");
    assert_eq!(date_part.len(), 8);
    assert!(date_part.chars().all(|c| c.is_ascii_digit()));
    let suffix = parts.next().expect("suffix part");
    assert_eq!(suffix.len(), 4);
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );

    let linked = repo
        .list_booking_sub_services(booking.id)
        .expect("should list booking sub-services");
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, sub_service.id);

    let loaded = repo
        .get_booking_by_reference(reference)
        .expect("lookup should succeed")
        .expect("booking should exist");
    assert_eq!(loaded.id, booking.id);
    assert!(!loaded.whatsapp_sent);
}

#[test]
fn booking_references_are_unique_across_bookings() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let service = repo
        .create_service(&new_service(category.id, "Deep Cleaning"))
        .expect("should create service");

    let mut references = std::collections::HashSet::new();
    for _ in 0..20 {
        let booking = repo
            .create_booking(&new_booking(service.id), &[])
            .expect("should create booking");
        assert!(
            references.insert(booking.reference.as_str().to_string()),
            "duplicate reference allocated"
        );
    }
}

#[test]
fn marking_a_booking_notified_sets_the_whatsapp_fields() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let service = repo
        .create_service(&new_service(category.id, "Deep Cleaning"))
        .expect("should create service");
    let booking = repo
        .create_booking(&new_booking(service.id), &[])
        .expect("should create booking");

    let sent_at = Utc::now().naive_utc();
    let affected = repo
        .mark_booking_notified(booking.id, "971501234567", sent_at)
        .expect("update should succeed");
    assert_eq!(affected, 1);

    let loaded = repo
        .get_booking_by_reference(booking.reference.as_str())
        .expect("lookup should succeed")
        .expect("booking should exist");
    assert!(loaded.whatsapp_sent);
    assert_eq!(loaded.whatsapp_number_used.as_deref(), Some("971501234567"));
    assert!(loaded.whatsapp_sent_at.is_some());
}

#[test]
fn request_and_attachments_are_written_together() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Removals"))
        .expect("should create category");
    let service = repo
        .create_service(&new_service(category.id, "Man and Van"))
        .expect("should create service");

    let attachments = vec![
        NewRequestAttachment {
            file_name: "kitchen.jpg".to_string(),
            kind: AttachmentKind::Image,
            file_size: 2048,
            stored_path: "media/quotations/kitchen.jpg".to_string(),
            uploaded_at: Utc::now().naive_utc(),
        },
        NewRequestAttachment {
            file_name: "inventory.pdf".to_string(),
            kind: AttachmentKind::Document,
            file_size: 4096,
            stored_path: "media/quotations/inventory.pdf".to_string(),
            uploaded_at: Utc::now().naive_utc(),
        },
    ];

    let request = repo
        .create_request(&new_request(service.id), &attachments)
        .expect("should create request");
    assert_eq!(request.total_amount.get(), 50.4);

    let stored = repo
        .list_request_attachments(request.id)
        .expect("should list attachments");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|a| a.request_id == request.id));

    let loaded = repo
        .get_request_by_id(request.id)
        .expect("lookup should succeed")
        .expect("request should exist");
    assert_eq!(loaded.status, RequestStatus::Pending);
}

#[test]
fn view_counter_updates_are_cumulative() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let service = repo
        .create_service(&new_service(category.id, "Deep Cleaning"))
        .expect("should create service");

    repo.increment_views(service.id).expect("first increment");
    repo.increment_views(service.id).expect("second increment");

    let loaded = repo
        .get_service_by_id(service.id)
        .expect("lookup should succeed")
        .expect("service should exist");
    assert_eq!(loaded.views_count.get(), 2);
}

#[test]
fn subcategories_are_scoped_and_searchable() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let category = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let now = Utc::now().naive_utc();
    repo.create_subcategory(&golden_services::domain::category::NewSubCategory {
        category_id: category.id,
        name: CategoryName::new("Carpet Cleaning").expect("valid name"),
        slug: Slug::from_name("Carpet Cleaning").expect("valid slug"),
        description: None,
        is_active: true,
        display_order: 0,
        created_at: now,
        updated_at: now,
    })
    .expect("should create subcategory");

    let found = repo
        .list_subcategories(SubCategoryListQuery::active().search("carpet"))
        .expect("should list subcategories");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].category_id, category.id);

    let service = repo
        .create_service(&new_service(category.id, "Deep Cleaning"))
        .expect("should create service");
    let by_slug = repo
        .get_service_by_slug("deep-cleaning")
        .expect("lookup should succeed")
        .expect("service should exist");
    assert_eq!(by_slug.id, service.id);
}

#[test]
fn service_listing_filters_by_keyword_and_category_slug() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let cleaning = repo
        .create_category(&new_category("Cleaning"))
        .expect("should create category");
    let plumbing = repo
        .create_category(&new_category("Plumbing"))
        .expect("should create category");
    repo.create_service(&new_service(cleaning.id, "Deep Cleaning"))
        .expect("should create service");
    repo.create_service(&new_service(cleaning.id, "Sofa Cleaning"))
        .expect("should create service");
    repo.create_service(&new_service(plumbing.id, "Leak Repair"))
        .expect("should create service");

    let (total, services) = repo
        .list_services(
            ServiceListQuery::active()
                .keyword("cleaning")
                .categories(vec!["cleaning".to_string()])
                .paginate(1, DEFAULT_ITEMS_PER_PAGE),
        )
        .expect("should list services");
    assert_eq!(total, 2);
    assert_eq!(services.len(), 2);

    let (total, services) = repo
        .list_services(ServiceListQuery::active().keyword("leak"))
        .expect("should list services");
    assert_eq!(total, 1);
    assert_eq!(services[0].name.as_str(), "Leak Repair");
}
