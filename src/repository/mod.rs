use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool};
use crate::domain::booking::{Booking, NewBooking};
use crate::domain::category::{Category, NewCategory, NewSubCategory, SubCategory};
use crate::domain::provider::{NewProvider, Provider};
use crate::domain::request::{NewRequestAttachment, NewServiceRequest, RequestAttachment, ServiceRequest};
use crate::domain::service::{NewService, NewSubService, Service, SubService};
use crate::domain::types::{BookingId, CategoryId, ProviderId, RequestId, ServiceId, SubServiceId};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod booking;
pub mod category;
pub mod errors;
pub mod provider;
pub mod request;
pub mod service;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing or searching services.
#[derive(Debug, Clone, Default)]
pub struct ServiceListQuery {
    /// Substring match across name/short_description/description.
    pub keyword: Option<String>,
    /// Restrict to services under any of these category slugs.
    pub category_slugs: Vec<String>,
    /// Restrict to services under any of these subcategory slugs.
    pub subcategory_slugs: Vec<String>,
    /// Only include active services.
    pub only_active: bool,
    /// Filter on the featured flag.
    pub featured: Option<bool>,
    /// Filter on the popular flag.
    pub popular: Option<bool>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl ServiceListQuery {
    pub fn active() -> Self {
        Self {
            only_active: true,
            ..Self::default()
        }
    }
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
    pub fn categories(mut self, slugs: Vec<String>) -> Self {
        self.category_slugs = slugs;
        self
    }
    pub fn subcategories(mut self, slugs: Vec<String>) -> Self {
        self.subcategory_slugs = slugs;
        self
    }
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }
    pub fn popular(mut self, popular: bool) -> Self {
        self.popular = Some(popular);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryListQuery {
    /// Substring match on the category name.
    pub search: Option<String>,
    pub only_active: bool,
    pub featured: Option<bool>,
}

impl CategoryListQuery {
    pub fn active() -> Self {
        Self {
            only_active: true,
            ..Self::default()
        }
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }
}

/// Query parameters for listing subcategories.
#[derive(Debug, Clone, Default)]
pub struct SubCategoryListQuery {
    /// Substring match on the subcategory name.
    pub search: Option<String>,
    pub only_active: bool,
    pub category_id: Option<CategoryId>,
}

impl SubCategoryListQuery {
    pub fn active() -> Self {
        Self {
            only_active: true,
            ..Self::default()
        }
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Query parameters for listing providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderListQuery {
    pub only_active: bool,
    pub featured: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl ProviderListQuery {
    pub fn active() -> Self {
        Self {
            only_active: true,
            ..Self::default()
        }
    }
    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List categories using the supplied query options.
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// List subcategories using the supplied query options.
    fn list_subcategories(&self, query: SubCategoryListQuery)
    -> RepositoryResult<Vec<SubCategory>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Persist a new subcategory.
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory>;
}

/// Read-only operations for service entities.
pub trait ServiceReader {
    /// List services matching the supplied query parameters, returning the
    /// unpaginated total alongside the page of items.
    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<(usize, Vec<Service>)>;
    /// Retrieve a service by its identifier.
    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>>;
    /// Retrieve a service by its slug.
    fn get_service_by_slug(&self, slug: &str) -> RepositoryResult<Option<Service>>;
    /// List the active sub-services of a service.
    fn list_sub_services(&self, service_id: ServiceId) -> RepositoryResult<Vec<SubService>>;
}

/// Write operations for service entities.
pub trait ServiceWriter {
    /// Persist a new service.
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service>;
    /// Persist a new sub-service.
    fn create_sub_service(&self, sub_service: &NewSubService) -> RepositoryResult<SubService>;
    /// Atomically increment the detail-view counter.
    fn increment_views(&self, id: ServiceId) -> RepositoryResult<usize>;
}

/// Read-only operations for provider entities.
pub trait ProviderReader {
    /// List providers matching the supplied query parameters.
    fn list_providers(&self, query: ProviderListQuery) -> RepositoryResult<(usize, Vec<Provider>)>;
    /// Retrieve a provider by its identifier.
    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>>;
}

/// Write operations for provider entities.
pub trait ProviderWriter {
    /// Persist a new provider.
    fn create_provider(&self, provider: &NewProvider) -> RepositoryResult<Provider>;
}

/// Read-only operations for booking records.
pub trait BookingReader {
    /// Retrieve a booking by its unique reference.
    fn get_booking_by_reference(&self, reference: &str) -> RepositoryResult<Option<Booking>>;
    /// List the sub-services associated with a booking.
    fn list_booking_sub_services(&self, id: BookingId) -> RepositoryResult<Vec<SubService>>;
}

/// Write operations for booking records.
pub trait BookingWriter {
    /// Persist a new booking together with its sub-service associations in
    /// one transaction. The unique reference is generated here, retrying on
    /// collision.
    fn create_booking(
        &self,
        booking: &NewBooking,
        sub_services: &[SubServiceId],
    ) -> RepositoryResult<Booking>;
    /// Record that the notification link was produced for this booking.
    fn mark_booking_notified(
        &self,
        id: BookingId,
        number: &str,
        sent_at: NaiveDateTime,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for quotation requests.
pub trait RequestReader {
    /// Retrieve a request by its identifier.
    fn get_request_by_id(&self, id: RequestId) -> RepositoryResult<Option<ServiceRequest>>;
    /// List the attachments stored for a request.
    fn list_request_attachments(&self, id: RequestId)
    -> RepositoryResult<Vec<RequestAttachment>>;
}

/// Write operations for quotation requests.
pub trait RequestWriter {
    /// Persist a new request together with its attachments in one
    /// transaction.
    fn create_request(
        &self,
        request: &NewServiceRequest,
        attachments: &[NewRequestAttachment],
    ) -> RepositoryResult<ServiceRequest>;
    /// Record that the notification link was produced for this request.
    fn mark_request_notified(
        &self,
        id: RequestId,
        number: &str,
        sent_at: NaiveDateTime,
    ) -> RepositoryResult<usize>;
}
