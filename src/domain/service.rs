use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, Money, PhoneNumber, ProviderId, Rating, ServiceId, ServiceName, Slug,
    SubCategoryId, SubServiceId, SubServiceName, ViewCount,
};

/// A bookable service offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubCategoryId>,
    pub provider_id: Option<ProviderId>,
    pub name: ServiceName,
    pub slug: Slug,
    pub short_description: String,
    pub description: String,
    /// Service-level notification override. Empty means "fall through to
    /// category, then site default".
    pub whatsapp_number: Option<PhoneNumber>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub views_count: ViewCount,
    pub rating: Rating,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Service`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewService {
    pub category_id: CategoryId,
    pub subcategory_id: Option<SubCategoryId>,
    pub provider_id: Option<ProviderId>,
    pub name: ServiceName,
    pub slug: Slug,
    pub short_description: String,
    pub description: String,
    pub whatsapp_number: Option<PhoneNumber>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A selectable line item under a service, carrying its own price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubService {
    pub id: SubServiceId,
    pub service_id: ServiceId,
    pub name: SubServiceName,
    pub price: Money,
    pub duration: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`SubService`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubService {
    pub service_id: ServiceId,
    pub name: SubServiceName,
    pub price: Money,
    pub duration: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}
