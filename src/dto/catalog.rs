use serde::Serialize;

use crate::domain::category::{Category, SubCategory};
use crate::domain::provider::Provider;
use crate::domain::service::{Service, SubService};

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_featured: bool,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            description: value.description,
            is_featured: value.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubCategoryDto {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
}

impl From<SubCategory> for SubCategoryDto {
    fn from(value: SubCategory) -> Self {
        Self {
            id: value.id.get(),
            category_id: value.category_id.get(),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ServiceDto {
    pub id: i32,
    pub category_id: i32,
    pub subcategory_id: Option<i32>,
    pub provider_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub rating: f64,
    pub views_count: i32,
    pub is_featured: bool,
    pub is_popular: bool,
}

impl From<Service> for ServiceDto {
    fn from(value: Service) -> Self {
        Self {
            id: value.id.get(),
            category_id: value.category_id.get(),
            subcategory_id: value.subcategory_id.map(|id| id.get()),
            provider_id: value.provider_id.map(|id| id.get()),
            name: value.name.into_inner(),
            slug: value.slug.into_inner(),
            short_description: value.short_description,
            rating: value.rating.get(),
            views_count: value.views_count.get(),
            is_featured: value.is_featured,
            is_popular: value.is_popular,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SubServiceDto {
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub duration: Option<String>,
}

impl From<SubService> for SubServiceDto {
    fn from(value: SubService) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            price: value.price.get(),
            duration: value.duration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProviderDto {
    pub id: i32,
    pub business_name: String,
    pub city: String,
    pub rating: f64,
    pub total_reviews: i32,
    pub total_jobs: i32,
    pub is_available: bool,
}

impl From<Provider> for ProviderDto {
    fn from(value: Provider) -> Self {
        Self {
            id: value.id.get(),
            business_name: value.business_name.into_inner(),
            city: value.city,
            rating: value.rating.get(),
            total_reviews: value.total_reviews,
            total_jobs: value.total_jobs,
            is_available: value.is_available,
        }
    }
}

/// Full service detail payload: the service, its category and its active
/// sub-services.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDetailDto {
    #[serde(flatten)]
    pub service: ServiceDto,
    pub description: String,
    pub category: CategoryDto,
    pub sub_services: Vec<SubServiceDto>,
}

/// Featured/popular highlights for the home surface.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryDto {
    pub featured_categories: Vec<CategoryDto>,
    pub featured_services: Vec<ServiceDto>,
    pub popular_services: Vec<ServiceDto>,
    pub featured_providers: Vec<ProviderDto>,
}
