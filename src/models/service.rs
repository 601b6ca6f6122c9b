use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::service::{
    NewService as DomainNewService, NewSubService as DomainNewSubService,
    Service as DomainService, SubService as DomainSubService,
};
use crate::domain::types::{
    Money, PhoneNumber, Rating, ServiceName, Slug, SubServiceName, TypeConstraintError, ViewCount,
};

/// Diesel model representing the `services` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::services)]
pub struct Service {
    pub id: i32,
    pub category_id: i32,
    pub subcategory_id: Option<i32>,
    pub provider_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub whatsapp_number: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub views_count: i32,
    pub rating: f64,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Service`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub category_id: i32,
    pub subcategory_id: Option<i32>,
    pub provider_id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub short_description: String,
    pub description: String,
    pub whatsapp_number: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Service> for DomainService {
    type Error = TypeConstraintError;

    fn try_from(service: Service) -> Result<Self, Self::Error> {
        Ok(Self {
            id: service.id.try_into()?,
            category_id: service.category_id.try_into()?,
            subcategory_id: service.subcategory_id.map(TryInto::try_into).transpose()?,
            provider_id: service.provider_id.map(TryInto::try_into).transpose()?,
            name: ServiceName::new(service.name)?,
            slug: Slug::new(service.slug)?,
            short_description: service.short_description,
            description: service.description,
            whatsapp_number: service
                .whatsapp_number
                .filter(|n| !n.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?,
            is_active: service.is_active,
            is_featured: service.is_featured,
            is_popular: service.is_popular,
            views_count: ViewCount::new(service.views_count)?,
            rating: Rating::new(service.rating)?,
            display_order: service.display_order,
            created_at: service.created_at,
            updated_at: service.updated_at,
        })
    }
}

impl From<DomainNewService> for NewService {
    fn from(service: DomainNewService) -> Self {
        Self {
            category_id: service.category_id.get(),
            subcategory_id: service.subcategory_id.map(|id| id.get()),
            provider_id: service.provider_id.map(|id| id.get()),
            name: service.name.into_inner(),
            slug: service.slug.into_inner(),
            short_description: service.short_description,
            description: service.description,
            whatsapp_number: service.whatsapp_number.map(PhoneNumber::into_inner),
            is_active: service.is_active,
            is_featured: service.is_featured,
            is_popular: service.is_popular,
            display_order: service.display_order,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

/// Diesel model representing the `sub_services` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::sub_services)]
pub struct SubService {
    pub id: i32,
    pub service_id: i32,
    pub name: String,
    pub price: f64,
    pub duration: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`SubService`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::sub_services)]
pub struct NewSubService {
    pub service_id: i32,
    pub name: String,
    pub price: f64,
    pub duration: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SubService> for DomainSubService {
    type Error = TypeConstraintError;

    fn try_from(sub_service: SubService) -> Result<Self, Self::Error> {
        Ok(Self {
            id: sub_service.id.try_into()?,
            service_id: sub_service.service_id.try_into()?,
            name: SubServiceName::new(sub_service.name)?,
            price: Money::new(sub_service.price)?,
            duration: sub_service.duration,
            is_active: sub_service.is_active,
            display_order: sub_service.display_order,
            created_at: sub_service.created_at,
        })
    }
}

impl From<DomainNewSubService> for NewSubService {
    fn from(sub_service: DomainNewSubService) -> Self {
        Self {
            service_id: sub_service.service_id.get(),
            name: sub_service.name.into_inner(),
            price: sub_service.price.get(),
            duration: sub_service.duration,
            is_active: sub_service.is_active,
            display_order: sub_service.display_order,
            created_at: sub_service.created_at,
        }
    }
}
