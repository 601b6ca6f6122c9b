use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::provider::{NewProvider as DomainNewProvider, Provider as DomainProvider};
use crate::domain::types::{BusinessName, EmailAddress, PhoneNumber, Rating, TypeConstraintError};

/// Diesel model representing the `providers` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::providers)]
pub struct Provider {
    pub id: i32,
    pub business_name: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub rating: f64,
    pub total_reviews: i32,
    pub total_jobs: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Provider`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::providers)]
pub struct NewProvider {
    pub business_name: String,
    pub contact_name: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub city: String,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Provider> for DomainProvider {
    type Error = TypeConstraintError;

    fn try_from(provider: Provider) -> Result<Self, Self::Error> {
        Ok(Self {
            id: provider.id.try_into()?,
            business_name: BusinessName::new(provider.business_name)?,
            contact_name: provider.contact_name,
            email: EmailAddress::new(provider.email)?,
            phone: PhoneNumber::new(provider.phone)?,
            whatsapp: provider
                .whatsapp
                .filter(|n| !n.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?,
            city: provider.city,
            address: provider.address,
            bio: provider.bio,
            rating: Rating::new(provider.rating)?,
            total_reviews: provider.total_reviews,
            total_jobs: provider.total_jobs,
            is_active: provider.is_active,
            is_featured: provider.is_featured,
            is_available: provider.is_available,
            created_at: provider.created_at,
            updated_at: provider.updated_at,
        })
    }
}

impl From<DomainNewProvider> for NewProvider {
    fn from(provider: DomainNewProvider) -> Self {
        Self {
            business_name: provider.business_name.into_inner(),
            contact_name: provider.contact_name,
            email: provider.email.into_inner(),
            phone: provider.phone.into_inner(),
            whatsapp: provider.whatsapp.map(PhoneNumber::into_inner),
            city: provider.city,
            address: provider.address,
            bio: provider.bio,
            is_active: provider.is_active,
            is_featured: provider.is_featured,
            is_available: provider.is_available,
            created_at: provider.created_at,
            updated_at: provider.updated_at,
        }
    }
}
