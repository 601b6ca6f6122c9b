use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BusinessName, EmailAddress, PhoneNumber, ProviderId, Rating};

/// A service-delivering business listed in the directory.
///
/// The rating/review/job counters are maintained externally; nothing in
/// this crate derives them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub id: ProviderId,
    pub business_name: BusinessName,
    pub contact_name: Option<String>,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub whatsapp: Option<PhoneNumber>,
    pub city: String,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub rating: Rating,
    pub total_reviews: i32,
    pub total_jobs: i32,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Provider`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewProvider {
    pub business_name: BusinessName,
    pub contact_name: Option<String>,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
    pub whatsapp: Option<PhoneNumber>,
    pub city: String,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
