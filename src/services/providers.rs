use crate::domain::types::ProviderId;
use crate::dto::catalog::ProviderDto;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProviderListQuery, ProviderReader};

use super::{ServiceError, ServiceResult};

/// Paginated directory of active providers, featured and best-rated first.
pub fn list_providers<R>(page: usize, repo: &R) -> ServiceResult<Paginated<ProviderDto>>
where
    R: ProviderReader,
{
    let page = page.max(1);
    let query = ProviderListQuery::active().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    match repo.list_providers(query) {
        Ok((total, providers)) => Ok(Paginated::new(
            providers.into_iter().map(ProviderDto::from).collect(),
            page,
            DEFAULT_ITEMS_PER_PAGE,
            total,
        )),
        Err(e) => {
            log::error!("Failed to list providers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Provider detail lookup by id.
pub fn show_provider<R>(provider_id: i32, repo: &R) -> ServiceResult<ProviderDto>
where
    R: ProviderReader,
{
    let provider_id = match ProviderId::new(provider_id) {
        Ok(provider_id) => provider_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    match repo.get_provider_by_id(provider_id) {
        Ok(Some(provider)) => Ok(ProviderDto::from(provider)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get provider: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::provider::Provider;
    use crate::domain::types::{BusinessName, EmailAddress, PhoneNumber, Rating};
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn provider(id: i32, name: &str, active: bool) -> Provider {
        let epoch = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        Provider {
            id: ProviderId::new(id).unwrap(),
            business_name: BusinessName::new(name).unwrap(),
            contact_name: None,
            email: EmailAddress::new(format!("info{id}@example.com")).unwrap(),
            phone: PhoneNumber::new("0501234567").unwrap(),
            whatsapp: None,
            city: "Dubai".to_string(),
            address: None,
            bio: None,
            rating: Rating::new(4.0).unwrap(),
            total_reviews: 0,
            total_jobs: 0,
            is_active: active,
            is_featured: false,
            is_available: true,
            created_at: epoch,
            updated_at: epoch,
        }
    }

    #[test]
    fn inactive_providers_are_hidden() {
        let repo = TestRepository::new(
            vec![],
            vec![],
            vec![],
            vec![provider(1, "Sparkle Co", true), provider(2, "Gone Ltd", false)],
        );

        let listed = list_providers(1, &repo).unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items[0].business_name, "Sparkle Co");
    }

    #[test]
    fn unknown_providers_are_not_found() {
        let repo = TestRepository::new(vec![], vec![], vec![], vec![]);
        assert_eq!(show_provider(9, &repo).unwrap_err(), ServiceError::NotFound);
    }
}
