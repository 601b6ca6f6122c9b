use crate::dto::catalog::{
    CategoryDto, ServiceDetailDto, ServiceDto, SubCategoryDto, SubServiceDto, SummaryDto,
};
use crate::domain::types::ServiceId;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{
    CategoryListQuery, CategoryReader, ProviderListQuery, ProviderReader, ServiceListQuery,
    ServiceReader, ServiceWriter, SubCategoryListQuery,
};

use super::{ServiceError, ServiceResult};

const SUMMARY_FEATURED_CATEGORIES: usize = 6;
const SUMMARY_FEATURED_SERVICES: usize = 6;
const SUMMARY_POPULAR_SERVICES: usize = 8;
const SUMMARY_FEATURED_PROVIDERS: usize = 4;

/// Filters accepted by the service listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct ServiceListParams {
    pub keyword: Option<String>,
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub page: usize,
}

/// Keep only meaningful slug filters; the UI sends an `all` sentinel when
/// no specific filter is selected.
fn effective_slugs(slugs: Vec<String>) -> Vec<String> {
    if slugs.iter().any(|slug| slug == "all") {
        return Vec::new();
    }
    slugs
        .into_iter()
        .filter(|slug| !slug.trim().is_empty())
        .collect()
}

/// Paginated, filtered service listing.
pub fn list_services<R>(params: ServiceListParams, repo: &R) -> ServiceResult<Paginated<ServiceDto>>
where
    R: ServiceReader,
{
    let page = params.page.max(1);
    let mut query = ServiceListQuery::active().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(keyword) = params.keyword.filter(|k| !k.trim().is_empty()) {
        query = query.keyword(keyword.trim());
    }
    query = query
        .categories(effective_slugs(params.categories))
        .subcategories(effective_slugs(params.subcategories));

    match repo.list_services(query) {
        Ok((total, services)) => Ok(Paginated::new(
            services.into_iter().map(ServiceDto::from).collect(),
            page,
            DEFAULT_ITEMS_PER_PAGE,
            total,
        )),
        Err(e) => {
            log::error!("Failed to list services: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Service detail lookup. Records the view before returning; a failed
/// counter update is logged and ignored.
pub fn show_service<R>(service_id: i32, repo: &R) -> ServiceResult<ServiceDetailDto>
where
    R: ServiceReader + ServiceWriter + CategoryReader,
{
    let service_id = match ServiceId::new(service_id) {
        Ok(service_id) => service_id,
        Err(_) => return Err(ServiceError::NotFound),
    };

    let service = match repo.get_service_by_id(service_id) {
        Ok(Some(service)) => service,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get service: {e}");
            return Err(ServiceError::Internal);
        }
    };

    if let Err(e) = repo.increment_views(service.id) {
        log::error!("Failed to increment views for service {}: {e}", service.id);
    }

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

    let sub_services = match repo.list_sub_services(service.id) {
        Ok(sub_services) => sub_services,
        Err(e) => {
            log::error!("Failed to list sub-services: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let description = service.description.clone();
    Ok(ServiceDetailDto {
        service: ServiceDto::from(service),
        description,
        category: CategoryDto::from(category),
        sub_services: sub_services.into_iter().map(SubServiceDto::from).collect(),
    })
}

/// Substring search over active categories.
pub fn search_categories<R>(search: Option<String>, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    let mut query = CategoryListQuery::active();
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }

    match repo.list_categories(query) {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Substring search over active subcategories.
pub fn search_subcategories<R>(
    search: Option<String>,
    repo: &R,
) -> ServiceResult<Vec<SubCategoryDto>>
where
    R: CategoryReader,
{
    let mut query = SubCategoryListQuery::active();
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        query = query.search(search.trim());
    }

    match repo.list_subcategories(query) {
        Ok(subcategories) => Ok(subcategories.into_iter().map(SubCategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list subcategories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Featured/popular highlights for the home surface.
pub fn site_summary<R>(repo: &R) -> ServiceResult<SummaryDto>
where
    R: ServiceReader + CategoryReader + ProviderReader,
{
    let featured_categories = match repo.list_categories(CategoryListQuery::active().featured(true))
    {
        Ok(categories) => categories
            .into_iter()
            .take(SUMMARY_FEATURED_CATEGORIES)
            .map(CategoryDto::from)
            .collect(),
        Err(e) => {
            log::error!("Failed to list featured categories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let featured_services = match repo.list_services(
        ServiceListQuery::active()
            .featured(true)
            .paginate(1, SUMMARY_FEATURED_SERVICES),
    ) {
        Ok((_total, services)) => services.into_iter().map(ServiceDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list featured services: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let popular_services = match repo.list_services(
        ServiceListQuery::active()
            .popular(true)
            .paginate(1, SUMMARY_POPULAR_SERVICES),
    ) {
        Ok((_total, services)) => services.into_iter().map(ServiceDto::from).collect(),
        Err(e) => {
            log::error!("Failed to list popular services: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let featured_providers = match repo.list_providers(
        ProviderListQuery::active()
            .featured(true)
            .paginate(1, SUMMARY_FEATURED_PROVIDERS),
    ) {
        Ok((_total, providers)) => providers
            .into_iter()
            .map(crate::dto::catalog::ProviderDto::from)
            .collect(),
        Err(e) => {
            log::error!("Failed to list featured providers: {e}");
            return Err(ServiceError::Internal);
        }
    };

    Ok(SummaryDto {
        featured_categories,
        featured_services,
        popular_services,
        featured_providers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::{Category, SubCategory};
    use crate::domain::service::Service;
    use crate::domain::types::{
        CategoryId, CategoryName, Rating, ServiceId, ServiceName, Slug, SubCategoryId, ViewCount,
    };
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, NaiveDateTime};

    fn epoch() -> NaiveDateTime {
        DateTime::from_timestamp(0, 0).unwrap().naive_utc()
    }

    fn category(id: i32, slug: &str) -> Category {
        Category {
            id: CategoryId::new(id).unwrap(),
            name: CategoryName::new(slug.to_uppercase()).unwrap(),
            slug: Slug::new(slug).unwrap(),
            description: None,
            whatsapp_number: None,
            is_active: true,
            is_featured: id == 1,
            display_order: id,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn subcategory(id: i32, category_id: i32, slug: &str) -> SubCategory {
        SubCategory {
            id: SubCategoryId::new(id).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
            name: CategoryName::new(slug.to_uppercase()).unwrap(),
            slug: Slug::new(slug).unwrap(),
            description: None,
            is_active: true,
            display_order: id,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    fn service(id: i32, category_id: i32, name: &str) -> Service {
        Service {
            id: ServiceId::new(id).unwrap(),
            category_id: CategoryId::new(category_id).unwrap(),
            subcategory_id: None,
            provider_id: None,
            name: ServiceName::new(name).unwrap(),
            slug: Slug::from_name(name).unwrap(),
            short_description: format!("{name} for homes"),
            description: format!("{name} with full equipment"),
            whatsapp_number: None,
            is_active: true,
            is_featured: false,
            is_popular: false,
            views_count: ViewCount::new(0).unwrap(),
            rating: Rating::new(4.0).unwrap(),
            display_order: id,
            created_at: epoch(),
            updated_at: epoch(),
        }
    }

    #[test]
    fn keyword_and_category_filters_compose() {
        let repo = TestRepository::new(
            vec![category(1, "cleaning"), category(2, "plumbing")],
            vec![
                service(1, 1, "Deep Cleaning"),
                service(2, 1, "Sofa Cleaning"),
                service(3, 2, "Leak Repair"),
            ],
            vec![],
            vec![],
        );

        let result = list_services(
            ServiceListParams {
                keyword: Some("cleaning".to_string()),
                categories: vec!["cleaning".to_string()],
                ..ServiceListParams::default()
            },
            &repo,
        )
        .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.items.len(), 2);
    }

    #[test]
    fn the_all_sentinel_disables_slug_filtering() {
        let repo = TestRepository::new(
            vec![category(1, "cleaning"), category(2, "plumbing")],
            vec![service(1, 1, "Deep Cleaning"), service(2, 2, "Leak Repair")],
            vec![],
            vec![],
        );

        let result = list_services(
            ServiceListParams {
                categories: vec!["all".to_string()],
                ..ServiceListParams::default()
            },
            &repo,
        )
        .unwrap();

        assert_eq!(result.total, 2);
    }

    #[test]
    fn detail_views_bump_the_counter() {
        let repo = TestRepository::new(
            vec![category(1, "cleaning")],
            vec![service(1, 1, "Deep Cleaning")],
            vec![],
            vec![],
        );

        show_service(1, &repo).unwrap();
        let detail = show_service(1, &repo).unwrap();
        assert_eq!(detail.service.views_count, 1);

        let stored = repo
            .get_service_by_id(ServiceId::new(1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored.views_count.get(), 2);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let repo = TestRepository::new(vec![], vec![], vec![], vec![]);
        assert_eq!(show_service(7, &repo).unwrap_err(), ServiceError::NotFound);
        assert_eq!(show_service(-1, &repo).unwrap_err(), ServiceError::NotFound);
    }

    #[test]
    fn subcategory_search_matches_substrings() {
        let repo = TestRepository::new(vec![category(1, "cleaning")], vec![], vec![], vec![])
            .with_subcategories(vec![
                subcategory(1, 1, "carpet-cleaning"),
                subcategory(2, 1, "window-cleaning"),
            ]);

        let found = search_subcategories(Some("carpet".to_string()), &repo).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "carpet-cleaning");
    }
}
