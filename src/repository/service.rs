use diesel::prelude::*;

use crate::domain::service::{NewService, NewSubService, Service, SubService};
use crate::domain::types::ServiceId;
use crate::models::service::{
    NewService as DbNewService, NewSubService as DbNewSubService, Service as DbService,
    SubService as DbSubService,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ServiceListQuery, ServiceReader, ServiceWriter};

impl ServiceReader for DieselRepository {
    fn list_services(&self, query: ServiceListQuery) -> RepositoryResult<(usize, Vec<Service>)> {
        use crate::schema::{categories, services, subcategories};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut q = services::table.into_boxed::<diesel::sqlite::Sqlite>();
            if query.only_active {
                q = q.filter(services::is_active.eq(true));
            }
            if let Some(keyword) = &query.keyword {
                let pattern = format!("%{keyword}%");
                q = q.filter(
                    services::name
                        .like(pattern.clone())
                        .or(services::short_description.like(pattern.clone()))
                        .or(services::description.like(pattern)),
                );
            }
            if !query.category_slugs.is_empty() {
                q = q.filter(
                    services::category_id.eq_any(
                        categories::table
                            .filter(categories::slug.eq_any(query.category_slugs.clone()))
                            .select(categories::id),
                    ),
                );
            }
            if !query.subcategory_slugs.is_empty() {
                q = q.filter(
                    services::subcategory_id.eq_any(
                        subcategories::table
                            .filter(subcategories::slug.eq_any(query.subcategory_slugs.clone()))
                            .select(subcategories::id.nullable()),
                    ),
                );
            }
            if let Some(featured) = query.featured {
                q = q.filter(services::is_featured.eq(featured));
            }
            if let Some(popular) = query.popular {
                q = q.filter(services::is_popular.eq(popular));
            }
            q
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let offset = ((pagination.page.max(1) - 1) * pagination.per_page) as i64;
            let limit = pagination.per_page as i64;
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((
                services::is_featured.desc(),
                services::display_order.asc(),
                services::created_at.desc(),
            ))
            .load::<DbService>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Service>, _>>()?;

        Ok((total, items))
    }

    fn get_service_by_id(&self, id: ServiceId) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let service = services::table
            .filter(services::id.eq(id.get()))
            .first::<DbService>(&mut conn)
            .optional()?;

        let service = service.map(TryInto::try_into).transpose()?;
        Ok(service)
    }

    fn get_service_by_slug(&self, slug: &str) -> RepositoryResult<Option<Service>> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        let service = services::table
            .filter(services::slug.eq(slug))
            .first::<DbService>(&mut conn)
            .optional()?;

        let service = service.map(TryInto::try_into).transpose()?;
        Ok(service)
    }

    fn list_sub_services(&self, service_id: ServiceId) -> RepositoryResult<Vec<SubService>> {
        use crate::schema::sub_services;

        let mut conn = self.conn()?;

        let items = sub_services::table
            .filter(sub_services::service_id.eq(service_id.get()))
            .filter(sub_services::is_active.eq(true))
            .order(sub_services::display_order.asc())
            .load::<DbSubService>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubService>, _>>()?;

        Ok(items)
    }
}

impl ServiceWriter for DieselRepository {
    fn create_service(&self, service: &NewService) -> RepositoryResult<Service> {
        use crate::schema::services;

        let mut conn = self.conn()?;
        let db_service: DbNewService = service.clone().into();

        let created = diesel::insert_into(services::table)
            .values(db_service)
            .get_result::<DbService>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn create_sub_service(&self, sub_service: &NewSubService) -> RepositoryResult<SubService> {
        use crate::schema::sub_services;

        let mut conn = self.conn()?;
        let db_sub_service: DbNewSubService = sub_service.clone().into();

        let created = diesel::insert_into(sub_services::table)
            .values(db_sub_service)
            .get_result::<DbSubService>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn increment_views(&self, id: ServiceId) -> RepositoryResult<usize> {
        use crate::schema::services;

        let mut conn = self.conn()?;

        // Single UPDATE so concurrent detail views cannot lose increments.
        let affected = diesel::update(services::table.filter(services::id.eq(id.get())))
            .set(services::views_count.eq(services::views_count + 1))
            .execute(&mut conn)?;

        Ok(affected)
    }
}
