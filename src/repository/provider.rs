use diesel::prelude::*;

use crate::domain::provider::{NewProvider, Provider};
use crate::domain::types::ProviderId;
use crate::models::provider::{NewProvider as DbNewProvider, Provider as DbProvider};
use crate::repository::errors::RepositoryResult;
use crate::repository::{DieselRepository, ProviderListQuery, ProviderReader, ProviderWriter};

impl ProviderReader for DieselRepository {
    fn list_providers(&self, query: ProviderListQuery) -> RepositoryResult<(usize, Vec<Provider>)> {
        use crate::schema::providers;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut q = providers::table.into_boxed::<diesel::sqlite::Sqlite>();
            if query.only_active {
                q = q.filter(providers::is_active.eq(true));
            }
            if let Some(featured) = query.featured {
                q = q.filter(providers::is_featured.eq(featured));
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
                providers::is_featured.desc(),
                providers::rating.desc(),
                providers::created_at.desc(),
            ))
            .load::<DbProvider>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Provider>, _>>()?;

        Ok((total, items))
    }

    fn get_provider_by_id(&self, id: ProviderId) -> RepositoryResult<Option<Provider>> {
        use crate::schema::providers;

        let mut conn = self.conn()?;

        let provider = providers::table
            .filter(providers::id.eq(id.get()))
            .first::<DbProvider>(&mut conn)
            .optional()?;

        let provider = provider.map(TryInto::try_into).transpose()?;
        Ok(provider)
    }
}

impl ProviderWriter for DieselRepository {
    fn create_provider(&self, provider: &NewProvider) -> RepositoryResult<Provider> {
        use crate::schema::providers;

        let mut conn = self.conn()?;
        let db_provider: DbNewProvider = provider.clone().into();

        let created = diesel::insert_into(providers::table)
            .values(db_provider)
            .get_result::<DbProvider>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
