use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory, NewSubCategory, SubCategory};
use crate::domain::types::CategoryId;
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, NewSubCategory as DbNewSubCategory,
    SubCategory as DbSubCategory,
};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    CategoryListQuery, CategoryReader, CategoryWriter, DieselRepository, SubCategoryListQuery,
};

impl CategoryReader for DieselRepository {
    fn list_categories(&self, query: CategoryListQuery) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let mut items = categories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if query.only_active {
            items = items.filter(categories::is_active.eq(true));
        }
        if let Some(featured) = query.featured {
            items = items.filter(categories::is_featured.eq(featured));
        }
        if let Some(search) = &query.search {
            items = items.filter(categories::name.like(format!("%{search}%")));
        }

        let items = items
            .order((categories::display_order.asc(), categories::name.asc()))
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<Vec<SubCategory>> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;

        let mut items = subcategories::table.into_boxed::<diesel::sqlite::Sqlite>();
        if query.only_active {
            items = items.filter(subcategories::is_active.eq(true));
        }
        if let Some(category_id) = query.category_id {
            items = items.filter(subcategories::category_id.eq(category_id.get()));
        }
        if let Some(search) = &query.search {
            items = items.filter(subcategories::name.like(format!("%{search}%")));
        }

        let items = items
            .order((subcategories::display_order.asc(), subcategories::name.asc()))
            .load::<DbSubCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SubCategory>, _>>()?;

        Ok(items)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let created = diesel::insert_into(categories::table)
            .values(db_category)
            .get_result::<DbCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory> {
        use crate::schema::subcategories;

        let mut conn = self.conn()?;
        let db_subcategory: DbNewSubCategory = subcategory.clone().into();

        let created = diesel::insert_into(subcategories::table)
            .values(db_subcategory)
            .get_result::<DbSubCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
