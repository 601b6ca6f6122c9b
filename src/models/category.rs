use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory,
};
use crate::domain::types::{CategoryName, PhoneNumber, Slug, TypeConstraintError};

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub whatsapp_number: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub whatsapp_number: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Category> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from(category: Category) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: CategoryName::new(category.name)?,
            slug: Slug::new(category.slug)?,
            description: category.description,
            whatsapp_number: category
                .whatsapp_number
                .filter(|n| !n.trim().is_empty())
                .map(PhoneNumber::new)
                .transpose()?,
            is_active: category.is_active,
            is_featured: category.is_featured,
            display_order: category.display_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        })
    }
}

impl From<DomainNewCategory> for NewCategory {
    fn from(category: DomainNewCategory) -> Self {
        Self {
            name: category.name.into_inner(),
            slug: category.slug.into_inner(),
            description: category.description,
            whatsapp_number: category.whatsapp_number.map(PhoneNumber::into_inner),
            is_active: category.is_active,
            is_featured: category.is_featured,
            display_order: category.display_order,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

/// Diesel model representing the `subcategories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct SubCategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Insertable form of [`SubCategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubCategory {
    pub category_id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<SubCategory> for DomainSubCategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: SubCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subcategory.id.try_into()?,
            category_id: subcategory.category_id.try_into()?,
            name: CategoryName::new(subcategory.name)?,
            slug: Slug::new(subcategory.slug)?,
            description: subcategory.description,
            is_active: subcategory.is_active,
            display_order: subcategory.display_order,
            created_at: subcategory.created_at,
            updated_at: subcategory.updated_at,
        })
    }
}

impl From<DomainNewSubCategory> for NewSubCategory {
    fn from(subcategory: DomainNewSubCategory) -> Self {
        Self {
            category_id: subcategory.category_id.get(),
            name: subcategory.name.into_inner(),
            slug: subcategory.slug.into_inner(),
            description: subcategory.description,
            is_active: subcategory.is_active,
            display_order: subcategory.display_order,
            created_at: subcategory.created_at,
            updated_at: subcategory.updated_at,
        }
    }
}
