use std::collections::HashSet;

use chrono::Local;
use diesel::dsl::{exists, select};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::{
    Category as DomainCategory, NewCategory as DomainNewCategory,
    UpdateCategory as DomainUpdateCategory,
};
use crate::models::category::{
    Category as DbCategory, NewCategory as DbNewCategory, UpdateCategory as DbUpdateCategory,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let categories = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?;

        Ok(categories.into_iter().map(DomainCategory::from).collect())
    }

    fn get_category_by_id(&self, category_id: i32) -> RepositoryResult<Option<DomainCategory>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(category_id))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        Ok(category.map(DomainCategory::from))
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(
        &self,
        new_category: &DomainNewCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            if let Some(parent_id) = new_category.parent_id {
                ensure_parent_exists(conn, parent_id)?;
            }

            let insertable = DbNewCategory::from(new_category);

            let created = diesel::insert_into(categories::table)
                .values(&insertable)
                .get_result::<DbCategory>(conn)?;

            Ok(created.into())
        })
    }

    fn update_category(
        &self,
        category_id: i32,
        updates: &DomainUpdateCategory,
    ) -> RepositoryResult<DomainCategory> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<DomainCategory, RepositoryError, _>(|conn| {
            ensure_category_exists(conn, category_id)?;

            if let Some(parent_id) = updates.parent_id {
                ensure_parent_exists(conn, parent_id)?;
                ensure_not_descendant(conn, category_id, parent_id)?;
            }

            let db_updates = DbUpdateCategory::from(updates);

            let updated = diesel::update(categories::table.filter(categories::id.eq(category_id)))
                .set(&db_updates)
                .get_result::<DbCategory>(conn)?;

            Ok(updated.into())
        })
    }

    fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        conn.transaction::<(), RepositoryError, _>(|conn| {
            let now = Local::now().naive_utc();

            diesel::update(categories::table.filter(categories::parent_id.eq(Some(category_id))))
                .set((
                    categories::parent_id.eq::<Option<i32>>(None),
                    categories::updated_at.eq(now),
                ))
                .execute(conn)?;

            let deleted = diesel::delete(categories::table.filter(categories::id.eq(category_id)))
                .execute(conn)?;

            if deleted == 0 {
                return Err(RepositoryError::NotFound);
            }

            Ok(())
        })
    }
}

fn ensure_category_exists(conn: &mut SqliteConnection, category_id: i32) -> RepositoryResult<()> {
    use crate::schema::categories;

    let exists = select(exists(
        categories::table.filter(categories::id.eq(category_id)),
    ))
    .get_result(conn)?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::NotFound)
    }
}

fn ensure_parent_exists(conn: &mut SqliteConnection, parent_id: i32) -> RepositoryResult<()> {
    match ensure_category_exists(conn, parent_id) {
        Err(RepositoryError::NotFound) => Err(RepositoryError::ConstraintViolation(format!(
            "parent category {parent_id} does not exist"
        ))),
        other => other,
    }
}

/// Walk up from `parent_id` and fail if `category_id` is one of its ancestors
/// (or the parent itself).
fn ensure_not_descendant(
    conn: &mut SqliteConnection,
    category_id: i32,
    parent_id: i32,
) -> RepositoryResult<()> {
    use crate::schema::categories;

    let mut visited = HashSet::new();
    let mut current = Some(parent_id);

    while let Some(id) = current {
        if id == category_id {
            return Err(RepositoryError::ConstraintViolation(
                "a category cannot be nested under itself or its descendants".to_string(),
            ));
        }
        // Stored data is already cyclic; stop rather than loop forever.
        if !visited.insert(id) {
            break;
        }

        current = categories::table
            .filter(categories::id.eq(id))
            .select(categories::parent_id)
            .first::<Option<i32>>(conn)
            .optional()?
            .flatten();
    }

    Ok(())
}
