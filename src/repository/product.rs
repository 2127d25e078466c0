use std::collections::{HashMap, HashSet};

use diesel::dsl::count_distinct;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::domain::product::{
    BrandRef, CategoryRef, NewProduct as DomainNewProduct, Product as DomainProduct,
    ProductFilters, ProductListQuery, SortDirection, SortField,
};
use crate::models::product::{NewProduct as DbNewProduct, Product as DbProduct};
use crate::models::product_brand::NewProductBrand;
use crate::models::product_category::NewProductCategory;
use crate::models::product_occasion::{NewProductOccasion, ProductOccasion};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ProductReader, ProductWriter};
use crate::schema::{
    brands, categories, product_brands, product_categories, product_occasions, products,
};

/// Products left-joined to their category associations; one row per
/// (product, category) pair, or a single row for uncategorised products.
type CatalogSource = diesel::dsl::LeftJoin<products::table, product_categories::table>;
type BoxedCatalogQuery<'a> = diesel::dsl::IntoBoxed<'a, CatalogSource, Sqlite>;

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;

        let mut products = load_product_details(&mut conn, &[id])?;

        Ok(products.pop())
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_catalog(&query.filters)
            .select(count_distinct(products::id))
            .get_result::<i64>(&mut conn)? as usize;

        if total == 0 {
            return Ok((0, Vec::new()));
        }

        let mut ids_query = filtered_catalog(&query.filters)
            .select(products::id)
            .distinct();

        ids_query = match (query.sort.field, query.sort.direction) {
            (SortField::Price, SortDirection::Asc) => ids_query.order_by(products::price.asc()),
            (SortField::Price, SortDirection::Desc) => ids_query.order_by(products::price.desc()),
            (SortField::Rating, SortDirection::Asc) => ids_query.order_by(products::rating.asc()),
            (SortField::Rating, SortDirection::Desc) => {
                ids_query.order_by(products::rating.desc())
            }
            (SortField::CreatedAt, SortDirection::Asc) => {
                ids_query.order_by(products::created_at.asc())
            }
            (SortField::CreatedAt, SortDirection::Desc) => {
                ids_query.order_by(products::created_at.desc())
            }
            (SortField::Name, SortDirection::Asc) => ids_query.order_by(products::name.asc()),
            (SortField::Name, SortDirection::Desc) => ids_query.order_by(products::name.desc()),
            (SortField::Discount, SortDirection::Asc) => {
                ids_query.order_by(products::discount.asc())
            }
            (SortField::Discount, SortDirection::Desc) => {
                ids_query.order_by(products::discount.desc())
            }
        };

        ids_query = match query.sort.direction {
            SortDirection::Asc => ids_query.then_order_by(products::id.asc()),
            SortDirection::Desc => ids_query.then_order_by(products::id.desc()),
        };

        let pagination = query.pagination;
        let offset = pagination.offset();
        if offset >= total {
            return Ok((total, Vec::new()));
        }

        let ids = ids_query
            .offset(i64::try_from(offset).unwrap_or(i64::MAX))
            .limit(i64::try_from(pagination.per_page).unwrap_or(i64::MAX))
            .load::<i32>(&mut conn)?;

        log::debug!(
            "catalog listing matched {total} products, page {} holds {} ids",
            pagination.page,
            ids.len()
        );

        if ids.is_empty() {
            return Ok((total, Vec::new()));
        }

        let items = load_product_details(&mut conn, &ids)?;

        Ok((total, items))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_references_exist(conn, new_product)?;

            let db_new = DbNewProduct::from(new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            insert_associations(conn, created.id, new_product)?;

            reload_product(conn, created.id)
        })
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainNewProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_references_exist(conn, updates)?;

            let db_updates = DbNewProduct::from(updates);

            let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
                .set(&db_updates)
                .get_result::<DbProduct>(conn)?;

            diesel::delete(
                product_categories::table.filter(product_categories::product_id.eq(updated.id)),
            )
            .execute(conn)?;
            diesel::delete(product_brands::table.filter(product_brands::product_id.eq(updated.id)))
                .execute(conn)?;
            diesel::delete(
                product_occasions::table.filter(product_occasions::product_id.eq(updated.id)),
            )
            .execute(conn)?;

            insert_associations(conn, updated.id, updates)?;

            reload_product(conn, updated.id)
        })
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

/// Base query shared by the count and the id page so both see the same
/// predicate.
fn filtered_catalog(filters: &ProductFilters) -> BoxedCatalogQuery<'static> {
    let mut query = products::table
        .left_join(product_categories::table)
        .into_boxed::<Sqlite>();

    if !filters.category_ids.is_empty() {
        query = query.filter(product_categories::category_id.eq_any(filters.category_ids.clone()));
    }

    if !filters.brand_ids.is_empty() {
        query = query.filter(
            products::id.eq_any(
                product_brands::table
                    .filter(product_brands::brand_id.eq_any(filters.brand_ids.clone()))
                    .select(product_brands::product_id),
            ),
        );
    }

    if let Some(range) = filters.price {
        query = query.filter(products::price.between(range.min, range.max));
    }

    if let Some(range) = filters.discount {
        query = query.filter(products::discount.between(range.min, range.max));
    }

    if !filters.occasions.is_empty() {
        query = query.filter(
            products::id.eq_any(
                product_occasions::table
                    .filter(product_occasions::occasion.eq_any(filters.occasions.clone()))
                    .select(product_occasions::product_id),
            ),
        );
    }

    if let Some(gender) = filters.gender {
        query = query.filter(products::gender.eq(gender.as_str()));
    }

    query
}

/// Fetch full records for `ids`, returned in the order of `ids`. Ids with no
/// matching product are skipped.
fn load_product_details(
    conn: &mut SqliteConnection,
    ids: &[i32],
) -> RepositoryResult<Vec<DomainProduct>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = products::table
        .left_join(product_categories::table.left_join(categories::table))
        .filter(products::id.eq_any(ids))
        .select((
            DbProduct::as_select(),
            categories::id.nullable(),
            categories::name.nullable(),
        ))
        .order_by(categories::name.asc())
        .load::<(DbProduct, Option<i32>, Option<String>)>(conn)?;

    let mut by_id: HashMap<i32, DomainProduct> = HashMap::with_capacity(ids.len());
    for (db_product, category_id, category_name) in rows {
        let product = by_id
            .entry(db_product.id)
            .or_insert_with(|| DomainProduct::from(db_product));

        if let (Some(id), Some(name)) = (category_id, category_name) {
            product.categories.push(CategoryRef { id, name });
        }
    }

    let mut brands = load_brands_for_products(conn, ids)?;
    let mut occasions = load_occasions_for_products(conn, ids)?;

    let items = ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(|mut product| {
            product.brands = brands.remove(&product.id).unwrap_or_default();
            product.occasions = occasions.remove(&product.id).unwrap_or_default();
            product
        })
        .collect();

    Ok(items)
}

fn load_brands_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<BrandRef>>> {
    let rows = product_brands::table
        .inner_join(brands::table)
        .filter(product_brands::product_id.eq_any(product_ids))
        .select((product_brands::product_id, brands::id, brands::name))
        .order(brands::name.asc())
        .load::<(i32, i32, String)>(conn)?;

    let mut map: HashMap<i32, Vec<BrandRef>> = HashMap::new();
    for (product_id, id, name) in rows {
        map.entry(product_id).or_default().push(BrandRef { id, name });
    }

    Ok(map)
}

fn load_occasions_for_products(
    conn: &mut SqliteConnection,
    product_ids: &[i32],
) -> RepositoryResult<HashMap<i32, Vec<String>>> {
    let rows = product_occasions::table
        .filter(product_occasions::product_id.eq_any(product_ids))
        .order(product_occasions::occasion.asc())
        .load::<ProductOccasion>(conn)?;

    let mut map: HashMap<i32, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.product_id).or_default().push(row.occasion);
    }

    Ok(map)
}

fn reload_product(conn: &mut SqliteConnection, product_id: i32) -> RepositoryResult<DomainProduct> {
    load_product_details(conn, &[product_id])?
        .pop()
        .ok_or(RepositoryError::NotFound)
}

fn ensure_references_exist(
    conn: &mut SqliteConnection,
    product: &DomainNewProduct,
) -> RepositoryResult<()> {
    let category_ids = unique(&product.category_ids);
    if !category_ids.is_empty() {
        let found = categories::table
            .filter(categories::id.eq_any(&category_ids))
            .count()
            .get_result::<i64>(conn)? as usize;
        if found != category_ids.len() {
            return Err(RepositoryError::ConstraintViolation(
                "unknown category selected".to_string(),
            ));
        }
    }

    let brand_ids = unique(&product.brand_ids);
    if !brand_ids.is_empty() {
        let found = brands::table
            .filter(brands::id.eq_any(&brand_ids))
            .count()
            .get_result::<i64>(conn)? as usize;
        if found != brand_ids.len() {
            return Err(RepositoryError::ConstraintViolation(
                "unknown brand selected".to_string(),
            ));
        }
    }

    Ok(())
}

fn insert_associations(
    conn: &mut SqliteConnection,
    product_id: i32,
    product: &DomainNewProduct,
) -> RepositoryResult<()> {
    let category_ids = unique(&product.category_ids);
    if !category_ids.is_empty() {
        diesel::insert_into(product_categories::table)
            .values(NewProductCategory::for_product(product_id, &category_ids))
            .execute(conn)?;
    }

    let brand_ids = unique(&product.brand_ids);
    if !brand_ids.is_empty() {
        diesel::insert_into(product_brands::table)
            .values(NewProductBrand::for_product(product_id, &brand_ids))
            .execute(conn)?;
    }

    let occasions = unique(&product.occasions);
    if !occasions.is_empty() {
        diesel::insert_into(product_occasions::table)
            .values(NewProductOccasion::for_product(product_id, &occasions))
            .execute(conn)?;
    }

    Ok(())
}

fn unique<T: Clone + Eq + std::hash::Hash>(values: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|value| seen.insert(*value))
        .cloned()
        .collect()
}
