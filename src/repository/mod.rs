use crate::db::{DbConnection, DbPool};
use crate::domain::brand::{Brand, NewBrand, UpdateBrand};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::product::{NewProduct, Product, ProductListQuery};
use crate::repository::errors::RepositoryResult;

pub mod brand;
pub mod category;
pub mod errors;
pub mod product;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over brand records.
pub trait BrandReader {
    /// All brands ordered by name.
    fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
    fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>>;
}

/// Write operations over brand records.
pub trait BrandWriter {
    fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
    fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
    fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over the category forest.
pub trait CategoryReader {
    /// Every category as a flat, parent-indexed list ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
}

/// Write operations over the category forest.
pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    /// Rejects a parent that is the category itself or one of its descendants.
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Children of the deleted category become roots.
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over products, including the catalog listing engine.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    /// Total number of distinct matching products and the requested page.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over products and their associations.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    /// Replaces the product row and all of its associations.
    fn update_product(&self, product_id: i32, updates: &NewProduct) -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}
