use mockall::mock;

use super::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, ProductReader, ProductWriter,
};
use crate::domain::{
    brand::{Brand, NewBrand, UpdateBrand},
    category::{Category, NewCategory, UpdateCategory},
    product::{NewProduct, Product, ProductListQuery},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub BrandReader {}

    impl BrandReader for BrandReader {
        fn list_brands(&self) -> RepositoryResult<Vec<Brand>>;
        fn get_brand_by_id(&self, id: i32) -> RepositoryResult<Option<Brand>>;
    }
}

mock! {
    pub BrandWriter {}

    impl BrandWriter for BrandWriter {
        fn create_brand(&self, new_brand: &NewBrand) -> RepositoryResult<Brand>;
        fn update_brand(&self, brand_id: i32, updates: &UpdateBrand) -> RepositoryResult<Brand>;
        fn delete_brand(&self, brand_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CategoryReader {}

    impl CategoryReader for CategoryReader {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    }
}

mock! {
    pub CategoryWriter {}

    impl CategoryWriter for CategoryWriter {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
        fn update_category(&self, category_id: i32, updates: &UpdateCategory) -> RepositoryResult<Category>;
        fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &NewProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}
