use serde::Serialize;

use crate::domain::brand::Brand;
use crate::domain::category::Category;
use crate::domain::product::{Gender, Product, ProductListQuery, ProductPage};
use crate::forms::catalog::{filter_query_string, parse_catalog_query};
use crate::forms::products::ProductForm;
use crate::pagination::Paginated;
use crate::repository::{BrandReader, CategoryReader, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Sort choices offered by the products page, as `(value, label)`.
pub const SORT_OPTIONS: [(&str, &str); 10] = [
    ("created_at-desc", "Newest arrivals"),
    ("created_at-asc", "Oldest first"),
    ("price-asc", "Price: low to high"),
    ("price-desc", "Price: high to low"),
    ("rating-desc", "Top rated"),
    ("rating-asc", "Lowest rated"),
    ("discount-desc", "Biggest discount"),
    ("discount-asc", "Smallest discount"),
    ("name-asc", "Name: A to Z"),
    ("name-desc", "Name: Z to A"),
];

/// Runs the catalog listing engine for an already validated query.
pub fn list_catalog<R>(repo: &R, query: ProductListQuery) -> ServiceResult<ProductPage>
where
    R: ProductReader + ?Sized,
{
    let per_page = query.pagination.per_page.max(1);

    let (total_count, items) = repo.list_products(query).map_err(ServiceError::from)?;

    Ok(ProductPage {
        count_on_page: items.len(),
        total_pages: total_count.div_ceil(per_page),
        total_count,
        items,
    })
}

/// Parses a raw query string and runs the listing engine.
pub fn search_catalog<R>(repo: &R, raw_query: &str) -> ServiceResult<(ProductListQuery, ProductPage)>
where
    R: ProductReader + ?Sized,
{
    let query =
        parse_catalog_query(raw_query).map_err(|err| ServiceError::InvalidQuery(err.to_string()))?;

    let page = list_catalog(repo, query.clone())?;

    Ok((query, page))
}

/// Filter selections echoed back to the products page.
#[derive(Debug, Serialize)]
pub struct SelectedFilters {
    pub category_ids: Vec<i32>,
    pub brand_ids: Vec<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_discount: Option<f64>,
    pub max_discount: Option<f64>,
    pub occasions: String,
    pub gender: Option<Gender>,
    pub sort_by: String,
    pub page_size: usize,
}

impl From<&ProductListQuery> for SelectedFilters {
    fn from(query: &ProductListQuery) -> Self {
        let filters = &query.filters;
        Self {
            category_ids: filters.category_ids.clone(),
            brand_ids: filters.brand_ids.clone(),
            min_price: filters.price.map(|range| range.min),
            max_price: filters.price.map(|range| range.max),
            min_discount: filters.discount.map(|range| range.min),
            max_discount: filters.discount.map(|range| range.max),
            occasions: filters.occasions.join(", "),
            gender: filters.gender,
            sort_by: query.sort.to_string(),
            page_size: query.pagination.per_page,
        }
    }
}

/// Data required to render the products index template.
pub struct ProductsPageData {
    pub products: Paginated<Product>,
    pub total_count: usize,
    pub selected: SelectedFilters,
    pub has_active_filters: bool,
    /// Query string carrying the current filters, without the page number.
    pub filter_query: String,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Loads the products overview page for the raw query string of the request.
pub fn load_products_page<R>(repo: &R, raw_query: &str) -> ServiceResult<ProductsPageData>
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    let (query, page) = search_catalog(repo, raw_query)?;

    let categories = repo.list_categories().map_err(ServiceError::from)?;
    let brands = repo.list_brands().map_err(ServiceError::from)?;

    Ok(ProductsPageData {
        products: Paginated::new(page.items, query.pagination.page, page.total_pages),
        total_count: page.total_count,
        selected: SelectedFilters::from(&query),
        has_active_filters: !query.filters.is_empty(),
        filter_query: filter_query_string(&query),
        categories,
        brands,
    })
}

/// Options needed by the add/edit product form.
pub struct ProductFormData {
    pub product: Option<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Loads the pickers for the product form, plus the product when editing.
pub fn load_product_form<R>(repo: &R, product_id: Option<i32>) -> ServiceResult<ProductFormData>
where
    R: ProductReader + CategoryReader + BrandReader + ?Sized,
{
    let product = match product_id {
        Some(id) => Some(get_product(repo, id)?),
        None => None,
    };

    Ok(ProductFormData {
        product,
        categories: repo.list_categories().map_err(ServiceError::from)?,
        brands: repo.list_brands().map_err(ServiceError::from)?,
    })
}

pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Creates a product with its category, brand and occasion associations.
pub fn create_product<R>(repo: &R, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&new_product)
        .map_err(ServiceError::from)
}

/// Replaces a product and all of its associations.
pub fn modify_product<R>(repo: &R, product_id: i32, form: ProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let updates = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

pub fn remove_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id)
        .map_err(ServiceError::from)
}
