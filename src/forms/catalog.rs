use serde::Deserialize;
use thiserror::Error;

use crate::domain::product::{
    Gender, ProductFilters, ProductListQuery, ProductSort, SortParseError, ValueRange,
};
use crate::forms::split_list;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, MAX_ITEMS_PER_PAGE, Pagination};

pub type CatalogQueryResult<T> = Result<T, CatalogQueryError>;

/// Reasons a catalog listing request is rejected before querying.
#[derive(Debug, Error)]
pub enum CatalogQueryError {
    #[error("malformed query string: {0}")]
    Malformed(#[from] serde::de::value::Error),
    #[error("{param} must be a number, got `{value}`")]
    InvalidNumber { param: &'static str, value: String },
    #[error("invalid {param} `{value}`")]
    InvalidIdentifier { param: &'static str, value: String },
    #[error("page must be a positive integer, got `{0}`")]
    InvalidPage(String),
    #[error("pageSize must be between 1 and 50, got `{0}`")]
    InvalidPageSize(String),
    #[error("{min_param} and {max_param} must be given together")]
    IncompleteRange {
        min_param: &'static str,
        max_param: &'static str,
    },
    #[error("{min_param} must not exceed {max_param}")]
    InvertedRange {
        min_param: &'static str,
        max_param: &'static str,
    },
    #[error("unknown gender `{0}`")]
    InvalidGender(String),
    #[error(transparent)]
    InvalidSort(#[from] SortParseError),
}

/// Raw listing parameters as they appear in the query string. Multi-valued
/// parameters accept repeated keys, comma-separated values, or both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQueryParams {
    #[serde(default)]
    pub category_id: Vec<String>,
    #[serde(default)]
    pub brand_id: Vec<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_discount: Option<String>,
    pub max_discount: Option<String>,
    #[serde(default)]
    pub occasion: Vec<String>,
    pub gender: Option<String>,
    pub sort_by: Option<String>,
    /// 1-based; any value up to `usize::MAX` is accepted and pages past the
    /// end of the listing come back empty.
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl CatalogQueryParams {
    pub fn from_query_string(raw: &str) -> CatalogQueryResult<Self> {
        Ok(serde_html_form::from_str(raw)?)
    }

    /// Validate the parameters and build the engine query.
    pub fn into_list_query(self) -> CatalogQueryResult<ProductListQuery> {
        let category_ids = parse_ids(&self.category_id, "categoryId")?;
        let brand_ids = parse_ids(&self.brand_id, "brandId")?;

        let price = parse_range(
            self.min_price.as_deref(),
            self.max_price.as_deref(),
            "minPrice",
            "maxPrice",
        )?;
        let discount = parse_range(
            self.min_discount.as_deref(),
            self.max_discount.as_deref(),
            "minDiscount",
            "maxDiscount",
        )?;

        let mut occasions: Vec<String> = Vec::new();
        for tag in self.occasion.iter().flat_map(|raw| split_list(raw)) {
            let tag = tag.to_lowercase();
            if !occasions.contains(&tag) {
                occasions.push(tag);
            }
        }

        let gender = match present(self.gender.as_deref()) {
            Some(raw) => Some(
                raw.parse::<Gender>()
                    .map_err(|_| CatalogQueryError::InvalidGender(raw.to_string()))?,
            ),
            None => None,
        };

        let sort = match present(self.sort_by.as_deref()) {
            Some(raw) => raw.parse::<ProductSort>()?,
            None => ProductSort::default(),
        };

        let page = match present(self.page.as_deref()) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(page) if page >= 1 => page,
                _ => return Err(CatalogQueryError::InvalidPage(raw.to_string())),
            },
            None => 1,
        };

        let per_page = match present(self.page_size.as_deref()) {
            Some(raw) => match raw.parse::<usize>() {
                Ok(size) if (1..=MAX_ITEMS_PER_PAGE).contains(&size) => size,
                _ => return Err(CatalogQueryError::InvalidPageSize(raw.to_string())),
            },
            None => DEFAULT_ITEMS_PER_PAGE,
        };

        let filters = ProductFilters {
            category_ids,
            brand_ids,
            price,
            discount,
            occasions,
            gender,
        };

        Ok(ProductListQuery::new()
            .filters(filters)
            .sort(sort)
            .paginate(page, per_page))
    }
}

/// Parse and validate a raw listing query string.
pub fn parse_catalog_query(raw: &str) -> CatalogQueryResult<ProductListQuery> {
    CatalogQueryParams::from_query_string(raw)?.into_list_query()
}

/// Query string reproducing `query`'s filters, sort and page size without the
/// page number, for building pagination links.
pub fn filter_query_string(query: &ProductListQuery) -> String {
    let filters = &query.filters;
    let mut pairs: Vec<(&str, String)> = Vec::new();

    for id in &filters.category_ids {
        pairs.push(("categoryId", id.to_string()));
    }
    for id in &filters.brand_ids {
        pairs.push(("brandId", id.to_string()));
    }
    if let Some(range) = filters.price {
        pairs.push(("minPrice", range.min.to_string()));
        pairs.push(("maxPrice", range.max.to_string()));
    }
    if let Some(range) = filters.discount {
        pairs.push(("minDiscount", range.min.to_string()));
        pairs.push(("maxDiscount", range.max.to_string()));
    }
    for tag in &filters.occasions {
        pairs.push(("occasion", tag.clone()));
    }
    if let Some(gender) = filters.gender {
        pairs.push(("gender", gender.as_str().to_string()));
    }
    if query.sort != ProductSort::default() {
        pairs.push(("sortBy", query.sort.to_string()));
    }
    if query.pagination.per_page != Pagination::default().per_page {
        pairs.push(("pageSize", query.pagination.per_page.to_string()));
    }

    serde_html_form::to_string(&pairs).unwrap_or_default()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_ids(raw: &[String], param: &'static str) -> CatalogQueryResult<Vec<i32>> {
    let mut ids = Vec::new();
    for value in raw.iter().flat_map(|value| split_list(value)) {
        let id = value
            .parse::<i32>()
            .map_err(|_| CatalogQueryError::InvalidIdentifier {
                param,
                value: value.to_string(),
            })?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

fn parse_number(raw: &str, param: &'static str) -> CatalogQueryResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CatalogQueryError::InvalidNumber {
            param,
            value: raw.to_string(),
        }),
    }
}

fn parse_range(
    min: Option<&str>,
    max: Option<&str>,
    min_param: &'static str,
    max_param: &'static str,
) -> CatalogQueryResult<Option<ValueRange>> {
    match (present(min), present(max)) {
        (None, None) => Ok(None),
        (Some(min), Some(max)) => {
            let min = parse_number(min, min_param)?;
            let max = parse_number(max, max_param)?;
            if min > max {
                return Err(CatalogQueryError::InvertedRange {
                    min_param,
                    max_param,
                });
            }
            Ok(Some(ValueRange::new(min, max)))
        }
        _ => Err(CatalogQueryError::IncompleteRange {
            min_param,
            max_param,
        }),
    }
}
