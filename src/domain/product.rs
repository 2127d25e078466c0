use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::Pagination;

/// Audience a product is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Boy,
    Girl,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Men, Gender::Women, Gender::Boy, Gender::Girl];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Boy => "boy",
            Gender::Girl => "girl",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown gender `{0}`")]
pub struct UnknownGender(pub String);

impl FromStr for Gender {
    type Err = UnknownGender;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            "boy" => Ok(Gender::Boy),
            "girl" => Ok(Gender::Girl),
            _ => Err(UnknownGender(value.to_string())),
        }
    }
}

/// Category summary embedded in a listed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
}

/// Brand summary embedded in a listed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRef {
    pub id: i32,
    pub name: String,
}

/// Domain representation of a catalog product with its associations.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown to users.
    pub description: Option<String>,
    /// Selling price, derived from `old_price` and `discount` when written.
    pub price: f64,
    /// Price before the discount is applied.
    pub old_price: f64,
    /// Discount in percent, `0..=100`.
    pub discount: f64,
    /// Optional URL or path of the product image.
    pub image_url: Option<String>,
    /// Target audience. `None` when the stored value is not recognised.
    pub gender: Option<Gender>,
    /// Available colors in display order.
    pub colors: Vec<String>,
    /// Average customer rating, `0..=5`.
    pub rating: f64,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
    /// Categories the product belongs to, ordered by name.
    pub categories: Vec<CategoryRef>,
    /// Brands the product is sold under, ordered by name.
    pub brands: Vec<BrandRef>,
    /// Occasion tags, ordered alphabetically.
    pub occasions: Vec<String>,
}

impl Product {
    /// Label shown for the gender column, tolerating unrecognised values.
    pub fn gender_label(&self) -> &'static str {
        self.gender.as_ref().map(Gender::as_str).unwrap_or("unknown")
    }
}

/// Payload used both to create a product and to replace an existing one.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub old_price: f64,
    pub discount: f64,
    pub image_url: Option<String>,
    pub gender: Gender,
    pub colors: Vec<String>,
    pub rating: f64,
    /// Categories to associate; replaces any existing associations.
    pub category_ids: Vec<i32>,
    /// Brands to associate; replaces any existing associations.
    pub brand_ids: Vec<i32>,
    /// Occasion tags; replaces any existing tags.
    pub occasions: Vec<String>,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a product payload without discount, rating or associations.
    pub fn new(name: impl Into<String>, old_price: f64, gender: Gender) -> Self {
        Self {
            name: name.into(),
            description: None,
            old_price,
            discount: 0.0,
            image_url: None,
            gender,
            colors: Vec::new(),
            rating: 0.0,
            category_ids: Vec::new(),
            brand_ids: Vec::new(),
            occasions: Vec::new(),
            updated_at: Local::now().naive_utc(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_colors(mut self, colors: Vec<String>) -> Self {
        self.colors = colors;
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_category_ids(mut self, category_ids: Vec<i32>) -> Self {
        self.category_ids = category_ids;
        self
    }

    pub fn with_brand_ids(mut self, brand_ids: Vec<i32>) -> Self {
        self.brand_ids = brand_ids;
        self
    }

    pub fn with_occasions(mut self, occasions: Vec<String>) -> Self {
        self.occasions = occasions;
        self
    }

    /// Selling price stored alongside the product: `old_price * (1 - discount / 100)`.
    pub fn price(&self) -> f64 {
        self.old_price * (1.0 - self.discount / 100.0)
    }
}

/// Inclusive numeric bounds applied to a product column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Optional predicates narrowing the catalog. Empty means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    pub category_ids: Vec<i32>,
    pub brand_ids: Vec<i32>,
    pub price: Option<ValueRange>,
    pub discount: Option<ValueRange>,
    pub occasions: Vec<String>,
    pub gender: Option<Gender>,
}

impl ProductFilters {
    pub fn is_empty(&self) -> bool {
        self == &ProductFilters::default()
    }
}

/// Columns a catalog listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    Rating,
    CreatedAt,
    Name,
    Discount,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Price => "price",
            SortField::Rating => "rating",
            SortField::CreatedAt => "created_at",
            SortField::Name => "name",
            SortField::Discount => "discount",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Ordering of a catalog listing. Ties are broken by product id in the same
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for ProductSort {
    fn default() -> Self {
        Self {
            field: SortField::CreatedAt,
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field.as_str(), self.direction.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortParseError {
    #[error("sort must look like `field-direction`, got `{0}`")]
    Malformed(String),
    #[error("cannot sort by `{0}`")]
    UnknownField(String),
    #[error("unknown sort direction `{0}`")]
    UnknownDirection(String),
}

impl FromStr for ProductSort {
    type Err = SortParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        let (field, direction) = value
            .rsplit_once('-')
            .ok_or_else(|| SortParseError::Malformed(value.to_string()))?;

        let field = match field {
            "price" => SortField::Price,
            "rating" => SortField::Rating,
            "created_at" => SortField::CreatedAt,
            "name" => SortField::Name,
            "discount" => SortField::Discount,
            other => return Err(SortParseError::UnknownField(other.to_string())),
        };

        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(SortParseError::UnknownDirection(direction.to_string())),
        };

        Ok(Self { field, direction })
    }
}

/// Query definition used by the catalog listing engine.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub filters: ProductFilters,
    pub sort: ProductSort,
    pub pagination: Pagination,
}

impl ProductListQuery {
    /// Browse the whole catalog, newest first, first page of default size.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filters(mut self, filters: ProductFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Pagination { page, per_page };
        self
    }
}

/// One page of catalog listing results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total_count: usize,
    pub total_pages: usize,
    pub count_on_page: usize,
}
