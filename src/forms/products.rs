use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{Gender, NewProduct};
use crate::forms::{non_empty, sanitize_inline_text, sanitize_multiline_text, split_list};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: u64 = 4096;

/// Maximum allowed length for an image URL or path.
const IMAGE_URL_MAX_LEN: u64 = 2048;

const MAX_DISCOUNT: f64 = 100.0;
const MAX_RATING: f64 = 5.0;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    #[error("{field} must be a number, got `{value}`")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },
    #[error("gender must be one of men, women, boy, girl")]
    InvalidGender,
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
}

/// Form payload submitted by the add and edit product pages.
#[derive(Debug, Deserialize, Validate)]
pub struct ProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = DESCRIPTION_MAX_LEN))]
    #[serde(default)]
    pub description: Option<String>,
    /// Price before discount, as typed.
    pub old_price: String,
    /// Discount in percent; blank means no discount.
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    pub gender: String,
    /// Comma-separated color names.
    #[serde(default)]
    pub colors: Option<String>,
    #[validate(length(max = IMAGE_URL_MAX_LEN))]
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<String>,
    #[serde(default)]
    pub brand_ids: Vec<String>,
    /// Occasion tags; each entry may itself hold comma-separated tags.
    #[serde(default)]
    pub occasions: Vec<String>,
}

impl ProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let old_price = parse_number(&self.old_price, "old price")?;
        if old_price < 0.0 {
            return Err(ProductFormError::OutOfRange {
                field: "old price",
                min: 0.0,
                max: f64::MAX,
            });
        }

        let discount = parse_optional_number(self.discount.as_deref(), "discount")?.unwrap_or(0.0);
        ensure_range(discount, "discount", 0.0, MAX_DISCOUNT)?;

        let rating = parse_optional_number(self.rating.as_deref(), "rating")?.unwrap_or(0.0);
        ensure_range(rating, "rating", 0.0, MAX_RATING)?;

        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|_| ProductFormError::InvalidGender)?;

        let colors = self
            .colors
            .as_deref()
            .map(|raw| {
                dedup(
                    split_list(raw)
                        .map(sanitize_inline_text)
                        .filter(|color| !color.is_empty()),
                )
            })
            .unwrap_or_default();

        let occasions = dedup(
            self.occasions
                .iter()
                .flat_map(|raw| split_list(raw))
                .map(|tag| sanitize_inline_text(tag).to_lowercase())
                .filter(|tag| !tag.is_empty()),
        );

        let category_ids = parse_ids(&self.category_ids, "category")?;
        let brand_ids = parse_ids(&self.brand_ids, "brand")?;

        let mut new_product = NewProduct::new(name, old_price, gender)
            .with_discount(discount)
            .with_rating(rating)
            .with_colors(colors)
            .with_occasions(occasions)
            .with_category_ids(category_ids)
            .with_brand_ids(brand_ids);

        let description = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty());
        if let Some(description) = description {
            new_product = new_product.with_description(description);
        }

        if let Some(image_url) = non_empty(self.image_url.as_deref()) {
            new_product = new_product.with_image_url(image_url);
        }

        Ok(new_product)
    }
}

fn parse_number(raw: &str, field: &'static str) -> ProductFormResult<f64> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProductFormError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        }),
    }
}

fn parse_optional_number(raw: Option<&str>, field: &'static str) -> ProductFormResult<Option<f64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_number(value, field).map(Some),
    }
}

fn ensure_range(value: f64, field: &'static str, min: f64, max: f64) -> ProductFormResult<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ProductFormError::OutOfRange { field, min, max })
    }
}

fn parse_ids(raw: &[String], field: &'static str) -> ProductFormResult<Vec<i32>> {
    let mut ids = Vec::new();
    for value in raw.iter().flat_map(|value| split_list(value)) {
        match value.parse::<i32>() {
            Ok(id) if id > 0 => ids.push(id),
            _ => {
                return Err(ProductFormError::InvalidIdentifier {
                    field,
                    value: value.to_string(),
                });
            }
        }
    }
    Ok(dedup(ids))
}

fn dedup<T, I>(values: I) -> Vec<T>
where
    T: Clone + Eq + std::hash::Hash,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
