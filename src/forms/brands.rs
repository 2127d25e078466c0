use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::brand::{NewBrand, UpdateBrand};
use crate::forms::{non_empty, sanitize_inline_text};

/// Maximum length allowed for a brand name.
const NAME_MAX_LEN: u64 = 128;

/// Maximum length allowed for a brand website.
const WEBSITE_MAX_LEN: u64 = 2048;

pub type BrandFormResult<T> = Result<T, BrandFormError>;

#[derive(Debug, Error)]
pub enum BrandFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("brand name is required")]
    EmptyName,
}

/// Form payload emitted when submitting the "Add brand" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddBrandForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = WEBSITE_MAX_LEN))]
    #[serde(default)]
    pub website: Option<String>,
}

impl AddBrandForm {
    /// Validates and sanitizes the payload into a domain `NewBrand`.
    pub fn into_new_brand(self) -> BrandFormResult<NewBrand> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BrandFormError::EmptyName);
        }

        let mut new_brand = NewBrand::new(name);
        if let Some(website) = normalize_website(self.website.as_deref()) {
            new_brand = new_brand.with_website(website);
        }

        Ok(new_brand)
    }
}

/// Normalized payload produced by the "Edit brand" form.
#[derive(Debug)]
pub struct EditBrandPayload {
    pub brand_id: i32,
    pub update: UpdateBrand,
}

/// Form payload emitted when editing an existing brand.
#[derive(Debug, Deserialize, Validate)]
pub struct EditBrandForm {
    #[validate(range(min = 1))]
    pub brand_id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    #[validate(length(max = WEBSITE_MAX_LEN))]
    #[serde(default)]
    pub website: Option<String>,
}

impl EditBrandForm {
    pub fn into_update_brand(self) -> BrandFormResult<EditBrandPayload> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(BrandFormError::EmptyName);
        }

        Ok(EditBrandPayload {
            brand_id: self.brand_id,
            update: UpdateBrand::new(name, normalize_website(self.website.as_deref())),
        })
    }
}

/// Blank websites are dropped; anything without an http(s) scheme gets
/// `http://` prepended.
fn normalize_website(value: Option<&str>) -> Option<String> {
    let website = non_empty(value)?.replace(' ', "");
    if website.starts_with("http://") || website.starts_with("https://") {
        Some(website)
    } else {
        Some(format!("http://{website}"))
    }
}
