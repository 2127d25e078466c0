use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::category::{NewCategory, UpdateCategory};
use crate::forms::sanitize_inline_text;

/// Maximum length allowed for a category name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Result type returned by the category form helpers.
pub type CategoryFormResult<T> = Result<T, CategoryFormError>;

/// Errors that can occur while processing category forms.
#[derive(Debug, Error)]
pub enum CategoryFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("category name cannot be empty")]
    EmptyName,
    /// Supplied identifier field could not be parsed.
    #[error("invalid {field} `{value}`")]
    InvalidIdentifier { field: &'static str, value: String },
    #[error("a category cannot be its own parent")]
    SelfParent,
}

/// Form payload emitted when submitting the "Add category" form.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    /// Name entered by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// Optional parent category identifier in string form.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl AddCategoryForm {
    /// Validates and sanitizes the payload into a domain `NewCategory`.
    pub fn into_new_category(self) -> CategoryFormResult<NewCategory> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let parent_id = parse_optional_i32(self.parent_id, "parent category")?;

        let mut new_category = NewCategory::new(sanitized_name);
        if let Some(parent_id) = parent_id {
            new_category = new_category.with_parent_id(parent_id);
        }

        Ok(new_category)
    }
}

/// Normalized payload produced by the "Edit category" form.
#[derive(Debug)]
pub struct EditCategoryPayload {
    /// Identifier of the category to update.
    pub category_id: i32,
    /// Replacement values for the category.
    pub update: UpdateCategory,
}

/// Form payload emitted when editing an existing category.
#[derive(Debug, Deserialize, Validate)]
pub struct EditCategoryForm {
    /// Identifier of the category to update.
    #[validate(range(min = 1))]
    pub category_id: i32,
    /// Name submitted by the user.
    #[validate(length(min = 1, max = NAME_MAX_LEN_VALIDATOR))]
    pub name: String,
    /// New parent; blank makes the category a root.
    #[serde(default)]
    pub parent_id: Option<String>,
}

impl EditCategoryForm {
    /// Validates and sanitizes the payload into a domain `UpdateCategory`.
    pub fn into_update_category(self) -> CategoryFormResult<EditCategoryPayload> {
        self.validate()?;

        let EditCategoryForm {
            category_id,
            name,
            parent_id,
        } = self;

        let name = sanitize_inline_text(&name);
        if name.is_empty() {
            return Err(CategoryFormError::EmptyName);
        }

        let parent_id = parse_optional_i32(parent_id, "parent category")?;
        if parent_id == Some(category_id) {
            return Err(CategoryFormError::SelfParent);
        }

        Ok(EditCategoryPayload {
            category_id,
            update: UpdateCategory::new(name, parent_id),
        })
    }
}

fn parse_optional_i32(
    value: Option<String>,
    field: &'static str,
) -> CategoryFormResult<Option<i32>> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                match trimmed.parse::<i32>() {
                    Ok(parsed) if parsed > 0 => Ok(Some(parsed)),
                    Ok(_) => Ok(None),
                    Err(_) => Err(CategoryFormError::InvalidIdentifier {
                        field,
                        value: trimmed.to_string(),
                    }),
                }
            }
        }
    }
}
