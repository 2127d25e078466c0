use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{Gender, NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub old_price: f64,
    pub discount: f64,
    pub image_url: Option<String>,
    pub gender: String,
    pub colors: String,
    pub rating: f64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Column values written on insert and on full-record update.
#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
#[diesel(treat_none_as_null = true)]
pub struct NewProduct<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub old_price: f64,
    pub discount: f64,
    pub image_url: Option<&'a str>,
    pub gender: &'a str,
    pub colors: String,
    pub rating: f64,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        let gender = match value.gender.parse::<Gender>() {
            Ok(gender) => Some(gender),
            Err(err) => {
                log::warn!("Product {} has {err}; listing it as unknown", value.id);
                None
            }
        };

        Self {
            id: value.id,
            name: value.name,
            description: value.description,
            price: value.price,
            old_price: value.old_price,
            discount: value.discount,
            image_url: value.image_url,
            gender,
            colors: split_colors(&value.colors),
            rating: value.rating,
            created_at: value.created_at,
            updated_at: value.updated_at,
            categories: Vec::new(),
            brands: Vec::new(),
            occasions: Vec::new(),
        }
    }
}

impl<'a> From<&'a DomainNewProduct> for NewProduct<'a> {
    fn from(value: &'a DomainNewProduct) -> Self {
        Self {
            name: value.name.as_str(),
            description: value.description.as_deref(),
            price: value.price(),
            old_price: value.old_price,
            discount: value.discount,
            image_url: value.image_url.as_deref(),
            gender: value.gender.as_str(),
            colors: value.colors.join(","),
            rating: value.rating,
            updated_at: value.updated_at,
        }
    }
}

fn split_colors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .map(str::to_string)
        .collect()
}
