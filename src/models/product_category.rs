use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_categories)]
pub struct NewProductCategory {
    pub product_id: i32,
    pub category_id: i32,
}

impl NewProductCategory {
    /// Association rows linking `product_id` to each of `category_ids`.
    pub fn for_product(product_id: i32, category_ids: &[i32]) -> Vec<Self> {
        category_ids
            .iter()
            .map(|&category_id| Self {
                product_id,
                category_id,
            })
            .collect()
    }
}
