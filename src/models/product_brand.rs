use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_brands)]
pub struct NewProductBrand {
    pub product_id: i32,
    pub brand_id: i32,
}

impl NewProductBrand {
    /// Association rows linking `product_id` to each of `brand_ids`.
    pub fn for_product(product_id: i32, brand_ids: &[i32]) -> Vec<Self> {
        brand_ids
            .iter()
            .map(|&brand_id| Self {
                product_id,
                brand_id,
            })
            .collect()
    }
}
