use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Associations)]
#[diesel(
    table_name = crate::schema::product_occasions,
    belongs_to(super::product::Product, foreign_key = product_id)
)]
pub struct ProductOccasion {
    pub product_id: i32,
    pub occasion: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_occasions)]
pub struct NewProductOccasion<'a> {
    pub product_id: i32,
    pub occasion: &'a str,
}

impl<'a> NewProductOccasion<'a> {
    /// Tag rows for `product_id`, one per occasion.
    pub fn for_product(product_id: i32, occasions: &'a [String]) -> Vec<Self> {
        occasions
            .iter()
            .map(|occasion| Self {
                product_id,
                occasion: occasion.as_str(),
            })
            .collect()
    }
}
