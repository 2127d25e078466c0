pub mod brand;
pub mod category;
pub mod product;
pub mod product_brand;
pub mod product_category;
pub mod product_occasion;
