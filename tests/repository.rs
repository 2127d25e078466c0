use catalog_admin::domain::brand::{NewBrand, UpdateBrand};
use catalog_admin::domain::category::{NewCategory, UpdateCategory};
use catalog_admin::domain::product::{
    Gender, NewProduct, ProductFilters, ProductListQuery, ProductSort, SortDirection, SortField,
    ValueRange,
};
use catalog_admin::repository::errors::RepositoryError;
use catalog_admin::repository::{
    BrandReader, BrandWriter, CategoryReader, CategoryWriter, DieselRepository, ProductReader,
    ProductWriter,
};
use diesel::RunQueryDsl;

mod common;

fn by_name(direction: SortDirection) -> ProductSort {
    ProductSort {
        field: SortField::Name,
        direction,
    }
}

/// Twelve products named `Product 01`..`Product 12`, the first three in `category_id`.
fn seed_twelve(repo: &DieselRepository, category_id: i32) -> Vec<i32> {
    (1..=12)
        .map(|n| {
            let mut product = NewProduct::new(format!("Product {n:02}"), 10.0 * n as f64, Gender::Women);
            if n <= 3 {
                product = product.with_category_ids(vec![category_id]);
            }
            repo.create_product(&product).expect("create product").id
        })
        .collect()
}

#[test]
fn test_brand_repository_crud() {
    let test_db = common::TestDb::new("test_brand_repository_crud.db");
    let repo = DieselRepository::new(test_db.pool());

    let zara = repo
        .create_brand(&NewBrand::new("Zara").with_website("https://zara.com"))
        .unwrap();
    let acne = repo.create_brand(&NewBrand::new("Acne")).unwrap();

    let names: Vec<String> = repo
        .list_brands()
        .unwrap()
        .into_iter()
        .map(|brand| brand.name)
        .collect();
    assert_eq!(names, vec!["Acne", "Zara"]);

    let err = repo
        .create_brand(&NewBrand::new("Zara"))
        .expect_err("expected duplicate name to fail");
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let updated = repo
        .update_brand(zara.id, &UpdateBrand::new("Zara Home".to_string(), None))
        .unwrap();
    assert_eq!(updated.name, "Zara Home");
    assert!(updated.website.is_none());

    repo.delete_brand(acne.id).unwrap();
    assert!(repo.get_brand_by_id(acne.id).unwrap().is_none());

    let err = repo
        .delete_brand(acne.id)
        .expect_err("expected second delete to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_category_repository_rejects_cycles() {
    let test_db = common::TestDb::new("test_category_repository_rejects_cycles.db");
    let repo = DieselRepository::new(test_db.pool());

    let clothing = repo.create_category(&NewCategory::new("Clothing")).unwrap();
    let outerwear = repo
        .create_category(&NewCategory::new("Outerwear").with_parent_id(clothing.id))
        .unwrap();
    let coats = repo
        .create_category(&NewCategory::new("Coats").with_parent_id(outerwear.id))
        .unwrap();

    let err = repo
        .update_category(
            clothing.id,
            &UpdateCategory::new("Clothing".to_string(), Some(coats.id)),
        )
        .expect_err("expected nesting under a descendant to fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    let err = repo
        .update_category(
            outerwear.id,
            &UpdateCategory::new("Outerwear".to_string(), Some(outerwear.id)),
        )
        .expect_err("expected self-parenting to fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    let err = repo
        .create_category(&NewCategory::new("Orphans").with_parent_id(9_999))
        .expect_err("expected missing parent to fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    let moved = repo
        .update_category(coats.id, &UpdateCategory::new("Coats".to_string(), None))
        .unwrap();
    assert!(moved.parent_id.is_none());
}

#[test]
fn test_category_delete_promotes_children_to_roots() {
    let test_db = common::TestDb::new("test_category_delete_promotes_children.db");
    let repo = DieselRepository::new(test_db.pool());

    let clothing = repo.create_category(&NewCategory::new("Clothing")).unwrap();
    let dresses = repo
        .create_category(&NewCategory::new("Dresses").with_parent_id(clothing.id))
        .unwrap();
    let product = repo
        .create_product(
            &NewProduct::new("Slip Dress", 80.0, Gender::Women)
                .with_category_ids(vec![clothing.id, dresses.id]),
        )
        .unwrap();

    repo.delete_category(clothing.id).unwrap();

    let dresses = repo.get_category_by_id(dresses.id).unwrap().unwrap();
    assert!(dresses.parent_id.is_none());
    assert_eq!(repo.list_categories().unwrap().len(), 1);

    let product = repo.get_product_by_id(product.id).unwrap().unwrap();
    let category_names: Vec<&str> = product.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(category_names, vec!["Dresses"]);

    assert!(matches!(
        repo.delete_category(clothing.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_product_round_trip_with_associations() {
    let test_db = common::TestDb::new("test_product_round_trip.db");
    let repo = DieselRepository::new(test_db.pool());

    let dresses = repo.create_category(&NewCategory::new("Dresses")).unwrap();
    let summer = repo.create_category(&NewCategory::new("Summer")).unwrap();
    let brand = repo.create_brand(&NewBrand::new("Acne")).unwrap();

    let created = repo
        .create_product(
            &NewProduct::new("Linen Dress", 120.0, Gender::Women)
                .with_discount(25.0)
                .with_description("Light and airy")
                .with_colors(vec!["white".to_string(), "sand".to_string()])
                .with_rating(4.5)
                .with_category_ids(vec![summer.id, dresses.id, summer.id])
                .with_brand_ids(vec![brand.id])
                .with_occasions(vec!["beach".to_string(), "party".to_string()]),
        )
        .unwrap();

    assert!((created.price - 90.0).abs() < 1e-9);
    assert_eq!(created.gender, Some(Gender::Women));
    assert_eq!(created.colors, vec!["white", "sand"]);
    let category_ids: Vec<i32> = created.categories.iter().map(|c| c.id).collect();
    assert_eq!(category_ids, vec![dresses.id, summer.id]);
    assert_eq!(created.brands.len(), 1);
    assert_eq!(created.occasions, vec!["beach", "party"]);

    let updated = repo
        .update_product(
            created.id,
            &NewProduct::new("Linen Dress", 100.0, Gender::Women).with_category_ids(vec![dresses.id]),
        )
        .unwrap();
    assert!((updated.price - 100.0).abs() < 1e-9);
    assert_eq!(updated.categories.len(), 1);
    assert!(updated.brands.is_empty());
    assert!(updated.occasions.is_empty());

    let err = repo
        .update_product(
            created.id,
            &NewProduct::new("Linen Dress", 100.0, Gender::Women).with_brand_ids(vec![404]),
        )
        .expect_err("expected unknown brand to fail");
    assert!(matches!(err, RepositoryError::ConstraintViolation(_)));

    let err = repo
        .update_product(9_999, &NewProduct::new("Ghost", 1.0, Gender::Men))
        .expect_err("expected missing product to fail");
    assert!(matches!(err, RepositoryError::NotFound));
}

#[test]
fn test_product_delete_cascades_associations() {
    let test_db = common::TestDb::new("test_product_delete_cascades.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo.create_category(&NewCategory::new("Bags")).unwrap();
    let product = repo
        .create_product(
            &NewProduct::new("Tote", 60.0, Gender::Women)
                .with_category_ids(vec![category.id])
                .with_occasions(vec!["work".to_string()]),
        )
        .unwrap();

    repo.delete_product(product.id).unwrap();

    assert!(repo.get_product_by_id(product.id).unwrap().is_none());
    let filters = ProductFilters {
        category_ids: vec![category.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 0);
    assert!(items.is_empty());

    assert!(matches!(
        repo.delete_product(product.id),
        Err(RepositoryError::NotFound)
    ));
}

#[test]
fn test_listing_filters_by_category() {
    let test_db = common::TestDb::new("test_listing_filters_by_category.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo.create_category(&NewCategory::new("Knitwear")).unwrap();
    seed_twelve(&repo, category.id);

    let filters = ProductFilters {
        category_ids: vec![category.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(
            ProductListQuery::new()
                .filters(filters)
                .sort(by_name(SortDirection::Asc)),
        )
        .unwrap();

    assert_eq!(total, 3);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Product 01", "Product 02", "Product 03"]);
}

#[test]
fn test_listing_paginates_and_reports_totals() {
    let test_db = common::TestDb::new("test_listing_paginates.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo.create_category(&NewCategory::new("Knitwear")).unwrap();
    seed_twelve(&repo, category.id);

    let (total, items) = repo
        .list_products(
            ProductListQuery::new()
                .sort(by_name(SortDirection::Asc))
                .paginate(2, 5),
        )
        .unwrap();

    assert_eq!(total, 12);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Product 06",
            "Product 07",
            "Product 08",
            "Product 09",
            "Product 10"
        ]
    );

    let (total, items) = repo
        .list_products(ProductListQuery::new().paginate(4, 5))
        .unwrap();
    assert_eq!(total, 12);
    assert!(items.is_empty());
}

#[test]
fn test_listing_orders_by_requested_sort() {
    let test_db = common::TestDb::new("test_listing_orders_by_sort.db");
    let repo = DieselRepository::new(test_db.pool());

    let category = repo.create_category(&NewCategory::new("Knitwear")).unwrap();
    seed_twelve(&repo, category.id);

    let (_, items) = repo
        .list_products(ProductListQuery::new().sort(ProductSort {
            field: SortField::Price,
            direction: SortDirection::Desc,
        }))
        .unwrap();

    assert_eq!(items.len(), 12);
    assert!(items.windows(2).all(|pair| pair[0].price >= pair[1].price));
    assert_eq!(items[0].name, "Product 12");
}

#[test]
fn test_listing_does_not_duplicate_multi_category_products() {
    let test_db = common::TestDb::new("test_listing_no_duplicates.db");
    let repo = DieselRepository::new(test_db.pool());

    let a = repo.create_category(&NewCategory::new("A")).unwrap();
    let b = repo.create_category(&NewCategory::new("B")).unwrap();
    let product = repo
        .create_product(
            &NewProduct::new("Reversible Coat", 300.0, Gender::Men)
                .with_category_ids(vec![a.id, b.id]),
        )
        .unwrap();
    repo.create_product(&NewProduct::new("Plain Coat", 200.0, Gender::Men))
        .unwrap();

    let filters = ProductFilters {
        category_ids: vec![a.id, b.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, product.id);
    assert_eq!(items[0].categories.len(), 2);

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items.len(), 2);
}

#[test]
fn test_listing_category_filter_keeps_every_category_on_matches() {
    let test_db = common::TestDb::new("test_listing_category_filter_keeps_all.db");
    let repo = DieselRepository::new(test_db.pool());

    let a = repo.create_category(&NewCategory::new("A")).unwrap();
    let b = repo.create_category(&NewCategory::new("B")).unwrap();
    let product = repo
        .create_product(
            &NewProduct::new("Two Way Bag", 90.0, Gender::Women).with_category_ids(vec![a.id, b.id]),
        )
        .unwrap();

    let filters = ProductFilters {
        category_ids: vec![a.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(items[0].id, product.id);
    let names: Vec<&str> = items[0].categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn test_listing_brand_filter_does_not_match_id_prefixes() {
    let test_db = common::TestDb::new("test_listing_brand_id_prefixes.db");
    let repo = DieselRepository::new(test_db.pool());

    let brands: Vec<i32> = (1..=12)
        .map(|n| repo.create_brand(&NewBrand::new(format!("Brand {n:02}"))).unwrap().id)
        .collect();
    let (brand_1, brand_12) = (brands[0], brands[11]);
    assert_eq!((brand_1, brand_12), (1, 12));

    let only_twelve = repo
        .create_product(
            &NewProduct::new("Twelve Tee", 30.0, Gender::Men).with_brand_ids(vec![brand_12]),
        )
        .unwrap();
    let only_one = repo
        .create_product(&NewProduct::new("One Tee", 30.0, Gender::Men).with_brand_ids(vec![brand_1]))
        .unwrap();

    let filters = ProductFilters {
        brand_ids: vec![brand_1],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, only_one.id);

    let filters = ProductFilters {
        brand_ids: vec![brand_12],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, only_twelve.id);
}

#[test]
fn test_listing_brand_filter_matches_any_requested_brand() {
    let test_db = common::TestDb::new("test_listing_brand_any_of.db");
    let repo = DieselRepository::new(test_db.pool());

    let north = repo.create_brand(&NewBrand::new("North")).unwrap();
    let south = repo.create_brand(&NewBrand::new("South")).unwrap();
    let east = repo.create_brand(&NewBrand::new("East")).unwrap();

    repo.create_product(&NewProduct::new("Parka", 250.0, Gender::Men).with_brand_ids(vec![north.id]))
        .unwrap();
    repo.create_product(
        &NewProduct::new("Shell", 180.0, Gender::Men).with_brand_ids(vec![south.id, north.id]),
    )
    .unwrap();
    repo.create_product(&NewProduct::new("Fleece", 90.0, Gender::Men).with_brand_ids(vec![east.id]))
        .unwrap();

    let filters = ProductFilters {
        brand_ids: vec![north.id, south.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters).sort(by_name(SortDirection::Asc)))
        .unwrap();

    assert_eq!(total, 2);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Parka", "Shell"]);
}

#[test]
fn test_listing_occasion_filter_matches_any_requested_tag() {
    let test_db = common::TestDb::new("test_listing_occasion_any_of.db");
    let repo = DieselRepository::new(test_db.pool());

    repo.create_product(
        &NewProduct::new("Sequin Top", 70.0, Gender::Women).with_occasions(vec!["party".to_string()]),
    )
    .unwrap();
    repo.create_product(
        &NewProduct::new("Blazer", 150.0, Gender::Women)
            .with_occasions(vec!["work".to_string(), "party".to_string()]),
    )
    .unwrap();
    repo.create_product(
        &NewProduct::new("Sandals", 40.0, Gender::Women).with_occasions(vec!["beach".to_string()]),
    )
    .unwrap();

    let filters = ProductFilters {
        occasions: vec!["party".to_string(), "work".to_string()],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters).sort(by_name(SortDirection::Asc)))
        .unwrap();

    assert_eq!(total, 2);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Blazer", "Sequin Top"]);
}

#[test]
fn test_listing_ranges_include_their_bounds() {
    let test_db = common::TestDb::new("test_listing_inclusive_ranges.db");
    let repo = DieselRepository::new(test_db.pool());

    for (name, price) in [("Low", 100.0), ("Mid", 250.0), ("High", 500.0), ("Over", 500.5)] {
        repo.create_product(&NewProduct::new(name, price, Gender::Girl))
            .unwrap();
    }
    repo.create_product(&NewProduct::new("Sale", 200.0, Gender::Girl).with_discount(50.0))
        .unwrap();

    let filters = ProductFilters {
        price: Some(ValueRange::new(100.0, 500.0)),
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters).sort(by_name(SortDirection::Asc)))
        .unwrap();
    assert_eq!(total, 4);
    let names: Vec<&str> = items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["High", "Low", "Mid", "Sale"]);

    let filters = ProductFilters {
        discount: Some(ValueRange::new(50.0, 50.0)),
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Sale");
}

#[test]
fn test_listing_filters_by_brand() {
    let test_db = common::TestDb::new("test_listing_filters_by_brand.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo.create_brand(&NewBrand::new("First")).unwrap();
    let other = repo.create_brand(&NewBrand::new("Other")).unwrap();

    let branded = repo
        .create_product(
            &NewProduct::new("Branded Tee", 30.0, Gender::Men).with_brand_ids(vec![first.id]),
        )
        .unwrap();
    for n in 0..11 {
        repo.create_product(
            &NewProduct::new(format!("Tee {n}"), 20.0, Gender::Men).with_brand_ids(vec![other.id]),
        )
        .unwrap();
    }

    let filters = ProductFilters {
        brand_ids: vec![first.id],
        ..Default::default()
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();

    assert_eq!(total, 1);
    assert_eq!(items[0].id, branded.id);
    assert_eq!(items[0].brands[0].name, "First");
}

#[test]
fn test_listing_combines_price_gender_discount_and_occasion() {
    let test_db = common::TestDb::new("test_listing_combined_filters.db");
    let repo = DieselRepository::new(test_db.pool());

    let cheap_women = repo
        .create_product(
            &NewProduct::new("Cheap Skirt", 50.0, Gender::Women)
                .with_discount(20.0)
                .with_occasions(vec!["party".to_string()]),
        )
        .unwrap();
    repo.create_product(&NewProduct::new("Pricey Skirt", 500.0, Gender::Women))
        .unwrap();
    repo.create_product(&NewProduct::new("Cheap Shorts", 45.0, Gender::Men))
        .unwrap();
    repo.create_product(
        &NewProduct::new("Plain Skirt", 40.0, Gender::Women).with_occasions(vec!["work".to_string()]),
    )
    .unwrap();

    let filters = ProductFilters {
        price: Some(ValueRange::new(10.0, 100.0)),
        gender: Some(Gender::Women),
        ..Default::default()
    };
    let (total, _) = repo
        .list_products(ProductListQuery::new().filters(filters.clone()))
        .unwrap();
    assert_eq!(total, 2);

    let filters = ProductFilters {
        discount: Some(ValueRange::new(10.0, 50.0)),
        occasions: vec!["party".to_string()],
        ..filters
    };
    let (total, items) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].id, cheap_women.id);
    assert!((items[0].price - 40.0).abs() < 1e-9);
}

#[test]
fn test_listing_tolerates_unknown_stored_gender() {
    let test_db = common::TestDb::new("test_listing_unknown_gender.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut conn = test_db.pool().get().unwrap();
    diesel::sql_query(
        "INSERT INTO products (name, price, old_price, gender) VALUES ('Mystery Box', 10, 10, 'unisex')",
    )
    .execute(&mut conn)
    .unwrap();

    let (total, items) = repo.list_products(ProductListQuery::new()).unwrap();

    assert_eq!(total, 1);
    assert!(items[0].gender.is_none());
    assert_eq!(items[0].gender_label(), "unknown");

    let filters = ProductFilters {
        gender: Some(Gender::Women),
        ..Default::default()
    };
    let (total, _) = repo
        .list_products(ProductListQuery::new().filters(filters))
        .unwrap();
    assert_eq!(total, 0);
}
