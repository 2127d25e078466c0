use catalog_admin::domain::brand::NewBrand;
use catalog_admin::domain::category::NewCategory;
use catalog_admin::domain::product::{Gender, NewProduct};
use catalog_admin::forms::products::ProductForm;
use catalog_admin::repository::{BrandWriter, CategoryWriter, DieselRepository, ProductWriter};
use catalog_admin::services::products;
use catalog_admin::services::ServiceError;

mod common;

fn seed_catalog(repo: &DieselRepository) -> (i32, i32) {
    let dresses = repo.create_category(&NewCategory::new("Dresses")).unwrap();
    let brand = repo.create_brand(&NewBrand::new("Acne")).unwrap();

    for n in 1..=7 {
        let mut product = NewProduct::new(format!("Dress {n}"), 20.0 * n as f64, Gender::Women)
            .with_category_ids(vec![dresses.id]);
        if n % 2 == 0 {
            product = product.with_brand_ids(vec![brand.id]);
        }
        repo.create_product(&product).unwrap();
    }
    repo.create_product(&NewProduct::new("Chinos", 70.0, Gender::Men))
        .unwrap();

    (dresses.id, brand.id)
}

#[test]
fn search_catalog_applies_query_string() {
    let test_db = common::TestDb::new("service_search_catalog_applies_query.db");
    let repo = DieselRepository::new(test_db.pool());
    let (dresses, _) = seed_catalog(&repo);

    let (query, page) = products::search_catalog(
        &repo,
        &format!("categoryId={dresses}&sortBy=price-asc&page=2&pageSize=3"),
    )
    .expect("expected listing to succeed");

    assert_eq!(query.pagination.page, 2);
    assert_eq!(page.total_count, 7);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.count_on_page, 3);
    let names: Vec<&str> = page.items.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Dress 4", "Dress 5", "Dress 6"]);
}

#[test]
fn search_catalog_combines_brand_price_and_gender() {
    let test_db = common::TestDb::new("service_search_catalog_combines.db");
    let repo = DieselRepository::new(test_db.pool());
    let (_, brand) = seed_catalog(&repo);

    let (_, page) = products::search_catalog(
        &repo,
        &format!("brandId={brand}&minPrice=30&maxPrice=100&gender=women"),
    )
    .expect("expected listing to succeed");

    let mut prices: Vec<f64> = page.items.iter().map(|p| p.price).collect();
    prices.sort_by(f64::total_cmp);
    assert_eq!(prices, vec![40.0, 80.0]);
    assert_eq!(page.total_pages, 1);
}

#[test]
fn search_catalog_rejects_unknown_sort() {
    let test_db = common::TestDb::new("service_search_catalog_rejects_sort.db");
    let repo = DieselRepository::new(test_db.pool());

    let result = products::search_catalog(&repo, "sortBy=id-asc");

    assert!(matches!(result, Err(ServiceError::InvalidQuery(_))));
}

#[test]
fn search_catalog_past_last_page_is_empty() {
    let test_db = common::TestDb::new("service_search_catalog_past_last_page.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let (_, page) =
        products::search_catalog(&repo, "page=5").expect("expected listing to succeed");

    assert_eq!(page.total_count, 8);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.count_on_page, 0);
}

#[test]
fn create_product_from_form_stores_associations() {
    let test_db = common::TestDb::new("service_create_product_from_form.db");
    let repo = DieselRepository::new(test_db.pool());
    let (dresses, brand) = seed_catalog(&repo);

    let form = ProductForm {
        name: "  Silk   Dress ".to_string(),
        description: None,
        old_price: "200".to_string(),
        discount: Some("15".to_string()),
        rating: Some("4".to_string()),
        gender: "women".to_string(),
        colors: Some("red, black".to_string()),
        image_url: None,
        category_ids: vec![dresses.to_string()],
        brand_ids: vec![brand.to_string()],
        occasions: vec!["Party".to_string(), "party".to_string()],
    };

    let product = products::create_product(&repo, form).expect("expected creation to succeed");

    assert_eq!(product.name, "Silk Dress");
    assert!((product.price - 170.0).abs() < 1e-9);
    assert_eq!(product.colors, vec!["red", "black"]);
    assert_eq!(product.categories[0].id, dresses);
    assert_eq!(product.brands[0].id, brand);
    assert_eq!(product.occasions, vec!["party"]);

    let fetched = products::get_product(&repo, product.id).expect("expected product");
    assert_eq!(fetched.id, product.id);
}

#[test]
fn create_product_with_unknown_category_is_form_error() {
    let test_db = common::TestDb::new("service_create_product_unknown_category.db");
    let repo = DieselRepository::new(test_db.pool());

    let form = ProductForm {
        name: "Orphan".to_string(),
        description: None,
        old_price: "10".to_string(),
        discount: None,
        rating: None,
        gender: "men".to_string(),
        colors: None,
        image_url: None,
        category_ids: vec!["42".to_string()],
        brand_ids: Vec::new(),
        occasions: Vec::new(),
    };

    let result = products::create_product(&repo, form);

    assert!(matches!(result, Err(ServiceError::Form(message)) if message.contains("category")));
}

#[test]
fn search_catalog_huge_page_is_empty() {
    let test_db = common::TestDb::new("service_search_catalog_huge_page.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let (_, page) = products::search_catalog(&repo, "page=1000000000000000000&pageSize=12")
        .expect("expected listing to succeed");

    assert_eq!(page.total_count, 8);
    assert_eq!(page.count_on_page, 0);
    assert!(page.items.is_empty());
}

#[test]
fn search_catalog_largest_page_does_not_overflow() {
    let test_db = common::TestDb::new("service_search_catalog_largest_page.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_catalog(&repo);

    let (query, page) = products::search_catalog(&repo, "page=18446744073709551615&pageSize=50")
        .expect("expected listing to succeed");

    assert_eq!(query.pagination.page, usize::MAX);
    assert_eq!(page.total_count, 8);
    assert_eq!(page.count_on_page, 0);
}
