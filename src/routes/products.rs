use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::product::Gender;
use crate::forms::products::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::{ServiceError, products};

#[get("/products")]
pub async fn show_products(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match products::load_products_page(repo.get_ref(), req.query_string()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "products");
            context.insert("products", &data.products);
            context.insert("total_count", &data.total_count);
            context.insert("selected", &data.selected);
            context.insert("has_active_filters", &data.has_active_filters);
            context.insert("filter_query", &data.filter_query);
            context.insert("categories", &data.categories);
            context.insert("brands", &data.brands);
            context.insert("genders", &Gender::ALL);
            context.insert("sort_options", &products::SORT_OPTIONS);
            render_template(&tera, "products/index.html", &context)
        }
        Err(ServiceError::InvalidQuery(message)) => {
            FlashMessage::error(message).send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/products/add")]
pub async fn new_product(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_product_form(repo.get_ref(), None, &flash_messages, &tera)
}

#[post("/products/add")]
pub async fn add_product(repo: web::Data<DieselRepository>, body: web::Bytes) -> impl Responder {
    let form = match parse_product_form(&body) {
        Some(form) => form,
        None => return redirect("/products/add"),
    };

    match products::create_product(repo.get_ref(), form) {
        Ok(product) => {
            FlashMessage::success(format!("Product \"{}\" created.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/products/add")
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            FlashMessage::error("Could not create the product.").send();
            redirect("/products/add")
        }
    }
}

#[get("/products/{product_id}/edit")]
pub async fn edit_product_form(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    render_product_form(
        repo.get_ref(),
        Some(path.into_inner()),
        &flash_messages,
        &tera,
    )
}

#[post("/products/{product_id}/edit")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    body: web::Bytes,
) -> impl Responder {
    let product_id = path.into_inner();
    let edit_url = format!("/products/{product_id}/edit");

    let form = match parse_product_form(&body) {
        Some(form) => form,
        None => return redirect(&edit_url),
    };

    match products::modify_product(repo.get_ref(), product_id, form) {
        Ok(product) => {
            FlashMessage::success(format!("Product \"{}\" updated.", product.name)).send();
            redirect("/products")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&edit_url)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("Could not update the product.").send();
            redirect(&edit_url)
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::remove_product(repo.get_ref(), product_id) {
        Ok(()) => {
            FlashMessage::success("Product deleted.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found or already deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("Could not delete the product.").send();
        }
    }
    redirect("/products")
}

/// Multi-selects post repeated keys, which `web::Form` cannot decode.
fn parse_product_form(body: &[u8]) -> Option<ProductForm> {
    match serde_html_form::from_bytes::<ProductForm>(body) {
        Ok(form) => Some(form),
        Err(err) => {
            FlashMessage::error(format!("Invalid product form: {err}")).send();
            None
        }
    }
}

fn render_product_form(
    repo: &DieselRepository,
    product_id: Option<i32>,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    match products::load_product_form(repo, product_id) {
        Ok(data) => {
            let mut context = base_context(flash_messages, "products");
            context.insert("product", &data.product);
            context.insert("categories", &data.categories);
            context.insert("brands", &data.brands);
            context.insert("genders", &Gender::ALL);
            render_template(tera, "products/form.html", &context)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Product not found.").send();
            redirect("/products")
        }
        Err(err) => {
            log::error!("Failed to load product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
