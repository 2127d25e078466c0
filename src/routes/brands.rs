use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::brands::{AddBrandForm, EditBrandForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::brands::{create_brand, load_brands, modify_brand, remove_brand};

#[get("/brands")]
pub async fn show_brands(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_brands(repo.get_ref()) {
        Ok(brands) => {
            let mut context = base_context(&flash_messages, "brands");
            context.insert("brands", &brands);
            render_template(&tera, "brands/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list brands: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/brands/add")]
pub async fn add_brand(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddBrandForm>,
) -> impl Responder {
    match create_brand(repo.get_ref(), form) {
        Ok(brand) => {
            FlashMessage::success(format!("Brand \"{}\" added.", brand.name)).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A brand with this name already exists.").send();
        }
        Err(err) => {
            log::error!("Failed to create brand: {err}");
            FlashMessage::error("Could not add the brand.").send();
        }
    }
    redirect("/brands")
}

#[post("/brands/edit")]
pub async fn edit_brand(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditBrandForm>,
) -> impl Responder {
    match modify_brand(repo.get_ref(), form) {
        Ok(brand) => {
            FlashMessage::success(format!("Brand \"{}\" updated.", brand.name)).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A brand with this name already exists.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Brand not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update brand: {err}");
            FlashMessage::error("Could not update the brand.").send();
        }
    }
    redirect("/brands")
}

#[post("/brands/{brand_id}/delete")]
pub async fn delete_brand(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let brand_id = path.into_inner();

    match remove_brand(repo.get_ref(), brand_id) {
        Ok(()) => {
            FlashMessage::success("Brand deleted.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Brand not found or already deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete brand {brand_id}: {err}");
            FlashMessage::error("Could not delete the brand.").send();
        }
    }
    redirect("/brands")
}
