use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    create_category, load_categories, modify_category, remove_category,
};

#[get("/categories")]
pub async fn show_categories(
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_categories(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, "categories");
            context.insert("category_tree", &data.tree);
            context.insert("categories", &data.flat);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories/add")]
pub async fn add_category(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), form) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" added.", category.name)).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Duplicate category name.").send();
        }
        Err(err) => {
            log::error!("Failed to create category: {err}");
            FlashMessage::error("Could not add the category.").send();
        }
    }
    redirect("/categories")
}

#[post("/categories/edit")]
pub async fn edit_category(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<EditCategoryForm>,
) -> impl Responder {
    match modify_category(repo.get_ref(), form) {
        Ok(category) => {
            FlashMessage::success(format!("Category \"{}\" updated.", category.name)).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Duplicate category name.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
        }
        Err(err) => {
            log::error!("Failed to update category: {err}");
            FlashMessage::error("Could not update the category.").send();
        }
    }
    redirect("/categories")
}

#[post("/categories/{category_id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), category_id) {
        Ok(()) => {
            FlashMessage::success("Category deleted.").send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found or already deleted.").send();
        }
        Err(err) => {
            log::error!("Failed to delete category {category_id}: {err}");
            FlashMessage::error("Could not delete the category.").send();
        }
    }
    redirect("/categories")
}
