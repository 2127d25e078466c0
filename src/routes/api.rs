use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde_json::json;

use crate::repository::DieselRepository;
use crate::services::{ServiceError, products};

#[get("/api/v1/products")]
/// Return one page of the catalog listing as JSON.
///
/// Accepts the same query parameters as the products page. Invalid
/// parameters yield `400 Bad Request` with an `error` message.
pub async fn api_v1_products(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::search_catalog(repo.get_ref(), req.query_string()) {
        Ok((_, page)) => HttpResponse::Ok().json(page),
        Err(ServiceError::InvalidQuery(message)) => {
            HttpResponse::BadRequest().json(json!({ "error": message }))
        }
        Err(err) => {
            log::error!("Failed to list catalog: {err}");
            HttpResponse::InternalServerError().json(json!({ "error": "internal error" }))
        }
    }
}
