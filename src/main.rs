use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use catalog_admin::config::ServerConfig;
use catalog_admin::db::establish_connection_pool;
use catalog_admin::repository::DieselRepository;
use catalog_admin::routes::api::api_v1_products;
use catalog_admin::routes::brands::{add_brand, delete_brand, edit_brand, show_brands};
use catalog_admin::routes::categories::{
    add_category, delete_category, edit_category, show_categories,
};
use catalog_admin::routes::main::show_index;
use catalog_admin::routes::products::{
    add_product, delete_product, edit_product, edit_product_form, new_product, show_products,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match Key::try_from(config.secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            log::warn!("SECRET_KEY is missing or shorter than 64 bytes; using a random key");
            Key::generate()
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new(&config.templates_dir) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_index)
            .service(api_v1_products)
            .service(show_products)
            .service(new_product)
            .service(add_product)
            .service(edit_product_form)
            .service(edit_product)
            .service(delete_product)
            .service(show_categories)
            .service(add_category)
            .service(edit_category)
            .service(delete_category)
            .service(show_brands)
            .service(add_brand)
            .service(edit_brand)
            .service(delete_brand)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
