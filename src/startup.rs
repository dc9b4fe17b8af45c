use std::net::TcpListener;

use actix_web::{dev::Server, error::{JsonPayloadError, PathError}, web, App, HttpRequest, HttpServer};
use anyhow::Context;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing_actix_web::TracingLogger;

use crate::{
    auth::jwt::Tokenizer,
    configuration::Settings,
    error::ApiError,
    routes::{
        admin_config::{fetch_categories, fetch_promoted_list, update_promote_list},
        authentication::{login, register},
        cart::{add_to_cart, fetch_all_cart, fetch_cart, remove_item, update_cart},
        health_check,
        order::{cancel_order, fetch_orders, place_cart_order, update_status},
        product::{add_new_product, fetch_item_details, fetch_items, update_product},
        restaurant::{fetch_restaurant, fetch_restaurant_details, fetch_restaurants},
        users::{approve_user, fetch_user_details, fetch_users, reject_user}
    },
    telemetry::spawn_blocking_with_tracing,
    utils::{build_pool, DbPool}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub struct Application{
    pub host: String,
    pub port: u16,
    server: Server
}

impl Application {
    // Opens the pool, brings the schema up to date and binds the listener.
    // Any failure here aborts startup
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let database = settings.database.clone();
        let pool = spawn_blocking_with_tracing(move || -> Result<DbPool, anyhow::Error> {
            let pool = build_pool(&database)
                .context("Failed to connect to the database")?;

            let mut conn = pool.get()
                .context("Failed to get connection for migrations")?;
            conn.run_pending_migrations(MIGRATIONS)
                .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

            Ok(pool)
        })
        .await
        .context("Failed due to threadpool error")??;

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
            .context("Failed to bind listener")?;
        let port = listener.local_addr()?.port();

        tracing::info!(host = %settings.application.host, port, "Listening");

        let server = run(listener, pool, Tokenizer::new(&settings.jwt))?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(err.to_string()).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::NotFound(err.to_string()).into()
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    tokenizer: Tokenizer
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let tokenizer = web::Data::new(tokenizer);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(pool.clone())
            .app_data(tokenizer.clone())
            .route("/health", web::get().to(health_check))
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/approve-user", web::post().to(approve_user))
            .route("/reject-user", web::post().to(reject_user))
            .route("/fetch-users", web::get().to(fetch_users))
            .route("/fetch-user-details/{id}", web::get().to(fetch_user_details))
            .route("/fetch-restaurants", web::get().to(fetch_restaurants))
            .route("/fetch-restaurant/{id}", web::get().to(fetch_restaurant))
            .route("/fetch-restaurant-details/{owner_id}", web::get().to(fetch_restaurant_details))
            .route("/fetch-items", web::get().to(fetch_items))
            .route("/fetch-item-details/{id}", web::get().to(fetch_item_details))
            .route("/add-new-product", web::post().to(add_new_product))
            .route("/update-product/{id}", web::put().to(update_product))
            .route("/fetch-categories", web::get().to(fetch_categories))
            .route("/fetch-promoted-list", web::get().to(fetch_promoted_list))
            .route("/update-promote-list", web::post().to(update_promote_list))
            .route("/fetch-cart", web::get().to(fetch_cart))
            .route("/fetch-all-cart", web::get().to(fetch_all_cart))
            .route("/add-to-cart", web::post().to(add_to_cart))
            .route("/remove-item", web::put().to(remove_item))
            .route("/update-cart-quantity", web::put().to(update_cart))
            .route("/place-cart-order", web::post().to(place_cart_order))
            .route("/cancel-order", web::put().to(cancel_order))
            .route("/update-order-status", web::put().to(update_status))
            .route("/fetch-orders", web::get().to(fetch_orders))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
