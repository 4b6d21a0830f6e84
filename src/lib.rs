pub mod application;
pub mod db;
pub mod domain;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::order_service::OrderService;
use domain::ports::PaymentGateway;
use infrastructure::order_repo::DieselOrderStore;

pub use db::{create_pool, DbPool};

/// The service type the HTTP handlers are wired against.
pub type AppOrderService = OrderService<DieselOrderStore>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::orders::create_order,
        handlers::orders::verify_payment,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::get_orders_by_user,
        handlers::orders::track_order,
        handlers::orders::update_order_status,
        handlers::orders::update_order_status_admin,
        handlers::orders::update_payment_status,
        handlers::orders::delete_order,
        handlers::promotions::get_all,
        handlers::promotions::get_by_id,
        handlers::promotions::create,
        handlers::promotions::update,
        handlers::promotions::delete,
        handlers::promotions::todays,
        handlers::promotions::unread,
        handlers::promotions::mark_as_read,
    ),
    tags(
        (name = "orders", description = "Order lifecycle and payment verification"),
        (name = "promotions", description = "Promotional message broadcast and read tracking"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    payment_gateway: Arc<dyn PaymentGateway>,
    webhook_secret: String,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let service = web::Data::new(AppOrderService::new(
        Arc::new(DieselOrderStore::new(pool.clone())),
        payment_gateway,
        webhook_secret,
    ));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(service.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/orders")
                    .route("/create-order", web::post().to(handlers::orders::create_order))
                    .route("/verify-payment", web::post().to(handlers::orders::verify_payment))
                    .route("/fetch-all-orders", web::get().to(handlers::orders::list_orders))
                    .route("/fetch-order-by-id/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/fetch-order-by-userId/{userId}",
                        web::get().to(handlers::orders::get_orders_by_user),
                    )
                    .route(
                        "/fetch-order-by-for-tracking",
                        web::get().to(handlers::orders::track_order),
                    )
                    .route(
                        "/update-order-status/{id}/status",
                        web::put().to(handlers::orders::update_order_status),
                    )
                    .route(
                        "/update-order-status-admin-page/{orderId}",
                        web::put().to(handlers::orders::update_order_status_admin),
                    )
                    .route(
                        "/update-payment-status/{id}/payment",
                        web::put().to(handlers::orders::update_payment_status),
                    )
                    .route("/delete-order/{id}", web::delete().to(handlers::orders::delete_order)),
            )
            .service(
                web::scope("/promotions")
                    .route("/promotions-getAll", web::get().to(handlers::promotions::get_all))
                    .route(
                        "/promotions-getById/{id}",
                        web::get().to(handlers::promotions::get_by_id),
                    )
                    .route("/promotions-create", web::post().to(handlers::promotions::create))
                    .route(
                        "/promotions-update/{id}",
                        web::put().to(handlers::promotions::update),
                    )
                    .route(
                        "/promotions-delete/{id}",
                        web::delete().to(handlers::promotions::delete),
                    )
                    .route("/notifications/todays", web::get().to(handlers::promotions::todays))
                    .route("/unread-promotions", web::get().to(handlers::promotions::unread))
                    .route(
                        "/mark-as-read/{id}",
                        web::put().to(handlers::promotions::mark_as_read),
                    ),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
