use std::env;
use std::sync::Arc;

use dotenvy::dotenv;
use storefront_service::gateway::{RazorpayClient, DEFAULT_BASE_URL};
use storefront_service::{build_server, create_pool, run_migrations};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");

    let razorpay_base_url =
        env::var("RAZORPAY_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let razorpay_key_id = env::var("RAZORPAY_KEY_ID").expect("RAZORPAY_KEY_ID must be set");
    let razorpay_key_secret =
        env::var("RAZORPAY_KEY_SECRET").expect("RAZORPAY_KEY_SECRET must be set");

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    // Checkout callbacks are signed with the key secret.
    let gateway = Arc::new(RazorpayClient::new(
        razorpay_base_url,
        razorpay_key_id,
        razorpay_key_secret.clone(),
    ));

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(pool, gateway, razorpay_key_secret, &host, port)?.await
}
