use std::env;

use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use cds::config;

fn init_logging() {
    tracing_log::LogTracer::init().ok();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let app_host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let app_port = env::var("APP_PORT").unwrap_or_else(|_| "8080".to_string());
    let app_url = format!("{}:{}", &app_host, &app_port);
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = config::db::init_db_pool(&db_url);
    {
        let mut conn = pool
            .get()
            .expect("Failed to get a connection for migrations");
        config::db::run_migration(&mut conn).expect("Failed to run database migrations");
    }

    config::data_loader::run(&pool);

    log::info!("Starting customer data service at {}", &app_url);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .send_wildcard()
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                    .allowed_header(http::header::CONTENT_TYPE)
                    .max_age(3600),
            )
            .app_data(web::Data::new(pool.clone()))
            .wrap(TracingLogger::default())
            .configure(config::app::config_services)
    })
    .bind(&app_url)?
    .run()
    .await
}
