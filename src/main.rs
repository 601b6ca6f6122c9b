use actix_web::{App, HttpServer, middleware, web};

use golden_services::config::AppConfig;
use golden_services::db::establish_connection_pool;
use golden_services::repository::DieselRepository;
use golden_services::routes::{bookings, catalog, providers, requests};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to {}: {e}", config.database_url);
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    log::info!(
        "{} listening on {}:{}",
        config.site.name,
        config.server.host,
        config.server.port
    );

    let site = config.site.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(site.clone()))
            .configure(bookings::configure)
            .configure(requests::configure)
            .configure(catalog::configure)
            .configure(providers::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
