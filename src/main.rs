use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};
use mintodo::{
    auth::{HashCost, TokenService},
    config::{Config, StoreBackend},
    store::{postgres::reset_schema, PgStore},
    AppError, AppServices,
};
use std::sync::Arc;

async fn build_services(config: &Config) -> Result<AppServices, AppError> {
    let tokens = TokenService::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    )?;
    let hash_cost = HashCost(config.bcrypt_cost);

    match config.store_backend {
        StoreBackend::Memory => {
            log::warn!("Using the in-memory store; data is lost on shutdown");
            Ok(AppServices::in_memory(tokens, hash_cost))
        }
        StoreBackend::Postgres => {
            let url = config.database_url.as_deref().ok_or_else(|| {
                AppError::InternalServerError("DATABASE_URL must be set".into())
            })?;
            let store = Arc::new(PgStore::connect(url, config.database_max_connections).await?);
            reset_schema(store.pool()).await?;

            Ok(AppServices {
                todos: store.clone(),
                users: store,
                tokens,
                hash_cost,
            })
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let services = build_services(&config).await.map_err(|e| {
        log::error!("Failed to initialise services: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    log::info!("Starting mintodo server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
