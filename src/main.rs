use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing::info;

use linklet::api;
use linklet::api::handlers::{health, redirect};
use linklet::api::middleware::AccessLog;
use linklet::config;
use linklet::services::{AuditService, AuthService, ShortenerService};
use linklet::storages::StorageFactory;
use linklet::system::init_logging;

fn build_cors(allowed_origins: &[String]) -> Cors {
    // Credentials are only offered to an explicit origin list; the wildcard
    // fallback must stay credential-free.
    let cors = if allowed_origins.is_empty() {
        Cors::default().allow_any_origin()
    } else {
        allowed_origins
            .iter()
            .fold(Cors::default().supports_credentials(), |cors, origin| {
                cors.allowed_origin(origin)
            })
    };

    cors.allow_any_method().allow_any_header().max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = config::get_config();
    let _log_guard = init_logging(config);

    info!("starting linklet v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageFactory::create();
    info!("using storage backend: {}", storage.backend_name());

    let shortener = Arc::new(ShortenerService::from_config(storage));
    let auth = Arc::new(AuthService::from_config());
    let audit = Arc::new(AuditService::from_config());

    if auth.is_configured() {
        info!("authenticated endpoints enabled for '{}'", config.identity.email);
    } else {
        info!("login is disabled (ACCESS_CODE not set)");
    }

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    info!("starting server at http://{}", bind_address);
    info!("public base URL: {}", config.server.base_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(shortener.clone()))
            .app_data(web::Data::new(auth.clone()))
            .app_data(web::Data::new(audit.clone()))
            .wrap(build_cors(&config.server.cors_allowed_origins))
            .wrap(AccessLog)
            .route("/health", web::get().to(health::health_check))
            .service(api::auth_routes())
            .service(api::log_routes())
            .service(api::shorturl_routes())
            .route(
                "/{code}",
                web::get().to(redirect::redirect_short_code),
            )
    })
    .bind(bind_address)?
    .run()
    .await
}
