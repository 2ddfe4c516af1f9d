//! HTTP surface
//!
//! Route groups are assembled here and mounted by `main`. Auth gates and
//! the login rate limiter are applied per route so each group stays a plain
//! `Scope`.

use actix_governor::{Governor, GovernorConfigBuilder, PeerIpKeyExtractor};
use actix_web::{Scope, web};
use governor::middleware::NoOpMiddleware;
use tracing::debug;

pub mod handlers;
pub mod helpers;
pub mod jwt;
pub mod middleware;
pub mod types;

use handlers::{auth, links, logs};
use middleware::AuthGate;

/// Login rate limiter: one request per second refill with a burst of five,
/// keyed by peer address. Over-limit callers get HTTP 429.
pub fn login_rate_limiter() -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
    let config = GovernorConfigBuilder::default()
        .seconds_per_request(1)
        .burst_size(5)
        .finish()
        .expect("Invalid rate limit config");

    debug!("login rate limiter created: 1 req/s, burst 5");
    Governor::new(&config)
}

/// Authentication routes `/auth`
///
/// - POST /auth/login   (public, rate-limited)
/// - GET  /auth/profile (session required)
/// - POST /auth/logout  (session required)
pub fn auth_routes() -> Scope {
    web::scope("/auth")
        .route(
            "/login",
            web::post().to(auth::login).wrap(login_rate_limiter()),
        )
        .route(
            "/profile",
            web::get().to(auth::profile).wrap(AuthGate::required()),
        )
        .route(
            "/logout",
            web::post().to(auth::logout).wrap(AuthGate::required()),
        )
}

/// Short link routes `/shorturls`
///
/// All accept anonymous callers; a valid bearer token attaches the creator
/// identity.
pub fn shorturl_routes() -> Scope {
    web::scope("/shorturls")
        .route(
            "",
            web::post()
                .to(links::create_short_url)
                .wrap(AuthGate::optional()),
        )
        .route(
            "",
            web::get().to(links::get_all_urls).wrap(AuthGate::optional()),
        )
        .route(
            "/{code}",
            web::get().to(links::get_url_stats).wrap(AuthGate::optional()),
        )
}

/// Audit log routes `/logs` (session + access code required)
pub fn log_routes() -> Scope {
    web::scope("/logs")
        .route(
            "",
            web::post().to(logs::create_log).wrap(AuthGate::required()),
        )
        .route("", web::get().to(logs::get_logs).wrap(AuthGate::required()))
        .route(
            "/{log_id}",
            web::get()
                .to(logs::get_log_by_id)
                .wrap(AuthGate::required()),
        )
}
