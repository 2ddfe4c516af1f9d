//! Service layer for business logic
//!
//! Services own their collaborators (store, JWT, sinks) and expose the
//! operations the HTTP layer maps onto endpoints.

pub mod audit;
pub mod auth;
pub mod shortener;

pub use audit::AuditService;
pub use auth::AuthService;
pub use shortener::ShortenerService;
