pub mod access_log;
pub mod auth;

pub use access_log::AccessLog;
pub use auth::AuthGate;
