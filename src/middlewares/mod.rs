mod admin;
mod auth;
mod cors;

pub use admin::AdminMiddleware;
pub use auth::{AuthMiddleware, AuthUser};
pub use cors::create_cors;
