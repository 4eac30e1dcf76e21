pub mod admin;
pub mod auth;
pub mod bets;
pub mod contact;
pub mod events;
pub mod payments;
pub mod promotions;
pub mod user;

pub use admin::admin_config;
pub use auth::auth_config;
pub use bets::bets_config;
pub use contact::contact_config;
pub use events::events_config;
pub use payments::payments_config;
pub use promotions::promotions_config;
pub use user::user_config;
