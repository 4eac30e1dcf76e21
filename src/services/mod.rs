pub mod auth_service;
pub mod bet_service;
pub mod contact_service;
pub mod event_service;
pub mod payment_service;
pub mod promotion_service;
pub mod user_service;

pub use auth_service::*;
pub use bet_service::*;
pub use contact_service::*;
pub use event_service::*;
pub use payment_service::*;
pub use promotion_service::*;
pub use user_service::*;
