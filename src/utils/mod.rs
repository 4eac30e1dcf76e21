pub mod jwt;
pub mod validation;
pub mod password;
pub mod odds;
pub mod reference;

pub use jwt::*;
pub use validation::*;
pub use password::*;
pub use odds::*;
pub use reference::generate_unique_deposit_reference;
