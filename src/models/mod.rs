pub mod bet;
pub mod common;
pub mod contact;
pub mod event;
pub mod pagination;
pub mod payment;
pub mod promotion;
pub mod user;

pub use bet::*;
pub use common::*;
pub use contact::*;
pub use event::*;
pub use pagination::*;
pub use payment::*;
pub use promotion::*;
pub use user::*;
