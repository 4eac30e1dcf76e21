pub mod bet_slip_items;
pub mod bets;
pub mod contact_messages;
pub mod deposits;
pub mod events;
pub mod promotions;
pub mod sport_categories;
pub mod teams;
pub mod user_stats;
pub mod users;

pub use bet_slip_items as bet_slip_item_entity;
pub use bets as bet_entity;
pub use contact_messages as contact_message_entity;
pub use deposits as deposit_entity;
pub use events as event_entity;
pub use promotions as promotion_entity;
pub use sport_categories as sport_category_entity;
pub use teams as team_entity;
pub use user_stats as user_stat_entity;
pub use users as user_entity;

pub use bets::{BetStatus, BetType};
pub use events::EventStatus;
