//! Row parsers for located tables.

pub mod card;
pub mod events;

pub use card::FightCardParser;
pub use events::EventListParser;
