//! Broadcasting of game events for real-time UI updates.

pub mod game_events;

pub use game_events::{GameEvent, GameEventBroadcaster};
