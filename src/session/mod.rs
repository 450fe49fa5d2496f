//! Session layer root module.
//!
//! Hosts a game engine on the actix event loop:
//! - `server`: the `GameSession` actor owning the engine and its timers
//! - `messages`: commands, queries and state updates exchanged with it
//! - `console`: a terminal front end driving a session from stdin

pub mod server;
pub mod messages;
pub mod console;
