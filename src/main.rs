//! Main entry point for the "Clear the Points" game.
//!
//! Initializes logging and the actor system, starts a game session and
//! drives it from the terminal until the player quits.

use actix::prelude::*;
use log::info;

use session::console::{self, ConsoleView};
use session::messages::Subscribe;
use session::server::GameSession;

pub mod config;
mod game;
mod session;

#[actix::main]
async fn main() -> std::io::Result<()> {
    // Initialize logger from environment variable (RUST_LOG).
    env_logger::init();

    // Start the GameSession actor (owns the engine and its timers).
    let session = GameSession::new().start();

    // Start the view actor and subscribe it to state updates.
    let view = ConsoleView::new().start();
    session
        .send(Subscribe { recipient: view.recipient() })
        .await
        .map_err(std::io::Error::other)?;

    console::run(session).await?;

    info!("[Main] Bye");
    System::current().stop();
    Ok(())
}
