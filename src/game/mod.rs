pub mod types;
pub mod error;
pub mod state;
pub mod scheduler;
pub mod engine;
pub mod display;

pub mod entities;

#[cfg(test)]
mod tests;

