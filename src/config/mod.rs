/// Main configuration module.
/// 
/// Re-exports submodules for gameplay constants and engine tuning.
pub mod game;
pub mod engine;
