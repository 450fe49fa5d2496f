//! Game entities module.
//!
//! This module organizes point entity logic.

pub mod point;

pub use point::*;
