//! Core simulation model: stocks, market, player and the update scheduler.

pub mod stock;
pub mod universe;
pub mod market;
pub mod player;
pub mod scheduler;
pub mod simulation;
pub mod config_validation;
pub mod error;
