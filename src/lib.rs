//! stocksim: toy stock market simulator.
//!
//! Hexagonal layout: the simulation model in [`domain`], port traits in
//! [`ports`], concrete implementations in [`adapters`], command dispatch in
//! [`cli`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
