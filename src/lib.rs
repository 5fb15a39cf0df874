//! Frame-driven Snake: a pure simulation core ([`game`], [`engine`]) talking
//! to its surroundings through small capability traits, plus the terminal
//! front-end that implements them.

pub mod config;
pub mod engine;
pub mod feedback;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_input;
pub mod terminal_runtime;
pub mod ui;
