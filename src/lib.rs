//! Grid Snake: a deterministic snake simulation plus a terminal front-end.
//!
//! The simulation lives in [`game`], [`snake`], [`food`] and [`random`] and has
//! no timers or I/O. Everything else in the crate is a collaborator that drives
//! it: high-score storage in [`score`], the terminal renderer and input mapping.

pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod random;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
