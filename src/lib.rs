//! Pokedex - interactive PokeAPI explorer
//!
//! The library exposes every module so the menu loop and flows can be driven
//! from integration tests with scripted input and canned API responses.

pub mod action;
pub mod api;
pub mod app;
pub mod catalog;
pub mod config;
pub mod effect;
pub mod flows;
pub mod prompt;
pub mod reducer;
pub mod render;
pub mod sprite;
pub mod state;
