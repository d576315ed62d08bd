#![forbid(unsafe_code)]

//! TokenForge: a token-creation wizard for the terminal.
//!
//! A three-step form collects a token's name, symbol, supply, and decimal
//! count, then runs a simulated deployment (a fixed delay followed by a
//! randomly generated fake transaction hash). A digital rain animation
//! falls behind the whole UI. Nothing touches a real chain.

pub mod app;
pub mod chrome;
pub mod logging;
pub mod screens;
pub mod theme;
