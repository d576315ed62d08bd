#![forbid(unsafe_code)]

//! TokenForge runtime.
//!
//! The orchestrator between input ([`forge_core`]) and output
//! ([`forge_render`]): it drives `Model::update` on incoming events, calls
//! `Model::view` to produce frames, and reconciles the model's declared
//! subscriptions against running background producers.

pub mod program;
pub mod simulator;
pub mod subscription;

pub use program::{Cmd, Model, Program, ProgramConfig};
pub use simulator::ProgramSimulator;
pub use subscription::{Every, StopSignal, SubId, Subscription};
