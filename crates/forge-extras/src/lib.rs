#![forbid(unsafe_code)]

//! Decorative extras for TokenForge.
//!
//! Currently: full-screen backdrop effects that paint behind the UI.

pub mod visual_fx;

pub use visual_fx::effects::matrix_rain::MatrixRainFx;
pub use visual_fx::{Backdrop, BackdropFx, FxContext, FxQuality, ThemeInputs};
