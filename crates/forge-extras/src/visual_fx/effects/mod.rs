#![forbid(unsafe_code)]

//! Concrete backdrop effects.

pub mod matrix_rain;
