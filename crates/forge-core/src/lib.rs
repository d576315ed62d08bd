#![forbid(unsafe_code)]

//! TokenForge core: terminal lifecycle, geometry, and canonical input events.
//!
//! This crate owns everything that touches the terminal directly except
//! rendering: raw-mode entry/exit, the alternate screen, and translation of
//! crossterm input into the canonical [`event::Event`] type consumed by the
//! runtime.

pub mod event;
pub mod geometry;
pub mod terminal_session;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
pub use geometry::{Rect, Sides};
pub use terminal_session::{SessionOptions, TerminalSession};
