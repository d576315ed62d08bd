#![forbid(unsafe_code)]

//! TokenForge render kernel.
//!
//! The pipeline is deliberately small: widgets write [`cell::Cell`]s into a
//! [`buffer::Buffer`], the runtime wraps one in a [`frame::Frame`] per
//! render, and the [`presenter::Presenter`] diffs consecutive buffers and
//! emits the minimal crossterm command stream.

pub mod buffer;
pub mod cell;
pub mod diff;
pub mod frame;
pub mod presenter;

pub use buffer::Buffer;
pub use cell::{Cell, CellAttrs, PackedRgba};
pub use diff::BufferDiff;
pub use frame::Frame;
pub use presenter::Presenter;
