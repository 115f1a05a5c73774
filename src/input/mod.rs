//! Input handling: event types and the processor that converts raw window
//! events into orbit commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into orbit commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, OrbitCommand};
