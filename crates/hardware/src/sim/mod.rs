//! Simulation surface: image input, syscall bridge, and the run loop.

/// Loader-facing memory image.
pub mod image;
/// Top-level simulator and the final outcome report.
pub mod simulator;
/// Guest syscall dispatcher.
pub mod syscall;

pub use image::MemoryImage;
pub use simulator::{RunOutcome, Simulator};
