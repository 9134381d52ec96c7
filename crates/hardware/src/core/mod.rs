//! CPU core: architectural state, pipeline, and the cycle controller.

/// Guest console output stream.
pub mod console;
/// The CPU and its cycle-level controller.
pub mod cpu;
/// Pipeline latches, control signals, hazards, and the five stages.
pub mod pipeline;

pub use cpu::{Cpu, HaltReason, PipelineState};
