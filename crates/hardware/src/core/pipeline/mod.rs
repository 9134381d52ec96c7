//! The five-stage pipeline.
//!
//! Latches carry instructions between stages; the hazard unit decides
//! stall-versus-forward each cycle; the stage functions advance one latch
//! each, driven by the controller in writeback-first order.

/// Combinational ALU and HI/LO multiply/divide helpers.
pub mod alu;
/// Data hazard detection and operand forwarding.
pub mod hazards;
/// Pipeline latch structures for inter-stage communication.
pub mod latches;
/// Control signals and operation types.
pub mod signals;
/// The five pipeline stage functions.
pub mod stages;
