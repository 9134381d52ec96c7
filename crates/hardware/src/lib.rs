//! MIPS-I pipeline simulator library.
//!
//! This crate implements a cycle-accurate five-stage MIPS-I simulator with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), GPR and HI/LO state.
//! 2. **Memory:** Flat big-endian guest memory with aligned, bounds-checked access.
//! 3. **ISA:** Decoding for the MIPS-I integer subset and a disassembler.
//! 4. **Syscalls:** An O32-style syscall bridge (console output, guest exit).
//! 5. **Simulation:** Memory-image loading, configuration, and statistics collection.

/// Common types and constants (faults, register file, encoding fields).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (pipeline latches, hazards, stages, controller, console).
pub mod core;
/// Instruction set (field extraction, decode, MIPS-I tables, ABI, disassembly).
pub mod isa;
/// Simulation surface (memory image input, syscall dispatcher, run loop).
pub mod sim;
/// Guest-visible memory subsystem.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main CPU type; holds registers, memory, latches, and stats.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new`, feed a `MemoryImage`, call `run`.
pub use crate::sim::simulator::{RunOutcome, Simulator};
