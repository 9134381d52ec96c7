//! Fault definitions.
//!
//! This module defines the error taxonomy for the simulator. It provides:
//! 1. **Memory Faults:** Misaligned or out-of-range guest memory accesses.
//! 2. **Pipeline Faults:** Terminal conditions that halt the controller, each
//!    carrying the faulting program counter where one exists.
//! 3. **Error Handling:** Integration with standard Rust error traits via `thiserror`.
//!
//! Every `Fault` is unrecoverable at the instruction level: it propagates
//! through the pipeline latches to writeback, where the controller halts. A
//! faulting instruction never commits a register or memory write.

use thiserror::Error;

/// Failure raised by the memory subsystem for a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MemoryFault {
    /// The address is not aligned to the operand width.
    #[error("misaligned {width}-byte access at {addr:#010x}")]
    Misaligned {
        /// The offending guest address.
        addr: u32,
        /// Access width in bytes (1, 2, or 4).
        width: u32,
    },

    /// The access falls (partly) outside the mapped guest memory.
    #[error("{width}-byte access at {addr:#010x} is outside mapped memory")]
    OutOfRange {
        /// The offending guest address.
        addr: u32,
        /// Access width in bytes (1, 2, or 4).
        width: u32,
    },
}

/// Terminal simulator fault.
///
/// Surfaced as the simulation's final outcome, never swallowed mid-pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// Instruction encoding outside the supported MIPS-I subset.
    ///
    /// Guest code built against a richer MIPS may contain instructions this
    /// simulator does not model; they fault here rather than being skipped.
    #[error("illegal instruction {inst:#010x} at pc={pc:#010x}")]
    Decode {
        /// Program counter of the faulting instruction.
        pc: u32,
        /// Raw 32-bit encoding that failed to decode.
        inst: u32,
    },

    /// A load, store, or fetch faulted in the memory subsystem.
    #[error("memory fault at pc={pc:#010x}: {source}")]
    Memory {
        /// Program counter of the faulting instruction.
        pc: u32,
        /// The underlying memory subsystem fault.
        source: MemoryFault,
    },

    /// A trap with a syscall number outside the emulated set.
    ///
    /// The number is the guest-visible one, after base normalization.
    #[error("unsupported syscall {number} at pc={pc:#010x}")]
    UnsupportedSyscall {
        /// Program counter of the trap instruction.
        pc: u32,
        /// Normalized guest syscall number.
        number: u32,
    },

    /// The host's cycle budget expired; checked only between cycles.
    #[error("terminated by host after {cycles} cycles")]
    HostTerminated {
        /// Cycles executed before the budget ran out.
        cycles: u64,
    },
}

impl Fault {
    /// Program counter of the faulting instruction, where one exists.
    ///
    /// `HostTerminated` is not attached to any instruction and returns `None`.
    pub fn pc(&self) -> Option<u32> {
        match self {
            Fault::Decode { pc, .. }
            | Fault::Memory { pc, .. }
            | Fault::UnsupportedSyscall { pc, .. } => Some(*pc),
            Fault::HostTerminated { .. } => None,
        }
    }
}
