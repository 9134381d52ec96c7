//! MIPS Register File.
//!
//! This module implements the architectural register state for the simulator:
//! 1. **Storage:** 32 general-purpose registers plus the HI/LO multiply/divide pair.
//! 2. **Invariant Enforcement:** Register `$zero` is hardwired to zero.
//! 3. **Debugging:** Utilities for dumping the complete register state.

/// General-purpose register file plus the HI/LO pair.
///
/// Register index 0 (`$zero`) is hardwired to zero: reads always yield 0 and
/// writes are discarded. Indices are 5-bit fields extracted by the decoder,
/// so out-of-range indices cannot occur at runtime.
#[derive(Clone, Debug)]
pub struct RegisterFile {
    regs: [u32; 32],
    hi: u32,
    lo: u32,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self {
            regs: [0; 32],
            hi: 0,
            lo: 0,
        }
    }

    /// Reads a general-purpose register. `$zero` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a general-purpose register. Writes to `$zero` are ignored.
    ///
    /// Last writer wins; write ordering is enforced by the writeback stage,
    /// never by callers.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Reads the HI register (multiply high bits / division remainder).
    pub fn read_hi(&self) -> u32 {
        self.hi
    }

    /// Reads the LO register (multiply low bits / division quotient).
    pub fn read_lo(&self) -> u32 {
        self.lo
    }

    /// Commits a HI/LO pair produced by a multiply or divide.
    pub fn write_hilo(&mut self, hi: u32, lo: u32) {
        self.hi = hi;
        self.lo = lo;
    }

    /// Dumps the register state to stderr for debugging.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            eprintln!(
                "r{:<2}={:#010x} r{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
        eprintln!("hi ={:#010x} lo ={:#010x}", self.hi, self.lo);
    }
}
