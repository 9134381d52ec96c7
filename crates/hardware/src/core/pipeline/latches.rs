//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the state carried between the five pipeline stages:
//! Fetch -> Decode -> Execute -> Memory -> Writeback.
//!
//! 1. **Instruction Flow:** One latch type per stage boundary.
//! 2. **Bubbles:** `valid == false` marks a bubble; `Default` is the bubble.
//! 3. **Fault Propagation:** Faults ride the latches to writeback so older
//!    instructions retire first and the faulting one never commits.

use crate::common::constants::WORD_SIZE;
use crate::common::error::Fault;
use crate::core::pipeline::signals::ControlSignals;
use crate::sim::syscall::SyscallRequest;

/// IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, Default)]
pub struct IfId {
    /// Latch holds a real instruction; false is a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding.
    pub inst: u32,
    /// Fault raised while fetching, if any.
    pub fault: Option<Fault>,
}

/// ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug, Default)]
pub struct IdEx {
    /// Latch holds a real instruction; false is a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding.
    pub inst: u32,
    /// rs source register index.
    pub rs: usize,
    /// rt register index.
    pub rt: usize,
    /// Destination register selected at decode (rd, rt, or `$ra`).
    pub dest: usize,
    /// Sign-extended immediate.
    pub imm: i32,
    /// 26-bit jump target field.
    pub target: u32,
    /// Shift amount.
    pub shamt: u32,
    /// rs value read from the register file at decode (pre-forwarding).
    pub rv1: u32,
    /// rt value read from the register file at decode (pre-forwarding).
    pub rv2: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Fault raised during fetch or decode, if any.
    pub fault: Option<Fault>,
}

/// EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug, Default)]
pub struct ExMem {
    /// Latch holds a real instruction; false is a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub dest: usize,
    /// ALU result, or the effective address for memory operations.
    pub alu: u32,
    /// Data to be stored (forwarded rt value).
    pub store_data: u32,
    /// HI/LO pair produced by a multiply or divide, committed at writeback.
    pub hilo: Option<(u32, u32)>,
    /// Captured syscall arguments awaiting dispatch in the memory stage.
    pub syscall: Option<SyscallRequest>,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
    /// Fault raised in an earlier stage, if any.
    pub fault: Option<Fault>,
}

/// MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, Default)]
pub struct MemWb {
    /// Latch holds a real instruction; false is a bubble.
    pub valid: bool,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw 32-bit instruction encoding.
    pub inst: u32,
    /// Destination register index.
    pub dest: usize,
    /// ALU result (non-load instructions), or a syscall return value.
    pub alu: u32,
    /// Data loaded from memory (load instructions).
    pub load_data: u32,
    /// HI/LO pair to commit at writeback.
    pub hilo: Option<(u32, u32)>,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
    /// Fault raised in an earlier stage, if any.
    pub fault: Option<Fault>,
}

impl MemWb {
    /// The value this instruction commits to its destination register.
    ///
    /// Loads commit the loaded data, links commit the return address, and
    /// everything else commits the ALU result (HI/LO moves resolve into the
    /// ALU slot at execute).
    pub fn writeback_value(&self) -> u32 {
        if self.ctrl.mem_read {
            self.load_data
        } else if self.ctrl.link {
            self.pc.wrapping_add(WORD_SIZE)
        } else {
            self.alu
        }
    }
}
