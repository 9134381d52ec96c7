//! MIPS Instruction Decoder.
//!
//! This module handles the decoding of 32-bit MIPS instruction encodings into
//! the structured `Decoded` format. It extracts the opcode, register indices,
//! shift amount, function code, the sign-extended immediate, and the 26-bit
//! jump target. Decoding is pure, deterministic, and side-effect free;
//! whether the combination of opcode and function code is *supported* is
//! decided by the decode stage's classification.

use crate::isa::instruction::{Decoded, InstructionBits};

/// Decodes a MIPS instruction word into its component fields.
///
/// The 16-bit immediate is sign-extended here; operations that need the
/// zero-extended or upper form (andi/ori/xori, lui) re-derive it from the
/// raw encoding at execute.
pub fn decode(inst: u32) -> Decoded {
    Decoded {
        raw: inst,
        op: inst.op(),
        rs: inst.rs(),
        rt: inst.rt(),
        rd: inst.rd(),
        shamt: inst.shamt(),
        funct: inst.funct(),
        imm: inst.imm16() as i16 as i32,
        target: inst.target(),
    }
}
