//! Instruction encoding utilities.
//!
//! Provides bit extraction for the MIPS-I field layout and the `Decoded`
//! structure produced by the decoder. MIPS-I packs fields as
//! `op[31:26] rs[25:21] rt[20:16] rd[15:11] shamt[10:6] funct[5:0]` for
//! R-format, with the low 16 bits doubling as the immediate for I-format and
//! the low 26 bits as the target for J-format.

use crate::common::constants::{
    FUNCT_MASK, IMM16_MASK, OPCODE_MASK, OPCODE_SHIFT, RD_SHIFT, REG_MASK, RS_SHIFT, RT_SHIFT,
    SHAMT_MASK, SHAMT_SHIFT, TARGET_MASK,
};

/// Trait for extracting MIPS instruction fields from encoded words.
pub trait InstructionBits {
    /// Extracts the major opcode (bits 26-31).
    fn op(&self) -> u32;

    /// Extracts the rs source register index (bits 21-25).
    fn rs(&self) -> usize;

    /// Extracts the rt register index (bits 16-20).
    ///
    /// rt is a source for R-format and stores, and the destination for most
    /// I-format instructions. For REGIMM branches it carries the condition.
    fn rt(&self) -> usize;

    /// Extracts the rd destination register index (bits 11-15).
    fn rd(&self) -> usize;

    /// Extracts the shift amount (bits 6-10).
    fn shamt(&self) -> u32;

    /// Extracts the function code of R-format instructions (bits 0-5).
    fn funct(&self) -> u32;

    /// Extracts the raw 16-bit immediate (bits 0-15), not yet extended.
    fn imm16(&self) -> u32;

    /// Extracts the 26-bit jump target field (bits 0-25).
    fn target(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn op(&self) -> u32 {
        (self >> OPCODE_SHIFT) & OPCODE_MASK
    }

    #[inline(always)]
    fn rs(&self) -> usize {
        ((self >> RS_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rt(&self) -> usize {
        ((self >> RT_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn rd(&self) -> usize {
        ((self >> RD_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn shamt(&self) -> u32 {
        (self >> SHAMT_SHIFT) & SHAMT_MASK
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        self & IMM16_MASK
    }

    #[inline(always)]
    fn target(&self) -> u32 {
        self & TARGET_MASK
    }
}

/// Decoded instruction fields.
///
/// Pure field extraction of a 32-bit word; immutable once produced.
/// Classification into control signals happens in the decode stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct Decoded {
    /// Raw 32-bit instruction encoding.
    pub raw: u32,
    /// Major opcode.
    pub op: u32,
    /// rs source register index.
    pub rs: usize,
    /// rt register index.
    pub rt: usize,
    /// rd destination register index.
    pub rd: usize,
    /// Shift amount.
    pub shamt: u32,
    /// R-format function code.
    pub funct: u32,
    /// Sign-extended 16-bit immediate.
    pub imm: i32,
    /// 26-bit jump target field.
    pub target: u32,
}
