//! Major opcode values (bits 26-31).

/// R-format group; the operation is selected by the funct field.
pub const OP_SPECIAL: u32 = 0x00;
/// Branch-on-register-sign group; the condition is in the rt field.
pub const OP_REGIMM: u32 = 0x01;
/// Unconditional absolute jump.
pub const OP_J: u32 = 0x02;
/// Jump and link (`$ra`).
pub const OP_JAL: u32 = 0x03;
/// Branch if equal.
pub const OP_BEQ: u32 = 0x04;
/// Branch if not equal.
pub const OP_BNE: u32 = 0x05;
/// Add immediate.
pub const OP_ADDI: u32 = 0x08;
/// Add immediate unsigned.
pub const OP_ADDIU: u32 = 0x09;
/// Set on less than immediate (signed).
pub const OP_SLTI: u32 = 0x0A;
/// Set on less than immediate unsigned.
pub const OP_SLTIU: u32 = 0x0B;
/// AND with zero-extended immediate.
pub const OP_ANDI: u32 = 0x0C;
/// OR with zero-extended immediate.
pub const OP_ORI: u32 = 0x0D;
/// XOR with zero-extended immediate.
pub const OP_XORI: u32 = 0x0E;
/// Load upper immediate.
pub const OP_LUI: u32 = 0x0F;
/// Load byte (sign-extended).
pub const OP_LB: u32 = 0x20;
/// Load halfword (sign-extended).
pub const OP_LH: u32 = 0x21;
/// Load word.
pub const OP_LW: u32 = 0x23;
/// Load byte unsigned.
pub const OP_LBU: u32 = 0x24;
/// Load halfword unsigned.
pub const OP_LHU: u32 = 0x25;
/// Store byte.
pub const OP_SB: u32 = 0x28;
/// Store halfword.
pub const OP_SH: u32 = 0x29;
/// Store word.
pub const OP_SW: u32 = 0x2B;
