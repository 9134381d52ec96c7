//! Function codes for SPECIAL (R-format) instructions (bits 0-5).

/// Shift left logical by shamt.
pub const SLL: u32 = 0x00;
/// Shift right logical by shamt.
pub const SRL: u32 = 0x02;
/// Shift right arithmetic by shamt.
pub const SRA: u32 = 0x03;
/// Shift left logical by rs.
pub const SLLV: u32 = 0x04;
/// Shift right logical by rs.
pub const SRLV: u32 = 0x06;
/// Shift right arithmetic by rs.
pub const SRAV: u32 = 0x07;
/// Jump to the address in rs.
pub const JR: u32 = 0x08;
/// Jump to the address in rs, linking into rd.
pub const JALR: u32 = 0x09;
/// System call trap.
pub const SYSCALL: u32 = 0x0C;
/// Move from HI.
pub const MFHI: u32 = 0x10;
/// Move from LO.
pub const MFLO: u32 = 0x12;
/// Multiply (signed), result into HI/LO.
pub const MULT: u32 = 0x18;
/// Multiply unsigned, result into HI/LO.
pub const MULTU: u32 = 0x19;
/// Divide (signed), quotient into LO, remainder into HI.
pub const DIV: u32 = 0x1A;
/// Divide unsigned, quotient into LO, remainder into HI.
pub const DIVU: u32 = 0x1B;
/// Add (executed wrapping; overflow traps are not modeled).
pub const ADD: u32 = 0x20;
/// Add unsigned.
pub const ADDU: u32 = 0x21;
/// Subtract (executed wrapping; overflow traps are not modeled).
pub const SUB: u32 = 0x22;
/// Subtract unsigned.
pub const SUBU: u32 = 0x23;
/// Bitwise AND.
pub const AND: u32 = 0x24;
/// Bitwise OR.
pub const OR: u32 = 0x25;
/// Bitwise XOR.
pub const XOR: u32 = 0x26;
/// Bitwise NOR.
pub const NOR: u32 = 0x27;
/// Set on less than (signed).
pub const SLT: u32 = 0x2A;
/// Set on less than unsigned.
pub const SLTU: u32 = 0x2B;
