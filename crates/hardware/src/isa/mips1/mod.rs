//! MIPS-I encoding constants.

/// Function codes for the SPECIAL (R-format) opcode group.
pub mod funct;
/// Major opcode values.
pub mod opcodes;
/// Condition codes carried in the rt field of REGIMM branches.
pub mod regimm;
