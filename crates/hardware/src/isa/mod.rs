//! MIPS-I instruction set support.

/// O32 ABI register names and guest syscall numbers.
pub mod abi;
/// Instruction word decoding into structured fields.
pub mod decode;
/// Instruction disassembler for debug tracing and test diagnostics.
pub mod disasm;
/// Field-extraction trait and the `Decoded` structure.
pub mod instruction;
/// MIPS-I encoding constants (opcodes, SPECIAL functs, REGIMM codes).
pub mod mips1;
