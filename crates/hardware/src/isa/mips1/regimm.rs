//! REGIMM condition codes (the rt field of opcode 0x01).

/// Branch if rs < 0.
pub const BLTZ: u32 = 0x00;
/// Branch if rs >= 0.
pub const BGEZ: u32 = 0x01;
/// Branch if rs < 0 and link into `$ra`.
pub const BLTZAL: u32 = 0x10;
/// Branch if rs >= 0 and link into `$ra`; `bal` is this with rs = `$zero`.
pub const BGEZAL: u32 = 0x11;
