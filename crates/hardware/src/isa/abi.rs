//! MIPS O32 ABI register names and guest syscall numbers.

/// Register 0 (`$zero`, hardwired to zero).
pub const REG_ZERO: usize = 0;
/// Register 2 (`$v0`, syscall number and return value).
pub const REG_V0: usize = 2;
/// Register 3 (`$v1`, second return value).
pub const REG_V1: usize = 3;
/// Register 4 (`$a0`, first argument).
pub const REG_A0: usize = 4;
/// Register 5 (`$a1`, second argument).
pub const REG_A1: usize = 5;
/// Register 6 (`$a2`, third argument).
pub const REG_A2: usize = 6;
/// Register 7 (`$a3`, fourth argument).
pub const REG_A3: usize = 7;
/// Register 29 (`$sp`, stack pointer).
pub const REG_SP: usize = 29;
/// Register 31 (`$ra`, return address).
pub const REG_RA: usize = 31;

/// The registers a trap samples: `$v0` plus the four argument registers.
pub const SYSCALL_REGS: [usize; 5] = [REG_V0, REG_A0, REG_A1, REG_A2, REG_A3];

/// Guest syscall numbers, after base normalization.
///
/// Number 0 is the libc `syscall()` indirection: the real number rides in
/// `$a0` and the remaining arguments shift down one slot.
pub const SYS_INDIRECT: u32 = 0;
/// Print a signed integer from `$a0` to the console stream.
pub const SYS_PRINT_INT: u32 = 1;
/// Terminate the guest with the exit status in `$a0`.
pub const SYS_EXIT: u32 = 10;
