//! The five pipeline stage functions.
//!
//! Each stage consumes its input latch and produces the next one. The
//! controller runs them writeback-first so no stage ever observes a value
//! produced in the same cycle, modeling hardware latch timing.

/// Instruction decode (ID) stage and control-signal classification.
pub mod decode;
/// Execute (EX) stage: ALU, control transfers, syscall capture.
pub mod execute;
/// Instruction fetch (IF) stage.
pub mod fetch;
/// Memory access (MEM) stage and syscall dispatch.
pub mod memory;
/// Writeback (WB) stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::mem_stage;
pub use writeback::wb_stage;
