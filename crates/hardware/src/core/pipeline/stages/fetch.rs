//! Instruction Fetch (IF) Stage.

use crate::common::constants::WORD_SIZE;
use crate::common::error::Fault;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IfId;

/// Executes the instruction fetch stage of the pipeline.
///
/// Reads one word at the current PC into the IF/ID latch and advances the
/// PC. A fetch that faults (unmapped or misaligned PC) parks the fault in
/// the latch so it drains to writeback behind any older instructions; the
/// PC is left in place since nothing younger may run.
pub fn fetch_stage(cpu: &mut Cpu) {
    let pc = cpu.pc;
    match cpu.mem.load_u32(pc) {
        Ok(inst) => {
            if cpu.trace {
                eprintln!("IF  pc={pc:#010x} inst={inst:#010x}");
            }
            cpu.if_id = IfId {
                valid: true,
                pc,
                inst,
                fault: None,
            };
            cpu.pc = pc.wrapping_add(WORD_SIZE);
        }
        Err(source) => {
            if cpu.trace {
                eprintln!("IF  pc={pc:#010x} # FAULT: {source}");
            }
            cpu.if_id = IfId {
                valid: true,
                pc,
                inst: 0,
                fault: Some(Fault::Memory { pc, source }),
            };
        }
    }
}
