//! Writeback (WB) Stage.
//!
//! Commits results to the register file and HI/LO, updates retirement
//! statistics, and halts the controller when a fault arrives. A faulting
//! instruction commits nothing.

use crate::core::cpu::{Cpu, HaltReason};

/// Executes the writeback stage of the pipeline.
pub fn wb_stage(cpu: &mut Cpu) {
    let wb = cpu.mem_wb;
    if !wb.valid {
        return;
    }

    if let Some(fault) = wb.fault {
        if cpu.trace {
            eprintln!("WB  pc={:#010x} # FAULT: {fault}", wb.pc);
        }
        cpu.halt_with(HaltReason::Fault(fault));
        return;
    }

    if cpu.trace {
        eprintln!("WB  pc={:#010x} inst={:#010x}", wb.pc, wb.inst);
    }

    cpu.stats.instructions_retired += 1;
    if wb.ctrl.mem_read {
        cpu.stats.inst_load += 1;
    } else if wb.ctrl.mem_write {
        cpu.stats.inst_store += 1;
    } else if wb.ctrl.branch || wb.ctrl.jump {
        cpu.stats.inst_branch += 1;
    } else if wb.ctrl.is_syscall {
        cpu.stats.inst_syscall += 1;
    } else {
        cpu.stats.inst_alu += 1;
    }

    if let Some((hi, lo)) = wb.hilo {
        cpu.regs.write_hilo(hi, lo);
    }

    if wb.ctrl.reg_write && wb.dest != 0 {
        let val = wb.writeback_value();
        if cpu.trace {
            eprintln!("WB  pc={:#010x} r{} <= {:#x}", wb.pc, wb.dest, val);
        }
        cpu.regs.write(wb.dest, val);
    }
}
