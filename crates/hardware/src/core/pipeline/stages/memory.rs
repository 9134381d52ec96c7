//! Memory Access (MEM) Stage.
//!
//! Issues loads and stores against the memory subsystem at the effective
//! address computed in execute, and dispatches syscalls. By the time an
//! instruction reaches this stage every older instruction has retired, so
//! syscall side effects land in exact retirement order and an older fault
//! always halts the machine before a younger trap can emit output.

use crate::common::error::Fault;
use crate::core::cpu::{Cpu, HaltReason};
use crate::core::pipeline::latches::MemWb;
use crate::core::pipeline::signals::MemWidth;
use crate::isa::abi;
use crate::sim::syscall::{SyscallOutcome, dispatch};

/// Executes the memory stage of the pipeline.
pub fn mem_stage(cpu: &mut Cpu) {
    let ex = cpu.ex_mem;
    if !ex.valid {
        cpu.mem_wb = MemWb::default();
        return;
    }

    if let Some(fault) = ex.fault {
        cpu.mem_wb = MemWb {
            valid: true,
            pc: ex.pc,
            inst: ex.inst,
            dest: ex.dest,
            ctrl: ex.ctrl,
            fault: Some(fault),
            ..MemWb::default()
        };
        return;
    }

    if cpu.trace {
        eprintln!("MEM pc={:#010x} inst={:#010x}", ex.pc, ex.inst);
    }

    let mut load_data = 0;
    let mut fault = None;

    if ex.ctrl.mem_read {
        let loaded = match (ex.ctrl.width, ex.ctrl.signed_load) {
            (MemWidth::Byte, true) => cpu.mem.load_u8(ex.alu).map(|v| v as i8 as i32 as u32),
            (MemWidth::Byte, false) => cpu.mem.load_u8(ex.alu).map(u32::from),
            (MemWidth::Half, true) => cpu.mem.load_u16(ex.alu).map(|v| v as i16 as i32 as u32),
            (MemWidth::Half, false) => cpu.mem.load_u16(ex.alu).map(u32::from),
            (MemWidth::Word, _) => cpu.mem.load_u32(ex.alu),
            (MemWidth::Nop, _) => Ok(0),
        };
        match loaded {
            Ok(v) => load_data = v,
            Err(source) => fault = Some(Fault::Memory { pc: ex.pc, source }),
        }
    } else if ex.ctrl.mem_write {
        let stored = match ex.ctrl.width {
            MemWidth::Byte => cpu.mem.store_u8(ex.alu, ex.store_data as u8),
            MemWidth::Half => cpu.mem.store_u16(ex.alu, ex.store_data as u16),
            MemWidth::Word => cpu.mem.store_u32(ex.alu, ex.store_data),
            MemWidth::Nop => Ok(()),
        };
        if let Err(source) = stored {
            fault = Some(Fault::Memory { pc: ex.pc, source });
        }
    }

    let mut ctrl = ex.ctrl;
    let mut dest = ex.dest;
    let mut alu = ex.alu;

    if let Some(req) = ex.syscall {
        match dispatch(&mut cpu.console, &req) {
            SyscallOutcome::Return(val) => {
                // result flows to $v0 through the normal writeback path
                ctrl.reg_write = true;
                dest = abi::REG_V0;
                alu = val;
                cpu.stats.syscalls += 1;
            }
            SyscallOutcome::Exit(status) => {
                cpu.stats.syscalls += 1;
                cpu.halt_with(HaltReason::Exit { status });
                return;
            }
            SyscallOutcome::Unsupported(number) => {
                fault = Some(Fault::UnsupportedSyscall { pc: ex.pc, number });
            }
        }
    }

    cpu.mem_wb = MemWb {
        valid: true,
        pc: ex.pc,
        inst: ex.inst,
        dest,
        alu,
        load_data,
        hilo: ex.hilo,
        ctrl,
        fault,
    };
}
