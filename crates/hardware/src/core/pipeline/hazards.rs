//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Load-use and HI/LO interlock stalls.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by
//!    bypassing the register file. The closest (most recently issued)
//!    producer always wins.
//!
//! Decisions are made once per cycle from the latch snapshot after execute
//! has run and are never persisted.

use crate::common::reg::RegisterFile;
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::isa::abi;
use crate::isa::instruction::InstructionBits;
use crate::isa::mips1::{funct, opcodes};

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction waiting in IF/ID depends on
/// data still being loaded by the instruction that just left execute. The
/// loaded value only becomes forwardable after the memory stage, so exactly
/// one bubble is inserted.
///
/// The rs/rt comparison is done on the raw IF/ID word, which is conservative
/// for formats whose rt field is a destination. A syscall word encodes no
/// source fields, so its sampled argument registers are checked instead.
pub fn need_stall_load_use(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.valid || !id_ex.ctrl.mem_read || id_ex.dest == 0 || !if_id.valid {
        return false;
    }

    if is_syscall_word(if_id.inst) {
        return abi::SYSCALL_REGS.contains(&id_ex.dest);
    }

    id_ex.dest == if_id.inst.rs() || id_ex.dest == if_id.inst.rt()
}

/// Checks if a stall is needed behind an in-flight syscall.
///
/// A syscall's return value lands in `$v0` only when the trap dispatches in
/// the memory stage, so it behaves like a load of `$v0`: a consumer
/// immediately behind it waits one cycle, then picks the value up from the
/// MEM/WB snapshot.
pub fn need_stall_syscall_return(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.valid || !id_ex.ctrl.is_syscall || !if_id.valid {
        return false;
    }

    if_id.inst.rs() == abi::REG_V0 || if_id.inst.rt() == abi::REG_V0
}

/// Checks if a HI/LO interlock stall is needed.
///
/// `mfhi`/`mflo` read HI/LO directly in execute, and multiply/divide results
/// commit at writeback without a forwarding path. The move waits in decode
/// until the producer is one writeback away, which costs at most one bubble
/// for a back-to-back `mult`/`mflo` pair.
pub fn need_stall_hilo(id_ex: &IdEx, if_id: &IfId) -> bool {
    if !id_ex.valid || !id_ex.ctrl.writes_hilo() || !if_id.valid {
        return false;
    }

    if_id.inst.op() == opcodes::OP_SPECIAL
        && matches!(if_id.inst.funct(), funct::MFHI | funct::MFLO)
}

fn is_syscall_word(inst: u32) -> bool {
    inst.op() == opcodes::OP_SPECIAL && inst.funct() == funct::SYSCALL
}

fn producer_value_ex(entry: &ExMem) -> u32 {
    if entry.ctrl.link {
        entry.pc.wrapping_add(4)
    } else {
        entry.alu
    }
}

fn forwards(entry_write: bool, entry_fault: Option<&crate::common::error::Fault>) -> bool {
    entry_write && entry_fault.is_none()
}

/// Forwards register values from later pipeline stages to resolve RAW hazards.
///
/// Returns the `(rs, rt)` operand values for the instruction entering
/// execute. The MEM/WB snapshot (two instructions ahead) is applied first and
/// the EX/MEM latch (one ahead) second, so the closest producer overwrites:
/// the tie-break when both wrote the same register. Loads are skipped in
/// EX/MEM; the load-use stall guarantees their consumers arrive one cycle
/// later, when the data sits in the MEM/WB snapshot.
pub fn forward_rs(id_ex: &IdEx, ex_mem: &ExMem, mem_wb: &MemWb) -> (u32, u32) {
    let mut a = id_ex.rv1;
    let mut b = id_ex.rv2;

    if mem_wb.valid && forwards(mem_wb.ctrl.reg_write, mem_wb.fault.as_ref()) && mem_wb.dest != 0 {
        let wb_val = mem_wb.writeback_value();
        if mem_wb.dest == id_ex.rs {
            a = wb_val;
        }
        if mem_wb.dest == id_ex.rt {
            b = wb_val;
        }
    }

    if ex_mem.valid
        && forwards(ex_mem.ctrl.reg_write, ex_mem.fault.as_ref())
        && ex_mem.dest != 0
        && !ex_mem.ctrl.mem_read
    {
        let ex_val = producer_value_ex(ex_mem);
        if ex_mem.dest == id_ex.rs {
            a = ex_val;
        }
        if ex_mem.dest == id_ex.rt {
            b = ex_val;
        }
    }

    (a, b)
}

/// Forwarded view of a single architectural register.
///
/// Used by the syscall path to sample `$v0` and `$a0`..`$a3` with in-flight
/// results applied, mirroring `forward_rs` for an arbitrary register index.
pub fn forward_reg(idx: usize, regs: &RegisterFile, ex_mem: &ExMem, mem_wb: &MemWb) -> u32 {
    let mut val = regs.read(idx);
    if idx == 0 {
        return val;
    }

    if mem_wb.valid
        && forwards(mem_wb.ctrl.reg_write, mem_wb.fault.as_ref())
        && mem_wb.dest == idx
    {
        val = mem_wb.writeback_value();
    }

    if ex_mem.valid
        && forwards(ex_mem.ctrl.reg_write, ex_mem.fault.as_ref())
        && ex_mem.dest == idx
        && !ex_mem.ctrl.mem_read
    {
        val = producer_value_ex(ex_mem);
    }

    val
}
