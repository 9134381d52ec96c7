//! Hazard Detection and Forwarding Tests.
//!
//! Builds pipeline latch values directly and checks the stall decisions and
//! the forwarding priority (closest producer wins).

use mipsim_core::common::error::{Fault, MemoryFault};
use mipsim_core::common::reg::RegisterFile;
use mipsim_core::core::pipeline::hazards::{
    forward_reg, forward_rs, need_stall_hilo, need_stall_load_use, need_stall_syscall_return,
};
use mipsim_core::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use mipsim_core::core::pipeline::signals::{ControlSignals, HiLoOp};
use pretty_assertions::assert_eq;

use crate::common::asm;

// ──────────────────────────────────────────────────────────
// Latch builders
// ──────────────────────────────────────────────────────────

/// An ID/EX entry for a load writing `dest`.
fn load_entry(dest: usize) -> IdEx {
    IdEx {
        valid: true,
        dest,
        ctrl: ControlSignals {
            mem_read: true,
            reg_write: true,
            ..ControlSignals::default()
        },
        ..IdEx::default()
    }
}

/// An ID/EX entry for an ALU write to `dest` (no load).
fn alu_entry(dest: usize) -> IdEx {
    IdEx {
        valid: true,
        dest,
        ctrl: ControlSignals {
            reg_write: true,
            ..ControlSignals::default()
        },
        ..IdEx::default()
    }
}

/// An IF/ID entry holding the given raw word.
fn if_id(inst: u32) -> IfId {
    IfId {
        valid: true,
        inst,
        ..IfId::default()
    }
}

// ══════════════════════════════════════════════════════════
// 1. Load-use stall detection
// ══════════════════════════════════════════════════════════

#[test]
fn stall_when_load_dest_matches_rs() {
    // lw $5, ...; then addu $3, $5, $0 in decode
    let id_ex = load_entry(5);
    let next = if_id(asm::addu(3, 5, 0));
    assert!(need_stall_load_use(&id_ex, &next), "use of $5 as rs → stall");
}

#[test]
fn stall_when_load_dest_matches_rt() {
    let id_ex = load_entry(7);
    let next = if_id(asm::addu(3, 0, 7));
    assert!(need_stall_load_use(&id_ex, &next), "use of $7 as rt → stall");
}

#[test]
fn no_stall_for_alu_producer() {
    let id_ex = alu_entry(5);
    let next = if_id(asm::addu(3, 5, 0));
    assert!(
        !need_stall_load_use(&id_ex, &next),
        "ALU results forward without a stall"
    );
}

#[test]
fn no_stall_without_dependency() {
    let id_ex = load_entry(5);
    let next = if_id(asm::addu(3, 6, 7));
    assert!(!need_stall_load_use(&id_ex, &next));
}

#[test]
fn no_stall_when_load_targets_zero_register() {
    let id_ex = load_entry(0);
    let next = if_id(asm::addu(3, 0, 0));
    assert!(!need_stall_load_use(&id_ex, &next));
}

#[test]
fn no_stall_for_bubbles() {
    assert!(!need_stall_load_use(&IdEx::default(), &if_id(asm::nop())));
    assert!(!need_stall_load_use(&load_entry(5), &IfId::default()));
}

#[test]
fn stall_when_syscall_waits_on_loaded_argument() {
    // lw $a0, ...; syscall: the trap samples $a0 in execute
    let id_ex = load_entry(4);
    let next = if_id(asm::syscall());
    assert!(need_stall_load_use(&id_ex, &next));
}

#[test]
fn no_stall_when_syscall_ignores_the_loaded_register() {
    let id_ex = load_entry(9); // $t1 is not a trap register
    let next = if_id(asm::syscall());
    assert!(!need_stall_load_use(&id_ex, &next));
}

// ══════════════════════════════════════════════════════════
// 2. Syscall return interlock
// ══════════════════════════════════════════════════════════

fn syscall_entry() -> IdEx {
    IdEx {
        valid: true,
        ctrl: ControlSignals {
            is_syscall: true,
            ..ControlSignals::default()
        },
        ..IdEx::default()
    }
}

#[test]
fn stall_v0_consumer_behind_syscall() {
    // the return value lands in $v0 only at dispatch, one stage later
    let next = if_id(asm::addu(8, 2, 0));
    assert!(need_stall_syscall_return(&syscall_entry(), &next));
}

#[test]
fn no_syscall_stall_for_unrelated_consumer() {
    let next = if_id(asm::addu(8, 9, 10));
    assert!(!need_stall_syscall_return(&syscall_entry(), &next));
}

#[test]
fn no_syscall_stall_without_trap() {
    let next = if_id(asm::addu(8, 2, 0));
    assert!(!need_stall_syscall_return(&alu_entry(5), &next));
}

// ══════════════════════════════════════════════════════════
// 3. HI/LO interlock
// ══════════════════════════════════════════════════════════

fn hilo_entry() -> IdEx {
    IdEx {
        valid: true,
        ctrl: ControlSignals {
            hilo: HiLoOp::Mult,
            ..ControlSignals::default()
        },
        ..IdEx::default()
    }
}

#[test]
fn stall_mflo_behind_mult() {
    assert!(need_stall_hilo(&hilo_entry(), &if_id(asm::mflo(3))));
}

#[test]
fn stall_mfhi_behind_mult() {
    assert!(need_stall_hilo(&hilo_entry(), &if_id(asm::mfhi(3))));
}

#[test]
fn no_hilo_stall_for_unrelated_instruction() {
    assert!(!need_stall_hilo(&hilo_entry(), &if_id(asm::addu(1, 2, 3))));
}

#[test]
fn no_hilo_stall_without_producer() {
    assert!(!need_stall_hilo(&alu_entry(5), &if_id(asm::mflo(3))));
}

// ══════════════════════════════════════════════════════════
// 4. Forwarding
// ══════════════════════════════════════════════════════════

fn consumer(rs: usize, rt: usize) -> IdEx {
    IdEx {
        valid: true,
        rs,
        rt,
        rv1: 0xAAAA,
        rv2: 0xBBBB,
        ..IdEx::default()
    }
}

fn ex_producer(dest: usize, alu: u32) -> ExMem {
    ExMem {
        valid: true,
        dest,
        alu,
        ctrl: ControlSignals {
            reg_write: true,
            ..ControlSignals::default()
        },
        ..ExMem::default()
    }
}

fn wb_producer(dest: usize, alu: u32) -> MemWb {
    MemWb {
        valid: true,
        dest,
        alu,
        ctrl: ControlSignals {
            reg_write: true,
            ..ControlSignals::default()
        },
        ..MemWb::default()
    }
}

#[test]
fn no_producers_leaves_register_file_values() {
    let (a, b) = forward_rs(&consumer(1, 2), &ExMem::default(), &MemWb::default());
    assert_eq!((a, b), (0xAAAA, 0xBBBB));
}

#[test]
fn ex_stage_result_forwards_to_rs() {
    let (a, b) = forward_rs(&consumer(1, 2), &ex_producer(1, 111), &MemWb::default());
    assert_eq!((a, b), (111, 0xBBBB));
}

#[test]
fn wb_stage_result_forwards_to_rt() {
    let (a, b) = forward_rs(&consumer(1, 2), &ExMem::default(), &wb_producer(2, 222));
    assert_eq!((a, b), (0xAAAA, 222));
}

#[test]
fn closest_producer_wins_the_tie_break() {
    // both stages wrote $1; the younger EX/MEM result must win
    let (a, _) = forward_rs(&consumer(1, 2), &ex_producer(1, 111), &wb_producer(1, 999));
    assert_eq!(a, 111);
}

#[test]
fn load_data_forwards_from_wb_latch() {
    let mut wb = wb_producer(1, 0);
    wb.ctrl.mem_read = true;
    wb.load_data = 55;
    let (a, _) = forward_rs(&consumer(1, 2), &ExMem::default(), &wb);
    assert_eq!(a, 55);
}

#[test]
fn loads_never_forward_from_ex_mem() {
    // a load's data does not exist yet in EX/MEM; the stall guarantees the
    // consumer arrives a cycle later, so this path must stay inert
    let mut ex = ex_producer(1, 0xDEAD);
    ex.ctrl.mem_read = true;
    let (a, _) = forward_rs(&consumer(1, 2), &ex, &MemWb::default());
    assert_eq!(a, 0xAAAA);
}

#[test]
fn link_producers_forward_the_return_address() {
    let mut ex = ex_producer(31, 0);
    ex.ctrl.link = true;
    ex.pc = 0x0040_0010;
    let (a, _) = forward_rs(&consumer(31, 2), &ex, &MemWb::default());
    assert_eq!(a, 0x0040_0014);
}

#[test]
fn register_zero_is_never_forwarded() {
    let (a, b) = forward_rs(&consumer(0, 0), &ex_producer(0, 111), &wb_producer(0, 222));
    assert_eq!((a, b), (0xAAAA, 0xBBBB));
}

#[test]
fn faulted_producers_are_skipped() {
    let mut ex = ex_producer(1, 111);
    ex.fault = Some(Fault::Memory {
        pc: 0,
        source: MemoryFault::Misaligned { addr: 1, width: 4 },
    });
    let (a, _) = forward_rs(&consumer(1, 2), &ex, &MemWb::default());
    assert_eq!(a, 0xAAAA, "a faulting instruction must not forward");
}

#[test]
fn forward_reg_sees_in_flight_producers() {
    let mut regs = RegisterFile::new();
    regs.write(4, 7);
    let val = forward_reg(4, &regs, &ex_producer(4, 42), &MemWb::default());
    assert_eq!(val, 42);

    let val = forward_reg(4, &regs, &ExMem::default(), &wb_producer(4, 41));
    assert_eq!(val, 41);

    let val = forward_reg(4, &regs, &ExMem::default(), &MemWb::default());
    assert_eq!(val, 7, "falls back to the register file");
}
