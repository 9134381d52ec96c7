//! End-to-End Guest Programs.
//!
//! Hand-assembled programs mirroring the conformance fixture: print the
//! length of `"hello world\n"`, print 0..10, optionally issue syscall 44,
//! then exit 42. Plus fault paths, forwarding-through-memory programs, and
//! the determinism property.

use mipsim_core::common::error::{Fault, MemoryFault};
use mipsim_core::core::cpu::HaltReason;
use pretty_assertions::assert_eq;

use crate::common::asm::{self, reg};
use crate::common::harness::{TEXT_BASE, TestContext, test_config};

const HELLO: &[u8] = b"hello world\n";

/// Shared fixture body: compute strlen of the data segment via `lbu`, print
/// it, then print 0..=10. Falls through to whatever the caller appends.
fn fixture_prefix() -> Vec<u32> {
    vec![
        // $t0 = &data, $t2 = 0
        asm::lui(reg::T0, 0x0041),
        asm::ori(reg::T0, reg::T0, 0x0000),
        asm::addiu(reg::T2, reg::ZERO, 0),
        // strlen loop (the trailing NUL comes from zero-filled memory)
        asm::lbu(reg::T1, 0, reg::T0), // idx 3: loop head
        asm::beq(reg::T1, reg::ZERO, 3), // -> idx 8
        asm::addiu(reg::T2, reg::T2, 1),
        asm::addiu(reg::T0, reg::T0, 1),
        asm::j(TEXT_BASE + 3 * 4),
        // print $t2 through libc-style syscall(1, len)
        asm::addiu(reg::V0, reg::ZERO, 4000), // idx 8
        asm::addiu(reg::A0, reg::ZERO, 1),
        asm::addu(reg::A1, reg::T2, reg::ZERO),
        asm::syscall(),
        // for (i = 0; i <= 10; ++i) syscall(1, i)
        asm::addiu(reg::S0, reg::ZERO, 0), // idx 12
        asm::addiu(reg::V0, reg::ZERO, 4000), // idx 13: loop head
        asm::addiu(reg::A0, reg::ZERO, 1),
        asm::addu(reg::A1, reg::S0, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::S0, reg::S0, 1),
        asm::slti(reg::T1, reg::S0, 11),
        asm::bne(reg::T1, reg::ZERO, -7), // idx 19 -> idx 13
    ]
}

fn exit_42() -> Vec<u32> {
    vec![
        asm::addiu(reg::V0, reg::ZERO, 4000),
        asm::addiu(reg::A0, reg::ZERO, 10),
        asm::addiu(reg::A1, reg::ZERO, 42),
        asm::syscall(),
    ]
}

fn scenario_a() -> Vec<u32> {
    let mut prog = fixture_prefix();
    prog.extend(exit_42());
    prog
}

fn scenario_b() -> Vec<u32> {
    let mut prog = fixture_prefix();
    // syscall(44, 5, 6), outside the emulated set
    prog.extend([
        asm::addiu(reg::V0, reg::ZERO, 4000),
        asm::addiu(reg::A0, reg::ZERO, 44),
        asm::addiu(reg::A1, reg::ZERO, 5),
        asm::addiu(reg::A2, reg::ZERO, 6),
        asm::syscall(), // idx 24
    ]);
    prog.extend(exit_42());
    prog
}

// ══════════════════════════════════════════════════════════
// 1. The conformance fixture
// ══════════════════════════════════════════════════════════

#[test]
fn scenario_a_prints_strlen_then_zero_to_ten_then_exits_42() {
    let out = TestContext::new()
        .load_program_with_data(&scenario_a(), HELLO)
        .run();

    assert_eq!(out.reason, HaltReason::Exit { status: 42 });
    assert_eq!(out.values, vec![12, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(out.output, "12\n0\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n");
    assert_eq!(out.fault_pc, None);
}

#[test]
fn scenario_b_halts_on_syscall_44_with_output_preserved() {
    let out = TestContext::new()
        .load_program_with_data(&scenario_b(), HELLO)
        .run();

    let pc = TEXT_BASE + 24 * 4;
    assert_eq!(
        out.reason,
        HaltReason::Fault(Fault::UnsupportedSyscall { pc, number: 44 })
    );
    assert_eq!(out.fault_pc, Some(pc));
    assert_eq!(
        out.values,
        vec![12, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10],
        "output emitted before the fault is preserved"
    );
}

#[test]
fn reruns_are_bit_identical() {
    let run = || {
        TestContext::new()
            .load_program_with_data(&scenario_a(), HELLO)
            .run()
    };
    let first = run();
    let second = run();
    assert_eq!(first, second, "same image and entry point, same outcome");
}

// ══════════════════════════════════════════════════════════
// 2. Forwarding and memory traffic end to end
// ══════════════════════════════════════════════════════════

#[test]
fn load_use_pair_produces_the_correct_sum() {
    // data word 7 at the data base; lw then an immediately dependent addu
    let prog = [
        asm::lui(reg::T0, 0x0041),
        asm::lw(reg::T1, 0, reg::T0),
        asm::addu(reg::T2, reg::T1, reg::T1),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let mut ctx = TestContext::new().load_program_with_data(&prog, &[0, 0, 0, 7]);
    let out = ctx.run();
    assert_eq!(out.reason, HaltReason::Exit { status: 0 });
    assert_eq!(out.values, vec![14]);
    assert!(ctx.sim.cpu.stats.stalls_data >= 1, "load-use must stall once");
}

#[test]
fn syscall_return_value_reaches_an_immediate_consumer() {
    // print(5) returns 0 in $v0; the very next instruction copies $v0
    let prog = [
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addiu(reg::A0, reg::ZERO, 5),
        asm::syscall(),
        asm::addu(reg::T0, reg::V0, reg::ZERO),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T0, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(out.reason, HaltReason::Exit { status: 0 });
    assert_eq!(out.values, vec![5, 0], "print must return 0 through $v0");
}

#[test]
fn store_then_load_round_trips_through_guest_memory() {
    let prog = [
        asm::addiu(reg::T0, reg::ZERO, 0x100),
        asm::addiu(reg::T1, reg::ZERO, 1234),
        asm::sw(reg::T1, 0, reg::T0),
        asm::lw(reg::T2, 0, reg::T0),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(out.reason, HaltReason::Exit { status: 0 });
    assert_eq!(out.values, vec![1234]);
}

#[test]
fn alu_chain_with_byte_traffic() {
    let prog = [
        asm::addiu(reg::T0, reg::ZERO, -8),
        asm::sra(reg::T1, reg::T0, 2),          // -2
        asm::subu(reg::T2, reg::ZERO, reg::T1), // 2
        asm::addi(reg::T3, reg::T2, 5),         // 7
        asm::and(reg::S0, reg::T3, reg::T2),    // 2
        asm::sb(reg::T3, 0x200, reg::ZERO),
        asm::lb(reg::T2, 0x200, reg::ZERO), // 7 back from memory
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::S0, reg::ZERO),
        asm::syscall(), // 2
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(), // 7
        asm::slt(reg::T1, reg::T0, reg::ZERO),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T1, reg::ZERO),
        asm::syscall(), // 1
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(out.reason, HaltReason::Exit { status: 0 });
    assert_eq!(out.values, vec![2, 7, 1]);
}

#[test]
fn mult_and_mflo_with_interlock() {
    let prog = [
        asm::addiu(reg::T0, reg::ZERO, 7),
        asm::addiu(reg::T1, reg::ZERO, 6),
        asm::mult(reg::T0, reg::T1),
        asm::mflo(reg::T2),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let mut ctx = TestContext::new().load_program(&prog);
    let out = ctx.run();
    assert_eq!(out.reason, HaltReason::Exit { status: 0 });
    assert_eq!(out.values, vec![42]);
    assert!(ctx.sim.cpu.stats.stalls_data >= 1, "mult/mflo must interlock");
}

#[test]
fn mfhi_sees_the_high_product() {
    // 0x10000 * 0x10000 = 2^32: HI = 1, LO = 0
    let prog = [
        asm::lui(reg::T0, 1),
        asm::mult(reg::T0, reg::T0),
        asm::mfhi(reg::T2),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(out.values, vec![1]);
}

#[test]
fn div_splits_quotient_and_remainder() {
    let prog = [
        asm::addiu(reg::T0, reg::ZERO, 43),
        asm::addiu(reg::T1, reg::ZERO, 5),
        asm::div(reg::T0, reg::T1),
        asm::mflo(reg::T2),
        asm::mfhi(reg::T3),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T2, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::V0, reg::ZERO, 4001),
        asm::addu(reg::A0, reg::T3, reg::ZERO),
        asm::syscall(),
        asm::addiu(reg::A0, reg::ZERO, 0),
        asm::addiu(reg::V0, reg::ZERO, 4010),
        asm::syscall(),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(out.values, vec![8, 3]);
}

// ══════════════════════════════════════════════════════════
// 3. Fault paths
// ══════════════════════════════════════════════════════════

#[test]
fn illegal_instruction_halts_with_decode_fault() {
    let out = TestContext::new().load_program(&[0xFC00_0000]).run();
    assert_eq!(
        out.reason,
        HaltReason::Fault(Fault::Decode {
            pc: TEXT_BASE,
            inst: 0xFC00_0000
        })
    );
    assert_eq!(out.fault_pc, Some(TEXT_BASE));
    assert!(out.values.is_empty());
    assert_eq!(out.instructions, 0);
}

#[test]
fn misaligned_load_faults_without_partial_commit() {
    let prog = [
        asm::addiu(reg::T1, reg::ZERO, 55),
        asm::lw(reg::T1, 1, reg::ZERO), // address 1: misaligned
        asm::addiu(reg::S0, reg::ZERO, 77), // younger; must not commit
        asm::addiu(reg::S1, reg::ZERO, 88),
    ];
    let mut ctx = TestContext::new().load_program(&prog);
    let out = ctx.run();
    assert_eq!(
        out.reason,
        HaltReason::Fault(Fault::Memory {
            pc: TEXT_BASE + 4,
            source: MemoryFault::Misaligned { addr: 1, width: 4 },
        })
    );
    assert_eq!(ctx.reg(9), 55, "the faulting load must not clobber $t1");
    assert_eq!(ctx.reg(16), 0, "instructions behind the fault never retire");
    assert_eq!(ctx.reg(17), 0);
}

#[test]
fn out_of_range_access_faults() {
    let prog = [
        asm::lui(reg::T0, 0x7FF0), // far beyond the 16 MiB guest region
        asm::lw(reg::T1, 0, reg::T0),
    ];
    let out = TestContext::new().load_program(&prog).run();
    assert_eq!(
        out.reason,
        HaltReason::Fault(Fault::Memory {
            pc: TEXT_BASE + 4,
            source: MemoryFault::OutOfRange { addr: 0x7FF0_0000, width: 4 },
        })
    );
}

#[test]
fn host_budget_terminates_between_cycles() {
    let mut config = test_config();
    config.system.max_cycles = 50;
    let prog = [asm::j(TEXT_BASE)]; // spin forever
    let out = TestContext::with_config(config).load_program(&prog).run();
    assert_eq!(
        out.reason,
        HaltReason::Fault(Fault::HostTerminated { cycles: 50 })
    );
    assert_eq!(out.fault_pc, None);
    assert_eq!(out.cycles, 50);
}
