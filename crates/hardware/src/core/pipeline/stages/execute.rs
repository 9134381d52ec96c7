//! Execute (EX) Stage.
//!
//! Resolves forwarded operands, performs the ALU or HI/LO operation, and
//! resolves control transfers. Branches resolve here (late, never
//! speculatively at fetch), so a taken transfer invalidates the wrong-path
//! instruction already in IF/ID and redirects fetch within the same cycle.
//! Syscall arguments are sampled here with forwarding; dispatch itself
//! happens one stage later, once every older instruction has retired.

use crate::common::constants::{JUMP_REGION_MASK, WORD_SIZE};
use crate::core::cpu::Cpu;
use crate::core::pipeline::alu::{alu, hilo};
use crate::core::pipeline::hazards::{forward_reg, forward_rs};
use crate::core::pipeline::latches::ExMem;
use crate::core::pipeline::signals::{BranchCond, HiLoRead, OpASrc, OpBSrc};
use crate::isa::abi;
use crate::sim::syscall::SyscallRequest;

/// Executes the execute stage of the pipeline.
pub fn execute_stage(cpu: &mut Cpu) {
    let id = cpu.id_ex;
    if !id.valid {
        cpu.ex_mem = ExMem::default();
        return;
    }

    if let Some(fault) = id.fault {
        cpu.ex_mem = ExMem {
            valid: true,
            pc: id.pc,
            inst: id.inst,
            dest: id.dest,
            ctrl: id.ctrl,
            fault: Some(fault),
            ..ExMem::default()
        };
        return;
    }

    let (fwd_a, fwd_b) = forward_rs(&id, &cpu.ex_mem, &cpu.wb_latch);

    if cpu.trace {
        eprintln!(
            "EX  pc={:#010x} inst={:#010x} (rs=${}, rt=${}, a={:#x}, b={:#x})",
            id.pc, id.inst, id.rs, id.rt, fwd_a, fwd_b
        );
    }

    // Sample the trap registers now, while forwarding paths are live.
    let syscall = if id.ctrl.is_syscall {
        Some(SyscallRequest {
            pc: id.pc,
            v0: forward_reg(abi::REG_V0, &cpu.regs, &cpu.ex_mem, &cpu.wb_latch),
            args: [
                forward_reg(abi::REG_A0, &cpu.regs, &cpu.ex_mem, &cpu.wb_latch),
                forward_reg(abi::REG_A1, &cpu.regs, &cpu.ex_mem, &cpu.wb_latch),
                forward_reg(abi::REG_A2, &cpu.regs, &cpu.ex_mem, &cpu.wb_latch),
                forward_reg(abi::REG_A3, &cpu.regs, &cpu.ex_mem, &cpu.wb_latch),
            ],
        })
    } else {
        None
    };

    let op_a = match id.ctrl.a_src {
        OpASrc::Reg1 => fwd_a,
        OpASrc::Reg2 => fwd_b,
        OpASrc::Zero => 0,
    };
    let op_b = match id.ctrl.b_src {
        OpBSrc::Reg2 => fwd_b,
        OpBSrc::Reg1 => fwd_a,
        OpBSrc::Imm => id.imm as u32,
        OpBSrc::ImmZero => id.inst & 0xFFFF,
        OpBSrc::ImmUpper => (id.imm as u32) << 16,
        OpBSrc::Shamt => id.shamt,
    };

    let mut alu_out = alu(id.ctrl.alu, op_a, op_b);
    match id.ctrl.hilo_read {
        HiLoRead::Hi => alu_out = cpu.regs.read_hi(),
        HiLoRead::Lo => alu_out = cpu.regs.read_lo(),
        HiLoRead::None => {}
    }
    let hilo_out = hilo(id.ctrl.hilo, fwd_a, fwd_b);

    if id.ctrl.branch {
        let taken = match id.ctrl.cond {
            BranchCond::Eq => fwd_a == fwd_b,
            BranchCond::Ne => fwd_a != fwd_b,
            BranchCond::Ltz => (fwd_a as i32) < 0,
            BranchCond::Gez => (fwd_a as i32) >= 0,
        };
        if taken {
            let target = id
                .pc
                .wrapping_add(WORD_SIZE)
                .wrapping_add((id.imm as u32) << 2);
            cpu.redirect(target);
        }
    } else if id.ctrl.jump {
        let target = if id.ctrl.jump_reg {
            fwd_a
        } else {
            (id.pc.wrapping_add(WORD_SIZE) & JUMP_REGION_MASK) | (id.target << 2)
        };
        cpu.redirect(target);
    }

    cpu.ex_mem = ExMem {
        valid: true,
        pc: id.pc,
        inst: id.inst,
        dest: id.dest,
        alu: alu_out,
        store_data: fwd_b,
        hilo: hilo_out,
        syscall,
        ctrl: id.ctrl,
        fault: None,
    };
}
