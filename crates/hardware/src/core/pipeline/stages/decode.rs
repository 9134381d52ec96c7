//! Instruction Decode (ID) Stage.
//!
//! Breaks the fetched word into fields, classifies it into control signals,
//! selects the destination register, and reads the register file. An
//! encoding outside the supported subset does not kill the pipeline here;
//! the decode fault rides the latches to writeback so older instructions
//! retire first.

use crate::common::error::Fault;
use crate::core::cpu::Cpu;
use crate::core::pipeline::latches::IdEx;
use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, HiLoOp, HiLoRead, MemWidth, OpASrc, OpBSrc, RegDst,
};
use crate::isa::abi;
use crate::isa::decode::decode;
use crate::isa::disasm::disasm;
use crate::isa::instruction::Decoded;
use crate::isa::mips1::{funct, opcodes, regimm};

/// Executes the decode stage of the pipeline.
pub fn decode_stage(cpu: &mut Cpu) {
    let if_id = cpu.if_id;
    if !if_id.valid {
        cpu.id_ex = IdEx::default();
        return;
    }

    if let Some(fault) = if_id.fault {
        cpu.id_ex = IdEx {
            valid: true,
            pc: if_id.pc,
            inst: if_id.inst,
            fault: Some(fault),
            ..IdEx::default()
        };
        return;
    }

    let d = decode(if_id.inst);

    if cpu.trace {
        eprintln!(
            "ID  pc={:#010x} inst={:#010x}  {}",
            if_id.pc,
            if_id.inst,
            disasm(if_id.inst)
        );
    }

    let (ctrl, fault) = match control_signals(&d) {
        Some(c) => (c, None),
        None => (
            ControlSignals::default(),
            Some(Fault::Decode {
                pc: if_id.pc,
                inst: if_id.inst,
            }),
        ),
    };

    let dest = match ctrl.reg_dst {
        RegDst::Rt => d.rt,
        RegDst::Rd => d.rd,
        RegDst::Ra => abi::REG_RA,
    };

    cpu.id_ex = IdEx {
        valid: true,
        pc: if_id.pc,
        inst: if_id.inst,
        rs: d.rs,
        rt: d.rt,
        dest,
        imm: d.imm,
        target: d.target,
        shamt: d.shamt,
        rv1: cpu.regs.read(d.rs),
        rv2: cpu.regs.read(d.rt),
        ctrl,
        fault,
    };
}

/// Classifies a decoded instruction into control signals.
///
/// Pure and deterministic. Returns `None` for any opcode/function-code
/// combination outside the supported MIPS-I subset; the caller turns that
/// into a decode fault rather than silently skipping the instruction.
pub fn control_signals(d: &Decoded) -> Option<ControlSignals> {
    let mut c = ControlSignals::default();

    match d.op {
        opcodes::OP_SPECIAL => {
            c.reg_dst = RegDst::Rd;
            match d.funct {
                funct::SLL | funct::SRL | funct::SRA => {
                    c.reg_write = true;
                    c.a_src = OpASrc::Reg2;
                    c.b_src = OpBSrc::Shamt;
                    c.alu = match d.funct {
                        funct::SLL => AluOp::Sll,
                        funct::SRL => AluOp::Srl,
                        _ => AluOp::Sra,
                    };
                }
                funct::SLLV | funct::SRLV | funct::SRAV => {
                    c.reg_write = true;
                    c.a_src = OpASrc::Reg2;
                    c.b_src = OpBSrc::Reg1;
                    c.alu = match d.funct {
                        funct::SLLV => AluOp::Sll,
                        funct::SRLV => AluOp::Srl,
                        _ => AluOp::Sra,
                    };
                }
                funct::JR => {
                    c.jump = true;
                    c.jump_reg = true;
                }
                funct::JALR => {
                    c.jump = true;
                    c.jump_reg = true;
                    c.link = true;
                    c.reg_write = true;
                }
                funct::SYSCALL => {
                    c.is_syscall = true;
                }
                funct::MFHI => {
                    c.reg_write = true;
                    c.hilo_read = HiLoRead::Hi;
                }
                funct::MFLO => {
                    c.reg_write = true;
                    c.hilo_read = HiLoRead::Lo;
                }
                funct::MULT => c.hilo = HiLoOp::Mult,
                funct::MULTU => c.hilo = HiLoOp::Multu,
                funct::DIV => c.hilo = HiLoOp::Div,
                funct::DIVU => c.hilo = HiLoOp::Divu,
                funct::ADD | funct::ADDU => {
                    c.reg_write = true;
                    c.alu = AluOp::Add;
                }
                funct::SUB | funct::SUBU => {
                    c.reg_write = true;
                    c.alu = AluOp::Sub;
                }
                funct::AND => {
                    c.reg_write = true;
                    c.alu = AluOp::And;
                }
                funct::OR => {
                    c.reg_write = true;
                    c.alu = AluOp::Or;
                }
                funct::XOR => {
                    c.reg_write = true;
                    c.alu = AluOp::Xor;
                }
                funct::NOR => {
                    c.reg_write = true;
                    c.alu = AluOp::Nor;
                }
                funct::SLT => {
                    c.reg_write = true;
                    c.alu = AluOp::Slt;
                }
                funct::SLTU => {
                    c.reg_write = true;
                    c.alu = AluOp::Sltu;
                }
                _ => return None,
            }
        }
        opcodes::OP_REGIMM => {
            c.branch = true;
            match d.rt as u32 {
                regimm::BLTZ => c.cond = BranchCond::Ltz,
                regimm::BGEZ => c.cond = BranchCond::Gez,
                regimm::BLTZAL => {
                    c.cond = BranchCond::Ltz;
                    c.link = true;
                    c.reg_write = true;
                    c.reg_dst = RegDst::Ra;
                }
                regimm::BGEZAL => {
                    c.cond = BranchCond::Gez;
                    c.link = true;
                    c.reg_write = true;
                    c.reg_dst = RegDst::Ra;
                }
                _ => return None,
            }
        }
        opcodes::OP_J => c.jump = true,
        opcodes::OP_JAL => {
            c.jump = true;
            c.link = true;
            c.reg_write = true;
            c.reg_dst = RegDst::Ra;
        }
        opcodes::OP_BEQ => {
            c.branch = true;
            c.cond = BranchCond::Eq;
        }
        opcodes::OP_BNE => {
            c.branch = true;
            c.cond = BranchCond::Ne;
        }
        opcodes::OP_ADDI | opcodes::OP_ADDIU => {
            c.reg_write = true;
            c.b_src = OpBSrc::Imm;
        }
        opcodes::OP_SLTI => {
            c.reg_write = true;
            c.b_src = OpBSrc::Imm;
            c.alu = AluOp::Slt;
        }
        opcodes::OP_SLTIU => {
            // sltiu still sign-extends its immediate, then compares unsigned
            c.reg_write = true;
            c.b_src = OpBSrc::Imm;
            c.alu = AluOp::Sltu;
        }
        opcodes::OP_ANDI => {
            c.reg_write = true;
            c.b_src = OpBSrc::ImmZero;
            c.alu = AluOp::And;
        }
        opcodes::OP_ORI => {
            c.reg_write = true;
            c.b_src = OpBSrc::ImmZero;
            c.alu = AluOp::Or;
        }
        opcodes::OP_XORI => {
            c.reg_write = true;
            c.b_src = OpBSrc::ImmZero;
            c.alu = AluOp::Xor;
        }
        opcodes::OP_LUI => {
            c.reg_write = true;
            c.a_src = OpASrc::Zero;
            c.b_src = OpBSrc::ImmUpper;
        }
        opcodes::OP_LB | opcodes::OP_LH | opcodes::OP_LW | opcodes::OP_LBU | opcodes::OP_LHU => {
            c.reg_write = true;
            c.mem_read = true;
            c.b_src = OpBSrc::Imm;
            let (width, signed) = match d.op {
                opcodes::OP_LB => (MemWidth::Byte, true),
                opcodes::OP_LBU => (MemWidth::Byte, false),
                opcodes::OP_LH => (MemWidth::Half, true),
                opcodes::OP_LHU => (MemWidth::Half, false),
                _ => (MemWidth::Word, true),
            };
            c.width = width;
            c.signed_load = signed;
        }
        opcodes::OP_SB | opcodes::OP_SH | opcodes::OP_SW => {
            c.mem_write = true;
            c.b_src = OpBSrc::Imm;
            c.width = match d.op {
                opcodes::OP_SB => MemWidth::Byte,
                opcodes::OP_SH => MemWidth::Half,
                _ => MemWidth::Word,
            };
        }
        _ => return None,
    }

    Some(c)
}
