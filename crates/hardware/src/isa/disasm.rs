//! MIPS-I disassembler.
//!
//! Renders a decoded instruction word as a conventional assembly-syntax
//! string for debug tracing and test diagnostics. Encodings outside the
//! supported subset render as `illegal`.

use crate::isa::decode::decode;
use crate::isa::mips1::{funct, opcodes, regimm};

/// Conventional O32 register names, indexed by register number.
pub const REG_NAMES: [&str; 32] = [
    "zero", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "fp", "ra",
];

fn r(idx: usize) -> &'static str {
    REG_NAMES[idx & 0x1F]
}

/// Disassembles one instruction word.
pub fn disasm(inst: u32) -> String {
    let d = decode(inst);
    match d.op {
        opcodes::OP_SPECIAL => match d.funct {
            funct::SLL if inst == 0 => "nop".to_owned(),
            funct::SLL => format!("sll ${}, ${}, {}", r(d.rd), r(d.rt), d.shamt),
            funct::SRL => format!("srl ${}, ${}, {}", r(d.rd), r(d.rt), d.shamt),
            funct::SRA => format!("sra ${}, ${}, {}", r(d.rd), r(d.rt), d.shamt),
            funct::SLLV => format!("sllv ${}, ${}, ${}", r(d.rd), r(d.rt), r(d.rs)),
            funct::SRLV => format!("srlv ${}, ${}, ${}", r(d.rd), r(d.rt), r(d.rs)),
            funct::SRAV => format!("srav ${}, ${}, ${}", r(d.rd), r(d.rt), r(d.rs)),
            funct::JR => format!("jr ${}", r(d.rs)),
            funct::JALR => format!("jalr ${}, ${}", r(d.rd), r(d.rs)),
            funct::SYSCALL => "syscall".to_owned(),
            funct::MFHI => format!("mfhi ${}", r(d.rd)),
            funct::MFLO => format!("mflo ${}", r(d.rd)),
            funct::MULT => format!("mult ${}, ${}", r(d.rs), r(d.rt)),
            funct::MULTU => format!("multu ${}, ${}", r(d.rs), r(d.rt)),
            funct::DIV => format!("div ${}, ${}", r(d.rs), r(d.rt)),
            funct::DIVU => format!("divu ${}, ${}", r(d.rs), r(d.rt)),
            funct::ADD => format!("add ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::ADDU => format!("addu ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::SUB => format!("sub ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::SUBU => format!("subu ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::AND => format!("and ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::OR => format!("or ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::XOR => format!("xor ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::NOR => format!("nor ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::SLT => format!("slt ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            funct::SLTU => format!("sltu ${}, ${}, ${}", r(d.rd), r(d.rs), r(d.rt)),
            _ => format!("illegal {inst:#010x}"),
        },
        opcodes::OP_REGIMM => match d.rt as u32 {
            regimm::BLTZ => format!("bltz ${}, {}", r(d.rs), d.imm),
            regimm::BGEZ => format!("bgez ${}, {}", r(d.rs), d.imm),
            regimm::BLTZAL => format!("bltzal ${}, {}", r(d.rs), d.imm),
            regimm::BGEZAL => format!("bgezal ${}, {}", r(d.rs), d.imm),
            _ => format!("illegal {inst:#010x}"),
        },
        opcodes::OP_J => format!("j {:#x}", d.target << 2),
        opcodes::OP_JAL => format!("jal {:#x}", d.target << 2),
        opcodes::OP_BEQ => format!("beq ${}, ${}, {}", r(d.rs), r(d.rt), d.imm),
        opcodes::OP_BNE => format!("bne ${}, ${}, {}", r(d.rs), r(d.rt), d.imm),
        opcodes::OP_ADDI => format!("addi ${}, ${}, {}", r(d.rt), r(d.rs), d.imm),
        opcodes::OP_ADDIU => format!("addiu ${}, ${}, {}", r(d.rt), r(d.rs), d.imm),
        opcodes::OP_SLTI => format!("slti ${}, ${}, {}", r(d.rt), r(d.rs), d.imm),
        opcodes::OP_SLTIU => format!("sltiu ${}, ${}, {}", r(d.rt), r(d.rs), d.imm),
        opcodes::OP_ANDI => format!("andi ${}, ${}, {:#x}", r(d.rt), r(d.rs), inst & 0xFFFF),
        opcodes::OP_ORI => format!("ori ${}, ${}, {:#x}", r(d.rt), r(d.rs), inst & 0xFFFF),
        opcodes::OP_XORI => format!("xori ${}, ${}, {:#x}", r(d.rt), r(d.rs), inst & 0xFFFF),
        opcodes::OP_LUI => format!("lui ${}, {:#x}", r(d.rt), inst & 0xFFFF),
        opcodes::OP_LB => format!("lb ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_LH => format!("lh ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_LW => format!("lw ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_LBU => format!("lbu ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_LHU => format!("lhu ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_SB => format!("sb ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_SH => format!("sh ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        opcodes::OP_SW => format!("sw ${}, {}(${})", r(d.rt), d.imm, r(d.rs)),
        _ => format!("illegal {inst:#010x}"),
    }
}
