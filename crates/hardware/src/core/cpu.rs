//! The CPU and its cycle-level controller.
//!
//! This module owns all architectural and pipeline state and advances it one
//! cycle at a time. It performs the following:
//! 1. **Pipeline Coordination:** Runs the stages writeback-first each cycle so
//!    no stage reads a value produced in the same cycle.
//! 2. **Hazard Arbitration:** Applies stall and flush decisions between the
//!    execute and decode stages.
//! 3. **State Machine:** Tracks the observable Running/Stalled/Flushing/Halted
//!    state and the terminal halt reason.
//! 4. **Observability:** Pipeline diagram and per-stage tracing.

use crate::common::constants::BRANCH_FLUSH_PENALTY;
use crate::common::error::Fault;
use crate::common::reg::RegisterFile;
use crate::config::Config;
use crate::core::console::Console;
use crate::core::pipeline::hazards::{
    need_stall_hilo, need_stall_load_use, need_stall_syscall_return,
};
use crate::core::pipeline::latches::{ExMem, IdEx, IfId, MemWb};
use crate::core::pipeline::stages::{decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage};
use crate::isa::abi;
use crate::soc::memory::Memory;
use crate::stats::SimStats;

/// Observable controller state, updated every cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PipelineState {
    /// All stages advanced normally this cycle.
    #[default]
    Running,

    /// A data hazard froze fetch/decode and injected a bubble this cycle.
    Stalled,

    /// A taken control transfer invalidated the wrong-path fetch this cycle.
    Flushing,

    /// Terminal state; no further cycles execute.
    Halted,
}

/// Why the controller halted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// The guest invoked the exit syscall.
    Exit {
        /// Guest-supplied exit status.
        status: u32,
    },

    /// A fault terminated the simulation.
    Fault(Fault),
}

/// The CPU: architectural state, guest memory, and the five pipeline latches.
///
/// Each `Cpu` owns its state exclusively; independent instances share
/// nothing and may run on separate threads.
#[derive(Debug)]
pub struct Cpu {
    /// General-purpose registers and the HI/LO pair.
    pub regs: RegisterFile,
    /// Program counter of the next fetch.
    pub pc: u32,
    /// Flat guest memory.
    pub mem: Memory,
    /// Guest console output stream.
    pub console: Console,
    /// Enable per-stage tracing to stderr.
    pub trace: bool,

    /// IF/ID latch.
    pub if_id: IfId,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,
    /// Snapshot of MEM/WB from the previous cycle, used for forwarding.
    pub wb_latch: MemWb,

    /// Observable controller state for the current cycle.
    pub state: PipelineState,
    /// Simulation statistics.
    pub stats: SimStats,

    halt: Option<HaltReason>,
}

impl Cpu {
    /// Creates a CPU with zeroed registers, empty latches, and fresh memory.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: 0,
            mem: Memory::new(config.system.mem_size),
            console: Console::new(config.general.echo_output),
            trace: config.general.trace,
            if_id: IfId::default(),
            id_ex: IdEx::default(),
            ex_mem: ExMem::default(),
            mem_wb: MemWb::default(),
            wb_latch: MemWb::default(),
            state: PipelineState::Running,
            stats: SimStats::default(),
            halt: None,
        }
    }

    /// Advances the pipeline by one cycle.
    ///
    /// Stage order is writeback, memory, execute, decode, fetch; a stage
    /// never reads a latch written in the same cycle. The hazard unit is
    /// consulted between execute and decode: a stall freezes fetch/decode
    /// and injects a bubble into ID/EX for exactly one cycle per decision.
    /// On a halted CPU this is a no-op.
    pub fn tick(&mut self) {
        if self.halt.is_some() {
            return;
        }

        if self.trace {
            self.print_pipeline_diagram();
        }
        self.stats.cycles += 1;
        self.state = PipelineState::Running;

        wb_stage(self);
        if self.halt.is_some() {
            return;
        }

        self.wb_latch = self.mem_wb;

        mem_stage(self);
        if self.halt.is_some() {
            return;
        }

        execute_stage(self);

        // id_ex still holds the instruction that just entered EX; the hazard
        // unit compares it against the instruction waiting in IF/ID.
        let stall = need_stall_load_use(&self.id_ex, &self.if_id)
            || need_stall_hilo(&self.id_ex, &self.if_id)
            || need_stall_syscall_return(&self.id_ex, &self.if_id);

        if stall {
            self.id_ex = IdEx::default();
            self.stats.stalls_data += 1;
            self.state = PipelineState::Stalled;
        } else {
            decode_stage(self);
            fetch_stage(self);
        }

        self.regs.write(abi::REG_ZERO, 0);
    }

    /// Redirects fetch to `target` and invalidates the wrong-path fetch.
    ///
    /// Called from execute when a branch resolves taken or a jump executes.
    pub(crate) fn redirect(&mut self, target: u32) {
        if self.trace {
            eprintln!("EX  redirect -> pc={target:#010x}");
        }
        self.pc = target;
        self.if_id = IfId::default();
        self.state = PipelineState::Flushing;
        self.stats.flushes += 1;
        self.stats.stalls_control += BRANCH_FLUSH_PENALTY;
    }

    /// Drives the controller into the terminal `Halted` state.
    ///
    /// The first reason wins; later calls are ignored.
    pub(crate) fn halt_with(&mut self, reason: HaltReason) {
        if self.halt.is_none() {
            tracing::debug!(?reason, cycles = self.stats.cycles, "pipeline halted");
            self.halt = Some(reason);
            self.state = PipelineState::Halted;
        }
    }

    /// The halt reason, once the controller has reached `Halted`.
    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halt
    }

    /// Prints a one-line diagram of the instructions occupying each stage.
    pub fn print_pipeline_diagram(&self) {
        let slot = |valid: bool, pc: u32| -> String {
            if valid {
                format!("[{pc:08x}]")
            } else {
                format!("[{:^8}]", "--")
            }
        };
        eprintln!(
            "{} -> {} -> {} -> {} -> {}",
            slot(self.if_id.valid, self.if_id.pc),
            slot(self.id_ex.valid, self.id_ex.pc),
            slot(self.ex_mem.valid, self.ex_mem.pc),
            slot(self.mem_wb.valid, self.mem_wb.pc),
            slot(self.wb_latch.valid, self.wb_latch.pc),
        );
    }
}
