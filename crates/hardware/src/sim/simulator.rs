//! Simulator: owns the CPU and drives it to completion.
//!
//! The host feeds a pre-populated `MemoryImage`, then either single-steps
//! with `tick` or calls `run`, which advances cycles until the controller
//! halts. The host cycle budget is checked strictly between cycles; a
//! budget halt surfaces as `Fault::HostTerminated`, distinguishable from
//! any guest-caused outcome.

use crate::common::error::{Fault, MemoryFault};
use crate::config::Config;
use crate::core::cpu::{Cpu, HaltReason};
use crate::isa::abi;
use crate::sim::image::MemoryImage;

/// Top-level simulator: CPU plus run-loop policy.
#[derive(Debug)]
pub struct Simulator {
    /// CPU architectural and pipeline state.
    pub cpu: Cpu,
    max_cycles: u64,
    init_stack: bool,
}

/// Final report of a finished simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Why the controller halted.
    pub reason: HaltReason,
    /// Program counter of the faulting instruction, when the halt was a
    /// fault attached to one.
    pub fault_pc: Option<u32>,
    /// Full console output, including anything emitted before a fault.
    pub output: String,
    /// The printed integers, in emission order.
    pub values: Vec<i32>,
    /// Total cycles executed.
    pub cycles: u64,
    /// Instructions retired (bubbles and flushed instructions excluded).
    pub instructions: u64,
}

impl Simulator {
    /// Creates a simulator with a fresh CPU.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            max_cycles: config.system.max_cycles,
            init_stack: config.system.init_stack,
        }
    }

    /// Copies the image into guest memory and points the CPU at its entry.
    ///
    /// Optionally initializes `$sp` to the top of guest memory. Faults if a
    /// segment does not fit in the mapped region.
    pub fn load_image(&mut self, image: &MemoryImage) -> Result<(), MemoryFault> {
        for seg in &image.segments {
            self.cpu.mem.write_bytes(seg.base, &seg.bytes)?;
        }
        self.cpu.pc = image.entry;
        if self.init_stack {
            // leave a small red zone below the top of memory
            let top = (self.cpu.mem.size() as u32).saturating_sub(16);
            self.cpu.regs.write(abi::REG_SP, top);
        }
        tracing::debug!(
            entry = image.entry,
            segments = image.segments.len(),
            "memory image loaded"
        );
        Ok(())
    }

    /// Advances the simulation by one clock cycle.
    pub fn tick(&mut self) {
        self.cpu.tick();
    }

    /// Runs until the controller halts, then returns the final report.
    ///
    /// The cycle budget, when set, is checked between cycles only; the
    /// pipeline is never interrupted mid-cycle.
    pub fn run(&mut self) -> RunOutcome {
        let reason = loop {
            if let Some(reason) = self.cpu.halt_reason() {
                break reason;
            }
            if self.max_cycles != 0 && self.cpu.stats.cycles >= self.max_cycles {
                self.cpu.halt_with(HaltReason::Fault(Fault::HostTerminated {
                    cycles: self.cpu.stats.cycles,
                }));
                continue;
            }
            self.cpu.tick();
        };

        let fault_pc = match reason {
            HaltReason::Exit { .. } => None,
            HaltReason::Fault(fault) => fault.pc(),
        };

        RunOutcome {
            reason,
            fault_pc,
            output: self.cpu.console.text().to_owned(),
            values: self.cpu.console.values().to_vec(),
            cycles: self.cpu.stats.cycles,
            instructions: self.cpu.stats.instructions_retired,
        }
    }
}
