//! Simulation statistics collection and reporting.

/// Counters accumulated over one simulation.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Total cycles executed.
    pub cycles: u64,
    /// Instructions retired at writeback (bubbles excluded).
    pub instructions_retired: u64,

    /// Bubble cycles from load-use and HI/LO interlock stalls.
    pub stalls_data: u64,
    /// Bubble cycles from taken control transfers.
    pub stalls_control: u64,
    /// Taken control transfers (each flushing the wrong-path fetch).
    pub flushes: u64,

    /// Retired loads.
    pub inst_load: u64,
    /// Retired stores.
    pub inst_store: u64,
    /// Retired branches and jumps.
    pub inst_branch: u64,
    /// Retired ALU operations (including HI/LO moves).
    pub inst_alu: u64,
    /// Retired syscall traps.
    pub inst_syscall: u64,

    /// Syscalls dispatched (print and exit; an exit never retires).
    pub syscalls: u64,
}

impl SimStats {
    /// Prints a sectioned report to stdout.
    pub fn print(&self) {
        println!("\n=========================================================");

        println!("\n[General]");
        println!("  Cycles:               {}", self.cycles);
        println!("  Instructions Retired: {}", self.instructions_retired);

        let ipc = if self.cycles > 0 {
            self.instructions_retired as f64 / self.cycles as f64
        } else {
            0.0
        };
        println!("  IPC:                  {ipc:.4}");

        println!("\n[Pipeline Stalls]");
        let total_stalls = self.stalls_data + self.stalls_control;
        if total_stalls > 0 {
            println!("  Total Stalled Cycles: {total_stalls}");
            println!(
                "    Data Hazards:       {:<10} ({:.2}%)",
                self.stalls_data,
                (self.stalls_data as f64 / total_stalls as f64) * 100.0
            );
            println!(
                "    Control Hazards:    {:<10} ({:.2}%)",
                self.stalls_control,
                (self.stalls_control as f64 / total_stalls as f64) * 100.0
            );
            println!("  Taken Transfers:      {}", self.flushes);
        } else {
            println!("  Total Stalled Cycles: 0");
        }

        println!("\n[Instruction Mix]");
        let total_inst = self.instructions_retired as f64;
        if total_inst > 0.0 {
            let line = |name: &str, count: u64| {
                println!(
                    "  {:<21} {:<10} ({:.2}%)",
                    name,
                    count,
                    (count as f64 / total_inst) * 100.0
                );
            };
            line("ALU Operations:", self.inst_alu);
            line("Loads:", self.inst_load);
            line("Stores:", self.inst_store);
            line("Branches/Jumps:", self.inst_branch);
            line("Syscalls:", self.inst_syscall);
        }

        println!("\n[Syscalls]");
        println!("  Dispatched:           {}", self.syscalls);

        println!("=========================================================\n");
    }
}
