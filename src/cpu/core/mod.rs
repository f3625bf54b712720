/*!
core::Cpu - Canonical 6502 CPU façade wrapping `CpuState`.

Overview
========
`Cpu` owns the architectural state plus everything needed to drive it:
the opcode table, the configuration, the run state and the latched
interrupt lines. Hosts talk to this type only; the dispatch and execute
layers stay generic over `CpuRegs`.

Run States
==========
```text
    Reset      power-on; the first `step` performs the reset sequence
    Fetching   between instructions
    Executing  an instruction is in flight (never observable from outside)
    Halted     a `CpuError` stopped the CPU; `step` is a no-op until reset
```

Instruction Atomicity
=====================
Before every instruction the façade copies `CpuState` and the interrupt
latches, then opens a bus transaction. The instruction either commits (registers and memory both
advance) or, on a decode error or a write to read-only memory, the bus
rolls back and the snapshot is restored. A failed instruction or interrupt
entry leaves no trace except the halt itself. An NMI edge it consumed is
latched again.

Interrupts
==========
`trigger_nmi` latches an edge; `set_irq_line` models the level-sensitive
IRQ input. Pending requests are checked before fetching each instruction
and cost 7 cycles to service. NMI wins over IRQ; IRQ is masked by I.

Logging
=======
- `debug`: reset (PC, SP, P), interrupt requests dropped by a reset
- `error`: halt reason
- `trace` (feature `trace`): one nestest-style line per instruction under
  the `arness_cpu::trace` target
*/

use crate::bus::Bus;
use crate::config::CpuConfig;
use crate::cpu::cycles::INTERRUPT_CYCLES;
use crate::cpu::dispatch;
use crate::cpu::error::CpuError;
use crate::cpu::interrupts::{self, Interrupt, InterruptLines};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::table::OpcodeTable;
use crate::cpu::trace;

/// Coarse execution state of the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Reset,
    Fetching,
    Executing,
    Halted,
}

/// What `abort` restores when an instruction fails.
#[derive(Debug, Clone, Copy)]
struct Snapshot {
    state: CpuState,
    lines: InterruptLines,
}

#[derive(Debug, Clone)]
pub struct Cpu {
    state: CpuState,
    table: &'static OpcodeTable,
    config: CpuConfig,
    run_state: RunState,
    halt_reason: Option<CpuError>,
    lines: InterruptLines,
    last_cycles: u32,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a new CPU with power‑up defaults.
    pub fn new() -> Self {
        Self::with_config(CpuConfig::default())
    }

    pub fn with_config(config: CpuConfig) -> Self {
        Self {
            state: CpuState::power_on(&config),
            table: OpcodeTable::shared(),
            config,
            run_state: RunState::Reset,
            halt_reason: None,
            lines: InterruptLines::default(),
            last_cycles: 0,
        }
    }

    /// Return immutable reference to internal state (for inspection / testing).
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Return mutable reference to internal state (test fixtures, debuggers).
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    pub fn table(&self) -> &'static OpcodeTable {
        self.table
    }

    /// Power-on registers, then load PC from the reset vector (or the
    /// configured override). Clears the halt and any pending interrupts.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.state = CpuState::power_on(&self.config);
        let target = match self.config.reset_pc {
            Some(pc) => pc,
            None => interrupts::reset_target(bus),
        };
        self.state.set_pc(target);
        self.run_state = RunState::Fetching;
        self.halt_reason = None;
        if self.lines.nmi_pending || self.lines.irq_asserted {
            log::debug!(
                "cpu: reset drops pending interrupts (nmi={}, irq={})",
                self.lines.nmi_pending,
                self.lines.irq_asserted
            );
        }
        self.lines = InterruptLines::default();
        self.last_cycles = 0;
        log::debug!(
            "cpu: reset, PC=${:04X} SP=${:02X} P=${:02X}",
            target,
            self.state.sp,
            self.state.status()
        );
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// True once a fatal error has stopped execution.
    pub fn is_halted(&self) -> bool {
        self.run_state == RunState::Halted
    }

    /// The error that halted the CPU, if any.
    pub fn halt_reason(&self) -> Option<CpuError> {
        self.halt_reason
    }

    // ---------------------------------------------------------------------
    // Register accessors (read)
    // ---------------------------------------------------------------------
    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status()
    }

    /// Cycles consumed since reset (including the configured start value).
    pub fn total_cycles(&self) -> u64 {
        self.state.total_cycles
    }

    /// Cycles charged by the most recent successful `step`.
    pub fn last_cycles(&self) -> u32 {
        self.last_cycles
    }

    // ---------------------------------------------------------------------
    // Register mutators (write)
    // ---------------------------------------------------------------------
    pub fn set_a(&mut self, v: u8) {
        self.state.set_a(v);
    }
    pub fn set_x(&mut self, v: u8) {
        self.state.set_x(v);
    }
    pub fn set_y(&mut self, v: u8) {
        self.state.set_y(v);
    }
    pub fn set_sp(&mut self, v: u8) {
        self.state.set_sp(v);
    }
    pub fn set_pc(&mut self, v: u16) {
        self.state.set_pc(v);
    }
    /// Same rules as PLP: break bit kept, unused bit forced.
    pub fn set_status(&mut self, v: u8) {
        self.state.set_status(v);
    }

    // ---------------------------------------------------------------------
    // Flag helpers
    // ---------------------------------------------------------------------
    /// Set or clear `mask` in P. The unused bit always reads as 1.
    pub fn set_flag(&mut self, mask: u8, on: bool) {
        self.state.assign_flag(mask, on);
    }

    pub fn is_flag_set(&self, mask: u8) -> bool {
        self.state.is_flag_set(mask)
    }

    // ---------------------------------------------------------------------
    // Interrupt inputs
    // ---------------------------------------------------------------------

    /// Latch a non-maskable interrupt; serviced before the next instruction.
    pub fn trigger_nmi(&mut self) {
        self.lines.nmi_pending = true;
    }

    /// Drive the IRQ input. While asserted and I is clear, an IRQ is taken
    /// before each instruction.
    pub fn set_irq_line(&mut self, asserted: bool) {
        self.lines.irq_asserted = asserted;
    }

    /// nestest-style description of the instruction at PC.
    pub fn trace_line(&self, bus: &Bus) -> String {
        trace::trace_line(self.table, bus, &self.state)
    }

    // ---------------------------------------------------------------------
    // Stepping
    // ---------------------------------------------------------------------

    /// Execute one instruction (or service one pending interrupt).
    ///
    /// Returns `Ok(true)` when something ran, `Ok(false)` when the CPU is
    /// already halted, and `Err` when this call halted it. In the `Reset`
    /// state the reset sequence runs first.
    pub fn step(&mut self, bus: &mut Bus) -> Result<bool, CpuError> {
        match self.run_state {
            RunState::Halted => return Ok(false),
            RunState::Reset => self.reset(bus),
            RunState::Fetching | RunState::Executing => {}
        }

        let snapshot = self.snapshot();
        self.run_state = RunState::Executing;
        bus.begin_transaction();

        if let Some(kind) = self.lines.take_pending(self.state.is_flag_set(IRQ_DISABLE)) {
            return self.service_interrupt(bus, kind, snapshot);
        }

        #[cfg(feature = "trace")]
        log::trace!(target: "arness_cpu::trace", "{}", self.trace_line(bus));

        let allow_undocumented = self.config.undocumented_opcodes;
        match dispatch::step(&mut self.state, bus, self.table, allow_undocumented) {
            Ok(cycles) => {
                if let Some(fault) = bus.take_fault() {
                    return Err(self.abort(
                        bus,
                        snapshot,
                        CpuError::MemoryProtection {
                            address: fault.address,
                            value: fault.value,
                            pc: snapshot.state.pc,
                        },
                    ));
                }
                bus.commit();
                let total = cycles.total();
                self.finish(total);
                Ok(true)
            }
            Err(e) => Err(self.abort(bus, snapshot, e)),
        }
    }

    /// Step up to `max_instructions` times, stopping early on halt.
    /// Returns how many steps ran.
    pub fn run(&mut self, bus: &mut Bus, max_instructions: usize) -> Result<usize, CpuError> {
        let mut executed = 0;
        while executed < max_instructions {
            if !self.step(bus)? {
                break;
            }
            executed += 1;
        }
        Ok(executed)
    }

    fn service_interrupt(
        &mut self,
        bus: &mut Bus,
        kind: Interrupt,
        snapshot: Snapshot,
    ) -> Result<bool, CpuError> {
        interrupts::enter(&mut self.state, bus, kind);
        if let Some(fault) = bus.take_fault() {
            return Err(self.abort(
                bus,
                snapshot,
                CpuError::MemoryProtection {
                    address: fault.address,
                    value: fault.value,
                    pc: snapshot.state.pc,
                },
            ));
        }
        bus.commit();
        self.finish(INTERRUPT_CYCLES);
        Ok(true)
    }

    fn finish(&mut self, cycles: u32) {
        self.state.add_cycles(cycles);
        self.last_cycles = cycles;
        self.run_state = RunState::Fetching;
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            lines: self.lines,
        }
    }

    /// Undo the in-flight instruction and halt.
    fn abort(&mut self, bus: &mut Bus, snapshot: Snapshot, err: CpuError) -> CpuError {
        bus.rollback();
        self.state = snapshot.state;
        self.lines = snapshot.lines;
        self.run_state = RunState::Halted;
        self.halt_reason = Some(err);
        self.last_cycles = 0;
        log::error!("cpu: halted: {err}");
        err
    }
}

// -------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------
