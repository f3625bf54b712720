/*!
cpu::mod - Public façade for the 6502 CPU core.

Layout:

```text
    state.rs        - Register file, flag masks, last-result latch, cycle total.
    regs.rs         - `CpuRegs` trait; instruction code is generic over it.
    addressing.rs   - Addressing modes and operand resolution (PC advance,
                      page-cross penalties, indirect-jump page bug).
    cycles.rs       - Per-step cycle breakdown.
    table.rs        - Immutable opcode catalogue (mode, length, cycles, flags).
    execute.rs      - ALU, shift, read-modify-write and stack helpers.
    dispatch/       - Decode + family handlers + generic flag finalizer.
    interrupts.rs   - Vectors, reset target, NMI / IRQ / BRK entry.
    trace.rs        - Disassembly and nestest-style trace lines.
    error.rs        - `CpuError`.
    core/           - `Cpu` facade: run state, reset, step, atomicity.
```

The public surface is the `Cpu` facade. Downstream code should not rely on
the internal layout beyond the re-exports below.

Usage:
```rust
use arness_cpu::{Bus, Cpu};

let mut bus = Bus::new();
bus.load(0x0600, &[0xA9, 0x05, 0x85, 0x10]); // LDA #$05 ; STA $10
bus.load(0xFFFC, &[0x00, 0x06]);

let mut cpu = Cpu::new();
cpu.reset(&mut bus);
cpu.run(&mut bus, 2).expect("program runs");
assert_eq!(bus.peek(0x0010), 0x05);
assert_eq!(cpu.total_cycles(), 5);
```
*/

pub mod addressing;
pub mod core;
pub mod cycles;
pub(crate) mod dispatch;
pub mod error;
pub(crate) mod execute;
pub mod interrupts;
pub mod regs;
pub mod state;
pub mod table;
pub mod trace;

pub use crate::cpu::core::{Cpu, RunState};
pub use crate::cpu::error::CpuError;
pub use crate::cpu::regs::CpuRegs;
pub use crate::cpu::state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use crate::cpu::table::{Mnemonic, OPCODE_TABLE, OpcodeDescriptor, OpcodeTable};
