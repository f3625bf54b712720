#![doc = r#"
Arness CPU library crate.

A cycle-counting 6502 interpreter core, split out of the Arness NES emulator.

Modules:
- address: `MemAddress`, a 16-bit address with byte views and page-cross arithmetic
- bus: CPU address space behind a `Mapping` policy (flat or NES/NROM layout),
  with write journaling so a faulting instruction leaves memory untouched
- cartridge: iNES v1 loader; installs program ROM into a `Bus`
- config: `CpuConfig` reset values and opcode-set selection
- cpu: 6502 CPU core (facade + state + dispatch + execute modules)

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod address;
pub mod bus;
pub mod cartridge;
pub mod config;
pub mod cpu;

// Re-export commonly used types at the crate root for convenience.
pub use address::MemAddress;
pub use bus::Bus;
pub use cartridge::Cartridge;
pub use config::CpuConfig;
pub use cpu::{Cpu, CpuError, RunState};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
