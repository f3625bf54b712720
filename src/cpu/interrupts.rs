/*!
interrupts.rs - Vectors and the shared interrupt entry sequence.

Vectors (little-endian words at the top of memory):

```text
    $FFFA  NMI
    $FFFC  RESET
    $FFFE  IRQ / BRK
```

Entry sequence (IRQ, NMI and BRK alike):
  1. push PC high, then PC low
  2. push P with the unused bit set; break set only for BRK
  3. set interrupt-disable
  4. load PC from the vector

Requests raised by the host are latched by the CPU facade and serviced at
the start of the next `step`. NMI is edge-triggered (one request, one
service); IRQ is a level that is honored only while interrupt-disable is
clear.
*/

use crate::bus::Bus;
use crate::cpu::execute::{push_status, push_word};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::IRQ_DISABLE;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Interrupt sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interrupt {
    Nmi,
    Irq,
    Brk,
}

impl Interrupt {
    pub const fn vector(self) -> u16 {
        match self {
            Interrupt::Nmi => NMI_VECTOR,
            Interrupt::Irq | Interrupt::Brk => IRQ_VECTOR,
        }
    }

    /// Only software interrupts push P with the break bit set.
    pub const fn sets_break(self) -> bool {
        matches!(self, Interrupt::Brk)
    }
}

/// Latched host requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct InterruptLines {
    pub nmi_pending: bool,
    pub irq_asserted: bool,
}

impl InterruptLines {
    /// Pick the request to service now, consuming an NMI edge.
    pub fn take_pending(&mut self, irq_disabled: bool) -> Option<Interrupt> {
        if self.nmi_pending {
            self.nmi_pending = false;
            Some(Interrupt::Nmi)
        } else if self.irq_asserted && !irq_disabled {
            Some(Interrupt::Irq)
        } else {
            None
        }
    }
}

/// Read the reset vector.
#[inline]
pub(crate) fn reset_target(bus: &mut Bus) -> u16 {
    bus.read_word(RESET_VECTOR)
}

/// Push PC and P, set interrupt-disable, jump through the vector.
pub(crate) fn enter<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, kind: Interrupt) {
    let pc = cpu.pc();
    push_word(cpu, bus, pc);
    push_status(cpu, bus, kind.sets_break());
    cpu.assign_flag(IRQ_DISABLE, true);
    let target = bus.read_word(kind.vector());
    cpu.set_pc(target);
}
