/*!
load_store.rs - Load / store opcode family handler

Overview
========
```text
    LDA  LDX  LDY     register <- operand; N/Z finalized from the value
    STA  STX  STY     memory <- register; no flags
    LAX (undoc.)      A and X <- operand; N/Z
    SAX (undoc.)      memory <- A & X; no flags
```

Page-cross penalties are applied by the addressing layer: conditional for
the loads, unconditional for the indexed stores.

Return Contract
===============
`handle` returns true when the mnemonic belongs to this family.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::ExecContext;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    _ctx: &mut ExecContext,
) -> bool {
    match m {
        Mnemonic::Lda => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_a(v);
        }
        Mnemonic::Ldx => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_x(v);
        }
        Mnemonic::Ldy => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_y(v);
        }
        Mnemonic::Lax => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_a(v);
            cpu.set_x(v);
        }
        Mnemonic::Sta => store(operand, bus, cpu.a()),
        Mnemonic::Stx => store(operand, bus, cpu.x()),
        Mnemonic::Sty => store(operand, bus, cpu.y()),
        Mnemonic::Sax => store(operand, bus, cpu.a() & cpu.x()),
        _ => return false,
    }
    true
}

#[inline]
fn store(operand: Operand, bus: &mut Bus, value: u8) {
    if let Some(addr) = operand.address() {
        bus.write(addr, value);
    }
}
