/*!
rmw.rs - Shift / rotate / increment / decrement family handler

Overview
========
```text
    ASL  LSR  ROL  ROR   accumulator or memory; C <- shifted-out bit
    INC  DEC             memory only; N/Z
    INX  INY  DEX  DEY   register; N/Z
```

Memory forms read the byte, apply the operation and write the result back
through `execute::modify`. The indexed absolute forms always pay the extra
indexing cycle; that is charged by the addressing layer.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{ExecContext, asl, lsr, modify, rol, ror};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    match m {
        // ---------------- Shifts / rotates ----------------
        Mnemonic::Asl => {
            modify(operand, cpu, bus, |_, v| asl(ctx, v));
        }
        Mnemonic::Lsr => {
            modify(operand, cpu, bus, |_, v| lsr(ctx, v));
        }
        Mnemonic::Rol => {
            let c = ctx.carry_in(cpu);
            modify(operand, cpu, bus, |_, v| rol(ctx, c, v));
        }
        Mnemonic::Ror => {
            let c = ctx.carry_in(cpu);
            modify(operand, cpu, bus, |_, v| ror(ctx, c, v));
        }

        // ---------------- Memory INC / DEC ----------------
        Mnemonic::Inc => {
            modify(operand, cpu, bus, |_, v| v.wrapping_add(1));
        }
        Mnemonic::Dec => {
            modify(operand, cpu, bus, |_, v| v.wrapping_sub(1));
        }

        // ---------------- Register INC / DEC ----------------
        Mnemonic::Inx => cpu.set_x(cpu.x().wrapping_add(1)),
        Mnemonic::Iny => cpu.set_y(cpu.y().wrapping_add(1)),
        Mnemonic::Dex => cpu.set_x(cpu.x().wrapping_sub(1)),
        Mnemonic::Dey => cpu.set_y(cpu.y().wrapping_sub(1)),
        _ => return false,
    }
    true
}
