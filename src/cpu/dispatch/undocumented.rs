/*!
undocumented.rs - Stable undocumented read-modify-write combinations

Each instruction performs a memory RMW step and then feeds the written
value into an accumulator operation:

```text
    SLO   ASL mem, then ORA        C from the shift
    RLA   ROL mem, then AND        C from the rotate
    SRE   LSR mem, then EOR        C from the shift
    RRA   ROR mem, then ADC        ADC consumes the carry produced by ROR
    DCP   DEC mem, then CMP        C from the compare
    ISB   INC mem, then SBC        C and V from the subtraction
```

LAX and SAX live with the loads and stores; the NOP variants with `misc`.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{ExecContext, adc, asl, compare, lsr, modify, rol, ror, sbc};
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
        Mnemonic::Slo => {
            let v = modify(operand, cpu, bus, |_, v| asl(ctx, v));
            cpu.set_a(cpu.a() | v);
        }
        Mnemonic::Rla => {
            let c = ctx.carry_in(cpu);
            let v = modify(operand, cpu, bus, |_, v| rol(ctx, c, v));
            cpu.set_a(cpu.a() & v);
        }
        Mnemonic::Sre => {
            let v = modify(operand, cpu, bus, |_, v| lsr(ctx, v));
            cpu.set_a(cpu.a() ^ v);
        }
        Mnemonic::Rra => {
            let c = ctx.carry_in(cpu);
            let v = modify(operand, cpu, bus, |_, v| ror(ctx, c, v));
            adc(cpu, ctx, v);
        }
        Mnemonic::Dcp => {
            let v = modify(operand, cpu, bus, |_, v| v.wrapping_sub(1));
            let a = cpu.a();
            compare(cpu, ctx, a, v);
        }
        Mnemonic::Isb => {
            let v = modify(operand, cpu, bus, |_, v| v.wrapping_add(1));
            sbc(cpu, ctx, v);
        }
        _ => return false,
    }
    true
}
