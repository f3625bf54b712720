/*!
arithmetic.rs - ADC / SBC opcode family handler

Binary arithmetic only; the decimal flag is ignored. Carry and overflow
are recorded in the execution context and finalized together with N/Z.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::{ExecContext, adc, sbc};
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
        Mnemonic::Adc => {
            let v = read_operand(operand, cpu, bus);
            adc(cpu, ctx, v);
        }
        Mnemonic::Sbc => {
            let v = read_operand(operand, cpu, bus);
            sbc(cpu, ctx, v);
        }
        _ => return false,
    }
    true
}
