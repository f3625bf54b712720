/*!
branches.rs - Relative branch opcode handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Overview
========
Evaluates the branch condition against P and, when taken, moves PC by the
signed displacement. The displacement is relative to the address of the
instruction that follows the branch.

Cycle Rules
===========
Base cost: 2 cycles (from the table).
Taken: +1 cycle.
Taken and the target lies on a different page than the next instruction: +2.

The extra cycles are reported through `ExecContext::branch`; no flags change.
*/

use crate::address::MemAddress;
use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::cycles::branch_cycles;
use crate::cpu::execute::ExecContext;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    _bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    let taken = match m {
        Mnemonic::Bpl => !cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bmi => cpu.is_flag_set(NEGATIVE),
        Mnemonic::Bvc => !cpu.is_flag_set(OVERFLOW),
        Mnemonic::Bvs => cpu.is_flag_set(OVERFLOW),
        Mnemonic::Bcc => !cpu.is_flag_set(CARRY),
        Mnemonic::Bcs => cpu.is_flag_set(CARRY),
        Mnemonic::Bne => !cpu.is_flag_set(ZERO),
        Mnemonic::Beq => cpu.is_flag_set(ZERO),
        _ => return false,
    };
    let Operand::Relative(offset) = operand else {
        return true;
    };
    if !taken {
        ctx.branch = branch_cycles(false, false);
        return true;
    }
    let (target, crossed) = MemAddress::new(cpu.pc()).offset_signed(offset);
    cpu.set_pc(target.value());
    ctx.branch = branch_cycles(true, crossed);
    true
}
