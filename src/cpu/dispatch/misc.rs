/*!
misc.rs - Transfers, stack, flag and NOP opcodes

Overview
========
Transfers
    TAX TAY TXA TYA TSX    destination <- source; N/Z
    TXS                    SP <- X; no flags

Stack
    PHA  push A            PHP  push P with B and unused set
    PLA  pop into A; N/Z   PLP  pop into P (break kept, unused forced)

Flags
    CLC SEC CLI SEI CLD SED CLV

NOP (documented and undocumented variants) does nothing beyond the
operand fetch the addressing layer already performed.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{ExecContext, pop, push, push_status};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    _operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    match m {
        // ---------------- Transfers ----------------
        Mnemonic::Tax => cpu.set_x(cpu.a()),
        Mnemonic::Tay => cpu.set_y(cpu.a()),
        Mnemonic::Txa => cpu.set_a(cpu.x()),
        Mnemonic::Tya => cpu.set_a(cpu.y()),
        Mnemonic::Tsx => cpu.set_x(cpu.sp()),
        Mnemonic::Txs => cpu.set_sp(cpu.x()),

        // ---------------- Stack ----------------
        Mnemonic::Pha => {
            let a = cpu.a();
            push(cpu, bus, a);
        }
        Mnemonic::Php => push_status(cpu, bus, true),
        Mnemonic::Pla => {
            let v = pop(cpu, bus);
            cpu.set_a(v);
        }
        Mnemonic::Plp => {
            let v = pop(cpu, bus);
            cpu.set_status(v);
        }

        // ---------------- Flags ----------------
        Mnemonic::Clc => ctx.assign_flag(cpu, CARRY, false),
        Mnemonic::Sec => ctx.assign_flag(cpu, CARRY, true),
        Mnemonic::Cli => ctx.assign_flag(cpu, IRQ_DISABLE, false),
        Mnemonic::Sei => ctx.assign_flag(cpu, IRQ_DISABLE, true),
        Mnemonic::Cld => ctx.assign_flag(cpu, DECIMAL, false),
        Mnemonic::Sed => ctx.assign_flag(cpu, DECIMAL, true),
        Mnemonic::Clv => ctx.assign_flag(cpu, OVERFLOW, false),

        Mnemonic::Nop => {}
        _ => return false,
    }
    true
}
