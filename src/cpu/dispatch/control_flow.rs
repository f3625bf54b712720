/*!
control_flow.rs - Jumps, subroutines and software interrupts

Overview
========
```text
    JMP abs / (ind)   PC <- operand address (indirect pointer bug applied
                      by the addressing layer)
    JSR abs           push (address of last JSR byte), PC <- target
    RTS               pop, PC <- popped + 1
    RTI               pop P (break kept, unused forced), then pop PC
    BRK               padding byte skipped; push PC, push P|B, set I,
                      PC <- [$FFFE]
```

None of these advance PC past the instruction: the value they leave in PC
is the next instruction to execute.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::execute::{ExecContext, pop, pop_word, push_word};
use crate::cpu::interrupts::{Interrupt, enter};
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
        // ---------------- JMP ----------------
        Mnemonic::Jmp => {
            if let Some(target) = operand.address() {
                cpu.set_pc(target);
            }
        }

        // ---------------- JSR / RTS ----------------
        Mnemonic::Jsr => {
            if let Some(target) = operand.address() {
                let ret = cpu.pc().wrapping_sub(1);
                push_word(cpu, bus, ret);
                cpu.set_pc(target);
            }
        }
        Mnemonic::Rts => {
            let ret = pop_word(cpu, bus);
            cpu.set_pc(ret.wrapping_add(1));
        }

        // ---------------- RTI ----------------
        Mnemonic::Rti => {
            let p = pop(cpu, bus);
            cpu.set_status(p);
            let ret = pop_word(cpu, bus);
            cpu.set_pc(ret);
        }

        // ---------------- BRK ----------------
        Mnemonic::Brk => {
            enter(cpu, bus, Interrupt::Brk);
        }
        _ => return false,
    }
    true
}
