/*!
finalize.rs - Generic status-flag finalization after an instruction body.

Overview
========
Every descriptor lists the flags its instruction affects, split into
`auto_flags` (derived here) and `manual_flags` (assigned by the body).
After the body runs, the pending set is

```text
    auto_flags & !(manual_flags | ctx.touched)
```

and each pending flag is derived the same way for every instruction:

```text
    N  bit 7 of the last result
    Z  last result == 0
    C  carry recorded in the execution context
    V  overflow recorded in the execution context
```

Flags outside the opcode's mask are never written, which is what keeps
e.g. `INX` from disturbing C or V.
*/

use crate::cpu::execute::ExecContext;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::table::OpcodeDescriptor;

pub(crate) fn apply_auto_flags<C: CpuRegs>(cpu: &mut C, desc: &OpcodeDescriptor, ctx: &ExecContext) {
    let pending = desc.auto_flags & !(desc.manual_flags | ctx.touched);
    if pending == 0 {
        return;
    }
    let result = cpu.last_result();
    if pending & NEGATIVE != 0 {
        cpu.assign_flag(NEGATIVE, result & 0x80 != 0);
    }
    if pending & ZERO != 0 {
        cpu.assign_flag(ZERO, result == 0);
    }
    if pending & CARRY != 0 {
        debug_assert!(ctx.carry.is_some(), "{} did not record carry", desc.mnemonic.name());
        if let Some(c) = ctx.carry {
            cpu.assign_flag(CARRY, c);
        }
    }
    if pending & OVERFLOW != 0 {
        debug_assert!(
            ctx.overflow.is_some(),
            "{} did not record overflow",
            desc.mnemonic.name()
        );
        if let Some(v) = ctx.overflow {
            cpu.assign_flag(OVERFLOW, v);
        }
    }
}
