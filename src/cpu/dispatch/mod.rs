/*!
dispatch - Fetch, decode and execute one 6502 instruction.

Overview
========
1. Peek the opcode at PC (PC not yet advanced).
2. Look it up in the `OpcodeTable`. Undefined (or disabled undocumented)
   opcodes return `CpuError::Decode` with PC and registers untouched.
3. Advance PC past the opcode and resolve the operand through the
   addressing layer (which advances PC past the operand bytes and reports
   the indexing penalty).
4. Run the family handler chain. Each family claims its mnemonics and
   returns `true`; the first claim wins.
5. Finalize flags generically from the descriptor's auto-flag mask.
6. Return the cycle breakdown.

Families
========
```text
    load_store     LDA LDX LDY STA STX STY LAX SAX
    logical        AND ORA EOR BIT
    arithmetic     ADC SBC
    compare        CMP CPX CPY
    branches       BPL BMI BVC BVS BCC BCS BNE BEQ
    rmw            ASL LSR ROL ROR INC DEC INX INY DEX DEY
    undocumented   SLO RLA SRE RRA DCP ISB
    control_flow   JMP JSR RTS RTI BRK
    misc           transfers, stack ops, flag ops, NOP
```

Design Notes
============
- Handlers never touch cycles except branches (via `ExecContext::branch`).
- Atomicity on faults is the facade's job (state snapshot + bus journal);
  this layer may leave partial effects behind when it returns an error.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, resolve};
use crate::cpu::cycles::StepCycles;
use crate::cpu::error::CpuError;
use crate::cpu::execute::ExecContext;
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::{Mnemonic, OpcodeDescriptor, OpcodeTable};

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod finalize;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;
pub(crate) mod undocumented;

/// Look up the opcode at PC without consuming it.
pub(crate) fn decode<'t, C: CpuRegs>(
    cpu: &C,
    bus: &Bus,
    table: &'t OpcodeTable,
    allow_undocumented: bool,
) -> Result<&'t OpcodeDescriptor, CpuError> {
    let pc = cpu.pc();
    let opcode = bus.peek(pc);
    match table.get(opcode) {
        Some(d) if d.documented || allow_undocumented => Ok(d),
        _ => Err(CpuError::Decode {
            opcode,
            address: pc,
        }),
    }
}

/// Execute one instruction and return the cycles it took.
pub(crate) fn step<C: CpuRegs>(
    cpu: &mut C,
    bus: &mut Bus,
    table: &OpcodeTable,
    allow_undocumented: bool,
) -> Result<StepCycles, CpuError> {
    let desc = *decode(cpu, bus, table, allow_undocumented)?;
    cpu.advance_pc_one();

    let resolved = resolve(desc.mode, desc.access, cpu, bus);
    let mut ctx = ExecContext::default();

    if !execute(desc.mnemonic, resolved.operand, cpu, bus, &mut ctx) {
        // Every table mnemonic has a family; reaching here is a table bug.
        debug_assert!(false, "no handler for {:?}", desc.mnemonic);
        return Err(CpuError::Decode {
            opcode: desc.opcode,
            address: cpu.pc().wrapping_sub(desc.len as u16),
        });
    }

    finalize::apply_auto_flags(cpu, &desc, &ctx);

    Ok(StepCycles {
        base: desc.cycles,
        page_cross: resolved.penalty,
        branch: ctx.branch,
    })
}

/// Run the family chain for `m`.
fn execute<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    load_store::handle(m, operand, cpu, bus, ctx)
        || logical::handle(m, operand, cpu, bus, ctx)
        || arithmetic::handle(m, operand, cpu, bus, ctx)
        || compare::handle(m, operand, cpu, bus, ctx)
        || branches::handle(m, operand, cpu, bus, ctx)
        || rmw::handle(m, operand, cpu, bus, ctx)
        || undocumented::handle(m, operand, cpu, bus, ctx)
        || control_flow::handle(m, operand, cpu, bus, ctx)
        || misc::handle(m, operand, cpu, bus, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::addressing::AddressingMode;
    use crate::cpu::state::CpuState;
    use crate::cpu::table::OPCODE_TABLE;

    fn setup(program: &[u8]) -> (CpuState, Bus) {
        let mut bus = Bus::new();
        bus.load(0x0200, program);
        let mut cpu = CpuState::new();
        cpu.set_pc(0x0200);
        (cpu, bus)
    }

    #[test]
    fn undefined_opcode_leaves_pc() {
        let (mut cpu, mut bus) = setup(&[0x02]);
        let err = step(&mut cpu, &mut bus, &OPCODE_TABLE, true).unwrap_err();
        assert_eq!(
            err,
            CpuError::Decode {
                opcode: 0x02,
                address: 0x0200
            }
        );
        assert_eq!(cpu.pc(), 0x0200);
    }

    #[test]
    fn undocumented_can_be_disabled() {
        let (mut cpu, mut bus) = setup(&[0xA7, 0x10]);
        assert!(step(&mut cpu, &mut bus, &OPCODE_TABLE, false).is_err());
        assert_eq!(cpu.pc(), 0x0200);
        assert!(step(&mut cpu, &mut bus, &OPCODE_TABLE, true).is_ok());
        assert_eq!(cpu.pc(), 0x0202);
    }

    #[test]
    fn every_opcode_advances_pc_by_its_length() {
        for d in OPCODE_TABLE.iter() {
            if d.mnemonic.is_jump() {
                continue;
            }
            // Zero operand bytes keep every access in page zero and make a
            // taken branch land on the next instruction.
            let (mut cpu, mut bus) = setup(&[d.opcode, 0x00, 0x00]);
            let cycles = step(&mut cpu, &mut bus, &OPCODE_TABLE, true)
                .unwrap_or_else(|e| panic!("{:02X}: {e}", d.opcode));
            assert_eq!(
                cpu.pc(),
                0x0200 + d.len as u16,
                "{:02X} {}",
                d.opcode,
                d.mnemonic.name()
            );
            assert!(cycles.total() >= d.cycles as u32);
        }
    }

    #[test]
    fn every_opcode_has_a_family() {
        for d in OPCODE_TABLE.iter() {
            let (mut cpu, mut bus) = setup(&[]);
            let mut ctx = ExecContext::default();
            let operand = match d.mode {
                AddressingMode::Implicit => Operand::Implied,
                AddressingMode::Accumulator => Operand::Accumulator,
                AddressingMode::Immediate => Operand::Immediate(0),
                AddressingMode::Relative => Operand::Relative(0),
                _ => Operand::Address(0x0010),
            };
            assert!(
                execute(d.mnemonic, operand, &mut cpu, &mut bus, &mut ctx),
                "{:02X} unhandled",
                d.opcode
            );
        }
    }

    #[test]
    fn unaffected_flags_are_preserved() {
        // Run every non-jump opcode from two opposite P values and check that
        // only the declared flags can differ from the start value.
        for d in OPCODE_TABLE.iter() {
            if d.mnemonic.is_jump() {
                continue;
            }
            for start in [0x24u8, 0xEF] {
                let (mut cpu, mut bus) = setup(&[d.opcode, 0x00, 0x00]);
                cpu.status = start;
                step(&mut cpu, &mut bus, &OPCODE_TABLE, true)
                    .unwrap_or_else(|e| panic!("{:02X}: {e}", d.opcode));
                let changed = cpu.status() ^ start;
                assert_eq!(
                    changed & !d.affected_flags(),
                    0,
                    "{:02X} {} changed {changed:08b}",
                    d.opcode,
                    d.mnemonic.name()
                );
            }
        }
    }
}
