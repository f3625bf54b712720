/*!
trace.rs - Disassembly and nestest-style trace lines.

Overview
========
Everything here reads memory through `Bus::peek`, so producing a trace line
never disturbs the machine (no staged writes, no faults, no PC movement).

Two renderings are offered:

- `disassemble`: plain assembler syntax (`LDA $10,X`), suitable for
  listings.
- `trace_line`: the column layout used by the well-known nestest log,
  with effective addresses and memory values annotated:

```text
C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
C6BD  04 A9    *NOP $A9 = 00                    A:AA X:97 Y:4E P:EF SP:F5 CYC:14579
```

Undocumented opcodes are marked with `*` in the column before the mnemonic.
Undefined opcodes render as `.db $XX`.
*/

use crate::address::MemAddress;
use crate::bus::Bus;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::state::CpuState;
use crate::cpu::table::{Mnemonic, OpcodeDescriptor, OpcodeTable};

/// Disassemble the instruction at `pc`. Returns the text and the number of
/// bytes it occupies (1 for undefined opcodes).
pub fn disassemble(table: &OpcodeTable, bus: &Bus, pc: u16) -> (String, u8) {
    let opcode = bus.peek(pc);
    let Some(desc) = table.get(opcode) else {
        return (format!(".db ${opcode:02X}"), 1);
    };
    let (lo, hi) = operand_bytes(bus, pc);
    let word = MemAddress::from_bytes(lo, hi).value();
    let name = desc.mnemonic.name();
    let next = pc.wrapping_add(desc.len as u16);

    use AddressingMode::*;
    let text = match desc.mode {
        Implicit => name.to_string(),
        Accumulator => format!("{name} A"),
        Immediate => format!("{name} #${lo:02X}"),
        ZeroPage => format!("{name} ${lo:02X}"),
        ZeroPageX => format!("{name} ${lo:02X},X"),
        ZeroPageY => format!("{name} ${lo:02X},Y"),
        Absolute => format!("{name} ${word:04X}"),
        AbsoluteX => format!("{name} ${word:04X},X"),
        AbsoluteY => format!("{name} ${word:04X},Y"),
        Indirect => format!("{name} (${word:04X})"),
        IndexedIndirect => format!("{name} (${lo:02X},X)"),
        IndirectIndexed => format!("{name} (${lo:02X}),Y"),
        Relative => format!("{name} ${:04X}", branch_target(next, lo)),
    };
    (text, desc.len)
}

/// One nestest-format line describing the instruction about to execute in
/// `state`. The cycle column is the running total before the instruction.
pub fn trace_line(table: &OpcodeTable, bus: &Bus, state: &CpuState) -> String {
    let pc = state.pc();
    let opcode = bus.peek(pc);
    let (marker, text, len) = match table.get(opcode) {
        Some(desc) => {
            let marker = if desc.documented { ' ' } else { '*' };
            (marker, annotated(desc, bus, state), desc.len)
        }
        None => (' ', format!(".db ${opcode:02X}"), 1),
    };

    let bytes = (0..len as u16)
        .map(|i| format!("{:02X}", bus.peek(pc.wrapping_add(i))))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{:04X}  {:<9}{}{:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
        pc,
        bytes,
        marker,
        text,
        state.a(),
        state.x(),
        state.y(),
        state.status(),
        state.sp(),
        state.total_cycles()
    )
}

fn annotated(desc: &OpcodeDescriptor, bus: &Bus, state: &CpuState) -> String {
    let pc = state.pc();
    let (lo, hi) = operand_bytes(bus, pc);
    let word = MemAddress::from_bytes(lo, hi).value();
    let name = desc.mnemonic.name();
    let next = pc.wrapping_add(desc.len as u16);
    let jump = matches!(desc.mnemonic, Mnemonic::Jmp | Mnemonic::Jsr);

    use AddressingMode::*;
    match desc.mode {
        Implicit => name.to_string(),
        Accumulator => format!("{name} A"),
        Immediate => format!("{name} #${lo:02X}"),
        ZeroPage => format!("{name} ${lo:02X} = {:02X}", bus.peek(lo as u16)),
        ZeroPageX | ZeroPageY => {
            let (index, reg) = if desc.mode == ZeroPageX {
                ('X', state.x())
            } else {
                ('Y', state.y())
            };
            let ea = lo.wrapping_add(reg) as u16;
            format!(
                "{name} ${lo:02X},{index} @ {ea:02X} = {:02X}",
                bus.peek(ea)
            )
        }
        Absolute if jump => format!("{name} ${word:04X}"),
        Absolute => format!("{name} ${word:04X} = {:02X}", bus.peek(word)),
        AbsoluteX | AbsoluteY => {
            let (index, reg) = if desc.mode == AbsoluteX {
                ('X', state.x())
            } else {
                ('Y', state.y())
            };
            let ea = word.wrapping_add(reg as u16);
            format!(
                "{name} ${word:04X},{index} @ {ea:04X} = {:02X}",
                bus.peek(ea)
            )
        }
        Indirect => {
            let ptr = MemAddress::new(word);
            let target = MemAddress::from_bytes(bus.peek(word), bus.peek(ptr.add_low(1).value()));
            format!("{name} (${word:04X}) = {:04X}", target.value())
        }
        IndexedIndirect => {
            let zp = lo.wrapping_add(state.x());
            let ea = zero_page_word(bus, zp);
            format!(
                "{name} (${lo:02X},X) @ {zp:02X} = {ea:04X} = {:02X}",
                bus.peek(ea)
            )
        }
        IndirectIndexed => {
            let base = zero_page_word(bus, lo);
            let ea = base.wrapping_add(state.y() as u16);
            format!(
                "{name} (${lo:02X}),Y = {base:04X} @ {ea:04X} = {:02X}",
                bus.peek(ea)
            )
        }
        Relative => format!("{name} ${:04X}", branch_target(next, lo)),
    }
}

#[inline]
fn operand_bytes(bus: &Bus, pc: u16) -> (u8, u8) {
    (bus.peek(pc.wrapping_add(1)), bus.peek(pc.wrapping_add(2)))
}

#[inline]
fn zero_page_word(bus: &Bus, zp: u8) -> u16 {
    MemAddress::from_bytes(bus.peek(zp as u16), bus.peek(zp.wrapping_add(1) as u16)).value()
}

#[inline]
fn branch_target(next: u16, offset: u8) -> u16 {
    MemAddress::new(next).offset_signed(offset as i8).0.value()
}
