/*!
addressing.rs - 6502 addressing modes and operand resolution (the CPU's
memory port).

Overview
========
`resolve` turns an addressing mode plus the instruction stream into an
`Operand`, advancing PC past every operand byte it consumes and charging
the indexing penalty. The cycle penalty for a page crossing
depends on how the instruction uses the address (`Access`):

```text
    Read              +1 only when the page changed
    Write / RMW       +1 always (the CPU cannot skip the fix-up cycle)
```

Only abs,X / abs,Y / (zp),Y are penalty-eligible. Zero-page indexed modes
wrap inside page zero and never cross.

Quirks modeled
==============
- Zero-page indexing and zero-page pointer reads wrap mod 256.
- `JMP ($xxFF)` takes its high byte from `$xx00` (no carry into the page).

Responsibilities
================
- Pure address / operand resolution. No cycle ticking, no flag changes.
- Callers never advance PC by hand; these helpers do it.
*/

use crate::address::MemAddress;
use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;

/// 6502 addressing modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implicit,
    Accumulator,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Relative,
    /// `JMP ($nnnn)` only.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y`
    IndirectIndexed,
}

impl AddressingMode {
    /// Instruction length in bytes for this mode (opcode included).
    pub const fn len(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndexedIndirect
            | IndirectIndexed => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }

    /// Modes whose 16-bit indexing can cross a page.
    pub const fn can_cross_page(self) -> bool {
        use AddressingMode::*;
        matches!(self, AbsoluteX | AbsoluteY | IndirectIndexed)
    }
}

/// How an instruction uses its effective address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    Read,
    Write,
    ReadModifyWrite,
    /// No data access through the operand (jumps, implied ops).
    None,
}

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Implied,
    Accumulator,
    Immediate(u8),
    Address(u16),
    Relative(i8),
}

impl Operand {
    #[inline]
    pub fn address(self) -> Option<u16> {
        match self {
            Operand::Address(a) => Some(a),
            _ => None,
        }
    }
}

/// Output of `resolve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub operand: Operand,
    /// Extra cycles charged for indexing (0 or 1).
    pub penalty: u8,
}

/// Indexing cost for `mode` under `access`, given whether the page changed.
#[inline]
pub(crate) fn page_penalty(mode: AddressingMode, access: Access, crossed: bool) -> u8 {
    if !mode.can_cross_page() {
        return 0;
    }
    match access {
        Access::Read => crossed as u8,
        Access::Write | Access::ReadModifyWrite => 1,
        Access::None => 0,
    }
}

/// Resolve the operand for `mode`, consuming operand bytes at PC.
///
/// PC must point just past the opcode byte on entry; on return it points at
/// the next instruction.
pub(crate) fn resolve<C: CpuRegs>(
    mode: AddressingMode,
    access: Access,
    cpu: &mut C,
    bus: &mut Bus,
) -> Resolved {
    use AddressingMode::*;
    let mut crossed = false;
    let operand = match mode {
        Implicit => Operand::Implied,
        Accumulator => Operand::Accumulator,
        Immediate => Operand::Immediate(fetch_byte(cpu, bus)),
        ZeroPage => Operand::Address(fetch_byte(cpu, bus) as u16),
        ZeroPageX => {
            let base = MemAddress::new(fetch_byte(cpu, bus) as u16);
            Operand::Address(base.add_low(cpu.x()).value())
        }
        ZeroPageY => {
            let base = MemAddress::new(fetch_byte(cpu, bus) as u16);
            Operand::Address(base.add_low(cpu.y()).value())
        }
        Absolute => Operand::Address(fetch_word(cpu, bus)),
        AbsoluteX => {
            let (addr, c) = MemAddress::new(fetch_word(cpu, bus)).offset(cpu.x());
            crossed = c;
            Operand::Address(addr.value())
        }
        AbsoluteY => {
            let (addr, c) = MemAddress::new(fetch_word(cpu, bus)).offset(cpu.y());
            crossed = c;
            Operand::Address(addr.value())
        }
        Relative => Operand::Relative(fetch_byte(cpu, bus) as i8),
        Indirect => {
            let ptr = fetch_word(cpu, bus);
            Operand::Address(read_word_indirect_bug(bus, ptr))
        }
        IndexedIndirect => {
            let zp = fetch_byte(cpu, bus).wrapping_add(cpu.x());
            Operand::Address(read_word_zp(bus, zp))
        }
        IndirectIndexed => {
            let zp = fetch_byte(cpu, bus);
            let base = MemAddress::new(read_word_zp(bus, zp));
            let (addr, c) = base.offset(cpu.y());
            crossed = c;
            Operand::Address(addr.value())
        }
    };
    Resolved {
        operand,
        penalty: page_penalty(mode, access, crossed),
    }
}

/// Value an instruction operates on: immediate byte, memory byte or A.
#[inline]
pub(crate) fn read_operand<C: CpuRegs>(operand: Operand, cpu: &C, bus: &mut Bus) -> u8 {
    match operand {
        Operand::Immediate(v) => v,
        Operand::Address(addr) => bus.read(addr),
        Operand::Accumulator => cpu.a(),
        Operand::Implied | Operand::Relative(_) => 0,
    }
}

// -------------------------
// Instruction stream
// -------------------------

/// Fetch next byte from the instruction stream, incrementing PC.
#[inline]
pub(crate) fn fetch_byte<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let v = bus.read(cpu.pc());
    cpu.advance_pc_one();
    v
}

/// Fetch next little-endian word (low, then high), incrementing PC twice.
#[inline]
pub(crate) fn fetch_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = fetch_byte(cpu, bus);
    let hi = fetch_byte(cpu, bus);
    MemAddress::from_bytes(lo, hi).value()
}

// -------------------------
// Low-level word helpers
// -------------------------

/// Read a little-endian pointer from zero page; the high byte comes from
/// `(base + 1) mod 256`.
#[inline]
pub(crate) fn read_word_zp(bus: &mut Bus, base: u8) -> u16 {
    let lo = bus.read(base as u16);
    let hi = bus.read(base.wrapping_add(1) as u16);
    MemAddress::from_bytes(lo, hi).value()
}

/// `JMP (ind)` pointer read: the high byte is fetched from the same page as
/// the low byte, so `$30FF` pairs with `$3000`.
#[inline]
pub(crate) fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> u16 {
    let ptr = MemAddress::new(addr);
    let lo = bus.read(ptr.value());
    let hi = bus.read(ptr.add_low(1).value());
    MemAddress::from_bytes(lo, hi).value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::state::CpuState;

    fn setup(program: &[u8]) -> (CpuState, Bus) {
        let mut bus = Bus::new();
        bus.load(0x0400, program);
        let mut cpu = CpuState::new();
        cpu.set_pc(0x0400);
        (cpu, bus)
    }

    #[test]
    fn lengths_per_mode() {
        assert_eq!(AddressingMode::Implicit.len(), 1);
        assert_eq!(AddressingMode::Accumulator.len(), 1);
        assert_eq!(AddressingMode::Relative.len(), 2);
        assert_eq!(AddressingMode::IndirectIndexed.len(), 2);
        assert_eq!(AddressingMode::Indirect.len(), 3);
        assert_eq!(AddressingMode::AbsoluteY.len(), 3);
    }

    #[test]
    fn zero_page_x_wraps() {
        let (mut cpu, mut bus) = setup(&[0xF0]);
        cpu.set_x(0x20);
        let r = resolve(AddressingMode::ZeroPageX, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x0010));
        assert_eq!(cpu.pc(), 0x0401);
    }

    #[test]
    fn zero_page_y_wraps() {
        let (mut cpu, mut bus) = setup(&[0xFF]);
        cpu.set_y(0x01);
        let r = resolve(AddressingMode::ZeroPageY, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x0000));
    }

    #[test]
    fn abs_x_read_penalty_only_on_cross() {
        let (mut cpu, mut bus) = setup(&[0xF5, 0x80, 0x00, 0x80]);
        cpu.set_x(0x10);
        let r = resolve(AddressingMode::AbsoluteX, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x8105));
        assert_eq!(r.penalty, 1);

        let r = resolve(AddressingMode::AbsoluteX, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x8010));
        assert_eq!(r.penalty, 0);
        assert_eq!(cpu.pc(), 0x0404);
    }

    #[test]
    fn abs_y_write_always_pays() {
        let (mut cpu, mut bus) = setup(&[0x00, 0x02]);
        cpu.set_y(0x01);
        let r = resolve(AddressingMode::AbsoluteY, Access::Write, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x0201));
        assert_eq!(r.penalty, 1);
    }

    #[test]
    fn indexed_indirect_wraps_pointer_in_zero_page() {
        let (mut cpu, mut bus) = setup(&[0xFE]);
        cpu.set_x(0x01);
        bus.poke(0x00FF, 0x34);
        bus.poke(0x0000, 0x12);
        let r = resolve(AddressingMode::IndexedIndirect, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x1234));
        assert_eq!(r.penalty, 0);
    }

    #[test]
    fn indirect_indexed_reports_cross() {
        let (mut cpu, mut bus) = setup(&[0x10]);
        cpu.set_y(0x20);
        bus.poke(0x0010, 0xF0);
        bus.poke(0x0011, 0x12);
        let r = resolve(AddressingMode::IndirectIndexed, Access::Read, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Address(0x1310));
        assert_eq!(r.penalty, 1);
    }

    #[test]
    fn indirect_jmp_bug() {
        let mut bus = Bus::new();
        bus.poke(0x10FF, 0x34);
        bus.poke(0x1000, 0x12);
        bus.poke(0x1100, 0x56);
        assert_eq!(read_word_indirect_bug(&mut bus, 0x10FF), 0x1234);
        bus.poke(0x2000, 0xCD);
        bus.poke(0x2001, 0xAB);
        assert_eq!(read_word_indirect_bug(&mut bus, 0x2000), 0xABCD);
    }

    #[test]
    fn relative_is_signed() {
        let (mut cpu, mut bus) = setup(&[0xFE]);
        let r = resolve(AddressingMode::Relative, Access::None, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Relative(-2));
    }

    #[test]
    fn implied_and_accumulator_consume_nothing() {
        let (mut cpu, mut bus) = setup(&[0xAA]);
        let r = resolve(AddressingMode::Implicit, Access::None, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Implied);
        let r = resolve(AddressingMode::Accumulator, Access::ReadModifyWrite, &mut cpu, &mut bus);
        assert_eq!(r.operand, Operand::Accumulator);
        assert_eq!(cpu.pc(), 0x0400);
    }

    #[test]
    fn read_operand_sources() {
        let (mut cpu, mut bus) = setup(&[]);
        cpu.set_a(0x77);
        bus.poke(0x0033, 0x99);
        assert_eq!(read_operand(Operand::Immediate(5), &cpu, &mut bus), 5);
        assert_eq!(read_operand(Operand::Address(0x33), &cpu, &mut bus), 0x99);
        assert_eq!(read_operand(Operand::Accumulator, &cpu, &mut bus), 0x77);
    }
}
