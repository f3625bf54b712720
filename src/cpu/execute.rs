/*!
execute.rs - 6502 instruction semantic helpers (ALU, stack, RMW)

Purpose
=======
Side-effect logic shared by every dispatch family. Helpers write results
through `CpuRegs` (which latches the last result for N/Z) and record the
carry / overflow outcomes in an `ExecContext`; the finalizer copies those
into P afterwards according to the opcode's auto-flag mask.

Scope (crate-visible)
---------------------
Execution context:
    ExecContext { carry, overflow, touched, branch }

Pure arithmetic:
    add_with_carry, subtract_with_borrow

Register-level ALU (generic):
    adc, sbc, compare, bit

Shifts / rotates (value in, value out, carry into the context):
    asl, lsr, rol, ror

Memory / accumulator RMW:
    modify

Stack (generic):
    push, pop, push_word, pop_word, push_status

Design Notes
============
- Decimal mode is not implemented; ADC/SBC are always binary.
- SBC is ADC of the one's complement, which yields "carry = no borrow" and
  the usual signed-overflow rule.
*/

use crate::bus::Bus;
use crate::cpu::addressing::Operand;
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, STACK_BASE};

// ---------------------------------------------------------------------------
// Execution context
// ---------------------------------------------------------------------------

/// Per-instruction scratch shared between the body and the flag finalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ExecContext {
    /// Carry produced by the instruction, if any.
    pub carry: Option<bool>,
    /// Overflow produced by the instruction, if any.
    pub overflow: Option<bool>,
    /// Flags the body assigned directly; the finalizer skips them.
    pub touched: u8,
    /// Extra cycles from a taken branch.
    pub branch: u8,
}

impl ExecContext {
    #[inline]
    pub fn set_carry(&mut self, c: bool) {
        self.carry = Some(c);
    }

    #[inline]
    pub fn set_overflow(&mut self, v: bool) {
        self.overflow = Some(v);
    }

    /// Carry as the next ALU stage should see it: this instruction's carry
    /// if it produced one, otherwise the flag in P.
    #[inline]
    pub fn carry_in<C: CpuRegs>(&self, cpu: &C) -> bool {
        self.carry.unwrap_or_else(|| cpu.is_flag_set(CARRY))
    }

    /// Assign a flag now and keep the finalizer away from it.
    #[inline]
    pub fn assign_flag<C: CpuRegs>(&mut self, cpu: &mut C, mask: u8, on: bool) {
        cpu.assign_flag(mask, on);
        self.touched |= mask;
    }
}

// ---------------------------------------------------------------------------
// Pure arithmetic
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AluResult {
    pub value: u8,
    pub carry: bool,
    pub overflow: bool,
}

/// `a + v + carry_in`; carry = unsigned overflow, overflow = signed overflow.
#[inline]
pub(crate) fn add_with_carry(a: u8, v: u8, carry_in: bool) -> AluResult {
    let sum = a as u16 + v as u16 + carry_in as u16;
    let value = sum as u8;
    AluResult {
        value,
        carry: sum > 0xFF,
        overflow: ((a ^ value) & (v ^ value) & 0x80) != 0,
    }
}

/// `a - v - (1 - carry_in)`; carry = no borrow, overflow = signed overflow.
#[inline]
pub(crate) fn subtract_with_borrow(a: u8, v: u8, carry_in: bool) -> AluResult {
    add_with_carry(a, !v, carry_in)
}

// ---------------------------------------------------------------------------
// Register-level ALU
// ---------------------------------------------------------------------------

pub(crate) fn adc<C: CpuRegs>(cpu: &mut C, ctx: &mut ExecContext, v: u8) {
    let r = add_with_carry(cpu.a(), v, ctx.carry_in(cpu));
    cpu.set_a(r.value);
    ctx.set_carry(r.carry);
    ctx.set_overflow(r.overflow);
}

pub(crate) fn sbc<C: CpuRegs>(cpu: &mut C, ctx: &mut ExecContext, v: u8) {
    let r = subtract_with_borrow(cpu.a(), v, ctx.carry_in(cpu));
    cpu.set_a(r.value);
    ctx.set_carry(r.carry);
    ctx.set_overflow(r.overflow);
}

/// CMP / CPX / CPY: N and Z from `reg - v`, carry when `reg >= v`.
pub(crate) fn compare<C: CpuRegs>(cpu: &mut C, ctx: &mut ExecContext, reg: u8, v: u8) {
    cpu.set_last_result(reg.wrapping_sub(v));
    ctx.set_carry(reg >= v);
}

/// BIT: N and V copied from the operand, Z from `A & v`.
pub(crate) fn bit<C: CpuRegs>(cpu: &mut C, ctx: &mut ExecContext, v: u8) {
    let masked = cpu.a() & v;
    cpu.set_last_result(masked);
    ctx.assign_flag(cpu, NEGATIVE, v & NEGATIVE != 0);
    ctx.assign_flag(cpu, OVERFLOW, v & OVERFLOW != 0);
}

// ---------------------------------------------------------------------------
// Shifts / rotates
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl(ctx: &mut ExecContext, v: u8) -> u8 {
    ctx.set_carry(v & 0x80 != 0);
    v << 1
}

#[inline]
pub(crate) fn lsr(ctx: &mut ExecContext, v: u8) -> u8 {
    ctx.set_carry(v & 0x01 != 0);
    v >> 1
}

#[inline]
pub(crate) fn rol(ctx: &mut ExecContext, carry_in: bool, v: u8) -> u8 {
    ctx.set_carry(v & 0x80 != 0);
    (v << 1) | carry_in as u8
}

#[inline]
pub(crate) fn ror(ctx: &mut ExecContext, carry_in: bool, v: u8) -> u8 {
    ctx.set_carry(v & 0x01 != 0);
    (v >> 1) | ((carry_in as u8) << 7)
}

// ---------------------------------------------------------------------------
// Read-modify-write
// ---------------------------------------------------------------------------

/// Apply `f` to the accumulator or to the byte at the operand address and
/// store the result back. Returns the new value, which is also latched as
/// the last result.
pub(crate) fn modify<C, F>(operand: Operand, cpu: &mut C, bus: &mut Bus, f: F) -> u8
where
    C: CpuRegs,
    F: FnOnce(&C, u8) -> u8,
{
    match operand {
        Operand::Accumulator => {
            let v = cpu.a();
            let r = f(cpu, v);
            cpu.set_a(r);
            r
        }
        Operand::Address(addr) => {
            let v = bus.read(addr);
            let r = f(cpu, v);
            bus.write(addr, r);
            cpu.set_last_result(r);
            r
        }
        _ => {
            debug_assert!(false, "modify on non-address operand {operand:?}");
            cpu.last_result()
        }
    }
}

// ---------------------------------------------------------------------------
// Stack helpers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn push<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u8) {
    let sp = cpu.sp();
    bus.write(STACK_BASE | sp as u16, v);
    cpu.set_sp(sp.wrapping_sub(1));
}

#[inline]
pub(crate) fn pop<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u8 {
    let sp = cpu.sp().wrapping_add(1);
    cpu.set_sp(sp);
    bus.read(STACK_BASE | sp as u16)
}

/// High byte first, so the low byte sits at the lower stack address.
#[inline]
pub(crate) fn push_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, v: u16) {
    let [lo, hi] = v.to_le_bytes();
    push(cpu, bus, hi);
    push(cpu, bus, lo);
}

#[inline]
pub(crate) fn pop_word<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u16 {
    let lo = pop(cpu, bus);
    let hi = pop(cpu, bus);
    u16::from_le_bytes([lo, hi])
}

/// Push P with the unused bit set and break set (PHP / BRK) or clear (IRQ / NMI).
#[inline]
pub(crate) fn push_status<C: CpuRegs>(cpu: &mut C, bus: &mut Bus, set_break: bool) {
    let v = cpu.compose_status_for_push(set_break);
    push(cpu, bus, v);
}
