/*!
regs.rs - `CpuRegs`, the register + flag interface all instruction code is
generic over.

Scope
=====
The trait covers architectural registers, the status byte, the last-result
latch and PC arithmetic. It does NOT include:
  - Bus access of any kind
  - Stack push/pop
  - Instruction fetch
Those stay explicit at call sites via `&mut Bus` (see `execute.rs` and
`addressing.rs`), which keeps implementations trivial and avoids
over-borrowing.

Design Goals
============
1. Static dispatch via generics (no trait objects) in hot paths.
2. Default methods for composites (`advance_pc_one`,
   `compose_status_for_push`).
3. Method names mirror `CpuState` so the two read the same.
*/

use crate::cpu::state::{BREAK, CpuState, UNUSED};

/// Register, flag and last-result access needed by decode / execute code.
///
/// A/X/Y setters latch the written value as the last result, so N/Z can be
/// derived after the instruction body without every handler doing it.
pub trait CpuRegs {
    // ---------------------------------------------------------------------
    // Read accessors
    // ---------------------------------------------------------------------
    fn a(&self) -> u8;
    fn x(&self) -> u8;
    fn y(&self) -> u8;
    fn sp(&self) -> u8;
    fn pc(&self) -> u16;
    fn status(&self) -> u8;
    fn last_result(&self) -> u8;

    // ---------------------------------------------------------------------
    // Mutators
    // ---------------------------------------------------------------------
    fn set_a(&mut self, v: u8);
    fn set_x(&mut self, v: u8);
    fn set_y(&mut self, v: u8);
    fn set_sp(&mut self, v: u8);
    fn set_pc(&mut self, v: u16);
    /// Instruction-visible P load: break bit kept, unused bit forced.
    fn set_status(&mut self, v: u8);
    /// Latch a flags-only result (compare, BIT, memory INC/DEC).
    fn set_last_result(&mut self, v: u8);

    // ---------------------------------------------------------------------
    // Program Counter helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    fn advance_pc(&mut self, delta: u16);

    #[inline]
    fn advance_pc_one(&mut self) {
        self.advance_pc(1);
    }

    // ---------------------------------------------------------------------
    // Flag operations
    // ---------------------------------------------------------------------

    fn is_flag_set(&self, mask: u8) -> bool;

    /// Set or clear the bits in `mask`. The unused bit is never cleared.
    fn assign_flag(&mut self, mask: u8, value: bool);

    /// Status byte for a stack push. UNUSED is always set; BREAK only when
    /// `set_break` (PHP / BRK).
    #[inline]
    fn compose_status_for_push(&self, set_break: bool) -> u8 {
        let v = self.status() | UNUSED;
        if set_break { v | BREAK } else { v & !BREAK }
    }
}

// -------------------------------------------------------------------------
// Implementation: CpuState
// -------------------------------------------------------------------------

impl CpuRegs for CpuState {
    #[inline]
    fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    fn status(&self) -> u8 {
        CpuState::status(self)
    }
    #[inline]
    fn last_result(&self) -> u8 {
        self.last_result
    }

    #[inline]
    fn set_a(&mut self, v: u8) {
        CpuState::set_a(self, v);
    }
    #[inline]
    fn set_x(&mut self, v: u8) {
        CpuState::set_x(self, v);
    }
    #[inline]
    fn set_y(&mut self, v: u8) {
        CpuState::set_y(self, v);
    }
    #[inline]
    fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    fn set_status(&mut self, v: u8) {
        CpuState::set_status(self, v);
    }
    #[inline]
    fn set_last_result(&mut self, v: u8) {
        self.last_result = v;
    }

    #[inline]
    fn advance_pc(&mut self, delta: u16) {
        CpuState::advance_pc(self, delta);
    }

    #[inline]
    fn is_flag_set(&self, mask: u8) -> bool {
        CpuState::is_flag_set(self, mask)
    }

    #[inline]
    fn assign_flag(&mut self, mask: u8, value: bool) {
        CpuState::assign_flag(self, mask, value);
    }
}
