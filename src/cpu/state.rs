/*!
state.rs - 6502 architectural state (registers + flags) and inline helpers.

Overview
========
`CpuState` owns every architecturally visible register plus two pieces of
bookkeeping the instruction layer relies on:
  - `last_result`: the most recent value written to A/X/Y (or produced by
    an instruction that only updates flags). The flag finalizer derives
    N and Z from it.
  - `total_cycles`: the running cycle total since reset.
Bus access, decode and timing policy live in higher layers.

`CpuState` is `Copy`. The CPU facade snapshots it before every instruction
and restores the snapshot when the instruction faults.

Status Register Rules
=====================
- `set_status` is the instruction-visible setter (PLP, RTI): the unused bit
  is forced to 1 and the break bit keeps its current value.
- `assign_flag` and friends touch exactly the masked bit, except that the
  unused bit can never be cleared.
- Pushed copies of P always carry the unused bit; the break bit is set for
  PHP/BRK and clear for IRQ/NMI (`compose_status_for_push`).

P layout
========
```text
    7    6    5    4    3    2    1    0
    N    V    -    B    D    I    Z    C
```

`-` reads as 1. B only has meaning in pushed copies. D is kept and pushed
but ADC/SBC never look at it.
*/

use crate::config::CpuConfig;

/// Processor status flag bit masks (canonical definitions).
pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000; // Always set when read.
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// The six flags an instruction can change (everything but B and the unused bit).
pub const ARITHMETIC_FLAGS: u8 = NEGATIVE | OVERFLOW | DECIMAL | IRQ_DISABLE | ZERO | CARRY;

/// Base of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Register file and bookkeeping for one 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub pc: u16,
    pub status: u8,
    pub last_result: u8,
    pub total_cycles: u64,
}

impl Default for CpuState {
    fn default() -> Self {
        Self::power_on(&CpuConfig::default())
    }
}

impl CpuState {
    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register values right after reset under `config`. PC is left at 0;
    /// the caller loads it from the reset vector or the configured override.
    pub fn power_on(config: &CpuConfig) -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: config.reset_sp,
            pc: 0x0000,
            status: config.reset_status | UNUSED,
            last_result: 0,
            total_cycles: config.reset_cycles,
        }
    }

    // ---------------------------------------------------------------------
    // Basic Accessors (Read)
    // ---------------------------------------------------------------------
    #[inline]
    pub fn a(&self) -> u8 {
        self.a
    }
    #[inline]
    pub fn x(&self) -> u8 {
        self.x
    }
    #[inline]
    pub fn y(&self) -> u8 {
        self.y
    }
    #[inline]
    pub fn sp(&self) -> u8 {
        self.sp
    }
    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }
    #[inline]
    pub fn status(&self) -> u8 {
        self.status | UNUSED
    }
    #[inline]
    pub fn last_result(&self) -> u8 {
        self.last_result
    }
    #[inline]
    pub fn total_cycles(&self) -> u64 {
        self.total_cycles
    }

    // ---------------------------------------------------------------------
    // Mutators (Write)
    // ---------------------------------------------------------------------
    //
    // A/X/Y setters latch the written value as the last result.

    #[inline]
    pub fn set_a(&mut self, v: u8) {
        self.a = v;
        self.last_result = v;
    }
    #[inline]
    pub fn set_x(&mut self, v: u8) {
        self.x = v;
        self.last_result = v;
    }
    #[inline]
    pub fn set_y(&mut self, v: u8) {
        self.y = v;
        self.last_result = v;
    }
    #[inline]
    pub fn set_sp(&mut self, v: u8) {
        self.sp = v;
    }
    #[inline]
    pub fn set_pc(&mut self, v: u16) {
        self.pc = v;
    }
    #[inline]
    pub fn set_last_result(&mut self, v: u8) {
        self.last_result = v;
    }

    /// Load P from an instruction-visible source: keep the current break bit,
    /// force the unused bit.
    #[inline]
    pub fn set_status(&mut self, v: u8) {
        self.status = (v & !(BREAK | UNUSED)) | (self.status & BREAK) | UNUSED;
    }

    #[inline]
    pub fn add_cycles(&mut self, n: u32) {
        self.total_cycles = self.total_cycles.wrapping_add(n as u64);
    }

    // ---------------------------------------------------------------------
    // Program Counter Helpers
    // ---------------------------------------------------------------------

    /// Advance PC by `delta` (wrapping at 16 bits).
    #[inline]
    pub fn advance_pc(&mut self, delta: u16) {
        self.pc = self.pc.wrapping_add(delta);
    }

    #[inline]
    pub fn advance_pc_one(&mut self) {
        self.advance_pc(1);
    }

    // ---------------------------------------------------------------------
    // Flag Operations
    // ---------------------------------------------------------------------

    #[inline]
    pub fn is_flag_set(&self, mask: u8) -> bool {
        (self.status & mask) != 0
    }

    #[inline]
    pub fn set_flag_bit(&mut self, mask: u8) {
        self.status |= mask;
    }

    /// Clear the masked bits. The unused bit stays set.
    #[inline]
    pub fn clear_flag_bit(&mut self, mask: u8) {
        self.status = (self.status & !mask) | UNUSED;
    }

    #[inline]
    pub fn assign_flag(&mut self, mask: u8, value: bool) {
        if value {
            self.set_flag_bit(mask);
        } else {
            self.clear_flag_bit(mask);
        }
    }

    /// Status byte as pushed by PHP/BRK (`set_break_on_push`) or IRQ/NMI.
    pub fn compose_status_for_push(&self, set_break_on_push: bool) -> u8 {
        let v = self.status | UNUSED;
        if set_break_on_push {
            v | BREAK
        } else {
            v & !BREAK
        }
    }
}
