/*!
address.rs - 16-bit CPU address value with byte views and page-aware arithmetic.

Overview
========
`MemAddress` wraps a `u16` and exposes the two views the 6502 cares about:
the low byte (offset within a page) and the high byte (page number). All
arithmetic wraps at 16 bits and reports whether the page (high byte)
changed, which is what the addressing layer needs to charge the page-cross
cycle.

Zero-page indexing is the one place where the hardware does NOT carry into
the high byte; `add_low` models that wrap.
*/

use std::fmt;

/// A 16-bit CPU address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemAddress(u16);

impl MemAddress {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Assemble an address from little-endian byte halves.
    #[inline]
    pub const fn from_bytes(low: u8, high: u8) -> Self {
        Self(u16::from_le_bytes([low, high]))
    }

    #[inline]
    pub const fn value(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn low(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn high(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn with_low(self, low: u8) -> Self {
        Self::from_bytes(low, self.high())
    }

    #[inline]
    pub const fn with_high(self, high: u8) -> Self {
        Self::from_bytes(self.low(), high)
    }

    /// Add an unsigned 8-bit displacement (index register), wrapping at 16
    /// bits. Returns the new address and whether the high byte changed.
    #[inline]
    pub const fn offset(self, delta: u8) -> (Self, bool) {
        let next = Self(self.0.wrapping_add(delta as u16));
        (next, next.high() != self.high())
    }

    /// Add a signed 8-bit displacement (branch offset), wrapping at 16 bits.
    /// Returns the new address and whether the high byte changed.
    #[inline]
    pub const fn offset_signed(self, delta: i8) -> (Self, bool) {
        let next = Self(self.0.wrapping_add(delta as i16 as u16));
        (next, next.high() != self.high())
    }

    /// Add within the current page: the low byte wraps, the high byte never
    /// changes. Used for zero-page indexed modes.
    #[inline]
    pub const fn add_low(self, delta: u8) -> Self {
        self.with_low(self.low().wrapping_add(delta))
    }
}

impl From<u16> for MemAddress {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<MemAddress> for u16 {
    fn from(addr: MemAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for MemAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}", self.0)
    }
}
