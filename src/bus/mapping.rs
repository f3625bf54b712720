/*!
mapping.rs - Logical-to-physical address mapping policies.

Overview
========
A `Mapping` translates every CPU-visible address into a physical slot of
the 64 KiB backing store plus a read-only marker. The `Bus` consults the
active mapping on every access, so mirroring and ROM protection live here
rather than in the CPU.

Policies
========
- `FlatMapping`: identity, all writable. Bare 6502 programs and tests.
- `NromMapping`: NES CPU map with a mapper-0 cartridge.

```text
    $0000-$1FFF  2 KiB internal RAM, mirrored (addr & $07FF)
    $2000-$3FFF  8-byte register window, mirrored ($2000 | addr & 7)
    $4000-$7FFF  plain writable (I/O, expansion, PRG RAM)
    $8000-$FFFF  PRG ROM, read-only; a 16 KiB image repeats at $C000
```
*/

/// Result of mapping one logical address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedAddress {
    pub address: u16,
    pub read_only: bool,
}

impl MappedAddress {
    #[inline]
    pub const fn writable(address: u16) -> Self {
        Self {
            address,
            read_only: false,
        }
    }

    #[inline]
    pub const fn read_only(address: u16) -> Self {
        Self {
            address,
            read_only: true,
        }
    }
}

/// Address translation policy installed into a `Bus`.
pub trait Mapping {
    /// Translate a logical CPU address.
    fn map(&self, addr: u16) -> MappedAddress;

    /// Short label for logs.
    fn name(&self) -> &'static str;
}

/// Identity mapping; every address is its own physical slot and writable.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatMapping;

impl Mapping for FlatMapping {
    #[inline]
    fn map(&self, addr: u16) -> MappedAddress {
        MappedAddress::writable(addr)
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}

/// NES CPU address map for an NROM (mapper 0) cartridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NromMapping {
    // true for NROM-128: one 16 KiB bank visible at both $8000 and $C000
    prg_mirrored: bool,
}

impl NromMapping {
    pub const RAM_MASK: u16 = 0x07FF;
    pub const REGISTER_BASE: u16 = 0x2000;
    pub const PRG_BASE: u16 = 0x8000;

    /// Build the map for a PRG image of `prg_len` bytes (16 or 32 KiB).
    pub fn new(prg_len: usize) -> Self {
        Self {
            prg_mirrored: prg_len <= 16 * 1024,
        }
    }

    pub fn prg_mirrored(&self) -> bool {
        self.prg_mirrored
    }
}

impl Mapping for NromMapping {
    fn map(&self, addr: u16) -> MappedAddress {
        match addr {
            0x0000..=0x1FFF => MappedAddress::writable(addr & Self::RAM_MASK),
            0x2000..=0x3FFF => MappedAddress::writable(Self::REGISTER_BASE | (addr & 0x0007)),
            0x4000..=0x7FFF => MappedAddress::writable(addr),
            _ if self.prg_mirrored => MappedAddress::read_only(Self::PRG_BASE | (addr & 0x3FFF)),
            _ => MappedAddress::read_only(addr),
        }
    }

    fn name(&self) -> &'static str {
        "nrom"
    }
}
