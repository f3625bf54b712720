//! Runtime configuration for the CPU core.
//!
//! `CpuConfig` collects the knobs that differ between hosts: what a reset
//! loads into the registers, where the running cycle total starts, and
//! whether undocumented opcodes are decoded at all.

use crate::cpu::state::{IRQ_DISABLE, UNUSED};

/// PC forced by `CpuConfig::nestest` (the ROM's automation entry point).
pub const NESTEST_ENTRY: u16 = 0xC000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Start here instead of the address stored at the reset vector.
    pub reset_pc: Option<u16>,
    /// Stack pointer after reset.
    pub reset_sp: u8,
    /// Status register after reset (the unused bit is forced on regardless).
    pub reset_status: u8,
    /// Value the running cycle total takes on reset.
    pub reset_cycles: u64,
    /// Decode the undocumented opcodes (LAX, SAX, DCP, ISB, SLO, RLA, SRE,
    /// RRA, NOP variants and the $EB SBC alias). When false they halt the
    /// CPU with a decode error.
    pub undocumented_opcodes: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            reset_pc: None,
            reset_sp: 0xFD,
            reset_status: IRQ_DISABLE | UNUSED,
            reset_cycles: 0,
            undocumented_opcodes: true,
        }
    }
}

impl CpuConfig {
    /// Settings matching the nestest reference log: entry at $C000 and the
    /// 7-cycle reset sequence already counted.
    pub fn nestest() -> Self {
        Self {
            reset_pc: Some(NESTEST_ENTRY),
            reset_cycles: 7,
            ..Self::default()
        }
    }

    /// Only the 151 documented opcodes decode.
    pub fn documented_only() -> Self {
        Self {
            undocumented_opcodes: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_power_on() {
        let c = CpuConfig::default();
        assert_eq!(c.reset_sp, 0xFD);
        assert_eq!(c.reset_status, 0x24);
        assert_eq!(c.reset_cycles, 0);
        assert!(c.reset_pc.is_none());
        assert!(c.undocumented_opcodes);
    }

    #[test]
    fn nestest_preset() {
        let c = CpuConfig::nestest();
        assert_eq!(c.reset_pc, Some(0xC000));
        assert_eq!(c.reset_cycles, 7);
    }
}
