//! Fatal CPU conditions. Every variant halts the CPU; none is recoverable
//! mid-instruction.

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `address` is not a defined (or enabled) opcode.
    Decode { opcode: u8, address: u16 },
    /// The instruction at `pc` tried to store `value` into read-only memory
    /// at `address`. None of the instruction's effects were kept.
    MemoryProtection { address: u16, value: u8, pc: u16 },
}

impl CpuError {
    /// PC of the instruction that failed.
    pub fn pc(&self) -> u16 {
        match *self {
            CpuError::Decode { address, .. } => address,
            CpuError::MemoryProtection { pc, .. } => pc,
        }
    }
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CpuError::Decode { opcode, address } => {
                write!(f, "illegal opcode ${opcode:02X} at ${address:04X}")
            }
            CpuError::MemoryProtection { address, value, pc } => write!(
                f,
                "write of ${value:02X} to read-only ${address:04X} (instruction at ${pc:04X})"
            ),
        }
    }
}

impl Error for CpuError {}
