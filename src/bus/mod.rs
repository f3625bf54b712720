#![doc = r#"
Bus module: the CPU-visible address space.

Overview
- `Bus` owns a flat 64 KiB physical store and a boxed `Mapping` policy that
  decides, for every logical address, which physical byte is meant and
  whether it may be written.
- The CPU only ever talks to `read`, `read_word` and `write`. Hosts install
  program images with `load` / `poke`, which bypass write protection.

Instruction transactions
- While an instruction is in flight the CPU opens a transaction. Writes are
  staged in a journal (reads see them) and only reach the store on commit.
- A write to a read-only slot latches a `ProtectionFault` instead of being
  staged. The CPU inspects the latch after the instruction body, then either
  commits or rolls back, so a faulting instruction leaves memory untouched.
- Outside a transaction writes apply immediately.

Submodules
- mapping: `Mapping` trait, `MappedAddress`, `FlatMapping`, `NromMapping`.
"#]

pub mod mapping;


use crate::cartridge::Cartridge;
pub use mapping::{FlatMapping, MappedAddress, Mapping, NromMapping};

const MEMORY_SIZE: usize = 0x1_0000;

/// A rejected write into a read-only region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectionFault {
    /// Logical address the program tried to write.
    pub address: u16,
    pub value: u8,
}

pub struct Bus {
    memory: Vec<u8>,
    mapping: Box<dyn Mapping>,

    // Instruction transaction state
    in_transaction: bool,
    journal: Vec<(u16, u8)>, // (physical address, value)
    fault: Option<ProtectionFault>,
}

impl Bus {
    /// Bus with a flat, fully writable 64 KiB map.
    pub fn new() -> Self {
        Self::with_mapping(Box::new(FlatMapping))
    }

    pub fn with_mapping(mapping: Box<dyn Mapping>) -> Self {
        Self {
            memory: vec![0; MEMORY_SIZE],
            mapping,
            in_transaction: false,
            journal: Vec::with_capacity(8),
            fault: None,
        }
    }

    /// Replace the active mapping policy. Physical contents are kept.
    pub fn set_mapping(&mut self, mapping: Box<dyn Mapping>) {
        log::debug!("bus: mapping -> {}", mapping.name());
        self.mapping = mapping;
    }

    pub fn mapping_name(&self) -> &'static str {
        self.mapping.name()
    }

    /// Translate a logical address through the active mapping.
    #[inline]
    pub fn map(&self, addr: u16) -> MappedAddress {
        self.mapping.map(addr)
    }

    /// Install a cartridge image (mapping + PRG contents).
    pub fn attach_cartridge(&mut self, cart: &Cartridge) {
        cart.install(self);
    }

    // ---------------------------------------------------------------------
    // CPU-facing access
    // ---------------------------------------------------------------------

    /// Read one byte as the CPU sees it.
    #[inline]
    pub fn read(&mut self, addr: u16) -> u8 {
        self.peek(addr)
    }

    /// Little-endian 16-bit read; the high byte comes from `addr + 1`
    /// (wrapping at $FFFF).
    pub fn read_word(&mut self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Side-effect-free read (tracing, debuggers, tests). Sees staged writes.
    pub fn peek(&self, addr: u16) -> u8 {
        let phys = self.mapping.map(addr).address;
        if self.in_transaction {
            if let Some(&(_, v)) = self.journal.iter().rev().find(|(a, _)| *a == phys) {
                return v;
            }
        }
        self.memory[phys as usize]
    }

    /// CPU write. Read-only targets latch a protection fault and are dropped.
    pub fn write(&mut self, addr: u16, value: u8) {
        let mapped = self.mapping.map(addr);
        if mapped.read_only {
            log::warn!(
                "bus: write of ${:02X} to read-only ${:04X} ({})",
                value,
                addr,
                self.mapping.name()
            );
            if self.fault.is_none() {
                self.fault = Some(ProtectionFault {
                    address: addr,
                    value,
                });
            }
            return;
        }
        if self.in_transaction {
            self.journal.push((mapped.address, value));
        } else {
            self.memory[mapped.address as usize] = value;
        }
    }

    // ---------------------------------------------------------------------
    // Host-facing installation (bypasses protection)
    // ---------------------------------------------------------------------

    /// Copy `bytes` starting at logical `base`, ignoring read-only markers.
    /// Addresses wrap at $FFFF.
    pub fn load(&mut self, base: u16, bytes: &[u8]) {
        let mut addr = base;
        for &b in bytes {
            self.poke(addr, b);
            addr = addr.wrapping_add(1);
        }
    }

    /// Store one byte at logical `addr`, ignoring read-only markers.
    pub fn poke(&mut self, addr: u16, value: u8) {
        let phys = self.mapping.map(addr).address;
        self.memory[phys as usize] = value;
    }

    /// Store one byte directly at a physical slot.
    pub(crate) fn poke_physical(&mut self, phys: u16, value: u8) {
        self.memory[phys as usize] = value;
    }

    // ---------------------------------------------------------------------
    // Transactions (driven by the CPU facade)
    // ---------------------------------------------------------------------

    pub(crate) fn begin_transaction(&mut self) {
        self.in_transaction = true;
        self.journal.clear();
        self.fault = None;
    }

    /// Apply staged writes in program order.
    pub(crate) fn commit(&mut self) {
        for &(phys, v) in &self.journal {
            self.memory[phys as usize] = v;
        }
        self.journal.clear();
        self.in_transaction = false;
    }

    /// Drop staged writes and any latched fault.
    pub(crate) fn rollback(&mut self) {
        self.journal.clear();
        self.fault = None;
        self.in_transaction = false;
    }

    pub(crate) fn take_fault(&mut self) -> Option<ProtectionFault> {
        self.fault.take()
    }

    /// True if any write since the last `begin_transaction` hit read-only memory.
    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Bus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bus")
            .field("mapping", &self.mapping.name())
            .field("in_transaction", &self.in_transaction)
            .field("staged", &self.journal.len())
            .field("fault", &self.fault)
            .finish()
    }
}
