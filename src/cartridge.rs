/*!
Cartridge image loader (iNES v1) and installation into a CPU `Bus`.

Features:
- Parse an iNES (v1) header from bytes or a file path
- Extract PRG ROM, CHR ROM and the optional 512-byte trainer
- Decode mirroring, battery and mapper number
- Install the PRG image (read-only) plus trainer into a `Bus` through `NromMapping`

Notes:
- iNES 2.0 is detected and rejected with an error.
- Only mapper 0 (NROM) is accepted; the CPU core has no bank switching.
- Header layout:
    0-3  "NES" 0x1A
    4    PRG ROM size, 16 KiB units
    5    CHR ROM size, 8 KiB units (0 => board uses CHR RAM)
    6    flags 6: mirroring / battery / trainer / mapper low nibble
    7    flags 7: NES 2.0 marker / mapper high nibble
*/

use std::fs;
use std::path::Path;

use crate::bus::{Bus, NromMapping};

pub const INES_MAGIC: &[u8; 4] = b"NES\x1A";
pub const HEADER_LEN: usize = 16;
pub const TRAINER_LEN: usize = 512;
pub const PRG_UNIT: usize = 16 * 1024;
pub const CHR_UNIT: usize = 8 * 1024;

/// CPU address the trainer block is copied to on install.
pub const TRAINER_BASE: u16 = 0x7000;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Clone)]
pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    trainer: Option<Vec<u8>>,

    // Metadata
    mapper_id: u8,
    mirroring: Mirroring,
    battery: bool,
}

// Debug implemented manually to keep ROM payloads out of logs.
impl std::fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("mirroring", &self.mirroring)
            .field("battery", &self.battery)
            .field("has_trainer", &self.trainer.is_some())
            .field("prg_rom_len", &self.prg_rom.len())
            .field("chr_rom_len", &self.chr_rom.len())
            .finish()
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Parse a cartridge from raw iNES bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, String> {
        if data.len() < HEADER_LEN {
            return Err("Data too small for iNES header".into());
        }
        if &data[0..4] != INES_MAGIC {
            return Err("Invalid iNES header magic (expected NES<1A>)".into());
        }

        let prg_units = data[4] as usize;
        let chr_units = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        // NES 2.0 if (flags7 & 0x0C) == 0x08.
        if (flags7 & 0x0C) == 0x08 {
            return Err("NES 2.0 format is not supported".into());
        }

        // Mapper number: high nibble from flags7, low nibble from flags6's high nibble
        let mapper_id = (flags7 & 0xF0) | (flags6 >> 4);
        if mapper_id != 0 {
            return Err(format!("Unsupported mapper id: {mapper_id}"));
        }
        if prg_units == 0 || prg_units > 2 {
            return Err(format!(
                "NROM expects 1 or 2 PRG banks of 16 KiB, header says {prg_units}"
            ));
        }

        let mirroring = if flags6 & 0b0000_1000 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0b0000_0001 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = flags6 & 0b0000_0010 != 0;
        let has_trainer = flags6 & 0b0000_0100 != 0;

        let mut offset = HEADER_LEN;
        let trainer = if has_trainer {
            let block = data
                .get(offset..offset + TRAINER_LEN)
                .ok_or("Data too small for iNES trainer")?;
            offset += TRAINER_LEN;
            Some(block.to_vec())
        } else {
            None
        };

        let prg_len = prg_units * PRG_UNIT;
        let prg_rom = data
            .get(offset..offset + prg_len)
            .ok_or("Data too small for PRG ROM")?
            .to_vec();
        offset += prg_len;

        let chr_len = chr_units * CHR_UNIT;
        let chr_rom = data
            .get(offset..offset + chr_len)
            .ok_or("Data too small for CHR ROM")?
            .to_vec();

        log::debug!(
            "cartridge: mapper {} PRG {} KiB CHR {} KiB trainer={}",
            mapper_id,
            prg_len / 1024,
            chr_len / 1024,
            trainer.is_some()
        );

        Ok(Self {
            prg_rom,
            chr_rom,
            trainer,
            mapper_id,
            mirroring,
            battery,
        })
    }

    /// Load a cartridge from an iNES file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let bytes = fs::read(path).map_err(|e| format!("Failed to read iNES file: {e}"))?;
        Self::from_ines_bytes(&bytes)
    }

    // -------------- Installation --------------

    /// Select the NROM map on `bus`, copy PRG ROM to $8000 and the trainer
    /// (if any) to $7000. ROM bytes are installed past write protection.
    pub fn install(&self, bus: &mut Bus) {
        let mapping = NromMapping::new(self.prg_rom.len());
        bus.set_mapping(Box::new(mapping));
        for (i, &b) in self.prg_rom.iter().enumerate() {
            bus.poke_physical(NromMapping::PRG_BASE + i as u16, b);
        }
        if let Some(trainer) = &self.trainer {
            bus.load(TRAINER_BASE, trainer);
        }
    }

    // -------------- Accessors --------------

    pub fn mapper_id(&self) -> u8 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn trainer(&self) -> Option<&[u8]> {
        self.trainer.as_deref()
    }
}
