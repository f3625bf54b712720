//! Shared test utilities for building minimal iNES (v1) images.
//!
//! CPU tests boot real NROM cartridges: the program goes at the start of the
//! PRG bank (CPU $8000) and the vectors at the end of it, so reset lands on
//! the program without any host-side poking of ROM.
//!
//! iNES header fields written here:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = Flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = Flags 7 (NES 2.0 indicator, mapper high nibble)
//! - byte 8 = PRG RAM size in 8 KiB units
//!
//! Vectors (NMI, RESET, IRQ/BRK) live in the last six bytes of PRG, which the
//! NROM map shows at $FFFA..=$FFFF for both 16 KiB and 32 KiB images.

/// Build an iNES (v1) image with pattern-filled PRG (`0xAA`) and CHR (`0xCC`).
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    prg_ram_8k: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map(|_| 512).unwrap_or(0) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.push(prg_ram_8k);
    bytes.extend_from_slice(&[0u8; 7]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.extend(std::iter::repeat_n(0xAA, prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat_n(0xCC, chr_8k * 8 * 1024));
    bytes
}

/// NROM-128 image with `prg` at CPU $8000.
///
/// `vectors` is `(reset, nmi, irq)`; all three default to $8000.
pub fn build_nrom_with_prg(
    prg: &[u8],
    chr_8k: usize,
    prg_ram_8k: u8,
    vectors: Option<(u16, u16, u16)>,
) -> Vec<u8> {
    assert!(
        prg.len() <= 16 * 1024 - 6,
        "program must leave room for the vectors in a 16 KiB bank"
    );

    let mut rom = build_ines(1, chr_8k, 0, 0, prg_ram_8k, None);
    let prg_start = 16;
    let prg_end = prg_start + 16 * 1024;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let (reset, nmi, irq) = vectors.unwrap_or((0x8000, 0x8000, 0x8000));
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, nmi, irq);
    rom
}

/// Write NMI, RESET and IRQ/BRK vectors into the last six bytes of a 16 KiB
/// or 32 KiB PRG slice. Panics on any other length.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!("unsupported PRG length for vectors: {other} bytes"),
    };
    prg[base..base + 2].copy_from_slice(&nmi.to_le_bytes());
    prg[base + 2..base + 4].copy_from_slice(&reset.to_le_bytes());
    prg[base + 4..base + 6].copy_from_slice(&irq.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, 1, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[8], 1);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn writes_vectors_for_both_prg_sizes() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x3FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);

        let mut prg = vec![0u8; 32 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(&prg[0x7FFA..], &[0x56, 0x84, 0x23, 0x81, 0xBC, 0x8A]);
    }

    #[test]
    fn program_lands_at_prg_start() {
        let rom = build_nrom_with_prg(&[0xA9, 0x01], 0, 0, Some((0x8000, 0x9000, 0xA000)));
        assert_eq!(&rom[16..18], &[0xA9, 0x01]);
        assert_eq!(&rom[16 + 0x3FFC..16 + 0x3FFE], &[0x00, 0x80]);
    }
}
