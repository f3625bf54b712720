/*!
table.rs - Immutable opcode catalogue (256 entries, built at compile time).

Purpose
=======
Maps every opcode byte to an `OpcodeDescriptor` or `None` (undefined). A
descriptor carries everything the dispatcher needs besides the semantics
themselves:

```text
    mnemonic | addressing mode | length | base cycles | access class
    auto flags (finalized generically) | manual flags (set by the body)
    documented / undocumented
```

Base cycles exclude the indexed-addressing cycle of abs,X / abs,Y / (zp),Y.
The addressing layer adds it: conditionally for reads, always for writes and
read-modify-write. So `STA $1234,X` is listed as 4 and costs 5.

Building
========
The table is a `static` built by `const fn`. Families sharing an opcode
layout (the eight-mode ALU group, the shift group, the combined
undocumented RMW group) are filled by small group helpers, which keeps
each opcode/mode/cycle triple written exactly once.

Coverage
========
- All 151 documented opcodes.
- Undocumented: LAX, SAX, DCP, ISB, SLO, RLA, SRE, RRA, the SBC alias $EB
  and the single / double / triple byte NOP variants.
- Everything else (ANC, ALR, ARR, AXS, SHY, KIL/JAM, ...) is undefined and
  decodes as an error.
*/

use crate::cpu::addressing::{Access, AddressingMode};
use crate::cpu::state::{
    ARITHMETIC_FLAGS, CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, ZERO,
};

use AddressingMode::*;

/// Instruction identity independent of addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    // Load / store
    Lda,
    Ldx,
    Ldy,
    Sta,
    Stx,
    Sty,
    // Transfers
    Tax,
    Tay,
    Txa,
    Tya,
    Tsx,
    Txs,
    // Stack
    Pha,
    Php,
    Pla,
    Plp,
    // Logical
    And,
    Ora,
    Eor,
    Bit,
    // Arithmetic
    Adc,
    Sbc,
    // Compare
    Cmp,
    Cpx,
    Cpy,
    // Increment / decrement
    Inc,
    Inx,
    Iny,
    Dec,
    Dex,
    Dey,
    // Shifts
    Asl,
    Lsr,
    Rol,
    Ror,
    // Jumps / calls / interrupts
    Jmp,
    Jsr,
    Rts,
    Brk,
    Rti,
    // Branches
    Bcc,
    Bcs,
    Beq,
    Bmi,
    Bne,
    Bpl,
    Bvc,
    Bvs,
    // Flag ops
    Clc,
    Cld,
    Cli,
    Clv,
    Sec,
    Sed,
    Sei,
    Nop,
    // Undocumented
    Lax,
    Sax,
    Dcp,
    Isb,
    Slo,
    Rla,
    Sre,
    Rra,
}

impl Mnemonic {
    pub const fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Txa => "TXA",
            Tya => "TYA",
            Tsx => "TSX",
            Txs => "TXS",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            And => "AND",
            Ora => "ORA",
            Eor => "EOR",
            Bit => "BIT",
            Adc => "ADC",
            Sbc => "SBC",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Asl => "ASL",
            Lsr => "LSR",
            Rol => "ROL",
            Ror => "ROR",
            Jmp => "JMP",
            Jsr => "JSR",
            Rts => "RTS",
            Brk => "BRK",
            Rti => "RTI",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Nop => "NOP",
            Lax => "LAX",
            Sax => "SAX",
            Dcp => "DCP",
            Isb => "ISB",
            Slo => "SLO",
            Rla => "RLA",
            Sre => "SRE",
            Rra => "RRA",
        }
    }

    /// How the instruction uses its effective address.
    pub const fn access(self) -> Access {
        use Mnemonic::*;
        match self {
            Sta | Stx | Sty | Sax => Access::Write,
            Asl | Lsr | Rol | Ror | Inc | Dec | Dcp | Isb | Slo | Rla | Sre | Rra => {
                Access::ReadModifyWrite
            }
            Lda | Ldx | Ldy | Lax | And | Ora | Eor | Bit | Adc | Sbc | Cmp | Cpx | Cpy
            | Nop => Access::Read,
            _ => Access::None,
        }
    }

    /// Flags the instruction affects.
    pub const fn affected_flags(self) -> u8 {
        use Mnemonic::*;
        match self {
            Lda | Ldx | Ldy | Lax | Tax | Tay | Txa | Tya | Tsx | Pla | And | Ora | Eor
            | Inc | Inx | Iny | Dec | Dex | Dey => NEGATIVE | ZERO,
            Adc | Sbc | Isb | Rra => NEGATIVE | OVERFLOW | ZERO | CARRY,
            Cmp | Cpx | Cpy | Dcp | Asl | Lsr | Rol | Ror | Slo | Rla | Sre => {
                NEGATIVE | ZERO | CARRY
            }
            Bit => NEGATIVE | OVERFLOW | ZERO,
            Plp | Rti => ARITHMETIC_FLAGS,
            Clc | Sec => CARRY,
            Cli | Sei | Brk => IRQ_DISABLE,
            Cld | Sed => DECIMAL,
            Clv => OVERFLOW,
            _ => 0,
        }
    }

    /// Subset of `affected_flags` the instruction body assigns itself; the
    /// finalizer leaves these alone.
    pub const fn manual_flags(self) -> u8 {
        use Mnemonic::*;
        match self {
            Bit => NEGATIVE | OVERFLOW,
            Plp | Rti => ARITHMETIC_FLAGS,
            Clc | Sec | Cli | Sei | Cld | Sed | Clv | Brk => self.affected_flags(),
            _ => 0,
        }
    }

    /// Instructions that load PC from somewhere other than the next opcode.
    pub const fn is_jump(self) -> bool {
        use Mnemonic::*;
        matches!(self, Jmp | Jsr | Rts | Rti | Brk)
    }
}

/// Static metadata for one opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeDescriptor {
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Instruction length in bytes (opcode included).
    pub len: u8,
    /// Cycles before page-cross and branch adjustments.
    pub cycles: u8,
    pub access: Access,
    /// Flags derived generically after the body runs.
    pub auto_flags: u8,
    /// Flags the body assigns itself.
    pub manual_flags: u8,
    pub documented: bool,
}

impl OpcodeDescriptor {
    const fn new(opcode: u8, mnemonic: Mnemonic, mode: AddressingMode, cycles: u8) -> Self {
        let manual = mnemonic.manual_flags();
        Self {
            opcode,
            mnemonic,
            mode,
            len: mode.len(),
            cycles,
            access: mnemonic.access(),
            auto_flags: mnemonic.affected_flags() & !manual,
            manual_flags: manual,
            documented: true,
        }
    }

    const fn undocumented(self) -> Self {
        Self {
            documented: false,
            ..self
        }
    }

    /// Every flag the instruction may change.
    pub const fn affected_flags(&self) -> u8 {
        self.auto_flags | self.manual_flags
    }
}

/// The 256-entry opcode catalogue.
#[derive(Debug)]
pub struct OpcodeTable {
    entries: [Option<OpcodeDescriptor>; 256],
}

/// Shared, process-wide table.
pub static OPCODE_TABLE: OpcodeTable = OpcodeTable::build();

impl OpcodeTable {
    #[inline]
    pub fn shared() -> &'static OpcodeTable {
        &OPCODE_TABLE
    }

    #[inline]
    pub fn get(&self, opcode: u8) -> Option<&OpcodeDescriptor> {
        self.entries[opcode as usize].as_ref()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpcodeDescriptor> {
        self.entries.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn build() -> Self {
        use Mnemonic::*;
        let mut t = Self {
            entries: [None; 256],
        };

        // ----- Eight-mode ALU group: ORA AND EOR ADC LDA CMP SBC (+STA) -----
        t.alu_group(0x00, Ora);
        t.alu_group(0x20, And);
        t.alu_group(0x40, Eor);
        t.alu_group(0x60, Adc);
        t.alu_group(0xA0, Lda);
        t.alu_group(0xC0, Cmp);
        t.alu_group(0xE0, Sbc);
        // STA has no immediate form
        t.op(0x85, Sta, ZeroPage, 3);
        t.op(0x95, Sta, ZeroPageX, 4);
        t.op(0x8D, Sta, Absolute, 4);
        t.op(0x9D, Sta, AbsoluteX, 4);
        t.op(0x99, Sta, AbsoluteY, 4);
        t.op(0x81, Sta, IndexedIndirect, 6);
        t.op(0x91, Sta, IndirectIndexed, 5);

        // ----- X / Y loads and stores -----
        t.op(0xA2, Ldx, Immediate, 2);
        t.op(0xA6, Ldx, ZeroPage, 3);
        t.op(0xB6, Ldx, ZeroPageY, 4);
        t.op(0xAE, Ldx, Absolute, 4);
        t.op(0xBE, Ldx, AbsoluteY, 4);
        t.op(0xA0, Ldy, Immediate, 2);
        t.op(0xA4, Ldy, ZeroPage, 3);
        t.op(0xB4, Ldy, ZeroPageX, 4);
        t.op(0xAC, Ldy, Absolute, 4);
        t.op(0xBC, Ldy, AbsoluteX, 4);
        t.op(0x86, Stx, ZeroPage, 3);
        t.op(0x96, Stx, ZeroPageY, 4);
        t.op(0x8E, Stx, Absolute, 4);
        t.op(0x84, Sty, ZeroPage, 3);
        t.op(0x94, Sty, ZeroPageX, 4);
        t.op(0x8C, Sty, Absolute, 4);

        // ----- Shifts / rotates and memory INC / DEC -----
        t.shift_group(0x00, Asl);
        t.shift_group(0x20, Rol);
        t.shift_group(0x40, Lsr);
        t.shift_group(0x60, Ror);
        t.incdec_group(0xC0, Dec);
        t.incdec_group(0xE0, Inc);

        // ----- Compare X / Y, BIT -----
        t.op(0xE0, Cpx, Immediate, 2);
        t.op(0xE4, Cpx, ZeroPage, 3);
        t.op(0xEC, Cpx, Absolute, 4);
        t.op(0xC0, Cpy, Immediate, 2);
        t.op(0xC4, Cpy, ZeroPage, 3);
        t.op(0xCC, Cpy, Absolute, 4);
        t.op(0x24, Bit, ZeroPage, 3);
        t.op(0x2C, Bit, Absolute, 4);

        // ----- Branches -----
        t.op(0x10, Bpl, Relative, 2);
        t.op(0x30, Bmi, Relative, 2);
        t.op(0x50, Bvc, Relative, 2);
        t.op(0x70, Bvs, Relative, 2);
        t.op(0x90, Bcc, Relative, 2);
        t.op(0xB0, Bcs, Relative, 2);
        t.op(0xD0, Bne, Relative, 2);
        t.op(0xF0, Beq, Relative, 2);

        // ----- Control flow -----
        // BRK skips a padding byte, so it is encoded as a 2-byte instruction.
        t.op(0x00, Brk, Immediate, 7);
        t.op(0x20, Jsr, Absolute, 6);
        t.op(0x40, Rti, Implicit, 6);
        t.op(0x60, Rts, Implicit, 6);
        t.op(0x4C, Jmp, Absolute, 3);
        t.op(0x6C, Jmp, Indirect, 5);

        // ----- Stack -----
        t.op(0x08, Php, Implicit, 3);
        t.op(0x28, Plp, Implicit, 4);
        t.op(0x48, Pha, Implicit, 3);
        t.op(0x68, Pla, Implicit, 4);

        // ----- Transfers, register INC / DEC -----
        t.op(0xAA, Tax, Implicit, 2);
        t.op(0xA8, Tay, Implicit, 2);
        t.op(0x8A, Txa, Implicit, 2);
        t.op(0x98, Tya, Implicit, 2);
        t.op(0xBA, Tsx, Implicit, 2);
        t.op(0x9A, Txs, Implicit, 2);
        t.op(0xE8, Inx, Implicit, 2);
        t.op(0xC8, Iny, Implicit, 2);
        t.op(0xCA, Dex, Implicit, 2);
        t.op(0x88, Dey, Implicit, 2);

        // ----- Flag ops, NOP -----
        t.op(0x18, Clc, Implicit, 2);
        t.op(0x38, Sec, Implicit, 2);
        t.op(0x58, Cli, Implicit, 2);
        t.op(0x78, Sei, Implicit, 2);
        t.op(0xB8, Clv, Implicit, 2);
        t.op(0xD8, Cld, Implicit, 2);
        t.op(0xF8, Sed, Implicit, 2);
        t.op(0xEA, Nop, Implicit, 2);

        // ----- Undocumented -----
        t.combo_group(0x00, Slo);
        t.combo_group(0x20, Rla);
        t.combo_group(0x40, Sre);
        t.combo_group(0x60, Rra);
        t.combo_group(0xC0, Dcp);
        t.combo_group(0xE0, Isb);

        t.unofficial(0xA7, Lax, ZeroPage, 3);
        t.unofficial(0xB7, Lax, ZeroPageY, 4);
        t.unofficial(0xAF, Lax, Absolute, 4);
        t.unofficial(0xBF, Lax, AbsoluteY, 4);
        t.unofficial(0xA3, Lax, IndexedIndirect, 6);
        t.unofficial(0xB3, Lax, IndirectIndexed, 5);

        t.unofficial(0x87, Sax, ZeroPage, 3);
        t.unofficial(0x97, Sax, ZeroPageY, 4);
        t.unofficial(0x8F, Sax, Absolute, 4);
        t.unofficial(0x83, Sax, IndexedIndirect, 6);

        t.unofficial(0xEB, Sbc, Immediate, 2);

        let implied_nops = [0x1A, 0x3A, 0x5A, 0x7A, 0xDA, 0xFA];
        let mut i = 0;
        while i < implied_nops.len() {
            t.unofficial(implied_nops[i], Nop, Implicit, 2);
            i += 1;
        }
        let immediate_nops = [0x80, 0x82, 0x89, 0xC2, 0xE2];
        i = 0;
        while i < immediate_nops.len() {
            t.unofficial(immediate_nops[i], Nop, Immediate, 2);
            i += 1;
        }
        let zp_nops = [0x04, 0x44, 0x64];
        i = 0;
        while i < zp_nops.len() {
            t.unofficial(zp_nops[i], Nop, ZeroPage, 3);
            i += 1;
        }
        let zpx_nops = [0x14, 0x34, 0x54, 0x74, 0xD4, 0xF4];
        i = 0;
        while i < zpx_nops.len() {
            t.unofficial(zpx_nops[i], Nop, ZeroPageX, 4);
            i += 1;
        }
        t.unofficial(0x0C, Nop, Absolute, 4);
        let absx_nops = [0x1C, 0x3C, 0x5C, 0x7C, 0xDC, 0xFC];
        i = 0;
        while i < absx_nops.len() {
            t.unofficial(absx_nops[i], Nop, AbsoluteX, 4);
            i += 1;
        }

        t
    }

    // ---------------------------------------------------------------------
    // Const builders
    // ---------------------------------------------------------------------

    const fn op(&mut self, opcode: u8, m: Mnemonic, mode: AddressingMode, cycles: u8) {
        self.entries[opcode as usize] = Some(OpcodeDescriptor::new(opcode, m, mode, cycles));
    }

    const fn unofficial(&mut self, opcode: u8, m: Mnemonic, mode: AddressingMode, cycles: u8) {
        self.entries[opcode as usize] =
            Some(OpcodeDescriptor::new(opcode, m, mode, cycles).undocumented());
    }

    /// imm, zp, zp,X, abs, abs,X, abs,Y, (zp,X), (zp),Y at their usual offsets.
    const fn alu_group(&mut self, base: u8, m: Mnemonic) {
        self.op(base + 0x09, m, Immediate, 2);
        self.op(base + 0x05, m, ZeroPage, 3);
        self.op(base + 0x15, m, ZeroPageX, 4);
        self.op(base + 0x0D, m, Absolute, 4);
        self.op(base + 0x1D, m, AbsoluteX, 4);
        self.op(base + 0x19, m, AbsoluteY, 4);
        self.op(base + 0x01, m, IndexedIndirect, 6);
        self.op(base + 0x11, m, IndirectIndexed, 5);
    }

    /// A, zp, zp,X, abs, abs,X.
    const fn shift_group(&mut self, base: u8, m: Mnemonic) {
        self.op(base + 0x0A, m, Accumulator, 2);
        self.incdec_group(base, m);
    }

    /// zp, zp,X, abs, abs,X for memory read-modify-write.
    const fn incdec_group(&mut self, base: u8, m: Mnemonic) {
        self.op(base + 0x06, m, ZeroPage, 5);
        self.op(base + 0x16, m, ZeroPageX, 6);
        self.op(base + 0x0E, m, Absolute, 6);
        self.op(base + 0x1E, m, AbsoluteX, 6);
    }

    /// Undocumented shift/inc/dec combined with an ALU op, seven modes.
    const fn combo_group(&mut self, base: u8, m: Mnemonic) {
        self.unofficial(base + 0x07, m, ZeroPage, 5);
        self.unofficial(base + 0x17, m, ZeroPageX, 6);
        self.unofficial(base + 0x0F, m, Absolute, 6);
        self.unofficial(base + 0x1F, m, AbsoluteX, 6);
        self.unofficial(base + 0x1B, m, AbsoluteY, 6);
        self.unofficial(base + 0x03, m, IndexedIndirect, 8);
        self.unofficial(base + 0x13, m, IndirectIndexed, 7);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_cost(d: &OpcodeDescriptor) -> u8 {
        // Write / RMW indexed forms always pay the indexed cycle.
        let always = matches!(d.access, Access::Write | Access::ReadModifyWrite)
            && matches!(
                d.mode,
                AddressingMode::AbsoluteX
                    | AddressingMode::AbsoluteY
                    | AddressingMode::IndirectIndexed
            );
        d.cycles + always as u8
    }

    #[test]
    fn documented_count_is_151() {
        let n = OPCODE_TABLE.iter().filter(|d| d.documented).count();
        assert_eq!(n, 151);
    }

    #[test]
    fn undocumented_entries_present() {
        let n = OPCODE_TABLE.iter().filter(|d| !d.documented).count();
        // 6 combos x 7 + LAX 6 + SAX 4 + SBC alias + 27 NOPs
        assert_eq!(n, 42 + 6 + 4 + 1 + 27);
    }

    #[test]
    fn opcode_field_matches_slot() {
        for op in 0..=255u8 {
            if let Some(d) = OPCODE_TABLE.get(op) {
                assert_eq!(d.opcode, op, "slot {op:02X}");
            }
        }
    }

    #[test]
    fn undefined_opcodes_are_none() {
        for op in [0x02, 0x12, 0x0B, 0x4B, 0x6B, 0x8B, 0x9C, 0x9E, 0xAB, 0xBB, 0xCB, 0xF2] {
            assert!(OPCODE_TABLE.get(op).is_none(), "{op:02X} should be undefined");
        }
    }

    #[test]
    fn length_follows_mode() {
        for d in OPCODE_TABLE.iter() {
            assert_eq!(d.len, d.mode.len(), "{:02X}", d.opcode);
            assert!((1..=3).contains(&d.len));
        }
    }

    #[test]
    fn manual_flags_are_removed_from_auto() {
        for d in OPCODE_TABLE.iter() {
            assert_eq!(d.auto_flags & d.manual_flags, 0, "{:02X}", d.opcode);
        }
        let bit = OPCODE_TABLE.get(0x24).map(|d| (d.auto_flags, d.manual_flags));
        assert_eq!(bit, Some((ZERO, NEGATIVE | OVERFLOW)));
    }

    #[test]
    fn well_known_total_cycles() {
        let cases = [
            (0xA9, 2),
            (0xAD, 4),
            (0xBD, 4),
            (0xB1, 5),
            (0x9D, 5),
            (0x99, 5),
            (0x91, 6),
            (0x1E, 7),
            (0xFE, 7),
            (0x20, 6),
            (0x00, 7),
            (0x6C, 5),
            (0xDB, 7),
            (0xD3, 8),
            (0xC3, 8),
            (0xB3, 5),
            (0x1C, 4),
        ];
        for (op, expected) in cases {
            let d = OPCODE_TABLE.get(op).copied();
            assert_eq!(d.map(|d| total_cost(&d)), Some(expected), "{op:02X}");
        }
    }

    #[test]
    fn stores_only_use_address_modes() {
        use AddressingMode::*;
        for d in OPCODE_TABLE.iter() {
            let no_address = matches!(d.mode, Implicit | Immediate | Relative);
            if matches!(d.access, Access::Write) {
                assert!(!no_address && d.mode != Accumulator, "{:02X}", d.opcode);
            }
            if matches!(d.access, Access::ReadModifyWrite) {
                assert!(!no_address, "{:02X}", d.opcode);
            }
        }
    }

    #[test]
    fn names() {
        assert_eq!(OPCODE_TABLE.get(0xEA).map(|d| d.mnemonic.name()), Some("NOP"));
        assert_eq!(OPCODE_TABLE.get(0xE7).map(|d| d.mnemonic.name()), Some("ISB"));
        assert_eq!(OPCODE_TABLE.get(0xEB).map(|d| d.documented), Some(false));
    }
}
