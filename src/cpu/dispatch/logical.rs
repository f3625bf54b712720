/*!
logical.rs - Logical and bit-test opcode family handler

Handles:

```text
    AND  ORA  EOR   A <- A op operand; N/Z finalized from A
    BIT             N, V <- operand bits 7, 6 (set here);
                    Z <- (A & operand) == 0 (finalized from the latched result)
```
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::{ExecContext, bit};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    match m {
        Mnemonic::And => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_a(cpu.a() & v);
        }
        Mnemonic::Ora => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_a(cpu.a() | v);
        }
        Mnemonic::Eor => {
            let v = read_operand(operand, cpu, bus);
            cpu.set_a(cpu.a() ^ v);
        }
        Mnemonic::Bit => {
            let v = read_operand(operand, cpu, bus);
            bit(cpu, ctx, v);
        }
        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cartridge::Cartridge;
    use crate::cpu::core::Cpu;
    use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};
    use crate::test_utils::build_nrom_with_prg;

    fn setup(prg: &[u8]) -> (Cpu, Bus) {
        let rom = build_nrom_with_prg(prg, 1, 1, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        let mut bus = Bus::new();
        bus.attach_cartridge(&cart);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    fn run(cpu: &mut Cpu, bus: &mut Bus, n: usize) {
        for _ in 0..n {
            cpu.step(bus).expect("step");
        }
    }

    #[test]
    fn and_ora_eor_immediate() {
        // LDA #$F0 ; AND #$3C ; ORA #$01 ; EOR #$FF
        let (mut cpu, mut bus) = setup(&[0xA9, 0xF0, 0x29, 0x3C, 0x09, 0x01, 0x49, 0xFF]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a(), 0x30);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a(), 0x31);
        run(&mut cpu, &mut bus, 1);
        assert_eq!(cpu.a(), 0xCE);
        assert!(cpu.is_flag_set(NEGATIVE));
    }

    #[test]
    fn and_to_zero_sets_z() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x0F, 0x29, 0xF0]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.a(), 0);
        assert!(cpu.is_flag_set(ZERO));
    }

    #[test]
    fn logical_ops_leave_carry_and_overflow() {
        // SEC ; LDA #$FF ; AND #$00
        let (mut cpu, mut bus) = setup(&[0x38, 0xA9, 0xFF, 0x29, 0x00]);
        cpu.set_flag(OVERFLOW, true);
        run(&mut cpu, &mut bus, 3);
        assert!(cpu.is_flag_set(CARRY));
        assert!(cpu.is_flag_set(OVERFLOW));
    }

    #[test]
    fn bit_copies_n_v_and_tests_z() {
        // LDA #$01 ; BIT $10 with [$10] = $C0
        let (mut cpu, mut bus) = setup(&[0xA9, 0x01, 0x24, 0x10]);
        bus.write(0x0010, 0xC0);
        run(&mut cpu, &mut bus, 1);
        cpu.step(&mut bus).expect("step");
        assert_eq!(cpu.last_cycles(), 3);
        assert!(cpu.is_flag_set(NEGATIVE));
        assert!(cpu.is_flag_set(OVERFLOW));
        assert!(cpu.is_flag_set(ZERO));
        assert_eq!(cpu.a(), 0x01);
    }

    #[test]
    fn bit_clears_n_v_from_operand() {
        // LDA #$FF ; BIT $1234 with [$1234] = $01 (mirrors to $0234)
        let (mut cpu, mut bus) = setup(&[0xA9, 0xFF, 0x2C, 0x34, 0x12]);
        bus.write(0x1234, 0x01);
        cpu.set_flag(OVERFLOW, true);
        run(&mut cpu, &mut bus, 2);
        assert!(!cpu.is_flag_set(NEGATIVE));
        assert!(!cpu.is_flag_set(OVERFLOW));
        assert!(!cpu.is_flag_set(ZERO));
    }

    #[test]
    fn eor_indexed_indirect() {
        // LDX #$04 ; LDA #$AA ; EOR ($10,X) -> ptr at $14 = $0300
        let (mut cpu, mut bus) = setup(&[0xA2, 0x04, 0xA9, 0xAA, 0x41, 0x10]);
        bus.write(0x0014, 0x00);
        bus.write(0x0015, 0x03);
        bus.write(0x0300, 0xFF);
        run(&mut cpu, &mut bus, 2);
        cpu.step(&mut bus).expect("step");
        assert_eq!(cpu.last_cycles(), 6);
        assert_eq!(cpu.a(), 0x55);
    }
}
