/*!
compare.rs - Compare opcode family handler (CMP / CPX / CPY)

Computes `reg - operand` without storing it: N/Z come from the difference,
C is set when `reg >= operand` (unsigned). V is never affected.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{Operand, read_operand};
use crate::cpu::execute::{ExecContext, compare};
use crate::cpu::regs::CpuRegs;
use crate::cpu::table::Mnemonic;

pub(super) fn handle<C: CpuRegs>(
    m: Mnemonic,
    operand: Operand,
    cpu: &mut C,
    bus: &mut Bus,
    ctx: &mut ExecContext,
) -> bool {
    let reg = match m {
        Mnemonic::Cmp => cpu.a(),
        Mnemonic::Cpx => cpu.x(),
        Mnemonic::Cpy => cpu.y(),
        _ => return false,
    };
    let v = read_operand(operand, cpu, bus);
    compare(cpu, ctx, reg, v);
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

    fn flags(cpu: &Cpu) -> (bool, bool, bool) {
        (
            cpu.is_flag_set(NEGATIVE),
            cpu.is_flag_set(ZERO),
            cpu.is_flag_set(CARRY),
        )
    }

    #[test]
    fn cmp_equal() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x40, 0xC9, 0x40]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(flags(&cpu), (false, true, true));
        assert_eq!(cpu.a(), 0x40);
    }

    #[test]
    fn cmp_less() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x10, 0xC9, 0x20]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(flags(&cpu), (true, false, false));
    }

    #[test]
    fn cmp_greater() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x20, 0xC9, 0x10]);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(flags(&cpu), (false, false, true));
    }

    #[test]
    fn compare_never_touches_overflow() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x80, 0xC9, 0x7F]);
        cpu.set_flag(OVERFLOW, true);
        run(&mut cpu, &mut bus, 2);
        assert!(cpu.is_flag_set(OVERFLOW));
    }

    #[test]
    fn cpx_zero_page_and_cpy_absolute() {
        // LDX #$05 ; CPX $10 ([$10]=5) ; LDY #$01 ; CPY $0300 ([$0300]=2)
        let (mut cpu, mut bus) = setup(&[0xA2, 0x05, 0xE4, 0x10, 0xA0, 0x01, 0xCC, 0x00, 0x03]);
        bus.write(0x0010, 0x05);
        bus.write(0x0300, 0x02);
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.last_cycles(), 3);
        assert_eq!(flags(&cpu), (false, true, true));
        run(&mut cpu, &mut bus, 2);
        assert_eq!(cpu.last_cycles(), 4);
        assert_eq!(flags(&cpu), (true, false, false));
    }
}
