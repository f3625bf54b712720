//! Single-instruction vectors: initial registers + RAM, one `step`, then
//! final registers, the listed RAM bytes and the cycle count are compared.

use arness_cpu::{Bus, Cpu};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Snapshot {
    pc: u16,
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    p: u8,
    ram: Vec<(u16, u8)>,
}

#[derive(Debug, Deserialize)]
struct Vector {
    name: String,
    initial: Snapshot,
    #[serde(rename = "final")]
    expected: Snapshot,
    cycles: u32,
}

fn load_vectors() -> Vec<Vector> {
    let raw = include_str!("data/instruction_vectors.json");
    serde_json::from_str(raw).expect("vector file parses")
}

fn prepare(v: &Vector) -> (Cpu, Bus) {
    let mut bus = Bus::new();
    for &(addr, value) in &v.initial.ram {
        bus.poke(addr, value);
    }
    let mut cpu = Cpu::new();
    cpu.reset(&mut bus);
    let s = cpu.state_mut();
    s.pc = v.initial.pc;
    s.a = v.initial.a;
    s.x = v.initial.x;
    s.y = v.initial.y;
    s.sp = v.initial.sp;
    s.status = v.initial.p;
    (cpu, bus)
}

#[test]
fn vectors_match() {
    let vectors = load_vectors();
    assert!(!vectors.is_empty());
    for v in &vectors {
        let (mut cpu, mut bus) = prepare(v);
        cpu.step(&mut bus)
            .unwrap_or_else(|e| panic!("{}: step failed: {e}", v.name));

        let want = &v.expected;
        assert_eq!(cpu.pc(), want.pc, "{}: pc", v.name);
        assert_eq!(cpu.a(), want.a, "{}: a", v.name);
        assert_eq!(cpu.x(), want.x, "{}: x", v.name);
        assert_eq!(cpu.y(), want.y, "{}: y", v.name);
        assert_eq!(cpu.sp(), want.sp, "{}: sp", v.name);
        assert_eq!(
            cpu.status(),
            want.p,
            "{}: p {:08b} vs {:08b}",
            v.name,
            cpu.status(),
            want.p
        );
        for &(addr, value) in &want.ram {
            assert_eq!(bus.peek(addr), value, "{}: ram ${addr:04X}", v.name);
        }
        assert_eq!(cpu.last_cycles(), v.cycles, "{}: cycles", v.name);
        assert_eq!(cpu.total_cycles(), v.cycles as u64, "{}: total", v.name);
    }
}

#[test]
fn vector_names_are_unique() {
    let vectors = load_vectors();
    let mut names: Vec<&str> = vectors.iter().map(|v| v.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), vectors.len());
}
