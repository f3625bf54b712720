/*!
cycles.rs - Per-instruction cycle accounting.

A step's cost is assembled from three parts so tests and tracing can see
where each cycle came from:

```text
    base        table cycles for the opcode
    page_cross  indexed-addressing cycle (0 or 1, see `addressing::page_penalty`)
    branch      +1 when a branch is taken, +1 more when the target is on
                another page than the instruction that follows the branch
```
*/

/// Fixed cost of an interrupt entry (IRQ / NMI; BRK's table entry matches).
pub const INTERRUPT_CYCLES: u32 = 7;

/// Breakdown of the cycles one `step` consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCycles {
    pub base: u8,
    pub page_cross: u8,
    pub branch: u8,
}

impl StepCycles {
    #[inline]
    pub const fn total(&self) -> u32 {
        self.base as u32 + self.page_cross as u32 + self.branch as u32
    }
}

/// Extra cycles for a branch: 0 not taken, 1 taken, 2 taken across a page.
#[inline]
pub(crate) const fn branch_cycles(taken: bool, crossed: bool) -> u8 {
    match (taken, crossed) {
        (false, _) => 0,
        (true, false) => 1,
        (true, true) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_parts() {
        let c = StepCycles {
            base: 4,
            page_cross: 1,
            branch: 0,
        };
        assert_eq!(c.total(), 5);
        assert_eq!(StepCycles::default().total(), 0);
    }

    #[test]
    fn branch_cost_table() {
        assert_eq!(branch_cycles(false, true), 0);
        assert_eq!(branch_cycles(true, false), 1);
        assert_eq!(branch_cycles(true, true), 2);
    }
}
