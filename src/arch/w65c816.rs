//! WDC 65816 table. Builds on the 6502/65C02 core and layers the long
//! addressing modes, stack-relative modes and the bank-manipulation ops
//! on top.
//!
//! Immediate operands are decoded at their 8-bit width: the real part
//! widens them to 16 bits when the M/X status bits are clear, but that is
//! processor state this engine does not model, and the history stream is
//! the authority on what actually executed.

use crate::arch::{mos6502, Endian, Entry, Table};

fn rows() -> Box<[Entry; 256]> {
    let mut t = mos6502::nmos_rows();
    mos6502::cmos_rows(&mut t);

    // The Rockwell bit-op slots do not exist on the 65816; every one of
    // them is reclaimed by a long-mode or bank op below.

    for (base, mn, flag) in &[
        (0x00u8, "ORA", "rmw"),
        (0x20u8, "AND", "rmw"),
        (0x40u8, "EOR", "rmw"),
        (0x60u8, "ADC", "rmw"),
        (0x80u8, "STA", "store"),
        (0xa0u8, "LDA", "load"),
        (0xc0u8, "CMP", "peek"),
        (0xe0u8, "SBC", "rmw"),
    ] {
        let f = |k: &str| match k {
            "store" => crate::analysis::FlagResult::StoreAInMemory,
            "load" => crate::analysis::FlagResult::LoadAFromMemory,
            "peek" => crate::analysis::FlagResult::PeekMemory,
            _ => crate::analysis::FlagResult::MemoryReadAlterA,
        };
        let mode = |m: crate::arch::AddrMode, len: u8| Entry::new(mn, m, len, f(flag));

        t[(base | 0x03) as usize] = mode(crate::arch::AddrMode::StackRelative, 2);
        t[(base | 0x07) as usize] = mode(crate::arch::AddrMode::DirectIndirectLong, 2);
        t[(base | 0x0f) as usize] = mode(crate::arch::AddrMode::AbsoluteLong, 4);
        t[(base | 0x13) as usize] = mode(crate::arch::AddrMode::StackRelativeY, 2);
        t[(base | 0x17) as usize] = mode(crate::arch::AddrMode::DirectIndirectLongY, 2);
        t[(base | 0x1f) as usize] = mode(crate::arch::AddrMode::AbsoluteLongX, 4);
    }

    row!(t, 0x02, "COP", Immediate, 2);
    row!(t, 0x0b, "PHD", Implied, 1);
    row!(t, 0x1b, "TCS", Implied, 1);
    row!(t, 0x2b, "PLD", Implied, 1);
    row!(t, 0x3b, "TSC", Implied, 1);
    row!(t, 0x4b, "PHK", Implied, 1);
    row!(t, 0x5b, "TCD", Implied, 1);
    row!(t, 0x6b, "RTL", Implied, 1, Rts);
    row!(t, 0x7b, "TDC", Implied, 1);
    row!(t, 0x8b, "PHB", Implied, 1);
    row!(t, 0x9b, "TXY", Implied, 1, RegY);
    row!(t, 0xab, "PLB", Implied, 1);
    row!(t, 0xbb, "TYX", Implied, 1, RegX);
    row!(t, 0xeb, "XBA", Implied, 1, RegA);
    row!(t, 0xfb, "XCE", Implied, 1);

    row!(t, 0x44, "MVP", BlockMove, 3, MemoryAlter);
    row!(t, 0x54, "MVN", BlockMove, 3, MemoryAlter);
    row!(t, 0x5c, "JML", AbsoluteLong, 4, BranchTaken);
    row!(t, 0x62, "PER", RelativeLong, 3);
    row!(t, 0x82, "BRL", RelativeLong, 3, BranchTaken);
    row!(t, 0xc2, "REP", Immediate, 2);
    row!(t, 0xe2, "SEP", Immediate, 2);
    row!(t, 0xd4, "PEI", ZeroPageIndirect, 2);
    row!(t, 0xf4, "PEA", ImmediateWord, 3);
    row!(t, 0xdc, "JML", IndirectLong, 3, JmpIndirect);
    row!(t, 0xfc, "JSR", IndirectAbsX, 3, BranchTaken);

    t
}

lazy_static! {
    pub static ref TABLE: Table = Table::new(Endian::Little, rows());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arch::AddrMode;

    #[test]
    fn long_lda_is_four_bytes() {
        let (entry, _) = TABLE.lookup(&[0xaf, 0x00, 0x00, 0x7e]).unwrap();

        assert_eq!(entry.mnemonic, "LDA");
        assert_eq!(entry.mode, AddrMode::AbsoluteLong);
        assert_eq!(entry.len, 4);
    }

    #[test]
    fn bit_op_slots_are_reclaimed() {
        // 0x0f is BBR0 on the 65C02 but ORA long on the 65816.
        let (entry, _) = TABLE.lookup(&[0x0f]).unwrap();

        assert_eq!(entry.mnemonic, "ORA");
        assert_eq!(entry.mode, AddrMode::AbsoluteLong);
    }
}
