//! MOS 6502 family: the NMOS 6502, its undocumented extensions, and the
//! WDC 65C02.
//!
//! The undocumented and CMOS variants are overlays over the common NMOS
//! core, so the base rows are built once and patched per variant. Slots
//! that stay unpatched keep the illegal sentinel (KIL opcodes and the
//! like), which is what lets decode make progress through garbage.

use crate::arch::{filled, Endian, Entry, Table};

pub(crate) fn nmos_rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    row!(t, 0x00, "BRK", Implied, 1);
    row!(t, 0x01, "ORA", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0x05, "ORA", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0x06, "ASL", ZeroPage, 2, MemoryAlter);
    row!(t, 0x08, "PHP", Implied, 1, PushSr);
    row!(t, 0x09, "ORA", Immediate, 2, RegA);
    row!(t, 0x0a, "ASL", Accumulator, 1, RegA);
    row!(t, 0x0d, "ORA", Absolute, 3, MemoryReadAlterA);
    row!(t, 0x0e, "ASL", Absolute, 3, MemoryAlter);
    row!(t, 0x10, "BPL", Relative, 2, BranchTaken);
    row!(t, 0x11, "ORA", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0x15, "ORA", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0x16, "ASL", ZeroPageX, 2, MemoryAlter);
    row!(t, 0x18, "CLC", Implied, 1);
    row!(t, 0x19, "ORA", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0x1d, "ORA", AbsoluteX, 3, MemoryReadAlterA);
    row!(t, 0x1e, "ASL", AbsoluteX, 3, MemoryAlter);
    row!(t, 0x20, "JSR", Absolute, 3, BranchTaken);
    row!(t, 0x21, "AND", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0x24, "BIT", ZeroPage, 2, PeekMemory);
    row!(t, 0x25, "AND", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0x26, "ROL", ZeroPage, 2, MemoryAlter);
    row!(t, 0x28, "PLP", Implied, 1, PullSr);
    row!(t, 0x29, "AND", Immediate, 2, RegA);
    row!(t, 0x2a, "ROL", Accumulator, 1, RegA);
    row!(t, 0x2c, "BIT", Absolute, 3, PeekMemory);
    row!(t, 0x2d, "AND", Absolute, 3, MemoryReadAlterA);
    row!(t, 0x2e, "ROL", Absolute, 3, MemoryAlter);
    row!(t, 0x30, "BMI", Relative, 2, BranchTaken);
    row!(t, 0x31, "AND", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0x35, "AND", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0x36, "ROL", ZeroPageX, 2, MemoryAlter);
    row!(t, 0x38, "SEC", Implied, 1);
    row!(t, 0x39, "AND", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0x3d, "AND", AbsoluteX, 3, MemoryReadAlterA);
    row!(t, 0x3e, "ROL", AbsoluteX, 3, MemoryAlter);
    row!(t, 0x40, "RTI", Implied, 1, Rti);
    row!(t, 0x41, "EOR", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0x45, "EOR", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0x46, "LSR", ZeroPage, 2, MemoryAlter);
    row!(t, 0x48, "PHA", Implied, 1, PushA);
    row!(t, 0x49, "EOR", Immediate, 2, RegA);
    row!(t, 0x4a, "LSR", Accumulator, 1, RegA);
    row!(t, 0x4c, "JMP", Absolute, 3, BranchTaken);
    row!(t, 0x4d, "EOR", Absolute, 3, MemoryReadAlterA);
    row!(t, 0x4e, "LSR", Absolute, 3, MemoryAlter);
    row!(t, 0x50, "BVC", Relative, 2, BranchTaken);
    row!(t, 0x51, "EOR", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0x55, "EOR", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0x56, "LSR", ZeroPageX, 2, MemoryAlter);
    row!(t, 0x58, "CLI", Implied, 1);
    row!(t, 0x59, "EOR", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0x5d, "EOR", AbsoluteX, 3, MemoryReadAlterA);
    row!(t, 0x5e, "LSR", AbsoluteX, 3, MemoryAlter);
    row!(t, 0x60, "RTS", Implied, 1, Rts);
    row!(t, 0x61, "ADC", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0x65, "ADC", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0x66, "ROR", ZeroPage, 2, MemoryAlter);
    row!(t, 0x68, "PLA", Implied, 1, PullA);
    row!(t, 0x69, "ADC", Immediate, 2, RegA);
    row!(t, 0x6a, "ROR", Accumulator, 1, RegA);
    row!(t, 0x6c, "JMP", Indirect, 3, JmpIndirect);
    row!(t, 0x6d, "ADC", Absolute, 3, MemoryReadAlterA);
    row!(t, 0x6e, "ROR", Absolute, 3, MemoryAlter);
    row!(t, 0x70, "BVS", Relative, 2, BranchTaken);
    row!(t, 0x71, "ADC", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0x75, "ADC", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0x76, "ROR", ZeroPageX, 2, MemoryAlter);
    row!(t, 0x78, "SEI", Implied, 1);
    row!(t, 0x79, "ADC", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0x7d, "ADC", AbsoluteX, 3, MemoryReadAlterA);
    row!(t, 0x7e, "ROR", AbsoluteX, 3, MemoryAlter);
    row!(t, 0x81, "STA", IndirectX, 2, StoreAInMemory);
    row!(t, 0x84, "STY", ZeroPage, 2, StoreYInMemory);
    row!(t, 0x85, "STA", ZeroPage, 2, StoreAInMemory);
    row!(t, 0x86, "STX", ZeroPage, 2, StoreXInMemory);
    row!(t, 0x88, "DEY", Implied, 1, RegY);
    row!(t, 0x8a, "TXA", Implied, 1, RegA);
    row!(t, 0x8c, "STY", Absolute, 3, StoreYInMemory);
    row!(t, 0x8d, "STA", Absolute, 3, StoreAInMemory);
    row!(t, 0x8e, "STX", Absolute, 3, StoreXInMemory);
    row!(t, 0x90, "BCC", Relative, 2, BranchTaken);
    row!(t, 0x91, "STA", IndirectY, 2, StoreAInMemory);
    row!(t, 0x94, "STY", ZeroPageX, 2, StoreYInMemory);
    row!(t, 0x95, "STA", ZeroPageX, 2, StoreAInMemory);
    row!(t, 0x96, "STX", ZeroPageY, 2, StoreXInMemory);
    row!(t, 0x98, "TYA", Implied, 1, RegA);
    row!(t, 0x99, "STA", AbsoluteY, 3, StoreAInMemory);
    row!(t, 0x9a, "TXS", Implied, 1);
    row!(t, 0x9d, "STA", AbsoluteX, 3, StoreAInMemory);
    row!(t, 0xa0, "LDY", Immediate, 2, RegY);
    row!(t, 0xa1, "LDA", IndirectX, 2, LoadAFromMemory);
    row!(t, 0xa2, "LDX", Immediate, 2, RegX);
    row!(t, 0xa4, "LDY", ZeroPage, 2, LoadYFromMemory);
    row!(t, 0xa5, "LDA", ZeroPage, 2, LoadAFromMemory);
    row!(t, 0xa6, "LDX", ZeroPage, 2, LoadXFromMemory);
    row!(t, 0xa8, "TAY", Implied, 1, RegY);
    row!(t, 0xa9, "LDA", Immediate, 2, RegA);
    row!(t, 0xaa, "TAX", Implied, 1, RegX);
    row!(t, 0xac, "LDY", Absolute, 3, LoadYFromMemory);
    row!(t, 0xad, "LDA", Absolute, 3, LoadAFromMemory);
    row!(t, 0xae, "LDX", Absolute, 3, LoadXFromMemory);
    row!(t, 0xb0, "BCS", Relative, 2, BranchTaken);
    row!(t, 0xb1, "LDA", IndirectY, 2, LoadAFromMemory);
    row!(t, 0xb4, "LDY", ZeroPageX, 2, LoadYFromMemory);
    row!(t, 0xb5, "LDA", ZeroPageX, 2, LoadAFromMemory);
    row!(t, 0xb6, "LDX", ZeroPageY, 2, LoadXFromMemory);
    row!(t, 0xb8, "CLV", Implied, 1);
    row!(t, 0xb9, "LDA", AbsoluteY, 3, LoadAFromMemory);
    row!(t, 0xba, "TSX", Implied, 1, RegX);
    row!(t, 0xbc, "LDY", AbsoluteX, 3, LoadYFromMemory);
    row!(t, 0xbd, "LDA", AbsoluteX, 3, LoadAFromMemory);
    row!(t, 0xbe, "LDX", AbsoluteY, 3, LoadXFromMemory);
    row!(t, 0xc0, "CPY", Immediate, 2, RegY);
    row!(t, 0xc1, "CMP", IndirectX, 2, PeekMemory);
    row!(t, 0xc4, "CPY", ZeroPage, 2, PeekMemory);
    row!(t, 0xc5, "CMP", ZeroPage, 2, PeekMemory);
    row!(t, 0xc6, "DEC", ZeroPage, 2, MemoryAlter);
    row!(t, 0xc8, "INY", Implied, 1, RegY);
    row!(t, 0xc9, "CMP", Immediate, 2, RegA);
    row!(t, 0xca, "DEX", Implied, 1, RegX);
    row!(t, 0xcc, "CPY", Absolute, 3, PeekMemory);
    row!(t, 0xcd, "CMP", Absolute, 3, PeekMemory);
    row!(t, 0xce, "DEC", Absolute, 3, MemoryAlter);
    row!(t, 0xd0, "BNE", Relative, 2, BranchTaken);
    row!(t, 0xd1, "CMP", IndirectY, 2, PeekMemory);
    row!(t, 0xd5, "CMP", ZeroPageX, 2, PeekMemory);
    row!(t, 0xd6, "DEC", ZeroPageX, 2, MemoryAlter);
    row!(t, 0xd8, "CLD", Implied, 1);
    row!(t, 0xd9, "CMP", AbsoluteY, 3, PeekMemory);
    row!(t, 0xdd, "CMP", AbsoluteX, 3, PeekMemory);
    row!(t, 0xde, "DEC", AbsoluteX, 3, MemoryAlter);
    row!(t, 0xe0, "CPX", Immediate, 2, RegX);
    row!(t, 0xe1, "SBC", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0xe4, "CPX", ZeroPage, 2, PeekMemory);
    row!(t, 0xe5, "SBC", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0xe6, "INC", ZeroPage, 2, MemoryAlter);
    row!(t, 0xe8, "INX", Implied, 1, RegX);
    row!(t, 0xe9, "SBC", Immediate, 2, RegA);
    row!(t, 0xea, "NOP", Implied, 1);
    row!(t, 0xec, "CPX", Absolute, 3, PeekMemory);
    row!(t, 0xed, "SBC", Absolute, 3, MemoryReadAlterA);
    row!(t, 0xee, "INC", Absolute, 3, MemoryAlter);
    row!(t, 0xf0, "BEQ", Relative, 2, BranchTaken);
    row!(t, 0xf1, "SBC", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0xf5, "SBC", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0xf6, "INC", ZeroPageX, 2, MemoryAlter);
    row!(t, 0xf8, "SED", Implied, 1);
    row!(t, 0xf9, "SBC", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0xfd, "SBC", AbsoluteX, 3, MemoryReadAlterA);
    row!(t, 0xfe, "INC", AbsoluteX, 3, MemoryAlter);

    t
}

/// Undocumented NMOS opcodes. KIL/JAM slots are deliberately left on the
/// sentinel so a decode session stumbling into them keeps moving.
fn undoc_rows(t: &mut [Entry; 256]) {
    for (base, mn) in &[
        (0x00u8, "SLO"),
        (0x20u8, "RLA"),
        (0x40u8, "SRE"),
        (0x60u8, "RRA"),
    ] {
        row!(t, base | 0x03, *mn, IndirectX, 2, MemoryReadAlterA);
        row!(t, base | 0x07, *mn, ZeroPage, 2, MemoryReadAlterA);
        row!(t, base | 0x0f, *mn, Absolute, 3, MemoryReadAlterA);
        row!(t, base | 0x13, *mn, IndirectY, 2, MemoryReadAlterA);
        row!(t, base | 0x17, *mn, ZeroPageX, 2, MemoryReadAlterA);
        row!(t, base | 0x1b, *mn, AbsoluteY, 3, MemoryReadAlterA);
        row!(t, base | 0x1f, *mn, AbsoluteX, 3, MemoryReadAlterA);
    }

    row!(t, 0xc3, "DCP", IndirectX, 2, MemoryAlter);
    row!(t, 0xc7, "DCP", ZeroPage, 2, MemoryAlter);
    row!(t, 0xcf, "DCP", Absolute, 3, MemoryAlter);
    row!(t, 0xd3, "DCP", IndirectY, 2, MemoryAlter);
    row!(t, 0xd7, "DCP", ZeroPageX, 2, MemoryAlter);
    row!(t, 0xdb, "DCP", AbsoluteY, 3, MemoryAlter);
    row!(t, 0xdf, "DCP", AbsoluteX, 3, MemoryAlter);
    row!(t, 0xe3, "ISB", IndirectX, 2, MemoryReadAlterA);
    row!(t, 0xe7, "ISB", ZeroPage, 2, MemoryReadAlterA);
    row!(t, 0xef, "ISB", Absolute, 3, MemoryReadAlterA);
    row!(t, 0xf3, "ISB", IndirectY, 2, MemoryReadAlterA);
    row!(t, 0xf7, "ISB", ZeroPageX, 2, MemoryReadAlterA);
    row!(t, 0xfb, "ISB", AbsoluteY, 3, MemoryReadAlterA);
    row!(t, 0xff, "ISB", AbsoluteX, 3, MemoryReadAlterA);

    row!(t, 0x83, "SAX", IndirectX, 2, StoreAInMemory);
    row!(t, 0x87, "SAX", ZeroPage, 2, StoreAInMemory);
    row!(t, 0x8f, "SAX", Absolute, 3, StoreAInMemory);
    row!(t, 0x97, "SAX", ZeroPageY, 2, StoreAInMemory);
    row!(t, 0xa3, "LAX", IndirectX, 2, LoadAFromMemory);
    row!(t, 0xa7, "LAX", ZeroPage, 2, LoadAFromMemory);
    row!(t, 0xab, "LAX", Immediate, 2, RegA);
    row!(t, 0xaf, "LAX", Absolute, 3, LoadAFromMemory);
    row!(t, 0xb3, "LAX", IndirectY, 2, LoadAFromMemory);
    row!(t, 0xb7, "LAX", ZeroPageY, 2, LoadAFromMemory);
    row!(t, 0xbf, "LAX", AbsoluteY, 3, LoadAFromMemory);

    row!(t, 0x0b, "ANC", Immediate, 2, RegA);
    row!(t, 0x2b, "ANC", Immediate, 2, RegA);
    row!(t, 0x4b, "ALR", Immediate, 2, RegA);
    row!(t, 0x6b, "ARR", Immediate, 2, RegA);
    row!(t, 0x8b, "ANE", Immediate, 2, RegA);
    row!(t, 0xcb, "SBX", Immediate, 2, RegX);
    row!(t, 0xeb, "SBC", Immediate, 2, RegA);

    row!(t, 0x93, "SHA", IndirectY, 2, StoreAInMemory);
    row!(t, 0x9b, "SHS", AbsoluteY, 3, StoreAInMemory);
    row!(t, 0x9c, "SHY", AbsoluteX, 3, StoreYInMemory);
    row!(t, 0x9e, "SHX", AbsoluteY, 3, StoreXInMemory);
    row!(t, 0x9f, "SHA", AbsoluteY, 3, StoreAInMemory);
    row!(t, 0xbb, "LAS", AbsoluteY, 3, LoadAFromMemory);

    for op in &[0x1au8, 0x3a, 0x5a, 0x7a, 0xda, 0xfa] {
        row!(t, *op, "NOP", Implied, 1);
    }
    for op in &[0x80u8, 0x82, 0x89, 0xc2, 0xe2] {
        row!(t, *op, "NOP", Immediate, 2);
    }
    for op in &[0x04u8, 0x44, 0x64] {
        row!(t, *op, "NOP", ZeroPage, 2);
    }
    for op in &[0x14u8, 0x34, 0x54, 0x74, 0xd4, 0xf4] {
        row!(t, *op, "NOP", ZeroPageX, 2);
    }
    row!(t, 0x0c, "NOP", Absolute, 3);
    for op in &[0x1cu8, 0x3c, 0x5c, 0x7c, 0xdc, 0xfc] {
        row!(t, *op, "NOP", AbsoluteX, 3);
    }
}

/// WDC 65C02 additions over the NMOS core.
pub(crate) fn cmos_rows(t: &mut [Entry; 256]) {
    row!(t, 0x12, "ORA", ZeroPageIndirect, 2, MemoryReadAlterA);
    row!(t, 0x32, "AND", ZeroPageIndirect, 2, MemoryReadAlterA);
    row!(t, 0x52, "EOR", ZeroPageIndirect, 2, MemoryReadAlterA);
    row!(t, 0x72, "ADC", ZeroPageIndirect, 2, MemoryReadAlterA);
    row!(t, 0x92, "STA", ZeroPageIndirect, 2, StoreAInMemory);
    row!(t, 0xb2, "LDA", ZeroPageIndirect, 2, LoadAFromMemory);
    row!(t, 0xd2, "CMP", ZeroPageIndirect, 2, PeekMemory);
    row!(t, 0xf2, "SBC", ZeroPageIndirect, 2, MemoryReadAlterA);

    row!(t, 0x04, "TSB", ZeroPage, 2, MemoryAlter);
    row!(t, 0x0c, "TSB", Absolute, 3, MemoryAlter);
    row!(t, 0x14, "TRB", ZeroPage, 2, MemoryAlter);
    row!(t, 0x1c, "TRB", Absolute, 3, MemoryAlter);
    row!(t, 0x34, "BIT", ZeroPageX, 2, PeekMemory);
    row!(t, 0x3c, "BIT", AbsoluteX, 3, PeekMemory);
    row!(t, 0x89, "BIT", Immediate, 2, RegA);
    row!(t, 0x64, "STZ", ZeroPage, 2, MemoryAlter);
    row!(t, 0x74, "STZ", ZeroPageX, 2, MemoryAlter);
    row!(t, 0x9c, "STZ", Absolute, 3, MemoryAlter);
    row!(t, 0x9e, "STZ", AbsoluteX, 3, MemoryAlter);
    row!(t, 0x7c, "JMP", IndirectAbsX, 3, JmpIndirect);
    row!(t, 0x80, "BRA", Relative, 2, BranchTaken);
    row!(t, 0x1a, "INC", Accumulator, 1, RegA);
    row!(t, 0x3a, "DEC", Accumulator, 1, RegA);
    row!(t, 0x5a, "PHY", Implied, 1, RegY);
    row!(t, 0x7a, "PLY", Implied, 1, RegY);
    row!(t, 0xda, "PHX", Implied, 1, RegX);
    row!(t, 0xfa, "PLX", Implied, 1, RegX);
    row!(t, 0xcb, "WAI", Implied, 1);
    row!(t, 0xdb, "STP", Implied, 1);

    // Rockwell bit ops; BBR/BBS take a zero-page operand and a branch
    // displacement in one instruction.
    for bit in 0..8u8 {
        let rmb = format!("RMB{}", bit);
        let smb = format!("SMB{}", bit);
        let bbr = format!("BBR{}", bit);
        let bbs = format!("BBS{}", bit);

        t[(0x07 + bit * 0x10) as usize] = Entry::new(
            &rmb,
            crate::arch::AddrMode::ZeroPage,
            2,
            crate::analysis::FlagResult::MemoryAlter,
        );
        t[(0x87 + bit * 0x10) as usize] = Entry::new(
            &smb,
            crate::arch::AddrMode::ZeroPage,
            2,
            crate::analysis::FlagResult::MemoryAlter,
        );
        t[(0x0f + bit * 0x10) as usize] = Entry::new(
            &bbr,
            crate::arch::AddrMode::DirectRelative,
            3,
            crate::analysis::FlagResult::BranchTaken,
        );
        t[(0x8f + bit * 0x10) as usize] = Entry::new(
            &bbs,
            crate::arch::AddrMode::DirectRelative,
            3,
            crate::analysis::FlagResult::BranchTaken,
        );
    }
}

lazy_static! {
    pub static ref NMOS_TABLE: Table = Table::new(Endian::Little, nmos_rows());
    pub static ref UNDOC_TABLE: Table = {
        let mut t = nmos_rows();
        undoc_rows(&mut t);
        Table::new(Endian::Little, t)
    };
    pub static ref CMOS_TABLE: Table = {
        let mut t = nmos_rows();
        cmos_rows(&mut t);
        Table::new(Endian::Little, t)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FlagResult;
    use crate::arch::AddrMode;

    #[test]
    fn lda_immediate_is_register_only() {
        let (entry, header) = NMOS_TABLE.lookup(&[0xa9, 0x42]).unwrap();

        assert_eq!(header, 1);
        assert_eq!(entry.mnemonic, "LDA");
        assert_eq!(entry.mode, AddrMode::Immediate);
        assert_eq!(entry.len, 2);
        assert_eq!(entry.flag, FlagResult::RegA);
    }

    #[test]
    fn lda_absolute_reads_memory() {
        let (entry, _) = NMOS_TABLE.lookup(&[0xad, 0x00, 0x20]).unwrap();

        assert_eq!(entry.flag, FlagResult::LoadAFromMemory);
        assert_eq!(entry.len, 3);
    }

    #[test]
    fn undefined_nmos_slots_are_sentinels() {
        // 0x02 is a KIL opcode on every NMOS part.
        let (entry, _) = NMOS_TABLE.lookup(&[0x02]).unwrap();

        assert!(entry.is_illegal());
        assert_eq!(entry.len, 1);
    }

    #[test]
    fn undoc_table_documents_lax() {
        let (entry, _) = UNDOC_TABLE.lookup(&[0xa7, 0x10]).unwrap();

        assert_eq!(entry.mnemonic, "LAX");
        assert_eq!(entry.flag, FlagResult::LoadAFromMemory);
    }

    #[test]
    fn cmos_table_has_zero_page_indirect() {
        let (entry, _) = CMOS_TABLE.lookup(&[0xb2, 0x10]).unwrap();

        assert_eq!(entry.mnemonic, "LDA");
        assert_eq!(entry.mode, AddrMode::ZeroPageIndirect);
    }
}
