//! Intel 8051 table.
//!
//! The 8051 column structure puts the immediate form at x4, the direct
//! form at x5, the two register-indirect forms at x6/x7 and the eight
//! working registers at x8-xF, so most rows are built by column loops.
//! Multi-byte operands (LJMP, MOV DPTR) are big-endian.
//!
//! AJMP and ACALL take an 11-bit in-page target; only the low operand
//! byte is rendered, since the table layer has no notion of the current
//! page.

use crate::analysis::FlagResult;
use crate::arch::{filled, AddrMode, Endian, Entry, Table};

/// The x4-xF accumulator-ALU column pattern shared by ADD, ADDC, ORL,
/// ANL, XRL and SUBB.
fn alu_columns(t: &mut [Entry; 256], base: u8, mn: &str) {
    t[(base | 0x04) as usize] = Entry::new(
        &format!("{} A,{{}}", mn),
        AddrMode::Immediate,
        2,
        FlagResult::RegA,
    );
    t[(base | 0x05) as usize] = Entry::new(
        &format!("{} A,{{}}", mn),
        AddrMode::Direct,
        2,
        FlagResult::MemoryReadAlterA,
    );

    for i in 0..2u8 {
        t[(base | 0x06 | i) as usize] = Entry::new(
            &format!("{} A,@R{}", mn, i),
            AddrMode::Implied,
            1,
            FlagResult::MemoryReadAlterA,
        );
    }

    for r in 0..8u8 {
        t[(base | 0x08 | r) as usize] = Entry::new(
            &format!("{} A,R{}", mn, r),
            AddrMode::Implied,
            1,
            FlagResult::RegA,
        );
    }
}

fn rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    row!(t, 0x00, "NOP", Implied, 1);

    // AJMP/ACALL occupy every x1 slot; bits 7-5 of the opcode carry the
    // top of the 11-bit target.
    for page in 0..8u8 {
        let base = page << 5;

        row!(t, base | 0x01, "AJMP", Direct, 2, BranchTaken);
        row!(t, base | 0x11, "ACALL", Direct, 2, BranchTaken);
    }

    row!(t, 0x02, "LJMP", Extended, 3, BranchTaken);
    row!(t, 0x12, "LCALL", Extended, 3, BranchTaken);
    row!(t, 0x22, "RET", Implied, 1, Rts);
    row!(t, 0x32, "RETI", Implied, 1, Rti);
    row!(t, 0x03, "RR A", Implied, 1, RegA);
    row!(t, 0x13, "RRC A", Implied, 1, RegA);
    row!(t, 0x23, "RL A", Implied, 1, RegA);
    row!(t, 0x33, "RLC A", Implied, 1, RegA);

    // INC/DEC columns.
    row!(t, 0x04, "INC A", Implied, 1, RegA);
    row!(t, 0x05, "INC", Direct, 2, MemoryAlter);
    row!(t, 0x14, "DEC A", Implied, 1, RegA);
    row!(t, 0x15, "DEC", Direct, 2, MemoryAlter);

    for i in 0..2u8 {
        t[(0x06 | i) as usize] = Entry::new(
            &format!("INC @R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::MemoryAlter,
        );
        t[(0x16 | i) as usize] = Entry::new(
            &format!("DEC @R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::MemoryAlter,
        );
    }

    for r in 0..8u8 {
        t[(0x08 | r) as usize] =
            Entry::new(&format!("INC R{}", r), AddrMode::Implied, 1, FlagResult::None);
        t[(0x18 | r) as usize] =
            Entry::new(&format!("DEC R{}", r), AddrMode::Implied, 1, FlagResult::None);
    }

    row!(t, 0xa3, "INC DPTR", Implied, 1);

    // Bit-addressed and carry branches.
    row!(t, 0x10, "JBC", DirectRelative, 3, BranchTaken);
    row!(t, 0x20, "JB", DirectRelative, 3, BranchTaken);
    row!(t, 0x30, "JNB", DirectRelative, 3, BranchTaken);
    row!(t, 0x40, "JC", Relative, 2, BranchTaken);
    row!(t, 0x50, "JNC", Relative, 2, BranchTaken);
    row!(t, 0x60, "JZ", Relative, 2, BranchTaken);
    row!(t, 0x70, "JNZ", Relative, 2, BranchTaken);
    row!(t, 0x80, "SJMP", Relative, 2, BranchTaken);
    row!(t, 0x73, "JMP @A+DPTR", Implied, 1, JmpIndirect);

    alu_columns(&mut t, 0x20, "ADD");
    alu_columns(&mut t, 0x30, "ADDC");
    alu_columns(&mut t, 0x40, "ORL");
    alu_columns(&mut t, 0x50, "ANL");
    alu_columns(&mut t, 0x60, "XRL");
    alu_columns(&mut t, 0x90, "SUBB");

    // Logic ops with a direct destination.
    for (base, mn) in &[(0x42u8, "ORL"), (0x52u8, "ANL"), (0x62u8, "XRL")] {
        t[*base as usize] = Entry::new(
            &format!("{} {{}},A", mn),
            AddrMode::Direct,
            2,
            FlagResult::MemoryAlter,
        );
        t[(*base + 1) as usize] =
            Entry::new(mn, AddrMode::DirectImmediate, 3, FlagResult::MemoryAlter);
    }

    row!(t, 0x72, "ORL C,{}", Direct, 2, PeekMemory);
    row!(t, 0x82, "ANL C,{}", Direct, 2, PeekMemory);
    row!(t, 0xa0, "ORL C,/{}", Direct, 2, PeekMemory);
    row!(t, 0xb0, "ANL C,/{}", Direct, 2, PeekMemory);

    // MOV columns.
    row!(t, 0x74, "MOV A,{}", Immediate, 2, RegA);
    row!(t, 0x75, "MOV", DirectImmediate, 3, MemoryAlter);

    for i in 0..2u8 {
        t[(0x76 | i) as usize] = Entry::new(
            &format!("MOV @R{},{{}}", i),
            AddrMode::Immediate,
            2,
            FlagResult::MemoryAlter,
        );
        t[(0x86 | i) as usize] = Entry::new(
            &format!("MOV {{}},@R{}", i),
            AddrMode::Direct,
            2,
            FlagResult::MemoryAlter,
        );
        t[(0xa6 | i) as usize] = Entry::new(
            &format!("MOV @R{},{{}}", i),
            AddrMode::Direct,
            2,
            FlagResult::MemoryAlter,
        );
        t[(0xe6 | i) as usize] = Entry::new(
            &format!("MOV A,@R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::LoadAFromMemory,
        );
        t[(0xf6 | i) as usize] = Entry::new(
            &format!("MOV @R{},A", i),
            AddrMode::Implied,
            1,
            FlagResult::StoreAInMemory,
        );
    }

    for r in 0..8u8 {
        t[(0x78 | r) as usize] = Entry::new(
            &format!("MOV R{},{{}}", r),
            AddrMode::Immediate,
            2,
            FlagResult::None,
        );
        t[(0x88 | r) as usize] = Entry::new(
            &format!("MOV {{}},R{}", r),
            AddrMode::Direct,
            2,
            FlagResult::MemoryAlter,
        );
        t[(0xa8 | r) as usize] = Entry::new(
            &format!("MOV R{},{{}}", r),
            AddrMode::Direct,
            2,
            FlagResult::PeekMemory,
        );
        t[(0xe8 | r) as usize] =
            Entry::new(&format!("MOV A,R{}", r), AddrMode::Implied, 1, FlagResult::RegA);
        t[(0xf8 | r) as usize] =
            Entry::new(&format!("MOV R{},A", r), AddrMode::Implied, 1, FlagResult::None);
    }

    row!(t, 0x85, "MOV", DirectDirect, 3, MemoryAlter);
    row!(t, 0x90, "MOV DPTR,{}", ImmediateWord, 3);
    row!(t, 0x92, "MOV {},C", Direct, 2, MemoryAlter);
    row!(t, 0xa2, "MOV C,{}", Direct, 2, PeekMemory);
    row!(t, 0xe5, "MOV A,{}", Direct, 2, LoadAFromMemory);
    row!(t, 0xf5, "MOV {},A", Direct, 2, StoreAInMemory);

    row!(t, 0x83, "MOVC A,@A+PC", Implied, 1, LoadAFromMemory);
    row!(t, 0x93, "MOVC A,@A+DPTR", Implied, 1, LoadAFromMemory);
    row!(t, 0xe0, "MOVX A,@DPTR", Implied, 1, LoadAFromMemory);
    row!(t, 0xf0, "MOVX @DPTR,A", Implied, 1, StoreAInMemory);

    for i in 0..2u8 {
        t[(0xe2 | i) as usize] = Entry::new(
            &format!("MOVX A,@R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::LoadAFromMemory,
        );
        t[(0xf2 | i) as usize] = Entry::new(
            &format!("MOVX @R{},A", i),
            AddrMode::Implied,
            1,
            FlagResult::StoreAInMemory,
        );
    }

    row!(t, 0x84, "DIV AB", Implied, 1, RegA);
    row!(t, 0xa4, "MUL AB", Implied, 1, RegA);
    row!(t, 0xc4, "SWAP A", Implied, 1, RegA);
    row!(t, 0xd4, "DA A", Implied, 1, RegA);
    row!(t, 0xe4, "CLR A", Implied, 1, RegA);
    row!(t, 0xf4, "CPL A", Implied, 1, RegA);

    row!(t, 0xb2, "CPL {}", Direct, 2, MemoryAlter);
    row!(t, 0xb3, "CPL C", Implied, 1);
    row!(t, 0xc2, "CLR {}", Direct, 2, MemoryAlter);
    row!(t, 0xc3, "CLR C", Implied, 1);
    row!(t, 0xd2, "SETB {}", Direct, 2, MemoryAlter);
    row!(t, 0xd3, "SETB C", Implied, 1);

    row!(t, 0xc0, "PUSH", Direct, 2, PushA);
    row!(t, 0xd0, "POP", Direct, 2, PullA);

    // Compare-and-jump and decrement-and-jump.
    row!(t, 0xb4, "CJNE A,{}", ImmediateRelative, 3, BranchTaken);
    row!(t, 0xb5, "CJNE A,{}", DirectRelative, 3, BranchTaken);

    for i in 0..2u8 {
        t[(0xb6 | i) as usize] = Entry::new(
            &format!("CJNE @R{},{{}}", i),
            AddrMode::ImmediateRelative,
            3,
            FlagResult::BranchTaken,
        );
    }

    for r in 0..8u8 {
        t[(0xb8 | r) as usize] = Entry::new(
            &format!("CJNE R{},{{}}", r),
            AddrMode::ImmediateRelative,
            3,
            FlagResult::BranchTaken,
        );
        t[(0xd8 | r) as usize] = Entry::new(
            &format!("DJNZ R{},{{}}", r),
            AddrMode::Relative,
            2,
            FlagResult::BranchTaken,
        );
    }

    row!(t, 0xd5, "DJNZ", DirectRelative, 3, BranchTaken);

    row!(t, 0xc5, "XCH A,{}", Direct, 2, MemoryAlter);

    for i in 0..2u8 {
        t[(0xc6 | i) as usize] = Entry::new(
            &format!("XCH A,@R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::MemoryAlter,
        );
        t[(0xd6 | i) as usize] = Entry::new(
            &format!("XCHD A,@R{}", i),
            AddrMode::Implied,
            1,
            FlagResult::MemoryAlter,
        );
    }

    for r in 0..8u8 {
        t[(0xc8 | r) as usize] = Entry::new(
            &format!("XCH A,R{}", r),
            AddrMode::Implied,
            1,
            FlagResult::RegA,
        );
    }

    // 0xa5 is the sole undefined 8051 opcode.

    t
}

lazy_static! {
    pub static ref TABLE: Table = Table::new(Endian::Big, rows());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a5_is_undefined() {
        for op in 0..=255u8 {
            let (entry, _) = TABLE.lookup(&[op, 0, 0]).unwrap();

            assert_eq!(entry.is_illegal(), op == 0xa5, "slot {:#04x}", op);
        }
    }

    #[test]
    fn ljmp_is_big_endian_extended() {
        let (entry, _) = TABLE.lookup(&[0x02, 0x12, 0x34]).unwrap();

        assert_eq!(entry.mnemonic, "LJMP");
        assert_eq!(entry.mode, AddrMode::Extended);
        assert_eq!(entry.len, 3);
    }

    #[test]
    fn indirect_jump_through_dptr() {
        let (entry, _) = TABLE.lookup(&[0x73]).unwrap();

        assert_eq!(entry.flag, FlagResult::JmpIndirect);
    }

    #[test]
    fn cjne_immediate_branches() {
        let (entry, _) = TABLE.lookup(&[0xb4, 0x20, 0xfe]).unwrap();

        assert_eq!(entry.mnemonic, "CJNE A,{}");
        assert_eq!(entry.mode, AddrMode::ImmediateRelative);
        assert_eq!(entry.flag, FlagResult::BranchTaken);
    }
}
