//! Motorola 680x family: 6800, 6809, and the 68HC11 microcontroller.
//!
//! All three are big-endian. The 6800 core carries over to the 6811
//! almost unchanged; the 6811 adds Y-register operations behind the
//! `18`/`1A`/`CD` lead-in bytes, and the 6809 is its own beast with
//! `10`/`11` prefixes for long branches and 16-bit compares. The 6809
//! indexed postbyte can extend an instruction further than the fixed
//! lengths recorded here; those longer forms decode as their two-byte
//! core until the postbyte modes are tabled.

use crate::arch::{filled, filled_prefixed, Endian, Entry, Table};

fn alu_block(t: &mut [Entry; 256], base: u8, mn: &str, mem_flag: &str, imm_flag: &str) {
    let f = |k: &str| match k {
        "store" => crate::analysis::FlagResult::StoreAInMemory,
        "load" => crate::analysis::FlagResult::LoadAFromMemory,
        "peek" => crate::analysis::FlagResult::PeekMemory,
        "rega" => crate::analysis::FlagResult::RegA,
        "alter" => crate::analysis::FlagResult::MemoryAlter,
        "rmw" => crate::analysis::FlagResult::MemoryReadAlterA,
        _ => crate::analysis::FlagResult::None,
    };

    // base+0x00 immediate, +0x10 direct, +0x20 indexed, +0x30 extended.
    if imm_flag != "skip" {
        t[base as usize] = Entry::new(mn, crate::arch::AddrMode::Immediate, 2, f(imm_flag));
    }
    t[(base + 0x10) as usize] = Entry::new(mn, crate::arch::AddrMode::Direct, 2, f(mem_flag));
    t[(base + 0x20) as usize] = Entry::new(mn, crate::arch::AddrMode::IndexedX, 2, f(mem_flag));
    t[(base + 0x30) as usize] = Entry::new(mn, crate::arch::AddrMode::Extended, 3, f(mem_flag));
}

fn m6800_rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    row!(t, 0x01, "NOP", Implied, 1);
    row!(t, 0x06, "TAP", Implied, 1);
    row!(t, 0x07, "TPA", Implied, 1, RegA);
    row!(t, 0x08, "INX", Implied, 1, RegX);
    row!(t, 0x09, "DEX", Implied, 1, RegX);
    row!(t, 0x0a, "CLV", Implied, 1);
    row!(t, 0x0b, "SEV", Implied, 1);
    row!(t, 0x0c, "CLC", Implied, 1);
    row!(t, 0x0d, "SEC", Implied, 1);
    row!(t, 0x0e, "CLI", Implied, 1);
    row!(t, 0x0f, "SEI", Implied, 1);
    row!(t, 0x10, "SBA", Implied, 1, RegA);
    row!(t, 0x11, "CBA", Implied, 1, RegA);
    row!(t, 0x16, "TAB", Implied, 1, RegA);
    row!(t, 0x17, "TBA", Implied, 1, RegA);
    row!(t, 0x19, "DAA", Implied, 1, RegA);
    row!(t, 0x1b, "ABA", Implied, 1, RegA);
    row!(t, 0x30, "TSX", Implied, 1, RegX);
    row!(t, 0x31, "INS", Implied, 1);
    row!(t, 0x32, "PULA", Implied, 1, PullA);
    row!(t, 0x33, "PULB", Implied, 1, PullA);
    row!(t, 0x34, "DES", Implied, 1);
    row!(t, 0x35, "TXS", Implied, 1);
    row!(t, 0x36, "PSHA", Implied, 1, PushA);
    row!(t, 0x37, "PSHB", Implied, 1, PushA);
    row!(t, 0x39, "RTS", Implied, 1, Rts);
    row!(t, 0x3b, "RTI", Implied, 1, Rti);
    row!(t, 0x3e, "WAI", Implied, 1);
    row!(t, 0x3f, "SWI", Implied, 1);

    for (op, mn) in &[
        (0x20u8, "BRA"),
        (0x22u8, "BHI"),
        (0x23u8, "BLS"),
        (0x24u8, "BCC"),
        (0x25u8, "BCS"),
        (0x26u8, "BNE"),
        (0x27u8, "BEQ"),
        (0x28u8, "BVC"),
        (0x29u8, "BVS"),
        (0x2au8, "BPL"),
        (0x2bu8, "BMI"),
        (0x2cu8, "BGE"),
        (0x2du8, "BLT"),
        (0x2eu8, "BGT"),
        (0x2fu8, "BLE"),
        (0x8du8, "BSR"),
    ] {
        row!(t, *op, *mn, Relative, 2, BranchTaken);
    }

    // Accumulator A single-operand ops at 0x40, B at 0x50, indexed memory
    // at 0x60, extended memory at 0x70.
    for (off, mn, alters) in &[
        (0x00u8, "NEG", true),
        (0x03u8, "COM", true),
        (0x04u8, "LSR", true),
        (0x06u8, "ROR", true),
        (0x07u8, "ASR", true),
        (0x08u8, "ASL", true),
        (0x09u8, "ROL", true),
        (0x0au8, "DEC", true),
        (0x0cu8, "INC", true),
        (0x0du8, "TST", false),
        (0x0fu8, "CLR", true),
    ] {
        let mem_flag = if *alters {
            crate::analysis::FlagResult::MemoryAlter
        } else {
            crate::analysis::FlagResult::PeekMemory
        };

        t[(0x40 + off) as usize] = Entry::new(
            &format!("{}A", mn),
            crate::arch::AddrMode::Implied,
            1,
            crate::analysis::FlagResult::RegA,
        );
        t[(0x50 + off) as usize] = Entry::new(
            &format!("{}B", mn),
            crate::arch::AddrMode::Implied,
            1,
            crate::analysis::FlagResult::None,
        );
        t[(0x60 + off) as usize] =
            Entry::new(mn, crate::arch::AddrMode::IndexedX, 2, mem_flag);
        t[(0x70 + off) as usize] =
            Entry::new(mn, crate::arch::AddrMode::Extended, 3, mem_flag);
    }

    row!(t, 0x6e, "JMP", IndexedX, 2, BranchTaken);
    row!(t, 0x7e, "JMP", Extended, 3, BranchTaken);
    row!(t, 0xad, "JSR", IndexedX, 2, BranchTaken);
    row!(t, 0xbd, "JSR", Extended, 3, BranchTaken);

    // A-register ALU at 0x80, B-register at 0xC0.
    alu_block(&mut t, 0x80, "SUBA", "rmw", "rega");
    alu_block(&mut t, 0x81, "CMPA", "peek", "rega");
    alu_block(&mut t, 0x82, "SBCA", "rmw", "rega");
    alu_block(&mut t, 0x84, "ANDA", "rmw", "rega");
    alu_block(&mut t, 0x85, "BITA", "peek", "rega");
    alu_block(&mut t, 0x86, "LDAA", "load", "rega");
    alu_block(&mut t, 0x87, "STAA", "store", "skip");
    alu_block(&mut t, 0x88, "EORA", "rmw", "rega");
    alu_block(&mut t, 0x89, "ADCA", "rmw", "rega");
    alu_block(&mut t, 0x8a, "ORAA", "rmw", "rega");
    alu_block(&mut t, 0x8b, "ADDA", "rmw", "rega");
    alu_block(&mut t, 0xc0, "SUBB", "peek", "none");
    alu_block(&mut t, 0xc1, "CMPB", "peek", "none");
    alu_block(&mut t, 0xc2, "SBCB", "peek", "none");
    alu_block(&mut t, 0xc4, "ANDB", "peek", "none");
    alu_block(&mut t, 0xc5, "BITB", "peek", "none");
    alu_block(&mut t, 0xc6, "LDAB", "peek", "none");
    alu_block(&mut t, 0xc7, "STAB", "alter", "skip");
    alu_block(&mut t, 0xc8, "EORB", "peek", "none");
    alu_block(&mut t, 0xc9, "ADCB", "peek", "none");
    alu_block(&mut t, 0xca, "ORAB", "peek", "none");
    alu_block(&mut t, 0xcb, "ADDB", "peek", "none");

    // Index register and stack pointer traffic; 16-bit immediates.
    row!(t, 0x8c, "CPX", ImmediateWord, 3, RegX);
    row!(t, 0x9c, "CPX", Direct, 2, PeekMemory);
    row!(t, 0xac, "CPX", IndexedX, 2, PeekMemory);
    row!(t, 0xbc, "CPX", Extended, 3, PeekMemory);
    row!(t, 0x8e, "LDS", ImmediateWord, 3);
    row!(t, 0x9e, "LDS", Direct, 2, PeekMemory);
    row!(t, 0xae, "LDS", IndexedX, 2, PeekMemory);
    row!(t, 0xbe, "LDS", Extended, 3, PeekMemory);
    row!(t, 0x9f, "STS", Direct, 2, MemoryAlter);
    row!(t, 0xaf, "STS", IndexedX, 2, MemoryAlter);
    row!(t, 0xbf, "STS", Extended, 3, MemoryAlter);
    row!(t, 0xce, "LDX", ImmediateWord, 3, RegX);
    row!(t, 0xde, "LDX", Direct, 2, LoadXFromMemory);
    row!(t, 0xee, "LDX", IndexedX, 2, LoadXFromMemory);
    row!(t, 0xfe, "LDX", Extended, 3, LoadXFromMemory);
    row!(t, 0xdf, "STX", Direct, 2, StoreXInMemory);
    row!(t, 0xef, "STX", IndexedX, 2, StoreXInMemory);
    row!(t, 0xff, "STX", Extended, 3, StoreXInMemory);

    t
}

/// 68HC11 Y-indexed overlay: the `18` lead-in swaps X-indexed addressing
/// for Y, and moves the Y register ops in.
fn m6811_y_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    row!(t, 0x08, "INY", Implied, 2, RegY);
    row!(t, 0x09, "DEY", Implied, 2, RegY);
    row!(t, 0x30, "TSY", Implied, 2, RegY);
    row!(t, 0x35, "TYS", Implied, 2);
    row!(t, 0x3a, "ABY", Implied, 2, RegY);
    row!(t, 0x8c, "CPY", ImmediateWord, 4, RegY);
    row!(t, 0x9c, "CPY", Direct, 3, PeekMemory);
    row!(t, 0xbc, "CPY", Extended, 4, PeekMemory);
    row!(t, 0xce, "LDY", ImmediateWord, 4, RegY);
    row!(t, 0xde, "LDY", Direct, 3, LoadYFromMemory);
    row!(t, 0xfe, "LDY", Extended, 4, LoadYFromMemory);
    row!(t, 0xdf, "STY", Direct, 3, StoreYInMemory);
    row!(t, 0xff, "STY", Extended, 4, StoreYInMemory);

    // Y-indexed forms of the A/B ALU blocks and read-modify-write ops.
    for (op, mn, flag) in &[
        (0xa0u8, "SUBA", "rmw"),
        (0xa1u8, "CMPA", "peek"),
        (0xa6u8, "LDAA", "load"),
        (0xa7u8, "STAA", "store"),
        (0xabu8, "ADDA", "rmw"),
        (0xe6u8, "LDAB", "peek"),
        (0xe7u8, "STAB", "alter"),
        (0x6au8, "DEC", "alter"),
        (0x6cu8, "INC", "alter"),
        (0x6fu8, "CLR", "alter"),
        (0xacu8, "CPY", "peek"),
        (0xeeu8, "LDY", "loady"),
        (0xefu8, "STY", "storey"),
    ] {
        let f = match *flag {
            "store" => crate::analysis::FlagResult::StoreAInMemory,
            "load" => crate::analysis::FlagResult::LoadAFromMemory,
            "loady" => crate::analysis::FlagResult::LoadYFromMemory,
            "storey" => crate::analysis::FlagResult::StoreYInMemory,
            "peek" => crate::analysis::FlagResult::PeekMemory,
            "alter" => crate::analysis::FlagResult::MemoryAlter,
            _ => crate::analysis::FlagResult::MemoryReadAlterA,
        };

        t[*op as usize] = Entry::new(mn, crate::arch::AddrMode::IndexedY, 3, f);
    }

    t
}

/// 68HC11 `1A` lead-in: D-register compares and X/Y cross forms.
fn m6811_cpd_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    row!(t, 0x83, "CPD", ImmediateWord, 4);
    row!(t, 0x93, "CPD", Direct, 3, PeekMemory);
    row!(t, 0xa3, "CPD", IndexedX, 3, PeekMemory);
    row!(t, 0xb3, "CPD", Extended, 4, PeekMemory);
    row!(t, 0xac, "CPY", IndexedX, 3, PeekMemory);
    row!(t, 0xee, "LDY", IndexedX, 3, LoadYFromMemory);
    row!(t, 0xef, "STY", IndexedX, 3, StoreYInMemory);

    t
}

/// 68HC11 `CD` lead-in: the D/X ops with Y-indexed addressing.
fn m6811_cd_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    row!(t, 0xa3, "CPD", IndexedY, 3, PeekMemory);
    row!(t, 0xac, "CPX", IndexedY, 3, PeekMemory);
    row!(t, 0xee, "LDX", IndexedY, 3, LoadXFromMemory);
    row!(t, 0xef, "STX", IndexedY, 3, StoreXInMemory);

    t
}

fn m6811_rows() -> Box<[Entry; 256]> {
    let mut t = m6800_rows();

    row!(t, 0x00, "TEST", Implied, 1);
    row!(t, 0x02, "IDIV", Implied, 1);
    row!(t, 0x03, "FDIV", Implied, 1);
    row!(t, 0x04, "LSRD", Implied, 1, RegA);
    row!(t, 0x05, "ASLD", Implied, 1, RegA);
    row!(t, 0x12, "BRSET", Bytes, 4, BranchTaken);
    row!(t, 0x13, "BRCLR", Bytes, 4, BranchTaken);
    row!(t, 0x14, "BSET", Direct, 3, MemoryAlter);
    row!(t, 0x15, "BCLR", Direct, 3, MemoryAlter);
    row!(t, 0x3a, "ABX", Implied, 1, RegX);
    row!(t, 0x3c, "PSHX", Implied, 1, RegX);
    row!(t, 0x38, "PULX", Implied, 1, RegX);
    row!(t, 0x3d, "MUL", Implied, 1, RegA);
    row!(t, 0x8f, "XGDX", Implied, 1, RegX);
    row!(t, 0xcf, "STOP", Implied, 1);
    row!(t, 0x83, "SUBD", ImmediateWord, 3, RegA);
    row!(t, 0x93, "SUBD", Direct, 2, MemoryReadAlterA);
    row!(t, 0xa3, "SUBD", IndexedX, 2, MemoryReadAlterA);
    row!(t, 0xb3, "SUBD", Extended, 3, MemoryReadAlterA);
    row!(t, 0xc3, "ADDD", ImmediateWord, 3, RegA);
    row!(t, 0xd3, "ADDD", Direct, 2, MemoryReadAlterA);
    row!(t, 0xe3, "ADDD", IndexedX, 2, MemoryReadAlterA);
    row!(t, 0xf3, "ADDD", Extended, 3, MemoryReadAlterA);
    row!(t, 0xcc, "LDD", ImmediateWord, 3, RegA);
    row!(t, 0xdc, "LDD", Direct, 2, LoadAFromMemory);
    row!(t, 0xec, "LDD", IndexedX, 2, LoadAFromMemory);
    row!(t, 0xfc, "LDD", Extended, 3, LoadAFromMemory);
    row!(t, 0xdd, "STD", Direct, 2, StoreAInMemory);
    row!(t, 0xed, "STD", IndexedX, 2, StoreAInMemory);
    row!(t, 0xfd, "STD", Extended, 3, StoreAInMemory);

    t
}

fn m6809_rows() -> Box<[Entry; 256]> {
    let mut t = m6800_rows();

    // The 6809 drops the 6800's two-accumulator inherent block and moves
    // the system ops around; patch the slots that differ. 0x10 and 0x11
    // are prefix bytes on the 6809, so the inherited SBA/CBA rows go.
    t[0x10] = Entry::illegal();
    t[0x11] = Entry::illegal();
    row!(t, 0x12, "NOP", Implied, 1);
    row!(t, 0x13, "SYNC", Implied, 1);
    row!(t, 0x16, "LBRA", RelativeLong, 3, BranchTaken);
    row!(t, 0x17, "LBSR", RelativeLong, 3, BranchTaken);
    row!(t, 0x1a, "ORCC", Immediate, 2);
    row!(t, 0x1c, "ANDCC", Immediate, 2);
    row!(t, 0x1d, "SEX", Implied, 1, RegA);
    row!(t, 0x1e, "EXG", Immediate, 2);
    row!(t, 0x1f, "TFR", Immediate, 2);
    row!(t, 0x30, "LEAX", IndexedX, 2, RegX);
    row!(t, 0x31, "LEAY", IndexedX, 2, RegY);
    row!(t, 0x32, "LEAS", IndexedX, 2);
    row!(t, 0x33, "LEAU", IndexedX, 2);
    row!(t, 0x34, "PSHS", Immediate, 2, PushA);
    row!(t, 0x35, "PULS", Immediate, 2, PullA);
    row!(t, 0x36, "PSHU", Immediate, 2, PushA);
    row!(t, 0x37, "PULU", Immediate, 2, PullA);
    row!(t, 0x39, "RTS", Implied, 1, Rts);
    row!(t, 0x3a, "ABX", Implied, 1, RegX);
    row!(t, 0x3b, "RTI", Implied, 1, Rti);
    row!(t, 0x3d, "MUL", Implied, 1, RegA);
    row!(t, 0x3f, "SWI", Implied, 1);
    row!(t, 0x21, "BRN", Relative, 2, BranchNotTaken);
    row!(t, 0x8e, "LDX", ImmediateWord, 3, RegX);
    row!(t, 0x9e, "LDX", Direct, 2, LoadXFromMemory);
    row!(t, 0xae, "LDX", IndexedX, 2, LoadXFromMemory);
    row!(t, 0xbe, "LDX", Extended, 3, LoadXFromMemory);
    row!(t, 0x9f, "STX", Direct, 2, StoreXInMemory);
    row!(t, 0xaf, "STX", IndexedX, 2, StoreXInMemory);
    row!(t, 0xbf, "STX", Extended, 3, StoreXInMemory);
    row!(t, 0xcc, "LDD", ImmediateWord, 3, RegA);
    row!(t, 0xdc, "LDD", Direct, 2, LoadAFromMemory);
    row!(t, 0xec, "LDD", IndexedX, 2, LoadAFromMemory);
    row!(t, 0xfc, "LDD", Extended, 3, LoadAFromMemory);
    row!(t, 0xdd, "STD", Direct, 2, StoreAInMemory);
    row!(t, 0xed, "STD", IndexedX, 2, StoreAInMemory);
    row!(t, 0xfd, "STD", Extended, 3, StoreAInMemory);
    row!(t, 0xce, "LDU", ImmediateWord, 3);
    row!(t, 0xde, "LDU", Direct, 2, PeekMemory);
    row!(t, 0xee, "LDU", IndexedX, 2, PeekMemory);
    row!(t, 0xfe, "LDU", Extended, 3, PeekMemory);
    row!(t, 0xdf, "STU", Direct, 2, MemoryAlter);
    row!(t, 0xef, "STU", IndexedX, 2, MemoryAlter);
    row!(t, 0xff, "STU", Extended, 3, MemoryAlter);
    row!(t, 0x6e, "JMP", IndexedX, 2, BranchTaken);
    row!(t, 0x7e, "JMP", Extended, 3, BranchTaken);
    row!(t, 0x9d, "JSR", Direct, 2, BranchTaken);
    row!(t, 0xad, "JSR", IndexedX, 2, BranchTaken);
    row!(t, 0xbd, "JSR", Extended, 3, BranchTaken);

    t
}

/// 6809 `10` prefix: long conditional branches and Y/S ops.
fn m6809_p10_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    for (op, mn) in &[
        (0x21u8, "LBRN"),
        (0x22u8, "LBHI"),
        (0x23u8, "LBLS"),
        (0x24u8, "LBCC"),
        (0x25u8, "LBCS"),
        (0x26u8, "LBNE"),
        (0x27u8, "LBEQ"),
        (0x28u8, "LBVC"),
        (0x29u8, "LBVS"),
        (0x2au8, "LBPL"),
        (0x2bu8, "LBMI"),
        (0x2cu8, "LBGE"),
        (0x2du8, "LBLT"),
        (0x2eu8, "LBGT"),
        (0x2fu8, "LBLE"),
    ] {
        row!(t, *op, *mn, RelativeLong, 4, BranchTaken);
    }

    row!(t, 0x3f, "SWI2", Implied, 2);
    row!(t, 0x83, "CMPD", ImmediateWord, 4);
    row!(t, 0x93, "CMPD", Direct, 3, PeekMemory);
    row!(t, 0xa3, "CMPD", IndexedX, 3, PeekMemory);
    row!(t, 0xb3, "CMPD", Extended, 4, PeekMemory);
    row!(t, 0x8c, "CMPY", ImmediateWord, 4, RegY);
    row!(t, 0x9c, "CMPY", Direct, 3, PeekMemory);
    row!(t, 0xac, "CMPY", IndexedX, 3, PeekMemory);
    row!(t, 0xbc, "CMPY", Extended, 4, PeekMemory);
    row!(t, 0x8e, "LDY", ImmediateWord, 4, RegY);
    row!(t, 0x9e, "LDY", Direct, 3, LoadYFromMemory);
    row!(t, 0xae, "LDY", IndexedX, 3, LoadYFromMemory);
    row!(t, 0xbe, "LDY", Extended, 4, LoadYFromMemory);
    row!(t, 0x9f, "STY", Direct, 3, StoreYInMemory);
    row!(t, 0xaf, "STY", IndexedX, 3, StoreYInMemory);
    row!(t, 0xbf, "STY", Extended, 4, StoreYInMemory);
    row!(t, 0xce, "LDS", ImmediateWord, 4);
    row!(t, 0xde, "LDS", Direct, 3, PeekMemory);
    row!(t, 0xee, "LDS", IndexedX, 3, PeekMemory);
    row!(t, 0xfe, "LDS", Extended, 4, PeekMemory);
    row!(t, 0xdf, "STS", Direct, 3, MemoryAlter);
    row!(t, 0xef, "STS", IndexedX, 3, MemoryAlter);
    row!(t, 0xff, "STS", Extended, 4, MemoryAlter);

    t
}

/// 6809 `11` prefix: SWI3 and the U/S compares.
fn m6809_p11_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    row!(t, 0x3f, "SWI3", Implied, 2);
    row!(t, 0x83, "CMPU", ImmediateWord, 4);
    row!(t, 0x93, "CMPU", Direct, 3, PeekMemory);
    row!(t, 0xa3, "CMPU", IndexedX, 3, PeekMemory);
    row!(t, 0xb3, "CMPU", Extended, 4, PeekMemory);
    row!(t, 0x8c, "CMPS", ImmediateWord, 4);
    row!(t, 0x9c, "CMPS", Direct, 3, PeekMemory);
    row!(t, 0xac, "CMPS", IndexedX, 3, PeekMemory);
    row!(t, 0xbc, "CMPS", Extended, 4, PeekMemory);

    t
}

lazy_static! {
    pub static ref M6800_TABLE: Table = Table::new(Endian::Big, m6800_rows());
    pub static ref M6809_TABLE: Table = Table::new(Endian::Big, m6809_rows())
        .with_prefix(0x10, m6809_p10_rows())
        .with_prefix(0x11, m6809_p11_rows());
    pub static ref M6811_TABLE: Table = Table::new(Endian::Big, m6811_rows())
        .with_prefix(0x18, m6811_y_rows())
        .with_prefix(0x1a, m6811_cpd_rows())
        .with_prefix(0xcd, m6811_cd_rows());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FlagResult;
    use crate::arch::AddrMode;

    #[test]
    fn m6800_ldaa_extended() {
        let (entry, header) = M6800_TABLE.lookup(&[0xb6, 0x12, 0x34]).unwrap();

        assert_eq!(header, 1);
        assert_eq!(entry.mnemonic, "LDAA");
        assert_eq!(entry.mode, AddrMode::Extended);
        assert_eq!(entry.flag, FlagResult::LoadAFromMemory);
    }

    #[test]
    fn m6811_aby_needs_lead_in() {
        let (entry, header) = M6811_TABLE.lookup(&[0x18, 0x3a]).unwrap();

        assert_eq!(header, 2);
        assert_eq!(entry.mnemonic, "ABY");
        assert_eq!(entry.len, 2);
    }

    #[test]
    fn m6811_lead_in_without_second_byte_is_incomplete() {
        assert!(M6811_TABLE.lookup(&[0x18]).is_none());
    }

    #[test]
    fn m6809_primary_slots_behind_prefixes_are_cleared() {
        assert!(M6809_TABLE.primary_entry(0x10).is_illegal());
        assert!(M6809_TABLE.primary_entry(0x11).is_illegal());
    }

    #[test]
    fn m6809_long_branch() {
        let (entry, header) = M6809_TABLE.lookup(&[0x10, 0x27, 0x01, 0x00]).unwrap();

        assert_eq!(header, 2);
        assert_eq!(entry.mnemonic, "LBEQ");
        assert_eq!(entry.len, 4);
        assert_eq!(entry.flag, FlagResult::BranchTaken);
    }
}
