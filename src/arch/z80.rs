//! Zilog Z80 table: the 8080-shaped primary map plus the `CB`, `ED`,
//! `DD` and `FD` prefix groups.
//!
//! The doubly-prefixed `DD CB`/`FD CB` bit operations are not tabled;
//! those slots stay on the sentinel and decode as raw bytes. Undocumented
//! `IXH`/`IXL` half-register forms are likewise left undefined.

use crate::analysis::FlagResult;
use crate::arch::{filled, filled_prefixed, AddrMode, Endian, Entry, Table};

const REGS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "(HL)", "A"];
const PAIRS: [&str; 4] = ["BC", "DE", "HL", "SP"];
const ALU: [&str; 8] = [
    "ADD A,", "ADC A,", "SUB ", "SBC A,", "AND ", "XOR ", "OR ", "CP ",
];
const CONDS: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];
const ROT: [&str; 8] = ["RLC", "RRC", "RL", "RR", "SLA", "SRA", "SLL", "SRL"];

fn reg_flag(r: &str, mem: FlagResult) -> FlagResult {
    match r {
        "(HL)" => mem,
        "A" => FlagResult::RegA,
        _ => FlagResult::None,
    }
}

fn rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    for (i, rp) in PAIRS.iter().enumerate() {
        let base = (i as u8) << 4;

        t[(base | 0x01) as usize] = Entry::new(
            &format!("LD {},{{}}", rp),
            AddrMode::ImmediateWord,
            3,
            FlagResult::None,
        );
        row!(t, base | 0x03, &format!("INC {}", rp), Implied, 1);
        row!(t, base | 0x09, &format!("ADD HL,{}", rp), Implied, 1);
        row!(t, base | 0x0b, &format!("DEC {}", rp), Implied, 1);
    }

    for (i, r) in REGS.iter().enumerate() {
        let base = (i as u8) << 3;

        t[(base | 0x04) as usize] = Entry::new(
            &format!("INC {}", r),
            AddrMode::Implied,
            1,
            reg_flag(r, FlagResult::MemoryAlter),
        );
        t[(base | 0x05) as usize] = Entry::new(
            &format!("DEC {}", r),
            AddrMode::Implied,
            1,
            reg_flag(r, FlagResult::MemoryAlter),
        );
        t[(base | 0x06) as usize] = Entry::new(
            &format!("LD {},{{}}", r),
            AddrMode::Immediate,
            2,
            reg_flag(r, FlagResult::MemoryAlter),
        );
    }

    row!(t, 0x00, "NOP", Implied, 1);
    row!(t, 0x08, "EX AF,AF'", Implied, 1);
    row!(t, 0x10, "DJNZ {}", Relative, 2, BranchTaken);
    row!(t, 0x18, "JR {}", Relative, 2, BranchTaken);
    row!(t, 0x20, "JR NZ,{}", Relative, 2, BranchTaken);
    row!(t, 0x28, "JR Z,{}", Relative, 2, BranchTaken);
    row!(t, 0x30, "JR NC,{}", Relative, 2, BranchTaken);
    row!(t, 0x38, "JR C,{}", Relative, 2, BranchTaken);

    row!(t, 0x02, "LD (BC),A", Implied, 1, StoreAInMemory);
    row!(t, 0x12, "LD (DE),A", Implied, 1, StoreAInMemory);
    row!(t, 0x0a, "LD A,(BC)", Implied, 1, LoadAFromMemory);
    row!(t, 0x1a, "LD A,(DE)", Implied, 1, LoadAFromMemory);
    row!(t, 0x22, "LD ({}),HL", Extended, 3, MemoryAlter);
    row!(t, 0x2a, "LD HL,({})", Extended, 3, PeekMemory);
    row!(t, 0x32, "LD ({}),A", Extended, 3, StoreAInMemory);
    row!(t, 0x3a, "LD A,({})", Extended, 3, LoadAFromMemory);

    row!(t, 0x07, "RLCA", Implied, 1, RegA);
    row!(t, 0x0f, "RRCA", Implied, 1, RegA);
    row!(t, 0x17, "RLA", Implied, 1, RegA);
    row!(t, 0x1f, "RRA", Implied, 1, RegA);
    row!(t, 0x27, "DAA", Implied, 1, RegA);
    row!(t, 0x2f, "CPL", Implied, 1, RegA);
    row!(t, 0x37, "SCF", Implied, 1);
    row!(t, 0x3f, "CCF", Implied, 1);

    // LD block; 0x76 would be LD (HL),(HL) and is HALT instead.
    for (d, dst) in REGS.iter().enumerate() {
        for (s, src) in REGS.iter().enumerate() {
            let op = 0x40 | (d as u8) << 3 | s as u8;

            if op == 0x76 {
                row!(t, op, "HALT", Implied, 1);
                continue;
            }

            let flag = if *dst == "(HL)" {
                if *src == "A" {
                    FlagResult::StoreAInMemory
                } else {
                    FlagResult::MemoryAlter
                }
            } else if *src == "(HL)" {
                if *dst == "A" {
                    FlagResult::LoadAFromMemory
                } else {
                    FlagResult::None
                }
            } else if *dst == "A" {
                FlagResult::RegA
            } else {
                FlagResult::None
            };

            t[op as usize] =
                Entry::new(&format!("LD {},{}", dst, src), AddrMode::Implied, 1, flag);
        }
    }

    for (a, mn) in ALU.iter().enumerate() {
        for (s, src) in REGS.iter().enumerate() {
            let op = 0x80 | (a as u8) << 3 | s as u8;
            let flag = if *src == "(HL)" {
                if a == 7 {
                    FlagResult::PeekMemory
                } else {
                    FlagResult::MemoryReadAlterA
                }
            } else {
                FlagResult::RegA
            };

            t[op as usize] = Entry::new(&format!("{}{}", mn, src), AddrMode::Implied, 1, flag);
        }
    }

    for (c, cond) in CONDS.iter().enumerate() {
        let base = 0xc0 | (c as u8) << 3;

        t[base as usize] =
            Entry::new(&format!("RET {}", cond), AddrMode::Implied, 1, FlagResult::Rts);
        t[(base | 0x02) as usize] = Entry::new(
            &format!("JP {},{{}}", cond),
            AddrMode::Extended,
            3,
            FlagResult::BranchTaken,
        );
        t[(base | 0x04) as usize] = Entry::new(
            &format!("CALL {},{{}}", cond),
            AddrMode::Extended,
            3,
            FlagResult::BranchTaken,
        );
        t[(base | 0x06) as usize] = Entry::new(
            &format!("{}{{}}", ALU[c]),
            AddrMode::Immediate,
            2,
            FlagResult::RegA,
        );
        t[(base | 0x07) as usize] = Entry::new(
            &format!("RST ${:02x}", c * 8),
            AddrMode::Implied,
            1,
            FlagResult::BranchTaken,
        );
    }

    for (i, rp) in ["BC", "DE", "HL", "AF"].iter().enumerate() {
        let base = 0xc0 | (i as u8) << 4;
        let (pop, push) = if *rp == "AF" {
            (FlagResult::PullSr, FlagResult::PushSr)
        } else {
            (FlagResult::PullA, FlagResult::PushA)
        };

        t[(base | 0x01) as usize] =
            Entry::new(&format!("POP {}", rp), AddrMode::Implied, 1, pop);
        t[(base | 0x05) as usize] =
            Entry::new(&format!("PUSH {}", rp), AddrMode::Implied, 1, push);
    }

    row!(t, 0xc3, "JP", Extended, 3, BranchTaken);
    row!(t, 0xc9, "RET", Implied, 1, Rts);
    row!(t, 0xcd, "CALL", Extended, 3, BranchTaken);
    row!(t, 0xd3, "OUT ({}),A", Immediate, 2);
    row!(t, 0xd9, "EXX", Implied, 1);
    row!(t, 0xdb, "IN A,({})", Immediate, 2, RegA);
    row!(t, 0xe3, "EX (SP),HL", Implied, 1, MemoryAlter);
    row!(t, 0xe9, "JP (HL)", Implied, 1, JmpIndirect);
    row!(t, 0xeb, "EX DE,HL", Implied, 1);
    row!(t, 0xf3, "DI", Implied, 1);
    row!(t, 0xf9, "LD SP,HL", Implied, 1);
    row!(t, 0xfb, "EI", Implied, 1);

    t
}

fn cb_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    for (s, r) in REGS.iter().enumerate() {
        for rot in 0..8 {
            let op = (rot as u8) << 3 | s as u8;

            t[op as usize] = Entry::new(
                &format!("{} {}", ROT[rot], r),
                AddrMode::Implied,
                2,
                reg_flag(r, FlagResult::MemoryAlter),
            );
        }

        for bit in 0..8u8 {
            let tail = bit << 3 | s as u8;
            let test = if *r == "(HL)" {
                FlagResult::PeekMemory
            } else {
                FlagResult::None
            };

            t[(0x40 | tail) as usize] = Entry::new(
                &format!("BIT {},{}", bit, r),
                AddrMode::Implied,
                2,
                test,
            );
            t[(0x80 | tail) as usize] = Entry::new(
                &format!("RES {},{}", bit, r),
                AddrMode::Implied,
                2,
                reg_flag(r, FlagResult::MemoryAlter),
            );
            t[(0xc0 | tail) as usize] = Entry::new(
                &format!("SET {},{}", bit, r),
                AddrMode::Implied,
                2,
                reg_flag(r, FlagResult::MemoryAlter),
            );
        }
    }

    t
}

fn ed_rows() -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    for (i, r) in REGS.iter().enumerate() {
        let base = 0x40 | (i as u8) << 3;

        if *r == "(HL)" {
            // The (HL) column holds the flag-only IN and the OUT-zero
            // undocumented form.
            row!(t, base, "IN (C)", Implied, 2);
            row!(t, base | 0x01, "OUT (C),0", Implied, 2);
        } else {
            t[base as usize] = Entry::new(
                &format!("IN {},(C)", r),
                AddrMode::Implied,
                2,
                reg_flag(r, FlagResult::None),
            );
            t[(base | 0x01) as usize] = Entry::new(
                &format!("OUT (C),{}", r),
                AddrMode::Implied,
                2,
                FlagResult::None,
            );
        }
    }

    for (p, rp) in PAIRS.iter().enumerate() {
        let base = 0x40 | (p as u8) << 4;

        row!(t, base | 0x02, &format!("SBC HL,{}", rp), Implied, 2);
        row!(t, base | 0x0a, &format!("ADC HL,{}", rp), Implied, 2);
        t[(base | 0x03) as usize] = Entry::new(
            &format!("LD ({{}}),{}", rp),
            AddrMode::Extended,
            4,
            FlagResult::MemoryAlter,
        );
        t[(base | 0x0b) as usize] = Entry::new(
            &format!("LD {},({{}})", rp),
            AddrMode::Extended,
            4,
            FlagResult::PeekMemory,
        );
    }

    row!(t, 0x44, "NEG", Implied, 2, RegA);
    row!(t, 0x45, "RETN", Implied, 2, Rti);
    row!(t, 0x4d, "RETI", Implied, 2, Rti);
    row!(t, 0x46, "IM 0", Implied, 2);
    row!(t, 0x56, "IM 1", Implied, 2);
    row!(t, 0x5e, "IM 2", Implied, 2);
    row!(t, 0x47, "LD I,A", Implied, 2);
    row!(t, 0x4f, "LD R,A", Implied, 2);
    row!(t, 0x57, "LD A,I", Implied, 2, RegA);
    row!(t, 0x5f, "LD A,R", Implied, 2, RegA);
    row!(t, 0x67, "RRD", Implied, 2, MemoryAlter);
    row!(t, 0x6f, "RLD", Implied, 2, MemoryAlter);

    for (col, mn) in &[
        (0xa0u8, ["LDI", "LDD", "LDIR", "LDDR"]),
        (0xa1u8, ["CPI", "CPD", "CPIR", "CPDR"]),
        (0xa2u8, ["INI", "IND", "INIR", "INDR"]),
        (0xa3u8, ["OUTI", "OUTD", "OTIR", "OTDR"]),
    ] {
        for (row, name) in mn.iter().enumerate() {
            let op = col + (row as u8) * 8;
            // Odd columns (CP and OUT groups) only read memory.
            let flag = if col & 0x01 != 0 {
                FlagResult::PeekMemory
            } else {
                FlagResult::MemoryAlter
            };

            t[op as usize] = Entry::new(name, AddrMode::Implied, 2, flag);
        }
    }

    t
}

/// The `DD`/`FD` group, parameterized on the index register name.
fn xy_rows(xy: &str) -> Box<[Entry; 256]> {
    let mut t = filled_prefixed();

    for (p, rp) in ["BC", "DE", "", "SP"].iter().enumerate() {
        let other = if rp.is_empty() { xy } else { rp };

        row!(
            t,
            0x09 | (p as u8) << 4,
            &format!("ADD {},{}", xy, other),
            Implied,
            2
        );
    }

    t[0x21] = Entry::new(
        &format!("LD {},{{}}", xy),
        AddrMode::ImmediateWord,
        4,
        FlagResult::None,
    );
    t[0x22] = Entry::new(
        &format!("LD ({{}}),{}", xy),
        AddrMode::Extended,
        4,
        FlagResult::MemoryAlter,
    );
    t[0x2a] = Entry::new(
        &format!("LD {},({{}})", xy),
        AddrMode::Extended,
        4,
        FlagResult::PeekMemory,
    );
    row!(t, 0x23, &format!("INC {}", xy), Implied, 2);
    row!(t, 0x2b, &format!("DEC {}", xy), Implied, 2);
    t[0x34] = Entry::new(
        &format!("INC ({}{{}})", xy),
        AddrMode::Displacement,
        3,
        FlagResult::MemoryAlter,
    );
    t[0x35] = Entry::new(
        &format!("DEC ({}{{}})", xy),
        AddrMode::Displacement,
        3,
        FlagResult::MemoryAlter,
    );
    t[0x36] = Entry::new(
        &format!("LD ({}{{}}", xy),
        AddrMode::DisplacementImmediate,
        4,
        FlagResult::MemoryAlter,
    );

    for (i, r) in REGS.iter().enumerate() {
        if *r == "(HL)" {
            continue;
        }

        let load = if *r == "A" {
            FlagResult::LoadAFromMemory
        } else {
            FlagResult::None
        };
        let store = if *r == "A" {
            FlagResult::StoreAInMemory
        } else {
            FlagResult::MemoryAlter
        };

        t[(0x46 | (i as u8) << 3) as usize] = Entry::new(
            &format!("LD {},({}{{}})", r, xy),
            AddrMode::Displacement,
            3,
            load,
        );
        t[(0x70 | i as u8) as usize] = Entry::new(
            &format!("LD ({}{{}}),{}", xy, r),
            AddrMode::Displacement,
            3,
            store,
        );
    }

    for (a, mn) in ALU.iter().enumerate() {
        let flag = if a == 7 {
            FlagResult::PeekMemory
        } else {
            FlagResult::MemoryReadAlterA
        };

        t[(0x86 | (a as u8) << 3) as usize] = Entry::new(
            &format!("{}({}{{}})", mn, xy),
            AddrMode::Displacement,
            3,
            flag,
        );
    }

    row!(t, 0xe1, &format!("POP {}", xy), Implied, 2, PullA);
    row!(t, 0xe5, &format!("PUSH {}", xy), Implied, 2, PushA);
    row!(t, 0xe3, &format!("EX (SP),{}", xy), Implied, 2, MemoryAlter);
    row!(t, 0xe9, &format!("JP ({})", xy), Implied, 2, JmpIndirect);
    row!(t, 0xf9, &format!("LD SP,{}", xy), Implied, 2);

    t
}

lazy_static! {
    pub static ref TABLE: Table = Table::new(Endian::Little, rows())
        .with_prefix(0xcb, cb_rows())
        .with_prefix(0xed, ed_rows())
        .with_prefix(0xdd, xy_rows("IX"))
        .with_prefix(0xfd, xy_rows("IY"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ld_hl_immediate_word() {
        let (entry, header) = TABLE.lookup(&[0x21, 0x34, 0x12]).unwrap();

        assert_eq!(header, 1);
        assert_eq!(entry.mnemonic, "LD HL,{}");
        assert_eq!(entry.len, 3);
    }

    #[test]
    fn cb_bit_test_on_hl_peeks_memory() {
        let (entry, header) = TABLE.lookup(&[0xcb, 0x7e]).unwrap();

        assert_eq!(header, 2);
        assert_eq!(entry.mnemonic, "BIT 7,(HL)");
        assert_eq!(entry.flag, FlagResult::PeekMemory);
    }

    #[test]
    fn dd_displacement_load() {
        let (entry, header) = TABLE.lookup(&[0xdd, 0x7e, 0x05]).unwrap();

        assert_eq!(header, 2);
        assert_eq!(entry.mnemonic, "LD A,(IX{})");
        assert_eq!(entry.len, 3);
        assert_eq!(entry.flag, FlagResult::LoadAFromMemory);
    }

    #[test]
    fn ed_load_from_absolute_is_four_bytes() {
        let (entry, _) = TABLE.lookup(&[0xed, 0x4b, 0x00, 0x40]).unwrap();

        assert_eq!(entry.mnemonic, "LD BC,({})");
        assert_eq!(entry.len, 4);
    }

    #[test]
    fn bare_prefix_is_incomplete() {
        assert!(TABLE.lookup(&[0xdd]).is_none());
    }
}
