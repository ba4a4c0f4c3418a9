//! Intel 8080 table.
//!
//! The 8080 opcode map is periodic in octal, so most of the table is
//! built from register-name loops rather than one row per opcode.
//! Register operands are folded into the mnemonic text; only immediate
//! and address operands are rendered separately.

use crate::analysis::FlagResult;
use crate::arch::{filled, AddrMode, Endian, Entry, Table};

const REGS: [&str; 8] = ["B", "C", "D", "E", "H", "L", "M", "A"];
const PAIRS: [&str; 4] = ["B", "D", "H", "SP"];
const ALU: [&str; 8] = ["ADD", "ADC", "SUB", "SBB", "ANA", "XRA", "ORA", "CMP"];
const ALU_IMM: [&str; 8] = ["ADI", "ACI", "SUI", "SBI", "ANI", "XRI", "ORI", "CPI"];
const CONDS: [&str; 8] = ["NZ", "Z", "NC", "C", "PO", "PE", "P", "M"];

fn rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    for (i, rp) in PAIRS.iter().enumerate() {
        let base = (i as u8) << 4;

        t[(base | 0x01) as usize] = Entry::new(
            &format!("LXI {},{{}}", rp),
            AddrMode::ImmediateWord,
            3,
            FlagResult::None,
        );
        row!(t, base | 0x03, &format!("INX {}", rp), Implied, 1);
        row!(t, base | 0x09, &format!("DAD {}", rp), Implied, 1);
        row!(t, base | 0x0b, &format!("DCX {}", rp), Implied, 1);
    }

    for (i, r) in REGS.iter().enumerate() {
        let inr = (i as u8) << 3 | 0x04;
        let single = if *r == "M" {
            FlagResult::MemoryAlter
        } else if *r == "A" {
            FlagResult::RegA
        } else {
            FlagResult::None
        };

        t[inr as usize] = Entry::new(&format!("INR {}", r), AddrMode::Implied, 1, single);
        t[(inr + 1) as usize] = Entry::new(&format!("DCR {}", r), AddrMode::Implied, 1, single);
        t[(inr + 2) as usize] = Entry::new(
            &format!("MVI {},{{}}", r),
            AddrMode::Immediate,
            2,
            if *r == "M" {
                FlagResult::MemoryAlter
            } else {
                single
            },
        );
    }

    row!(t, 0x00, "NOP", Implied, 1);
    row!(t, 0x02, "STAX B", Implied, 1, StoreAInMemory);
    row!(t, 0x12, "STAX D", Implied, 1, StoreAInMemory);
    row!(t, 0x0a, "LDAX B", Implied, 1, LoadAFromMemory);
    row!(t, 0x1a, "LDAX D", Implied, 1, LoadAFromMemory);
    row!(t, 0x07, "RLC", Implied, 1, RegA);
    row!(t, 0x0f, "RRC", Implied, 1, RegA);
    row!(t, 0x17, "RAL", Implied, 1, RegA);
    row!(t, 0x1f, "RAR", Implied, 1, RegA);
    row!(t, 0x27, "DAA", Implied, 1, RegA);
    row!(t, 0x2f, "CMA", Implied, 1, RegA);
    row!(t, 0x37, "STC", Implied, 1);
    row!(t, 0x3f, "CMC", Implied, 1);
    row!(t, 0x22, "SHLD", Extended, 3, MemoryAlter);
    row!(t, 0x2a, "LHLD", Extended, 3, PeekMemory);
    row!(t, 0x32, "STA", Extended, 3, StoreAInMemory);
    row!(t, 0x3a, "LDA", Extended, 3, LoadAFromMemory);

    // MOV block, 0x40-0x7F. 0x76 would be MOV M,M and is HLT instead.
    for (d, dst) in REGS.iter().enumerate() {
        for (s, src) in REGS.iter().enumerate() {
            let op = 0x40 | (d as u8) << 3 | s as u8;

            if op == 0x76 {
                row!(t, op, "HLT", Implied, 1);
                continue;
            }

            let flag = if *dst == "M" {
                if *src == "A" {
                    FlagResult::StoreAInMemory
                } else {
                    FlagResult::MemoryAlter
                }
            } else if *src == "M" {
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
                Entry::new(&format!("MOV {},{}", dst, src), AddrMode::Implied, 1, flag);
        }
    }

    // ALU block, 0x80-0xBF.
    for (a, mn) in ALU.iter().enumerate() {
        for (s, src) in REGS.iter().enumerate() {
            let op = 0x80 | (a as u8) << 3 | s as u8;
            let flag = if *src == "M" {
                if *mn == "CMP" {
                    FlagResult::PeekMemory
                } else {
                    FlagResult::MemoryReadAlterA
                }
            } else {
                FlagResult::RegA
            };

            t[op as usize] = Entry::new(&format!("{} {}", mn, src), AddrMode::Implied, 1, flag);
        }
    }

    // Condition block, 0xC0-0xFF: returns, jumps and calls in octal
    // columns, with the stack, immediate-ALU and RST ops interleaved.
    for (c, cond) in CONDS.iter().enumerate() {
        let base = 0xc0 | (c as u8) << 3;

        t[base as usize] =
            Entry::new(&format!("R{}", cond), AddrMode::Implied, 1, FlagResult::Rts);
        t[(base | 0x02) as usize] = Entry::new(
            &format!("J{}", cond),
            AddrMode::Extended,
            3,
            FlagResult::BranchTaken,
        );
        t[(base | 0x04) as usize] = Entry::new(
            &format!("C{}", cond),
            AddrMode::Extended,
            3,
            FlagResult::BranchTaken,
        );
        t[(base | 0x06) as usize] = Entry::new(
            ALU_IMM[c],
            AddrMode::Immediate,
            2,
            FlagResult::RegA,
        );
        t[(base | 0x07) as usize] = Entry::new(
            &format!("RST {}", c),
            AddrMode::Implied,
            1,
            FlagResult::BranchTaken,
        );
    }

    for (i, rp) in ["B", "D", "H", "PSW"].iter().enumerate() {
        let base = 0xc0 | (i as u8) << 4;
        let (pop, push) = if *rp == "PSW" {
            (FlagResult::PullSr, FlagResult::PushSr)
        } else {
            (FlagResult::PullA, FlagResult::PushA)
        };

        t[(base | 0x01) as usize] =
            Entry::new(&format!("POP {}", rp), AddrMode::Implied, 1, pop);
        t[(base | 0x05) as usize] =
            Entry::new(&format!("PUSH {}", rp), AddrMode::Implied, 1, push);
    }

    row!(t, 0xc3, "JMP", Extended, 3, BranchTaken);
    row!(t, 0xc9, "RET", Implied, 1, Rts);
    row!(t, 0xcd, "CALL", Extended, 3, BranchTaken);
    row!(t, 0xd3, "OUT", Immediate, 2);
    row!(t, 0xdb, "IN", Immediate, 2, RegA);
    row!(t, 0xe3, "XTHL", Implied, 1, MemoryAlter);
    row!(t, 0xe9, "PCHL", Implied, 1, JmpIndirect);
    row!(t, 0xeb, "XCHG", Implied, 1);
    row!(t, 0xf3, "DI", Implied, 1);
    row!(t, 0xf9, "SPHL", Implied, 1);
    row!(t, 0xfb, "EI", Implied, 1);

    t
}

lazy_static! {
    pub static ref TABLE: Table = Table::new(Endian::Little, rows());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mov_block_is_register_to_register() {
        let (entry, _) = TABLE.lookup(&[0x78]).unwrap();

        assert_eq!(entry.mnemonic, "MOV A,B");
        assert_eq!(entry.flag, FlagResult::RegA);
    }

    #[test]
    fn hlt_displaces_mov_m_m() {
        let (entry, _) = TABLE.lookup(&[0x76]).unwrap();

        assert_eq!(entry.mnemonic, "HLT");
    }

    #[test]
    fn conditional_jump_carries_address() {
        let (entry, _) = TABLE.lookup(&[0xc2, 0x00, 0x10]).unwrap();

        assert_eq!(entry.mnemonic, "JNZ");
        assert_eq!(entry.len, 3);
        assert_eq!(entry.flag, FlagResult::BranchTaken);
    }

    #[test]
    fn every_slot_is_defined() {
        for op in 0..=255u8 {
            let (entry, _) = TABLE.lookup(&[op, 0, 0]).unwrap();

            assert!(!entry.is_illegal(), "slot {:#04x} undefined", op);
        }
    }
}
