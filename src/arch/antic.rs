//! Atari ANTIC display-list pseudo-architecture.
//!
//! Display lists are data, not CPU code, but every byte value decodes to
//! exactly one display-list instruction, so the table machinery fits.
//! The table is computed per byte value instead of assigned row by row:
//! the low nibble selects blank/jump/mode, and the high nibble carries
//! the DLI, LMS, VSCROLL and HSCROLL option bits.

use crate::analysis::FlagResult;
use crate::arch::{AddrMode, Endian, Entry, Table};

const DLI: u8 = 0x80;
const LMS: u8 = 0x40;
const VSCROLL: u8 = 0x20;
const HSCROLL: u8 = 0x10;

fn entry_for(op: u8) -> Entry {
    let mode = op & 0x0f;
    let mut parts: Vec<String> = Vec::new();

    if op & DLI != 0 && mode != 0 {
        // A DLI bit on a blank line is ignored by the hardware.
        parts.push("DLI".to_string());
    }

    match mode {
        0 => {
            parts.push(format!("BLANK {}", ((op >> 4) & 7) + 1));

            Entry::new(&parts.join(" "), AddrMode::Implied, 1, FlagResult::None)
        }
        1 => {
            // JVB waits for vertical blank before following the address.
            parts.push(if op & LMS != 0 { "JVB" } else { "JMP" }.to_string());

            Entry::new(
                &parts.join(" "),
                AddrMode::Absolute,
                3,
                FlagResult::BranchTaken,
            )
        }
        _ => {
            if op & HSCROLL != 0 {
                parts.push("HSCROLL".to_string());
            }

            if op & VSCROLL != 0 {
                parts.push("VSCROLL".to_string());
            }

            parts.push(format!("MODE {:X}", mode));

            if op & LMS != 0 {
                parts.push("LMS".to_string());

                Entry::new(
                    &parts.join(" "),
                    AddrMode::Absolute,
                    3,
                    FlagResult::LoadAFromMemory,
                )
            } else {
                Entry::new(&parts.join(" "), AddrMode::Implied, 1, FlagResult::None)
            }
        }
    }
}

fn rows() -> Box<[Entry; 256]> {
    Box::new(std::array::from_fn(|op| entry_for(op as u8)))
}

lazy_static! {
    pub static ref TABLE: Table = Table::new(Endian::Little, rows());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_encode_count() {
        let (entry, _) = TABLE.lookup(&[0x70]).unwrap();

        assert_eq!(entry.mnemonic, "BLANK 8");
        assert_eq!(entry.len, 1);
    }

    #[test]
    fn jvb_takes_an_address() {
        let (entry, _) = TABLE.lookup(&[0x41, 0x00, 0x06]).unwrap();

        assert_eq!(entry.mnemonic, "JVB");
        assert_eq!(entry.len, 3);
        assert_eq!(entry.flag, FlagResult::BranchTaken);
    }

    #[test]
    fn lms_mode_line_carries_screen_address() {
        let (entry, _) = TABLE.lookup(&[0xc2, 0x00, 0x40]).unwrap();

        assert_eq!(entry.mnemonic, "DLI MODE 2 LMS");
        assert_eq!(entry.len, 3);
    }

    #[test]
    fn every_byte_decodes() {
        for op in 0..=255u8 {
            let (entry, _) = TABLE.lookup(&[op, 0, 0]).unwrap();

            assert!(!entry.is_illegal());
        }
    }
}
