//! Jumpman game-data pseudo-architectures.
//!
//! Two fixed-record formats from the Jumpman level editor: harvest
//! tables (7-byte peanut records terminated by `FF`) and level draw
//! scripts (variable records selected by the `FC`-`FF` command bytes).
//! Neither is code; decoding them through the table machinery gives the
//! region classifier one uniform path.

use crate::arch::{filled, Endian, Entry, Table};

fn harvest_rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    // Any record not starting with FF is a peanut entry: grid code,
    // x, y, then three vectors of trigger/paint addresses.
    for op in 0..=254u8 {
        row!(t, op, "HARVEST", Bytes, 7);
    }

    row!(t, 0xff, "END", Implied, 1);

    t
}

fn level_rows() -> Box<[Entry; 256]> {
    let mut t = filled();

    row!(t, 0xfc, "SPACING", Bytes, 3);
    row!(t, 0xfd, "DRAW", Bytes, 5);
    row!(t, 0xfe, "POS", Bytes, 3);
    row!(t, 0xff, "END", Implied, 1);

    t
}

lazy_static! {
    pub static ref HARVEST_TABLE: Table = Table::new(Endian::Little, harvest_rows());
    pub static ref LEVEL_TABLE: Table = Table::new(Endian::Little, level_rows());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn harvest_records_are_seven_bytes() {
        let (entry, _) = HARVEST_TABLE
            .lookup(&[0x42, 0x30, 0x50, 0x00, 0x00, 0x00, 0x00])
            .unwrap();

        assert_eq!(entry.mnemonic, "HARVEST");
        assert_eq!(entry.len, 7);
    }

    #[test]
    fn terminator_is_one_byte() {
        let (entry, _) = HARVEST_TABLE.lookup(&[0xff]).unwrap();

        assert_eq!(entry.mnemonic, "END");
        assert_eq!(entry.len, 1);
    }

    #[test]
    fn unknown_level_commands_fall_back_to_raw_bytes() {
        let (entry, _) = LEVEL_TABLE.lookup(&[0x12]).unwrap();

        assert!(entry.is_illegal());
    }
}
