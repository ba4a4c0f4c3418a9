//! Cross-architecture table sanity checks.

use crate::arch::ArchName;

const ALL: [ArchName; 13] = [
    ArchName::Mos6502,
    ArchName::Mos6502Undoc,
    ArchName::Wdc65816,
    ArchName::Wdc65C02,
    ArchName::M6800,
    ArchName::M6809,
    ArchName::M6811,
    ArchName::I8051,
    ArchName::I8080,
    ArchName::Z80,
    ArchName::AnticDl,
    ArchName::JumpmanHarvest,
    ArchName::JumpmanLevel,
];

#[test]
fn every_first_byte_matches_some_entry() {
    // 16 bytes is enough trailing context for any table's longest entry.
    let mut buf = [0u8; 16];

    for arch in &ALL {
        for op in 0..=255u8 {
            buf[0] = op;

            let (entry, header) = arch
                .table()
                .lookup(&buf)
                .unwrap_or_else(|| panic!("{} byte {:#04x} did not match", arch, op));

            assert!(entry.len >= 1, "{} byte {:#04x} has zero length", arch, op);
            assert!(
                usize::from(entry.len) >= usize::from(header),
                "{} byte {:#04x} shorter than its opcode header",
                arch,
                op
            );
            assert!(
                usize::from(entry.len) <= arch.max_instruction_len(),
                "{} byte {:#04x} exceeds the declared maximum",
                arch,
                op
            );
        }
    }
}

#[test]
fn lookup_is_deterministic() {
    for arch in &ALL {
        let a = arch.table().lookup(&[0x10, 0x20, 0x30, 0x40]);
        let b = arch.table().lookup(&[0x10, 0x20, 0x30, 0x40]);

        match (a, b) {
            (Some((ea, ha)), Some((eb, hb))) => {
                assert_eq!(ea, eb);
                assert_eq!(ha, hb);
            }
            (None, None) => {}
            _ => panic!("{} lookup not deterministic", arch),
        }
    }
}

#[test]
fn arch_names_round_trip_through_strings() {
    for arch in &ALL {
        let parsed: ArchName = arch.to_string().parse().unwrap();

        assert_eq!(parsed, *arch);
    }
}

#[test]
fn table_selection_differs_by_arch() {
    // 0xa9 is LDA immediate on the 6502 and XRA C on the 8080.
    let (lda, _) = ArchName::Mos6502.table().lookup(&[0xa9, 0x42]).unwrap();
    let (xra, _) = ArchName::I8080.table().lookup(&[0xa9, 0x42]).unwrap();

    assert_eq!(lda.mnemonic, "LDA");
    assert_eq!(xra.mnemonic, "XRA C");
}
