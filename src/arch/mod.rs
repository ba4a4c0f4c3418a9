//! Instruction tables for every architecture the engine can decode.
//!
//! Each architecture (or family of closely related architectures) is a
//! child module exposing one or more 256-entry tables. A table is total:
//! every first-byte value maps to an entry, with undefined opcodes mapped
//! to an illegal-instruction sentinel of length 1 so that decoding always
//! makes forward progress on arbitrary bytes. Prefixed instruction sets
//! (Z80 `CB`/`DD`/`ED`/`FD`, 6809 `10`/`11`, 6811 `18`/`1A`/`CD`) chain to
//! secondary 256-entry tables keyed on the byte after the prefix.
//!
//! Tables are built once, at first use, and never mutated afterwards; they
//! are safe to share across concurrent decode sessions.

#[macro_use]
mod macros;

pub mod antic;
pub mod i8051;
pub mod i8080;
pub mod jumpman;
pub mod m680x;
pub mod mos6502;
pub mod w65c816;
pub mod z80;

use crate::analysis::FlagResult;
use std::{fmt, str};

#[cfg(test)]
mod tests;

/// Enumeration of all architectures the engine ships tables for.
///
/// The last three are not CPUs: they are pseudo-binary formats (Atari
/// display lists and Jumpman game data) decoded through the same table
/// machinery so region classification can treat them uniformly.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArchName {
    Mos6502,
    Mos6502Undoc,
    Wdc65816,
    Wdc65C02,
    M6800,
    M6809,
    M6811,
    I8051,
    I8080,
    Z80,
    AnticDl,
    JumpmanHarvest,
    JumpmanLevel,
}

impl ArchName {
    /// The decode table for this architecture.
    pub fn table(self) -> &'static Table {
        match self {
            ArchName::Mos6502 => &mos6502::NMOS_TABLE,
            ArchName::Mos6502Undoc => &mos6502::UNDOC_TABLE,
            ArchName::Wdc65C02 => &mos6502::CMOS_TABLE,
            ArchName::Wdc65816 => &w65c816::TABLE,
            ArchName::M6800 => &m680x::M6800_TABLE,
            ArchName::M6809 => &m680x::M6809_TABLE,
            ArchName::M6811 => &m680x::M6811_TABLE,
            ArchName::I8051 => &i8051::TABLE,
            ArchName::I8080 => &i8080::TABLE,
            ArchName::Z80 => &z80::TABLE,
            ArchName::AnticDl => &antic::TABLE,
            ArchName::JumpmanHarvest => &jumpman::HARVEST_TABLE,
            ArchName::JumpmanLevel => &jumpman::LEVEL_TABLE,
        }
    }

    /// Upper bound on instruction size, used by callers that want to size
    /// lookahead windows.
    pub fn max_instruction_len(self) -> usize {
        match self {
            ArchName::Wdc65816 => 4,
            ArchName::JumpmanHarvest => 7,
            ArchName::JumpmanLevel => 5,
            _ => 4,
        }
    }
}

impl fmt::Display for ArchName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArchName::Mos6502 => write!(f, "6502"),
            ArchName::Mos6502Undoc => write!(f, "6502undoc"),
            ArchName::Wdc65816 => write!(f, "65816"),
            ArchName::Wdc65C02 => write!(f, "65c02"),
            ArchName::M6800 => write!(f, "6800"),
            ArchName::M6809 => write!(f, "6809"),
            ArchName::M6811 => write!(f, "6811"),
            ArchName::I8051 => write!(f, "8051"),
            ArchName::I8080 => write!(f, "8080"),
            ArchName::Z80 => write!(f, "z80"),
            ArchName::AnticDl => write!(f, "antic"),
            ArchName::JumpmanHarvest => write!(f, "jumpman-harvest"),
            ArchName::JumpmanLevel => write!(f, "jumpman-level"),
        }
    }
}

impl str::FromStr for ArchName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "6502" => Ok(ArchName::Mos6502),
            "6502undoc" => Ok(ArchName::Mos6502Undoc),
            "6502-undocumented" => Ok(ArchName::Mos6502Undoc),
            "65816" => Ok(ArchName::Wdc65816),
            "65c816" => Ok(ArchName::Wdc65816),
            "65c02" => Ok(ArchName::Wdc65C02),
            "6800" => Ok(ArchName::M6800),
            "6809" => Ok(ArchName::M6809),
            "6811" => Ok(ArchName::M6811),
            "68hc11" => Ok(ArchName::M6811),
            "8051" => Ok(ArchName::I8051),
            "8080" => Ok(ArchName::I8080),
            "z80" => Ok(ArchName::Z80),
            "antic" => Ok(ArchName::AnticDl),
            "antic-dl" => Ok(ArchName::AnticDl),
            "jumpman-harvest" => Ok(ArchName::JumpmanHarvest),
            "jumpman-level" => Ok(ArchName::JumpmanLevel),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(ArchName, "valid architecture name");
derive_serialize_from_display!(ArchName);

/// Operand byte order for multi-byte addresses and immediates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Addressing modes across all table-driven architectures.
///
/// This is the union of the modes the shipped families use; each family's
/// tables reference only its own subset. The mode drives both operand
/// rendering and the target-address-present flag modifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddrMode {
    Implied,
    Accumulator,
    Immediate,
    ImmediateWord,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    ZeroPageIndirect,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Relative,
    RelativeLong,
    AbsoluteLong,
    AbsoluteLongX,
    DirectIndirectLong,
    DirectIndirectLongY,
    StackRelative,
    StackRelativeY,
    BlockMove,
    Direct,
    Extended,
    IndexedX,
    IndexedY,
    DirectImmediate,
    DirectRelative,
    DirectDirect,
    ImmediateRelative,
    IndirectAbsX,
    IndirectLong,
    Displacement,
    DisplacementImmediate,
    Bytes,
}

impl AddrMode {
    /// Does this mode name a concrete memory address at decode time?
    ///
    /// Immediate, implied and register-indirect modes do not; neither do
    /// the 65816 long modes, whose bank-qualified addresses do not fit the
    /// 16-bit target field of the wire contract.
    pub fn yields_target_addr(self) -> bool {
        matches!(
            self,
            AddrMode::ZeroPage
                | AddrMode::ZeroPageX
                | AddrMode::ZeroPageY
                | AddrMode::Absolute
                | AddrMode::AbsoluteX
                | AddrMode::AbsoluteY
                | AddrMode::Relative
                | AddrMode::RelativeLong
                | AddrMode::Direct
                | AddrMode::Extended
                | AddrMode::DirectImmediate
                | AddrMode::DirectRelative
                | AddrMode::ImmediateRelative
        )
    }
}

/// A single instruction table entry.
///
/// The mnemonic may contain a `{}` slot marking where the rendered operand
/// belongs ("LD ({}),A"); without one, the operand is appended after a
/// space. The length is the total instruction size including any prefix
/// byte. The base flag holds a result code only (never modifier bits);
/// modifiers are composed later by the flag resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub mnemonic: String,
    pub mode: AddrMode,
    pub len: u8,
    pub flag: FlagResult,
    illegal: bool,
}

impl Entry {
    pub fn new(mnemonic: &str, mode: AddrMode, len: u8, flag: FlagResult) -> Self {
        Entry {
            mnemonic: mnemonic.to_string(),
            mode,
            len,
            flag,
            illegal: false,
        }
    }

    /// The sentinel filling undefined opcode slots: one raw byte, no
    /// effect, rendered as a `.byte` directive.
    pub fn illegal() -> Self {
        Entry {
            mnemonic: ".byte".to_string(),
            mode: AddrMode::Bytes,
            len: 1,
            flag: FlagResult::None,
            illegal: true,
        }
    }

    /// The sentinel for undefined slots in a prefixed secondary table,
    /// which must still consume the prefix byte plus one more.
    pub fn illegal_prefixed() -> Self {
        Entry {
            mnemonic: ".byte".to_string(),
            mode: AddrMode::Bytes,
            len: 2,
            flag: FlagResult::None,
            illegal: true,
        }
    }

    pub fn is_illegal(&self) -> bool {
        self.illegal
    }
}

/// A complete decode table for one architecture: a primary 256-entry
/// array, plus secondary arrays for any prefix bytes.
pub struct Table {
    endian: Endian,
    primary: Box<[Entry; 256]>,
    prefixed: Vec<(u8, Box<[Entry; 256]>)>,
}

/// A fresh 256-entry array with every slot set to the illegal sentinel.
pub fn filled() -> Box<[Entry; 256]> {
    Box::new(std::array::from_fn(|_| Entry::illegal()))
}

/// Like [`filled`], but for a prefixed secondary table: sentinels consume
/// the prefix byte as well.
pub fn filled_prefixed() -> Box<[Entry; 256]> {
    Box::new(std::array::from_fn(|_| Entry::illegal_prefixed()))
}

impl Table {
    pub fn new(endian: Endian, primary: Box<[Entry; 256]>) -> Self {
        Table {
            endian,
            primary,
            prefixed: Vec::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: u8, table: Box<[Entry; 256]>) -> Self {
        self.prefixed.push((prefix, table));
        self
    }

    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Match the entry at the head of `bytes`, returning it along with the
    /// number of opcode bytes consumed (1, or 2 when a prefix matched).
    ///
    /// Returns `None` only when `bytes` starts with a prefix byte and the
    /// byte after it is missing; the caller reports that as a truncated
    /// instruction. An empty slice is a caller bug and also yields `None`.
    pub fn lookup(&self, bytes: &[u8]) -> Option<(&Entry, u8)> {
        let first = *bytes.first()?;

        for (prefix, table) in &self.prefixed {
            if *prefix == first {
                let second = *bytes.get(1)?;
                return Some((&table[second as usize], 2));
            }
        }

        Some((&self.primary[first as usize], 1))
    }

    /// Direct slot access for table sanity tests.
    #[cfg(test)]
    pub fn primary_entry(&self, opcode: u8) -> &Entry {
        &self.primary[opcode as usize]
    }
}

/// Render the operand of a matched entry.
///
/// `operand` holds exactly the operand bytes (header excluded), `pc` is
/// the address of the instruction and `len` its total length, needed for
/// relative-target arithmetic. Returns the operand text and the concrete
/// target address when the mode yields one.
pub fn render_operand(
    mode: AddrMode,
    operand: &[u8],
    pc: u16,
    len: u8,
    endian: Endian,
) -> (String, Option<u16>) {
    let word = |bytes: &[u8]| -> u16 {
        match endian {
            Endian::Little => u16::from(bytes[0]) | (u16::from(bytes[1]) << 8),
            Endian::Big => (u16::from(bytes[0]) << 8) | u16::from(bytes[1]),
        }
    };
    let next = pc.wrapping_add(u16::from(len));

    match mode {
        AddrMode::Implied => (String::new(), None),
        AddrMode::Accumulator => ("A".to_string(), None),
        AddrMode::Immediate => (format!("#${:02x}", operand[0]), None),
        AddrMode::ImmediateWord => (format!("#${:04x}", word(operand)), None),
        AddrMode::ZeroPage => (format!("${:02x}", operand[0]), Some(u16::from(operand[0]))),
        AddrMode::ZeroPageX => (
            format!("${:02x},X", operand[0]),
            Some(u16::from(operand[0])),
        ),
        AddrMode::ZeroPageY => (
            format!("${:02x},Y", operand[0]),
            Some(u16::from(operand[0])),
        ),
        AddrMode::ZeroPageIndirect => (format!("(${:02x})", operand[0]), None),
        AddrMode::Absolute => (format!("${:04x}", word(operand)), Some(word(operand))),
        AddrMode::AbsoluteX => (format!("${:04x},X", word(operand)), Some(word(operand))),
        AddrMode::AbsoluteY => (format!("${:04x},Y", word(operand)), Some(word(operand))),
        AddrMode::Indirect => (format!("(${:04x})", word(operand)), None),
        AddrMode::IndirectX => (format!("(${:02x},X)", operand[0]), None),
        AddrMode::IndirectY => (format!("(${:02x}),Y", operand[0]), None),
        AddrMode::Relative => {
            let target = next.wrapping_add(i16::from(operand[0] as i8) as u16);
            (format!("${:04x}", target), Some(target))
        }
        AddrMode::RelativeLong => {
            let target = next.wrapping_add(word(operand));
            (format!("${:04x}", target), Some(target))
        }
        AddrMode::AbsoluteLong => (
            format!(
                "${:02x}{:04x}",
                operand[2],
                u16::from(operand[0]) | (u16::from(operand[1]) << 8)
            ),
            None,
        ),
        AddrMode::AbsoluteLongX => (
            format!(
                "${:02x}{:04x},X",
                operand[2],
                u16::from(operand[0]) | (u16::from(operand[1]) << 8)
            ),
            None,
        ),
        AddrMode::DirectIndirectLong => (format!("[${:02x}]", operand[0]), None),
        AddrMode::DirectIndirectLongY => (format!("[${:02x}],Y", operand[0]), None),
        AddrMode::StackRelative => (format!("${:02x},S", operand[0]), None),
        AddrMode::StackRelativeY => (format!("(${:02x},S),Y", operand[0]), None),
        AddrMode::BlockMove => (format!("#${:02x},#${:02x}", operand[1], operand[0]), None),
        AddrMode::Direct => (format!("${:02x}", operand[0]), Some(u16::from(operand[0]))),
        AddrMode::Extended => (format!("${:04x}", word(operand)), Some(word(operand))),
        AddrMode::IndexedX => (format!("${:02x},X", operand[0]), None),
        AddrMode::IndexedY => (format!("${:02x},Y", operand[0]), None),
        AddrMode::DirectImmediate => (
            format!("${:02x},#${:02x}", operand[0], operand[1]),
            Some(u16::from(operand[0])),
        ),
        AddrMode::DirectRelative => {
            let target = next.wrapping_add(i16::from(operand[1] as i8) as u16);
            (
                format!("${:02x},${:04x}", operand[0], target),
                Some(target),
            )
        }
        // Destination is encoded second but written first.
        AddrMode::DirectDirect => (
            format!("${:02x},${:02x}", operand[1], operand[0]),
            None,
        ),
        AddrMode::ImmediateRelative => {
            let target = next.wrapping_add(i16::from(operand[1] as i8) as u16);
            (
                format!("#${:02x},${:04x}", operand[0], target),
                Some(target),
            )
        }
        AddrMode::IndirectAbsX => (format!("(${:04x},X)", word(operand)), None),
        AddrMode::IndirectLong => (format!("[${:04x}]", word(operand)), None),
        AddrMode::Displacement => (format!("+${:02x}", operand[0]), None),
        // Completes the index-register parenthesis left open in the
        // mnemonic ("LD (IX{}" plus "+$12),#$34").
        AddrMode::DisplacementImmediate => (
            format!("+${:02x}),#${:02x}", operand[0], operand[1]),
            None,
        ),
        AddrMode::Bytes => {
            let text = operand
                .iter()
                .map(|b| format!("${:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");
            (text, None)
        }
    }
}
