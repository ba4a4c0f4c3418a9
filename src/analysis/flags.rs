//! Semantic effect flags attached to decoded instructions.
//!
//! The flag byte doubles as a cross-language wire contract shared with the
//! UI layer that renders disassembly and history views, so every value here
//! is fixed and must not be renumbered.

use crate::arch::{AddrMode, Entry};
use serde::Serialize;
use std::fmt;

/// Modifier bit set when the addressing mode yields a concrete target
/// address at decode time.
pub const FLAG_TARGET_ADDR: u8 = 64;

/// Modifier bit set when the instruction involves the status register.
pub const FLAG_REG_SR: u8 = 128;

/// Mask extracting the result code from a flag byte.
pub const FLAG_RESULT_MASK: u8 = 0x3f;

/// The low six bits of a semantic flag: what the instruction does.
///
/// Closed enumeration; the backing values are the wire contract.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum FlagResult {
    None = 0,
    BranchTaken = 1,
    BranchNotTaken = 2,
    RepeatedBytes = 3,
    RegA = 4,
    RegX = 5,
    RegY = 6,
    LoadAFromMemory = 7,
    LoadXFromMemory = 8,
    LoadYFromMemory = 9,
    MemoryAlter = 10,
    MemoryReadAlterA = 11,
    PeekMemory = 12,
    PullA = 13,
    PullSr = 14,
    PushA = 15,
    PushSr = 16,
    Rti = 17,
    Rts = 18,
    StoreAInMemory = 19,
    StoreXInMemory = 20,
    StoreYInMemory = 21,
    JmpIndirect = 22,
}

impl FlagResult {
    /// Decode a result code from its wire value.
    ///
    /// Only the low six bits are considered. Returns `None` (the Rust
    /// `Option`, not `FlagResult::None`) for values outside the contract.
    pub fn from_wire(val: u8) -> Option<FlagResult> {
        match val & FLAG_RESULT_MASK {
            0 => Some(FlagResult::None),
            1 => Some(FlagResult::BranchTaken),
            2 => Some(FlagResult::BranchNotTaken),
            3 => Some(FlagResult::RepeatedBytes),
            4 => Some(FlagResult::RegA),
            5 => Some(FlagResult::RegX),
            6 => Some(FlagResult::RegY),
            7 => Some(FlagResult::LoadAFromMemory),
            8 => Some(FlagResult::LoadXFromMemory),
            9 => Some(FlagResult::LoadYFromMemory),
            10 => Some(FlagResult::MemoryAlter),
            11 => Some(FlagResult::MemoryReadAlterA),
            12 => Some(FlagResult::PeekMemory),
            13 => Some(FlagResult::PullA),
            14 => Some(FlagResult::PullSr),
            15 => Some(FlagResult::PushA),
            16 => Some(FlagResult::PushSr),
            17 => Some(FlagResult::Rti),
            18 => Some(FlagResult::Rts),
            19 => Some(FlagResult::StoreAInMemory),
            20 => Some(FlagResult::StoreXInMemory),
            21 => Some(FlagResult::StoreYInMemory),
            22 => Some(FlagResult::JmpIndirect),
            _ => None,
        }
    }

    /// Does this result involve the status register?
    pub fn involves_sr(self) -> bool {
        matches!(self, FlagResult::PullSr | FlagResult::PushSr | FlagResult::Rti)
    }
}

/// A composed semantic flag: result code plus modifier bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SemanticFlag(u8);

impl SemanticFlag {
    pub fn new(result: FlagResult) -> Self {
        SemanticFlag(result as u8)
    }

    /// Reconstitute a flag from its wire byte. Undefined result codes are
    /// collapsed to `FlagResult::None` with the modifier bits kept, since
    /// history streams from foreign emulator cores must never fail to
    /// classify.
    pub fn from_wire(bits: u8) -> Self {
        let result = FlagResult::from_wire(bits).unwrap_or(FlagResult::None) as u8;

        SemanticFlag(result | (bits & !FLAG_RESULT_MASK))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn result(self) -> FlagResult {
        // Masked construction is enforced everywhere a flag is built, so
        // the low bits are always a defined code.
        FlagResult::from_wire(self.0).unwrap_or(FlagResult::None)
    }

    pub fn has_target_addr(self) -> bool {
        self.0 & FLAG_TARGET_ADDR != 0
    }

    pub fn involves_status(self) -> bool {
        self.0 & FLAG_REG_SR != 0
    }

    pub fn with_target_addr(self) -> Self {
        SemanticFlag(self.0 | FLAG_TARGET_ADDR)
    }

    pub fn with_status(self) -> Self {
        SemanticFlag(self.0 | FLAG_REG_SR)
    }
}

impl fmt::Display for SemanticFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.result())?;

        if self.has_target_addr() {
            write!(f, "+TARGET")?;
        }

        if self.involves_status() {
            write!(f, "+SR")?;
        }

        Ok(())
    }
}

/// Compute the final semantic flag for a matched table entry.
///
/// The entry's base flag is trusted only as far as the addressing mode
/// agrees with it: a load that turns out to be immediate touches the
/// register but no memory, so the result code is recomputed from the mode
/// rather than taken verbatim. Modifier bits are then OR'd on top:
/// target-address-present for modes that name a concrete location, and
/// status-register for push/pull-SR and RTI.
pub fn resolve(entry: &Entry, mode: AddrMode) -> SemanticFlag {
    use FlagResult::*;

    let base = entry.flag;

    let result = if mode == AddrMode::Immediate || mode == AddrMode::ImmediateWord {
        match base {
            LoadAFromMemory => RegA,
            LoadXFromMemory => RegX,
            LoadYFromMemory => RegY,
            other => other,
        }
    } else {
        base
    };

    let mut flag = SemanticFlag::new(result);

    if mode.yields_target_addr() {
        flag = flag.with_target_addr();
    }

    if result.involves_sr() {
        flag = flag.with_status();
    }

    flag
}
