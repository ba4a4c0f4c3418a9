//! The numeric record-type contract and address-region classification.

use crate::analysis::TraceEvent;
use crate::arch::ArchName;
use serde::Serialize;
use std::{fmt, str};

/// Every record type the engine emits, with its fixed wire value.
///
/// Values below 128 identify static records by their source
/// architecture (or plain data); 128-133 are the paired history
/// records; 192-197 are the frame/interrupt markers; the high values
/// are breakpoints, user-defined payloads and the unknown fallback.
/// Shared with the consuming UI layer, so no value may change.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum RecordType {
    Data = 0,
    Mos6502 = 10,
    Mos6502Undoc = 11,
    Wdc65816 = 12,
    Wdc65C02 = 13,
    M6800 = 14,
    M6809 = 15,
    M6811 = 16,
    I8051 = 17,
    I8080 = 18,
    Z80 = 19,
    AnticDl = 30,
    JumpmanHarvest = 31,
    JumpmanLevel = 32,
    CpuStep = 128,
    CpuStepResult = 129,
    PlatformStep = 130,
    PlatformStepResult = 131,
    NextInstruction = 132,
    NextInstructionResult = 133,
    FrameStart = 192,
    FrameEnd = 193,
    VbiStart = 194,
    VbiEnd = 195,
    DliStart = 196,
    DliEnd = 197,
    Breakpoint = 253,
    UserDefined = 254,
    Unknown = 255,
}

impl RecordType {
    /// Decode a wire byte. Total: anything outside the contract is
    /// `Unknown`, because foreign history streams must always classify.
    pub fn from_wire(val: u8) -> RecordType {
        match val {
            0 => RecordType::Data,
            10 => RecordType::Mos6502,
            11 => RecordType::Mos6502Undoc,
            12 => RecordType::Wdc65816,
            13 => RecordType::Wdc65C02,
            14 => RecordType::M6800,
            15 => RecordType::M6809,
            16 => RecordType::M6811,
            17 => RecordType::I8051,
            18 => RecordType::I8080,
            19 => RecordType::Z80,
            30 => RecordType::AnticDl,
            31 => RecordType::JumpmanHarvest,
            32 => RecordType::JumpmanLevel,
            128 => RecordType::CpuStep,
            129 => RecordType::CpuStepResult,
            130 => RecordType::PlatformStep,
            131 => RecordType::PlatformStepResult,
            132 => RecordType::NextInstruction,
            133 => RecordType::NextInstructionResult,
            192 => RecordType::FrameStart,
            193 => RecordType::FrameEnd,
            194 => RecordType::VbiStart,
            195 => RecordType::VbiEnd,
            196 => RecordType::DliStart,
            197 => RecordType::DliEnd,
            253 => RecordType::Breakpoint,
            254 => RecordType::UserDefined,
            _ => RecordType::Unknown,
        }
    }

    pub fn to_wire(self) -> u8 {
        self as u8
    }

    /// The record type a static decode under `arch` produces.
    pub fn for_arch(arch: ArchName) -> RecordType {
        match arch {
            ArchName::Mos6502 => RecordType::Mos6502,
            ArchName::Mos6502Undoc => RecordType::Mos6502Undoc,
            ArchName::Wdc65816 => RecordType::Wdc65816,
            ArchName::Wdc65C02 => RecordType::Wdc65C02,
            ArchName::M6800 => RecordType::M6800,
            ArchName::M6809 => RecordType::M6809,
            ArchName::M6811 => RecordType::M6811,
            ArchName::I8051 => RecordType::I8051,
            ArchName::I8080 => RecordType::I8080,
            ArchName::Z80 => RecordType::Z80,
            ArchName::AnticDl => RecordType::AnticDl,
            ArchName::JumpmanHarvest => RecordType::JumpmanHarvest,
            ArchName::JumpmanLevel => RecordType::JumpmanLevel,
        }
    }

    /// The architecture behind a static record type, if it has one.
    pub fn arch(self) -> Option<ArchName> {
        match self {
            RecordType::Mos6502 => Some(ArchName::Mos6502),
            RecordType::Mos6502Undoc => Some(ArchName::Mos6502Undoc),
            RecordType::Wdc65816 => Some(ArchName::Wdc65816),
            RecordType::Wdc65C02 => Some(ArchName::Wdc65C02),
            RecordType::M6800 => Some(ArchName::M6800),
            RecordType::M6809 => Some(ArchName::M6809),
            RecordType::M6811 => Some(ArchName::M6811),
            RecordType::I8051 => Some(ArchName::I8051),
            RecordType::I8080 => Some(ArchName::I8080),
            RecordType::Z80 => Some(ArchName::Z80),
            RecordType::AnticDl => Some(ArchName::AnticDl),
            RecordType::JumpmanHarvest => Some(ArchName::JumpmanHarvest),
            RecordType::JumpmanLevel => Some(ArchName::JumpmanLevel),
            _ => None,
        }
    }

    /// Is this one of the execution-history record types?
    pub fn is_history(self) -> bool {
        self.to_wire() >= 128
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(arch) = self.arch() {
            return write!(f, "{}", arch);
        }

        match self {
            RecordType::Data => write!(f, "data"),
            RecordType::CpuStep => write!(f, "cpu-step"),
            RecordType::CpuStepResult => write!(f, "cpu-step-result"),
            RecordType::PlatformStep => write!(f, "platform-step"),
            RecordType::PlatformStepResult => write!(f, "platform-step-result"),
            RecordType::NextInstruction => write!(f, "next-instruction"),
            RecordType::NextInstructionResult => write!(f, "next-instruction-result"),
            RecordType::FrameStart => write!(f, "frame-start"),
            RecordType::FrameEnd => write!(f, "frame-end"),
            RecordType::VbiStart => write!(f, "vbi-start"),
            RecordType::VbiEnd => write!(f, "vbi-end"),
            RecordType::DliStart => write!(f, "dli-start"),
            RecordType::DliEnd => write!(f, "dli-end"),
            RecordType::Breakpoint => write!(f, "breakpoint"),
            RecordType::UserDefined => write!(f, "user-defined"),
            RecordType::Unknown => write!(f, "unknown"),
            _ => unreachable!(),
        }
    }
}

impl str::FromStr for RecordType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(arch) = s.parse::<ArchName>() {
            return Ok(RecordType::for_arch(arch));
        }

        match s {
            "data" => Ok(RecordType::Data),
            "cpu-step" => Ok(RecordType::CpuStep),
            "cpu-step-result" => Ok(RecordType::CpuStepResult),
            "platform-step" => Ok(RecordType::PlatformStep),
            "platform-step-result" => Ok(RecordType::PlatformStepResult),
            "next-instruction" => Ok(RecordType::NextInstruction),
            "next-instruction-result" => Ok(RecordType::NextInstructionResult),
            "frame-start" => Ok(RecordType::FrameStart),
            "frame-end" => Ok(RecordType::FrameEnd),
            "vbi-start" => Ok(RecordType::VbiStart),
            "vbi-end" => Ok(RecordType::VbiEnd),
            "dli-start" => Ok(RecordType::DliStart),
            "dli-end" => Ok(RecordType::DliEnd),
            "breakpoint" => Ok(RecordType::Breakpoint),
            "user-defined" => Ok(RecordType::UserDefined),
            "unknown" => Ok(RecordType::Unknown),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(RecordType, "valid record type name");
derive_serialize_from_display!(RecordType);

/// Classify one trace event as its record type.
pub fn classify_event(event: &TraceEvent) -> RecordType {
    match event {
        TraceEvent::CpuStep { .. } => RecordType::CpuStep,
        TraceEvent::CpuStepResult { .. } => RecordType::CpuStepResult,
        TraceEvent::PlatformStep { .. } => RecordType::PlatformStep,
        TraceEvent::PlatformStepResult => RecordType::PlatformStepResult,
        TraceEvent::NextInstruction { .. } => RecordType::NextInstruction,
        TraceEvent::NextInstructionResult => RecordType::NextInstructionResult,
        TraceEvent::FrameStart { .. } => RecordType::FrameStart,
        TraceEvent::FrameEnd => RecordType::FrameEnd,
        TraceEvent::VbiStart => RecordType::VbiStart,
        TraceEvent::VbiEnd => RecordType::VbiEnd,
        TraceEvent::DliStart => RecordType::DliStart,
        TraceEvent::DliEnd => RecordType::DliEnd,
        TraceEvent::Breakpoint { .. } => RecordType::Breakpoint,
        TraceEvent::UserDefined { .. } => RecordType::UserDefined,
    }
}

/// An address range mapped to one record type.
///
/// The range is inclusive on both ends so a region can cover `$ffff`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Deserialize, Serialize)]
pub struct Region {
    pub start: u16,
    pub end: u16,
    pub record: RecordType,
}

impl Region {
    pub fn contains(&self, address: u16) -> bool {
        self.start <= address && address <= self.end
    }
}

/// An ordered set of regions; earlier regions win on overlap.
#[derive(Clone, Debug, Default)]
pub struct RegionMap {
    regions: Vec<Region>,
}

impl RegionMap {
    pub fn new() -> Self {
        RegionMap::default()
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// The record type covering `address`, `Unknown` when nothing does.
    pub fn classify(&self, address: u16) -> RecordType {
        self.regions
            .iter()
            .find(|r| r.contains(address))
            .map(|r| r.record)
            .unwrap_or(RecordType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_fixed() {
        assert_eq!(RecordType::Data.to_wire(), 0);
        assert_eq!(RecordType::Mos6502.to_wire(), 10);
        assert_eq!(RecordType::Z80.to_wire(), 19);
        assert_eq!(RecordType::AnticDl.to_wire(), 30);
        assert_eq!(RecordType::NextInstruction.to_wire(), 132);
        assert_eq!(RecordType::VbiStart.to_wire(), 194);
        assert_eq!(RecordType::Breakpoint.to_wire(), 253);
    }

    #[test]
    fn from_wire_is_total() {
        for val in 0..=255u8 {
            let record = RecordType::from_wire(val);

            if record != RecordType::Unknown {
                assert_eq!(record.to_wire(), val);
            }
        }

        assert_eq!(RecordType::from_wire(99), RecordType::Unknown);
    }

    #[test]
    fn region_lookup_falls_back_to_unknown() {
        let mut map = RegionMap::new();
        map.push(Region {
            start: 0x6000,
            end: 0x6fff,
            record: RecordType::Mos6502,
        });
        map.push(Region {
            start: 0x7000,
            end: 0x70ff,
            record: RecordType::AnticDl,
        });

        assert_eq!(map.classify(0x6800), RecordType::Mos6502);
        assert_eq!(map.classify(0x7000), RecordType::AnticDl);
        assert_eq!(map.classify(0x0000), RecordType::Unknown);
    }

    #[test]
    fn overlapping_regions_prefer_the_first() {
        let mut map = RegionMap::new();
        map.push(Region {
            start: 0x6000,
            end: 0x6fff,
            record: RecordType::Data,
        });
        map.push(Region {
            start: 0x6000,
            end: 0xffff,
            record: RecordType::Mos6502,
        });

        assert_eq!(map.classify(0x6000), RecordType::Data);
        assert_eq!(map.classify(0x7000), RecordType::Mos6502);
    }

    #[test]
    fn record_names_round_trip() {
        for record in &[
            RecordType::Data,
            RecordType::Mos6502,
            RecordType::CpuStepResult,
            RecordType::FrameStart,
            RecordType::Unknown,
        ] {
            let parsed: RecordType = record.to_string().parse().unwrap();

            assert_eq!(parsed, *record);
        }
    }
}
