//! Decode-and-annotate engine and execution-history classification.

mod disasm;
mod error;
mod flags;
mod record;
mod timeline;

pub use disasm::{decode, disassemble_data, DecodedInstruction, Disassembly};
pub use error::{Error, Result};
pub use flags::{
    resolve, FlagResult, SemanticFlag, FLAG_REG_SR, FLAG_RESULT_MASK, FLAG_TARGET_ADDR,
};
pub use record::{classify_event, RecordType, Region, RegionMap};
pub use timeline::{
    Anomaly, Merger, PairKind, Registers, Timeline, TimelineRecord, TraceEvent,
};

#[cfg(test)]
mod tests;
