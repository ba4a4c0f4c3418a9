//! Error type for the decode and history engines.

use crate::analysis::PairKind;
use std::result;
use thiserror::Error;

/// Engine errors.
///
/// Nothing here is fatal to a session: every variant is local to one
/// record and recoverable by the caller (stop decoding at the reported
/// address, or accept the force-closed pair and continue).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The matched table entry declares more operand bytes than remain in
    /// the buffer. Static decoding must stop at this address and treat
    /// the tail as data.
    #[error("truncated operand at ${address:04x}: need {needed} bytes, {available} remain")]
    TruncatedOperand {
        address: u16,
        needed: usize,
        available: usize,
    },

    /// Decode was requested at an offset past the end of the buffer.
    #[error("decode offset {offset} out of bounds (image is {len} bytes)")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// A history result record arrived with no matching open entry, or a
    /// new entry of a pair kind arrived before the previous one closed.
    /// The merger recovers by force-closing and annotating; this error is
    /// only surfaced when a caller asks for strict validation.
    #[error("unpaired {0:?} history record")]
    UnpairedHistoryRecord(PairKind),
}

pub type Result<T> = result::Result<T, Error>;
