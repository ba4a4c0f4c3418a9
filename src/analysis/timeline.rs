//! Execution-history merging.
//!
//! Emulator cores emit a flat stream of trace events. The merger folds
//! that stream into an append-only timeline, pairing each step event
//! with its result, tracking frame numbers, and (when given a static
//! image) resolving step addresses to decoded instruction text.
//!
//! Malformed streams never abort a session: a step that arrives while
//! the previous one of its kind is still open force-closes it, and a
//! result with no open step is kept but annotated. Both recoveries are
//! recorded on the affected timeline entries so a consumer can surface
//! them.

use crate::analysis::{classify_event, decode, Error, RecordType, Result, SemanticFlag};
use crate::arch::ArchName;
use crate::memory::Image;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// A CPU register snapshot carried on step events.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub sp: u8,
    pub sr: u8,
}

/// One event from an emulator trace stream.
///
/// The serialized form is one JSON object per event, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TraceEvent {
    /// A CPU instruction is about to execute.
    CpuStep {
        pc: u16,
        #[serde(default)]
        registers: Option<Registers>,
    },
    /// The observed outcome of the last CPU step, as a wire flag byte.
    CpuStepResult {
        #[serde(default)]
        flag: u8,
    },
    /// A non-CPU platform device stepped (ANTIC, POKEY and friends).
    PlatformStep { pc: u16 },
    PlatformStepResult,
    /// The emulator announces the next instruction it will fetch.
    NextInstruction { pc: u16 },
    NextInstructionResult,
    FrameStart { frame: u32 },
    FrameEnd,
    VbiStart,
    VbiEnd,
    DliStart,
    DliEnd,
    Breakpoint { id: u8, pc: u16 },
    UserDefined { tag: u8, payload: Vec<u8> },
}

impl TraceEvent {
    /// The program counter carried by this event, if any.
    pub fn pc(&self) -> Option<u16> {
        match self {
            TraceEvent::CpuStep { pc, .. }
            | TraceEvent::PlatformStep { pc }
            | TraceEvent::NextInstruction { pc }
            | TraceEvent::Breakpoint { pc, .. } => Some(*pc),
            _ => None,
        }
    }
}

/// The three paired record kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PairKind {
    Cpu,
    Platform,
    NextInstruction,
}

impl PairKind {
    fn index(self) -> usize {
        match self {
            PairKind::Cpu => 0,
            PairKind::Platform => 1,
            PairKind::NextInstruction => 2,
        }
    }

    /// The pair kind a record type participates in.
    pub fn of(record: RecordType) -> Option<(PairKind, bool)> {
        match record {
            RecordType::CpuStep => Some((PairKind::Cpu, false)),
            RecordType::CpuStepResult => Some((PairKind::Cpu, true)),
            RecordType::PlatformStep => Some((PairKind::Platform, false)),
            RecordType::PlatformStepResult => Some((PairKind::Platform, true)),
            RecordType::NextInstruction => Some((PairKind::NextInstruction, false)),
            RecordType::NextInstructionResult => Some((PairKind::NextInstruction, true)),
            _ => None,
        }
    }
}

/// A pairing irregularity recovered from and recorded in place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Anomaly {
    /// This step was still open when the next step of its kind arrived.
    ForcedClose(PairKind),
    /// This result arrived with no open step to close.
    UnpairedResult(PairKind),
}

/// One merged timeline entry.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimelineRecord {
    /// Position in the timeline, dense from zero.
    pub step: usize,
    pub record: RecordType,
    pub pc: Option<u16>,
    /// Frame this entry fell inside, when frame markers have been seen.
    pub frame: Option<u32>,
    /// Resolved instruction text, when the merger has a static image.
    pub text: Option<String>,
    /// Semantic flag: resolved statically for steps, or carried by the
    /// result event itself.
    pub flag: Option<SemanticFlag>,
    pub anomaly: Option<Anomaly>,
    pub event: TraceEvent,
}

impl TimelineRecord {
    /// The register snapshot carried by the underlying event, if any.
    pub fn registers(&self) -> Option<Registers> {
        match &self.event {
            TraceEvent::CpuStep { registers, .. } => *registers,
            _ => None,
        }
    }
}

/// An append-only sequence of merged records.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    records: Vec<TimelineRecord>,
}

impl Timeline {
    pub fn new() -> Self {
        Timeline::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, step: usize) -> Option<&TimelineRecord> {
        self.records.get(step)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TimelineRecord> {
        self.records.iter()
    }

    /// All entries whose program counter equals `address`, in order.
    pub fn at_address(&self, address: u16) -> impl Iterator<Item = &TimelineRecord> {
        self.in_range(address..=address)
    }

    /// All entries whose program counter falls inside `range`, in order.
    /// Entries with no program counter (frame markers and the like) never
    /// match.
    pub fn in_range(&self, range: RangeInclusive<u16>) -> impl Iterator<Item = &TimelineRecord> {
        self.records
            .iter()
            .filter(move |r| r.pc.map_or(false, |pc| range.contains(&pc)))
    }

    /// All entries flagged with a pairing anomaly.
    pub fn anomalies(&self) -> impl Iterator<Item = &TimelineRecord> {
        self.records.iter().filter(|r| r.anomaly.is_some())
    }

    /// Discard every entry. Session restart; step numbering begins again
    /// at zero.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    fn push(&mut self, mut record: TimelineRecord) -> usize {
        let step = self.records.len();

        record.step = step;
        self.records.push(record);
        step
    }
}

/// Folds trace events into a timeline.
pub struct Merger {
    timeline: Timeline,
    /// Step index of the open entry for each pair kind.
    open: [Option<usize>; 3],
    frame: Option<u32>,
    context: Option<(Image, ArchName)>,
}

impl Merger {
    pub fn new() -> Self {
        Merger {
            timeline: Timeline::new(),
            open: [None; 3],
            frame: None,
            context: None,
        }
    }

    /// A merger that resolves step addresses against a static image.
    pub fn with_image(image: Image, arch: ArchName) -> Self {
        let mut merger = Merger::new();

        merger.context = Some((image, arch));
        merger
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn into_timeline(self) -> Timeline {
        self.timeline
    }

    /// Restart the session: drop all merged records and pairing state.
    pub fn clear(&mut self) {
        self.timeline.clear();
        self.open = [None; 3];
        self.frame = None;
    }

    /// Merge one event, recovering from pairing irregularities in place.
    pub fn push(&mut self, event: TraceEvent) {
        let _ = self.merge(event);
    }

    /// Merge one event, reporting pairing irregularities as errors.
    ///
    /// The event is merged either way; strict callers just get told.
    pub fn push_strict(&mut self, event: TraceEvent) -> Result<()> {
        self.merge(event).map(|_| ())
    }

    fn merge(&mut self, event: TraceEvent) -> Result<usize> {
        let record = classify_event(&event);
        let mut anomaly = None;
        let mut violation = None;

        if let Some((kind, is_result)) = PairKind::of(record) {
            let slot = kind.index();

            if is_result {
                if self.open[slot].take().is_none() {
                    anomaly = Some(Anomaly::UnpairedResult(kind));
                    violation = Some(Error::UnpairedHistoryRecord(kind));
                }
            } else {
                if let Some(open_step) = self.open[slot] {
                    // The previous step never got its result; close it
                    // where it stands.
                    self.timeline.records[open_step].anomaly =
                        Some(Anomaly::ForcedClose(kind));
                    violation = Some(Error::UnpairedHistoryRecord(kind));
                }

                self.open[slot] = Some(self.timeline.len());
            }
        }

        if let TraceEvent::FrameStart { frame } = &event {
            self.frame = Some(*frame);
        }

        let (text, flag) = self.annotate(&event, record);
        let step = self.timeline.push(TimelineRecord {
            step: 0,
            record,
            pc: event.pc(),
            frame: self.frame,
            text,
            flag,
            anomaly,
            event,
        });

        match violation {
            Some(e) => Err(e),
            None => Ok(step),
        }
    }

    /// Static annotations for one event: resolved instruction text for
    /// steps when an image is available, and the flag byte carried by
    /// result events.
    fn annotate(
        &self,
        event: &TraceEvent,
        record: RecordType,
    ) -> (Option<String>, Option<SemanticFlag>) {
        if let TraceEvent::CpuStepResult { flag } = event {
            return (None, Some(SemanticFlag::from_wire(*flag)));
        }

        let pc = match record {
            RecordType::CpuStep | RecordType::NextInstruction => match event.pc() {
                Some(pc) => pc,
                None => return (None, None),
            },
            _ => return (None, None),
        };

        if let Some((image, arch)) = &self.context {
            if let Some(offset) = image.offset_of(pc) {
                if let Ok(instruction) = decode(image, offset, *arch) {
                    return (Some(instruction.text), Some(instruction.flag));
                }
            }
        }

        (None, None)
    }
}

impl Default for Merger {
    fn default() -> Self {
        Merger::new()
    }
}
