//! Engine-level tests: decode output, flag composition, and history
//! merging.

use crate::analysis::{
    decode, disassemble_data, Anomaly, Disassembly, Error, FlagResult, Merger, PairKind,
    RecordType, SemanticFlag, TraceEvent, FLAG_REG_SR, FLAG_RESULT_MASK, FLAG_TARGET_ADDR,
};
use crate::arch::ArchName;
use crate::memory::Image;

#[test]
fn lda_immediate_renders_and_flags() {
    let image = Image::new(vec![0xa9, 0x42], 0x6000);
    let instruction = decode(&image, 0, ArchName::Mos6502).unwrap();

    assert_eq!(instruction.text, "LDA #$42");
    assert_eq!(instruction.len, 2);
    assert_eq!(instruction.address, 0x6000);
    assert_eq!(instruction.flag.result(), FlagResult::RegA);
    assert!(!instruction.flag.has_target_addr());
    assert_eq!(instruction.record, RecordType::Mos6502);
}

#[test]
fn lda_absolute_carries_its_target() {
    let image = Image::new(vec![0xad, 0x34, 0x12], 0x6000);
    let instruction = decode(&image, 0, ArchName::Mos6502).unwrap();

    assert_eq!(instruction.text, "LDA $1234");
    assert_eq!(instruction.flag.result(), FlagResult::LoadAFromMemory);
    assert!(instruction.flag.has_target_addr());
    assert_eq!(instruction.target, Some(0x1234));
}

#[test]
fn branch_target_is_relative_to_the_next_instruction() {
    // BNE +4 at $6000: target is $6002 + 4.
    let image = Image::new(vec![0xd0, 0x04], 0x6000);
    let instruction = decode(&image, 0, ArchName::Mos6502).unwrap();

    assert_eq!(instruction.text, "BNE $6006");
    assert_eq!(instruction.target, Some(0x6006));
    assert_eq!(instruction.flag.result(), FlagResult::BranchTaken);
}

#[test]
fn status_register_ops_set_the_modifier() {
    let image = Image::new(vec![0x08], 0x6000);
    let instruction = decode(&image, 0, ArchName::Mos6502).unwrap();

    assert_eq!(instruction.text, "PHP");
    assert_eq!(instruction.flag.result(), FlagResult::PushSr);
    assert!(instruction.flag.involves_status());
}

#[test]
fn undefined_opcode_decodes_as_raw_bytes() {
    let image = Image::new(vec![0x02, 0xea], 0x6000);
    let instruction = decode(&image, 0, ArchName::Mos6502).unwrap();

    assert_eq!(instruction.text, ".byte $02");
    assert_eq!(instruction.len, 1);
    assert_eq!(instruction.flag.result(), FlagResult::None);
}

#[test]
fn truncated_operand_is_an_error() {
    // JSR wants a two-byte address; only one byte remains.
    let image = Image::new(vec![0xea, 0x20, 0x00], 0x6000);

    assert_eq!(
        decode(&image, 1, ArchName::Mos6502),
        Err(Error::TruncatedOperand {
            address: 0x6001,
            needed: 3,
            available: 2,
        })
    );
}

#[test]
fn decode_past_the_end_is_an_error() {
    let image = Image::new(vec![0xea], 0x6000);

    assert_eq!(
        decode(&image, 5, ArchName::Mos6502),
        Err(Error::OffsetOutOfBounds { offset: 5, len: 1 })
    );
}

#[test]
fn sweep_walks_consecutive_instructions() {
    // LDA #$01 / STA $0400 / RTS
    let image = Image::new(vec![0xa9, 0x01, 0x8d, 0x00, 0x04, 0x60], 0x6000);
    let listing: Vec<_> = Disassembly::new(&image, ArchName::Mos6502)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(listing.len(), 3);
    assert_eq!(listing[0].text, "LDA #$01");
    assert_eq!(listing[1].text, "STA $0400");
    assert_eq!(listing[1].address, 0x6002);
    assert_eq!(listing[2].text, "RTS");
}

#[test]
fn sweep_stops_after_a_truncated_tail() {
    let image = Image::new(vec![0xea, 0x4c, 0x00], 0x6000);
    let mut sweep = Disassembly::new(&image, ArchName::Mos6502);

    assert!(sweep.next().unwrap().is_ok());
    assert!(sweep.next().unwrap().is_err());
    assert!(sweep.next().is_none());
}

#[test]
fn data_sweep_collapses_runs() {
    let mut data = vec![0x01, 0x02, 0x03];
    data.extend(std::iter::repeat(0x00).take(64));
    data.push(0x7f);

    let image = Image::new(data, 0x7000);
    let records = disassemble_data(&image);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].text, ".byte $01 $02 $03");
    assert_eq!(records[1].text, ".byte $00 x 64");
    assert_eq!(records[1].flag.result(), FlagResult::RepeatedBytes);
    assert_eq!(records[1].len, 64);
    assert_eq!(records[2].address, 0x7043);
    assert!(records.iter().all(|r| r.record == RecordType::Data));
}

#[test]
fn flag_modifier_bits_never_leak_into_results() {
    for val in 0..=255u8 {
        let flag = SemanticFlag::from_wire(val);

        assert_eq!(flag.result() as u8 & !FLAG_RESULT_MASK, 0);
        assert_eq!(
            flag.bits() & FLAG_TARGET_ADDR != 0,
            val & FLAG_TARGET_ADDR != 0
        );
        assert_eq!(flag.bits() & FLAG_REG_SR != 0, val & FLAG_REG_SR != 0);
    }
}

#[test]
fn region_code_selects_the_matching_table() {
    use crate::analysis::{Region, RegionMap};

    let mut map = RegionMap::new();
    map.push(Region {
        start: 0x0000,
        end: 0xffff,
        record: RecordType::from_wire(19),
    });

    let arch = map.classify(0x8000).arch().unwrap();
    // 0xa9 is XOR C on the Z80, never LDA immediate.
    let image = Image::new(vec![0xa9, 0x42], 0x8000);
    let instruction = decode(&image, 0, arch).unwrap();

    assert_eq!(arch, ArchName::Z80);
    assert_eq!(instruction.text, "XOR C");
    assert_eq!(instruction.len, 1);
}

#[test]
fn merged_stream_keeps_every_event() {
    // The canonical six-event stream: a paired step, a VBI window, and
    // another paired step.
    let events = vec![
        TraceEvent::NextInstruction { pc: 0x6000 },
        TraceEvent::NextInstructionResult,
        TraceEvent::VbiStart,
        TraceEvent::VbiEnd,
        TraceEvent::NextInstruction { pc: 0x6002 },
        TraceEvent::NextInstructionResult,
    ];
    let mut merger = Merger::new();

    for event in events {
        merger.push(event);
    }

    let timeline = merger.timeline();

    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline.get(0).unwrap().record, RecordType::NextInstruction);
    assert_eq!(timeline.get(2).unwrap().record, RecordType::VbiStart);
    assert_eq!(timeline.get(3).unwrap().record, RecordType::VbiEnd);
    assert_eq!(
        timeline.get(5).unwrap().record,
        RecordType::NextInstructionResult
    );
    assert_eq!(timeline.anomalies().count(), 0);
    assert!(timeline.iter().enumerate().all(|(i, r)| r.step == i));
}

#[test]
fn timeline_queries_by_address_range() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::CpuStep {
        pc: 0x6000,
        registers: None,
    });
    merger.push(TraceEvent::CpuStepResult { flag: 0 });
    merger.push(TraceEvent::CpuStep {
        pc: 0x60ff,
        registers: None,
    });
    merger.push(TraceEvent::CpuStep {
        pc: 0x6100,
        registers: None,
    });

    let timeline = merger.timeline();
    let steps: Vec<_> = timeline.in_range(0x6000..=0x60ff).collect();

    // The result event has no program counter and never matches; the
    // step at $6100 is past the end of the range.
    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].pc, Some(0x6000));
    assert_eq!(steps[1].pc, Some(0x60ff));
    assert_eq!(timeline.at_address(0x60ff).count(), 1);
}

#[test]
fn json_lines_replay_reproduces_the_merge() {
    let lines = r#"
        {"type":"next-instruction","pc":24576}
        {"type":"next-instruction-result"}
        {"type":"vbi-start"}
        {"type":"vbi-end"}
        {"type":"next-instruction","pc":24578}
        {"type":"next-instruction-result"}
    "#;
    let mut merger = Merger::new();

    for line in lines.lines().filter(|l| !l.trim().is_empty()) {
        let event: TraceEvent = serde_json::from_str(line.trim()).unwrap();

        merger.push_strict(event).unwrap();
    }

    let timeline = merger.timeline();

    assert_eq!(timeline.len(), 6);
    assert_eq!(timeline.get(0).unwrap().pc, Some(0x6000));
    assert_eq!(timeline.get(2).unwrap().record, RecordType::VbiStart);
    assert_eq!(timeline.get(4).unwrap().pc, Some(0x6002));
    assert_eq!(timeline.anomalies().count(), 0);
}

#[test]
fn unmatched_step_is_force_closed() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::CpuStep {
        pc: 0x6000,
        registers: None,
    });
    merger.push(TraceEvent::CpuStep {
        pc: 0x6002,
        registers: None,
    });
    merger.push(TraceEvent::CpuStepResult { flag: 0 });

    let timeline = merger.timeline();

    assert_eq!(timeline.len(), 3);
    assert_eq!(
        timeline.get(0).unwrap().anomaly,
        Some(Anomaly::ForcedClose(PairKind::Cpu))
    );
    assert_eq!(timeline.get(1).unwrap().anomaly, None);
    assert_eq!(timeline.get(2).unwrap().anomaly, None);
}

#[test]
fn unpaired_result_is_kept_and_annotated() {
    let mut merger = Merger::new();

    let strict = merger.push_strict(TraceEvent::CpuStepResult { flag: 0 });

    assert_eq!(strict, Err(Error::UnpairedHistoryRecord(PairKind::Cpu)));
    assert_eq!(merger.timeline().len(), 1);
    assert_eq!(
        merger.timeline().get(0).unwrap().anomaly,
        Some(Anomaly::UnpairedResult(PairKind::Cpu))
    );
}

#[test]
fn pair_kinds_do_not_interfere() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::CpuStep {
        pc: 0x6000,
        registers: None,
    });
    merger.push(TraceEvent::PlatformStep { pc: 0xd400 });
    merger.push(TraceEvent::PlatformStepResult);
    merger.push(TraceEvent::CpuStepResult { flag: 0 });

    assert_eq!(merger.timeline().anomalies().count(), 0);
}

#[test]
fn frame_numbers_stick_to_records() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::NextInstruction { pc: 0x6000 });
    merger.push(TraceEvent::FrameStart { frame: 312 });
    merger.push(TraceEvent::NextInstructionResult);

    let timeline = merger.timeline();

    assert_eq!(timeline.get(0).unwrap().frame, None);
    assert_eq!(timeline.get(1).unwrap().frame, Some(312));
    assert_eq!(timeline.get(2).unwrap().frame, Some(312));
}

#[test]
fn merger_resolves_steps_against_an_image() {
    let image = Image::new(vec![0xa9, 0x42, 0x60], 0x6000);
    let mut merger = Merger::with_image(image, ArchName::Mos6502);

    merger.push(TraceEvent::CpuStep {
        pc: 0x6000,
        registers: None,
    });
    merger.push(TraceEvent::CpuStep {
        pc: 0x9999,
        registers: None,
    });

    let timeline = merger.timeline();

    assert_eq!(timeline.get(0).unwrap().text.as_deref(), Some("LDA #$42"));
    assert_eq!(
        timeline.get(0).unwrap().flag.map(|f| f.result()),
        Some(FlagResult::RegA)
    );
    // Outside the image: the event is kept, just unresolved.
    assert_eq!(timeline.get(1).unwrap().text, None);
}

#[test]
fn result_events_carry_their_observed_flag() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::CpuStep {
        pc: 0x6000,
        registers: None,
    });
    merger.push(TraceEvent::CpuStepResult {
        flag: 1 | FLAG_TARGET_ADDR,
    });

    let flag = merger.timeline().get(1).unwrap().flag.unwrap();

    assert_eq!(flag.result(), FlagResult::BranchTaken);
    assert!(flag.has_target_addr());
}

#[test]
fn clear_restarts_step_numbering() {
    let mut merger = Merger::new();

    merger.push(TraceEvent::VbiStart);
    merger.push(TraceEvent::VbiEnd);
    merger.clear();
    merger.push(TraceEvent::DliStart);

    assert_eq!(merger.timeline().len(), 1);
    assert_eq!(merger.timeline().get(0).unwrap().step, 0);
    assert_eq!(merger.timeline().get(0).unwrap().record, RecordType::DliStart);
}

#[test]
fn trace_events_round_trip_through_json() {
    let event = TraceEvent::CpuStep {
        pc: 0x6000,
        registers: Some(crate::analysis::Registers {
            a: 1,
            x: 2,
            y: 3,
            sp: 0xfd,
            sr: 0x30,
        }),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: TraceEvent = serde_json::from_str(&json).unwrap();

    assert_eq!(back, event);
}
