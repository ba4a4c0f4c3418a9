//! High-level CLI routine for trace replay.

use crate::analysis::{Merger, TimelineRecord, TraceEvent};
use crate::cli::common::{load_image, require_arch};
use crate::project::Project;
use clap::ArgMatches;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

fn print_record(record: &TimelineRecord) {
    let mut detail = String::new();

    if let Some(frame) = record.frame {
        detail.push_str(&format!(" frame={}", frame));
    }

    if let Some(pc) = record.pc {
        detail.push_str(&format!(" pc=${:04x}", pc));
    }

    if let Some(text) = &record.text {
        detail.push_str(&format!("  {}", text));
    }

    if let Some(flag) = record.flag {
        detail.push_str(&format!("  [{}]", flag));
    }

    if let Some(anomaly) = record.anomaly {
        detail.push_str(&format!("  !{:?}", anomaly));
    }

    println!("{:>6}  {:<24}{}", record.step, record.record.to_string(), detail);
}

pub fn trace(project: &Project, matches: &ArgMatches<'_>) -> io::Result<()> {
    let filename = matches.value_of("events").ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "No trace event file given")
    })?;
    let strict = matches.is_present("strict");

    // Steps resolve to instruction text only when the project names both
    // an image and an architecture.
    let mut merger = if project.image().is_some() && project.arch().is_some() {
        Merger::with_image(load_image(project)?, require_arch(project)?)
    } else {
        Merger::new()
    };

    let reader = BufReader::new(File::open(filename)?);

    for (number, line) in reader.lines().enumerate() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        let event: TraceEvent = serde_json::from_str(&line).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("line {}: {}", number + 1, e),
            )
        })?;

        if strict {
            merger.push_strict(event).map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("line {}: {}", number + 1, e),
                )
            })?;
        } else {
            merger.push(event);
        }
    }

    for record in merger.timeline().iter() {
        print_record(record);
    }

    let anomalies = merger.timeline().anomalies().count();

    if anomalies > 0 {
        eprintln!("{} pairing irregularities annotated", anomalies);
    }

    Ok(())
}
