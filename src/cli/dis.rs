//! High-level CLI routine for static disassembly.

use crate::analysis::{disassemble_data, DecodedInstruction, Disassembly};
use crate::cli::common::{load_image, require_arch};
use crate::project::{parse_address, Project};
use clap::ArgMatches;
use std::io;

fn print_record(record: &DecodedInstruction) {
    let bytes = record
        .bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ");
    let flag = if record.flag.bits() != 0 {
        format!("  ; {}", record.flag)
    } else {
        String::new()
    };

    println!("{:04x}: {:<12} {}{}", record.address, bytes, record.text, flag);
}

pub fn dis(project: &Project, matches: &ArgMatches<'_>) -> io::Result<()> {
    let image = load_image(project)?;

    if matches.is_present("data") {
        for record in disassemble_data(&image) {
            print_record(&record);
        }

        return Ok(());
    }

    let arch = require_arch(project)?;
    let sweep = match matches.value_of("start") {
        Some(start) => Disassembly::from_address(&image, arch, parse_address(start)?),
        None => Disassembly::new(&image, arch),
    };

    for step in sweep {
        match step {
            Ok(record) => print_record(&record),
            Err(e) => {
                eprintln!("Stopping: {}", e);
                break;
            }
        }
    }

    Ok(())
}
