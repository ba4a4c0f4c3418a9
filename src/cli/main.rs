//! CLI entry point and argument wiring

use crate::{cli, project};
use clap::{Arg, ArgSettings, SubCommand};
use std::io;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = project::Project::configure_app(app);
    app = app.arg(
        Arg::with_name("project")
            .long("project")
            .value_name("octodis.json")
            .takes_value(true)
            .help("The project file to load")
            .set(ArgSettings::Global),
    );
    app = app
        .subcommand(
            SubCommand::with_name("dis")
                .about("Disassemble an image")
                .arg(
                    Arg::with_name("start")
                        .long("start")
                        .value_name("0x6000")
                        .takes_value(true)
                        .help("Address to start decoding at"),
                )
                .arg(
                    Arg::with_name("data")
                        .long("data")
                        .help("Decode the image as data records"),
                ),
        )
        .subcommand(
            SubCommand::with_name("trace")
                .about("Replay an emulator trace into a merged timeline")
                .arg(
                    Arg::with_name("events")
                        .value_name("trace.jsonl")
                        .required(true)
                        .help("Trace event file, one JSON event per line"),
                )
                .arg(
                    Arg::with_name("strict")
                        .long("strict")
                        .help("Fail on pairing irregularities instead of annotating them"),
                ),
        );

    let matches = app.get_matches();

    let project_filename = matches.value_of("project").unwrap_or("octodis.json");
    let mut project = project::Project::read(project_filename)?;
    project.apply_arg_matches(&matches)?;

    match matches.subcommand() {
        ("dis", Some(submatches)) => {
            project.apply_arg_matches(submatches)?;
            cli::dis(&project, submatches)
        }
        ("trace", Some(submatches)) => {
            project.apply_arg_matches(submatches)?;
            cli::trace(&project, submatches)
        }
        _ => {
            eprintln!("No command given; see --help for usage");
            Ok(())
        }
    }
}
