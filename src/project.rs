//! Project file structures

use crate::analysis::Region;
use crate::arch::ArchName;
use clap::{App, Arg, ArgMatches, ArgSettings};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::{fs, io};

/// One project: an image file, the architecture to decode it under, and
/// optional address regions overriding the default classification.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct Project {
    image: Option<String>,
    arch: Option<ArchName>,

    #[serde(default)]
    origin: Option<u16>,

    #[serde(default)]
    regions: Vec<Region>,
}

impl Project {
    pub fn read(filename: &str) -> io::Result<Self> {
        match fs::File::open(filename) {
            Ok(file) => serde_json::from_reader(file)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(Project::default()),
            Err(e) => Err(e),
        }
    }

    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("image")
                .long("image")
                .value_name("image.bin")
                .help("The binary image to decode")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("arch")
                .long("arch")
                .value_name("6502")
                .help("The architecture to decode the image as")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("origin")
                .long("origin")
                .value_name("0x6000")
                .help("The load address of the image")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Overlay command-line arguments on top of the file contents.
    pub fn apply_arg_matches(&mut self, matches: &ArgMatches<'_>) -> io::Result<()> {
        if let Some(image) = matches.value_of("image") {
            self.image = Some(image.to_string());
        }

        if let Some(arch) = matches.value_of("arch") {
            self.arch = Some(ArchName::from_str(arch).map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} is not a valid architecture name", arch),
                )
            })?);
        }

        if let Some(origin) = matches.value_of("origin") {
            self.origin = Some(parse_address(origin)?);
        }

        Ok(())
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn arch(&self) -> Option<ArchName> {
        self.arch
    }

    pub fn origin(&self) -> u16 {
        self.origin.unwrap_or(0)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }
}

/// Parse an address argument: `0x` or `$` hex, decimal otherwise.
pub fn parse_address(s: &str) -> io::Result<u16> {
    let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("$")) {
        u16::from_str_radix(hex, 16)
    } else {
        s.parse()
    };

    parsed.map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a valid address", s),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::RecordType;

    #[test]
    fn addresses_parse_in_three_radixes() {
        assert_eq!(parse_address("0x6000").unwrap(), 0x6000);
        assert_eq!(parse_address("$6000").unwrap(), 0x6000);
        assert_eq!(parse_address("24576").unwrap(), 0x6000);
        assert!(parse_address("banana").is_err());
    }

    #[test]
    fn project_files_deserialize_with_regions() {
        let json = r#"{
            "image": "game.xex",
            "arch": "6502",
            "origin": 24576,
            "regions": [
                { "start": 28672, "end": 28927, "record": "antic" }
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();

        assert_eq!(project.image(), Some("game.xex"));
        assert_eq!(project.arch(), Some(ArchName::Mos6502));
        assert_eq!(project.origin(), 0x6000);
        assert_eq!(project.regions().len(), 1);
        assert_eq!(project.regions()[0].record, RecordType::AnticDl);
    }

    #[test]
    fn project_files_round_trip_through_json() {
        let json = r#"{
            "image": "game.xex",
            "arch": "z80",
            "origin": 0,
            "regions": [
                { "start": 0, "end": 65535, "record": "z80" }
            ]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        let back: Project =
            serde_json::from_str(&serde_json::to_string(&project).unwrap()).unwrap();

        assert_eq!(back.image(), project.image());
        assert_eq!(back.arch(), Some(ArchName::Z80));
        assert_eq!(back.origin(), project.origin());
        assert_eq!(back.regions(), project.regions());
    }
}
