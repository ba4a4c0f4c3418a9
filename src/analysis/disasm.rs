//! Static disassembly: single-instruction decode and linear sweeps.

use crate::analysis::{resolve, Error, RecordType, Result, SemanticFlag};
use crate::arch::{render_operand, ArchName};
use crate::memory::Image;

/// Identical-byte runs at least this long are collapsed into one data
/// record instead of being listed byte by byte.
const RUN_THRESHOLD: usize = 8;

/// How many bytes a plain data record lists per line.
const DATA_CHUNK: usize = 8;

/// One decoded record: an instruction, or a span of data bytes.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedInstruction {
    /// Address of the first byte.
    pub address: u16,
    /// Total length in bytes, prefix included.
    pub len: u8,
    /// Rendered text, mnemonic and operand combined.
    pub text: String,
    /// Composed semantic flag.
    pub flag: SemanticFlag,
    /// The record type this decodes as on the wire.
    pub record: RecordType,
    /// Concrete target address, when the addressing mode names one.
    pub target: Option<u16>,
    /// The raw bytes consumed.
    pub bytes: Vec<u8>,
}

/// Decode the single instruction at `offset` in `image`.
///
/// Undefined opcodes are not errors: they decode as `.byte` records of
/// the sentinel's length. The only failures are an offset past the end
/// of the image and an instruction whose declared operand bytes run off
/// the end of the buffer.
pub fn decode(image: &Image, offset: usize, arch: ArchName) -> Result<DecodedInstruction> {
    let address = image.address_of(offset).ok_or(Error::OffsetOutOfBounds {
        offset,
        len: image.len(),
    })?;
    let bytes = image.tail(offset);
    let table = arch.table();

    let (entry, header) = table.lookup(bytes).ok_or(Error::TruncatedOperand {
        address,
        needed: 2,
        available: bytes.len(),
    })?;
    let total = usize::from(entry.len);

    if bytes.len() < total {
        return Err(Error::TruncatedOperand {
            address,
            needed: total,
            available: bytes.len(),
        });
    }

    // Sentinel entries render every consumed byte, opcode included;
    // real entries render only the operand tail.
    let operand = if entry.is_illegal() {
        &bytes[..total]
    } else {
        &bytes[usize::from(header)..total]
    };

    let (operand_text, target) = render_operand(entry.mode, operand, address, entry.len, table.endian());
    let text = if entry.mnemonic.contains("{}") {
        entry.mnemonic.replacen("{}", &operand_text, 1)
    } else if operand_text.is_empty() {
        entry.mnemonic.clone()
    } else {
        format!("{} {}", entry.mnemonic, operand_text)
    };

    Ok(DecodedInstruction {
        address,
        len: entry.len,
        text,
        flag: resolve(entry, entry.mode),
        record: RecordType::for_arch(arch),
        target,
        bytes: bytes[..total].to_vec(),
    })
}

/// Linear-sweep disassembly of an image, one instruction per step.
///
/// The iterator stops after yielding a decode error; the caller decides
/// whether to resume past the bad address as data.
pub struct Disassembly<'a> {
    image: &'a Image,
    offset: usize,
    arch: ArchName,
    failed: bool,
}

impl<'a> Disassembly<'a> {
    pub fn new(image: &'a Image, arch: ArchName) -> Self {
        Disassembly {
            image,
            offset: 0,
            arch,
            failed: false,
        }
    }

    /// Start the sweep at an address instead of the image start.
    pub fn from_address(image: &'a Image, arch: ArchName, address: u16) -> Self {
        Disassembly {
            image,
            offset: image.offset_of(address).unwrap_or_else(|| image.len()),
            arch,
            failed: false,
        }
    }
}

impl<'a> Iterator for Disassembly<'a> {
    type Item = Result<DecodedInstruction>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.image.len() {
            return None;
        }

        match decode(self.image, self.offset, self.arch) {
            Ok(instruction) => {
                self.offset += usize::from(instruction.len);
                Some(Ok(instruction))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Render an image as data records.
///
/// Runs of one repeated byte collapse into a single repeated-bytes
/// record; everything else is listed in small `.byte` chunks. Run
/// records are capped at 255 bytes so the record length always fits the
/// wire format's length byte.
pub fn disassemble_data(image: &Image) -> Vec<DecodedInstruction> {
    let data = image.data();
    let mut records = Vec::new();
    let mut offset = 0;

    while offset < data.len() {
        let run = data[offset..]
            .iter()
            .take_while(|b| **b == data[offset])
            .count();

        let (len, text, flag) = if run >= RUN_THRESHOLD {
            let len = run.min(255);

            (
                len,
                format!(".byte ${:02x} x {}", data[offset], len),
                SemanticFlag::new(crate::analysis::FlagResult::RepeatedBytes),
            )
        } else {
            // Cut the chunk short when a collapsible run starts inside it.
            let mut len = DATA_CHUNK.min(data.len() - offset);

            for i in 1..len {
                let inner = data[offset + i..]
                    .iter()
                    .take_while(|b| **b == data[offset + i])
                    .count();

                if inner >= RUN_THRESHOLD {
                    len = i;
                    break;
                }
            }

            let text = data[offset..offset + len]
                .iter()
                .map(|b| format!("${:02x}", b))
                .collect::<Vec<_>>()
                .join(" ");

            (
                len,
                format!(".byte {}", text),
                SemanticFlag::new(crate::analysis::FlagResult::None),
            )
        };

        records.push(DecodedInstruction {
            address: image.origin().wrapping_add(offset as u16),
            len: len as u8,
            text,
            flag,
            record: RecordType::Data,
            target: None,
            bytes: data[offset..offset + len].to_vec(),
        });
        offset += len;
    }

    records
}
