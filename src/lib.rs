//! Multi-architecture disassembly and execution-history engine for 8-bit
//! targets.
//!
//! The engine has two halves that share one type-code space:
//!
//!  * Static disassembly: a byte buffer plus an architecture selector is
//!    decoded into instructions, each carrying an addressing-mode-aware
//!    length, rendered mnemonic text, and a semantic flag describing its
//!    effect (branch, register load/store, memory alter, stack traffic,
//!    return).
//!  * History merging: live emulator trace events (instruction steps,
//!    frame and interrupt windows, breakpoints) are classified into the
//!    same record-type space and interleaved with decoded instructions
//!    into a single ordered timeline for a debugger to render.
//!
//! Neither half executes target code or writes target memory.

#[macro_use]
extern crate clap;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate serde_plain;

#[macro_use]
pub mod arch;

pub mod analysis;
pub mod cli;
pub mod memory;
pub mod project;
