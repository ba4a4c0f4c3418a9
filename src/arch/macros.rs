//! Architecture-related macros

/// One instruction table row.
///
/// Assigns a single opcode slot in a 256-entry table. The length is the
/// total instruction size in bytes, prefix byte included for entries that
/// live in a prefixed secondary table. Omitting the flag leaves the slot
/// with no semantic effect.
macro_rules! row {
    ($t:ident, $op:expr, $mn:expr, $mode:ident, $len:expr, $flag:ident) => {
        $t[$op as usize] = $crate::arch::Entry::new(
            $mn,
            $crate::arch::AddrMode::$mode,
            $len,
            $crate::analysis::FlagResult::$flag,
        )
    };
    ($t:ident, $op:expr, $mn:expr, $mode:ident, $len:expr) => {
        row!($t, $op, $mn, $mode, $len, None)
    };
}
