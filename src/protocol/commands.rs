//! # ESC/POS Protocol Commands
//!
//! Command builders for the subset of ESC/POS the typewriter needs.
//! Epson TM-series printers (TM-T88V, TM-T20, ...) and most compatible
//! 80mm receipt printers accept these.
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `LF`
//! - Multi-byte with parameters: `GS L nL nH`, `GS V m`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// GS (Group Separator) - Extended command prefix
///
/// Used for layout (`GS L`) and cutter (`GS V`) commands.
pub const GS: u8 = 0x1D;

/// LF (Line Feed) - Print the line buffer and advance one line
pub const LF: u8 = 0x0A;

// ============================================================================
// LAYOUT
// ============================================================================

/// # Set Left Margin (GS L nL nH)
///
/// Sets the left margin to `(nL + nH * 256)` horizontal motion units.
///
/// ## Protocol Details
///
/// | Format  | Bytes          |
/// |---------|----------------|
/// | ASCII   | GS L nL nH     |
/// | Hex     | 1D 4C nL nH    |
///
/// ## Behavior
///
/// - Only takes effect at the beginning of a line
/// - Lost on power cycle and on `ESC @`, which is why it is re-sent before
///   every text job
///
/// ## Example
///
/// ```
/// use thermal_typer::protocol::commands;
///
/// // 60 units, the default margin
/// assert_eq!(commands::set_left_margin(60), vec![0x1D, 0x4C, 60, 0]);
///
/// // 300 units = 44 + 1 * 256
/// assert_eq!(commands::set_left_margin(300), vec![0x1D, 0x4C, 44, 1]);
/// ```
#[inline]
pub fn set_left_margin(units: u16) -> Vec<u8> {
    let [nl, nh] = units.to_le_bytes();
    vec![GS, b'L', nl, nh]
}

// ============================================================================
// PAPER CONTROL
// ============================================================================

/// # Feed Lines
///
/// `n` plain line feeds. Used to push the last printed line past the cutter
/// before [`cut`], so the feed amount follows the printer's line spacing.
#[inline]
pub fn feed_lines(n: u32) -> Vec<u8> {
    vec![LF; n as usize]
}

/// # Full Cut (GS V 0)
///
/// Cuts the paper at the current position.
///
/// ## Protocol Details
///
/// | Format  | Bytes    |
/// |---------|----------|
/// | ASCII   | GS V NUL |
/// | Hex     | 1D 56 00 |
///
/// The cutter sits a few lines above the print head, so callers feed
/// first (see [`feed_lines`]).
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', 0]
}

// ============================================================================
// TESTS
// ============================================================================
