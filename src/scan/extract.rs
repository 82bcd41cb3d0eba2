//! Digit extraction from raw scanner captures
//!
//! Pure functions: no state, no failure modes. Every return value is a
//! (possibly short, possibly empty) all-digit string.

use super::{FRAME_LEN, IDENTIFIER_LEN};

/// Extract the canonical 14-digit ticket identifier from a raw capture.
///
/// The raw text is first stripped to its ASCII digits, preserving order.
/// Then:
///
/// - 24 or more digits: the scanner delivered a full fixed-length frame.
///   Only the first 14 digits of the trailing 24 are the identifier; the
///   remaining 10 are a suffix to discard. Taking the trailing window first
///   drops any leading noise bytes the wedge injected.
/// - more than 14 digits: keep the last 14.
/// - otherwise: returned unchanged; the caller must treat short results as
///   an incomplete capture.
///
/// The last-24-then-first-14 rule matches the observed payload shape of the
/// deployed scanners. It is a device workaround, not a barcode-format rule.
pub fn extract_identifier(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() >= FRAME_LEN {
        let frame = &digits[digits.len() - FRAME_LEN..];
        frame[..IDENTIFIER_LEN].to_string()
    } else if digits.len() > IDENTIFIER_LEN {
        digits[digits.len() - IDENTIFIER_LEN..].to_string()
    } else {
        digits
    }
}

/// Diagnostic breakdown of a raw scanner capture
///
/// Produced by [`analyze`] for the operator-facing `/analyze` command when a
/// scanner misbehaves. Carries everything needed to see exactly which bytes
/// the wedge delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanAnalysis {
    /// Length of the raw capture in characters
    pub raw_len: usize,
    /// The capture with every non-digit removed
    pub cleaned: String,
    /// Length of the cleaned digit string
    pub cleaned_len: usize,
    /// Numeric code of every input character, in order
    pub char_codes: Vec<u32>,
    /// `(code, position)` for each control character (code < 32 or 127)
    pub control_chars: Vec<(u32, usize)>,
}

/// Analyze a raw capture for scanner diagnostics.
pub fn analyze(raw: &str) -> ScanAnalysis {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let char_codes: Vec<u32> = raw.chars().map(|c| c as u32).collect();
    let control_chars: Vec<(u32, usize)> = raw
        .chars()
        .enumerate()
        .filter_map(|(position, c)| {
            let code = c as u32;
            if code < 32 || code == 127 {
                Some((code, position))
            } else {
                None
            }
        })
        .collect();

    ScanAnalysis {
        raw_len: raw.chars().count(),
        cleaned_len: cleaned.len(),
        cleaned,
        char_codes,
        control_chars,
    }
}
