//! Counter cells and the decimal wire protocol.
//!
//! A counter file's value travels as its base-10 rendering followed by a
//! newline, bounded at [`COUNTER_BUF_SIZE`] bytes. Reads from offset 0 show
//! the pre-increment value and bump the counter; continuation reads at a
//! nonzero offset render `current − 1` so the caller sees a stable snapshot
//! of the string it started slicing. Callers that keep re-reading from
//! offset 0 keep incrementing; that ordering contract is load-bearing.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::FsError;
use crate::types::COUNTER_BUF_SIZE;

/// The single mutable integer behind a counter file.
///
/// All access is atomic; concurrent zero-offset reads never lose updates.
#[derive(Debug, Default)]
pub struct CounterCell(AtomicI64);

impl CounterCell {
    pub fn new(value: i64) -> Self {
        Self(AtomicI64::new(value))
    }

    /// Current value, without side effects.
    pub fn get(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Increment and return the pre-increment value.
    pub fn fetch_increment(&self) -> i64 {
        self.0.fetch_add(1, Ordering::SeqCst)
    }

    /// Replace the value.
    pub fn set(&self, value: i64) {
        self.0.store(value, Ordering::SeqCst)
    }
}

/// Render `value` as decimal digits plus newline.
///
/// Counter values stay small in normal operation; a rendering that exceeds
/// the wire bound is an invariant violation reported as [`FsError::Truncated`],
/// never a silent cut.
pub fn render_value(value: i64) -> Result<Vec<u8>, FsError> {
    let text = format!("{value}\n");
    if text.len() > COUNTER_BUF_SIZE {
        return Err(FsError::Truncated {
            value,
            limit: COUNTER_BUF_SIZE,
        });
    }
    Ok(text.into_bytes())
}

/// Read up to `length` bytes of the rendered counter starting at `offset`.
///
/// Offsets at or past the end of the rendering yield an empty slice
/// (end of stream), not an error.
pub fn read_at(cell: &CounterCell, offset: u64, length: usize) -> Result<Vec<u8>, FsError> {
    let shown = if offset > 0 {
        // Compensate for the increment the offset-0 read already applied.
        cell.get().wrapping_sub(1)
    } else {
        cell.fetch_increment()
    };
    let text = render_value(shown)?;

    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    if offset >= text.len() {
        return Ok(Vec::new());
    }
    let count = length.min(text.len() - offset);
    Ok(text[offset..offset + count].to_vec())
}

/// Parse `payload` and replace the cell's value; returns bytes consumed.
///
/// Writes must start at offset 0 and fit the wire bound.
pub fn write_at(cell: &CounterCell, offset: u64, payload: &[u8]) -> Result<usize, FsError> {
    if offset != 0 {
        return Err(FsError::InvalidArgument(format!(
            "counter writes must start at offset 0, got {offset}"
        )));
    }
    if payload.len() >= COUNTER_BUF_SIZE {
        return Err(FsError::InvalidArgument(format!(
            "payload of {} bytes exceeds {}-byte buffer",
            payload.len(),
            COUNTER_BUF_SIZE
        )));
    }
    cell.set(parse_decimal(payload));
    Ok(payload.len())
}

/// Permissive strtol-style parse: optional leading whitespace and sign,
/// digits until the first non-digit, everything after ignored. No digits
/// parses as 0. Accumulation wraps rather than erroring.
pub fn parse_decimal(payload: &[u8]) -> i64 {
    let text = String::from_utf8_lossy(payload);
    let mut chars = text.trim_start().chars().peekable();

    let mut negative = false;
    if let Some(&c) = chars.peek() {
        if c == '+' || c == '-' {
            negative = c == '-';
            chars.next();
        }
    }

    let mut value: i64 = 0;
    for c in chars {
        let Some(digit) = c.to_digit(10) else {
            break;
        };
        value = value.wrapping_mul(10).wrapping_add(i64::from(digit));
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}
