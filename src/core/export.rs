// Plain-text export rendering: one timestamp line, then one content line, per record.
use std::io::{self, Write};

use crate::core::store::Inspiration;

/// Writes `records` in the given order. Content is written verbatim; embedded
/// newlines are not escaped.
pub fn write_records<W: Write>(out: &mut W, records: &[Inspiration]) -> io::Result<usize> {
    for record in records {
        out.write_all(record.timestamp.as_bytes())?;
        out.write_all(b"\n")?;
        out.write_all(record.content.as_bytes())?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(records.len())
}
