//! Line-break escaping for field and data values.
//!
//! A conforming SSE parser splits on `\n`, `\r` and `\r\n`, so no value may
//! carry a raw line break onto the wire. Field values (`id`, `event`) get
//! backslash escapes. Data values turn each `\n` into a fresh `data:` line.

use std::borrow::Cow;
use std::io;

use crate::sink::StringWrite;

const LINE_BREAKS: &[char] = &['\n', '\r'];

const FIELD_NEWLINE: &str = "\\n";
const DATA_NEWLINE: &str = "\ndata:";
const CARRIAGE_RETURN: &str = "\\r";

/// Escape a field value: `\n` becomes `\\n` and `\r` becomes `\\r`.
///
/// Borrows the input when it holds no line breaks.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    escape(value, FIELD_NEWLINE)
}

/// Escape a data value: `\n` starts a new `data:` line and `\r` becomes `\\r`.
///
/// Borrows the input when it holds no line breaks.
pub fn escape_data(value: &str) -> Cow<'_, str> {
    escape(value, DATA_NEWLINE)
}

/// Stream a field-escaped value into `sink`.
pub(crate) fn write_field<W: StringWrite + ?Sized>(sink: &mut W, value: &str) -> io::Result<()> {
    write_escaped(sink, value, FIELD_NEWLINE)
}

/// Stream a data-escaped value into `sink`.
pub(crate) fn write_data<W: StringWrite + ?Sized>(sink: &mut W, value: &str) -> io::Result<()> {
    write_escaped(sink, value, DATA_NEWLINE)
}

fn escape<'a>(value: &'a str, newline: &str) -> Cow<'a, str> {
    if !value.contains(LINE_BREAKS) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    let mut start = 0;
    for (idx, brk) in value.match_indices(LINE_BREAKS) {
        out.push_str(&value[start..idx]);
        out.push_str(replacement(brk, newline));
        start = idx + brk.len();
    }
    out.push_str(&value[start..]);
    Cow::Owned(out)
}

fn write_escaped<W: StringWrite + ?Sized>(
    sink: &mut W,
    value: &str,
    newline: &str,
) -> io::Result<()> {
    let mut start = 0;
    for (idx, brk) in value.match_indices(LINE_BREAKS) {
        if idx > start {
            sink.write_string(&value[start..idx])?;
        }
        sink.write_string(replacement(brk, newline))?;
        start = idx + brk.len();
    }
    if start < value.len() {
        sink.write_string(&value[start..])?;
    }
    Ok(())
}

fn replacement<'a>(brk: &str, newline: &'a str) -> &'a str {
    if brk == "\n" {
        newline
    } else {
        CARRIAGE_RETURN
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("a\nb"), "a\\nb");
        assert_eq!(escape_field("a\rb"), "a\\rb");
        assert_eq!(escape_field("a\r\nb"), "a\\r\\nb");
        assert_eq!(escape_field("\n"), "\\n");
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("a\nb"), "a\ndata:b");
        assert_eq!(escape_data("a\rb"), "a\\rb");
        assert_eq!(escape_data("a\r\nb"), "a\\r\ndata:b");
        assert_eq!(escape_data("trailing\n"), "trailing\ndata:");
    }

    #[test]
    fn test_clean_values_are_borrowed() {
        assert!(matches!(escape_field("event-42"), Cow::Borrowed("event-42")));
        assert!(matches!(escape_data("plain text"), Cow::Borrowed("plain text")));
        assert!(matches!(escape_field(""), Cow::Borrowed("")));
    }

    #[test]
    fn test_streaming_matches_buffered() {
        let inputs = ["", "x", "a\nb\rc", "\r\n\r\n", "héllo\nwörld", "end\r"];
        for input in inputs {
            let mut field = Vec::new();
            write_field(&mut field, input).unwrap();
            assert_eq!(field, escape_field(input).as_bytes());

            let mut data = Vec::new();
            write_data(&mut data, input).unwrap();
            assert_eq!(data, escape_data(input).as_bytes());
        }
    }

    #[test]
    fn test_field_round_trip_without_control_chars() {
        // A parser takes everything after the first colon up to the line end
        for value in ["1", "msg", "user:created", "spaces are fine", "ünïcödé"] {
            let line = format!("id:{}\n", escape_field(value));
            let parsed = line
                .strip_suffix('\n')
                .and_then(|l| l.split_once(':'))
                .map(|(_, v)| v);
            assert_eq!(parsed, Some(value));
        }
    }
}
