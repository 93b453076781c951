//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! Stats digests and run reports are compared byte-for-byte across runs and
//! across processes, so every digest that involves JSON routes through here.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. No extraneous whitespace (compact form: `{"a":1,"b":2}`).
//! 3. Strings are JSON-escaped per RFC 8259 §7.
//! 4. Numbers must be integers (`i64` or `u64`). Floats are rejected so that
//!    no digest depends on float formatting; path costs and heuristic values
//!    travel as strings produced by [`cost_str`].
//! 5. `null`, `true`, `false` are written literally.

use std::io::Write;

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    #[error("non-integer number in canonical JSON: {raw}")]
    NonIntegerNumber { raw: String },
}

/// Render a cost or heuristic value for canonical JSON.
///
/// Finite values use Rust's shortest round-trip formatting (`3`, `2.5`);
/// infinities render as `"inf"` / `"-inf"` and NaN as `"nan"`.
#[must_use]
pub fn cost_str(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{value}")
    }
}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any JSON number is not
/// representable as `i64` or `u64`.
pub fn canonical_json_bytes(value: &serde_json::Value) -> Result<Vec<u8>, CanonError> {
    let mut buf = Vec::new();
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &serde_json::Value) -> Result<(), CanonError> {
    use serde_json::Value;

    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => write_number(buf, n)?,
        Value::String(s) => write_string(buf, s),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_value(buf, item)?;
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            buf.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                write_string(buf, key);
                buf.push(b':');
                write_value(buf, item)?;
            }
            buf.push(b'}');
        }
    }
    Ok(())
}

fn write_number(buf: &mut Vec<u8>, n: &serde_json::Number) -> Result<(), CanonError> {
    if let Some(i) = n.as_i64() {
        let _ = write!(buf, "{i}");
    } else if let Some(u) = n.as_u64() {
        let _ = write!(buf, "{u}");
    } else {
        return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
    }
    Ok(())
}

fn write_string(buf: &mut Vec<u8>, s: &str) {
    buf.push(b'"');
    for ch in s.chars() {
        match ch {
            '"' => buf.extend_from_slice(b"\\\""),
            '\\' => buf.extend_from_slice(b"\\\\"),
            '\n' => buf.extend_from_slice(b"\\n"),
            '\r' => buf.extend_from_slice(b"\\r"),
            '\t' => buf.extend_from_slice(b"\\t"),
            c if c < '\u{0020}' => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => {
                let mut utf8 = [0u8; 4];
                buf.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
            }
        }
    }
    buf.push(b'"');
}
