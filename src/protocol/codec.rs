//! Protocol codec
//!
//! Encoding and decoding functions for the SNP wire format.
//!
//! ## Wire Format
//!
//! ### Request Line
//! ```text
//! type=SNP#?version=1.0#?action=register#?app=MyApp\r\n
//! └─ header ─┴─ version ─┴──── fields, joined by #? ────┘
//! ```
//!
//! ### Response Line
//! ```text
//! SNP/1.0/0/OK[/extra...]\n
//! ```

use std::io::{BufRead, Write};

use super::{Request, Response};
use crate::error::{Result, SnarlError};

/// Protocol identifier, first field of every request and response
pub const PROTOCOL_HEADER: &str = "SNP";

/// Separator between `name=value` pairs in a request
pub const FIELD_DELIMITER: &str = "#?";

/// Separator between response components
pub const RESPONSE_DELIMITER: char = '/';

/// Terminator appended to every request line
pub const LINE_TERMINATOR: &str = "\r\n";

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to bytes, CRLF included
///
/// Format: `type=SNP#?version=<version>#?name=value#?...\r\n`
pub fn encode_request(request: &Request, version: &str) -> Vec<u8> {
    let mut line = format!("type={PROTOCOL_HEADER}{FIELD_DELIMITER}version={version}");
    for (name, value) in request.fields() {
        line.push_str(FIELD_DELIMITER);
        line.push_str(name);
        line.push('=');
        line.push_str(value);
    }
    line.push_str(LINE_TERMINATOR);
    line.into_bytes()
}

/// Reject values that would corrupt request framing
///
/// `#?` would split a field in two, CR/LF would end the line early.
pub fn check_field_value(name: &str, value: &str) -> Result<()> {
    if value.contains(FIELD_DELIMITER) || value.contains('\r') || value.contains('\n') {
        return Err(SnarlError::Validation(format!(
            "{} must not contain '{}', CR or LF",
            name, FIELD_DELIMITER
        )));
    }
    Ok(())
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a single response line
///
/// The trailing line terminator, if any, is stripped first. The line must
/// have at least header, version, code and description components.
pub fn decode_response(line: &str) -> Result<Response> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut parts = line.split(RESPONSE_DELIMITER);

    if parts.next() != Some(PROTOCOL_HEADER) {
        return Err(SnarlError::Protocol(line.to_string()));
    }

    let (version, code, description) = match (parts.next(), parts.next(), parts.next()) {
        (Some(version), Some(code), Some(description)) => (version, code, description),
        _ => return Err(SnarlError::Protocol(line.to_string())),
    };

    let code = code
        .trim()
        .parse::<u32>()
        .map_err(|_| SnarlError::Protocol(line.to_string()))?;

    Ok(Response {
        version: version.to_string(),
        code,
        description: description.to_string(),
        extra: parts.map(str::to_string).collect(),
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a request to a stream and flush it
pub fn write_request<W: Write>(writer: &mut W, request: &Request, version: &str) -> Result<()> {
    let bytes = encode_request(request, version);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read one raw line from a stream
///
/// Returns an empty string at end of stream. Invalid UTF-8 is replaced
/// rather than rejected so the caller can still report the raw line.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    reader.read_until(b'\n', &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read and decode one response line
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Response> {
    let line = read_line(reader)?;
    tracing::trace!("<< {:?}", line);
    decode_response(&line)
}
