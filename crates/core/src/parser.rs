//! Tolerant packet-stream decoding.
//!
//! Test-vector files are hand-edited and regenerated frequently, so the
//! decoder is best-effort by design: malformed or truncated input
//! degrades to partial results plus diagnostics instead of aborting.
//!
//! # Token grammar
//!
//! Tokens are separated by whitespace or commas. Three kinds are
//! recognized:
//!
//! - `TLAST` (any case): end-of-packet marker
//! - `HEADER` / `ID` (any case): annotation noise, ignored
//! - anything else: an integer. `0x`/`-0x` prefixed tokens parse in
//!   base 16, everything else in base 10 after stripping a trailing run
//!   of non-numeric noise characters; tokens that still fail to parse
//!   are skipped
//!
//! How the token sequence is cut into packets depends on whether any
//! marker was seen; see [`FramingMode`].

use tracing::warn;

use crate::error::{ParseError, Result};

/// One decoded packet: the raw header word plus the payload that
/// followed it.
///
/// The header is carried as opaque data; the parser never validates it
/// (parity is a producer-side invariant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub header: i64,
    pub payload: Vec<i64>,
}

/// How a token stream is cut into packets.
///
/// The choice is made exactly once per parse call, from whether any
/// end-of-packet marker occurred anywhere in the stream. The two
/// chunkers are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramingMode {
    /// Markers delimit packets. The wire convention places the marker
    /// immediately *before* the final payload word, so a marker closes
    /// the current chunk after exactly one more value.
    Marker,
    /// No marker anywhere: cut into fixed chunks of
    /// `1 + values_per_packet` tokens.
    FixedSize,
}

/// Counters describing what a parse run kept and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseReport {
    /// Chunking mode chosen for this stream.
    pub mode: FramingMode,
    /// Chunks that yielded a packet.
    pub packets: usize,
    /// Chunks (or oversized-chunk remainders) holding fewer tokens than
    /// one full packet; skipped.
    pub short_chunks: usize,
    /// Chunks longer than one packet (a missing interior marker merges
    /// neighbors); every embedded full packet is recovered.
    pub oversized_chunks: usize,
    /// Tokens that failed integer parsing and were skipped.
    pub bad_tokens: usize,
    /// Fixed-size mode only: trailing tokens short of a full chunk.
    pub trailing_tokens: usize,
}

/// A parse result: the recovered packets plus diagnostics.
#[derive(Debug, Clone)]
pub struct ParsedStream {
    pub packets: Vec<Packet>,
    pub report: ParseReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Value(i64),
    Marker,
}

/// Decode a packet stream.
///
/// Never fails on malformed content: the worst input yields zero
/// packets and a report saying why. Within each chunk the first token
/// is the header word and the next `values_per_packet` tokens are the
/// payload.
pub fn parse_packets(text: &str, values_per_packet: usize) -> ParsedStream {
    let (tokens, bad_tokens) = tokenize(text);
    let mode = if tokens.contains(&Token::Marker) {
        FramingMode::Marker
    } else {
        FramingMode::FixedSize
    };

    let (chunks, trailing_tokens) = match mode {
        FramingMode::Marker => (chunk_by_marker(&tokens), 0),
        FramingMode::FixedSize => chunk_fixed(&tokens, values_per_packet),
    };

    let mut report = ParseReport {
        mode,
        packets: 0,
        short_chunks: 0,
        oversized_chunks: 0,
        bad_tokens,
        trailing_tokens,
    };
    let expected = 1 + values_per_packet;
    let mut packets = Vec::with_capacity(chunks.len());
    for (idx, chunk) in chunks.iter().enumerate() {
        if chunk.len() < expected {
            warn!(chunk = idx, len = chunk.len(), expected, "skipping incomplete packet");
            report.short_chunks += 1;
            continue;
        }
        if chunk.len() > expected {
            warn!(
                chunk = idx,
                len = chunk.len(),
                expected,
                "oversized chunk; recovering embedded packets"
            );
            report.oversized_chunks += 1;
        }
        // An oversized chunk is consecutive full packets whose interior
        // markers went missing; cut it back apart
        let mut parts = chunk.chunks_exact(expected);
        for part in &mut parts {
            packets.push(Packet {
                header: part[0],
                payload: part[1..].to_vec(),
            });
            report.packets += 1;
        }
        let remainder = parts.remainder().len();
        if remainder > 0 {
            warn!(chunk = idx, remainder, "oversized-chunk remainder does not fill a packet; dropped");
            report.short_chunks += 1;
        }
    }
    ParsedStream { packets, report }
}

/// Extract every numeric value in a stream, ignoring markers and noise.
///
/// Used to ingest plain tiled operand files, which carry no framing.
pub fn parse_values(text: &str) -> Vec<i64> {
    let (tokens, _) = tokenize(text);
    tokens
        .into_iter()
        .filter_map(|t| match t {
            Token::Value(v) => Some(v),
            Token::Marker => None,
        })
        .collect()
}

/// Split a plain value stream into consecutive `rows * cols` matrices.
///
/// Fewer values than one full matrix is fatal; a trailing remainder
/// after the last full matrix is dropped with a warning.
pub fn parse_matrices(text: &str, rows: usize, cols: usize) -> Result<Vec<Vec<i64>>> {
    let size = rows
        .checked_mul(cols)
        .filter(|s| *s > 0)
        .ok_or(ParseError::EmptyShape { rows, cols })?;
    let values = parse_values(text);
    if values.len() < size {
        return Err(ParseError::StreamTooShort {
            required: size,
            actual: values.len(),
        }
        .into());
    }
    let mut chunks = values.chunks_exact(size);
    let matrices: Vec<Vec<i64>> = (&mut chunks).map(<[i64]>::to_vec).collect();
    let remainder = chunks.remainder().len();
    if remainder > 0 {
        warn!(remainder, "trailing values after last full matrix; dropped");
    }
    Ok(matrices)
}

fn tokenize(text: &str) -> (Vec<Token>, usize) {
    let mut tokens = Vec::new();
    let mut bad = 0;
    for raw in text.split(|c: char| c.is_whitespace() || c == ',') {
        if raw.is_empty() {
            continue;
        }
        if raw.eq_ignore_ascii_case("TLAST") {
            tokens.push(Token::Marker);
            continue;
        }
        if raw.eq_ignore_ascii_case("HEADER") || raw.eq_ignore_ascii_case("ID") {
            continue;
        }
        match parse_int(raw) {
            Some(v) => tokens.push(Token::Value(v)),
            None => bad += 1,
        }
    }
    (tokens, bad)
}

/// Parse one numeric token. `0x`/`-0x` prefixes select base 16; base-10
/// tokens first drop any trailing run of non-digit noise characters
/// (units, punctuation) that hand-annotated vector files accumulate.
fn parse_int(tok: &str) -> Option<i64> {
    if let Some(hex) = tok.strip_prefix("0x") {
        return i64::from_str_radix(hex, 16).ok();
    }
    if let Some(hex) = tok.strip_prefix("-0x") {
        return i64::from_str_radix(hex, 16).ok().map(|v| -v);
    }
    let clean = tok.trim_end_matches(|c: char| !c.is_ascii_digit() && c != '-');
    clean.parse().ok()
}

/// Cut by markers. A marker schedules the close of the current chunk
/// after one more value (the marker-before-last-value convention); a
/// non-empty chunk left open at end of input is emitted as-is so a
/// truncated final packet can still be diagnosed.
fn chunk_by_marker(tokens: &[Token]) -> Vec<Vec<i64>> {
    let mut chunks = Vec::new();
    let mut cur: Vec<i64> = Vec::new();
    let mut close_after_next = false;
    for tok in tokens {
        match tok {
            Token::Marker => close_after_next = true,
            Token::Value(v) => {
                cur.push(*v);
                if close_after_next {
                    chunks.push(std::mem::take(&mut cur));
                    close_after_next = false;
                }
            }
        }
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

/// Cut into fixed chunks of `1 + values_per_packet` tokens; the
/// remainder is dropped and its length reported.
fn chunk_fixed(tokens: &[Token], values_per_packet: usize) -> (Vec<Vec<i64>>, usize) {
    let values: Vec<i64> = tokens
        .iter()
        .filter_map(|t| match t {
            Token::Value(v) => Some(*v),
            Token::Marker => None,
        })
        .collect();
    let mut chunks = values.chunks_exact(1 + values_per_packet);
    let out: Vec<Vec<i64>> = (&mut chunks).map(<[i64]>::to_vec).collect();
    let trailing = chunks.remainder().len();
    if trailing > 0 {
        warn!(trailing, "trailing tokens do not fill a packet; dropped");
    }
    (out, trailing)
}
