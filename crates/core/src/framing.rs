//! Packet-stream emission.
//!
//! The accelerator's streaming interface is mimicked as an ASCII file,
//! one token per line:
//!
//! ```text
//! <header>    decimal u32
//! <value>     payload word 0
//! ...
//! TLAST       end-of-packet marker
//! <value>     final payload word
//! ```
//!
//! # Marker position
//!
//! The marker line precedes the *final* payload word instead of
//! following it. This matches the files the simulator consumes, and the
//! parser is written against the same convention: a terminal marker is
//! always followed by exactly one more payload word. See `parser`.

use tracing::warn;

/// End-of-packet marker token.
pub const MARKER: &str = "TLAST";

/// Serialize one packet: header line, then one value per line, with the
/// marker line immediately before the last value.
///
/// An empty payload yields just the header line and no marker.
pub fn frame_packet(header: u32, values: &[i64]) -> String {
    let mut out = String::with_capacity(12 * (values.len() + 2));
    out.push_str(&header.to_string());
    out.push('\n');
    if let Some((last, body)) = values.split_last() {
        for v in body {
            out.push_str(&v.to_string());
            out.push('\n');
        }
        out.push_str(MARKER);
        out.push('\n');
        out.push_str(&last.to_string());
        out.push('\n');
    }
    out
}

/// Serialize one flat buffer as consecutive packets of
/// `values_per_packet` words each (the split-buffer producer mode, as
/// opposed to generating a fresh payload per packet).
///
/// `header_for` supplies the header word for each packet index. A
/// trailing remainder shorter than one packet is not framed and is
/// reported as a warning.
pub fn frame_chunks(
    values: &[i64],
    values_per_packet: usize,
    header_for: impl Fn(usize) -> u32,
) -> String {
    let mut out = String::new();
    if values_per_packet == 0 {
        warn!("values_per_packet is 0; nothing framed");
        return out;
    }
    let mut chunks = values.chunks_exact(values_per_packet);
    for (packet, chunk) in (&mut chunks).enumerate() {
        out.push_str(&frame_packet(header_for(packet), chunk));
    }
    let remainder = chunks.remainder().len();
    if remainder > 0 {
        warn!(remainder, "trailing values do not fill a packet; dropped");
    }
    out
}
