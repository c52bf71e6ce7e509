//! vectorgen-core: packet-stream test-vector codec and golden model for
//! matrix-multiplication accelerator kernels.
//!
//! Producers emit operand matrices over a packetized streaming interface
//! mimicking the accelerator's wire protocol: a 32-bit header word with
//! a parity invariant, a payload of flattened matrix values, and an
//! explicit end-of-packet marker. The consumer side re-parses that
//! format, rederives the kernel's numeric reduction (per-output-column
//! maxima of the matrix product), and renders a timestamp-annotated
//! reference trace for bit-level comparison against simulator output.
//!
//! # Architecture
//!
//! - `header`: 32-bit packet-header construction (routing id, type, parity)
//! - `framing`: packet serialization to the textual stream format
//! - `parser`: tolerant deserialization back into packets
//! - `golden`: the column-maxima reduction and golden-trace rendering
//! - `symbols`: optional packet-name-to-id table from build artifacts
//!
//! # Design principles
//!
//! - **Forward tolerance**: malformed vector files degrade to partial
//!   results plus diagnostics, never a crash; only structurally hopeless
//!   input (a missing file, an empty operand set) is an error
//! - **Explicit configuration**: tile shapes and timestamp parameters
//!   are passed into each call; no module-level state
//! - **Determinism**: identical inputs produce bit-identical outputs

pub mod error;
pub mod framing;
pub mod golden;
pub mod header;
pub mod parser;
pub mod symbols;

// Re-export commonly used types
pub use error::{Error, Result};
