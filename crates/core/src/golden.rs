//! Golden-result computation.
//!
//! The kernel under test does not emit the plain matrix product: for
//! each A-packet / B-matrix pair it reduces the product to per-column
//! maxima: for every output column j, the maximum over rows r of
//! `(row r of A) · (column j of B)`. This module recomputes that
//! reduction and renders the reference trace the simulator output is
//! diffed against bit for bit, annotated with synthetic timestamps.

use tracing::warn;

use crate::error::{ReduceError, Result};
use crate::framing::MARKER;
use crate::parser::Packet;

/// Default first-value timestamp, picoseconds.
pub const DEFAULT_START_TS: u64 = 6_553_600;
/// Default per-value timestamp step, picoseconds.
pub const DEFAULT_TS_STEP: u64 = 28_800;

/// Shape and timing configuration for one reduction run.
///
/// Everything is explicit per call: multiple kernel shapes are
/// exercised across a suite, so nothing lives in module state.
#[derive(Debug, Clone)]
pub struct ReduceConfig {
    /// Rows of each A tile.
    pub rows_a: usize,
    /// Columns of each A tile (= rows of each B tile).
    pub cols_a: usize,
    /// Columns of each B tile (= values per golden record).
    pub cols_b: usize,
    /// First timestamp of packet 0 when no explicit bases are given.
    pub start_ts: u64,
    /// Timestamp advance per output value.
    pub ts_step: u64,
    /// Optional explicit base timestamp per packet. When shorter than
    /// the packet count, the last entry is replicated; when empty,
    /// bases are derived so consecutive packet blocks do not overlap.
    pub base_timestamps: Vec<u64>,
}

impl ReduceConfig {
    /// Configuration with default timing for the given tile shape.
    pub fn with_shape(rows_a: usize, cols_a: usize, cols_b: usize) -> Self {
        Self {
            rows_a,
            cols_a,
            cols_b,
            start_ts: DEFAULT_START_TS,
            ts_step: DEFAULT_TS_STEP,
            base_timestamps: Vec::new(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.rows_a == 0 || self.cols_a == 0 || self.cols_b == 0 {
            return Err(ReduceError::InvalidShape {
                rows_a: self.rows_a,
                cols_a: self.cols_a,
                cols_b: self.cols_b,
            }
            .into());
        }
        Ok(())
    }

    /// Base timestamp for packet `p`.
    fn base_for(&self, p: usize) -> u64 {
        match self.base_timestamps.last() {
            Some(last) => *self.base_timestamps.get(p).unwrap_or(last),
            None => self.start_ts + p as u64 * self.ts_step * self.cols_b as u64,
        }
    }
}

/// One packet's worth of golden output: a column maximum and its
/// timestamp per output column. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenRecord {
    pub col_maxima: Vec<i64>,
    pub timestamps: Vec<u64>,
}

/// Per-column maxima of the product of one A tile and one B tile.
///
/// `a` is `rows_a x cols_a` row-major, `b` is `cols_a x cols_b`
/// row-major. For output column j the result is
/// `max over r of sum_k a[r][k] * b[k][j]`: the column-wise maximum of
/// the matrix product, not the product matrix itself.
pub fn column_maxima(a: &[i64], b: &[i64], rows_a: usize, cols_a: usize, cols_b: usize) -> Vec<i64> {
    let mut col_max = vec![i64::MIN; cols_b];
    for r in 0..rows_a {
        let row = &a[r * cols_a..(r + 1) * cols_a];
        for (j, slot) in col_max.iter_mut().enumerate() {
            let mut dot = 0i64;
            for (k, &av) in row.iter().enumerate() {
                dot += av * b[k * cols_b + j];
            }
            if dot > *slot {
                *slot = dot;
            }
        }
    }
    col_max
}

/// Reduce paired operand streams into golden records.
///
/// The i-th A packet pairs with the i-th B matrix; a count mismatch is
/// a warning and only the overlapping prefix is processed. A packet
/// whose payload does not hold a full `rows_a x cols_a` tile is skipped
/// with a diagnostic. An empty operand set on either side is fatal.
pub fn reduce(
    a_packets: &[Packet],
    b_matrices: &[Vec<i64>],
    config: &ReduceConfig,
) -> Result<Vec<GoldenRecord>> {
    config.validate()?;
    if a_packets.is_empty() {
        return Err(ReduceError::NoOperands { side: "A" }.into());
    }
    if b_matrices.is_empty() {
        return Err(ReduceError::NoOperands { side: "B" }.into());
    }
    let pairs = a_packets.len().min(b_matrices.len());
    if a_packets.len() != b_matrices.len() {
        warn!(
            a = a_packets.len(),
            b = b_matrices.len(),
            using = pairs,
            "A/B stream lengths differ; reducing the overlapping prefix"
        );
    }

    let a_size = config.rows_a * config.cols_a;
    let b_size = config.cols_a * config.cols_b;
    let mut records = Vec::with_capacity(pairs);
    for p in 0..pairs {
        let a = &a_packets[p].payload;
        let b = &b_matrices[p];
        if a.len() < a_size || b.len() < b_size {
            warn!(packet = p, a_len = a.len(), b_len = b.len(), "operand smaller than tile; skipped");
            continue;
        }
        let col_maxima = column_maxima(
            &a[..a_size],
            &b[..b_size],
            config.rows_a,
            config.cols_a,
            config.cols_b,
        );
        let base = config.base_for(p);
        let timestamps = (0..config.cols_b as u64).map(|j| base + j * config.ts_step).collect();
        records.push(GoldenRecord { col_maxima, timestamps });
    }
    Ok(records)
}

/// Render records as the golden trace text.
///
/// Per packet: each column maximum on its own line followed by a
/// `T <timestamp> ps` line, then the end marker, then a repeated copy
/// of the final value, mirroring the encoder's marker-before-
/// trailing-value convention so the trace diffs cleanly against
/// simulator output.
pub fn render_golden(records: &[GoldenRecord]) -> String {
    let mut out = String::new();
    for record in records {
        for (v, ts) in record.col_maxima.iter().zip(&record.timestamps) {
            out.push_str(&v.to_string());
            out.push('\n');
            out.push_str("T ");
            out.push_str(&ts.to_string());
            out.push_str(" ps\n");
        }
        if let Some(last) = record.col_maxima.last() {
            out.push_str(MARKER);
            out.push('\n');
            out.push_str(&last.to_string());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packet(payload: Vec<i64>) -> Packet {
        Packet {
            header: 0x8FFF_0000,
            payload,
        }
    }

    #[test]
    fn test_column_maxima_concrete() {
        // A = [[1,2],[3,4]], B = [[5,6],[7,8]]
        // row dot products: 19 22 / 43 50 -> column maxima [43, 50]
        let maxima = column_maxima(&[1, 2, 3, 4], &[5, 6, 7, 8], 2, 2, 2);
        assert_eq!(maxima, vec![43, 50]);
    }

    #[test]
    fn test_column_maxima_all_negative() {
        // row0: -19 -22, row1: -43 -50 -> maxima come from row 0
        let maxima = column_maxima(&[-1, -2, -3, -4], &[5, 6, 7, 8], 2, 2, 2);
        assert_eq!(maxima, vec![-19, -22]);
    }

    #[test]
    fn test_reduce_count_mismatch_uses_prefix() {
        let a: Vec<Packet> = (0..3).map(|i| packet(vec![i64::from(i); 4])).collect();
        let b = vec![vec![1i64; 4], vec![2; 4]];
        let config = ReduceConfig::with_shape(2, 2, 2);
        let records = reduce(&a, &b, &config).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_reduce_empty_side_is_fatal() {
        let config = ReduceConfig::with_shape(2, 2, 2);
        assert!(reduce(&[], &[vec![1; 4]], &config).is_err());
        assert!(reduce(&[packet(vec![1; 4])], &[], &config).is_err());
    }

    #[test]
    fn test_zero_shape_rejected() {
        let config = ReduceConfig::with_shape(0, 2, 2);
        let a = [packet(vec![1; 4])];
        let b = [vec![1i64; 4]];
        assert!(reduce(&a, &b, &config).is_err());
    }

    #[test]
    fn test_undersized_payload_skipped() {
        let a = vec![packet(vec![1, 2, 3, 4]), packet(vec![9])];
        let b = vec![vec![1i64; 4]; 2];
        let config = ReduceConfig::with_shape(2, 2, 2);
        let records = reduce(&a, &b, &config).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_timestamp_sequencing_derived_bases() {
        let a: Vec<Packet> = (0..2).map(|_| packet(vec![1; 4])).collect();
        let b = vec![vec![1i64; 16]; 2];
        let config = ReduceConfig::with_shape(2, 2, 8);
        let records = reduce(&a, &b, &config).unwrap();
        // packet 1 starts one full block (cols_b * step) after packet 0
        assert_eq!(records[0].timestamps[0], 6_553_600);
        assert_eq!(records[0].timestamps[1], 6_553_600 + 28_800);
        assert_eq!(records[1].timestamps[0], 6_784_000);
    }

    #[test]
    fn test_explicit_bases_extended_with_last() {
        let a: Vec<Packet> = (0..3).map(|_| packet(vec![1; 4])).collect();
        let b = vec![vec![1i64; 4]; 3];
        let mut config = ReduceConfig::with_shape(2, 2, 2);
        config.ts_step = 10;
        config.base_timestamps = vec![100, 200];
        let records = reduce(&a, &b, &config).unwrap();
        assert_eq!(records[0].timestamps, vec![100, 110]);
        assert_eq!(records[1].timestamps[0], 200);
        assert_eq!(records[2].timestamps[0], 200); // last base replicated
    }

    #[test]
    fn test_render_golden_format() {
        let records = vec![GoldenRecord {
            col_maxima: vec![43, 50],
            timestamps: vec![100, 128],
        }];
        let trace = render_golden(&records);
        let lines: Vec<&str> = trace.lines().collect();
        assert_eq!(lines, vec!["43", "T 100 ps", "50", "T 128 ps", "TLAST", "50"]);
    }
}
