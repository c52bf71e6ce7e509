//! Integration tests for the full vector pipeline: frame operand
//! matrices as a packet stream -> parse back -> reduce -> render the
//! golden trace, with hand-computed expected values.

use vectorgen_core::{
    framing::{frame_chunks, frame_packet},
    golden::{reduce, render_golden, ReduceConfig},
    header::{build_header, has_odd_parity},
    parser::{parse_matrices, parse_packets, FramingMode},
};

#[test]
fn test_full_pipeline_marker_framing() {
    let (rows_a, cols_a, cols_b) = (2, 2, 2);

    // Two A tiles framed as independent packets
    let a0 = vec![1i64, 2, 3, 4];
    let a1 = vec![2i64, 0, 1, 1];
    let h0 = build_header(0, 5);
    let h1 = build_header(0, 6);
    assert!(has_odd_parity(h0));
    assert!(has_odd_parity(h1));

    let mut stream = frame_packet(h0, &a0);
    stream.push_str(&frame_packet(h1, &a1));

    let parsed = parse_packets(&stream, rows_a * cols_a);
    assert_eq!(parsed.report.mode, FramingMode::Marker);
    assert_eq!(parsed.packets.len(), 2);
    assert_eq!(parsed.packets[0].header, i64::from(h0));
    assert_eq!(parsed.packets[0].payload, a0);

    // B operands arrive as a plain tiled file
    let b = parse_matrices("5 6 7 8\n1 0 0 1\n", cols_a, cols_b).unwrap();
    assert_eq!(b.len(), 2);

    let mut config = ReduceConfig::with_shape(rows_a, cols_a, cols_b);
    config.start_ts = 100;
    config.ts_step = 10;
    let records = reduce(&parsed.packets, &b, &config).unwrap();
    assert_eq!(records.len(), 2);
    // A0 * B0: row products 19 22 / 43 50 -> maxima [43, 50]
    assert_eq!(records[0].col_maxima, vec![43, 50]);
    // A1 * I = A1 -> column maxima [2, 1]
    assert_eq!(records[1].col_maxima, vec![2, 1]);

    let trace = render_golden(&records);
    let lines: Vec<&str> = trace.lines().collect();
    assert_eq!(
        lines,
        vec![
            "43", "T 100 ps", "50", "T 110 ps", "TLAST", "50", //
            "2", "T 120 ps", "1", "T 130 ps", "TLAST", "1",
        ]
    );
}

#[test]
fn test_full_pipeline_fixed_size_framing() {
    // Marker-less flat dump: header then payload, repeated
    let mut stream = String::new();
    for (h, tile) in [(900u32, [1i64, 2, 3, 4]), (901, [5, 6, 7, 8])] {
        stream.push_str(&h.to_string());
        stream.push('\n');
        for v in tile {
            stream.push_str(&v.to_string());
            stream.push('\n');
        }
    }
    let parsed = parse_packets(&stream, 4);
    assert_eq!(parsed.report.mode, FramingMode::FixedSize);
    assert_eq!(parsed.packets.len(), 2);
    assert_eq!(parsed.packets[0].header, 900);
    assert_eq!(parsed.packets[1].payload, vec![5, 6, 7, 8]);
}

#[test]
fn test_split_buffer_producer_round_trips() {
    // One flat buffer cut into per-packet chunks at generation time
    // comes back in order through the parser
    let values: Vec<i64> = (0..32).collect();
    let stream = frame_chunks(&values, 16, |p| build_header(0, p as u8));
    let parsed = parse_packets(&stream, 16);
    assert_eq!(parsed.packets.len(), 2);
    let recovered: Vec<i64> = parsed
        .packets
        .iter()
        .flat_map(|p| p.payload.iter().copied())
        .collect();
    assert_eq!(recovered, values);
}

#[test]
fn test_mismatched_operand_counts_reduce_prefix() {
    // Three A packets against two B matrices: exactly two records
    let mut stream = String::new();
    for p in 0..3u8 {
        stream.push_str(&frame_packet(build_header(0, p), &[i64::from(p) + 1; 4]));
    }
    let parsed = parse_packets(&stream, 4);
    assert_eq!(parsed.packets.len(), 3);

    let b = parse_matrices("1 0 0 1 2 0 0 2", 2, 2).unwrap();
    assert_eq!(b.len(), 2);

    let config = ReduceConfig::with_shape(2, 2, 2);
    let records = reduce(&parsed.packets, &b, &config).unwrap();
    assert_eq!(records.len(), 2);
    // A0 = [[1,1],[1,1]] times identity -> maxima [1, 1]
    assert_eq!(records[0].col_maxima, vec![1, 1]);
    // A1 = [[2,2],[2,2]] times 2*identity -> maxima [4, 4]
    assert_eq!(records[1].col_maxima, vec![4, 4]);
}
