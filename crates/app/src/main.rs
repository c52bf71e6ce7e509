//! vectorgen: produce and verify packet-stream test vectors for
//! matrix-multiplication accelerator kernels.
//!
//! `gen` writes a pair of operand files: an A operand in the
//! packet-stream wire format and a B operand in the plain tiled text
//! format. `golden` re-parses those files, recomputes the kernel's
//! column-maxima reduction, and writes the timestamp-annotated golden
//! trace for bit-level comparison against simulator output.

mod config;
mod input_gen;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use tracing::info;

use config::{Config, Mode};
use vectorgen_core::{
    framing::{frame_chunks, frame_packet},
    golden::{reduce, render_golden, ReduceConfig},
    header::build_header,
    parser::{parse_matrices, parse_packets},
    symbols, Error, Result,
};

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("run with --help for usage");
            return ExitCode::FAILURE;
        }
    };

    if config.print_config {
        config.print();
    }

    let result = match config.mode {
        Mode::Gen => run_gen(&config),
        Mode::Golden => run_golden(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Generate the A packet-stream file and the B plain tiled file.
fn run_gen(config: &Config) -> Result<()> {
    let ids = match &config.symbol_table {
        Some(path) => symbols::load_first(&[path.as_path()]),
        None => symbols::load_first(&[]),
    };
    let packet_id = symbols::resolve(&ids, &config.packet_name);

    let mut rng = input_gen::rng_from_seed(config.seed);
    let a_size = config.rows_a * config.cols_a;

    let a_stream = if config.split_buffer {
        // one large buffer cut into per-packet chunks
        let values =
            input_gen::gen_tile(&mut rng, config.num_packets * config.rows_a, config.cols_a);
        frame_chunks(&values, a_size, |p| {
            build_header(config.packet_type, packet_id.wrapping_add(p as u32) as u8)
        })
    } else {
        // independent payload per packet
        let mut out = String::new();
        for p in 0..config.num_packets {
            let tile = input_gen::gen_tile(&mut rng, config.rows_a, config.cols_a);
            let header =
                build_header(config.packet_type, packet_id.wrapping_add(p as u32) as u8);
            out.push_str(&frame_packet(header, &tile));
        }
        out
    };

    // one B tile per packet, as a plain dump the simulator reads directly
    let b_values =
        input_gen::gen_tile(&mut rng, config.num_packets * config.cols_a, config.cols_b);
    let b_plain = input_gen::render_plain(&b_values, config.cols_b);

    write_file(&config.a_file, &a_stream)?;
    write_file(&config.b_file, &b_plain)?;

    info!(
        a = %config.a_file.display(),
        b = %config.b_file.display(),
        packets = config.num_packets,
        "wrote operand files"
    );
    Ok(())
}

/// Recompute the expected kernel output from the operand files and
/// write the annotated golden trace.
fn run_golden(config: &Config) -> Result<()> {
    // Mandatory inputs: a missing operand file aborts before any output
    // is written
    let a_text = read_input(&config.a_file)?;
    let b_text = read_input(&config.b_file)?;

    let a_size = config.rows_a * config.cols_a;
    let parsed = parse_packets(&a_text, a_size);
    info!(
        mode = ?parsed.report.mode,
        packets = parsed.report.packets,
        short = parsed.report.short_chunks,
        oversized = parsed.report.oversized_chunks,
        "parsed A stream"
    );

    let b_matrices = parse_matrices(&b_text, config.cols_a, config.cols_b)?;

    let reduce_config = ReduceConfig {
        rows_a: config.rows_a,
        cols_a: config.cols_a,
        cols_b: config.cols_b,
        start_ts: config.start_ts,
        ts_step: config.ts_step,
        base_timestamps: config.base_timestamps.clone(),
    };
    let records = reduce(&parsed.packets, &b_matrices, &reduce_config)?;
    write_file(&config.out_file, &render_golden(&records))?;

    println!(
        "Golden file written to {} (packets: {})",
        config.out_file.display(),
        records.len()
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::MissingInput {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, text)?;
    Ok(())
}
