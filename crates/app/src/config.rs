//! Configuration for the vectorgen application.
//!
//! Handles parsing command-line arguments and generating sensible
//! defaults. The tool works with just a mode argument; all defaults are
//! printed on request so runs are reproducible.

use std::path::PathBuf;

use vectorgen_core::golden::{DEFAULT_START_TS, DEFAULT_TS_STEP};

/// What the run does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Produce operand files: an A packet stream and a B plain tile dump
    Gen,
    /// Re-parse the operand files and write the golden trace
    Golden,
}

/// Complete configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,

    // === Files ===
    /// A operand: packet-stream file
    pub a_file: PathBuf,

    /// B operand: plain tiled file
    pub b_file: PathBuf,

    /// Golden trace output
    pub out_file: PathBuf,

    // === Tile shape ===
    pub rows_a: usize,
    pub cols_a: usize,
    pub cols_b: usize,

    // === Generation ===
    /// Packets to generate
    pub num_packets: usize,

    /// RNG seed
    pub seed: u64,

    /// Packet type field for generated headers
    pub packet_type: u8,

    /// Symbolic packet name resolved through the id table
    pub packet_name: String,

    /// Packet-id table path (a build artifact; optional)
    pub symbol_table: Option<PathBuf>,

    /// Split one flat buffer across packets instead of generating a
    /// fresh payload per packet
    pub split_buffer: bool,

    // === Timestamps ===
    pub start_ts: u64,
    pub ts_step: u64,

    /// Explicit per-packet base timestamps (overrides start-ts spacing)
    pub base_timestamps: Vec<u64>,

    // === Behavior ===
    pub print_config: bool,
}

impl Config {
    /// Parse configuration from command-line arguments.
    ///
    /// The first positional argument selects the mode (`gen` or
    /// `golden`). If no seed is provided, a time-based seed is used and
    /// printed for reproducibility.
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let mut mode: Option<Mode> = None;
        let mut a_file: Option<PathBuf> = None;
        let mut b_file: Option<PathBuf> = None;
        let mut out_file: Option<PathBuf> = None;
        let mut rows_a: Option<usize> = None;
        let mut cols_a: Option<usize> = None;
        let mut cols_b: Option<usize> = None;
        let mut num_packets: Option<usize> = None;
        let mut seed: Option<u64> = None;
        let mut packet_type: Option<u8> = None;
        let mut packet_name: Option<String> = None;
        let mut symbol_table: Option<PathBuf> = None;
        let mut split_buffer = false;
        let mut start_ts: Option<u64> = None;
        let mut ts_step: Option<u64> = None;
        let mut base_timestamps: Vec<u64> = Vec::new();
        let mut print_config = false;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "gen" if mode.is_none() => {
                    mode = Some(Mode::Gen);
                }
                "golden" if mode.is_none() => {
                    mode = Some(Mode::Golden);
                }
                "--a" => {
                    a_file = Some(PathBuf::from(take_value(args, &mut i, "--a")?));
                }
                "--b" => {
                    b_file = Some(PathBuf::from(take_value(args, &mut i, "--b")?));
                }
                "--out" => {
                    out_file = Some(PathBuf::from(take_value(args, &mut i, "--out")?));
                }
                "--rows-a" => {
                    rows_a = Some(parse_num(take_value(args, &mut i, "--rows-a")?, "--rows-a")?);
                }
                "--cols-a" => {
                    cols_a = Some(parse_num(take_value(args, &mut i, "--cols-a")?, "--cols-a")?);
                }
                "--cols-b" => {
                    cols_b = Some(parse_num(take_value(args, &mut i, "--cols-b")?, "--cols-b")?);
                }
                "--packets" => {
                    num_packets = Some(parse_num(take_value(args, &mut i, "--packets")?, "--packets")?);
                }
                "--seed" => {
                    seed = Some(parse_num(take_value(args, &mut i, "--seed")?, "--seed")?);
                }
                "--packet-type" => {
                    packet_type =
                        Some(parse_num(take_value(args, &mut i, "--packet-type")?, "--packet-type")?);
                }
                "--packet-name" => {
                    packet_name = Some(take_value(args, &mut i, "--packet-name")?.to_string());
                }
                "--id-table" => {
                    symbol_table = Some(PathBuf::from(take_value(args, &mut i, "--id-table")?));
                }
                "--split-buffer" => {
                    split_buffer = true;
                }
                "--start-ts" => {
                    start_ts = Some(parse_num(take_value(args, &mut i, "--start-ts")?, "--start-ts")?);
                }
                "--ts-step" => {
                    ts_step = Some(parse_num(take_value(args, &mut i, "--ts-step")?, "--ts-step")?);
                }
                "--base-ts" => {
                    for part in take_value(args, &mut i, "--base-ts")?.split(',') {
                        base_timestamps.push(parse_num(part, "--base-ts")?);
                    }
                }
                "--print-config" => {
                    print_config = true;
                }
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    return Err(format!("unknown argument: {other}"));
                }
            }
            i += 1;
        }

        let mode = mode.ok_or("expected a mode: gen or golden")?;

        let rows_a = rows_a.unwrap_or(16);
        let cols_a = cols_a.unwrap_or(8);
        let cols_b = cols_b.unwrap_or(8);
        if rows_a == 0 || cols_a == 0 || cols_b == 0 {
            return Err(format!("tile shape must be non-zero: {rows_a}x{cols_a}x{cols_b}"));
        }

        // Determine seed (explicit or time-based)
        let seed = seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|t| t.as_millis() as u64)
                .unwrap_or(0)
        });

        Ok(Config {
            mode,
            a_file: a_file.unwrap_or_else(|| PathBuf::from("data/input0.seq")),
            b_file: b_file.unwrap_or_else(|| PathBuf::from("data/input1.txt")),
            out_file: out_file.unwrap_or_else(|| PathBuf::from("output1golden.txt")),
            rows_a,
            cols_a,
            cols_b,
            num_packets: num_packets.unwrap_or(3),
            seed,
            packet_type: packet_type.unwrap_or(0),
            packet_name: packet_name.unwrap_or_else(|| "DataInFP_A_0".to_string()),
            symbol_table,
            split_buffer,
            start_ts: start_ts.unwrap_or(DEFAULT_START_TS),
            ts_step: ts_step.unwrap_or(DEFAULT_TS_STEP),
            base_timestamps,
            print_config,
        })
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Mode: {:?}", self.mode);
        println!("A stream:  {}", self.a_file.display());
        println!("B tiles:   {}", self.b_file.display());
        println!("Golden:    {}", self.out_file.display());
        println!();
        println!("Tile shape: A {}x{}, B {}x{}", self.rows_a, self.cols_a, self.cols_a, self.cols_b);
        println!("Packets: {}", self.num_packets);
        println!("Seed: {}", self.seed);
        println!("Packet type: {}", self.packet_type);
        println!("Packet name: {}", self.packet_name);
        match &self.symbol_table {
            Some(path) => println!("Id table: {}", path.display()),
            None => println!("Id table: (search defaults)"),
        }
        println!("Split buffer: {}", self.split_buffer);
        println!();
        println!("=== Timestamps ===");
        println!("Start: {} ps", self.start_ts);
        println!("Step:  {} ps", self.ts_step);
        if !self.base_timestamps.is_empty() {
            println!("Explicit bases: {:?}", self.base_timestamps);
        }
        println!();
    }
}

fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn parse_num<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.parse().map_err(|_| format!("invalid {flag}: {raw}"))
}

fn print_help() {
    println!("vectorgen: packet-stream test vectors and golden traces for matmul kernels");
    println!();
    println!("USAGE:");
    println!("    vectorgen <gen|golden> [OPTIONS]");
    println!();
    println!("MODES:");
    println!("    gen       Generate the A packet-stream file and B plain tile file");
    println!("    golden    Re-parse the operands and write the golden trace");
    println!();
    println!("OPTIONS:");
    println!("    --a <PATH>            A packet-stream file (default: data/input0.seq)");
    println!("    --b <PATH>            B plain tile file (default: data/input1.txt)");
    println!("    --out <PATH>          Golden trace output (default: output1golden.txt)");
    println!();
    println!("    --rows-a <N>          Rows per A tile (default: 16)");
    println!("    --cols-a <N>          Cols per A tile = rows per B tile (default: 8)");
    println!("    --cols-b <N>          Cols per B tile (default: 8)");
    println!();
    println!("    --packets <N>         Packets to generate (default: 3)");
    println!("    --seed <N>            RNG seed (default: time-based)");
    println!("    --packet-type <N>     Header packet-type field (default: 0)");
    println!("    --packet-name <NAME>  Name resolved through the id table");
    println!("    --id-table <PATH>     packet_ids_c.h build artifact");
    println!("    --split-buffer        Split one buffer across packets");
    println!();
    println!("    --start-ts <PS>       First timestamp (default: 6553600)");
    println!("    --ts-step <PS>        Per-value timestamp step (default: 28800)");
    println!("    --base-ts <PS,PS,..>  Explicit per-packet base timestamps");
    println!();
    println!("    --print-config        Print resolved configuration");
    println!("    --help, -h            Print this help");
    println!();
    println!("EXAMPLES:");
    println!("    vectorgen gen --seed 42 --packets 6");
    println!("    vectorgen golden --rows-a 16 --cols-a 8 --cols-b 8");
    println!();
}
