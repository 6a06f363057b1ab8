//! Reads a pipe table and a manhole table, picks the manholes worth
//! drawing, and writes `original_pipes.csv`, `simplified_manholes.csv` and
//! `simplified_pipes.csv`.
//!
//! ```sh
//! cargo run --example simplify-csv -- --pipes pipes.csv --manholes mh.csv --out out/
//! ```
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use sewergrid::read;
use sewergrid::write;
use sewergrid::{simplify, CyclePolicy, SimplifyOptions, TableOptions};

#[derive(Parser, Debug)]
#[command(name = "simplify-csv")]
#[command(about = "Thin out sewer manholes for display")]
struct Args {
    /// Pipe table (needs "Start Node" and "Stop Node" columns)
    #[arg(long)]
    pipes: PathBuf,

    /// Manhole table (needs "Label", "X (m)" and "Y (m)" columns)
    #[arg(long)]
    manholes: PathBuf,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Text encoding of both tables (WHATWG label)
    #[arg(long, default_value = "utf-8")]
    encoding: String,

    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Keep every Nth manhole along a run
    #[arg(long, default_value_t = NonZeroUsize::new(4).unwrap())]
    interval: NonZeroUsize,

    /// Drop loops that have no branch or dead end on them
    #[arg(long)]
    omit_isolated_cycles: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail<E: std::fmt::Display>(err: E) -> ! {
    eprintln!("{}", err);
    process::exit(1);
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let table_options = TableOptions {
        encoding: args.encoding.clone(),
        delimiter: args.delimiter,
        ..TableOptions::default()
    };
    let simplify_options = SimplifyOptions {
        sample_interval: args.interval,
        cycles: if args.omit_isolated_cycles { CyclePolicy::Omit } else { CyclePolicy::Anchor },
    };

    let pipe_table = read::open(&args.pipes, &table_options).unwrap_or_else(|e| fail(e));
    let manhole_table = read::open(&args.manholes, &table_options).unwrap_or_else(|e| fail(e));

    let pipes = read::pipes(&pipe_table, &table_options.columns).unwrap_or_else(|e| fail(e));
    let manholes = read::manholes(&manhole_table, &table_options.columns).unwrap_or_else(|e| fail(e));

    let simplification = simplify(&read::pipe_list(&pipes.records), &simplify_options);

    let paths = write::write_outputs(
        &args.out,
        &pipe_table,
        &pipes.records,
        &manhole_table,
        &manholes.records,
        &simplification,
    ).unwrap_or_else(|e| fail(e));

    let stats = simplification.stats;
    println!("Pipes: {} ({} skipped)", pipe_table.len(), pipes.rejected.len());
    println!("Manholes: {} ({} skipped)", manhole_table.len(), manholes.rejected.len());
    println!("Junctions: {}, chains: {}", stats.n_junctions, stats.n_chains);
    println!("Manholes to display: {}", stats.n_necessary);
    println!("Pipes between displayed manholes: {}", stats.n_output_pipes);
    println!("Wrote {}", paths.original_pipes.display());
    println!("Wrote {}", paths.simplified_manholes.display());
    println!("Wrote {}", paths.simplified_pipes.display());
}
