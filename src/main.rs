use clap::Parser;
use colored::Colorize;
use lem_in::prelude::*;
use std::io::{self, BufWriter, Write};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::FmtSubscriber;

fn main() -> ExitCode {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{}", "logging already initialised".yellow());
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "ERROR:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let started = Instant::now();

    // Parse farm and solve it before printing anything
    let (graph, src) = parse_graph(&args.file)?;
    let selector = args.strategy.selector();
    let solution = solve(&graph, selector.as_ref())?;
    let elapsed = started.elapsed();

    let mut out = BufWriter::new(io::stdout().lock());
    if !args.quiet {
        out.write_all(src.as_bytes())?;
        if !src.ends_with('\n') {
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    write!(out, "{}", solution.record.display(&graph))?;
    out.flush()?;

    if args.summary {
        solution.print_summary(&graph, selector.as_ref(), elapsed);
    }
    Ok(())
}
