mod config;
mod discover;
mod emit;
mod error;
mod job;
mod listing;
mod msg;

use std::path::PathBuf;
use std::process::ExitCode;

use color_print::cprintln;
use indexmap::IndexMap;

use config::Config;
use error::Error;
use job::{Job, Summary};
use msg::Msg;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input symbol files. When omitted, every *.SYC file in --dir is processed
    input: Vec<PathBuf>,

    /// Directory searched for symbol files
    #[clap(short, long, default_value = ".")]
    dir: PathBuf,

    /// Output directory [default: next to each input]
    #[clap(short, long)]
    out_dir: Option<PathBuf>,

    /// Emitter config (YAML)
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Print the decoded symbol listing
    #[clap(short, long)]
    listing: bool,

    /// Do not write the register definitions (.inc)
    #[clap(long)]
    no_registers: bool,

    /// Do not write the type templates (_template.inc)
    #[clap(long)]
    no_templates: bool,

    /// More log output (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    init_tracing(args.verbose);
    println!("SYC to ebusd converter");

    let config = match Config::arg(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            Msg::error_chain(&err);
            return ExitCode::FAILURE;
        }
    };

    let inputs = if args.input.is_empty() {
        match discover::find_symbol_files(&args.dir) {
            Ok(files) => files,
            Err(err) => {
                Msg::error_chain(&err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        args.input.clone()
    };

    if inputs.is_empty() {
        Msg::Warn(format!("No .SYC files found in {}", args.dir.display())).print();
        return ExitCode::SUCCESS;
    }
    println!("Found {} symbol files. Starting batch processing...", inputs.len());

    let job = Job {
        config: &config,
        out_dir: args.out_dir.as_deref(),
        listing: args.listing,
        registers: !args.no_registers,
        templates: !args.no_templates,
    };

    let mut results: IndexMap<PathBuf, Result<Summary, Error>> = IndexMap::new();
    for input in inputs {
        cprintln!("\nProcessing <bold>{}</>...", input.display());
        let result = job.run(&input);
        match &result {
            Ok(summary) if args.verbose > 0 => report(&input, summary),
            Ok(_) => {}
            Err(err) => Msg::error_chain(err),
        }
        results.insert(input, result);
    }

    let failed: Vec<_> = results
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(path, _)| path)
        .collect();
    println!();
    if failed.is_empty() {
        cprintln!("<green,bold>All {} files processed successfully!</>", results.len());
        ExitCode::SUCCESS
    } else {
        for path in &failed {
            Msg::Error("Not converted".to_string()).diag(path);
        }
        cprintln!("<red,bold>{} of {} files failed</>", failed.len(), results.len());
        ExitCode::FAILURE
    }
}

fn report(input: &std::path::Path, summary: &Summary) {
    for symbol in &summary.dropped {
        Msg::Warn(format!(
            "Re-defined symbol `{}` ({} 0x{:04X}) ignored, the first definition is kept",
            symbol.name, symbol.section, symbol.address
        ))
        .diag(input);
    }
    for (alias, first) in &summary.aliases {
        Msg::Note(format!("`{}` addresses the same cell as `{}`", alias, first)).diag(input);
    }
    println!(
        "  {} records decoded, {} registers, {} aliases, {} dropped, {} templates, {} files written",
        summary.decoded,
        summary.registers,
        summary.aliases.len(),
        summary.dropped.len(),
        summary.templates,
        summary.outputs.len()
    );
}
