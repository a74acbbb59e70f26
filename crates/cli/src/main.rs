//! clockbus simulator CLI.
//!
//! This binary drives the simulator from the command line. It performs:
//! 1. **Default run:** With no subcommand, runs the built-in sample program.
//! 2. **Run:** Executes a program image until HALT, with configuration overrides.
//! 3. **Disassembly:** Prints a program image as instructions and data.
//!
//! Trace lines (`PRINT: <n>`, `HALT`) go to stdout; logs, statistics, and
//! diagnostics go to stderr. Set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see
//! instruction dispatch and memory commits.

use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use clockbus_core::config::{Config, ContentionPolicy};
use clockbus_core::isa::disasm::disassemble;
use clockbus_core::sim::loader;
use clockbus_core::sim::{RunOutcome, Simulator, TraceSink, WriterSink};
use clockbus_core::{SAMPLE_PROGRAM, SimError};

/// Exit code when the tick limit stops a run before HALT.
const EXIT_TICK_LIMIT: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sim",
    author,
    version,
    about = "Cycle-accurate CPU/memory/bus simulator",
    long_about = "Run a program image on a minimal CPU and memory sharing a synchronous bus, one clock tick at a time.\n\nWith no subcommand the built-in sample program (42 + 73) is run.\n\nExamples:\n  sim\n  sim run programs/add.txt --stats\n  sim run image.bin --max-ticks 10000 --deny-contention\n  sim disasm programs/add.txt"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program image until HALT.
    Run(RunArgs),

    /// Disassemble a program image.
    Disasm {
        /// Program image; defaults to the built-in sample program.
        program: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
struct RunArgs {
    /// Program image: `.bin` files are raw bytes, anything else is text.
    /// Defaults to the built-in sample program.
    program: Option<PathBuf>,

    /// JSON configuration file; flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks if HALT has not executed.
    #[arg(long)]
    max_ticks: Option<u64>,

    /// Memory size in bytes; the image is zero-padded up to it.
    #[arg(long)]
    memory_size: Option<usize>,

    /// Treat two components driving one bus line in a tick as fatal.
    #[arg(long)]
    deny_contention: bool,

    /// Print run statistics to stderr.
    #[arg(long)]
    stats: bool,

    /// Print the final machine state as JSON to stderr.
    #[arg(long)]
    dump_state: bool,
}

fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    let result = match cli.command {
        Some(Commands::Run(args)) => cmd_run(&args),
        Some(Commands::Disasm { program }) => cmd_disasm(program.as_deref()),
        None => cmd_run(&RunArgs::default()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!("execution stopped: {e}");
            eprintln!("\n[!] FATAL: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_logging() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn load_program(path: Option<&Path>) -> Result<Vec<u8>, SimError> {
    match path {
        Some(path) => loader::load_image(path),
        None => Ok(SAMPLE_PROGRAM.to_vec()),
    }
}

/// Builds the configuration from the optional file plus flag overrides.
fn build_config(args: &RunArgs) -> Result<Config, SimError> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(max_ticks) = args.max_ticks {
        config.general.max_ticks = Some(max_ticks);
    }
    if let Some(memory_size) = args.memory_size {
        config.system.memory_size = Some(memory_size);
    }
    if args.deny_contention {
        config.bus.contention = ContentionPolicy::Deny;
    }
    Ok(config)
}

/// Runs a program until HALT, a fault, or the tick limit.
///
/// On a fault the machine state is dumped to stderr before the error is
/// returned.
fn cmd_run(args: &RunArgs) -> Result<ExitCode, Box<dyn Error>> {
    let config = build_config(args)?;
    let image = load_program(args.program.as_deref())?;

    let sink: Box<dyn TraceSink> = if config.general.trace_to_stderr {
        Box::new(WriterSink::new(io::stderr()))
    } else {
        Box::new(WriterSink::new(io::stdout()))
    };
    let mut sim = Simulator::new(&config, &image)?.with_sink(sink);
    info!(len = image.len(), "program loaded");

    let outcome = sim.run();
    if outcome.is_err() {
        sim.state().dump();
    }
    if args.dump_state {
        eprintln!("{}", serde_json::to_string_pretty(sim.state())?);
    }
    if args.stats {
        sim.stats().print();
    }

    match outcome? {
        RunOutcome::Halted { ticks } => {
            info!(ticks, "halted");
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::TickLimit { ticks } => {
            eprintln!("[!] stopped after {ticks} ticks without reaching HALT");
            Ok(ExitCode::from(EXIT_TICK_LIMIT))
        }
    }
}

fn cmd_disasm(program: Option<&Path>) -> Result<ExitCode, Box<dyn Error>> {
    let image = load_program(program)?;
    for line in disassemble(&image) {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}
