//! cubegen - lattice pattern generator and .cube LUT writer
//!
//! Bakes identity LUTs over a configurable domain and inspects `.cube` files.

use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cubegen")]
#[command(author, version, about = "Lattice pattern generator and .cube LUT writer")]
#[command(long_about = "
Generates every point of an N x N x N RGB grid and writes it as a .cube 3D LUT.

Domain, precision and header comment default to the CUBE_MIN, CUBE_MAX,
CUBE_FLOAT_LENGTH and CUBE_COMMENT environment variables; flags override them.
CUBE_MIN and CUBE_MAX only take effect when both are set.
Existing output files are never overwritten.

Examples:
  cubegen identity 33 identity.33.cube
  cubegen identity 65 wide.cube --min -0.5 --max 2.0 --precision 8
  CUBE_COMMENT='logC to acesLog' cubegen identity 129 logc.cube
  cubegen info identity.33.cube
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake an identity LUT over the lattice
    #[command(visible_alias = "id")]
    Identity(IdentityArgs),

    /// Show .cube header and entry count
    #[command(visible_alias = "i")]
    Info(InfoArgs),
}

#[derive(Args)]
struct IdentityArgs {
    /// Grid resolution (samples per channel)
    size: String,

    /// Output .cube file (must not exist)
    output: PathBuf,

    /// Domain minimum (overrides CUBE_MIN)
    #[arg(long, allow_negative_numbers = true)]
    min: Option<f32>,

    /// Domain maximum (overrides CUBE_MAX)
    #[arg(long, allow_negative_numbers = true)]
    max: Option<f32>,

    /// Fractional digits per value, at most 32 (overrides CUBE_FLOAT_LENGTH)
    #[arg(short, long)]
    precision: Option<usize>,

    /// Header comment (overrides CUBE_COMMENT)
    #[arg(short, long)]
    comment: Option<String>,

    /// Largest accepted grid resolution (3..=3000)
    #[arg(
        long,
        default_value_t = cubegen_lut::DEFAULT_MAX_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new()
            .range(cubegen_lut::MIN_SIZE as u64..=cubegen_lut::ABSOLUTE_MAX_SIZE as u64)
    )]
    max_size: usize,
}

#[derive(Args)]
struct InfoArgs {
    /// Input .cube file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Identity(args) => commands::identity::run(args, cli.verbose),
        Commands::Info(args) => commands::info::run(args, cli.verbose),
    }
}

/// One-line diagnostic printed for a failed command.
fn diagnostic(err: &anyhow::Error) -> String {
    // `{:#}` joins the context chain with ": "; newlines inside messages are flattened.
    format!("ERROR: {:#}", err).replace('\n', " ")
}

/// Process exit status for a command result.
fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = run(cli);
    if let Err(err) = &result {
        eprintln!("{}", diagnostic(err));
    }
    ExitCode::from(exit_status(&result))
}
