// Licensed under the Apache-2.0 license

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod regmap_gen;

use regmap_gen::Artifacts;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Xtask {
    #[command(subcommand)]
    xtask: Commands,

    /// Log every parsed register and field
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C++ component source and the golden reset-value header
    RegmapGen(RegmapArgs),

    /// Generate only the C++ component source
    RegmapCpp(RegmapArgs),

    /// Generate only the golden reset-value header
    RegmapGolden(RegmapArgs),
}

#[derive(Args)]
struct RegmapArgs {
    /// Register map description file
    input: PathBuf,

    /// Directory the generated files are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// TOML file with compiler settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Register width in bytes (1 or 2)
    #[arg(long)]
    byte_width: Option<u8>,

    /// Alignment applied to the first register address to get the base address
    #[arg(long, value_parser = parse_int_arg)]
    base_align: Option<u64>,
}

fn parse_int_arg(s: &str) -> Result<u64, String> {
    mcu_regmap_compiler::lexer::parse_int(s, 0)
        .map_err(|_| format!("`{s}` is not a decimal or 0x-prefixed hex integer"))
}

fn run(args: &RegmapArgs, artifacts: Artifacts) -> Result<()> {
    let config = regmap_gen::load_config(args.config.as_deref(), args.byte_width, args.base_align)?;
    regmap_gen::generate(&args.input, &args.out_dir, &config, artifacts)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Xtask::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init()?;

    match &cli.xtask {
        Commands::RegmapGen(args) => run(args, Artifacts::Both),
        Commands::RegmapCpp(args) => run(args, Artifacts::Source),
        Commands::RegmapGolden(args) => run(args, Artifacts::Golden),
    }
}
