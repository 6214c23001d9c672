use crate::config::LinkerKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Benchmark driver for linker scaling with symbol counts")]
pub struct Cli {
  /// Scratch directory for generated modules and link outputs.
  /// Defaults to the system temp directory.
  #[arg(long, env = "LDBENCH_WORK_DIR")]
  pub work_dir: Option<PathBuf>,

  /// Directory containing the generator, converter and linker executables.
  #[arg(long, env = "LDBENCH_BIN_DIR", default_value = "/usr/bin")]
  pub bin_dir: PathBuf,

  /// Where to write the result table; `-` means standard output.
  #[arg(short, long, default_value = "-")]
  pub output: String,

  /// Use the work directory even if it is not empty.
  #[arg(short, long)]
  pub force: bool,

  /// Step size for both symbol-count sweep axes.
  #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(1..))]
  pub increment: u32,

  /// Upper bound for the external-symbol axis.
  #[arg(long, default_value_t = 10000, value_parser = clap::value_parser!(u32).range(1..))]
  pub external: u32,

  /// Upper bound for the linkonce-symbol axis.
  #[arg(long, default_value_t = 10000, value_parser = clap::value_parser!(u32).range(1..))]
  pub linkonce: u32,

  /// Number of modules generated for every run.
  #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
  pub modules: u32,

  /// Which linker to benchmark.
  #[arg(long, value_enum, default_value_t = LinkerKind::Repo)]
  pub linker: LinkerKind,

  /// Emit results as JSON lines instead of the plain-text table.
  #[arg(long)]
  pub json: bool,

  /// Pass the external tools' stdout/stderr through instead of capturing it.
  #[arg(short, long)]
  pub verbose: bool,

  /// Print the full error chain on failure instead of a short message.
  #[arg(long)]
  pub debug: bool,
}
