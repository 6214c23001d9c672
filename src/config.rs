use crate::cli::Cli;
use crate::error::ConfigError;
use crate::grid::GridPoint;
use clap::ValueEnum;
use std::env;
use std::fs;
use std::path::PathBuf;

// --- Default Values ---
fn default_work_dir() -> PathBuf {
  env::temp_dir()
}

/// File name of the repository database the repo-aware linker keeps in the
/// work directory.
pub const DEFAULT_DB_NAME: &str = "repo.db";

/// File name of the linked output inside the work directory.
pub const LINK_OUTPUT_NAME: &str = "linked.out";

/// Which linker consumes the generated modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkerKind {
  /// Repo-aware linker; consumes ticket files directly.
  Repo,
  /// Traditional linker; tickets are first converted to object files.
  Traditional,
}

/// Fully validated and resolved sweep configuration.
#[derive(Debug)]
pub struct SweepConfig {
  pub work_dir: PathBuf,
  pub bin_dir: PathBuf,
  pub output: String,
  pub db_name: String,
  pub increment: u32,
  pub external_max: u32,
  pub linkonce_max: u32,
  pub module_count: u32,
  pub linker: LinkerKind,
  pub json: bool,
  pub verbose: bool,
}

/// Configuration for one benchmark iteration at a single grid point.
///
/// Constructed fresh from the sweep configuration for every grid point, so
/// no component ever reads mutable process-wide state.
#[derive(Debug, Clone)]
pub struct RunConfig {
  pub bin_dir: PathBuf,
  pub work_dir: PathBuf,
  pub db_name: String,
  pub module_count: u32,
  pub external_symbols: u32,
  pub linkonce_symbols: u32,
  pub linker: LinkerKind,
  pub verbose: bool,
}

impl SweepConfig {
  /// Builds the per-run configuration for one grid point.
  pub fn run_config(&self, point: &GridPoint) -> RunConfig {
    RunConfig {
      bin_dir: self.bin_dir.clone(),
      work_dir: self.work_dir.clone(),
      db_name: self.db_name.clone(),
      module_count: self.module_count,
      external_symbols: point.external,
      linkonce_symbols: point.linkonce,
      linker: self.linker,
      verbose: self.verbose,
    }
  }
}

impl TryFrom<Cli> for SweepConfig {
  type Error = ConfigError;

  fn try_from(
    Cli {
      work_dir,
      bin_dir,
      output,
      force,
      increment,
      external,
      linkonce,
      modules,
      linker,
      json,
      verbose,
      debug: _,
    }: Cli,
  ) -> Result<Self, Self::Error> {
    let work_dir = work_dir.unwrap_or_else(default_work_dir);

    if !work_dir.exists() {
      return Err(ConfigError::WorkDirNotFound(work_dir));
    }
    if !work_dir.is_dir() {
      return Err(ConfigError::WorkDirNotADirectory(work_dir));
    }
    if !force {
      let mut entries = fs::read_dir(&work_dir).map_err(|source| ConfigError::InspectWorkDir {
        path: work_dir.clone(),
        source,
      })?;
      if entries.next().is_some() {
        return Err(ConfigError::WorkDirNotEmpty(work_dir));
      }
    }

    Ok(SweepConfig {
      work_dir,
      bin_dir,
      output,
      db_name: DEFAULT_DB_NAME.to_string(),
      increment,
      external_max: external,
      linkonce_max: linkonce,
      module_count: modules,
      linker,
      json,
      verbose,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use clap::Parser;

  fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["ldbench"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
  }

  #[test]
  fn missing_work_dir_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let gone = temp.path().join("does-not-exist");
    let cli = cli(&["--work-dir", gone.to_str().unwrap()]);

    let err = SweepConfig::try_from(cli).unwrap_err();
    assert!(matches!(err, ConfigError::WorkDirNotFound(path) if path == gone));
  }

  #[test]
  fn nonempty_work_dir_needs_force() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("leftover.txt"), "x").unwrap();
    let dir = temp.path().to_str().unwrap().to_string();

    let err = SweepConfig::try_from(cli(&["--work-dir", dir.as_str()])).unwrap_err();
    assert!(matches!(err, ConfigError::WorkDirNotEmpty(_)));

    let config = SweepConfig::try_from(cli(&["--work-dir", dir.as_str(), "--force"])).unwrap();
    assert_eq!(config.work_dir, temp.path());
  }

  #[test]
  fn run_config_carries_the_grid_point() {
    let temp = tempfile::tempdir().unwrap();
    let config = SweepConfig::try_from(cli(&[
      "--work-dir",
      temp.path().to_str().unwrap(),
      "--modules",
      "7",
      "--linker",
      "traditional",
    ]))
    .unwrap();

    let run = config.run_config(&GridPoint {
      external: 2000,
      linkonce: 4000,
    });
    assert_eq!(run.module_count, 7);
    assert_eq!(run.external_symbols, 2000);
    assert_eq!(run.linkonce_symbols, 4000);
    assert_eq!(run.linker, LinkerKind::Traditional);
    assert_eq!(run.db_name, DEFAULT_DB_NAME);
  }
}
