use crate::config::RunConfig;
use crate::error::ToolError;
use std::future::Future;
use std::path::Path;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// Binary name of the synthetic module generator.
pub const GENERATOR_BIN: &str = "tktgen";

/// Binary name of the ticket-to-object converter.
pub const CONVERTER_BIN: &str = "tktconv";

/// Binary name of the repo-aware linker.
pub const REPO_LINKER_BIN: &str = "ldrepo";

/// Binary name of the traditional linker.
pub const TRADITIONAL_LINKER_BIN: &str = "ld";

/// The four capability operations the benchmark needs from the outside
/// world. Implemented over real subprocesses by [`ToolRunner`]; the sweep
/// tests substitute an in-process fake.
pub trait Tools: Clone + Send + Sync + 'static {
  /// Writes one ticket file per requested module into the work directory.
  fn generate(
    &self,
    modules: u32,
    external: u32,
    linkonce: u32,
  ) -> impl Future<Output = Result<(), ToolError>> + Send;

  /// Converts one ticket file into a linkable object file next to it.
  fn convert(&self, ticket: &Path) -> impl Future<Output = Result<(), ToolError>> + Send;

  /// Links ticket files directly with the repo-aware linker.
  fn link_repo(
    &self,
    inputs: &[PathBuf],
    output: &Path,
  ) -> impl Future<Output = Result<(), ToolError>> + Send;

  /// Links converted object files with the traditional linker.
  fn link_traditional(
    &self,
    inputs: &[PathBuf],
    output: &Path,
  ) -> impl Future<Output = Result<(), ToolError>> + Send;
}

/// Runs the external tools as subprocesses rooted in the work directory.
///
/// Succeeding means exiting with status zero; anything the tool prints is
/// captured and folded into the error on failure, or passed straight
/// through in verbose mode.
#[derive(Debug, Clone)]
pub struct ToolRunner {
  bin_dir: PathBuf,
  work_dir: PathBuf,
  verbose: bool,
}

impl ToolRunner {
  pub fn new(config: &RunConfig) -> Self {
    ToolRunner {
      bin_dir: config.bin_dir.clone(),
      work_dir: config.work_dir.clone(),
      verbose: config.verbose,
    }
  }

  fn command(&self, tool: &'static str) -> Command {
    let mut cmd = Command::new(self.bin_dir.join(tool));
    cmd.current_dir(&self.work_dir).kill_on_drop(true);
    cmd
  }

  async fn run(&self, tool: &'static str, mut cmd: Command) -> Result<(), ToolError> {
    tracing::debug!(cmd = ?cmd, "Spawning {}", tool);

    if self.verbose {
      let status = cmd
        .status()
        .await
        .map_err(|source| ToolError::Launch { tool, source })?;
      if !status.success() {
        return Err(ToolError::Failed {
          tool,
          status,
          stdout: String::new(),
          stderr: String::new(),
        });
      }
    } else {
      cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
      let output = cmd
        .output()
        .await
        .map_err(|source| ToolError::Launch { tool, source })?;
      if !output.status.success() {
        return Err(ToolError::Failed {
          tool,
          status: output.status,
          stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
          stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
      }
    }
    Ok(())
  }
}

impl Tools for ToolRunner {
  async fn generate(&self, modules: u32, external: u32, linkonce: u32) -> Result<(), ToolError> {
    let mut cmd = self.command(GENERATOR_BIN);
    cmd
      .arg(modules.to_string())
      .arg(external.to_string())
      .arg(linkonce.to_string());
    self.run(GENERATOR_BIN, cmd).await
  }

  async fn convert(&self, ticket: &Path) -> Result<(), ToolError> {
    let mut cmd = self.command(CONVERTER_BIN);
    cmd.arg(ticket);
    self.run(CONVERTER_BIN, cmd).await
  }

  async fn link_repo(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError> {
    let mut cmd = self.command(REPO_LINKER_BIN);
    cmd.arg("-o").arg(output).args(inputs);
    self.run(REPO_LINKER_BIN, cmd).await
  }

  async fn link_traditional(&self, inputs: &[PathBuf], output: &Path) -> Result<(), ToolError> {
    let mut cmd = self.command(TRADITIONAL_LINKER_BIN);
    cmd.arg("-o").arg(output).args(inputs);
    self.run(TRADITIONAL_LINKER_BIN, cmd).await
  }
}
