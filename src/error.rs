// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Top-level error enum for the ldbench library.
#[derive(Error, Debug)]
pub enum LdbenchError {
  #[error("Configuration error")]
  Config(#[from] ConfigError),

  #[error("Benchmark sweep failed")]
  Run(#[from] RunError),

  #[error("Failed to emit results")]
  Report(#[from] ReportError),
}

/// Errors raised while validating the CLI arguments (src/config.rs).
///
/// All of these fail the process before any subprocess runs.
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Work directory not found: {0}")]
  WorkDirNotFound(PathBuf),

  #[error("Work directory is not a directory: {0}")]
  WorkDirNotADirectory(PathBuf),

  #[error("Work directory is not empty: {0} (pass --force to use it anyway)")]
  WorkDirNotEmpty(PathBuf),

  #[error("Failed to inspect work directory: {path}")]
  InspectWorkDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Errors raised by workspace cleanup and artifact discovery
/// (src/workspace.rs).
#[derive(Error, Debug)]
pub enum WorkspaceError {
  #[error("Failed to compile artifact pattern '{pattern}'")]
  Pattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  #[error("Failed to read work directory: {path}")]
  ReadDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to delete stale artifact: {path}")]
  Delete {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Errors raised by external tool invocations (src/tools.rs).
#[derive(Error, Debug)]
pub enum ToolError {
  #[error("Failed to run {tool}")]
  Launch {
    tool: &'static str,
    #[source]
    source: std::io::Error,
  },

  #[error("{tool} failed with {status}\n--- STDOUT ---\n{stdout}\n--- STDERR ---\n{stderr}")]
  Failed {
    tool: &'static str,
    status: ExitStatus,
    stdout: String,
    stderr: String,
  },
}

/// Errors raised during a benchmark iteration or the sweep around it
/// (src/sweep.rs).
#[derive(Error, Debug)]
pub enum RunError {
  #[error("Workspace preparation failed")]
  Workspace(#[from] WorkspaceError),

  #[error("External tool failed")]
  Tool(#[from] ToolError),

  #[error("Generator produced {actual} ticket files, expected {expected}")]
  TicketCount { expected: usize, actual: usize },

  #[error("Conversion task failed to complete")]
  ConvertJoin(#[source] tokio::task::JoinError),
}

/// Errors raised while rendering or writing the result table
/// (src/report.rs).
#[derive(Error, Debug)]
pub enum ReportError {
  #[error("Failed to serialize results")]
  Serialize(#[from] serde_json::Error),

  #[error("Failed to write results to {path}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}
