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
use clap::Parser;
use ldbench::cli::Cli;
use ldbench::config::SweepConfig;
use ldbench::error::LdbenchError;
use ldbench::logging::setup_tracing;
use ldbench::report;
use ldbench::sweep::run_sweep;
use ldbench::tools::ToolRunner;

#[tokio::main]
async fn main() {
  let cli = Cli::parse();
  let debug = cli.debug;

  let outcome = match setup_tracing() {
    Ok(guard) => {
      let result = run(cli).await.map_err(anyhow::Error::from);
      // Flush file logs before the exit path below skips destructors.
      drop(guard);
      result
    }
    Err(err) => Err(err),
  };

  if let Err(err) = outcome {
    if debug {
      eprintln!("Error: {err:?}");
    } else {
      eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
  }
}

async fn run(cli: Cli) -> Result<(), LdbenchError> {
  tracing::info!("Initializing benchmark sweep...");

  let config = SweepConfig::try_from(cli)?;
  let results = run_sweep(&config, ToolRunner::new).await?;

  let rendered = if config.json {
    report::render_jsonl(&results)?
  } else {
    report::render_table(&results)
  };
  report::write_output(&config.output, &rendered)?;

  tracing::info!("Sweep complete.");
  Ok(())
}
