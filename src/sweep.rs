use crate::config::LINK_OUTPUT_NAME;
use crate::config::LinkerKind;
use crate::config::RunConfig;
use crate::config::SweepConfig;
use crate::error::RunError;
use crate::error::ToolError;
use crate::grid::sweep_grid;
use crate::serial::Task;
use crate::serial::run_serial;
use crate::tools::Tools;
use crate::workspace::Workspace;
use serde::Deserialize;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::Instrument;

/// The outcome of one timed link at one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
  pub external: u32,
  pub linkonce: u32,
  pub time_ms: u64,
}

/// Runs the whole ordered sweep: one timed link per grid point, strictly
/// one grid point at a time.
///
/// `make_tools` builds the tool adapter from each run's configuration. The
/// first failing run aborts the sweep with no partial results.
pub async fn run_sweep<T, F>(config: &SweepConfig, make_tools: F) -> Result<Vec<RunResult>, RunError>
where
  T: Tools,
  F: Fn(&RunConfig) -> T,
{
  let points = sweep_grid(config.external_max, config.linkonce_max, config.increment);
  tracing::info!(
    runs = points.len(),
    modules = config.module_count,
    "Starting sweep"
  );

  let tasks: Vec<Task<'static, RunResult, RunError>> = points
    .into_iter()
    .map(|point| {
      let run = config.run_config(&point);
      let tools = make_tools(&run);
      let span = tracing::info_span!(
        "run",
        external = point.external,
        linkonce = point.linkonce
      );

      let task: Task<'static, RunResult, RunError> = Box::new(move || {
        Box::pin(
          async move {
            let time_ms = execute_run(&run, &tools).await?;
            Ok(RunResult {
              external: point.external,
              linkonce: point.linkonce,
              time_ms,
            })
          }
          .instrument(span),
        )
      });
      task
    })
    .collect();

  run_serial(tasks).await
}

/// One full benchmark iteration: clean the workspace, generate the
/// synthetic modules, resolve the link inputs, then time the link itself.
/// Every step must complete before the next begins.
async fn execute_run<T: Tools>(config: &RunConfig, tools: &T) -> Result<u64, RunError> {
  let workspace = Workspace::new(&config.work_dir, &config.db_name)?;
  workspace.clean()?;

  tools
    .generate(
      config.module_count,
      config.external_symbols,
      config.linkonce_symbols,
    )
    .await?;

  let tickets = workspace.ticket_files()?;
  if tickets.len() != config.module_count as usize {
    return Err(RunError::TicketCount {
      expected: config.module_count as usize,
      actual: tickets.len(),
    });
  }

  let output = workspace.dir().join(LINK_OUTPUT_NAME);
  let started;
  match config.linker {
    LinkerKind::Repo => {
      started = Instant::now();
      tools.link_repo(&tickets, &output).await?;
    }
    LinkerKind::Traditional => {
      convert_all(tools, &tickets).await?;
      let objects: Vec<PathBuf> = tickets.iter().map(|t| t.with_extension("o")).collect();
      started = Instant::now();
      tools.link_traditional(&objects, &output).await?;
    }
  }
  let time_ms = started.elapsed().as_millis() as u64;

  tracing::info!(
    external = config.external_symbols,
    linkonce = config.linkonce_symbols,
    time_ms,
    "Link complete"
  );
  Ok(time_ms)
}

/// Converts every ticket to an object file, keeping at most one conversion
/// per logical CPU in flight. Dropping the set on the first failure aborts
/// the in-flight conversions; their converter processes are killed with
/// them.
async fn convert_all<T: Tools>(tools: &T, tickets: &[PathBuf]) -> Result<(), RunError> {
  let limit = num_cpus::get().max(1);
  let mut batch: JoinSet<Result<(), ToolError>> = JoinSet::new();

  for ticket in tickets {
    if batch.len() >= limit {
      join_one(&mut batch).await?;
    }
    let tools = tools.clone();
    let ticket = ticket.clone();
    batch.spawn(async move { tools.convert(&ticket).await });
  }
  while !batch.is_empty() {
    join_one(&mut batch).await?;
  }
  Ok(())
}

async fn join_one(batch: &mut JoinSet<Result<(), ToolError>>) -> Result<(), RunError> {
  match batch.join_next().await {
    Some(Ok(Ok(()))) => Ok(()),
    Some(Ok(Err(err))) => Err(RunError::Tool(err)),
    Some(Err(err)) => Err(RunError::ConvertJoin(err)),
    None => Ok(()),
  }
}
