use crate::error::WorkspaceError;
use globset::Glob;
use globset::GlobMatcher;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

/// Glob matched by the generator's ticket files in the work directory.
pub const TICKET_GLOB: &str = "*.tkt";

/// Glob matched by converted object files in the work directory.
pub const OBJECT_GLOB: &str = "*.o";

/// The scratch directory shared by every benchmark iteration.
///
/// Cleanup and ticket discovery go through the same compiled matchers, so
/// the two can never disagree about what counts as a run artifact. A run's
/// artifacts are deleted at the start of the *next* run, which leaves them
/// available for inspection after an interactive invocation.
#[derive(Debug)]
pub struct Workspace {
  dir: PathBuf,
  db_name: String,
  tickets: GlobMatcher,
  objects: GlobMatcher,
}

impl Workspace {
  pub fn new(dir: &Path, db_name: &str) -> Result<Self, WorkspaceError> {
    Ok(Workspace {
      dir: dir.to_path_buf(),
      db_name: db_name.to_string(),
      tickets: compile(TICKET_GLOB)?,
      objects: compile(OBJECT_GLOB)?,
    })
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  /// Deletes ticket files, converted objects and the repository database
  /// left over from a previous run. Deleting an already-clean directory is
  /// a no-op; a file vanishing mid-delete is tolerated too.
  pub fn clean(&self) -> Result<(), WorkspaceError> {
    for entry in read_dir(&self.dir)? {
      let entry = entry.map_err(|source| WorkspaceError::ReadDir {
        path: self.dir.clone(),
        source,
      })?;
      let name = entry.file_name();
      let stale = self.tickets.is_match(&name)
        || self.objects.is_match(&name)
        || name == self.db_name.as_str();
      if stale {
        remove(entry.path())?;
      }
    }
    Ok(())
  }

  /// Ticket files currently in the work directory, sorted by file name for
  /// a deterministic link-input order.
  pub fn ticket_files(&self) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut tickets = Vec::new();
    for entry in read_dir(&self.dir)? {
      let entry = entry.map_err(|source| WorkspaceError::ReadDir {
        path: self.dir.clone(),
        source,
      })?;
      if self.tickets.is_match(entry.file_name()) {
        tickets.push(entry.path());
      }
    }
    tickets.sort();
    Ok(tickets)
  }
}

fn read_dir(dir: &Path) -> Result<fs::ReadDir, WorkspaceError> {
  fs::read_dir(dir).map_err(|source| WorkspaceError::ReadDir {
    path: dir.to_path_buf(),
    source,
  })
}

fn compile(pattern: &str) -> Result<GlobMatcher, WorkspaceError> {
  Glob::new(pattern)
    .map(|glob| glob.compile_matcher())
    .map_err(|source| WorkspaceError::Pattern {
      pattern: pattern.to_string(),
      source,
    })
}

fn remove(path: PathBuf) -> Result<(), WorkspaceError> {
  match fs::remove_file(&path) {
    Ok(()) => Ok(()),
    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
    Err(source) => Err(WorkspaceError::Delete { path, source }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").unwrap();
  }

  #[test]
  fn clean_removes_run_artifacts_and_nothing_else() {
    let temp = tempfile::tempdir().unwrap();
    touch(temp.path(), "mod1.tkt");
    touch(temp.path(), "mod2.tkt");
    touch(temp.path(), "mod1.o");
    touch(temp.path(), "repo.db");
    touch(temp.path(), "notes.txt");

    let workspace = Workspace::new(temp.path(), "repo.db").unwrap();
    workspace.clean().unwrap();

    let remaining: Vec<String> = fs::read_dir(temp.path())
      .unwrap()
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    assert_eq!(remaining, vec!["notes.txt"]);
  }

  #[test]
  fn clean_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    touch(temp.path(), "mod1.tkt");

    let workspace = Workspace::new(temp.path(), "repo.db").unwrap();
    workspace.clean().unwrap();
    workspace.clean().unwrap();

    assert!(workspace.ticket_files().unwrap().is_empty());
  }

  #[test]
  fn ticket_discovery_matches_the_cleanup_pattern() {
    let temp = tempfile::tempdir().unwrap();
    touch(temp.path(), "mod2.tkt");
    touch(temp.path(), "mod1.tkt");
    touch(temp.path(), "mod1.o");
    touch(temp.path(), "unrelated.log");

    let workspace = Workspace::new(temp.path(), "repo.db").unwrap();
    let tickets = workspace.ticket_files().unwrap();

    let names: Vec<_> = tickets
      .iter()
      .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
      .collect();
    assert_eq!(names, vec!["mod1.tkt", "mod2.tkt"]);
  }
}
