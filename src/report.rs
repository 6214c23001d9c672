use crate::error::ReportError;
use crate::sweep::RunResult;
use std::fs;
use std::path::PathBuf;

/// Header row of the plain-text result table.
const TABLE_HEADER: &str = "external linkonce time";

/// Renders the result table consumed by the plotting scripts: the header
/// row, then one space-separated row per grid point, in sweep order. This
/// is a wire contract; rows are never reordered or deduplicated.
pub fn render_table(results: &[RunResult]) -> String {
  let mut out = String::from(TABLE_HEADER);
  out.push('\n');
  for result in results {
    out.push_str(&format!(
      "{} {} {}\n",
      result.external, result.linkonce, result.time_ms
    ));
  }
  out
}

/// Renders one JSON object per result line, in the same sweep order as the
/// table.
pub fn render_jsonl(results: &[RunResult]) -> Result<String, ReportError> {
  let mut out = String::new();
  for result in results {
    out.push_str(&serde_json::to_string(result)?);
    out.push('\n');
  }
  Ok(out)
}

/// Writes the rendered report to `output`: `-` means standard output,
/// anything else is a file path. Callers only reach this after the whole
/// sweep has succeeded, so a partial table can never hit the sink.
pub fn write_output(output: &str, rendered: &str) -> Result<(), ReportError> {
  if output == "-" {
    print!("{rendered}");
    Ok(())
  } else {
    fs::write(output, rendered).map_err(|source| ReportError::Write {
      path: PathBuf::from(output),
      source,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn table_matches_the_wire_format_exactly() {
    let results = vec![
      RunResult {
        external: 2000,
        linkonce: 2000,
        time_ms: 150,
      },
      RunResult {
        external: 2000,
        linkonce: 4000,
        time_ms: 300,
      },
    ];

    assert_eq!(
      render_table(&results),
      "external linkonce time\n2000 2000 150\n2000 4000 300\n"
    );
  }

  #[test]
  fn empty_sweep_renders_just_the_header() {
    assert_eq!(render_table(&[]), "external linkonce time\n");
  }

  #[test]
  fn jsonl_preserves_order_and_fields() {
    let results = vec![
      RunResult {
        external: 2000,
        linkonce: 2000,
        time_ms: 150,
      },
      RunResult {
        external: 4000,
        linkonce: 2000,
        time_ms: 450,
      },
    ];

    let rendered = render_jsonl(&results).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: RunResult = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first, results[0]);
    let second: RunResult = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second, results[1]);
  }

  #[test]
  fn file_output_is_written_verbatim() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("results.txt");

    write_output(path.to_str().unwrap(), "external linkonce time\n").unwrap();

    assert_eq!(
      fs::read_to_string(&path).unwrap(),
      "external linkonce time\n"
    );
  }
}
