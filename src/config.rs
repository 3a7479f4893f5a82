use std::path::PathBuf;

use crate::whitelist::Whitelist;

const LOG_DIR: &str = "logs/sim";
const OUTPUT_DIR: &str = "output";
const CSV_FILE: &str = "benchmarks.csv";

/// Errors in how the tool was invoked, as opposed to failures while reading
/// or writing a run.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("{0:?} does not exist")]
  MissingLogDir(PathBuf),
}

/// Settings for one report.
#[derive(Clone, Debug)]
pub struct Config {
  /// Benchmark suite name, only displayed.
  pub suite: String,
  /// Run directory holding `logs/sim` and receiving `output`.
  pub run_dir: PathBuf,
  pub whitelist: Whitelist,
}

impl Config {
  pub fn new(suite: String, run_dir: PathBuf) -> Self {
    Self {
      suite,
      run_dir,
      whitelist: Whitelist::default(),
    }
  }

  #[cfg(test)]
  pub fn with_whitelist(self, whitelist: Whitelist) -> Self {
    Self { whitelist, ..self }
  }

  pub fn log_dir(&self) -> PathBuf {
    self.run_dir.join(LOG_DIR)
  }

  pub fn output_dir(&self) -> PathBuf {
    self.run_dir.join(OUTPUT_DIR)
  }

  pub fn csv_path(&self) -> PathBuf {
    self.output_dir().join(CSV_FILE)
  }
}
