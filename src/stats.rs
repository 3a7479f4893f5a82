use std::path::Path;

use anyhow::{Context, Result};

use crate::ext::PathExt;

/// Length of the file extension stripped from log names, e.g. `.log`.
const EXTENSION_LEN: usize = 4;

/// Returns the benchmark identifier for a log file name: the name with its
/// last four characters removed, whatever they are.
pub fn benchmark_id(file_name: &str) -> &str {
  let end = file_name
    .char_indices()
    .rev()
    .nth(EXTENSION_LEN - 1)
    .map_or(0, |(i, _)| i);

  &file_name[..end]
}

/// A simulator log, read in full.
pub struct BenchmarkLog {
  pub file_name: String,
  pub text: String,
}

impl BenchmarkLog {
  pub fn read(path: &Path) -> Result<Self> {
    Ok(Self {
      file_name: path.file_name_string().context("log file name")?,
      text: path.read_lossy()?,
    })
  }

  pub fn id(&self) -> &str {
    benchmark_id(&self.file_name)
  }
}

/// One of the raw counters scraped from a log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Counter {
  Instructions,
  Cycles,
  Jumps,
  Branches,
  Loads,
  Stores,
  InstrFetches,
  WriteReq,
  ReadReq,
}

/// Raw counters of one benchmark run. Missing counters are zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counters {
  pub instructions: u64,
  pub cycles: u64,
  pub jumps: u64,
  pub branches: u64,
  pub loads: u64,
  pub stores: u64,
  pub instr_fetches: u64,
  pub write_req: u64,
  pub read_req: u64,
}

impl Counters {
  pub fn get_mut(&mut self, counter: Counter) -> &mut u64 {
    match counter {
      Counter::Instructions => &mut self.instructions,
      Counter::Cycles => &mut self.cycles,
      Counter::Jumps => &mut self.jumps,
      Counter::Branches => &mut self.branches,
      Counter::Loads => &mut self.loads,
      Counter::Stores => &mut self.stores,
      Counter::InstrFetches => &mut self.instr_fetches,
      Counter::WriteReq => &mut self.write_req,
      Counter::ReadReq => &mut self.read_req,
    }
  }
}

/// Everything extracted from one log, plus the derived fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricSet {
  /// Exit code reported by the simulator, `None` if it could not be parsed.
  pub exit_code: Option<u64>,
  pub counters: Counters,
}

impl MetricSet {
  /// Whether the benchmark exited with code 0. An unparsed exit code counts as
  /// a failure.
  pub fn status(&self) -> bool {
    self.exit_code == Some(0)
  }

  /// Instructions per cycle, 0 when no cycles were recorded.
  pub fn ipc(&self) -> f64 {
    match self.counters.cycles {
      0 => 0.0,
      cycles => self.counters.instructions as f64 / cycles as f64,
    }
  }

  // Sums are widened so counters near `u64::MAX` cannot overflow.

  pub fn branch_jump(&self) -> u128 {
    u128::from(self.counters.jumps) + u128::from(self.counters.branches)
  }

  pub fn load_store(&self) -> u128 {
    u128::from(self.counters.loads) + u128::from(self.counters.stores)
  }

  pub fn memory_req(&self) -> u128 {
    u128::from(self.counters.instr_fetches)
      + u128::from(self.counters.read_req)
      + u128::from(self.counters.write_req)
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Row {
  pub file_name: String,
  pub metrics: MetricSet,
}

impl Row {
  pub fn id(&self) -> &str {
    benchmark_id(&self.file_name)
  }
}

/// Results of every benchmark of a run, keyed by log file name and kept in
/// insertion order.
#[derive(Debug, Default)]
pub struct ResultsTable {
  rows: Vec<Row>,
}

impl ResultsTable {
  /// Inserts a benchmark, replacing any row already recorded under the same
  /// file name.
  pub fn insert(&mut self, file_name: String, metrics: MetricSet) {
    match self.rows.iter_mut().find(|row| row.file_name == file_name) {
      Some(row) => row.metrics = metrics,
      None => self.rows.push(Row { file_name, metrics }),
    }
  }

  pub fn rows(&self) -> &[Row] {
    &self.rows
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  /// Number of benchmarks that exited successfully.
  pub fn passed(&self) -> usize {
    self.rows.iter().filter(|row| row.metrics.status()).count()
  }
}
