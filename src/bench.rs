use std::{
  fs,
  io::Write,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::{
  config::{Config, ConfigError},
  export, extract,
  format::Console,
  stats::{BenchmarkLog, ResultsTable},
};

/// How a run ended once every log was aggregated.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
  /// Every non-whitelisted benchmark passed and the CSV was written.
  Passed { csv: PathBuf },
  /// Non-whitelisted benchmarks that failed. No CSV is written.
  Failed { benchmarks: Vec<String> },
}

pub struct Bench {
  config: Config,
  /// Metrics of every log parsed so far.
  pub table: ResultsTable,
}

impl Bench {
  pub fn new(config: Config) -> Self {
    Self {
      config,
      table: ResultsTable::default(),
    }
  }

  /// Lists the benchmark logs of the run, in directory order.
  pub fn logs(&self) -> Result<Vec<PathBuf>> {
    let dir = self.config.log_dir();
    if !dir.exists() {
      return Err(ConfigError::MissingLogDir(dir).into());
    }

    let mut logs = Vec::new();
    for entry in fs::read_dir(&dir).with_context(|| format!("read dir {dir:?}"))? {
      let path = entry.context("dir entry")?.path();
      if !path.is_file() {
        warn!(?path, "skipping non-file entry");
        continue;
      }

      logs.push(path);
    }

    debug!(?dir, count = logs.len(), "listed benchmark logs");

    Ok(logs)
  }

  /// Parses one log into the table, replacing any earlier row for it.
  pub fn parse_log(&mut self, path: &Path) -> Result<()> {
    let log = BenchmarkLog::read(path)?;
    let metrics = extract::parse(&log.text);

    debug!(
      id = log.id(),
      status = metrics.status(),
      ipc = metrics.ipc(),
      "parsed benchmark log"
    );

    self.table.insert(log.file_name, metrics);

    Ok(())
  }

  pub fn parse_all(&mut self) -> Result<()> {
    for log in self.logs().context("list logs")? {
      self.parse_log(&log).with_context(|| format!("parse {log:?}"))?;
    }

    Ok(())
  }

  /// Prints the summary and, if no non-whitelisted benchmark failed, writes the
  /// CSV report.
  pub fn report<W: Write>(&self, console: &mut Console<W>) -> Result<Outcome> {
    for (i, row) in self.table.rows().iter().enumerate() {
      console.benchmark(i + 1, row)?;
    }
    console.summary(self.table.passed(), self.table.len())?;

    let failures = self.config.whitelist.failures(&self.table);
    if !failures.is_empty() {
      console.failures(&failures)?;

      return Ok(Outcome::Failed {
        benchmarks: failures.into_iter().map(String::from).collect(),
      });
    }

    console.saving(&self.config.output_dir())?;
    let csv = self.config.csv_path();
    export::write_csv(&self.table, &csv).context("write csv")?;

    Ok(Outcome::Passed { csv })
  }
}

/// Runs the whole pipeline: collect, parse, report.
pub fn run<W: Write>(config: Config, console: &mut Console<W>) -> Result<Outcome> {
  console.header(&config.suite)?;

  let mut bench = Bench::new(config);
  bench.parse_all().context("parse all")?;
  bench.report(console)
}
