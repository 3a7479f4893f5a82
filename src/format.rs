use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use colored::{Color, Colorize};

use crate::stats::Row;

const INDEX_WIDTH: usize = 4;
const NAME_WIDTH: usize = 15;

/// IPC as printed in the summary and the CSV.
pub fn format_ipc(ipc: f64) -> String {
  format!("{ipc:.2}")
}

/// Console summary of a run. Writes to any sink; color can be turned off so
/// the output can be captured verbatim.
pub struct Console<W> {
  out: W,
  color: bool,
}

impl<W: Write> Console<W> {
  pub fn new(out: W, color: bool) -> Self {
    Self { out, color }
  }

  #[cfg(test)]
  pub fn into_inner(self) -> W {
    self.out
  }

  fn paint(&self, text: &str, color: Color) -> String {
    if self.color {
      text.color(color).to_string()
    } else {
      text.to_string()
    }
  }

  pub fn header(&mut self, suite: &str) -> Result<()> {
    writeln!(self.out, "Benchmark summary ({suite}):").context("write")
  }

  /// Prints one benchmark line, `index` being its 1-based position.
  pub fn benchmark(&mut self, index: usize, row: &Row) -> Result<()> {
    let tag = if row.metrics.status() {
      self.paint("SUCCESS", Color::Green)
    } else {
      self.paint("FAILURE", Color::Red)
    };

    writeln!(
      self.out,
      "{index:>INDEX_WIDTH$}) {id:<NAME_WIDTH$}: {tag} (IPC={ipc})",
      id = row.id(),
      ipc = format_ipc(row.metrics.ipc()),
    )
    .context("write")
  }

  pub fn summary(&mut self, passed: usize, total: usize) -> Result<()> {
    writeln!(self.out, "Correctly executed testbenches {passed} out of {total}.").context("write")
  }

  pub fn failures(&mut self, ids: &[&str]) -> Result<()> {
    let line = format!("Failed tests: {}.", ids.join(", "));
    let line = self.paint(&line, Color::Red);

    writeln!(self.out, "{line}").context("write")
  }

  pub fn saving(&mut self, output_dir: &Path) -> Result<()> {
    writeln!(self.out, "Saving the csv report to {}.", output_dir.display()).context("write")
  }
}
