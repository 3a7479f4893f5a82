use std::collections::BTreeSet;

use crate::stats::ResultsTable;

/// Benchmarks that are known to fail on the simulator and must not fail a run.
pub const DEFAULT_WHITELIST: [&str; 5] = ["cubic", "nbody", "nettle-sha256", "st", "ud"];

/// Benchmark identifiers exempt from failing the run.
#[derive(Clone, Debug)]
pub struct Whitelist(BTreeSet<String>);

impl Default for Whitelist {
  fn default() -> Self {
    DEFAULT_WHITELIST.into_iter().collect()
  }
}

impl<S: Into<String>> FromIterator<S> for Whitelist {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Self(iter.into_iter().map(Into::into).collect())
  }
}

impl Whitelist {
  pub fn contains(&self, id: &str) -> bool {
    self.0.contains(id)
  }

  /// Identifiers of the failed benchmarks that are not whitelisted, in table
  /// order. The run passes exactly when this is empty.
  pub fn failures<'a>(&self, table: &'a ResultsTable) -> Vec<&'a str> {
    table
      .rows()
      .iter()
      .filter(|row| !row.metrics.status() && !self.contains(row.id()))
      .map(|row| row.id())
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::stats::{Counters, MetricSet};

  fn table(rows: &[(&str, u64)]) -> ResultsTable {
    let mut table = ResultsTable::default();
    for &(file_name, exit_code) in rows {
      table.insert(
        file_name.to_string(),
        MetricSet {
          exit_code: Some(exit_code),
          counters: Counters::default(),
        },
      );
    }

    table
  }

  #[test]
  fn default_list() {
    let whitelist = Whitelist::default();
    for id in DEFAULT_WHITELIST {
      assert!(whitelist.contains(id));
    }
    assert!(!whitelist.contains("crc32"));
  }

  #[test]
  fn failures_skip_whitelisted_benchmarks() {
    let table = table(&[("crc32.log", 0), ("cubic.log", 1), ("edn.log", 3), ("ud.log", 0)]);

    assert_eq!(Whitelist::default().failures(&table), ["edn"]);
    assert!(Whitelist::from_iter(["edn", "cubic"]).failures(&table).is_empty());
  }

  #[test]
  fn empty_whitelist_reports_every_failure() {
    let table = table(&[("a.log", 1), ("b.log", 0), ("c.log", 2)]);

    assert_eq!(Whitelist::from_iter(Vec::<String>::new()).failures(&table), ["a", "c"]);
  }
}
