use tracing::debug;

use crate::{
  ext::ScrapeExt,
  stats::{Counter, MetricSet},
};

/// Anchors the execution report. Everything before it is simulator chatter.
pub const REPORT_START: &str = "Program exit with code: ";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Metric {
  ExitCode,
  Counter(Counter),
}

/// A literal marker in the log, followed by the number it labels.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
  pub metric: Metric,
  pub text: &'static str,
  pub terminator: char,
  pub radix: u32,
}

impl Marker {
  const fn new(metric: Metric, text: &'static str, terminator: char, radix: u32) -> Self {
    Self {
      metric,
      text,
      terminator,
      radix,
    }
  }

  /// Scrapes the value following the first occurrence of this marker.
  /// Returns `None` if the marker is missing or the value is not a number.
  pub fn scrape(&self, report: &str) -> Option<u64> {
    report.between(self.text, self.terminator)?.parse_radix(self.radix)
  }
}

pub const MARKERS: [Marker; 10] = [
  Marker::new(Metric::ExitCode, REPORT_START, '(', 16),
  Marker::new(Metric::Counter(Counter::Instructions), "retired instructions:", '\n', 10),
  Marker::new(Metric::Counter(Counter::Cycles), "total CPU cycles: ", '\n', 10),
  Marker::new(Metric::Counter(Counter::Jumps), "- jumps: ", '(', 10),
  Marker::new(Metric::Counter(Counter::Branches), "- branches:", '(', 10),
  Marker::new(Metric::Counter(Counter::Loads), "- loads:", '(', 10),
  Marker::new(Metric::Counter(Counter::Stores), "- stores:", '(', 10),
  Marker::new(Metric::Counter(Counter::InstrFetches), "- instruction fetches:", '(', 10),
  Marker::new(Metric::Counter(Counter::WriteReq), "- write requests: ", '(', 10),
  Marker::new(Metric::Counter(Counter::ReadReq), "- read requests:", '(', 10),
];

/// Byte offset of the execution report, or 0 if the log has none.
pub fn report_start(log: &str) -> usize {
  log.find(REPORT_START).unwrap_or(0)
}

/// Returns the execution report part of a raw log.
pub fn report(log: &str) -> &str {
  &log[report_start(log)..]
}

/// Scrapes every marker out of an execution report. Missing or malformed
/// values fall back to their defaults: no exit code, zero counters.
pub fn extract(report: &str) -> MetricSet {
  let mut metrics = MetricSet::default();

  for marker in &MARKERS {
    let value = marker.scrape(report);
    if value.is_none() {
      debug!(marker = marker.text, "marker missing or malformed");
    }

    match marker.metric {
      Metric::ExitCode => metrics.exit_code = value,
      Metric::Counter(counter) => *metrics.counters.get_mut(counter) = value.unwrap_or(0),
    }
  }

  metrics
}

/// Extracts the metrics of a raw simulator log.
pub fn parse(log: &str) -> MetricSet {
  extract(report(log))
}
