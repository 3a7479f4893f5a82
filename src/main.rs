mod bench;
mod config;
mod export;
mod ext;
mod extract;
mod format;
mod stats;
mod whitelist;

use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use self::{
  bench::Outcome,
  config::{Config, ConfigError},
  format::Console,
};

const USAGE_EXIT: u8 = 2;
const GATING_EXIT: u8 = 1;
const ERROR_EXIT: u8 = 1;

/// Summarizes simulator benchmark logs into a pass/fail report and a CSV table.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
  /// Benchmark suite name.
  #[arg(short, long)]
  suite: String,
  /// Run directory. Logs are read from `<path>/logs/sim`, the report is
  /// written to `<path>/output/benchmarks.csv`.
  #[arg(short, long)]
  path: PathBuf,
  /// Disable colored output.
  #[arg(long)]
  no_color: bool,
  /// Log diagnostics to stderr.
  #[arg(short, long)]
  verbose: bool,
}

fn init_logging(verbose: bool) {
  let fallback = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .init();
}

fn main() -> ExitCode {
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(err) if err.use_stderr() => {
      print!("{}", err.render());
      return ExitCode::from(USAGE_EXIT);
    }
    Err(err) => err.exit(),
  };

  init_logging(args.verbose);

  let config = Config::new(args.suite, args.path);
  let mut console = Console::new(io::stdout().lock(), !args.no_color);

  let result = bench::run(config, &mut console);
  match &result {
    Ok(Outcome::Passed { csv }) => info!(path = ?csv, "wrote csv report"),
    Ok(Outcome::Failed { benchmarks }) => debug!(?benchmarks, "non-whitelisted benchmarks failed"),
    Err(err) => eprintln!("Error: {err:?}"),
  }

  ExitCode::from(exit_code(&result))
}

/// Process exit code for the outcome of a run.
fn exit_code(result: &Result<Outcome>) -> u8 {
  match result {
    Ok(Outcome::Passed { .. }) => 0,
    Ok(Outcome::Failed { .. }) => GATING_EXIT,
    Err(err) if err.downcast_ref::<ConfigError>().is_some() => USAGE_EXIT,
    Err(_) => ERROR_EXIT,
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use anyhow::Context;
  use clap::error::ErrorKind;
  use tempfile::TempDir;

  use super::*;

  fn run_in(dir: &TempDir) -> Result<Outcome> {
    let config = Config::new("embench".into(), dir.path().to_path_buf());
    bench::run(config, &mut Console::new(Vec::new(), false))
  }

  #[test]
  fn missing_flags_are_usage_errors() {
    for argv in [
      &["bench-report", "-s", "embench"][..],
      &["bench-report", "-p", "runs/1"][..],
      &["bench-report"][..],
    ] {
      let err = Args::try_parse_from(argv.iter().copied()).unwrap_err();
      assert!(err.use_stderr(), "{argv:?}");
      assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument, "{argv:?}");
    }
  }

  #[test]
  fn both_flags_parse() {
    let args = Args::try_parse_from(["bench-report", "-s", "embench", "--path", "runs/1"]).unwrap();

    assert_eq!(args.suite, "embench");
    assert_eq!(args.path, PathBuf::from("runs/1"));
    assert!(!args.no_color);
  }

  #[test]
  fn outcomes_map_to_exit_codes() {
    let passed = Ok(Outcome::Passed {
      csv: PathBuf::from("output/benchmarks.csv"),
    });
    let failed = Ok(Outcome::Failed {
      benchmarks: vec!["edn".to_string()],
    });

    assert_eq!(exit_code(&passed), 0);
    assert_eq!(exit_code(&failed), 1);
  }

  #[test]
  fn config_errors_exit_with_usage_code() {
    let err = Err::<Outcome, _>(ConfigError::MissingLogDir(PathBuf::from("runs/logs/sim")))
      .context("list logs")
      .context("parse all");

    assert_eq!(exit_code(&err), 2);
    assert_eq!(exit_code(&Err(anyhow::anyhow!("permission denied"))), 1);
  }

  #[test]
  fn run_directories_map_to_exit_codes() {
    let missing = TempDir::new().unwrap();
    assert_eq!(exit_code(&run_in(&missing)), 2);

    let failing = TempDir::new().unwrap();
    let log_dir = failing.path().join("logs/sim");
    fs::create_dir_all(&log_dir).unwrap();
    fs::write(log_dir.join("edn.log"), "Program exit with code: 1 (0x1)
").unwrap();
    assert_eq!(exit_code(&run_in(&failing)), 1);
    assert!(!failing.path().join("output").exists());

    fs::write(log_dir.join("edn.log"), "Program exit with code: 0 (0x0)
").unwrap();
    assert_eq!(exit_code(&run_in(&failing)), 0);
    assert!(failing.path().join("output/benchmarks.csv").exists());
  }
}
