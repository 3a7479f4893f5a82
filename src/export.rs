use std::{fs, io, path::Path};

use anyhow::{Context, Result};

use crate::{format::format_ipc, stats::ResultsTable};

pub const HEADER: [&str; 15] = [
  "Benchmark",
  "Status",
  "Instructions",
  "Cycles",
  "IPC",
  "Jumps",
  "Branches",
  "Branch/Jump Instructions",
  "Loads",
  "Stores",
  "Load/Store Instructions",
  "Instruction fetches",
  "Write Requests",
  "Read Requests",
  "Memory Requests",
];

/// Writes the table as CSV to `path`, creating its directory if needed.
pub fn write_csv(table: &ResultsTable, path: &Path) -> Result<()> {
  if let Some(dir) = path.parent() {
    fs::create_dir_all(dir).with_context(|| format!("create_dir_all {dir:?}"))?;
  }

  let mut writer = csv::Writer::from_path(path).with_context(|| format!("create {path:?}"))?;
  write_table(&mut writer, table)?;
  writer.flush().context("flush")?;

  Ok(())
}

pub fn write_table<W: io::Write>(writer: &mut csv::Writer<W>, table: &ResultsTable) -> Result<()> {
  writer.write_record(HEADER).context("write header")?;

  for row in table.rows() {
    let m = &row.metrics;
    let c = &m.counters;

    writer
      .write_record([
        row.id().to_string(),
        m.status().to_string(),
        c.instructions.to_string(),
        c.cycles.to_string(),
        format_ipc(m.ipc()),
        c.jumps.to_string(),
        c.branches.to_string(),
        m.branch_jump().to_string(),
        c.loads.to_string(),
        c.stores.to_string(),
        m.load_store().to_string(),
        c.instr_fetches.to_string(),
        c.write_req.to_string(),
        c.read_req.to_string(),
        m.memory_req().to_string(),
      ])
      .with_context(|| format!("write row {:?}", row.id()))?;
  }

  Ok(())
}
